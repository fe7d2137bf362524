//! Impulse-based 2D rigid body physics: broad/narrow-phase collision
//! detection, iterative impulse resolution, spring constraints and spatial
//! queries.
//!
//! # Example
//! ```rust
//! use impulse2d::body::PhysicsBody;
//! use impulse2d::collider::Collider;
//! use impulse2d::world::PhysicsWorld;
//! use impulse2d::Vec2;
//!
//! let mut world = PhysicsWorld::builder()
//!     .gravity(Vec2::new(0.0, -5.0))
//!     .build();
//!
//! let _ground = world.add_body(PhysicsBody::new_static(
//!     Vec2::new(0.0, -2.0),
//!     Collider::Box { half_extent: Vec2::new(10.0, 0.5) },
//! ));
//! let ball = world.add_body(
//!     PhysicsBody::new(Vec2::new(0.0, 3.0), 1.0, Collider::Circle { radius: 0.5 })
//!         .with_restitution(0.7),
//! );
//!
//! for _ in 0..100 {
//!     world.step(1.0 / 60.0);
//! }
//! assert!(world.body(ball).unwrap().position.y > -1.2);
//! ```

pub mod arena;
pub mod body;
pub mod collider;
pub mod collision;
pub mod spatial;
pub mod spring;
pub mod world;

pub use glam::Vec2;
