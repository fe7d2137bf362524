use glam::Vec2;

use crate::collider::{Aabb, Collider};

/// Rigid body advanced by the world each step.
///
/// Mass is held together with its inverse: a mass of zero means infinite
/// mass (`inv_mass` 0), so forces and impulses have no effect. Static bodies
/// skip integration entirely; kinematic bodies accumulate velocity from
/// forces but never move from it, their position is driven externally.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    mass: f32,
    inv_mass: f32,
    /// Bounciness, 0 = inelastic, 1 = fully elastic.
    pub restitution: f32,
    pub friction: f32,
    /// Per-step velocity decay in `[0, 1)`.
    pub drag: f32,
    pub is_static: bool,
    pub is_kinematic: bool,
    pub gravity_scale: f32,
    pub collider: Collider,
}

impl PhysicsBody {
    /// Dynamic body. `mass` ≤ 0 is treated as infinite mass.
    pub fn new(position: Vec2, mass: f32, collider: Collider) -> Self {
        let mass = mass.max(0.0);
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass,
            inv_mass: if mass > 0.0 { 1.0 / mass } else { 0.0 },
            restitution: 0.5,
            friction: 0.3,
            drag: 0.01,
            is_static: false,
            is_kinematic: false,
            gravity_scale: 1.0,
            collider,
        }
    }

    /// Immovable body with infinite mass.
    pub fn new_static(position: Vec2, collider: Collider) -> Self {
        let mut body = Self::new(position, 0.0, collider);
        body.is_static = true;
        body
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    /// Marks the body kinematic: velocity still integrates, position is
    /// expected to be set by the owner (a script or an attached bone).
    pub fn kinematic(mut self) -> Self {
        self.is_kinematic = true;
        self
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Updates the mass and keeps the inverse in sync.
    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(0.0);
        self.inv_mass = if self.mass > 0.0 { 1.0 / self.mass } else { 0.0 };
    }

    /// Accumulates `force / mass` into the acceleration. No-op for static
    /// or infinite-mass bodies.
    pub fn apply_force(&mut self, force: Vec2) {
        if self.is_static {
            return;
        }
        self.acceleration += force * self.inv_mass;
    }

    /// Instantaneous momentum change. No-op for static and kinematic bodies.
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        if self.is_static || self.is_kinematic {
            return;
        }
        self.velocity += impulse * self.inv_mass;
    }

    /// Semi-implicit Euler step: velocity picks up the acceleration first,
    /// then the new velocity moves the position.
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        if self.is_static {
            return;
        }

        if self.gravity_scale > 0.0 {
            self.apply_force(gravity * self.mass * self.gravity_scale);
        }

        self.velocity *= 1.0 - self.drag;
        self.velocity += self.acceleration * dt;

        if !self.is_kinematic {
            self.position += self.velocity * dt;
        }

        self.acceleration = Vec2::ZERO;
    }

    /// World-space bounds of the collider at the current position.
    pub fn aabb(&self) -> Aabb {
        self.collider.aabb(self.position)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unit_circle_body(mass: f32) -> PhysicsBody {
        PhysicsBody::new(Vec2::ZERO, mass, Collider::Circle { radius: 1.0 })
    }

    #[test]
    fn zero_mass_behaves_as_infinite() {
        let mut body = unit_circle_body(0.0);
        assert_eq!(body.inv_mass(), 0.0);
        body.apply_force(Vec2::new(100.0, 0.0));
        body.apply_impulse(Vec2::new(100.0, 0.0));
        assert_eq!(body.acceleration, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn static_body_skips_integration() {
        let mut body = PhysicsBody::new_static(Vec2::new(1.0, 2.0), Collider::Circle { radius: 1.0 });
        body.integrate(1.0, Vec2::new(0.0, -10.0));
        assert_eq!(body.position, Vec2::new(1.0, 2.0));
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn integrate_is_semi_implicit() {
        let mut body = unit_circle_body(2.0).with_drag(0.0);
        body.apply_force(Vec2::new(4.0, 0.0));
        body.integrate(0.5, Vec2::ZERO);
        // a = f/m = 2, v = a*dt = 1, x = v*dt = 0.5 — the new velocity moves
        // the position within the same step.
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
        assert_eq!(body.position, Vec2::new(0.5, 0.0));
        assert_eq!(body.acceleration, Vec2::ZERO);
    }

    #[test]
    fn gravity_scales_with_gravity_scale() {
        let mut floaty = unit_circle_body(1.0).with_drag(0.0).with_gravity_scale(0.1);
        floaty.integrate(1.0, Vec2::new(0.0, -10.0));
        assert!((floaty.velocity.y + 1.0).abs() < 1e-6);

        let mut weightless = unit_circle_body(1.0).with_drag(0.0).with_gravity_scale(0.0);
        weightless.integrate(1.0, Vec2::new(0.0, -10.0));
        assert_eq!(weightless.velocity, Vec2::ZERO);
    }

    #[test]
    fn drag_decays_velocity() {
        let mut body = unit_circle_body(1.0).with_drag(0.5);
        body.velocity = Vec2::new(2.0, 0.0);
        body.integrate(1.0, Vec2::ZERO);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn kinematic_body_holds_position() {
        let mut body = unit_circle_body(1.0).with_drag(0.0).kinematic();
        body.apply_impulse(Vec2::new(5.0, 0.0));
        assert_eq!(body.velocity, Vec2::ZERO);

        body.apply_force(Vec2::new(3.0, 0.0));
        body.integrate(1.0, Vec2::ZERO);
        // Forces integrate into velocity, but the body does not move itself.
        assert_eq!(body.velocity, Vec2::new(3.0, 0.0));
        assert_eq!(body.position, Vec2::ZERO);
    }

    #[test]
    fn set_mass_keeps_inverse_in_sync() {
        let mut body = unit_circle_body(1.0);
        body.set_mass(4.0);
        assert_eq!(body.inv_mass(), 0.25);
        body.set_mass(0.0);
        assert_eq!(body.inv_mass(), 0.0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_test {
    use super::*;

    #[test]
    fn body_round_trips_through_json() {
        let body = PhysicsBody::new(Vec2::new(1.0, -2.0), 2.0, Collider::Circle { radius: 0.4 })
            .with_restitution(0.7);
        let json = serde_json::to_string(&body).unwrap();
        let back: PhysicsBody = serde_json::from_str(&json).unwrap();
        assert_eq!(back.position, body.position);
        assert_eq!(back.inv_mass(), body.inv_mass());
        assert_eq!(back.collider, body.collider);
    }
}
