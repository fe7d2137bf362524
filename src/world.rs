use glam::Vec2;

use crate::arena::{Arena, BodyHandle};
use crate::body::PhysicsBody;
use crate::collider::{Aabb, Circle, Collider};
use crate::collision::{self, Collision};
use crate::spatial::SpatialGrid;
use crate::spring::Spring;

/// Allowed penetration left in place by position correction, so resting
/// contacts don't jitter against exact zero.
const PENETRATION_SLOP: f32 = 0.01;
/// Fraction of the remaining penetration removed per position pass.
const CORRECTION_PERCENT: f32 = 0.8;

/// Closest intersection returned by [`PhysicsWorld::raycast`].
#[derive(Clone, Copy, Debug)]
pub struct RayHit {
    pub body: BodyHandle,
    pub point: Vec2,
    /// Parameter along the segment, 0 at `start`, 1 at `end`.
    pub t: f32,
}

/// Owns the bodies, springs and broad-phase grid, and drives the per-step
/// pipeline: integrate → springs → broad phase → narrow phase → velocity
/// passes → position passes.
///
/// `step` is the sole mutator and returns the collisions found during the
/// step; structural changes (adding or removing bodies) belong between
/// steps.
#[derive(Clone, Debug)]
pub struct PhysicsWorld {
    gravity: Vec2,
    bodies: Arena<PhysicsBody>,
    springs: Vec<Spring>,
    collisions: Vec<Collision>,
    grid: SpatialGrid,
    velocity_iterations: u32,
    position_iterations: u32,
    fixed_dt: f32,
}

impl PhysicsWorld {
    pub fn builder() -> PhysicsWorldBuilder {
        PhysicsWorldBuilder::default()
    }

    pub fn add_body(&mut self, body: PhysicsBody) -> BodyHandle {
        self.bodies.insert(body)
    }

    /// Removes the body, returning it if the handle was live. Springs
    /// referencing it are dropped on the next step.
    pub fn remove_body(&mut self, handle: BodyHandle) -> Option<PhysicsBody> {
        self.bodies.remove(handle)
    }

    pub fn add_spring(&mut self, spring: Spring) {
        self.springs.push(spring);
    }

    pub fn body(&self, handle: BodyHandle) -> Option<&PhysicsBody> {
        self.bodies.get(handle)
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut PhysicsBody> {
        self.bodies.get_mut(handle)
    }

    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &PhysicsBody)> {
        self.bodies.iter()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn spring_count(&self) -> usize {
        self.springs.len()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    /// Collisions found by the most recent step.
    pub fn collisions(&self) -> &[Collision] {
        &self.collisions
    }

    /// Advances the simulation by `dt` and returns the collisions found
    /// this step. Degenerate input is contained locally, the step itself
    /// never fails.
    pub fn step(&mut self, dt: f32) -> &[Collision] {
        for (_, body) in self.bodies.iter_mut() {
            body.integrate(dt, self.gravity);
        }

        self.apply_springs();
        self.broad_phase();
        self.narrow_phase();

        for _ in 0..self.velocity_iterations {
            self.resolve_velocities();
        }
        for _ in 0..self.position_iterations {
            self.resolve_positions();
        }

        log::trace!(
            "step dt={dt}: {} bodies, {} springs, {} contacts",
            self.bodies.len(),
            self.springs.len(),
            self.collisions.len()
        );
        &self.collisions
    }

    /// Steps by the configured fixed timestep.
    pub fn step_fixed(&mut self) -> &[Collision] {
        self.step(self.fixed_dt)
    }

    /// Applies every spring's force pair, dropping springs whose endpoints
    /// are gone.
    fn apply_springs(&mut self) {
        let bodies = &mut self.bodies;
        self.springs.retain(|spring| {
            let Some((a, b)) = bodies.get2_mut(spring.body_a, spring.body_b) else {
                log::debug!(
                    "dropping spring {:?} <-> {:?}: endpoint removed",
                    spring.body_a,
                    spring.body_b
                );
                return false;
            };
            let force = spring.force(a, b);
            a.apply_force(force);
            b.apply_force(-force);
            true
        });
    }

    /// Rebuilds the grid from scratch. Every body is inserted, static ones
    /// included, so static-vs-dynamic pairs reach the narrow phase.
    fn broad_phase(&mut self) {
        self.grid.clear();
        for (handle, body) in self.bodies.iter() {
            self.grid.insert(handle.index(), body.position);
        }
    }

    fn narrow_phase(&mut self) {
        self.collisions.clear();
        for (index_a, index_b) in self.grid.candidate_pairs() {
            let (Some(handle_a), Some(handle_b)) =
                (self.bodies.handle(index_a), self.bodies.handle(index_b))
            else {
                continue;
            };
            let (Some(a), Some(b)) = (self.bodies.get(handle_a), self.bodies.get(handle_b))
            else {
                continue;
            };
            // A pair of immovables has nothing to resolve.
            if a.is_static && b.is_static {
                continue;
            }
            if let Some(collision) = collision::detect(handle_a, a, handle_b, b) {
                self.collisions.push(collision);
            }
        }
    }

    /// One impulse pass over the contact list.
    #[allow(clippy::needless_range_loop)]
    fn resolve_velocities(&mut self) {
        for i in 0..self.collisions.len() {
            let collision = self.collisions[i];
            let Some((a, b)) = self.bodies.get2_mut(collision.body_a, collision.body_b) else {
                continue;
            };
            let normal = collision.normal;

            let rel_velocity = b.velocity - a.velocity;
            let velocity_along_normal = rel_velocity.dot(normal);
            // Already separating.
            if velocity_along_normal > 0.0 {
                continue;
            }

            let inv_mass_sum = a.inv_mass() + b.inv_mass();
            // Two effectively-static bodies, nothing can move.
            if inv_mass_sum == 0.0 {
                continue;
            }

            let e = a.restitution.min(b.restitution);
            let j = -(1.0 + e) * velocity_along_normal / inv_mass_sum;
            let impulse = normal * j;
            a.velocity -= impulse * a.inv_mass();
            b.velocity += impulse * b.inv_mass();

            // Coulomb friction along the tangent, clamped by the normal
            // impulse.
            let tangent = rel_velocity - normal * velocity_along_normal;
            if tangent.length_squared() > 0.0 {
                let tangent = tangent.normalize();
                let friction = (a.friction + b.friction) * 0.5;
                let jt = -rel_velocity.dot(tangent) / inv_mass_sum;
                let jt = jt.clamp(-j * friction, j * friction);
                let friction_impulse = tangent * jt;
                a.velocity -= friction_impulse * a.inv_mass();
                b.velocity += friction_impulse * b.inv_mass();
            }
        }
    }

    /// One Baumgarte position pass: removes most of the penetration beyond
    /// the slop, split by inverse mass.
    #[allow(clippy::needless_range_loop)]
    fn resolve_positions(&mut self) {
        for i in 0..self.collisions.len() {
            let collision = self.collisions[i];
            let Some((a, b)) = self.bodies.get2_mut(collision.body_a, collision.body_b) else {
                continue;
            };
            let inv_mass_sum = a.inv_mass() + b.inv_mass();
            if inv_mass_sum == 0.0 {
                continue;
            }

            let magnitude =
                (collision.depth - PENETRATION_SLOP).max(0.0) / inv_mass_sum * CORRECTION_PERCENT;
            let correction = collision.normal * magnitude;
            a.position -= correction * a.inv_mass();
            b.position += correction * b.inv_mass();
        }
    }

    /// Every body whose collider contains `point`.
    pub fn query_point(&self, point: Vec2) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|(_, body)| body.collider.contains(body.position, point))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Every body whose collider intersects `aabb`.
    pub fn query_aabb(&self, aabb: &Aabb) -> Vec<BodyHandle> {
        self.bodies
            .iter()
            .filter(|(_, body)| match body.collider {
                Collider::Circle { radius } => {
                    Circle::new(body.position, radius).intersects_aabb(aabb)
                }
                Collider::Box { .. } => body.aabb().intersects(aabb),
            })
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Casts the segment `start → end` against every body and returns the
    /// globally closest hit. A zero-length segment hits nothing.
    pub fn raycast(&self, start: Vec2, end: Vec2) -> Option<RayHit> {
        let delta = end - start;
        if delta == Vec2::ZERO {
            return None;
        }

        let mut closest: Option<RayHit> = None;
        for (handle, body) in self.bodies.iter() {
            let t = match body.collider {
                Collider::Circle { radius } => {
                    Circle::new(body.position, radius).raycast(start, delta)
                }
                Collider::Box { .. } => body.aabb().raycast(start, delta),
            };
            if let Some(t) = t {
                if closest.map_or(true, |hit| t < hit.t) {
                    closest = Some(RayHit {
                        body: handle,
                        point: start + delta * t,
                        t,
                    });
                }
            }
        }
        closest
    }
}

/// Builder for [`PhysicsWorld`].
pub struct PhysicsWorldBuilder {
    gravity: Vec2,
    cell_size: f32,
    velocity_iterations: u32,
    position_iterations: u32,
    fixed_dt: f32,
}

impl PhysicsWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global acceleration applied to every body, scaled by the body's
    /// `gravity_scale`.
    pub fn gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Edge length of the broad-phase grid cells. Should comfortably exceed
    /// the typical collider size; bodies are binned by position.
    pub fn cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Impulse passes over the contact list per step. Clamped to at least 1.
    pub fn velocity_iterations(mut self, iterations: u32) -> Self {
        self.velocity_iterations = iterations;
        self
    }

    /// Penetration-correction passes per step. Clamped to at least 1.
    pub fn position_iterations(mut self, iterations: u32) -> Self {
        self.position_iterations = iterations;
        self
    }

    /// Step length used by `step_fixed`, in seconds.
    pub fn fixed_dt(mut self, fixed_dt: f32) -> Self {
        self.fixed_dt = fixed_dt;
        self
    }

    pub fn build(self) -> PhysicsWorld {
        PhysicsWorld {
            gravity: self.gravity,
            bodies: Arena::new(),
            springs: Vec::new(),
            collisions: Vec::new(),
            grid: SpatialGrid::new(self.cell_size),
            velocity_iterations: self.velocity_iterations.max(1),
            position_iterations: self.position_iterations.max(1),
            fixed_dt: self.fixed_dt,
        }
    }
}

impl Default for PhysicsWorldBuilder {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, -9.81),
            cell_size: 64.0,
            velocity_iterations: 8,
            position_iterations: 3,
            fixed_dt: 1.0 / 60.0,
        }
    }
}
