use glam::Vec2;

use crate::arena::BodyHandle;
use crate::body::PhysicsBody;

/// Damped Hookean spring between two bodies.
///
/// The handles are non-owning; the world drops a spring once either endpoint
/// has been removed.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spring {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

impl Spring {
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, rest_length: f32) -> Self {
        Self {
            body_a,
            body_b,
            rest_length,
            stiffness: 100.0,
            damping: 5.0,
        }
    }

    pub fn with_stiffness(mut self, stiffness: f32) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Total force on `body_a`; `body_b` receives the negation. Co-located
    /// endpoints give no direction to pull along, so the force is zero.
    pub fn force(&self, a: &PhysicsBody, b: &PhysicsBody) -> Vec2 {
        let delta = b.position - a.position;
        let distance = delta.length();
        if distance == 0.0 {
            return Vec2::ZERO;
        }
        let direction = delta / distance;

        // Hooke's law along the axis, plus damping against the relative
        // velocity component on that axis.
        let spring = direction * (self.stiffness * (distance - self.rest_length));
        let rel_velocity = b.velocity - a.velocity;
        let damping = direction * (rel_velocity.dot(direction) * self.damping);

        spring + damping
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::arena::Arena;
    use crate::collider::Collider;

    fn pair(distance: f32) -> (Arena<PhysicsBody>, Spring) {
        let mut bodies = Arena::new();
        let a = bodies.insert(PhysicsBody::new(
            Vec2::ZERO,
            1.0,
            Collider::Circle { radius: 0.1 },
        ));
        let b = bodies.insert(PhysicsBody::new(
            Vec2::new(distance, 0.0),
            1.0,
            Collider::Circle { radius: 0.1 },
        ));
        (bodies, Spring::new(a, b, 1.0))
    }

    #[test]
    fn at_rest_length_force_is_zero() {
        let (bodies, spring) = pair(1.0);
        let a = bodies.get(spring.body_a).unwrap();
        let b = bodies.get(spring.body_b).unwrap();
        assert_eq!(spring.force(a, b), Vec2::ZERO);
    }

    #[test]
    fn stretched_spring_pulls_together() {
        let (bodies, spring) = pair(2.0);
        let a = bodies.get(spring.body_a).unwrap();
        let b = bodies.get(spring.body_b).unwrap();
        let force = spring.force(a, b);
        // Stretched by 1: force on A points toward B with magnitude k * 1.
        assert!((force.x - spring.stiffness).abs() < 1e-4);
        assert_eq!(force.y, 0.0);
    }

    #[test]
    fn compressed_spring_pushes_apart() {
        let (bodies, spring) = pair(0.5);
        let a = bodies.get(spring.body_a).unwrap();
        let b = bodies.get(spring.body_b).unwrap();
        let force = spring.force(a, b);
        assert!(force.x < 0.0);
    }

    #[test]
    fn damping_opposes_separation_speed() {
        let (mut bodies, spring) = pair(1.0);
        bodies.get_mut(spring.body_b).unwrap().velocity = Vec2::new(2.0, 0.0);
        let a = bodies.get(spring.body_a).unwrap();
        let b = bodies.get(spring.body_b).unwrap();
        let force = spring.force(a, b);
        // At rest length the Hooke term vanishes; only damping remains.
        assert!((force.x - 2.0 * spring.damping).abs() < 1e-4);
    }

    #[test]
    fn co_located_endpoints_apply_nothing() {
        let (bodies, spring) = pair(0.0);
        let a = bodies.get(spring.body_a).unwrap();
        let b = bodies.get(spring.body_b).unwrap();
        assert_eq!(spring.force(a, b), Vec2::ZERO);
    }
}
