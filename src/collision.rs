use glam::Vec2;

use crate::arena::BodyHandle;
use crate::body::PhysicsBody;
use crate::collider::{Aabb, Circle, Collider};

/// Contact between two bodies, produced by the narrow phase and consumed by
/// the solver passes. Rebuilt every step, never persisted.
///
/// `normal` is a unit vector pointing from `body_a` toward `body_b`; `depth`
/// is the penetration along it. `contact` is the surface point for
/// circle-involved pairs; box-box overlaps have no single representative
/// point.
#[derive(Clone, Copy, Debug)]
pub struct Collision {
    pub body_a: BodyHandle,
    pub body_b: BodyHandle,
    pub normal: Vec2,
    pub depth: f32,
    pub contact: Option<Vec2>,
}

/// Dispatches the collider-pair test for two bodies.
pub fn detect(
    handle_a: BodyHandle,
    a: &PhysicsBody,
    handle_b: BodyHandle,
    b: &PhysicsBody,
) -> Option<Collision> {
    match (a.collider, b.collider) {
        (Collider::Circle { radius: radius_a }, Collider::Circle { radius: radius_b }) => {
            circle_circle(
                handle_a,
                Circle::new(a.position, radius_a),
                handle_b,
                Circle::new(b.position, radius_b),
            )
        }
        (Collider::Box { .. }, Collider::Box { .. }) => {
            box_box(handle_a, a.aabb(), handle_b, b.aabb())
        }
        (Collider::Circle { radius }, Collider::Box { .. }) => circle_box(
            handle_a,
            Circle::new(a.position, radius),
            handle_b,
            b.aabb(),
        ),
        (Collider::Box { .. }, Collider::Circle { radius }) => {
            // Run the test circle-first, then swap back so the normal still
            // points A toward B.
            circle_box(
                handle_b,
                Circle::new(b.position, radius),
                handle_a,
                a.aabb(),
            )
            .map(|collision| Collision {
                body_a: handle_a,
                body_b: handle_b,
                normal: -collision.normal,
                ..collision
            })
        }
    }
}

/// Collision iff `0 < distance < r1 + r2`. Co-located centers leave the
/// normal undefined and are not reported.
fn circle_circle(
    handle_a: BodyHandle,
    a: Circle,
    handle_b: BodyHandle,
    b: Circle,
) -> Option<Collision> {
    let delta = b.center - a.center;
    let distance = delta.length();
    let radius_sum = a.radius + b.radius;

    if distance <= 0.0 || distance >= radius_sum {
        return None;
    }

    let normal = delta / distance;
    Some(Collision {
        body_a: handle_a,
        body_b: handle_b,
        normal,
        depth: radius_sum - distance,
        contact: Some(a.center + normal * a.radius),
    })
}

/// Minimum-translation-vector heuristic: the separation normal is the axis
/// of minimum overlap, signed toward B.
fn box_box(handle_a: BodyHandle, a: Aabb, handle_b: BodyHandle, b: Aabb) -> Option<Collision> {
    let delta = b.center() - a.center();
    let overlap = (a.size() + b.size()) * 0.5 - delta.abs();

    // Strict: touching edges and zero-size boxes do not collide.
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return None;
    }

    let (normal, depth) = if overlap.x < overlap.y {
        (Vec2::new(if delta.x > 0.0 { 1.0 } else { -1.0 }, 0.0), overlap.x)
    } else {
        (Vec2::new(0.0, if delta.y > 0.0 { 1.0 } else { -1.0 }), overlap.y)
    };

    Some(Collision {
        body_a: handle_a,
        body_b: handle_b,
        normal,
        depth,
        contact: None,
    })
}

/// Clamps the circle center into the box to find the closest point. The
/// normal runs from the circle toward that point; when the center sits
/// exactly inside the box there is no direction, and `(0, 1)` is used.
fn circle_box(
    handle_circle: BodyHandle,
    circle: Circle,
    handle_box: BodyHandle,
    aabb: Aabb,
) -> Option<Collision> {
    let closest = aabb.closest_point(circle.center);
    let delta = circle.center - closest;
    let distance = delta.length();

    if distance >= circle.radius {
        return None;
    }

    let normal = if distance > 0.0 {
        -delta / distance
    } else {
        Vec2::Y
    };

    Some(Collision {
        body_a: handle_circle,
        body_b: handle_box,
        normal,
        depth: circle.radius - distance,
        contact: Some(closest),
    })
}
