use glam::Vec2;

/// Axis-aligned bounding box. `min` must be ≤ `max` on both axes; a
/// zero-area box is legal and only ever contains its own boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Builds the box around `center` with the given full `size`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Containment is inclusive on both bounds.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Interval-overlap test on both axes, inclusive of touching edges.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Point of the box closest to `point`.
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    /// Slab test against the segment `start + t * delta` for `t` in `[0, 1]`.
    /// Returns the entry `t`; a segment starting inside the box hits at 0.
    pub fn raycast(&self, start: Vec2, delta: Vec2) -> Option<f32> {
        if delta == Vec2::ZERO {
            return None;
        }

        let mut t_min = 0.0_f32;
        let mut t_max = 1.0_f32;
        for axis in 0..2 {
            if delta[axis] != 0.0 {
                let t1 = (self.min[axis] - start[axis]) / delta[axis];
                let t2 = (self.max[axis] - start[axis]) / delta[axis];
                t_min = t_min.max(t1.min(t2));
                t_max = t_max.min(t1.max(t2));
            } else if start[axis] < self.min[axis] || start[axis] > self.max[axis] {
                // Parallel to this axis and outside the slab.
                return None;
            }
        }

        if t_min > t_max {
            return None;
        }
        Some(t_min)
    }
}

/// Circle of `radius` around `center`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn intersects(&self, other: &Circle) -> bool {
        let radius_sum = self.radius + other.radius;
        self.center.distance_squared(other.center) <= radius_sum * radius_sum
    }

    /// Clamps the center into the box and compares squared distances, so the
    /// test stays square-root free.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = aabb.closest_point(self.center);
        self.center.distance_squared(closest) <= self.radius * self.radius
    }

    /// Quadratic intersection with the segment `start + t * delta`,
    /// returning the smallest `t` in `[0, 1]`.
    pub fn raycast(&self, start: Vec2, delta: Vec2) -> Option<f32> {
        let oc = start - self.center;
        let a = delta.dot(delta);
        if a == 0.0 {
            return None;
        }
        let b = 2.0 * oc.dot(delta);
        let c = oc.dot(oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_disc = discriminant.sqrt();

        let t1 = (-b - sqrt_disc) / (2.0 * a);
        if (0.0..=1.0).contains(&t1) {
            return Some(t1);
        }
        let t2 = (-b + sqrt_disc) / (2.0 * a);
        if (0.0..=1.0).contains(&t2) {
            return Some(t2);
        }
        None
    }
}

/// Shape attached to a body, centered on the body position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Collider {
    Circle { radius: f32 },
    Box { half_extent: Vec2 },
}

impl Collider {
    /// World-space bounds of the shape centered at `position`.
    pub fn aabb(&self, position: Vec2) -> Aabb {
        match *self {
            Collider::Circle { radius } => Aabb::from_center(position, Vec2::splat(radius * 2.0)),
            Collider::Box { half_extent } => Aabb {
                min: position - half_extent,
                max: position + half_extent,
            },
        }
    }

    pub fn contains(&self, position: Vec2, point: Vec2) -> bool {
        match *self {
            Collider::Circle { radius } => Circle::new(position, radius).contains(point),
            Collider::Box { .. } => self.aabb(position).contains(point),
        }
    }
}
