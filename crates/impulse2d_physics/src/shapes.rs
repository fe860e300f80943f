//! Shapes carried by moving objects
//!
//! A shape only stores its size; the object it belongs to stores the centre.
//! Boxes always collide as axis-aligned rectangles. Their `angle` and
//! `angular_velocity` are cosmetic and never feed back into collision geometry.

use crate::error::{ensure_positive, PhysicsError};
use impulse2d_math::Vec2;

/// A 2D axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner (top-left in screen space)
    pub min: Vec2,
    /// Maximum corner (bottom-right in screen space)
    pub max: Vec2,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.clamp_components(self.min, self.max)
    }

    /// True when the two boxes overlap with positive area
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// The geometric kind of a moving object
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// A circle of the given radius
    Circle { radius: f32 },
    /// An axis-aligned box with a cosmetic rotation
    Box {
        width: f32,
        height: f32,
        /// Rotation angle in radians (drawing only)
        angle: f32,
        /// Spin in radians per second (drawing only)
        angular_velocity: f32,
    },
}

impl Shape {
    /// Create a circle shape, rejecting non-positive or non-finite radii
    pub fn circle(radius: f32) -> Result<Self, PhysicsError> {
        Ok(Shape::Circle {
            radius: ensure_positive("radius", radius)?,
        })
    }

    /// Create a non-rotated box shape, rejecting non-positive or non-finite sizes
    pub fn rect(width: f32, height: f32) -> Result<Self, PhysicsError> {
        Ok(Shape::Box {
            width: ensure_positive("width", width)?,
            height: ensure_positive("height", height)?,
            angle: 0.0,
            angular_velocity: 0.0,
        })
    }

    /// Half size of the shape's axis-aligned extent
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Circle { radius } => Vec2::new(radius, radius),
            Shape::Box { width, height, .. } => Vec2::new(width * 0.5, height * 0.5),
        }
    }

    /// Axis-aligned extent of the shape centred at `center`
    pub fn aabb(&self, center: Vec2) -> Aabb {
        Aabb::from_center_half_extents(center, self.half_extents())
    }

    /// Check whether `point` lies inside or on the shape centred at `center`
    pub fn contains_point(&self, center: Vec2, point: Vec2) -> bool {
        match *self {
            Shape::Circle { radius } => center.distance(point) <= radius,
            Shape::Box { .. } => self.aabb(center).contains(point),
        }
    }

    /// True for boxes
    pub fn is_box(&self) -> bool {
        matches!(self, Shape::Box { .. })
    }

    /// Cosmetic rotation angle (always 0.0 for circles)
    pub fn angle(&self) -> f32 {
        match *self {
            Shape::Circle { .. } => 0.0,
            Shape::Box { angle, .. } => angle,
        }
    }

    /// Cosmetic spin (always 0.0 for circles)
    pub fn angular_velocity(&self) -> f32 {
        match *self {
            Shape::Circle { .. } => 0.0,
            Shape::Box { angular_velocity, .. } => angular_velocity,
        }
    }

    /// Add to the spin of a box; circles ignore it
    pub(crate) fn nudge_spin(&mut self, delta: f32) {
        if let Shape::Box { angular_velocity, .. } = self {
            *angular_velocity += delta;
        }
    }

    /// Replace the spin of a box; circles ignore it
    pub(crate) fn set_spin(&mut self, value: f32) {
        if let Shape::Box { angular_velocity, .. } = self {
            *angular_velocity = value;
        }
    }

    /// Decay the spin by `friction` and advance the angle by `dt`
    pub(crate) fn advance_spin(&mut self, friction: f32, dt: f32) {
        if let Shape::Box {
            angle,
            angular_velocity,
            ..
        } = self
        {
            *angular_velocity *= friction;
            *angle += *angular_velocity * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_contains() {
        let circle = Shape::circle(1.0).unwrap();
        let c = Vec2::new(10.0, 10.0);
        assert!(circle.contains_point(c, c));
        assert!(circle.contains_point(c, Vec2::new(10.5, 10.0)));
        assert!(circle.contains_point(c, Vec2::new(11.0, 10.0))); // on edge
        assert!(!circle.contains_point(c, Vec2::new(11.1, 10.0)));
    }

    #[test]
    fn test_box_contains_is_axis_aligned() {
        let mut rect = Shape::rect(4.0, 2.0).unwrap();
        let c = Vec2::new(0.0, 0.0);
        assert!(rect.contains_point(c, Vec2::new(2.0, 1.0))); // corner
        assert!(!rect.contains_point(c, Vec2::new(2.1, 0.0)));
        assert!(!rect.contains_point(c, Vec2::new(0.0, 1.1)));

        // Spinning the box does not change what it contains
        rect.nudge_spin(5.0);
        rect.advance_spin(1.0, 0.3);
        assert!(rect.angle() != 0.0);
        assert!(rect.contains_point(c, Vec2::new(2.0, 1.0)));
        assert!(!rect.contains_point(c, Vec2::new(2.1, 0.0)));
    }

    #[test]
    fn test_invalid_dimensions_rejected() {
        assert!(Shape::circle(0.0).is_err());
        assert!(Shape::circle(-2.0).is_err());
        assert!(Shape::rect(1.0, 0.0).is_err());
        assert!(Shape::rect(f32::NAN, 1.0).is_err());
    }

    #[test]
    fn test_half_extents() {
        assert_eq!(Shape::circle(3.0).unwrap().half_extents(), Vec2::new(3.0, 3.0));
        assert_eq!(Shape::rect(4.0, 6.0).unwrap().half_extents(), Vec2::new(2.0, 3.0));
    }

    #[test]
    fn test_spin_helpers_ignore_circles() {
        let mut circle = Shape::circle(1.0).unwrap();
        circle.nudge_spin(3.0);
        circle.advance_spin(0.5, 1.0);
        assert_eq!(circle.angular_velocity(), 0.0);
        assert_eq!(circle.angle(), 0.0);
    }

    #[test]
    fn test_advance_spin_decays() {
        let mut rect = Shape::rect(1.0, 1.0).unwrap();
        rect.set_spin(2.0);
        rect.advance_spin(0.5, 1.0);
        assert_eq!(rect.angular_velocity(), 1.0);
        assert_eq!(rect.angle(), 1.0);
    }

    #[test]
    fn test_aabb_closest_point() {
        let aabb = Aabb::new(Vec2::ZERO, Vec2::new(2.0, 2.0));
        assert_eq!(aabb.closest_point(Vec2::new(1.0, 1.0)), Vec2::new(1.0, 1.0));
        assert_eq!(aabb.closest_point(Vec2::new(5.0, -3.0)), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_aabb_overlaps() {
        let a = Aabb::from_center_half_extents(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec2::new(1.5, 0.0), Vec2::new(1.0, 1.0));
        let c = Aabb::from_center_half_extents(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c)); // only touching
        assert_eq!(b.center(), Vec2::new(1.5, 0.0));
        assert_eq!(b.half_extents(), Vec2::new(1.0, 1.0));
    }
}
