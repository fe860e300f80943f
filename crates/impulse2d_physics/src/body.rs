//! Moving objects for 2D physics simulation

use crate::error::PhysicsError;
use crate::material::PhysicsMaterial;
use crate::shapes::Shape;
use crate::trail::Trail;
use impulse2d_math::Vec2;
use slotmap::new_key_type;

// Define generational key type for moving objects
new_key_type! {
    /// Identity of a moving object inside a [`SimulationWorld`](crate::SimulationWorld)
    ///
    /// Uses generational indexing, so a key to an evicted or removed object
    /// never resolves to a newer object that reused its slot.
    pub struct ObjectKey;
}

/// Smallest mass accepted; lower values are clamped up to this
pub const MIN_MASS: f32 = 1.0e-3;
/// Per-tick retention factor for a box's cosmetic spin
pub const BOX_ANGULAR_FRICTION: f32 = 0.98;

/// A 2D object with position, velocity and a circle or box shape
#[derive(Clone, Debug)]
pub struct MovingObject {
    /// Centre position in world coordinates (px)
    pub position: Vec2,
    /// Velocity (px per second)
    pub velocity: Vec2,
    /// Accumulated acceleration for the current tick
    acceleration: Vec2,
    mass: f32,
    shape: Shape,
    material: PhysicsMaterial,
    grabbed: bool,
    trail: Trail,
}

impl MovingObject {
    /// Create an object with the given shape at `position`
    pub fn new(position: Vec2, shape: Shape) -> Result<Self, PhysicsError> {
        if !position.is_finite() {
            return Err(PhysicsError::NonFinite {
                what: "position",
                x: position.x,
                y: position.y,
            });
        }
        Ok(Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            mass: 1.0,
            shape,
            material: PhysicsMaterial::default(),
            grabbed: false,
            trail: Trail::default(),
        })
    }

    /// Create a circular object
    pub fn circle(position: Vec2, radius: f32) -> Result<Self, PhysicsError> {
        Self::new(position, Shape::circle(radius)?)
    }

    /// Create an axis-aligned box object
    pub fn rect(position: Vec2, width: f32, height: f32) -> Result<Self, PhysicsError> {
        Self::new(position, Shape::rect(width, height)?)
    }

    /// Set the velocity of this object
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the mass of this object
    ///
    /// Non-positive or non-finite masses are clamped to [`MIN_MASS`].
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = if mass.is_finite() && mass >= MIN_MASS {
            mass
        } else {
            log::warn!("Rejected mass {}; clamping to {}", mass, MIN_MASS);
            MIN_MASS
        };
        self
    }

    /// Set the surface material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set the restitution (bounciness), clamped to [0, 1]
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.material = PhysicsMaterial::new(restitution, self.material.friction());
        self
    }

    /// Set the per-tick velocity retention factor, clamped to [0, 1]
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.material = PhysicsMaterial::new(self.material.restitution(), friction);
        self
    }

    /// Set the initial cosmetic spin of a box (ignored for circles)
    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.shape.set_spin(angular_velocity);
        self
    }

    /// Add `force / mass` to this tick's acceleration
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force / self.mass;
    }

    /// Advance the object by `dt` seconds
    ///
    /// Semi-implicit Euler: velocity first, then drag, then position. A grabbed
    /// object is held still instead: velocity and acceleration are forced to
    /// zero and the position is left alone.
    pub fn update(&mut self, dt: f32) {
        if self.grabbed {
            self.velocity = Vec2::ZERO;
            self.acceleration = Vec2::ZERO;
        } else {
            self.velocity += self.acceleration * dt;
            self.velocity *= self.material.friction();
            self.position += self.velocity * dt;
            self.acceleration = Vec2::ZERO;
            self.shape.advance_spin(BOX_ANGULAR_FRICTION, dt);
        }

        self.trail.record(self.position, self.velocity.length());
    }

    /// Take direct control of the object (drag start)
    pub fn grab(&mut self) {
        self.grabbed = true;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
    }

    /// Hand the object back to the simulation at rest
    pub fn release(&mut self) {
        self.grabbed = false;
    }

    /// Hand the object back to the simulation with a throw velocity
    pub fn release_with_velocity(&mut self, velocity: Vec2) {
        self.grabbed = false;
        self.velocity = velocity;
    }

    /// Move the object directly (used while dragging)
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    #[inline]
    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inverse_mass(&self) -> f32 {
        1.0 / self.mass
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub(crate) fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    #[inline]
    pub fn material(&self) -> &PhysicsMaterial {
        &self.material
    }

    #[inline]
    pub fn restitution(&self) -> f32 {
        self.material.restitution()
    }

    /// Read-only view of the fading trail
    #[inline]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    /// Check whether `point` lies inside the object's shape
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.shape.contains_point(self.position, point)
    }

    /// Linear momentum (mass * velocity)
    pub fn momentum(&self) -> Vec2 {
        self.velocity * self.mass
    }

    /// True when position and velocity are free of NaN and infinity
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_new_circle() {
        let pos = Vec2::new(1.0, 2.0);
        let obj = MovingObject::circle(pos, 0.5).unwrap();

        assert_eq!(obj.position, pos);
        assert_eq!(obj.velocity, Vec2::ZERO);
        assert_eq!(obj.mass(), 1.0);
        assert_eq!(obj.restitution(), 0.8);
        assert!(!obj.is_grabbed());
        assert!(obj.trail().is_empty());
    }

    #[test]
    fn test_invalid_construction_rejected() {
        assert!(MovingObject::circle(Vec2::ZERO, 0.0).is_err());
        assert!(MovingObject::rect(Vec2::ZERO, -1.0, 1.0).is_err());
        assert!(MovingObject::circle(Vec2::new(f32::NAN, 0.0), 1.0).is_err());
    }

    #[test]
    fn test_builder_methods() {
        let obj = MovingObject::circle(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_mass(5.0)
            .with_restitution(0.3)
            .with_friction(0.9);

        assert_eq!(obj.velocity, Vec2::new(1.0, 2.0));
        assert_eq!(obj.mass(), 5.0);
        assert_eq!(obj.restitution(), 0.3);
        assert_eq!(obj.material().friction(), 0.9);
    }

    #[test]
    fn test_mass_clamping() {
        let obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap().with_mass(0.0);
        assert_eq!(obj.mass(), MIN_MASS);

        let obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap().with_mass(-4.0);
        assert_eq!(obj.mass(), MIN_MASS);

        let obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap().with_mass(f32::NAN);
        assert_eq!(obj.mass(), MIN_MASS);
    }

    #[test]
    fn test_restitution_clamping() {
        let obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap().with_restitution(1.5);
        assert_eq!(obj.restitution(), 1.0);

        let obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap().with_restitution(-0.5);
        assert_eq!(obj.restitution(), 0.0);
    }

    #[test]
    fn test_apply_force_divides_by_mass() {
        let mut obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap().with_mass(2.0);
        obj.apply_force(Vec2::new(10.0, 0.0));
        obj.apply_force(Vec2::new(0.0, 4.0));
        assert_eq!(obj.acceleration(), Vec2::new(5.0, 2.0));
    }

    #[test]
    fn test_update_integrates_and_resets_acceleration() {
        let mut obj = MovingObject::circle(Vec2::ZERO, 1.0)
            .unwrap()
            .with_friction(1.0);
        obj.apply_force(Vec2::new(0.0, 60.0));
        obj.update(DT);

        // v = 60 * dt = 1.0, p = v * dt
        assert!((obj.velocity.y - 1.0).abs() < 0.0001);
        assert!((obj.position.y - DT).abs() < 0.0001);
        assert_eq!(obj.acceleration(), Vec2::ZERO);

        // Force does not persist into the next tick
        obj.update(DT);
        assert!((obj.velocity.y - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_friction_decays_velocity() {
        let mut obj = MovingObject::circle(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(100.0, 0.0))
            .with_friction(0.5);
        obj.update(1.0);
        assert_eq!(obj.velocity.x, 50.0);
        assert_eq!(obj.position.x, 50.0);
    }

    #[test]
    fn test_grabbed_object_is_held() {
        let start = Vec2::new(10.0, 10.0);
        let mut obj = MovingObject::circle(start, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(50.0, 50.0));
        obj.grab();

        for _ in 0..10 {
            obj.apply_force(Vec2::new(0.0, 1000.0));
            obj.update(DT);
            assert_eq!(obj.velocity, Vec2::ZERO);
            assert_eq!(obj.acceleration(), Vec2::ZERO);
            assert_eq!(obj.position, start);
        }
    }

    #[test]
    fn test_release_with_velocity() {
        let mut obj = MovingObject::circle(Vec2::ZERO, 1.0).unwrap();
        obj.grab();
        obj.set_position(Vec2::new(5.0, 5.0));
        obj.release_with_velocity(Vec2::new(300.0, -200.0));

        assert!(!obj.is_grabbed());
        assert_eq!(obj.position, Vec2::new(5.0, 5.0));
        assert_eq!(obj.velocity, Vec2::new(300.0, -200.0));
    }

    #[test]
    fn test_trail_follows_fast_objects() {
        let mut obj = MovingObject::circle(Vec2::ZERO, 1.0)
            .unwrap()
            .with_velocity(Vec2::new(600.0, 0.0));
        obj.update(DT);
        obj.update(DT);
        assert_eq!(obj.trail().len(), 2);
        assert_eq!(obj.trail().latest().unwrap().position, obj.position);
    }

    #[test]
    fn test_box_spin_decays() {
        let mut obj = MovingObject::rect(Vec2::ZERO, 2.0, 2.0)
            .unwrap()
            .with_angular_velocity(1.0);
        obj.update(DT);
        assert!((obj.shape().angular_velocity() - BOX_ANGULAR_FRICTION).abs() < 0.0001);
        assert!(obj.shape().angle() > 0.0);
    }

    #[test]
    fn test_contains_point() {
        let circle = MovingObject::circle(Vec2::new(5.0, 5.0), 2.0).unwrap();
        assert!(circle.contains_point(Vec2::new(6.0, 6.0)));
        assert!(!circle.contains_point(Vec2::new(8.0, 5.0)));

        let rect = MovingObject::rect(Vec2::new(5.0, 5.0), 4.0, 2.0).unwrap();
        assert!(rect.contains_point(Vec2::new(6.9, 5.9)));
        assert!(!rect.contains_point(Vec2::new(5.0, 6.5)));
    }
}
