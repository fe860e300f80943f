//! WorldBuilder - Declarative world construction
//!
//! Provides a fluent API for building simulation worlds full of objects.

use impulse2d_math::Vec2;
use impulse2d_physics::{MovingObject, PhysicsError, PhysicsMaterial, SimulationWorld, WorldConfig};

/// Golden angle in radians, spreads spawn directions evenly
const GOLDEN_ANGLE: f32 = 2.399_963;

/// Builder for constructing simulation worlds
///
/// # Example
/// ```ignore
/// let world = WorldBuilder::new(WorldConfig::default())?
///     .with_material(PhysicsMaterial::RUBBER)
///     .add_circle(Vec2::new(300.0, 200.0), 20.0, Vec2::ZERO)?
///     .add_box(Vec2::new(600.0, 200.0), 40.0, 30.0, Vec2::new(-50.0, 0.0))?
///     .build();
/// ```
pub struct WorldBuilder {
    world: SimulationWorld,
    material: PhysicsMaterial,
}

impl WorldBuilder {
    /// Create a builder for an empty world with the given configuration
    pub fn new(config: WorldConfig) -> Result<Self, PhysicsError> {
        Ok(Self {
            world: SimulationWorld::with_config(config)?,
            material: PhysicsMaterial::default(),
        })
    }

    /// Material given to every object added after this call
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Add a circle with unit mass
    pub fn add_circle(self, position: Vec2, radius: f32, velocity: Vec2) -> Result<Self, PhysicsError> {
        let object = MovingObject::circle(position, radius)?.with_velocity(velocity);
        Ok(self.add_object(object))
    }

    /// Add an axis-aligned box with unit mass
    pub fn add_box(
        self,
        position: Vec2,
        width: f32,
        height: f32,
        velocity: Vec2,
    ) -> Result<Self, PhysicsError> {
        let object = MovingObject::rect(position, width, height)?.with_velocity(velocity);
        Ok(self.add_object(object))
    }

    /// Add a prebuilt object, overriding its material with the builder's
    pub fn add_object(mut self, object: MovingObject) -> Self {
        self.world.add(object.with_material(self.material));
        self
    }

    /// Fill the world row by row with `count` objects
    ///
    /// Every third object is a square box of side `box_size`, the rest are
    /// circles. Launch directions follow the golden angle and speeds cycle
    /// between half and full `launch_speed`, so the layout is deterministic.
    /// Rows wrap back to the top once the world height is used up.
    pub fn add_grid(
        mut self,
        count: usize,
        circle_radius: f32,
        box_size: f32,
        launch_speed: f32,
    ) -> Result<Self, PhysicsError> {
        let cell = (circle_radius * 2.0).max(box_size) * 1.5;
        let cols = ((self.world.width() / cell) as usize).saturating_sub(1).max(1);
        let rows = ((self.world.height() / cell) as usize).saturating_sub(1).max(1);

        for i in 0..count {
            let col = i % cols;
            let row = (i / cols) % rows;
            let position = Vec2::new(cell * (col as f32 + 1.0), cell * (row as f32 + 1.0));

            let angle = i as f32 * GOLDEN_ANGLE;
            let speed = launch_speed * (0.5 + 0.05 * (i % 10) as f32);
            let velocity = Vec2::new(angle.cos(), angle.sin()) * speed;

            self = if i % 3 == 2 {
                self.add_box(position, box_size, box_size, velocity)?
            } else {
                self.add_circle(position, circle_radius, velocity)?
            };
        }

        Ok(self)
    }

    /// Build the world
    pub fn build(self) -> SimulationWorld {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_world() {
        let world = WorldBuilder::new(WorldConfig::default()).unwrap().build();
        assert!(world.is_empty());
        assert_eq!(world.width(), 1200.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = WorldBuilder::new(WorldConfig::new(-1.0, 100.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_add_shapes_in_order() {
        let world = WorldBuilder::new(WorldConfig::default())
            .unwrap()
            .add_circle(Vec2::new(100.0, 100.0), 10.0, Vec2::new(5.0, 0.0))
            .unwrap()
            .add_box(Vec2::new(300.0, 100.0), 40.0, 20.0, Vec2::ZERO)
            .unwrap()
            .build();

        let objects: Vec<_> = world.iter().map(|(_, obj)| obj).collect();
        assert_eq!(objects.len(), 2);
        assert!(!objects[0].shape().is_box());
        assert_eq!(objects[0].velocity, Vec2::new(5.0, 0.0));
        assert!(objects[1].shape().is_box());
    }

    #[test]
    fn test_invalid_radius_propagates() {
        let result = WorldBuilder::new(WorldConfig::default())
            .unwrap()
            .add_circle(Vec2::new(100.0, 100.0), 0.0, Vec2::ZERO);
        assert!(result.is_err());
    }

    #[test]
    fn test_material_applies_to_later_objects() {
        let world = WorldBuilder::new(WorldConfig::default())
            .unwrap()
            .add_circle(Vec2::new(100.0, 100.0), 10.0, Vec2::ZERO)
            .unwrap()
            .with_material(PhysicsMaterial::CLAY)
            .add_circle(Vec2::new(200.0, 100.0), 10.0, Vec2::ZERO)
            .unwrap()
            .build();

        let restitutions: Vec<f32> = world.iter().map(|(_, obj)| obj.restitution()).collect();
        assert_eq!(restitutions, vec![0.8, 0.0]);
    }

    #[test]
    fn test_grid_mixes_shapes_inside_bounds() {
        let world = WorldBuilder::new(WorldConfig::default())
            .unwrap()
            .add_grid(30, 15.0, 30.0, 200.0)
            .unwrap()
            .build();

        assert_eq!(world.len(), 30);
        let boxes = world.iter().filter(|(_, obj)| obj.shape().is_box()).count();
        assert_eq!(boxes, 10);
        for (_, obj) in world.iter() {
            let aabb = obj.shape().aabb(obj.position);
            assert!(aabb.min.x >= 0.0 && aabb.min.y >= 0.0);
            assert!(aabb.max.x <= world.width() && aabb.max.y <= world.height());
            let speed = obj.velocity.length();
            assert!((100.0 - 0.01..=200.0).contains(&speed), "speed {}", speed);
        }
    }

    #[test]
    fn test_grid_beyond_capacity_is_bounded() {
        let mut config = WorldConfig::default();
        config.capacity = 8;
        let world = WorldBuilder::new(config)
            .unwrap()
            .add_grid(20, 10.0, 20.0, 100.0)
            .unwrap()
            .build();
        assert_eq!(world.len(), 8);
    }
}
