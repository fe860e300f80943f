//! Simulation world and per-tick orchestration

use std::collections::VecDeque;

use crate::body::{MovingObject, ObjectKey};
use crate::boundary::Bounds;
use crate::collision::resolve_pair;
use crate::error::{ensure_positive, PhysicsError};
use impulse2d_math::Vec2;
use slotmap::SlotMap;

/// Default maximum number of live objects
pub const DEFAULT_CAPACITY: usize = 100;
/// Default gravity (px/s², pointing down the screen)
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, 980.0);
/// Default fraction of normal speed kept after a wall bounce
pub const DEFAULT_WALL_RESTITUTION: f32 = 0.7;
/// Default speed (px/s) below which a floor bounce comes to rest
pub const DEFAULT_SETTLE_THRESHOLD: f32 = 50.0;
/// Default spin (rad/s) added to a box per unit of collision impulse
pub const DEFAULT_ANGULAR_IMPULSE: f32 = 0.01;

/// Configuration for the simulation world
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    /// World width in px
    pub width: f32,
    /// World height in px (the floor sits at `y = height`)
    pub height: f32,
    /// Gravity acceleration applied as `gravity * mass`
    pub gravity: Vec2,
    /// Whether gravity is currently applied
    pub gravity_enabled: bool,
    /// Fraction of normal speed kept after a wall bounce, in [0, 1]
    pub wall_restitution: f32,
    /// Floor bounces slower than this come to rest
    pub settle_threshold: f32,
    /// Spin added to boxes per unit of collision impulse
    pub angular_impulse: f32,
    /// Maximum number of objects; the oldest is evicted beyond this
    pub capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1000.0,
            gravity: DEFAULT_GRAVITY,
            gravity_enabled: true,
            wall_restitution: DEFAULT_WALL_RESTITUTION,
            settle_threshold: DEFAULT_SETTLE_THRESHOLD,
            angular_impulse: DEFAULT_ANGULAR_IMPULSE,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl WorldConfig {
    /// Create a config for a world of the given size with default physics
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check every value is in range
    pub fn validate(&self) -> Result<(), PhysicsError> {
        ensure_positive("world width", self.width)?;
        ensure_positive("world height", self.height)?;
        if !self.gravity.is_finite() {
            return Err(PhysicsError::NonFinite {
                what: "gravity",
                x: self.gravity.x,
                y: self.gravity.y,
            });
        }
        if !(0.0..=1.0).contains(&self.wall_restitution) {
            return Err(PhysicsError::InvalidConfig(format!(
                "wall restitution {} outside [0, 1]",
                self.wall_restitution
            )));
        }
        if !(self.settle_threshold.is_finite() && self.settle_threshold >= 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "settle threshold {} must be finite and non-negative",
                self.settle_threshold
            )));
        }
        if !self.angular_impulse.is_finite() {
            return Err(PhysicsError::InvalidConfig(format!(
                "angular impulse {} must be finite",
                self.angular_impulse
            )));
        }
        if self.capacity == 0 {
            return Err(PhysicsError::InvalidConfig(
                "capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            width: self.width,
            height: self.height,
            wall_restitution: self.wall_restitution,
            settle_threshold: self.settle_threshold,
        }
    }
}

/// The simulation world owning every moving object
///
/// Objects are kept in insertion order; that order drives pair iteration so
/// every tick is deterministic.
pub struct SimulationWorld {
    /// Object storage (using generational keys)
    objects: SlotMap<ObjectKey, MovingObject>,
    /// Insertion order, oldest first
    order: VecDeque<ObjectKey>,
    config: WorldConfig,
}

impl SimulationWorld {
    /// Create a new world with default configuration
    pub fn new() -> Self {
        Self::from_valid_config(WorldConfig::default())
    }

    /// Create a new world with a custom configuration
    pub fn with_config(config: WorldConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: WorldConfig) -> Self {
        Self {
            objects: SlotMap::with_capacity_and_key(config.capacity),
            order: VecDeque::with_capacity(config.capacity),
            config,
        }
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Add an object, evicting the oldest ones first if the world is full
    pub fn add(&mut self, object: MovingObject) -> ObjectKey {
        while self.order.len() >= self.config.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.objects.remove(oldest);
                log::debug!("World at capacity {}; evicted oldest object", self.config.capacity);
            }
        }
        let key = self.objects.insert(object);
        self.order.push_back(key);
        key
    }

    /// Remove an object and return it
    pub fn remove(&mut self, key: ObjectKey) -> Option<MovingObject> {
        let object = self.objects.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(object)
    }

    /// Remove every object
    pub fn clear(&mut self) {
        log::debug!("Clearing {} objects", self.objects.len());
        self.objects.clear();
        self.order.clear();
    }

    /// Get an immutable reference to an object by key
    pub fn get(&self, key: ObjectKey) -> Option<&MovingObject> {
        self.objects.get(key)
    }

    /// Get a mutable reference to an object by key
    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut MovingObject> {
        self.objects.get_mut(key)
    }

    /// Iterate over objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (ObjectKey, &MovingObject)> + '_ {
        self.order.iter().map(move |&key| (key, &self.objects[key]))
    }

    /// Iterate over object keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = ObjectKey> + '_ {
        self.order.iter().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.config.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.config.height
    }

    pub fn set_gravity_enabled(&mut self, enabled: bool) {
        self.config.gravity_enabled = enabled;
    }

    pub fn gravity_enabled(&self) -> bool {
        self.config.gravity_enabled
    }

    /// Change the world size (e.g. after the host window is resized)
    ///
    /// Objects are pulled back inside on the next tick.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), PhysicsError> {
        self.config.width = ensure_positive("world width", width)?;
        self.config.height = ensure_positive("world height", height)?;
        Ok(())
    }

    /// Grab or release an object; returns false if the key is stale
    pub fn set_grabbed(&mut self, key: ObjectKey, grabbed: bool) -> bool {
        match self.objects.get_mut(key) {
            Some(object) => {
                if grabbed {
                    object.grab();
                } else {
                    object.release();
                }
                true
            }
            None => false,
        }
    }

    /// Find the most recently added object containing the point
    pub fn pick_object_at_point(&self, x: f32, y: f32) -> Option<ObjectKey> {
        let point = Vec2::new(x, y);
        self.order
            .iter()
            .rev()
            .copied()
            .find(|&key| self.objects[key].contains_point(point))
    }

    /// Step the simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Gravity on every non-grabbed object (if enabled)
    /// 2. Per-object integration
    /// 3. Pairwise collision detection and resolution
    /// 4. World boundary enforcement
    pub fn update(&mut self, dt: f32) {
        // Phase 1: Apply gravity
        if self.config.gravity_enabled {
            let gravity = self.config.gravity;
            for object in self.objects.values_mut() {
                if !object.is_grabbed() {
                    let weight = gravity * object.mass();
                    object.apply_force(weight);
                }
            }
        }

        // Phase 2: Integrate
        for object in self.objects.values_mut() {
            object.update(dt);
        }

        // Phase 3: Resolve object-object collisions
        let collisions = self.resolve_collisions();

        // Phase 4: Keep everything inside the world
        let bounds = self.config.bounds();
        for object in self.objects.values_mut() {
            if !object.is_grabbed() {
                bounds.enforce(object);
            }
        }

        log::trace!("Tick dt={:.4}: {} objects, {} collisions", dt, self.order.len(), collisions);
    }

    /// Resolve every unordered pair once, in insertion order
    fn resolve_collisions(&mut self) -> usize {
        let angular_impulse = self.config.angular_impulse;
        let count = self.order.len();
        let mut collisions = 0;

        for i in 0..count {
            for j in (i + 1)..count {
                let keys = [self.order[i], self.order[j]];
                let Some([a, b]) = self.objects.get_disjoint_mut(keys) else {
                    continue;
                };

                // Held objects are exempt from collisions
                if a.is_grabbed() || b.is_grabbed() {
                    continue;
                }

                if resolve_pair(a, b, angular_impulse).is_some() {
                    collisions += 1;
                }
            }
        }

        collisions
    }
}

impl Default for SimulationWorld {
    fn default() -> Self {
        Self::new()
    }
}
