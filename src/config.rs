//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`IMP2D_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use impulse2d_math::Vec2;
use serde::{Serialize, Deserialize};
use std::path::Path;
use thiserror::Error;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// World size and boundary behaviour
    #[serde(default)]
    pub world: WorldConfig,
    /// Gravity and stepping
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Headless stress run
    #[serde(default)]
    pub harness: HarnessConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`IMP2D_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Optional local overrides
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // IMP2D_WORLD__CAPACITY=50 -> world.capacity = 50
        figment = figment.merge(Env::prefixed("IMP2D_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }

    /// Build the engine's world configuration from the `world` and `physics` sections
    pub fn to_world_config(&self) -> impulse2d_physics::WorldConfig {
        impulse2d_physics::WorldConfig {
            width: self.world.width,
            height: self.world.height,
            gravity: Vec2::from(self.physics.gravity),
            gravity_enabled: self.physics.gravity_enabled,
            wall_restitution: self.world.wall_restitution,
            settle_threshold: self.world.settle_threshold,
            angular_impulse: self.world.angular_impulse,
            capacity: self.world.capacity,
        }
    }
}

/// World configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// World width in px
    pub width: f32,
    /// World height in px
    pub height: f32,
    /// Maximum live objects before the oldest is evicted
    pub capacity: usize,
    /// Fraction of speed kept after a wall bounce
    pub wall_restitution: f32,
    /// Floor bounces slower than this (px/s) come to rest
    pub settle_threshold: f32,
    /// Box spin added per unit of collision impulse
    pub angular_impulse: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        let engine = impulse2d_physics::WorldConfig::default();
        Self {
            width: engine.width,
            height: engine.height,
            capacity: engine.capacity,
            wall_restitution: engine.wall_restitution,
            settle_threshold: engine.settle_threshold,
            angular_impulse: engine.angular_impulse,
        }
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity [x, y] in px/s² (positive y = downward)
    pub gravity: [f32; 2],
    /// Apply gravity at startup
    pub gravity_enabled: bool,
    /// Fixed simulation step in seconds
    pub fixed_dt: f32,
    /// Longest frame the fixed-step driver will catch up on
    pub max_frame_dt: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: impulse2d_physics::DEFAULT_GRAVITY.into(),
            gravity_enabled: true,
            fixed_dt: 1.0 / 60.0,
            max_frame_dt: 0.25,
        }
    }
}

/// Headless harness configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// One run per entry, each spawning this many objects
    pub object_counts: Vec<usize>,
    /// Fixed ticks simulated per run
    pub ticks: u32,
    /// Radius of spawned circles
    pub circle_radius: f32,
    /// Side length of spawned boxes
    pub box_size: f32,
    /// Peak launch speed of spawned objects (px/s)
    pub launch_speed: f32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            object_counts: vec![10, 50, 100, 150],
            ticks: 600,
            circle_radius: 15.0,
            box_size: 30.0,
            launch_speed: 240.0,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}
