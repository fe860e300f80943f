//! 2D Physics simulation for impulse2d
//!
//! This crate provides a deterministic, fixed-step 2D physics engine, including:
//! - Moving objects with force accumulation, drag and fading trails
//! - Circle and axis-aligned box shapes
//! - Impulse-based collision resolution for every shape pair
//! - World boundaries with wall bounces and floor settling
//! - A capacity-bounded object registry with FIFO eviction

pub mod body;
pub mod boundary;
pub mod collision;
pub mod error;
pub mod material;
pub mod shapes;
pub mod trail;
pub mod world;

// Re-export commonly used types
pub use body::{MovingObject, ObjectKey, BOX_ANGULAR_FRICTION, MIN_MASS};
pub use boundary::{Bounds, WallContacts, BOX_WALL_SPIN_DAMPING};
pub use collision::{box_vs_box, circle_vs_box, circle_vs_circle, detect, resolve_pair, Contact, Resolution};
pub use error::PhysicsError;
pub use material::PhysicsMaterial;
pub use shapes::{Aabb, Shape};
pub use trail::{Trail, TrailSample};
pub use world::{
    SimulationWorld, WorldConfig, DEFAULT_ANGULAR_IMPULSE, DEFAULT_CAPACITY, DEFAULT_GRAVITY,
    DEFAULT_SETTLE_THRESHOLD, DEFAULT_WALL_RESTITUTION,
};
