//! impulse2d - deterministic 2D impulse physics
//!
//! The engine itself lives in `impulse2d_physics`; this crate adds the host
//! side: layered configuration, a world builder, a fixed-step driver and a
//! headless stress harness.

pub mod config;
pub mod scene;
pub mod systems;

pub use impulse2d_math::Vec2;
pub use impulse2d_physics as physics;
