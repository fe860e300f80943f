//! 2D Mathematics Library
//!
//! This crate provides the 2D vector type used by the impulse2d engine.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x and y components (screen space, +y down)

mod vec2;

pub use vec2::Vec2;
