//! World construction utilities
//!
//! This module provides a fluent API for populating simulation worlds.

mod world_builder;

pub use world_builder::WorldBuilder;
