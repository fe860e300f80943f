//! Fixed-step simulation driver
//!
//! Turns variable frame times into a whole number of fixed physics ticks:
//! - Delta time measurement
//! - Frame time capping
//! - Accumulation of leftover time between frames

use std::time::Instant;

use impulse2d_physics::{PhysicsError, SimulationWorld};

use crate::config::PhysicsConfig;

/// Steps a `SimulationWorld` at a fixed rate regardless of frame timing
#[derive(Debug)]
pub struct SimulationSystem {
    fixed_dt: f32,
    max_frame_dt: f32,
    accumulator: f32,
    last_frame: Instant,
}

impl SimulationSystem {
    /// Create a driver stepping `fixed_dt` seconds per tick
    ///
    /// Frames longer than `max_frame_dt` are truncated so a long stall cannot
    /// queue up an unbounded number of ticks.
    pub fn new(fixed_dt: f32, max_frame_dt: f32) -> Result<Self, PhysicsError> {
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(PhysicsError::InvalidConfig(format!(
                "fixed_dt must be positive, got {}",
                fixed_dt
            )));
        }
        if !(max_frame_dt.is_finite() && max_frame_dt >= fixed_dt) {
            return Err(PhysicsError::InvalidConfig(format!(
                "max_frame_dt must be at least fixed_dt ({}), got {}",
                fixed_dt, max_frame_dt
            )));
        }
        Ok(Self {
            fixed_dt,
            max_frame_dt,
            accumulator: 0.0,
            last_frame: Instant::now(),
        })
    }

    /// Create a driver from the `physics` config section
    pub fn from_config(config: &PhysicsConfig) -> Result<Self, PhysicsError> {
        Self::new(config.fixed_dt, config.max_frame_dt)
    }

    /// Advance by the wall-clock time since the previous call
    pub fn update(&mut self, world: &mut SimulationWorld) -> u32 {
        let now = Instant::now();
        let frame_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(world, frame_dt)
    }

    /// Advance by `frame_dt` seconds, returning how many ticks were run
    pub fn advance(&mut self, world: &mut SimulationWorld, frame_dt: f32) -> u32 {
        // NaN and negative frames count as zero
        self.accumulator += frame_dt.max(0.0).min(self.max_frame_dt);

        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            world.update(self.fixed_dt);
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }
        ticks
    }

    /// Fraction of a tick left over in the accumulator, in [0, 1)
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_dt
    }

    /// Seconds simulated per tick
    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }
}
