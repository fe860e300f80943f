//! Headless stress harness
//!
//! Spawns a deterministic mix of circles and boxes, runs a fixed number of
//! ticks and records how well the world held its invariants.

use std::fmt;
use std::time::{Duration, Instant};

use impulse2d_physics::{PhysicsError, Shape, SimulationWorld, WorldConfig};
use thiserror::Error;

use crate::config::HarnessConfig;
use crate::scene::WorldBuilder;

/// Slack allowed when checking that objects stay inside the walls
const BOUNDS_TOLERANCE: f32 = 1e-3;

/// Errors from setting up or running the harness
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("harness has no object counts to run")]
    NoRuns,
    #[error("fixed_dt must be positive, got {0}")]
    InvalidStep(f32),
    #[error(transparent)]
    Physics(#[from] PhysicsError),
}

/// Outcome of one harness run
#[derive(Clone, Debug, PartialEq)]
pub struct HarnessReport {
    /// Objects requested for the run
    pub requested: usize,
    /// Objects alive at the end (bounded by capacity)
    pub live: usize,
    /// World capacity during the run
    pub capacity: usize,
    pub ticks: u32,
    /// Time spent inside `update`, excluding the checks
    pub elapsed: Duration,
    /// Deepest circle-circle overlap seen after any tick (px)
    pub max_circle_overlap: f32,
    /// Object-ticks spent outside the world bounds
    pub out_of_bounds: usize,
    /// Object-ticks with a NaN or infinite position or velocity
    pub non_finite: usize,
}

impl HarnessReport {
    /// True when the run stayed finite, in bounds and within capacity
    ///
    /// Circle overlap is informational: a single resolution pass can leave
    /// stacked piles slightly interpenetrating.
    pub fn is_healthy(&self) -> bool {
        self.non_finite == 0 && self.out_of_bounds == 0 && self.live <= self.capacity
    }

    /// Simulated ticks per wall-clock second
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            f64::INFINITY
        }
    }
}

impl fmt::Display for HarnessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4} objects ({} live): {} ticks in {:.1?} ({:.0} ticks/s), max overlap {:.3}px, out of bounds {}, non-finite {}",
            self.requested,
            self.live,
            self.ticks,
            self.elapsed,
            self.ticks_per_second(),
            self.max_circle_overlap,
            self.out_of_bounds,
            self.non_finite,
        )
    }
}

/// Runs the configured stress scenarios
pub struct Harness {
    config: HarnessConfig,
    world_config: WorldConfig,
    fixed_dt: f32,
}

impl Harness {
    pub fn new(config: HarnessConfig, world_config: WorldConfig, fixed_dt: f32) -> Result<Self, HarnessError> {
        if config.object_counts.is_empty() {
            return Err(HarnessError::NoRuns);
        }
        if !(fixed_dt.is_finite() && fixed_dt > 0.0) {
            return Err(HarnessError::InvalidStep(fixed_dt));
        }
        world_config.validate()?;
        Ok(Self {
            config,
            world_config,
            fixed_dt,
        })
    }

    /// Run every configured object count in order
    pub fn run(&self) -> Result<Vec<HarnessReport>, HarnessError> {
        self.config
            .object_counts
            .iter()
            .map(|&count| self.run_one(count))
            .collect()
    }

    /// Spawn `count` objects and simulate the configured number of ticks
    pub fn run_one(&self, count: usize) -> Result<HarnessReport, HarnessError> {
        let mut world = WorldBuilder::new(self.world_config.clone())?
            .add_grid(
                count,
                self.config.circle_radius,
                self.config.box_size,
                self.config.launch_speed,
            )?
            .build();
        log::debug!("Harness run: {} objects, {} ticks", count, self.config.ticks);

        let mut report = HarnessReport {
            requested: count,
            live: world.len(),
            capacity: world.capacity(),
            ticks: self.config.ticks,
            elapsed: Duration::ZERO,
            max_circle_overlap: 0.0,
            out_of_bounds: 0,
            non_finite: 0,
        };

        for _ in 0..self.config.ticks {
            let tick_start = Instant::now();
            world.update(self.fixed_dt);
            report.elapsed += tick_start.elapsed();
            inspect(&world, &mut report);
        }
        report.live = world.len();

        if !report.is_healthy() {
            log::warn!("Unhealthy harness run: {}", report);
        }
        Ok(report)
    }
}

/// Fold one tick's invariant checks into `report`
fn inspect(world: &SimulationWorld, report: &mut HarnessReport) {
    let (width, height) = (world.width(), world.height());
    let mut circles = Vec::new();

    for (_, obj) in world.iter() {
        if !obj.is_finite() {
            report.non_finite += 1;
            continue;
        }
        let aabb = obj.shape().aabb(obj.position);
        if aabb.min.x < -BOUNDS_TOLERANCE
            || aabb.min.y < -BOUNDS_TOLERANCE
            || aabb.max.x > width + BOUNDS_TOLERANCE
            || aabb.max.y > height + BOUNDS_TOLERANCE
        {
            report.out_of_bounds += 1;
        }
        if let Shape::Circle { radius } = *obj.shape() {
            circles.push((obj.position, radius));
        }
    }

    for (i, &(pa, ra)) in circles.iter().enumerate() {
        for &(pb, rb) in &circles[i + 1..] {
            let overlap = ra + rb - pa.distance(pb);
            report.max_circle_overlap = report.max_circle_overlap.max(overlap);
        }
    }
}
