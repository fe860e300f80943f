//! Fading motion trail
//!
//! Purely a rendering aid: the trail never affects physics.

use std::collections::VecDeque;

use impulse2d_math::Vec2;

/// Maximum number of samples kept per object
pub const TRAIL_MAX_LEN: usize = 20;
/// Minimum speed (px/s) before a new sample is recorded
pub const TRAIL_MIN_SPEED: f32 = 10.0;
/// Opacity multiplier applied to every sample each tick
pub const TRAIL_FADE: f32 = 0.92;
/// Samples below this opacity are dropped
pub const TRAIL_MIN_OPACITY: f32 = 0.05;

/// A single faded position sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailSample {
    pub position: Vec2,
    pub opacity: f32,
}

/// Bounded sequence of position samples, oldest first
#[derive(Clone, Debug)]
pub struct Trail {
    samples: VecDeque<TrailSample>,
    max_len: usize,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new(TRAIL_MAX_LEN)
    }
}

impl Trail {
    /// Create an empty trail holding at most `max_len` samples
    pub fn new(max_len: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(max_len),
            max_len,
        }
    }

    /// Per-tick bookkeeping
    ///
    /// Fades and prunes existing samples, then records `position` if `speed`
    /// exceeds [`TRAIL_MIN_SPEED`].
    pub fn record(&mut self, position: Vec2, speed: f32) {
        for sample in self.samples.iter_mut() {
            sample.opacity *= TRAIL_FADE;
        }
        self.samples.retain(|s| s.opacity >= TRAIL_MIN_OPACITY);

        if speed > TRAIL_MIN_SPEED && self.max_len > 0 {
            if self.samples.len() == self.max_len {
                self.samples.pop_front();
            }
            self.samples.push_back(TrailSample {
                position,
                opacity: 1.0,
            });
        }
    }

    /// Iterate samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &TrailSample> + '_ {
        self.samples.iter()
    }

    /// Most recently recorded sample
    pub fn latest(&self) -> Option<&TrailSample> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
