//! Surface and drag properties of a moving object

/// Physical material properties for collision response and drag
///
/// `restitution` is the bounciness used in object-object impulses (the pair
/// uses the smaller of the two values). `friction` is the fraction of velocity
/// kept each tick to model air resistance: 1.0 means no drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsMaterial {
    restitution: f32,
    friction: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            restitution: 0.8,
            friction: 0.99,
        }
    }
}

impl PhysicsMaterial {
    /// Rubber-like material: very bouncy, normal drag
    pub const RUBBER: Self = Self {
        restitution: 0.9,
        friction: 0.99,
    };

    /// Wood-like material: low bounce, a little more drag
    pub const WOOD: Self = Self {
        restitution: 0.4,
        friction: 0.985,
    };

    /// Metal-like material: moderate bounce, heavy objects barely slow down
    pub const METAL: Self = Self {
        restitution: 0.3,
        friction: 0.995,
    };

    /// Clay-like material: no bounce at all
    pub const CLAY: Self = Self {
        restitution: 0.0,
        friction: 0.98,
    };

    /// Perfectly elastic material with no drag (useful for tests)
    pub const ELASTIC: Self = Self {
        restitution: 1.0,
        friction: 1.0,
    };

    /// Create a new material
    ///
    /// Values are clamped to the range [0.0, 1.0]; NaN becomes 0.0.
    pub fn new(restitution: f32, friction: f32) -> Self {
        Self {
            restitution: clamp_unit(restitution),
            friction: clamp_unit(friction),
        }
    }

    /// Coefficient of restitution in [0, 1]
    #[inline]
    pub fn restitution(&self) -> f32 {
        self.restitution
    }

    /// Per-tick velocity retention factor in [0, 1]
    #[inline]
    pub fn friction(&self) -> f32 {
        self.friction
    }

    /// Restitution used when two materials collide (the less bouncy wins)
    pub fn combined_restitution(&self, other: &Self) -> f32 {
        self.restitution.min(other.restitution)
    }
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
