//! World boundary enforcement
//!
//! Keeps every object's extent inside `[0, width] x [0, height]` and bounces
//! it off the walls. The floor is the `y = height` edge (screen space, +y down).

use bitflags::bitflags;

use crate::body::MovingObject;

/// Retention factor applied to a box's spin when it flips on a wall
pub const BOX_WALL_SPIN_DAMPING: f32 = 0.8;

bitflags! {
    /// Walls an object touched during one boundary pass
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct WallContacts: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const FLOOR = 1 << 3;
    }
}

/// Parameters for one boundary pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    /// Fraction of the normal speed kept after a wall bounce
    pub wall_restitution: f32,
    /// Floor bounces slower than this (px/s) come to rest
    pub settle_threshold: f32,
}

impl Bounds {
    /// Clamp `object` inside the bounds and bounce it off any wall it crossed
    ///
    /// Velocity is only reflected when it points into the wall. An object
    /// larger than the world on an axis is centred on that axis and stopped.
    pub fn enforce(&self, object: &mut MovingObject) -> WallContacts {
        let half = object.shape().half_extents();
        let mut contacts = WallContacts::empty();

        // Horizontal
        if half.x * 2.0 >= self.width {
            object.position.x = self.width * 0.5;
            object.velocity.x = 0.0;
            contacts |= WallContacts::LEFT | WallContacts::RIGHT;
        } else if object.position.x - half.x < 0.0 {
            object.position.x = half.x;
            if object.velocity.x < 0.0 {
                object.velocity.x = -object.velocity.x * self.wall_restitution;
            }
            contacts |= WallContacts::LEFT;
        } else if object.position.x + half.x > self.width {
            object.position.x = self.width - half.x;
            if object.velocity.x > 0.0 {
                object.velocity.x = -object.velocity.x * self.wall_restitution;
            }
            contacts |= WallContacts::RIGHT;
        }

        // Vertical
        if half.y * 2.0 >= self.height {
            object.position.y = self.height * 0.5;
            object.velocity.y = 0.0;
            contacts |= WallContacts::TOP | WallContacts::FLOOR;
        } else if object.position.y - half.y < 0.0 {
            object.position.y = half.y;
            if object.velocity.y < 0.0 {
                object.velocity.y = -object.velocity.y * self.wall_restitution;
            }
            contacts |= WallContacts::TOP;
        } else if object.position.y + half.y > self.height {
            object.position.y = self.height - half.y;
            if object.velocity.y > 0.0 {
                object.velocity.y = -object.velocity.y * self.wall_restitution;
            }
            if object.velocity.y.abs() < self.settle_threshold {
                object.velocity.y = 0.0;
            }
            contacts |= WallContacts::FLOOR;
        }

        if !contacts.is_empty() {
            let shape = object.shape_mut();
            if shape.is_box() {
                let spin = shape.angular_velocity();
                shape.set_spin(-spin * BOX_WALL_SPIN_DAMPING);
            }
        }

        contacts
    }
}
