//! Collision detection and impulse resolution between moving objects
//!
//! Provides circle-circle, circle-box and box-box contact generation plus the
//! shared impulse response. Boxes are always treated as axis-aligned; their
//! cosmetic spin is nudged by collisions but never read here.

use crate::body::MovingObject;
use crate::shapes::{Aabb, Shape};
use impulse2d_math::Vec2;

/// Distances below this are treated as coincident centres
pub const CONTACT_EPSILON: f32 = 1.0e-4;

/// Contact information from a collision
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first object toward the second
    pub normal: Vec2,
    /// Penetration depth (positive means overlapping)
    pub penetration: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(normal: Vec2, penetration: f32) -> Self {
        Self {
            normal,
            penetration,
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.penetration > 0.0
    }

    /// Same contact seen from the other object
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

/// Outcome of resolving one colliding pair
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Resolution {
    pub contact: Contact,
    /// Impulse magnitude applied along the normal, `None` if already separating
    pub impulse: Option<f32>,
}

/// Test circle vs circle collision
///
/// The normal points from `a` toward `b`. Coincident centres fall back to +x.
pub fn circle_vs_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> Option<Contact> {
    let delta = center_b - center_a;
    let min_dist = radius_a + radius_b;
    let dist_sq = delta.length_squared();

    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > CONTACT_EPSILON {
        delta / dist
    } else {
        Vec2::X
    };

    Some(Contact::new(normal, min_dist - dist))
}

/// Test circle vs AABB collision
///
/// The normal points from the box toward the circle. When the circle centre
/// is inside the box the normal falls back to "up" and the penetration is deep
/// enough to push the circle out through the top face.
pub fn circle_vs_box(center: Vec2, radius: f32, aabb: &Aabb) -> Option<Contact> {
    // Find the closest point on the AABB to the circle center
    let closest = aabb.closest_point(center);
    let delta = center - closest;
    let dist_sq = delta.length_squared();

    if dist_sq >= radius * radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > CONTACT_EPSILON {
        Some(Contact::new(delta / dist, radius - dist))
    } else {
        let depth_below_top = center.y - aabb.min.y;
        Some(Contact::new(Vec2::UP, radius + depth_below_top))
    }
}

/// Test AABB vs AABB collision
///
/// Resolves along the axis of least penetration; the normal points from `a`
/// toward `b`. Centres aligned on the chosen axis fall back to the positive axis.
pub fn box_vs_box(a: &Aabb, b: &Aabb) -> Option<Contact> {
    if !a.overlaps(b) {
        return None;
    }

    let offset = b.center() - a.center();
    let combined = a.half_extents() + b.half_extents();
    let overlap_x = combined.x - offset.x.abs();
    let overlap_y = combined.y - offset.y.abs();

    if overlap_x < overlap_y {
        let normal = if offset.x < 0.0 { -Vec2::X } else { Vec2::X };
        Some(Contact::new(normal, overlap_x))
    } else {
        let normal = if offset.y < 0.0 { -Vec2::Y } else { Vec2::Y };
        Some(Contact::new(normal, overlap_y))
    }
}

/// Detect a collision between two objects (normal from `a` toward `b`)
pub fn detect(a: &MovingObject, b: &MovingObject) -> Option<Contact> {
    match (a.shape(), b.shape()) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_vs_circle(a.position, *ra, b.position, *rb)
        }
        (Shape::Circle { radius }, Shape::Box { .. }) => {
            // circle_vs_box returns normal pointing from box toward circle
            circle_vs_box(a.position, *radius, &b.shape().aabb(b.position)).map(Contact::flipped)
        }
        (Shape::Box { .. }, Shape::Circle { radius }) => {
            circle_vs_box(b.position, *radius, &a.shape().aabb(a.position))
        }
        (Shape::Box { .. }, Shape::Box { .. }) => {
            box_vs_box(&a.shape().aabb(a.position), &b.shape().aabb(b.position))
        }
    }
}

/// Separate two overlapping objects and exchange an impulse along the normal
///
/// Each object is moved by half the penetration. The impulse uses the smaller
/// restitution of the pair and is skipped when the objects already separate.
/// Returns the impulse magnitude when one was applied.
pub fn apply_impulse(a: &mut MovingObject, b: &mut MovingObject, contact: &Contact) -> Option<f32> {
    let half = contact.normal * (contact.penetration * 0.5);
    a.position -= half;
    b.position += half;

    let relative = b.velocity - a.velocity;
    let vel_along_normal = relative.dot(contact.normal);
    if vel_along_normal > 0.0 {
        return None;
    }

    let restitution = a.material().combined_restitution(b.material());
    let inv_mass_a = a.inverse_mass();
    let inv_mass_b = b.inverse_mass();
    let j = -(1.0 + restitution) * vel_along_normal / (inv_mass_a + inv_mass_b);

    let impulse = contact.normal * j;
    a.velocity -= impulse * inv_mass_a;
    b.velocity += impulse * inv_mass_b;

    Some(j)
}

/// Detect and resolve a collision between two objects
///
/// Boxes hit by a circle spin up by `angular_impulse * j`; two boxes get
/// opposite nudges. Returns `None` when the objects don't overlap.
pub fn resolve_pair(a: &mut MovingObject, b: &mut MovingObject, angular_impulse: f32) -> Option<Resolution> {
    let contact = detect(a, b)?;
    if !contact.is_colliding() {
        return None;
    }

    let impulse = apply_impulse(a, b, &contact);

    if let Some(j) = impulse {
        let spin = angular_impulse * j;
        match (a.shape().is_box(), b.shape().is_box()) {
            (true, true) => {
                a.shape_mut().nudge_spin(spin);
                b.shape_mut().nudge_spin(-spin);
            }
            (true, false) => a.shape_mut().nudge_spin(spin),
            (false, true) => b.shape_mut().nudge_spin(spin),
            (false, false) => {}
        }
    }

    Some(Resolution { contact, impulse })
}
