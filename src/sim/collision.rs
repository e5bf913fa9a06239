//! Collision detection and response between a body and a box
//!
//! Bodies are circles in the YZ plane, colliders are oriented boxes. The test is
//! done in the box's local frame: clamp the circle centre onto the box, measure
//! the distance, and push out along the separating normal.

use glam::Vec3;

use super::body::Body;
use super::collider::Collider;
use crate::consts::{CONTACT_EPSILON, GROUND_NORMAL_MIN_Z};
use crate::{UP, flatten};

/// Resolved pushes stop this far short of the surface so a resting body keeps
/// touching its platform from frame to frame.
pub const CONTACT_SLOP: f32 = 1e-4;

/// Result of a circle/box overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Closest point on the box (world space, gameplay plane)
    pub point: Vec3,
    /// Unit normal pointing from the box toward the body centre
    pub normal: Vec3,
    /// Distance from the body centre to `point`
    pub distance: f32,
    /// `radius - distance`; zero when exactly touching
    pub penetration: f32,
}

/// Distance from `center` to the closest point of `collider`
pub fn distance_to(center: Vec3, collider: &Collider) -> f32 {
    let local = collider.to_local(center);
    (local - collider.clamp_local(local)).length()
}

/// Overlap test between a circle and a box; `None` when apart
pub fn probe(center: Vec3, radius: f32, collider: &Collider) -> Option<Contact> {
    let local = collider.to_local(center);
    let closest = collider.clamp_local(local);
    let offset = local - closest;
    let distance = offset.length();

    if distance > radius {
        return None;
    }

    let normal = if distance > CONTACT_EPSILON {
        flatten(collider.rotation * (offset / distance)).normalize_or(UP)
    } else {
        // Centre sits on or inside the box: push away from the box centre
        let from_center = flatten(center) - flatten(collider.position);
        if from_center.length() > CONTACT_EPSILON {
            from_center.normalize()
        } else {
            UP
        }
    };

    Some(Contact {
        point: collider.to_world(closest),
        normal,
        distance,
        penetration: radius - distance,
    })
}

/// Test a body against a collider and, for solid colliders, separate them.
///
/// Returns whether the two intersect. Triggers never move the body. Solid
/// contacts push the body out of the box, cancel velocity heading into the
/// surface (and the depth component), and update `standing_platform`.
pub fn resolve(body: &mut Body, collider: &Collider, is_trigger: bool) -> bool {
    let Some(contact) = probe(body.position, body.radius, collider) else {
        return false;
    };

    if is_trigger {
        return true;
    }

    if contact.penetration > 0.0 {
        let push = (contact.penetration - CONTACT_SLOP).max(0.0);
        body.position += contact.normal * push;

        let into_surface = body.velocity.dot(contact.normal);
        if into_surface < 0.0 {
            body.velocity -= into_surface * contact.normal;
            body.velocity.x = 0.0;
        }
    }

    if contact.normal.z > GROUND_NORMAL_MIN_Z {
        body.standing_platform = Some(collider.id);
        body.jumping = false;
    } else if body.standing_platform == Some(collider.id) {
        body.standing_platform = None;
    }

    true
}
