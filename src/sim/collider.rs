//! Oriented box volumes that bodies collide against

use glam::{Quat, Vec3};

use crate::flatten;

/// Non-owning handle to a collider.
///
/// Level colliders are addressed by their index in the level list; entity
/// hitboxes by the entity's index in the pursuer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColliderId {
    Level(usize),
    Entity(usize),
}

/// An oriented box given by a transform and half extents.
///
/// Only the Y and Z extents matter for collision; the X extent is the box's
/// depth into the screen and may be zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: ColliderId,
    pub position: Vec3,
    pub rotation: Quat,
    pub half_extents: Vec3,
}

impl Collider {
    pub fn new(id: ColliderId, position: Vec3, rotation: Quat, half_extents: Vec3) -> Self {
        Self {
            id,
            position,
            rotation,
            half_extents,
        }
    }

    /// Axis-aligned square hitbox around a body
    pub fn hitbox(id: ColliderId, center: Vec3, radius: f32) -> Self {
        Self::new(id, center, Quat::IDENTITY, Vec3::splat(radius))
    }

    /// World point into the box's local frame, projected onto the gameplay plane
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        flatten(self.rotation.inverse() * (flatten(point) - flatten(self.position)))
    }

    /// Local point back to world space
    pub fn to_world(&self, local: Vec3) -> Vec3 {
        self.rotation * local + flatten(self.position)
    }

    /// Closest point of the box (local frame) to a local point
    pub fn clamp_local(&self, local: Vec3) -> Vec3 {
        Vec3::new(
            0.0,
            local.y.clamp(-self.half_extents.y, self.half_extents.y),
            local.z.clamp(-self.half_extents.z, self.half_extents.z),
        )
    }
}
