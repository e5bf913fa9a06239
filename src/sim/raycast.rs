//! Ray versus box geometry for picking stove switches
//!
//! Turning a cursor position into a ray belongs to the UI layer; this module
//! only answers whether a world-space ray hits a box.

use glam::{Mat3, Vec3};

use super::collider::Collider;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// World-space AABB (centre, half size) enclosing an oriented box
pub fn world_box(collider: &Collider) -> (Vec3, Vec3) {
    let basis = Mat3::from_quat(collider.rotation);
    let abs = Mat3::from_cols(basis.x_axis.abs(), basis.y_axis.abs(), basis.z_axis.abs());
    (collider.position, abs * collider.half_extents)
}

/// Slab test. Returns the entry distance along the ray, or 0 when the origin is
/// already inside the box.
pub fn ray_box_intersect(ray: &Ray, center: Vec3, half: Vec3) -> Option<f32> {
    let min = center - half;
    let max = center + half;
    let safe = |d: f32| if d != 0.0 { d } else { 1e-30 };
    let inv = Vec3::new(1.0 / safe(ray.dir.x), 1.0 / safe(ray.dir.y), 1.0 / safe(ray.dir.z));

    let t0 = (min - ray.origin) * inv;
    let t1 = (max - ray.origin) * inv;
    let t_near = t0.min(t1).max_element();
    let t_far = t0.max(t1).min_element();

    if t_far >= t_near.max(0.0) {
        Some(t_near.max(0.0))
    } else {
        None
    }
}
