//! Procedural melt deformation of the player mesh
//!
//! Every frame the displayed vertices are rebuilt from the untouched source
//! mesh, never from the previous frame, so the output depends only on the
//! source, the accumulated spin, the melt level and the ripple phase.

use std::f32::consts::TAU;
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Quat, Vec3, Vec4};

use crate::error::LevelError;
use crate::tuning::DeformTuning;

/// Vertex layout shared with the renderer: position, normal, RGBA8, uv
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [u8; 4],
    pub tex_coord: [f32; 2],
}

const _: () = assert!(std::mem::size_of::<MeshVertex>() == 4 * 3 + 4 * 3 + 4 + 4 * 2);

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, color: [u8; 4], tex_coord: [f32; 2]) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            color,
            tex_coord,
        }
    }
}

/// How far the melt has progressed, derived from the melt level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeltShape {
    /// 1 when solid, shrinks toward 0.5 at full melt; scales unmelted heights
    pub squash: f32,
    /// Fraction of the mesh height (from the bottom) that has pooled
    pub melt_factor: f32,
    /// Sideways spread of pooled vertices
    pub flow: f32,
}

impl MeltShape {
    pub fn new(level: f32, max: f32, spread: f32) -> Self {
        let squash = (0.5 + (max - level) / max).clamp(0.0, 1.0);
        let melt_factor = 1.0 - squash;
        Self {
            squash,
            melt_factor,
            flow: 1.0 + melt_factor * spread,
        }
    }
}

/// Rebuild `out` from `source`. Pure: identical inputs give identical output.
pub fn deform(
    source: &[MeshVertex],
    bounds_z: (f32, f32),
    orientation: Quat,
    shape: MeltShape,
    ripple_phase: f32,
    tuning: &DeformTuning,
    out: &mut Vec<MeshVertex>,
) {
    let (base, top) = bounds_z;
    let height = (top - base).max(f32::EPSILON);
    let molten = Vec4::from_array(tuning.molten_color.map(f32::from));
    let blend = shape.melt_factor * shape.melt_factor;

    out.clear();
    out.extend(source.iter().map(|vertex| {
        let pos = orientation * Vec3::from_array(vertex.position);
        let height_fraction = (pos.z - base) / height;

        let (position, color) = if height_fraction < shape.melt_factor {
            let spread = 1.0 + shape.flow;
            let original = Vec4::from_array(vertex.color.map(f32::from));
            let mixed = original.lerp(molten, blend).round();
            (
                Vec3::new(pos.x * spread, pos.y * spread, base + tuning.base_lift),
                mixed.to_array().map(|c| c as u8),
            )
        } else {
            let z = (pos.z - base) * shape.squash + base + tuning.base_lift;
            (Vec3::new(pos.x, pos.y, z), vertex.color)
        };

        MeshVertex {
            position: position.to_array(),
            normal: ripple_normal(pos, ripple_phase, tuning).to_array(),
            color,
            tex_coord: vertex.tex_coord,
        }
    }));
}

/// Normal of the surface `h(r) = amplitude * sin((r * freq + phase) * TAU)`
fn ripple_normal(pos: Vec3, phase: f32, tuning: &DeformTuning) -> Vec3 {
    let r = pos.x.hypot(pos.y) + 0.01;
    let arg = (r * tuning.ripple_frequency + phase) * TAU;
    let dh_dr = tuning.ripple_frequency * TAU * arg.cos();

    let dp_dx = Vec3::new(1.0, 0.0, dh_dr * (pos.x / r) * tuning.ripple_amplitude);
    let dp_dy = Vec3::new(0.0, 1.0, dh_dr * (pos.y / r) * tuning.ripple_amplitude);
    dp_dx.cross(dp_dy).normalize()
}

/// A mesh whose displayed vertices are regenerated from an immutable source
#[derive(Debug, Clone)]
pub struct DeformableMesh {
    source: Arc<[MeshVertex]>,
    working: Vec<MeshVertex>,
    /// Cumulative visual spin, independent of the collision body
    orientation: Quat,
    /// Source bounds along Z
    bounds_z: (f32, f32),
    /// Ripple animation phase in [0, 1)
    ripple_phase: f32,
}

impl DeformableMesh {
    pub fn new(source: Arc<[MeshVertex]>) -> Result<Self, LevelError> {
        if source.is_empty() {
            return Err(LevelError::EmptyMesh);
        }
        let bounds_z = source.iter().fold((f32::MAX, f32::MIN), |(lo, hi), v| {
            (lo.min(v.position[2]), hi.max(v.position[2]))
        });
        Ok(Self {
            working: source.to_vec(),
            source,
            orientation: Quat::IDENTITY,
            bounds_z,
            ripple_phase: 0.0,
        })
    }

    /// Vertices to hand to the renderer
    pub fn vertices(&self) -> &[MeshVertex] {
        &self.working
    }

    pub fn source(&self) -> &[MeshVertex] {
        &self.source
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn ripple_phase(&self) -> f32 {
        self.ripple_phase
    }

    pub fn bounds_z(&self) -> (f32, f32) {
        self.bounds_z
    }

    /// Roll the mesh about the depth axis
    pub fn spin(&mut self, angle: f32) {
        self.orientation = (self.orientation * Quat::from_rotation_x(angle)).normalize();
    }

    /// Advance the ripple phase, wrapping at one full cycle
    pub fn advance_ripple(&mut self, elapsed: f32, period: f32) {
        if period > 0.0 {
            self.ripple_phase += elapsed / period;
            self.ripple_phase -= self.ripple_phase.floor();
        }
    }

    /// Rebuild the displayed vertices for a melt level in `[0, max]`
    pub fn regenerate(&mut self, melt_level: f32, melt_max: f32, tuning: &DeformTuning) {
        let shape = MeltShape::new(melt_level, melt_max, tuning.spread);
        deform(
            &self.source,
            self.bounds_z,
            self.orientation,
            shape,
            self.ripple_phase,
            tuning,
            &mut self.working,
        );
    }

    /// Back to the loaded pose
    pub fn reset(&mut self) {
        self.orientation = Quat::IDENTITY;
        self.ripple_phase = 0.0;
        self.working.clear();
        self.working.extend_from_slice(&self.source);
    }
}
