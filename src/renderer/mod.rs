//! Renderer collaborator interface
//!
//! The simulation never draws. Each frame it rewrites the contents of one
//! vertex buffer per deformable entity; whoever owns the GPU decides when and
//! how to draw them.

pub mod gpu;
pub mod vertex;

pub use gpu::GpuMeshBuffers;

use crate::sim::MeshVertex;

/// Opaque handle to a vertex buffer owned by a [`MeshSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

/// Receives per-entity vertex data
pub trait MeshSink {
    /// Allocate a buffer sized for `vertices` and fill it
    fn create_mesh(&mut self, vertices: &[MeshVertex]) -> MeshHandle;
    /// Replace the whole contents of an existing buffer
    fn write_vertices(&mut self, handle: MeshHandle, vertices: &[MeshVertex]);
}

/// CPU-side sink for headless runs and tests; keeps the last upload per handle
#[derive(Debug, Default)]
pub struct HeadlessSink {
    meshes: Vec<Vec<MeshVertex>>,
    /// Total `write_vertices` calls
    pub writes: usize,
}

impl HeadlessSink {
    pub fn vertices(&self, handle: MeshHandle) -> Option<&[MeshVertex]> {
        self.meshes.get(handle.0 as usize).map(Vec::as_slice)
    }
}

impl MeshSink for HeadlessSink {
    fn create_mesh(&mut self, vertices: &[MeshVertex]) -> MeshHandle {
        self.meshes.push(vertices.to_vec());
        MeshHandle(self.meshes.len() as u32 - 1)
    }

    fn write_vertices(&mut self, handle: MeshHandle, vertices: &[MeshVertex]) {
        if let Some(mesh) = self.meshes.get_mut(handle.0 as usize) {
            mesh.clear();
            mesh.extend_from_slice(vertices);
            self.writes += 1;
        } else {
            log::warn!("write to unknown mesh {:?}", handle);
        }
    }
}
