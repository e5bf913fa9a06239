//! wgpu-backed mesh buffers

use wgpu::util::DeviceExt;

use super::{MeshHandle, MeshSink};
use crate::sim::MeshVertex;

/// One vertex buffer per registered mesh, rewritten in place every frame
pub struct GpuMeshBuffers {
    device: wgpu::Device,
    queue: wgpu::Queue,
    buffers: Vec<(wgpu::Buffer, u32)>,
}

impl GpuMeshBuffers {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue) -> Self {
        Self {
            device,
            queue,
            buffers: Vec::new(),
        }
    }

    /// Buffer and vertex count to bind for a draw
    pub fn buffer(&self, handle: MeshHandle) -> Option<(&wgpu::Buffer, u32)> {
        self.buffers
            .get(handle.0 as usize)
            .map(|(buffer, count)| (buffer, *count))
    }

    fn upload(&self, vertices: &[MeshVertex]) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("deformable_mesh"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            })
    }
}

impl MeshSink for GpuMeshBuffers {
    fn create_mesh(&mut self, vertices: &[MeshVertex]) -> MeshHandle {
        let buffer = self.upload(vertices);
        self.buffers.push((buffer, vertices.len() as u32));
        MeshHandle(self.buffers.len() as u32 - 1)
    }

    fn write_vertices(&mut self, handle: MeshHandle, vertices: &[MeshVertex]) {
        let bytes: &[u8] = bytemuck::cast_slice(vertices);
        let index = handle.0 as usize;
        if index >= self.buffers.len() {
            log::warn!("write to unknown mesh {:?}", handle);
            return;
        }

        // Vertex count never changes for a deformed mesh, but recreate if it does
        if bytes.len() as u64 > self.buffers[index].0.size() {
            let buffer = self.upload(vertices);
            self.buffers[index] = (buffer, vertices.len() as u32);
            return;
        }
        self.queue.write_buffer(&self.buffers[index].0, 0, bytes);
        self.buffers[index].1 = vertices.len() as u32;
    }
}
