/// Mesh resources: CPU-side geometry and its GPU-resident counterpart

use std::sync::Arc;
use bytemuck::{Pod, Zeroable};
use crate::graphics_device::Buffer;

/// Vertex layout consumed by the scene pipeline
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }
}

/// Geometry decoded from disk, not yet on the GPU
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

/// GPU-resident mesh
///
/// Indices are always 16-bit.
#[derive(Clone)]
pub struct Mesh {
    pub vertex_buffer: Arc<dyn Buffer>,
    pub index_buffer: Arc<dyn Buffer>,
    pub index_count: u32,
}
