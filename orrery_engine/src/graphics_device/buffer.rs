/// Buffer trait and buffer descriptor

use std::any::Any;
use bitflags::bitflags;

bitflags! {
    /// How a GPU buffer is bound by shaders and draws
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferUsage: u32 {
        /// Vertex input
        const VERTEX = 1 << 0;
        /// Index input
        const INDEX = 1 << 1;
        /// Read-only storage buffer in shaders
        const STORAGE_READ = 1 << 2;
    }
}

/// Descriptor for creating a buffer
#[derive(Debug, Clone)]
pub struct BufferDesc {
    /// Size in bytes
    pub size: u64,
    /// Buffer usage
    pub usage: BufferUsage,
}

/// Index element type
///
/// Meshes are indexed with 16-bit indices only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexType {
    U16,
}

/// GPU-resident buffer
///
/// Only reachable by the GPU; contents are written through a transfer
/// buffer and a copy pass. Destroyed when the last handle is dropped.
pub trait Buffer: Send + Sync {
    /// Size in bytes
    fn size(&self) -> u64;

    /// Usage the buffer was created with
    fn usage(&self) -> BufferUsage;

    /// Backend downcast hook
    fn as_any(&self) -> &dyn Any;
}
