/// Per-frame instance transforms and their GPU copy.
///
/// The CPU side is rebuilt every frame in draw order. The GPU side is one
/// persistent storage buffer fed through one persistent transfer buffer,
/// both sized for the full capacity. Each upload maps the transfer buffer
/// with cycling enabled, so the backend may hand out fresh memory while the
/// previous frame's copy is still in flight.

use std::sync::Arc;
use glam::Mat4;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, BufferUsage, CommandList, GraphicsDevice, TransferBuffer,
    TransferBufferDesc,
};

/// Bytes per instance on the GPU (one column-major 4x4 f32 matrix)
pub const INSTANCE_STRIDE: u64 = std::mem::size_of::<Mat4>() as u64;

pub struct InstanceBuffer {
    transforms: Vec<Mat4>,
    capacity: usize,
    storage: Arc<dyn Buffer>,
    transfer: Arc<dyn TransferBuffer>,
}

impl InstanceBuffer {
    /// Allocate CPU and GPU storage for `capacity` instances
    ///
    /// # Errors
    ///
    /// `Error::OutOfMemory` if the CPU array cannot be reserved, or the
    /// device error if either GPU buffer cannot be created.
    pub fn new(device: &mut dyn GraphicsDevice, capacity: usize) -> Result<Self> {
        let mut transforms = Vec::new();
        transforms.try_reserve_exact(capacity)?;

        let size = capacity as u64 * INSTANCE_STRIDE;
        let storage = device.create_buffer(BufferDesc {
            size,
            usage: BufferUsage::STORAGE_READ,
        })?;
        let transfer = device.create_transfer_buffer(TransferBufferDesc { size })?;

        Ok(Self { transforms, capacity, storage, transfer })
    }

    /// Forget last frame's instances
    pub fn clear(&mut self) {
        self.transforms.clear();
    }

    /// Append one instance transform
    ///
    /// Returns `false`, leaving the buffer unchanged, once it is full.
    pub fn push(&mut self, transform: Mat4) -> bool {
        if self.transforms.len() >= self.capacity {
            return false;
        }
        self.transforms.push(transform);
        true
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.transforms.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Transforms pushed since the last `clear`
    pub fn as_slice(&self) -> &[Mat4] {
        &self.transforms
    }

    /// GPU storage buffer the vertex stage reads instances from
    pub fn storage(&self) -> &Arc<dyn Buffer> {
        &self.storage
    }

    pub fn transfer(&self) -> &Arc<dyn TransferBuffer> {
        &self.transfer
    }

    /// Stage the current transforms and record their copy into `cmd`
    ///
    /// Only the instances pushed this frame are copied. Nothing is
    /// recorded when there are none. `cmd` must be recording and outside
    /// any pass. Returns the number of bytes recorded for upload.
    pub fn record_upload(&self, cmd: &mut dyn CommandList) -> Result<u64> {
        if self.transforms.is_empty() {
            return Ok(0);
        }
        let bytes: &[u8] = bytemuck::cast_slice(&self.transforms);
        let size = bytes.len() as u64;

        self.transfer.map(true)?;
        let written = self.transfer.write(0, bytes);
        self.transfer.unmap()?;
        written?;

        cmd.begin_copy_pass()?;
        cmd.upload_to_buffer(&self.transfer, 0, &self.storage, 0, size, true)?;
        cmd.end_copy_pass()?;
        Ok(size)
    }
}

#[cfg(test)]
#[path = "instance_buffer_tests.rs"]
mod tests;
