/// One-shot uploads of static resource data (vertices, indices, textures).
///
/// Each payload gets its own transfer buffer: map, copy, unmap, then a
/// copy command recorded inside the batch's copy pass. The batch is
/// submitted as its own command list.

use std::sync::Arc;
use crate::engine_trace;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, CommandList, GraphicsDevice, Texture, TransferBuffer, TransferBufferDesc,
};

/// A copy pass being recorded
///
/// # Example
///
/// ```ignore
/// let mut upload = Uploader::begin(device)?;
/// upload.buffer(device, &vertex_buffer, bytemuck::cast_slice(&vertices))?;
/// upload.buffer(device, &index_buffer, bytemuck::cast_slice(&indices))?;
/// upload.submit(device)?;
/// ```
pub struct Uploader {
    cmd: Box<dyn CommandList>,
    copies: usize,
    bytes: u64,
}

impl Uploader {
    /// Acquire a command list and open its copy pass
    pub fn begin(device: &mut dyn GraphicsDevice) -> Result<Self> {
        let mut cmd = device.create_command_list()?;
        cmd.begin()?;
        cmd.begin_copy_pass()?;
        Ok(Self { cmd, copies: 0, bytes: 0 })
    }

    /// Record a copy of `data` into `dst` at offset 0
    pub fn buffer(&mut self, device: &mut dyn GraphicsDevice, dst: &Arc<dyn Buffer>, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let staging = stage(device, data)?;
        self.cmd.upload_to_buffer(&staging, 0, dst, 0, data.len() as u64, false)?;
        self.copies += 1;
        self.bytes += data.len() as u64;
        Ok(())
    }

    /// Record a copy of a full image into `dst`
    pub fn texture(&mut self, device: &mut dyn GraphicsDevice, dst: &Arc<dyn Texture>, pixels: &[u8]) -> Result<()> {
        let staging = stage(device, pixels)?;
        self.cmd.upload_to_texture(&staging, 0, dst, false)?;
        self.copies += 1;
        self.bytes += pixels.len() as u64;
        Ok(())
    }

    /// Close the copy pass and submit
    pub fn submit(mut self, device: &mut dyn GraphicsDevice) -> Result<()> {
        self.cmd.end_copy_pass()?;
        self.cmd.end()?;
        device.submit(&[self.cmd.as_ref()])?;
        engine_trace!("orrery::Upload", "Submitted {} copies ({} bytes)", self.copies, self.bytes);
        Ok(())
    }
}

/// Upload `data` into `dst` as its own submission
pub fn upload_to_buffer(device: &mut dyn GraphicsDevice, dst: &Arc<dyn Buffer>, data: &[u8]) -> Result<()> {
    let mut upload = Uploader::begin(device)?;
    upload.buffer(device, dst, data)?;
    upload.submit(device)
}

/// Upload a full image into `dst` as its own submission
pub fn upload_to_texture(device: &mut dyn GraphicsDevice, dst: &Arc<dyn Texture>, pixels: &[u8]) -> Result<()> {
    let mut upload = Uploader::begin(device)?;
    upload.texture(device, dst, pixels)?;
    upload.submit(device)
}

/// Fill a fresh transfer buffer with `data`
fn stage(device: &mut dyn GraphicsDevice, data: &[u8]) -> Result<Arc<dyn TransferBuffer>> {
    let staging = device.create_transfer_buffer(TransferBufferDesc { size: data.len() as u64 })?;
    staging.map(false)?;
    staging.write(0, data)?;
    staging.unmap()?;
    Ok(staging)
}

#[cfg(test)]
#[path = "upload_tests.rs"]
mod tests;
