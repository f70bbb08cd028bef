/// CommandList trait - for recording copy and render commands

use std::any::Any;
use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, IndexType, Pipeline, RenderTarget, Sampler, Texture, TransferBuffer,
};

/// Clear value for the color attachment
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClearValue {
    /// Clear to an RGBA color
    Color([f32; 4]),
    /// Keep the previous contents
    Load,
}

/// A texture paired with the sampler that reads it
#[derive(Clone)]
pub struct TextureSamplerBinding {
    pub texture: Arc<dyn Texture>,
    pub sampler: Arc<dyn Sampler>,
}

/// Command list for recording GPU work
///
/// Commands are recorded between `begin` and `end`, then handed to
/// `GraphicsDevice::submit`. Copy commands are only valid inside a copy
/// pass, draw state and draws only inside a render pass; passes never nest.
pub trait CommandList: Send + Sync {
    /// Begin recording
    fn begin(&mut self) -> Result<()>;

    /// End recording
    fn end(&mut self) -> Result<()>;

    // ===== COPY PASS =====

    /// Open a copy pass
    fn begin_copy_pass(&mut self) -> Result<()>;

    /// Copy `size` bytes from a transfer buffer into a GPU buffer
    ///
    /// # Arguments
    ///
    /// * `src` - Unmapped transfer buffer holding the data
    /// * `src_offset` - Byte offset into `src`
    /// * `dst` - Destination buffer
    /// * `dst_offset` - Byte offset into `dst`
    /// * `size` - Number of bytes to copy
    /// * `cycle` - Allow the backend to rename `dst` if it is still in use
    fn upload_to_buffer(
        &mut self,
        src: &Arc<dyn TransferBuffer>,
        src_offset: u64,
        dst: &Arc<dyn Buffer>,
        dst_offset: u64,
        size: u64,
        cycle: bool,
    ) -> Result<()>;

    /// Copy a full image from a transfer buffer into a texture
    fn upload_to_texture(
        &mut self,
        src: &Arc<dyn TransferBuffer>,
        src_offset: u64,
        dst: &Arc<dyn Texture>,
        cycle: bool,
    ) -> Result<()>;

    /// Close the current copy pass
    fn end_copy_pass(&mut self) -> Result<()>;

    // ===== RENDER PASS =====

    /// Open a render pass drawing into `target`
    fn begin_render_pass(&mut self, target: &Arc<dyn RenderTarget>, clear: ClearValue) -> Result<()>;

    /// Close the current render pass
    fn end_render_pass(&mut self) -> Result<()>;

    /// Bind a graphics pipeline
    fn bind_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()>;

    /// Bind the vertex buffer at slot 0
    fn bind_vertex_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64) -> Result<()>;

    /// Bind the index buffer
    fn bind_index_buffer(&mut self, buffer: &Arc<dyn Buffer>, offset: u64, index_type: IndexType) -> Result<()>;

    /// Bind texture/sampler pairs to consecutive fragment slots
    fn bind_fragment_samplers(&mut self, first_slot: u32, bindings: &[TextureSamplerBinding]) -> Result<()>;

    /// Bind a read-only storage buffer to a vertex shader slot
    fn bind_vertex_storage_buffer(&mut self, slot: u32, buffer: &Arc<dyn Buffer>) -> Result<()>;

    /// Push uniform data to a vertex shader slot
    fn push_vertex_uniform(&mut self, slot: u32, data: &[u8]) -> Result<()>;

    /// Draw indexed geometry
    ///
    /// # Arguments
    ///
    /// * `index_count` - Number of indices per instance
    /// * `instance_count` - Number of instances
    /// * `first_index` - First index in the index buffer
    /// * `vertex_offset` - Added to each index before fetching the vertex
    /// * `first_instance` - Instance id of the first instance
    fn draw_indexed_instanced(
        &mut self,
        index_count: u32,
        instance_count: u32,
        first_index: u32,
        vertex_offset: i32,
        first_instance: u32,
    ) -> Result<()>;

    /// Backend downcast hook
    fn as_any(&self) -> &dyn Any;
}
