/// GraphicsDevice trait - factory and submission interface of a GPU backend

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, BufferDesc, CommandList, RenderTarget, Sampler, SamplerDesc,
    Texture, TextureDesc, TransferBuffer, TransferBufferDesc,
};

/// Backend-agnostic graphics device
///
/// Created by the windowing/backend layer and shared with the renderer as
/// `Arc<Mutex<dyn GraphicsDevice>>`.
pub trait GraphicsDevice: Send + Sync {
    /// Create a GPU-resident buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a GPU-resident texture (contents undefined until uploaded)
    fn create_texture(&mut self, desc: TextureDesc) -> Result<Arc<dyn Texture>>;

    /// Create a texture sampler
    fn create_sampler(&mut self, desc: SamplerDesc) -> Result<Arc<dyn Sampler>>;

    /// Create CPU-writable staging memory used as a copy source
    fn create_transfer_buffer(&mut self, desc: TransferBufferDesc) -> Result<Arc<dyn TransferBuffer>>;

    /// Acquire a fresh command list, ready to record
    fn create_command_list(&mut self) -> Result<Box<dyn CommandList>>;

    /// Wait (bounded) for the next swapchain image
    ///
    /// Returns `Ok(None)` when no image is available this frame, e.g. while
    /// the window is minimized. The command list must still be submitted.
    fn acquire_swapchain_target(&mut self, cmd: &mut dyn CommandList) -> Result<Option<Arc<dyn RenderTarget>>>;

    /// Submit command lists for execution
    ///
    /// Lists execute in slice order: every command of `command_lists[i]`
    /// completes before `command_lists[i + 1]` starts reading the
    /// resources it wrote.
    fn submit(&mut self, command_lists: &[&dyn CommandList]) -> Result<()>;

    /// Block until all submitted work has finished
    fn wait_idle(&self) -> Result<()>;
}
