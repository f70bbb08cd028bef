/// Render target trait

use std::any::Any;
use crate::graphics_device::TextureFormat;

/// Color attachment a render pass draws into (typically a swapchain image)
pub trait RenderTarget: Send + Sync {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Pixel format
    fn format(&self) -> TextureFormat;

    /// Backend downcast hook
    fn as_any(&self) -> &dyn Any;
}
