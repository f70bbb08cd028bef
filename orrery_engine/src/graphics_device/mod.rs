/// Graphics device module - the backend-agnostic GPU interface
///
/// Backends implement these traits; the scene renderer only talks to
/// `dyn GraphicsDevice` and the handles it returns.

pub mod graphics_device;
pub mod buffer;
pub mod transfer_buffer;
pub mod texture;
pub mod pipeline;
pub mod render_target;
pub mod command_list;

pub use graphics_device::*;
pub use buffer::*;
pub use transfer_buffer::*;
pub use texture::*;
pub use pipeline::*;
pub use render_target::*;
pub use command_list::*;

// Recording device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
