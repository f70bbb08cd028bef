//! Renderer module
//!
//! Frame construction: instance transforms, their per-frame upload and the
//! batched draw recording that consumes them.

mod instance_buffer;
mod scene_renderer;

pub use instance_buffer::{InstanceBuffer, INSTANCE_STRIDE};
pub use scene_renderer::{FrameStats, SceneRenderer};
