/// Pipeline trait

use std::any::Any;

/// Compiled graphics pipeline
///
/// Shaders and pipeline state are built by the backend layer; the renderer
/// only binds the handle it is given. The pipeline expects:
/// - vertex input: `Vertex` (position, uv)
/// - vertex storage buffer slot 0: instance matrices (`mat4`, 64 bytes each)
/// - vertex uniform slot 0: `u32` index of the first instance of the draw
/// - fragment sampler slots from 0: the material's texture bindings
pub trait Pipeline: Send + Sync {
    /// Backend downcast hook
    fn as_any(&self) -> &dyn Any;
}
