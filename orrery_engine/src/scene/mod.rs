//! Scene module
//!
//! Node hierarchy with deferred mutation, render batching by material and
//! mesh, and world transform resolution.

mod node;
mod render_batches;
mod scene;
mod transform_resolver;

pub use node::{Node, NodeDesc, NodeKey};
pub use render_batches::{Batch, RenderBatches};
pub use scene::Scene;
pub use transform_resolver::TransformResolver;
