/*!
# Orrery Engine

Scene graph and render batching core for real-time 3D rendering.

Nodes live in a fixed-capacity pool with deferred insertion and removal.
Each frame the renderer resolves world transforms over the node hierarchy,
groups live nodes by material and mesh, writes one view-projection-composed
matrix per instance and records one instanced draw per group, with the
instance matrices uploaded to the GPU through a cycled transfer buffer.

## Architecture

- **SceneRenderer**: explicitly owned context driving the frame
- **Scene**: node pool, render batches, transform resolver
- **ResourceManager**: mesh and material catalogs, loaded from disk
- **GraphicsDevice**: backend-agnostic GPU interface, implemented outside
  this crate

Backends provide concrete types implementing the `graphics_device` traits.
*/

// Internal modules
mod error;
mod engine;
mod config;
pub mod log;
pub mod graphics_device;
pub mod utils;
pub mod resource;
pub mod scene;
pub mod camera;
pub mod renderer;

// Main orrery namespace module
pub mod orrery {
    // Error types
    pub use crate::error::{Error, Result};

    // Global logger access
    pub use crate::engine::Engine;

    // Renderer configuration
    pub use crate::config::Config;

    // Frame driver
    pub use crate::renderer::{FrameStats, SceneRenderer};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // GPU interface sub-module
    pub mod graphics_device {
        pub use crate::graphics_device::*;
    }

    // Resource sub-module
    pub mod resource {
        pub use crate::resource::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }

    // Camera sub-module
    pub mod camera {
        pub use crate::camera::*;
    }

    // Renderer sub-module
    pub mod renderer {
        pub use crate::renderer::*;
    }
}

// Re-export math library at crate root
pub use glam;
