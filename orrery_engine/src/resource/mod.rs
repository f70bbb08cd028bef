//! Resource module
//!
//! Meshes and materials: decoding from disk, uploading to the GPU and
//! name-to-slot catalogs.

pub mod registry;
pub mod mesh;
pub mod material;
pub mod loader;
pub mod upload;
mod resource_manager;

pub use resource_manager::ResourceManager;
pub use registry::Registry;
pub use mesh::{Mesh, MeshData, Vertex};
pub use material::{ImageData, Material, MaterialMeta};
pub use upload::{Uploader, upload_to_buffer, upload_to_texture};
