/// Mesh and material catalogs owned by the renderer.
///
/// Resources are append-only: once registered, a slot stays valid for the
/// lifetime of the manager. Names are resolved to slots once, when a node
/// is created.

use std::path::Path;
use std::sync::Arc;
use crate::engine_info;
use crate::error::{Error, Result};
use crate::graphics_device::{
    BufferDesc, BufferUsage, GraphicsDevice, Sampler, SamplerDesc, TextureDesc,
    TextureSamplerBinding, TextureUsage,
};
use crate::resource::loader;
use crate::resource::material::{ImageData, Material};
use crate::resource::mesh::{Mesh, MeshData};
use crate::resource::registry::Registry;
use crate::resource::upload::Uploader;

pub struct ResourceManager {
    meshes: Registry<Mesh>,
    materials: Registry<Material>,
    /// Shared by every material (linear filtering, repeat addressing)
    sampler: Option<Arc<dyn Sampler>>,
}

impl ResourceManager {
    /// Create an empty resource manager
    pub fn new() -> Self {
        Self {
            meshes: Registry::new(),
            materials: Registry::new(),
            sampler: None,
        }
    }

    // ===== MESHES =====

    /// Create GPU buffers for `data`, upload them and register the mesh
    pub fn add_mesh(&mut self, device: &mut dyn GraphicsDevice, name: &str, data: &MeshData) -> Result<u32> {
        if data.vertices.is_empty() || data.indices.is_empty() {
            return Err(Error::InvalidResource(format!("mesh '{}' has no geometry", name)));
        }
        if let Some(&index) = data.indices.iter().find(|&&i| i as usize >= data.vertices.len()) {
            return Err(Error::InvalidResource(format!(
                "mesh '{}' index {} out of {} vertices", name, index, data.vertices.len()
            )));
        }

        let vertex_bytes: &[u8] = bytemuck::cast_slice(&data.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&data.indices);

        let vertex_buffer = device.create_buffer(BufferDesc {
            size: vertex_bytes.len() as u64,
            usage: BufferUsage::VERTEX,
        })?;
        let index_buffer = device.create_buffer(BufferDesc {
            size: index_bytes.len() as u64,
            usage: BufferUsage::INDEX,
        })?;

        let mut upload = Uploader::begin(device)?;
        upload.buffer(device, &vertex_buffer, vertex_bytes)?;
        upload.buffer(device, &index_buffer, index_bytes)?;
        upload.submit(device)?;

        self.meshes.insert(name, Mesh {
            vertex_buffer,
            index_buffer,
            index_count: data.indices.len() as u32,
        })
    }

    /// Load every file of `dir` as an OBJ mesh named after its stem
    pub fn load_models_dir(&mut self, device: &mut dyn GraphicsDevice, dir: &Path) -> Result<usize> {
        let entries = loader::dir_entries(dir)?;
        for (name, path) in &entries {
            let data = loader::load_obj(path)?;
            self.add_mesh(device, name, &data)?;
            engine_info!("orrery::Resources", "Mesh '{}': {} vertices, {} indices",
                name, data.vertices.len(), data.indices.len());
        }
        Ok(entries.len())
    }

    pub fn mesh_slot(&self, name: &str) -> Option<u32> {
        self.meshes.slot(name)
    }

    /// Mesh at `slot` (panics on a slot this manager never returned)
    pub fn mesh(&self, slot: u32) -> &Mesh {
        self.meshes.get(slot)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    // ===== MATERIALS =====

    /// Create and upload the base texture and register the material
    pub fn add_material(&mut self, device: &mut dyn GraphicsDevice, name: &str, image: &ImageData) -> Result<u32> {
        let texture = device.create_texture(TextureDesc {
            width: image.width,
            height: image.height,
            format: image.format,
            usage: TextureUsage::Sampled,
        })?;

        let mut upload = Uploader::begin(device)?;
        upload.texture(device, &texture, &image.pixels)?;
        upload.submit(device)?;

        let sampler = self.sampler(device)?;
        self.materials.insert(name, Material {
            bindings: vec![TextureSamplerBinding { texture, sampler }],
        })
    }

    /// Load every material document of `dir`, with its base texture
    pub fn load_materials_dir(&mut self, device: &mut dyn GraphicsDevice, dir: &Path) -> Result<usize> {
        let entries = loader::dir_entries(dir)?;
        let mut loaded = 0;
        for (name, path) in &entries {
            // textures sit next to the documents that reference them
            if is_image(path) {
                continue;
            }
            let (meta, texture_path) = loader::load_material_meta(path, dir)?;
            let image = loader::load_image(&texture_path)?;
            self.add_material(device, name, &image)?;
            engine_info!("orrery::Resources", "Material '{}': base '{}' ({}x{})",
                name, meta.base, image.width, image.height);
            loaded += 1;
        }
        Ok(loaded)
    }

    pub fn material_slot(&self, name: &str) -> Option<u32> {
        self.materials.slot(name)
    }

    /// Material at `slot` (panics on a slot this manager never returned)
    pub fn material(&self, slot: u32) -> &Material {
        self.materials.get(slot)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    fn sampler(&mut self, device: &mut dyn GraphicsDevice) -> Result<Arc<dyn Sampler>> {
        if let Some(sampler) = &self.sampler {
            return Ok(Arc::clone(sampler));
        }
        let sampler = device.create_sampler(SamplerDesc::default())?;
        self.sampler = Some(Arc::clone(&sampler));
        Ok(sampler)
    }
}

impl Default for ResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

fn is_image(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("png" | "jpg" | "jpeg")
    )
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
