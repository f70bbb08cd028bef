/// Material resources: metadata document, decoded images and GPU bindings

use serde::Deserialize;
use crate::error::{Error, Result};
use crate::graphics_device::{TextureFormat, TextureSamplerBinding};

/// Material description stored next to its textures
///
/// ```json
/// { "base": "crate_diffuse.png" }
/// ```
///
/// Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MaterialMeta {
    /// Base color texture file, relative to the materials directory
    pub base: String,
}

impl MaterialMeta {
    /// Parse a material document
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| Error::InvalidResource(format!("material document: {}", e)))
    }
}

/// Decoded image ready for a direct texture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormat,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Wrap tightly packed RGBA8 pixels
    pub fn rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if width == 0 || height == 0 || pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "{}x{} RGBA8 image needs {} bytes, got {}", width, height, expected, pixels.len()
            )));
        }
        Ok(Self { width, height, format: TextureFormat::R8G8B8A8_UNORM, pixels })
    }
}

/// GPU-resident material: texture/sampler pairs bound to fragment slots 0..n
#[derive(Clone)]
pub struct Material {
    pub bindings: Vec<TextureSamplerBinding>,
}
