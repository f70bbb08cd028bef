/// Asset decoding: OBJ meshes, images and material documents.
///
/// Every file in the models and materials directories is loaded at
/// startup; the file stem becomes the lookup name.

use std::fs;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::resource::material::{ImageData, MaterialMeta};
use crate::resource::mesh::{MeshData, Vertex};

// ===== MESHES =====

/// Decode an OBJ document into 16-bit indexed geometry
///
/// All models in the document are merged into one mesh. Faces are
/// triangulated; texture coordinates default to (0, 0) and are flipped to
/// a top-left origin.
pub fn parse_obj(bytes: &[u8]) -> Result<MeshData> {
    let (models, _materials) = tobj::load_obj_buf(
        &mut std::io::Cursor::new(bytes),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok((Vec::new(), Default::default())),
    )
    .map_err(|e| Error::InvalidResource(format!("OBJ: {}", e)))?;

    let mut data = MeshData::default();
    for model in &models {
        let mesh = &model.mesh;
        let base = data.vertices.len();
        let vertex_count = mesh.positions.len() / 3;
        if base + vertex_count > u16::MAX as usize + 1 {
            return Err(Error::InvalidResource(format!(
                "OBJ: {} vertices do not fit 16-bit indices", base + vertex_count
            )));
        }

        data.vertices.try_reserve(vertex_count)?;
        for i in 0..vertex_count {
            let p = &mesh.positions[i * 3..i * 3 + 3];
            let uv = mesh
                .texcoords
                .get(i * 2..i * 2 + 2)
                .map_or([0.0, 0.0], |t| [t[0], 1.0 - t[1]]);
            data.vertices.push(Vertex::new([p[0], p[1], p[2]], uv));
        }

        data.indices.try_reserve(mesh.indices.len())?;
        for &index in &mesh.indices {
            // bounded by the vertex count check above
            data.indices.push((base + index as usize) as u16);
        }
    }

    if data.vertices.is_empty() || data.indices.is_empty() {
        return Err(Error::InvalidResource("OBJ: no geometry".to_string()));
    }
    Ok(data)
}

/// Read and decode an OBJ file
pub fn load_obj(path: &Path) -> Result<MeshData> {
    let bytes = read(path)?;
    parse_obj(&bytes).map_err(|e| with_path(e, path))
}

// ===== IMAGES =====

/// Decode an encoded image (PNG, JPEG) to RGBA8
pub fn decode_image(bytes: &[u8]) -> Result<ImageData> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| Error::InvalidResource(format!("image: {}", e)))?
        .to_rgba8();
    let (width, height) = image.dimensions();
    ImageData::rgba8(width, height, image.into_raw())
}

/// Read and decode an image file
pub fn load_image(path: &Path) -> Result<ImageData> {
    let bytes = read(path)?;
    decode_image(&bytes).map_err(|e| with_path(e, path))
}

// ===== MATERIALS =====

/// Read a material document and resolve its base texture path against `dir`
pub fn load_material_meta(path: &Path, dir: &Path) -> Result<(MaterialMeta, PathBuf)> {
    let bytes = read(path)?;
    let meta = MaterialMeta::parse(&bytes).map_err(|e| with_path(e, path))?;
    let texture_path = dir.join(&meta.base);
    Ok((meta, texture_path))
}

// ===== DIRECTORIES =====

/// Regular files of `dir` as (stem, path), sorted by file name
///
/// Sorting keeps slot assignment deterministic across platforms.
pub fn dir_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::Io(format!("{}: {}", dir.display(), e)))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        files.push((stem.to_string(), path.clone()));
    }
    files.sort_by(|a, b| a.1.file_name().cmp(&b.1.file_name()));
    Ok(files)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::Io(format!("{}: {}", path.display(), e)))
}

fn with_path(error: Error, path: &Path) -> Error {
    match error {
        Error::InvalidResource(msg) => Error::InvalidResource(format!("{}: {}", path.display(), msg)),
        other => other,
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
pub(crate) mod tests;
