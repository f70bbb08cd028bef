/// Renderer configuration

use std::path::PathBuf;
use crate::error::{Error, Result};

/// Scene renderer configuration
///
/// # Example
///
/// ```no_run
/// use orrery_engine::orrery::Config;
///
/// let config = Config {
///     max_nodes: 10_000,
///     asset_root: "data".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Node pool capacity (live + queued nodes)
    pub max_nodes: usize,
    /// Instance buffer capacity, at most `max_nodes`; live nodes past it are
    /// not drawn that frame
    pub max_instances: usize,
    /// Vertical field of view in radians
    pub fov_y_radians: f32,
    /// Near clip plane distance
    pub z_near: f32,
    /// Far clip plane distance
    pub z_far: f32,
    /// Initial viewport width (aspect ratio source)
    pub width: u32,
    /// Initial viewport height (aspect ratio source)
    pub height: u32,
    /// Directory containing the models and materials directories
    pub asset_root: PathBuf,
    /// Mesh directory, relative to `asset_root`
    pub models_dir: PathBuf,
    /// Material directory, relative to `asset_root`
    pub materials_dir: PathBuf,
    /// Color the swapchain target is cleared to
    pub clear_color: [f32; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_nodes: 4096,
            max_instances: 4096,
            fov_y_radians: std::f32::consts::FRAC_PI_4,
            z_near: 0.1,
            z_far: 1000.0,
            width: 1280,
            height: 720,
            asset_root: PathBuf::from("assets"),
            models_dir: PathBuf::from("models"),
            materials_dir: PathBuf::from("materials"),
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl Config {
    /// Check the values the renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_nodes == 0 {
            return Err(Error::InitializationFailed("max_nodes must be at least 1".to_string()));
        }
        if self.max_instances == 0 {
            return Err(Error::InitializationFailed("max_instances must be at least 1".to_string()));
        }
        if self.max_instances > self.max_nodes {
            return Err(Error::InitializationFailed(format!(
                "max_instances {} exceeds max_nodes {}", self.max_instances, self.max_nodes
            )));
        }
        if self.max_instances > u32::MAX as usize {
            return Err(Error::InitializationFailed(format!(
                "max_instances {} exceeds the instance index range", self.max_instances
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::InitializationFailed(format!(
                "viewport {}x{} has a zero dimension", self.width, self.height
            )));
        }
        if !(self.z_near > 0.0 && self.z_far > self.z_near) {
            return Err(Error::InitializationFailed(format!(
                "invalid clip planes near={} far={}", self.z_near, self.z_far
            )));
        }
        if !(self.fov_y_radians > 0.0 && self.fov_y_radians < std::f32::consts::PI) {
            return Err(Error::InitializationFailed(format!(
                "field of view {} out of range", self.fov_y_radians
            )));
        }
        Ok(())
    }

    /// Width / height of the initial viewport
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    /// Full path of the mesh directory
    pub fn models_path(&self) -> PathBuf {
        self.asset_root.join(&self.models_dir)
    }

    /// Full path of the material directory
    pub fn materials_path(&self) -> PathBuf {
        self.asset_root.join(&self.materials_dir)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
