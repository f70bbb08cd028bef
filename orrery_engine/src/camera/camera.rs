/// Camera: a position and orientation plus a perspective projection.
///
/// Position and rotation are set by the caller between frames. The
/// projection is built once from the configuration and only rebuilt on an
/// explicit resize.

use glam::{Mat4, Quat, Vec3};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Unit quaternion; identity looks down -Z with +Y up
    pub rotation: Quat,
    fov_y_radians: f32,
    z_near: f32,
    z_far: f32,
    projection: Mat4,
}

impl Camera {
    /// Right-handed perspective camera at the origin
    ///
    /// # Arguments
    ///
    /// * `fov_y_radians` - Vertical field of view
    /// * `aspect` - Viewport width / height
    /// * `z_near`, `z_far` - Clip planes (depth range 0..1)
    pub fn new(fov_y_radians: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fov_y_radians,
            z_near,
            z_far,
            projection: Mat4::perspective_rh(fov_y_radians, aspect, z_near, z_far),
        }
    }

    /// Camera matching the configured field of view, clip planes and viewport
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.fov_y_radians, config.aspect_ratio(), config.z_near, config.z_far)
    }

    /// Rebuild the projection for a new viewport aspect ratio
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection = Mat4::perspective_rh(self.fov_y_radians, aspect, self.z_near, self.z_far);
    }

    /// Turn the camera toward `target`
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let view = Mat4::look_at_rh(self.position, target, up);
        let (_, rotation, _) = view.inverse().to_scale_rotation_translation();
        self.rotation = rotation;
    }

    // ===== MATRICES =====

    /// Inverse of the camera's world transform
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection
    }

    /// `projection * view`
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
