use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Perspective camera defined by eye position, look-at target, and
/// projection parameters.
///
/// The projection matrix is cached; call [`update_projection_matrix`] after
/// touching `fov`, `aspect`, `near` or `far`.
///
/// [`update_projection_matrix`]: PerspectiveCamera::update_projection_matrix
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            up: Vec3::Y,
            fov: config.fov,
            aspect,
            near: config.near,
            far: config.far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection = self.compute_projection();
    }

    /// Projection for the current parameters (WebGL `[-1, 1]` depth).
    pub fn compute_projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_negative_z() {
        let cam = PerspectiveCamera::new(&CameraConfig::default(), 16.0 / 9.0);
        let origin_in_view = cam.view_matrix().transform_point3(Vec3::ZERO);
        assert!((origin_in_view.z + 400.0).abs() < 1e-3);
        assert!(!cam.view_projection().col(0).x.is_nan());
    }

    #[test]
    fn projection_is_cached_until_updated() {
        let mut cam = PerspectiveCamera::new(&CameraConfig::default(), 1.0);
        let before = cam.projection_matrix();
        cam.fov = 30.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        assert_eq!(cam.projection_matrix(), cam.compute_projection());
    }
}
