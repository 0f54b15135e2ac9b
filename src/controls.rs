//! Orbit controls: rotate around, dolly towards, and pan the camera target.
//!
//! Input handlers only accumulate pending motion; [`OrbitControls::update`]
//! applies it to the camera once per frame. With damping enabled the pending
//! motion decays over several frames instead of being consumed at once.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::PerspectiveCamera;
use crate::config::ControlsConfig;

const EPS: f32 = 1e-6;

/// Pending spherical motion around the target.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct SphericalDelta {
    /// Azimuth around the up axis.
    theta: f32,
    /// Polar angle measured from the up axis.
    phi: f32,
}

#[derive(Debug, Clone)]
pub struct OrbitControls {
    settings: ControlsConfig,
    delta: SphericalDelta,
    scale: f32,
    pan_offset: Vec3,
    min_polar_angle: f32,
    max_polar_angle: f32,
}

impl OrbitControls {
    pub fn new(settings: ControlsConfig) -> Self {
        Self {
            settings,
            delta: SphericalDelta::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
        }
    }

    pub fn settings(&self) -> &ControlsConfig {
        &self.settings
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta.phi -= angle;
    }

    /// Pointer drag of `delta` pixels over an element `element_height` tall.
    /// A drag across the full height is one full turn.
    pub fn drag_rotate(&mut self, delta: Vec2, element_height: f32) {
        let h = element_height.max(1.0);
        let speed = self.settings.rotate_speed;
        self.rotate_left(TAU * delta.x / h * speed);
        self.rotate_up(TAU * delta.y / h * speed);
    }

    /// Wheel input; negative `delta_y` (scroll up) moves closer.
    pub fn wheel(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.settings.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// Pointer drag that moves the target in the camera's screen plane so
    /// the point under the cursor follows it at target depth.
    pub fn drag_pan(&mut self, delta: Vec2, element_height: f32, camera: &PerspectiveCamera) {
        let h = element_height.max(1.0);
        let distance = (camera.position - camera.target).length()
            * (camera.fov.to_radians() / 2.0).tan();
        let world = camera.view_matrix().inverse();
        let right = world.x_axis.truncate();
        let up = world.y_axis.truncate();
        let speed = self.settings.pan_speed;
        self.pan_offset -= right * (2.0 * delta.x * distance / h * speed);
        self.pan_offset += up * (2.0 * delta.y * distance / h * speed);
    }

    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.settings.auto_rotate_speed
    }

    /// Apply pending motion to `camera`. Returns whether the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius < EPS {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.settings.auto_rotate {
            self.rotate_left(self.auto_rotation_angle());
        }

        let damping = self.settings.enable_damping;
        let factor = if damping { self.settings.damping_factor } else { 1.0 };

        theta += self.delta.theta * factor;
        phi += self.delta.phi * factor;
        phi = phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);

        let new_radius = (radius * self.scale)
            .clamp(self.settings.min_distance, self.settings.max_distance)
            .max(EPS);

        let previous_position = camera.position;
        let previous_target = camera.target;

        camera.target += self.pan_offset * factor;
        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            new_radius * sin_phi * theta.sin(),
            new_radius * phi.cos(),
            new_radius * sin_phi * theta.cos(),
        );
        camera.position = camera.target + new_offset;

        if damping {
            let keep = 1.0 - self.settings.damping_factor;
            self.delta.theta *= keep;
            self.delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta = SphericalDelta::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        previous_position.distance_squared(camera.position) > EPS
            || previous_target.distance_squared(camera.target) > EPS
    }
}
