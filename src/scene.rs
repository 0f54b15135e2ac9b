//! Scene graph for the smoke demo: lights, the shared sprite material, the
//! particle field and an axes helper.

use glam::Vec3;
use rand::Rng;

use crate::color::Color;
use crate::config::{LightConfig, SceneConfig};
use crate::particles::ParticleField;

/// Material shared by every smoke sprite. Changing `color` tints the whole
/// field at once.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,
    pub texture_url: String,
    pub transparent: bool,
}

/// Sky/ground gradient light blended by surface normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphereLight {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
    pub up: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    /// Unit vector pointing from the lit surface towards the light.
    pub direction: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub hemisphere: HemisphereLight,
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
}

impl Lights {
    pub fn from_config(c: &LightConfig) -> Self {
        Self {
            hemisphere: HemisphereLight {
                sky: c.hemisphere_sky,
                ground: c.hemisphere_ground,
                intensity: c.hemisphere_intensity,
                up: Vec3::Y,
            },
            ambient: AmbientLight {
                color: c.ambient_color,
                intensity: c.ambient_intensity,
            },
            directional: DirectionalLight {
                color: c.directional_color,
                intensity: c.directional_intensity,
                direction: Vec3::from_array(c.directional_position).normalize_or(Vec3::Y),
            },
        }
    }

    /// Lambert irradiance reaching a surface with unit normal `normal`.
    pub fn irradiance(&self, normal: Vec3) -> Color {
        let h = &self.hemisphere;
        let w = 0.5 * normal.dot(h.up) + 0.5;
        let hemi = Color::new(
            h.ground.r + (h.sky.r - h.ground.r) * w,
            h.ground.g + (h.sky.g - h.ground.g) * w,
            h.ground.b + (h.sky.b - h.ground.b) * w,
        )
        .scale(h.intensity);
        let ambient = self.ambient.color.scale(self.ambient.intensity);
        let d = &self.directional;
        let direct = d.color.scale(d.intensity * normal.dot(d.direction).max(0.0));
        Color::new(
            hemi.r + ambient.r + direct.r,
            hemi.g + ambient.g + direct.g,
            hemi.b + ambient.b + direct.b,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub lights: Lights,
    pub material: Material,
    pub smoke: ParticleField,
    /// Axes helper length; `0` hides it.
    pub axes_length: f32,
}

impl Scene {
    pub fn new<R: Rng>(config: &SceneConfig, rng: &mut R) -> Self {
        Self {
            lights: Lights::from_config(&config.lights),
            material: Material {
                color: config.params.tint,
                texture_url: config.texture_url.clone(),
                transparent: true,
            },
            smoke: ParticleField::spawn(&config.particles, rng),
            axes_length: config.axes_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_camera_gets_half_hemisphere_plus_ambient() {
        let lights = Lights::from_config(&LightConfig::default());
        let c = lights.irradiance(Vec3::Z);
        let expected_r = 0.5 * (0xaa as f32 / 255.0) * 0.9 + (0xdc as f32 / 255.0) * 0.5;
        assert!((c.r - expected_r).abs() < 1e-5, "{} vs {expected_r}", c.r);
    }

    #[test]
    fn upward_normal_catches_the_directional_light() {
        let lights = Lights::from_config(&LightConfig::default());
        assert!(lights.irradiance(Vec3::Y).g > lights.irradiance(Vec3::Z).g);
    }
}
