//! Scene configuration.
//!
//! Every tunable constant of the demo lives here. All sections use
//! `#[serde(default)]`, so a page can override a single value (say the
//! particle count) with a partial JSON document and keep the rest.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::SceneError;
use crate::stats::Panel;

pub const DEFAULT_TEXTURE_URL: &str =
    "https://s3-us-west-2.amazonaws.com/s.cdpn.io/204808/smoke.png";

/// Top-level configuration for the smoke scene and the text reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Id of the element the canvas is appended to.
    pub container_id: String,
    pub texture_url: String,
    /// Fixed seed for particle placement and reveal delays. `None` draws
    /// a fresh seed on every page load.
    pub seed: Option<u64>,
    /// Upper bound applied to `devicePixelRatio`.
    pub max_pixel_ratio: f64,
    /// Length of the axes helper; `0` hides it.
    pub axes_length: f32,
    pub stats_panel: Panel,
    pub particles: ParticleConfig,
    pub camera: CameraConfig,
    pub params: ParamConfig,
    pub lights: LightConfig,
    pub controls: ControlsConfig,
    pub reveal: RevealConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            container_id: "world".to_owned(),
            texture_url: DEFAULT_TEXTURE_URL.to_owned(),
            seed: None,
            max_pixel_ratio: 2.0,
            axes_length: 100.0,
            stats_panel: Panel::Fps,
            particles: ParticleConfig::default(),
            camera: CameraConfig::default(),
            params: ParamConfig::default(),
            lights: LightConfig::default(),
            controls: ControlsConfig::default(),
            reveal: RevealConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SceneError> {
        let p = &self.particles;
        if p.count == 0 {
            return Err(invalid("particles.count must be positive"));
        }
        for (name, range) in [
            ("particles.x", &p.x),
            ("particles.y", &p.y),
            ("particles.z", &p.z),
            ("particles.rotation", &p.rotation),
        ] {
            if !(range.start < range.end) {
                return Err(invalid(format!("{name} range is empty")));
            }
        }
        if p.plane_size <= 0.0 {
            return Err(invalid("particles.plane_size must be positive"));
        }

        let c = &self.camera;
        if !(c.near > 0.0 && c.near < c.far) {
            return Err(invalid("camera requires 0 < near < far"));
        }

        let fov = &self.params.fov;
        let in_slider = fov.start <= c.fov && c.fov <= fov.end;
        if !(fov.start < fov.end) || !in_slider {
            return Err(invalid(format!(
                "camera.fov {} outside params.fov {}..{}",
                c.fov, fov.start, fov.end
            )));
        }

        if self.max_pixel_ratio <= 0.0 {
            return Err(invalid("max_pixel_ratio must be positive"));
        }
        if self.reveal.window_span_ms <= 0.0 {
            return Err(invalid("reveal.window_span_ms must be positive"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> SceneError {
    SceneError::InvalidConfig(msg.into())
}

/// Placement and motion of the smoke sprites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    pub x: Range<f32>,
    pub y: Range<f32>,
    pub z: Range<f32>,
    /// Initial z rotation, sampled uniformly.
    pub rotation: Range<f32>,
    /// Added to every sprite's z rotation each tick.
    pub rotation_step: f32,
    /// Edge length of the square sprite.
    pub plane_size: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 150,
            x: -250.0..250.0,
            y: -250.0..250.0,
            z: -100.0..900.0,
            rotation: 0.0..360.0,
            rotation_step: 0.003,
            plane_size: 300.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 1.0,
            far: 10_000.0,
            position: [0.0, 0.0, 400.0],
            target: [0.0, 0.0, 0.0],
        }
    }
}

/// Initial values and slider bounds for the parameter panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParamConfig {
    pub tint: Color,
    /// Inclusive slider bounds for the field of view.
    pub fov: Range<f32>,
    pub fov_step: f32,
}

impl Default for ParamConfig {
    fn default() -> Self {
        Self {
            tint: Color::from_hex(0x0196ff),
            fov: 20.0..90.0,
            fov_step: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub hemisphere_sky: Color,
    pub hemisphere_ground: Color,
    pub hemisphere_intensity: f32,
    pub ambient_color: Color,
    pub ambient_intensity: f32,
    pub directional_color: Color,
    pub directional_intensity: f32,
    /// Directional light position; it shines towards the origin.
    pub directional_position: [f32; 3],
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            hemisphere_sky: Color::from_hex(0xaaaaaa),
            hemisphere_ground: Color::from_hex(0x000000),
            hemisphere_intensity: 0.9,
            ambient_color: Color::from_hex(0xdc8874),
            ambient_intensity: 0.5,
            directional_color: Color::from_hex(0xffffff),
            directional_intensity: 0.9,
            directional_position: [0.0, 1.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update when damping.
    pub damping_factor: f32,
    pub auto_rotate: bool,
    /// Full turns per minute at 60 fps, matching the usual orbit-control
    /// convention (`2.0` is one turn every 30 s).
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: false,
            damping_factor: 0.05,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: 100_000.0,
        }
    }
}

/// Markup conventions and timing of the letter-by-letter text reveal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Class that marks a text node for revealing.
    pub marker_class: String,
    /// Attribute that flags the final node of a sequence (no fade-out).
    pub last_attribute: String,
    pub letter_class: String,
    /// Class added on fade-in and removed on fade-out.
    pub visible_class: String,
    pub window_start_ms: f64,
    /// Width of the window fade-in delays are drawn from.
    pub window_span_ms: f64,
    /// How far the window moves after each node.
    pub window_step_ms: f64,
    /// Fade-out time relative to the node's window start.
    pub fade_out_after_ms: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            marker_class: "reveal".to_owned(),
            last_attribute: "data-last".to_owned(),
            letter_class: "letter".to_owned(),
            visible_class: "visible".to_owned(),
            window_start_ms: 0.0,
            window_span_ms: 1000.0,
            window_step_ms: 3000.0,
            fade_out_after_ms: 2500.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SceneConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config =
            SceneConfig::from_json(r#"{"seed": 7, "particles": {"count": 12}}"#)
                .unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.particles.count, 12);
        assert_eq!(config.particles.plane_size, 300.0);
        assert_eq!(config.container_id, "world");
    }

    #[test]
    fn rejects_zero_particles() {
        let err = SceneConfig::from_json(r#"{"particles": {"count": 0}}"#)
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfig(_)));
    }

    #[test]
    fn rejects_fov_outside_slider_range() {
        let err = SceneConfig::from_json(r#"{"camera": {"fov": 120.0}}"#)
            .unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SceneConfig::from_json("{").unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse(_)));
    }
}
