#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::SeedableRng;
use smoke_wasm::camera::PerspectiveCamera;
use smoke_wasm::scene::Scene;
use smoke_wasm::viewport::Viewport;
use smoke_wasm::{App, FrameRenderer, SceneConfig, SceneError};

/// Renderer double that records what the app asked of it.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub size: Option<(u32, u32)>,
    pub pixel_ratio: Option<f64>,
    pub frames: u32,
    pub last_fov: Option<f32>,
    pub fail: bool,
}

impl FrameRenderer for RecordingRenderer {
    fn set_size(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }

    fn set_pixel_ratio(&mut self, ratio: f64) {
        self.pixel_ratio = Some(ratio);
    }

    fn render(&mut self, _scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError> {
        self.frames += 1;
        self.last_fov = Some(camera.fov);
        if self.fail {
            return Err(SceneError::WebGlUnavailable);
        }
        Ok(())
    }
}

pub fn app_with(config: SceneConfig, seed: u64) -> (App, RecordingRenderer) {
    let mut renderer = RecordingRenderer::default();
    let viewport = Viewport::new(1280, 720, 1.0, config.max_pixel_ratio);
    let app = App::new(
        config,
        viewport,
        &mut SmallRng::seed_from_u64(seed),
        &mut renderer,
        0.0,
    );
    (app, renderer)
}

pub fn app(seed: u64) -> (App, RecordingRenderer) {
    app_with(SceneConfig::default(), seed)
}
