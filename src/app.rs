//! Application context and the per-frame update.
//!
//! [`App`] owns everything the page used to keep in globals. The host loop
//! (`requestAnimationFrame` in the browser, a plain loop in tests) calls
//! [`App::tick`] once per display refresh and reschedules itself; `tick`
//! never recurses.

use rand::Rng;

use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;
use crate::controls::OrbitControls;
use crate::error::SceneError;
use crate::params::{Params, SharedParams};
use crate::scene::Scene;
use crate::stats::Stats;
use crate::viewport::Viewport;

/// Something that can draw a [`Scene`] into a resizable surface.
pub trait FrameRenderer {
    /// Resize the surface, in CSS pixels.
    fn set_size(&mut self, width: u32, height: u32);
    fn set_pixel_ratio(&mut self, ratio: f64);
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<(), SceneError>;
}

pub struct App {
    config: SceneConfig,
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub params: SharedParams,
    pub viewport: Viewport,
    pub stats: Stats,
    frame: u64,
}

impl App {
    /// Build the scene and size `renderer` to `viewport`.
    pub fn new<R: Rng, F: FrameRenderer>(
        config: SceneConfig,
        viewport: Viewport,
        rng: &mut R,
        renderer: &mut F,
        now: f64,
    ) -> Self {
        let scene = Scene::new(&config, rng);
        let camera = PerspectiveCamera::new(&config.camera, viewport.aspect().unwrap_or(1.0));
        let controls = OrbitControls::new(config.controls.clone());
        let params = Params::from_config(&config).shared();
        let stats = Stats::new(config.stats_panel, now);

        renderer.set_size(viewport.width, viewport.height);
        renderer.set_pixel_ratio(viewport.pixel_ratio);
        log::info!(
            "scene ready: {} particles, {}x{} @{}x",
            scene.smoke.len(),
            viewport.width,
            viewport.height,
            viewport.pixel_ratio
        );

        Self {
            config,
            scene,
            camera,
            controls,
            params,
            viewport,
            stats,
            frame: 0,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// One display refresh: sample start, spin and tint the smoke, apply the
    /// field of view, update controls, draw, sample end.
    ///
    /// `clock` returns milliseconds. It is read once before the update and
    /// once after the draw, so the stats sample covers the frame's cost.
    pub fn tick<F, C>(&mut self, mut clock: C, renderer: &mut F) -> Result<(), SceneError>
    where
        F: FrameRenderer,
        C: FnMut() -> f64,
    {
        self.stats.begin(clock());

        let params = *self.params.borrow();
        self.scene.smoke.advance(self.config.particles.rotation_step);
        self.scene.material.color = params.tint;

        self.camera.fov = params.clamped_fov(&self.config.params.fov);
        self.camera.update_projection_matrix();

        if self.controls.update(&mut self.camera) {
            log::trace!("camera moved on frame {}", self.frame);
        }

        let rendered = renderer.render(&self.scene, &self.camera);

        self.stats.end(clock());
        self.frame += 1;
        rendered
    }

    /// Viewport resize: new aspect, new projection, new surface size, pixel
    /// ratio capped at the configured maximum.
    pub fn resize<F: FrameRenderer>(
        &mut self,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
        renderer: &mut F,
    ) {
        self.viewport = Viewport::new(width, height, device_pixel_ratio, self.config.max_pixel_ratio);
        match self.viewport.aspect() {
            Some(aspect) => self.camera.aspect = aspect,
            None => log::debug!("zero-height viewport, keeping aspect {}", self.camera.aspect),
        }
        self.camera.update_projection_matrix();
        renderer.set_size(width, height);
        renderer.set_pixel_ratio(self.viewport.pixel_ratio);
    }
}
