//! Browser entry points.
//!
//! `run_smoke` mounts the smoke scene into the `#world` container and drives
//! it from `requestAnimationFrame`; `run_reveal` splits the marked text nodes
//! into letters and schedules their fade-in/out.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlCanvasElement, Window};

mod dom;
mod input;
mod panel;
mod render;
mod reveal;
mod stats_overlay;

pub use render::WebGlRenderer;

use crate::app::App;
use crate::config::SceneConfig;
use crate::error::SceneError;
use crate::viewport::Viewport;
use stats_overlay::StatsOverlay;

/// Id of the optional `<script type="application/json">` holding overrides.
const CONFIG_ELEMENT_ID: &str = "scene-config";

/// Everything the frame and input callbacks share.
pub(crate) struct Running {
    pub(crate) app: App,
    renderer: WebGlRenderer,
    overlay: StatsOverlay,
}

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("logger already initialised");
    }
}

fn load_config(document: &Document) -> Result<SceneConfig, SceneError> {
    match document.get_element_by_id(CONFIG_ELEMENT_ID) {
        Some(el) => SceneConfig::from_json(&el.text_content().unwrap_or_default()),
        None => Ok(SceneConfig::default()),
    }
}

fn seeded_rng(config: &SceneConfig) -> SmallRng {
    let seed = config
        .seed
        .unwrap_or_else(|| (js_sys::Math::random() * 2f64.powi(53)) as u64);
    log::debug!("rng seed {seed}");
    SmallRng::seed_from_u64(seed)
}

fn window_size(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn now(window: &Window) -> f64 {
    window.performance().map_or(0.0, |p| p.now())
}

/// Mount the smoke scene and start its render loop.
#[wasm_bindgen]
pub fn run_smoke() -> Result<(), JsValue> {
    start_smoke().map_err(|e| {
        log::error!("{e}");
        e.into()
    })
}

/// Split `.reveal` nodes into letters and schedule their transitions.
#[wasm_bindgen]
pub fn run_reveal() -> Result<(), JsValue> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = load_config(&document)?;
    let mut rng = seeded_rng(&config);
    reveal::run(&window, &document, &config.reveal, &mut rng)?;
    Ok(())
}

fn start_smoke() -> Result<(), SceneError> {
    let window = dom::window()?;
    let document = dom::document()?;
    let config = load_config(&document)?;

    let container = document
        .get_element_by_id(&config.container_id)
        .ok_or_else(|| SceneError::MissingElement(format!("#{}", config.container_id)))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| SceneError::Js("canvas element".to_owned()))?;
    container.append_child(&canvas)?;

    let mut renderer = WebGlRenderer::new(canvas.clone(), &config.texture_url, config.axes_length)?;
    let (width, height) = window_size(&window);
    let viewport = Viewport::new(width, height, window.device_pixel_ratio(), config.max_pixel_ratio);
    let mut rng = seeded_rng(&config);

    let param_config = config.params.clone();
    let app = App::new(config, viewport, &mut rng, &mut renderer, now(&window));
    let _panel = panel::mount(&document, &app.params, &param_config)?;
    let overlay = StatsOverlay::mount(&document)?;

    let state = Rc::new(RefCell::new(Running { app, renderer, overlay }));

    input::attach(&canvas, &state)?;
    on_overlay_click(&state)?;
    on_resize(&window, &state)?;
    start_loop(&window, state)?;
    Ok(())
}

fn on_overlay_click(state: &Rc<RefCell<Running>>) -> Result<(), JsValue> {
    let target = state.borrow().overlay.element().clone();
    let state = Rc::clone(state);
    dom::listen(&target, "click", move |_: &Event| {
        let mut running = state.borrow_mut();
        let next = stats_overlay::cycle(running.app.stats.panel());
        running.app.stats.show_panel(next);
    })
}

fn on_resize(window: &Window, state: &Rc<RefCell<Running>>) -> Result<(), JsValue> {
    let state = Rc::clone(state);
    dom::listen(window, "resize", move |_: &Event| {
        let Some(window) = web_sys::window() else { return };
        let (width, height) = window_size(&window);
        let mut running = state.borrow_mut();
        let Running { app, renderer, .. } = &mut *running;
        app.resize(width, height, window.device_pixel_ratio(), renderer);
    })
}

/// Drive `App::tick` from `requestAnimationFrame`.
fn start_loop(window: &Window, state: Rc<RefCell<Running>>) -> Result<(), JsValue> {
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);

    *g.borrow_mut() = Some(Closure::new(move |_timestamp: f64| {
        let Some(window) = web_sys::window() else { return };
        {
            let mut running = state.borrow_mut();
            let Running { app, renderer, overlay } = &mut *running;
            if let Err(e) = app.tick(|| now(&window), renderer) {
                log::error!("frame {} failed: {e}", app.frame());
            }
            overlay.show(&app.stats);
        }

        // schedule next
        let callback = f
            .borrow()
            .as_ref()
            .map(|c| c.as_ref().unchecked_ref::<js_sys::Function>().clone());
        let Some(callback) = callback else { return };
        if let Err(e) = window.request_animation_frame(&callback) {
            log::error!("requestAnimationFrame failed: {e:?}");
        }
    }));

    if let Some(closure) = g.borrow().as_ref() {
        window.request_animation_frame(closure.as_ref().unchecked_ref())?;
    }
    Ok(())
}
