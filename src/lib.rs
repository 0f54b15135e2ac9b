#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

//! Drifting smoke sprites over an orbitable camera, plus a letter-by-letter
//! text reveal, rendered in the browser through WebGL2.
//!
//! The scene model and per-frame update are plain Rust and run on the host;
//! everything touching the DOM or WebGL lives in the wasm-only `wasm` module.

pub mod app;
pub mod camera;
pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod params;
pub mod particles;
pub mod reveal;
pub mod scene;
pub mod stats;
pub mod viewport;

pub use app::{App, FrameRenderer};
pub use config::SceneConfig;
pub use error::SceneError;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
