//! Crate-level error type.

use thiserror::Error;

/// Errors produced while setting up or driving the demo scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A DOM element the page is expected to provide was not found.
    #[error("element not found: {0}")]
    MissingElement(String),
    /// The browser refused a WebGL2 context.
    #[error("WebGL2 not supported")]
    WebGlUnavailable,
    /// Shader compilation or program linking failed.
    #[error("shader error: {0}")]
    Shader(String),
    /// A JavaScript call threw; carries the stringified exception.
    #[error("js error: {0}")]
    Js(String),
    /// Configuration parsed but holds values the scene cannot use.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Configuration JSON could not be parsed.
    #[error("config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// A colour string was not `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

impl From<wasm_bindgen::JsValue> for SceneError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SceneError> for wasm_bindgen::JsValue {
    fn from(err: SceneError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
