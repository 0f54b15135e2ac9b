//! Live-tunable parameters shared between the parameter panel and the
//! render loop.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use crate::color::Color;
use crate::config::SceneConfig;

/// Values the panel writes and the render loop reads every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Params {
    pub tint: Color,
    /// Requested field of view in degrees, possibly outside the slider range
    /// when set programmatically.
    pub fov: f32,
}

/// Single-threaded shared handle: the panel writes, the loop reads.
pub type SharedParams = Rc<RefCell<Params>>;

impl Params {
    pub fn from_config(config: &SceneConfig) -> Self {
        Self {
            tint: config.params.tint,
            fov: config.camera.fov,
        }
    }

    pub fn shared(self) -> SharedParams {
        Rc::new(RefCell::new(self))
    }

    /// Field of view limited to the slider's inclusive bounds.
    pub fn clamped_fov(&self, range: &Range<f32>) -> f32 {
        self.fov.clamp(range.start, range.end)
    }
}
