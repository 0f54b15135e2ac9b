use web_sys::{Document, Element};

use super::dom::element;
use crate::error::SceneError;
use crate::stats::{Panel, Stats};

/// Fixed-position FPS readout in the page corner.
pub(crate) struct StatsOverlay {
    el: Element,
    shown: String,
}

impl StatsOverlay {
    pub(crate) fn mount(document: &Document) -> Result<Self, SceneError> {
        let el = element(document, "div", "stats")?;
        document
            .body()
            .ok_or_else(|| SceneError::MissingElement("body".to_owned()))?
            .append_child(&el)?;
        Ok(Self { el, shown: String::new() })
    }

    pub(crate) fn element(&self) -> &Element {
        &self.el
    }

    /// Refresh the text, touching the DOM only when it changed.
    pub(crate) fn show(&mut self, stats: &Stats) {
        let label = stats.label();
        if label != self.shown {
            self.el.set_text_content(Some(&label));
            self.shown = label;
        }
    }
}

/// Next panel when the overlay is clicked.
pub(crate) fn cycle(panel: Panel) -> Panel {
    match panel {
        Panel::Fps => Panel::Ms,
        Panel::Ms => Panel::Fps,
    }
}
