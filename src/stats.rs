//! Frame statistics in the style of the classic stats.js overlay.
//!
//! Timestamps are plain milliseconds (`performance.now()` in the browser) so
//! the counter can be driven deterministically.

use serde::{Deserialize, Serialize};

/// Which reading the overlay shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    /// Frames per second, sampled once per second.
    #[default]
    Fps,
    /// Milliseconds spent between `begin` and `end` of the last frame.
    Ms,
}

/// Running value with min/max, as shown by one overlay panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

impl Reading {
    fn record(slot: &mut Option<Self>, value: f64) {
        *slot = Some(match *slot {
            Some(r) => Self {
                value,
                min: r.min.min(value),
                max: r.max.max(value),
            },
            None => Self { value, min: value, max: value },
        });
    }
}

const FPS_WINDOW_MS: f64 = 1000.0;

#[derive(Debug, Clone)]
pub struct Stats {
    panel: Panel,
    begin_time: f64,
    prev_time: f64,
    frames: u32,
    fps: Option<Reading>,
    ms: Option<Reading>,
}

impl Stats {
    pub fn new(panel: Panel, now: f64) -> Self {
        Self {
            panel,
            begin_time: now,
            prev_time: now,
            frames: 0,
            fps: None,
            ms: None,
        }
    }

    pub fn show_panel(&mut self, panel: Panel) {
        self.panel = panel;
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn begin(&mut self, now: f64) {
        self.begin_time = now;
    }

    /// Close the sample opened by [`begin`](Self::begin). Returns `true`
    /// when a new FPS reading was produced.
    pub fn end(&mut self, now: f64) -> bool {
        self.frames += 1;
        Reading::record(&mut self.ms, now - self.begin_time);

        let elapsed = now - self.prev_time;
        if elapsed < FPS_WINDOW_MS {
            return false;
        }
        let fps = f64::from(self.frames) * 1000.0 / elapsed;
        Reading::record(&mut self.fps, fps);
        self.prev_time = now;
        self.frames = 0;
        true
    }

    pub fn fps(&self) -> Option<Reading> {
        self.fps
    }

    pub fn ms(&self) -> Option<Reading> {
        self.ms
    }

    /// Overlay text for the selected panel, e.g. `"60 FPS (58-61)"`.
    pub fn label(&self) -> String {
        let (reading, unit) = match self.panel {
            Panel::Fps => (self.fps, "FPS"),
            Panel::Ms => (self.ms, "MS"),
        };
        match reading {
            Some(r) => format!(
                "{:.0} {unit} ({:.0}-{:.0})",
                r.value, r.min, r.max
            ),
            None => format!("-- {unit}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifty_frames_in_a_second() {
        let mut stats = Stats::new(Panel::Fps, 0.0);
        let mut produced = false;
        for i in 1..=50 {
            let t = f64::from(i) * 20.0;
            stats.begin(t - 2.0);
            produced = stats.end(t);
        }
        assert!(produced);
        let fps = stats.fps().unwrap();
        assert!((fps.value - 50.0).abs() < 1e-9);
        assert_eq!(stats.label(), "50 FPS (50-50)");
    }

    #[test]
    fn ms_panel_tracks_frame_cost() {
        let mut stats = Stats::new(Panel::Ms, 0.0);
        stats.begin(10.0);
        stats.end(14.0);
        stats.begin(20.0);
        stats.end(30.0);
        let ms = stats.ms().unwrap();
        assert_eq!((ms.value, ms.min, ms.max), (10.0, 4.0, 10.0));
        assert!(stats.fps().is_none());
        assert_eq!(stats.label(), "10 MS (4-10)");
    }
}
