//! Letter-by-letter text reveal.
//!
//! Planning is separate from the DOM: [`RevealScheduler::plan`] turns a list
//! of marked text nodes into per-letter class toggles with delays, and the
//! browser layer only has to create the letter elements and arm timers.
//!
//! Each node gets a window of `window_span_ms` to draw fade-in delays from.
//! The window moves forward by `window_step_ms` after every node, so nodes
//! reveal one after another. Nodes not flagged as last also fade out, all
//! letters together, `fade_out_after_ms` after their window opened.

use rand::Rng;

use crate::config::RevealConfig;

/// A marked text node as found in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealNode {
    pub text: String,
    /// The final node of a sequence stays visible.
    pub last: bool,
}

impl RevealNode {
    pub fn new(text: impl Into<String>, last: bool) -> Self {
        Self { text: text.into(), last }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    /// Add the visible class.
    FadeIn,
    /// Remove the visible class.
    FadeOut,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub kind: TransitionKind,
    pub delay_ms: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterPlan {
    pub ch: char,
    pub fade_in_ms: f64,
    pub fade_out_ms: Option<f64>,
}

impl LetterPlan {
    pub fn transitions(&self) -> Vec<Transition> {
        let fade_in = Transition {
            kind: TransitionKind::FadeIn,
            delay_ms: self.fade_in_ms,
        };
        match self.fade_out_ms {
            Some(delay_ms) => vec![
                fade_in,
                Transition { kind: TransitionKind::FadeOut, delay_ms },
            ],
            None => vec![fade_in],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodePlan {
    pub window_start_ms: f64,
    pub letters: Vec<LetterPlan>,
}

/// Split text into one element per character. Whitespace is kept so the
/// rebuilt node lays out like the original.
pub fn split_letters(text: &str) -> Vec<char> {
    text.chars().collect()
}

#[derive(Debug, Clone)]
pub struct RevealScheduler {
    config: RevealConfig,
}

impl RevealScheduler {
    pub fn new(config: RevealConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Fade-out offset from the window start; never earlier than the end of
    /// the fade-in window.
    fn fade_out_offset(&self) -> f64 {
        self.config.fade_out_after_ms.max(self.config.window_span_ms)
    }

    pub fn plan<R: Rng>(&self, nodes: &[RevealNode], rng: &mut R) -> Vec<NodePlan> {
        let span = self.config.window_span_ms.max(f64::EPSILON);
        let mut window_start = self.config.window_start_ms;
        let mut plans = Vec::with_capacity(nodes.len());

        for node in nodes {
            let fade_out_ms = (!node.last).then(|| window_start + self.fade_out_offset());
            let letters = split_letters(&node.text)
                .into_iter()
                .map(|ch| LetterPlan {
                    ch,
                    fade_in_ms: window_start + rng.random_range(0.0..span),
                    fade_out_ms,
                })
                .collect();
            plans.push(NodePlan { window_start_ms: window_start, letters });
            window_start += self.config.window_step_ms;
        }

        log::debug!("planned reveal for {} text nodes", plans.len());
        plans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn keeps_spaces_and_multibyte_letters() {
        assert_eq!(split_letters("a é"), vec!['a', ' ', 'é']);
    }

    #[test]
    fn windows_advance_per_node() {
        let scheduler = RevealScheduler::new(RevealConfig::default());
        let nodes = [
            RevealNode::new("one", false),
            RevealNode::new("", false),
            RevealNode::new("three", true),
        ];
        let plan = scheduler.plan(&nodes, &mut SmallRng::seed_from_u64(5));
        let starts: Vec<f64> = plan.iter().map(|n| n.window_start_ms).collect();
        assert_eq!(starts, vec![0.0, 3000.0, 6000.0]);
        assert!(plan[1].letters.is_empty());
    }

    #[test]
    fn fade_out_never_precedes_fade_in() {
        let config = RevealConfig {
            window_span_ms: 800.0,
            fade_out_after_ms: 100.0,
            ..Default::default()
        };
        let plan = RevealScheduler::new(config)
            .plan(&[RevealNode::new("hello", false)], &mut SmallRng::seed_from_u64(2));
        for letter in &plan[0].letters {
            let out = letter.fade_out_ms.unwrap();
            assert!(out >= letter.fade_in_ms);
            assert_eq!(out, 800.0);
        }
    }
}
