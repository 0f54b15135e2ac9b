use rand::Rng;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, Window};

use super::dom::element;
use crate::config::RevealConfig;
use crate::error::SceneError;
use crate::reveal::{RevealNode, RevealScheduler, Transition, TransitionKind};

/// Replace every marked node's text with one span per letter and arm the
/// class toggles. Returns the number of nodes found.
pub(crate) fn run<R: Rng>(
    window: &Window,
    document: &Document,
    config: &RevealConfig,
    rng: &mut R,
) -> Result<usize, SceneError> {
    let found = document.query_selector_all(&format!(".{}", config.marker_class))?;
    let mut elements = Vec::with_capacity(found.length() as usize);
    let mut nodes = Vec::with_capacity(found.length() as usize);
    for i in 0..found.length() {
        let Some(el) = found.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        nodes.push(RevealNode::new(
            el.text_content().unwrap_or_default(),
            el.has_attribute(&config.last_attribute),
        ));
        elements.push(el);
    }
    if elements.is_empty() {
        log::warn!("no .{} nodes to reveal", config.marker_class);
        return Ok(0);
    }

    let plans = RevealScheduler::new(config.clone()).plan(&nodes, rng);
    for (el, plan) in elements.iter().zip(&plans) {
        el.set_text_content(None);
        for letter in &plan.letters {
            let span = element(document, "span", &config.letter_class)?;
            span.set_text_content(Some(&letter.ch.to_string()));
            el.append_child(&span)?;
            for transition in letter.transitions() {
                schedule(window, &span, &config.visible_class, transition)?;
            }
        }
    }
    log::info!("revealing {} text nodes", elements.len());
    Ok(elements.len())
}

fn schedule(
    window: &Window,
    span: &Element,
    class: &str,
    transition: Transition,
) -> Result<(), SceneError> {
    let span = span.clone();
    let class = class.to_owned();
    let toggle = Closure::once_into_js(move || {
        let classes = span.class_list();
        let toggled = match transition.kind {
            TransitionKind::FadeIn => classes.add_1(&class),
            TransitionKind::FadeOut => classes.remove_1(&class),
        };
        if let Err(e) = toggled {
            log::warn!("class toggle failed: {e:?}");
        }
    });
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        toggle.unchecked_ref(),
        transition.delay_ms.round() as i32,
    )?;
    Ok(())
}
