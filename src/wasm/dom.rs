use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Document, Element, Event, EventTarget, Window};

use crate::error::SceneError;

pub(crate) fn window() -> Result<Window, SceneError> {
    web_sys::window().ok_or_else(|| SceneError::MissingElement("window".to_owned()))
}

pub(crate) fn document() -> Result<Document, SceneError> {
    window()?
        .document()
        .ok_or_else(|| SceneError::MissingElement("document".to_owned()))
}

/// `document.createElement(tag)` with a class name already set.
pub(crate) fn element(document: &Document, tag: &str, class: &str) -> Result<Element, SceneError> {
    let el = document.create_element(tag)?;
    el.set_class_name(class);
    Ok(el)
}

/// Attach a listener that lives as long as the page. Events that are not
/// an `E` are ignored.
pub(crate) fn listen<E, F>(target: &EventTarget, kind: &str, mut handler: F) -> Result<(), JsValue>
where
    E: JsCast + 'static,
    F: FnMut(&E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Some(event) = event.dyn_ref::<E>() {
            handler(event);
        }
    });
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
