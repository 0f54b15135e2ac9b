//! Parameter panel: a colour picker and a field-of-view slider writing
//! straight into the shared [`Params`](crate::params::Params).

use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement};

use super::dom::{element, listen};
use crate::color::Color;
use crate::config::ParamConfig;
use crate::error::SceneError;
use crate::params::SharedParams;

fn input(document: &Document, kind: &str) -> Result<HtmlInputElement, SceneError> {
    let el: HtmlInputElement = document
        .create_element("input")?
        .dyn_into()
        .map_err(|_| SceneError::Js("input element".to_owned()))?;
    el.set_type(kind);
    Ok(el)
}

fn row(document: &Document, label: &str) -> Result<Element, SceneError> {
    let row = element(document, "label", "param-row")?;
    let name = element(document, "span", "param-name")?;
    name.set_text_content(Some(label));
    row.append_child(&name)?;
    Ok(row)
}

/// Build the panel, append it to `<body>`, and bind it to `params`.
pub(crate) fn mount(
    document: &Document,
    params: &SharedParams,
    config: &ParamConfig,
) -> Result<Element, SceneError> {
    let panel = element(document, "div", "param-panel")?;
    let current = *params.borrow();

    let tint_row = row(document, "color")?;
    let tint = input(document, "color")?;
    tint.set_value(&current.tint.to_string());
    tint_row.append_child(&tint)?;
    panel.append_child(&tint_row)?;
    {
        let params = Rc::clone(params);
        let tint_input = tint.clone();
        listen(&tint, "input", move |_: &Event| match tint_input.value().parse::<Color>() {
            Ok(color) => params.borrow_mut().tint = color,
            Err(e) => log::warn!("ignoring colour input: {e}"),
        })?;
    }

    let fov_row = row(document, "fov")?;
    let fov = input(document, "range")?;
    fov.set_min(&config.fov.start.to_string());
    fov.set_max(&config.fov.end.to_string());
    fov.set_step(&config.fov_step.to_string());
    fov.set_value(&current.fov.to_string());
    let readout = element(document, "span", "param-value")?;
    readout.set_text_content(Some(&current.fov.to_string()));
    fov_row.append_child(&fov)?;
    fov_row.append_child(&readout)?;
    panel.append_child(&fov_row)?;
    {
        let params = Rc::clone(params);
        let fov_input = fov.clone();
        listen(&fov, "input", move |_: &Event| {
            let value = fov_input.value_as_number();
            if value.is_finite() {
                params.borrow_mut().fov = value as f32;
                readout.set_text_content(Some(&fov_input.value()));
            }
        })?;
    }

    document
        .body()
        .ok_or_else(|| SceneError::MissingElement("body".to_owned()))?
        .append_child(&panel)?;
    Ok(panel)
}
