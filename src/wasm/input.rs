//! Pointer and wheel input feeding the orbit controls.
//!
//! Left drag rotates; right drag, or left drag with shift/ctrl/meta, pans.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsValue;
use web_sys::{Event, HtmlCanvasElement, PointerEvent, WheelEvent};

use super::dom::listen;
use super::Running;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Rotate,
    Pan,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    mode: DragMode,
    pointer_id: i32,
    last: Vec2,
}

fn pointer_pos(event: &PointerEvent) -> Vec2 {
    Vec2::new(event.client_x() as f32, event.client_y() as f32)
}

pub(crate) fn attach(canvas: &HtmlCanvasElement, state: &Rc<RefCell<Running>>) -> Result<(), JsValue> {
    let drag: Rc<Cell<Option<Drag>>> = Rc::new(Cell::new(None));

    {
        let drag = Rc::clone(&drag);
        let canvas_for_capture = canvas.clone();
        listen(canvas, "pointerdown", move |e: &PointerEvent| {
            let pan_modifier = e.shift_key() || e.ctrl_key() || e.meta_key();
            let mode = match e.button() {
                0 if pan_modifier => DragMode::Pan,
                0 => DragMode::Rotate,
                2 => DragMode::Pan,
                _ => return,
            };
            if let Err(err) = canvas_for_capture.set_pointer_capture(e.pointer_id()) {
                log::debug!("pointer capture refused: {err:?}");
            }
            drag.set(Some(Drag {
                mode,
                pointer_id: e.pointer_id(),
                last: pointer_pos(e),
            }));
        })?;
    }

    {
        let drag = Rc::clone(&drag);
        let state = Rc::clone(state);
        let canvas_for_height = canvas.clone();
        listen(canvas, "pointermove", move |e: &PointerEvent| {
            let Some(mut d) = drag.get() else { return };
            if d.pointer_id != e.pointer_id() {
                return;
            }
            let pos = pointer_pos(e);
            let delta = pos - d.last;
            d.last = pos;
            drag.set(Some(d));

            let height = canvas_for_height.client_height() as f32;
            let mut running = state.borrow_mut();
            let app = &mut running.app;
            match d.mode {
                DragMode::Rotate => app.controls.drag_rotate(delta, height),
                DragMode::Pan => app.controls.drag_pan(delta, height, &app.camera),
            }
        })?;
    }

    for kind in ["pointerup", "pointercancel"] {
        let drag = Rc::clone(&drag);
        listen(canvas, kind, move |e: &PointerEvent| {
            if drag.get().is_some_and(|d| d.pointer_id == e.pointer_id()) {
                drag.set(None);
            }
        })?;
    }

    {
        let state = Rc::clone(state);
        listen(canvas, "wheel", move |e: &WheelEvent| {
            e.prevent_default();
            state.borrow_mut().app.controls.wheel(e.delta_y() as f32);
        })?;
    }

    listen(canvas, "contextmenu", |e: &Event| e.prevent_default())?;
    Ok(())
}
