#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

#[wasm_bindgen_test]
fn reveal_splits_marked_nodes_into_letters() {
    let document = document();
    let body = document.body().unwrap();
    let node = document.create_element("p").unwrap();
    node.set_class_name("reveal");
    node.set_text_content(Some("abc"));
    body.append_child(&node).unwrap();

    smoke_wasm::wasm::run_reveal().unwrap();

    let letters = node.query_selector_all(".letter").unwrap();
    assert_eq!(letters.length(), 3);
    let first = letters.item(0).unwrap().dyn_into::<web_sys::Element>().unwrap();
    assert_eq!(first.text_content().as_deref(), Some("a"));
    body.remove_child(&node).unwrap();
}

#[wasm_bindgen_test]
fn smoke_without_container_is_an_error() {
    assert!(document().get_element_by_id("world").is_none());
    assert!(smoke_wasm::wasm::run_smoke().is_err());
}
