//! Browser entry point for the search page: looks up the DOM regions the host
//! page owns and attaches the form controller to them.

mod controller;
mod sequence;

pub use controller::{SearchFormController, count_label};
pub use sequence::RequestSequence;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlFormElement};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document available"))?;

    let form: HtmlFormElement = require_element(&document, "#form")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("#form is not a form element"))?;
    let results_body = require_element(&document, "#results-body")?;
    let results_header = require_element(&document, "#results-header")?;
    let results_container = require_element(&document, ".results-container")?;

    let controller =
        SearchFormController::new(form, results_body, results_header, results_container);
    controller.attach()?;
    log::info!("search form controller attached");
    Ok(())
}

fn require_element(document: &Document, selector: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("missing element: {selector}")))
}
