use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Element, Event, FormData, HtmlFormElement};

use folio_api_types::SearchResults;

use crate::sequence::RequestSequence;

const SEARCH_ENDPOINT: &str = "/search";
const HIDDEN_CLASS: &str = "hidden";
const QUERY_FIELD: &str = "query";

/// Wires the search form to the search endpoint: intercepts the submit event,
/// issues `GET /search?q=...` with the encoded query, and splices the returned
/// fragment and count into the page.
///
/// The four DOM regions it mutates are owned by the host page and passed in
/// explicitly, so tests and alternative pages can substitute their own targets.
pub struct SearchFormController {
    form: HtmlFormElement,
    results_body: Element,
    results_header: Element,
    results_container: Element,
    sequence: RequestSequence,
}

impl SearchFormController {
    pub fn new(
        form: HtmlFormElement,
        results_body: Element,
        results_header: Element,
        results_container: Element,
    ) -> Rc<Self> {
        Rc::new(Self {
            form,
            results_body,
            results_header,
            results_container,
            sequence: RequestSequence::new(),
        })
    }

    /// Attaches the submit listener to the form. The closure must live as long
    /// as the page, so it is forgotten rather than dropped; there is no
    /// teardown path.
    pub fn attach(self: &Rc<Self>) -> Result<(), JsValue> {
        let controller = Rc::clone(self);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            event.prevent_default();
            controller.submit();
        });
        self.form
            .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
        on_submit.forget();
        Ok(())
    }

    /// One search per submission: no deduplication, no cancellation of the
    /// prior request. Stale responses are discarded by sequence number.
    fn submit(self: &Rc<Self>) {
        let query = match self.query_value() {
            Ok(query) => query,
            Err(err) => {
                log::error!("failed to read form data: {err:?}");
                return;
            }
        };

        let seq = self.sequence.issue();
        let controller = Rc::clone(self);
        spawn_local(async move {
            match fetch_results(&query).await {
                Ok(results) => {
                    if controller.sequence.is_latest(seq) {
                        controller.display_results(&results);
                    } else {
                        log::debug!("discarding stale response for request {seq}");
                    }
                }
                Err(err) => {
                    log::error!("search request failed: {err}");
                    if controller.sequence.is_latest(seq) {
                        controller.display_error();
                    }
                }
            }
        });
    }

    fn query_value(&self) -> Result<String, JsValue> {
        let data = FormData::new_with_form(&self.form)?;
        Ok(data.get(QUERY_FIELD).as_string().unwrap_or_default())
    }

    /// Replaces the previous rendering wholesale; calling this again never
    /// accumulates content.
    pub fn display_results(&self, results: &SearchResults) {
        // The fragment is trusted markup: the server escapes all corpus text
        // before it reaches this field.
        self.results_body.set_inner_html(&results.html);
        self.set_header(&count_label(results.num_results));
        self.show_container();
    }

    /// User-visible error state instead of a silently unchanged page.
    pub fn display_error(&self) {
        self.results_body.set_inner_html("");
        self.set_header("Search failed. Please try again.");
        self.show_container();
    }

    /// Builds the heading as a DOM node; no markup is assembled from strings
    /// on the client side.
    fn set_header(&self, text: &str) {
        let document = match self.results_header.owner_document() {
            Some(document) => document,
            None => {
                log::error!("results header is detached from any document");
                return;
            }
        };
        match document.create_element("h2") {
            Ok(heading) => {
                heading.set_text_content(Some(text));
                self.results_header.set_inner_html("");
                if let Err(err) = self.results_header.append_child(&heading) {
                    log::error!("failed to update results header: {err:?}");
                }
            }
            Err(err) => log::error!("failed to create results heading: {err:?}"),
        }
    }

    fn show_container(&self) {
        if let Err(err) = self.results_container.class_list().remove_1(HIDDEN_CLASS) {
            log::error!("failed to unhide results container: {err:?}");
        }
    }
}

/// The `query` builder percent-encodes the value, so characters like space,
/// `&`, and `#` reach the server losslessly.
async fn fetch_results(query: &str) -> Result<SearchResults, gloo_net::Error> {
    gloo_net::http::Request::get(SEARCH_ENDPOINT)
        .query([("q", query)])
        .send()
        .await?
        .json::<SearchResults>()
        .await
}

pub fn count_label(num_results: u32) -> String {
    format!("{num_results} Results found!")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_includes_count_and_suffix() {
        assert_eq!(count_label(1), "1 Results found!");
        assert_eq!(count_label(42), "42 Results found!");
    }

    #[test]
    fn count_label_handles_zero() {
        assert_eq!(count_label(0), "0 Results found!");
    }
}
