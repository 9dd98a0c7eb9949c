use serde::Deserialize;

/// Query string of `GET /search`. `q` is optional here so a missing parameter
/// can be answered with a 400 instead of a deserialization error.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}
