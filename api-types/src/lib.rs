//! Wire types shared between the search server and the browser client.

use serde::{Deserialize, Serialize};

/// Response body of `GET /search`.
///
/// The capitalized field names are part of the wire contract and must not
/// change: the frontend reads `HTML` and `NumResults` verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Server-rendered fragment with one result card per hit.
    #[serde(rename = "HTML")]
    pub html: String,
    /// Number of matching lines, independent of the fragment contents.
    #[serde(rename = "NumResults")]
    pub num_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_field_names_are_stable() {
        let results = SearchResults {
            html: "<p>A</p>".to_string(),
            num_results: 1,
        };
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["HTML"], "<p>A</p>");
        assert_eq!(json["NumResults"], 1);
    }

    #[test]
    fn parses_server_shape() {
        let raw = r#"{"HTML":"<tr><td>Alpha</td></tr>","NumResults":1}"#;
        let results: SearchResults = serde_json::from_str(raw).unwrap();
        assert_eq!(results.html, "<tr><td>Alpha</td></tr>");
        assert_eq!(results.num_results, 1);
    }
}
