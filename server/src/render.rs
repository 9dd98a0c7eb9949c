use maud::{html, Markup, Render};
use std::collections::HashSet;

use crate::analyzer::stem_word;
use crate::corpus::{Corpus, LineRecord};
use crate::query_engine::ScoredLine;

/// One result card in the fragment sent to the frontend. All corpus text goes
/// through maud's escaping, so the server is the trust boundary for markup:
/// nothing a line contains can smuggle tags into the page.
pub struct ResultCard<'a> {
    pub line: &'a LineRecord,
    pub line_before: Option<&'a str>,
    pub line_after: Option<&'a str>,
    pub score: u32,
    pub query_terms: &'a HashSet<String>,
}

impl Render for ResultCard<'_> {
    fn render(&self) -> Markup {
        html! {
            figure class="result" {
                div class="result__content" {
                    div class="result__title" {
                        h2 class="result__heading" {
                            (self.line.play_name) " " (self.line.line_number)
                        }
                        div class="result__tag result__tag--1" { "#" (self.line.line_type) }
                        div class="result__tag result__tag--2" { "#" (self.line.speaker) }
                    }
                    p class="result__description" {
                        @if let Some(before) = self.line_before { (before) " " }
                        (highlight_terms(&self.line.text_entry, self.query_terms))
                        @if let Some(after) = self.line_after { " " (after) }
                    }
                }
                div class="result__work" {
                    "RANK " (self.score)
                }
            }
        }
    }
}

/// Wraps each word whose stemmed form is one of the query terms in `<b>`.
/// The word itself is rendered escaped; only the `<b>` wrapper is markup.
/// Whitespace runs pass through untouched, so the line stays byte-faithful
/// apart from escaping and the wrappers.
fn highlight_terms(text: &str, query_terms: &HashSet<String>) -> Markup {
    html! {
        @for segment in whitespace_runs(text) {
            @if segment.starts_with(char::is_whitespace) {
                (segment)
            } @else if query_terms.contains(&stem_word(segment)) {
                b { (segment) }
            } @else {
                (segment)
            }
        }
    }
}

/// Splits text into alternating runs of whitespace and non-whitespace,
/// preserving the original bytes of every run.
fn whitespace_runs(text: &str) -> Vec<&str> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_whitespace: Option<bool> = None;
    for (idx, ch) in text.char_indices() {
        let whitespace = ch.is_whitespace();
        match in_whitespace {
            Some(previous) if previous != whitespace => {
                runs.push(&text[start..idx]);
                start = idx;
                in_whitespace = Some(whitespace);
            }
            Some(_) => {}
            None => in_whitespace = Some(whitespace),
        }
    }
    if !text.is_empty() {
        runs.push(&text[start..]);
    }
    runs
}

/// Renders the ranked hits into the single HTML fragment the frontend splices
/// into the results body. Empty hits produce an empty string.
pub fn results_fragment(corpus: &Corpus, hits: &[ScoredLine], query_terms: &HashSet<String>) -> String {
    let mut fragment = String::new();
    for hit in hits {
        let ordinal = hit.line as usize;
        let Some(line) = corpus.line(ordinal) else {
            continue;
        };
        let card = ResultCard {
            line: &line.record,
            line_before: corpus.text_before(ordinal),
            line_after: corpus.text_after(ordinal),
            score: hit.score,
            query_terms,
        };
        fragment.push_str(&card.render().into_string());
    }
    fragment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::TextAnalyzer;

    fn terms(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| stem_word(w)).collect()
    }

    fn record(play: &str, text: &str) -> LineRecord {
        LineRecord {
            line_type: "line".to_string(),
            play_name: play.to_string(),
            line_number: "1.1.1".to_string(),
            speaker: "CHORUS".to_string(),
            text_entry: text.to_string(),
            ..LineRecord::default()
        }
    }

    #[test]
    fn highlights_words_matching_query_stems() {
        let markup = highlight_terms("O brawling love! O loving hate!", &terms(&["love"]));
        let html = markup.into_string();
        assert!(html.contains("<b>love!</b>"));
        assert!(html.contains("<b>loving</b>"));
        assert!(html.contains("brawling"));
        assert!(!html.contains("<b>brawling</b>"));
    }

    #[test]
    fn whitespace_runs_round_trip() {
        let text = "double  spaced\tand\n newline";
        let runs = whitespace_runs(text);
        assert_eq!(runs.concat(), text);
        assert_eq!(
            runs,
            vec![
                "double", "  ", "spaced", "\t", "and", "\n ", "newline"
            ]
        );
        assert!(whitespace_runs("").is_empty());
    }

    #[test]
    fn highlighting_preserves_internal_whitespace() {
        let markup = highlight_terms("double  spaced\tline", &terms(&["spaced"]));
        assert_eq!(markup.into_string(), "double  <b>spaced</b>\tline");
    }

    #[test]
    fn escapes_corpus_markup() {
        let line = record("Hamlet", "beware the <script>alert('hi')</script> of march");
        let card = ResultCard {
            line: &line,
            line_before: None,
            line_after: None,
            score: 1,
            query_terms: &terms(&["beware"]),
        };
        let html = card.render().into_string();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn card_carries_metadata_and_rank() {
        let line = record("Romeo and Juliet", "My bounty is as boundless as the sea");
        let card = ResultCard {
            line: &line,
            line_before: Some("before line"),
            line_after: Some("after line"),
            score: 4,
            query_terms: &terms(&["boundless"]),
        };
        let html = card.render().into_string();
        assert!(html.contains("Romeo and Juliet 1.1.1"));
        assert!(html.contains("#CHORUS"));
        assert!(html.contains("RANK 4"));
        assert!(html.contains("before line"));
        assert!(html.contains("after line"));
    }

    #[test]
    fn fragment_is_empty_for_no_hits() {
        let corpus = Corpus::from_json(r#"{"data": []}"#, &TextAnalyzer::line_pipeline()).unwrap();
        let fragment = results_fragment(&corpus, &[], &HashSet::new());
        assert_eq!(fragment, "");
    }

    #[test]
    fn fragment_orders_cards_like_hits() {
        let json = r#"{"data": [
            {"play_name": "A", "text_entry": "first line here"},
            {"play_name": "B", "text_entry": "second line here"}
        ]}"#;
        let corpus = Corpus::from_json(json, &TextAnalyzer::line_pipeline()).unwrap();
        let hits = [
            ScoredLine { line: 1, score: 2 },
            ScoredLine { line: 0, score: 1 },
        ];
        let fragment = results_fragment(&corpus, &hits, &terms(&["line"]));
        let first = fragment.find("second line").unwrap();
        let second = fragment.find("first line").unwrap();
        assert!(first < second);
    }
}
