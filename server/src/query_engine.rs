use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;

use crate::analyzer::TextAnalyzer;
use crate::corpus::Corpus;
use crate::indexer::{InvertedIndex, Posting};

/// Adds one term's postings into the running per-line scores.
/// A line's score is the sum of term frequencies over all query terms.
pub fn accumulate_postings(postings: &[Posting], scores: &mut HashMap<u32, u32>) {
    for posting in postings {
        *scores.entry(posting.line).or_default() += posting.term_freq;
    }
}

#[test]
fn test_accumulate_postings() {
    let mut scores = HashMap::new();
    accumulate_postings(
        &[
            Posting { line: 3, term_freq: 2 },
            Posting { line: 7, term_freq: 1 },
        ],
        &mut scores,
    );
    accumulate_postings(&[Posting { line: 7, term_freq: 4 }], &mut scores);

    assert_eq!(scores.get(&3), Some(&2));
    assert_eq!(scores.get(&7), Some(&5));
    assert_eq!(scores.get(&1), None);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoredLine {
    pub line: u32,
    pub score: u32,
}

/// Everything a caller needs to render the answer: ranked hits plus the
/// analyzed query terms (used for highlighting).
#[derive(Debug)]
pub struct SearchOutcome {
    pub hits: Vec<ScoredLine>,
    pub terms: Vec<String>,
}

pub struct QueryEngine {
    corpus: Arc<Corpus>,
    index: Arc<InvertedIndex>,
    analyzer: TextAnalyzer,
    query_analyzer: TextAnalyzer,
}

impl QueryEngine {
    pub fn new(corpus: Arc<Corpus>, index: Arc<InvertedIndex>, analyzer: TextAnalyzer) -> Self {
        Self {
            corpus,
            index,
            analyzer,
            query_analyzer: TextAnalyzer::query_pipeline(),
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Analyzes the query with the stop-filtered query pipeline. If every
    /// term was a stop word, the line pipeline's unfiltered terms are used
    /// instead, so a query like "to be or not to be" still matches.
    fn query_terms(&self, query: &str) -> Result<Vec<String>> {
        let mut tokens = self.query_analyzer.analyze(query.to_string())?;
        if tokens.is_empty() {
            tokens = self.analyzer.analyze(query.to_string())?;
        }
        Ok(tokens.into_iter().map(|t| t.term).collect())
    }

    /// Ranked union over the query terms: any line sharing at least one term
    /// with the query is a hit. Sorted by descending score, ties broken by
    /// line ordinal so results are deterministic.
    pub fn query(&self, query: &str) -> Result<SearchOutcome> {
        let terms = self.query_terms(query)?;
        if terms.is_empty() {
            return Ok(SearchOutcome {
                hits: Vec::new(),
                terms,
            });
        }

        let mut scores: HashMap<u32, u32> = HashMap::new();
        for term in &terms {
            if let Some(postings) = self.index.postings(term) {
                accumulate_postings(postings, &mut scores);
            }
        }

        let mut hits: Vec<ScoredLine> = scores
            .into_iter()
            .map(|(line, score)| ScoredLine { line, score })
            .collect();
        hits.sort_by(|a, b| b.score.cmp(&a.score).then(a.line.cmp(&b.line)));

        Ok(SearchOutcome { hits, terms })
    }
}
