use std::collections::HashMap;

use crate::corpus::Corpus;

/// One occurrence list entry: which line a term appears in and how often.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Posting {
    pub line: u32,
    pub term_freq: u32,
}

/// In-memory inverted index over the corpus: term -> postings sorted by line ordinal.
///
/// Built in a single pass over the corpus. Lines are visited in order, so each
/// term's postings come out sorted without an explicit sort step.
#[derive(Debug, Default)]
pub struct InvertedIndex {
    dictionary: HashMap<String, Vec<Posting>>,
}

impl InvertedIndex {
    pub fn build(corpus: &Corpus) -> Self {
        let mut dictionary: HashMap<String, Vec<Posting>> = HashMap::new();
        for (ordinal, line) in corpus.lines().enumerate() {
            let ordinal = ordinal as u32;
            for term in &line.terms {
                let postings = dictionary.entry(term.clone()).or_default();
                match postings.last_mut() {
                    Some(last) if last.line == ordinal => last.term_freq += 1,
                    _ => postings.push(Posting {
                        line: ordinal,
                        term_freq: 1,
                    }),
                }
            }
        }
        Self { dictionary }
    }

    pub fn postings(&self, term: &str) -> Option<&[Posting]> {
        self.dictionary.get(term).map(|p| p.as_slice())
    }

    pub fn num_terms(&self) -> usize {
        self.dictionary.len()
    }
}
