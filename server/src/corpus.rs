use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::analyzer::TextAnalyzer;

/// Top-level shape of the corpus file: `{"data": [ ...lines... ]}`.
#[derive(Debug, Deserialize)]
struct CorpusFile {
    data: Vec<LineRecord>,
}

/// One line of the works as stored in the corpus file. Every field is optional
/// in the source data; stage directions have no speaker, act headings no line number.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LineRecord {
    #[serde(default, rename = "type")]
    pub line_type: String,
    #[serde(default)]
    pub line_id: u64,
    #[serde(default)]
    pub play_name: String,
    #[serde(default)]
    pub speech_number: String,
    #[serde(default)]
    pub line_number: String,
    #[serde(default)]
    pub speaker: String,
    #[serde(default)]
    pub text_entry: String,
}

/// A corpus line plus its analyzed terms, computed once at load time.
#[derive(Debug)]
pub struct CorpusLine {
    pub record: LineRecord,
    pub terms: Vec<String>,
}

/// The full set of lines, in file order. Line ordinals (indices into this
/// vector) are the document ids used by the index and the query engine.
pub struct Corpus {
    lines: Vec<CorpusLine>,
}

impl Corpus {
    pub fn load(path: &Path, analyzer: &TextAnalyzer) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read corpus file {}", path.display()))?;
        Self::from_json(&raw, analyzer)
    }

    pub fn from_json(raw: &str, analyzer: &TextAnalyzer) -> Result<Self> {
        let file: CorpusFile = serde_json::from_str(raw).context("failed to parse corpus JSON")?;
        let lines = file
            .data
            .into_iter()
            .map(|record| {
                let terms = analyzer
                    .analyze(record.text_entry.clone())?
                    .into_iter()
                    .map(|t| t.term)
                    .collect();
                Ok(CorpusLine { record, terms })
            })
            .collect::<Result<Vec<CorpusLine>>>()?;
        Ok(Self { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &CorpusLine> {
        self.lines.iter()
    }

    pub fn line(&self, ordinal: usize) -> Option<&CorpusLine> {
        self.lines.get(ordinal)
    }

    /// Text of the preceding line, for result context. None at the start of the corpus.
    pub fn text_before(&self, ordinal: usize) -> Option<&str> {
        let prev = ordinal.checked_sub(1)?;
        Some(self.lines.get(prev)?.record.text_entry.as_str())
    }

    /// Text of the following line, for result context. None at the end of the corpus.
    pub fn text_after(&self, ordinal: usize) -> Option<&str> {
        Some(self.lines.get(ordinal + 1)?.record.text_entry.as_str())
    }
}
