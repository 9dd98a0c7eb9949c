use anyhow::Result;
use porter_stemmer::stem;
use std::collections::HashSet;
use std::sync::OnceLock;

static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

fn get_stop_words() -> &'static HashSet<String> {
    STOP_WORDS.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::English)
            .into_iter()
            .map(|x| x.to_string())
            .collect()
    })
}

/// A character filter receives the original text as a stream of characters and can transform the
/// stream by adding, removing, or changing characters before tokenization.
pub trait CharacterFilter: Send + Sync {
    fn filter(&self, text: String) -> String;
}

/// Drops every character that is not an ASCII letter, digit, or whitespace.
/// Early modern punctuation ("short-winded", "o'er") splits into its alphabetic parts
/// only at word boundaries; mid-word punctuation is simply removed.
#[derive(Debug, Default)]
pub struct AlphanumericFilter;

impl CharacterFilter for AlphanumericFilter {
    fn filter(&self, text: String) -> String {
        text.chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .collect()
    }
}

/// A tokenizer receives a stream of characters, breaks it up into individual tokens
/// (usually individual words), and outputs a stream of tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: String) -> Vec<String>;
}

pub struct WhiteSpaceTokenizer;

impl Tokenizer for WhiteSpaceTokenizer {
    fn tokenize(&self, text: String) -> Vec<String> {
        text.split_whitespace()
            .map(|w| w.to_string())
            .collect::<Vec<String>>()
    }
}

/// A token filter receives the token stream and may add, remove, or change tokens.
pub trait TokenFilter: Send + Sync {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken>;
}

pub struct LowerCaseTokenFilter;

impl TokenFilter for LowerCaseTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut t| {
                t.term = t.term.to_lowercase();
                t
            })
            .collect()
    }
}

/// Removes common English words from the stream. Must run after lowercasing and
/// before stemming: the stop set holds lowercase surface forms ("was", "this"),
/// not stems. Not part of the corpus pipeline: lines keep their stop words so
/// an all-stop-word query can still match (see the query engine's fallback).
pub struct StopWordTokenFilter;

impl TokenFilter for StopWordTokenFilter {
    fn filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        let stop_words = get_stop_words();
        tokens.retain(|w| !stop_words.contains(&w.term));
        tokens
    }
}

pub struct PorterStemmerTokenFilter;

impl TokenFilter for PorterStemmerTokenFilter {
    fn filter(&self, tokens: Vec<TextToken>) -> Vec<TextToken> {
        tokens
            .into_iter()
            .map(|mut w| {
                w.term = stem(&w.term);
                w
            })
            .collect::<Vec<TextToken>>()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextToken {
    pub term: String,
    pub pos: usize,
}

impl std::ops::Deref for TextToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.term
    }
}

/// Pure text analysis pipeline - no async, no I/O, just text transformations.
pub struct TextAnalyzer {
    char_filters: Vec<Box<dyn CharacterFilter>>,
    tokenizer: Box<dyn Tokenizer>,
    token_filters: Vec<Box<dyn TokenFilter>>,
}

impl TextAnalyzer {
    pub fn new(
        char_filters: Vec<Box<dyn CharacterFilter>>,
        tokenizer: Box<dyn Tokenizer>,
        token_filters: Vec<Box<dyn TokenFilter>>,
    ) -> Self {
        Self {
            char_filters,
            tokenizer,
            token_filters,
        }
    }

    /// The pipeline applied to corpus lines and to incoming queries:
    /// strip punctuation, split on whitespace, lowercase, stem.
    pub fn line_pipeline() -> Self {
        Self::new(
            vec![Box::new(AlphanumericFilter)],
            Box::new(WhiteSpaceTokenizer),
            vec![
                Box::new(LowerCaseTokenFilter),
                Box::new(PorterStemmerTokenFilter),
            ],
        )
    }

    /// The pipeline applied to incoming queries: `line_pipeline` with stop
    /// words removed between lowercasing and stemming.
    pub fn query_pipeline() -> Self {
        Self::new(
            vec![Box::new(AlphanumericFilter)],
            Box::new(WhiteSpaceTokenizer),
            vec![
                Box::new(LowerCaseTokenFilter),
                Box::new(StopWordTokenFilter),
                Box::new(PorterStemmerTokenFilter),
            ],
        )
    }

    pub fn char_filter(&self, mut content: String) -> String {
        for filter in self.char_filters.iter() {
            content = filter.filter(content);
        }
        content
    }

    pub fn tokenize(&self, content: String) -> Vec<TextToken> {
        let tokens = self.tokenizer.tokenize(content);
        tokens
            .iter()
            .enumerate()
            .map(|(idx, tok)| TextToken {
                term: tok.clone(),
                pos: idx,
            })
            .collect()
    }

    pub fn token_filter(&self, mut tokens: Vec<TextToken>) -> Vec<TextToken> {
        for filter in self.token_filters.iter() {
            tokens = filter.filter(tokens);
        }
        tokens
    }

    /// Analyzes raw content and returns a list of tokens
    pub fn analyze(&self, raw_content: String) -> Result<Vec<TextToken>> {
        let content = self.char_filter(raw_content);

        let mut tokens = self.tokenize(content);

        tokens = self.token_filter(tokens);
        Ok(tokens)
    }
}

/// Normalizes a single display word the same way the line pipeline would,
/// so rendered words can be matched against analyzed query terms.
pub fn stem_word(word: &str) -> String {
    let cleaned: String = word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if cleaned.is_empty() {
        return cleaned;
    }
    stem(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mk_tokens(terms: &[&str]) -> Vec<TextToken> {
        terms
            .iter()
            .enumerate()
            .map(|(pos, term)| TextToken {
                term: (*term).to_string(),
                pos,
            })
            .collect()
    }

    fn terms(tokens: Vec<TextToken>) -> Vec<String> {
        tokens.into_iter().map(|t| t.term).collect()
    }

    #[test]
    fn test_alphanumeric_filter() {
        let filter = AlphanumericFilter;
        let out = filter.filter("Out, out, brief candle!".to_string());
        assert_eq!(out, "Out out brief candle");
    }

    #[test]
    fn test_alphanumeric_filter_keeps_digits_and_whitespace() {
        let filter = AlphanumericFilter;
        let out = filter.filter("Act 2,\nScene 3.".to_string());
        assert_eq!(out, "Act 2\nScene 3");
    }

    #[test]
    fn test_stop_word_filter() {
        let filter = StopWordTokenFilter;
        let tokens = mk_tokens(&["the", "lady", "doth", "protest", "too", "much"]);
        let result = terms(filter.filter(tokens));
        assert!(!result.contains(&"the".to_string()));
        assert!(!result.contains(&"too".to_string()));
        assert!(result.contains(&"lady".to_string()));
        assert!(result.contains(&"protest".to_string()));
    }

    #[test]
    fn test_stemmer_folds_inflections() {
        let filter = PorterStemmerTokenFilter;
        let result = terms(filter.filter(mk_tokens(&["loving", "love", "loved"])));
        assert_eq!(result[0], result[1]);
        assert_eq!(result[1], result[2]);
    }

    #[test]
    fn test_stem_word_matches_pipeline() {
        let analyzer = TextAnalyzer::line_pipeline();
        let tokens = analyzer.analyze("Brawling!".to_string()).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].term, stem_word("Brawling!"));
    }

    #[test]
    fn test_line_pipeline_case_insensitive() {
        let analyzer = TextAnalyzer::line_pipeline();
        let a = terms(analyzer.analyze("Thou art".to_string()).unwrap());
        let b = terms(analyzer.analyze("thou ART!".to_string()).unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_query_pipeline_drops_stop_words_before_stemming() {
        let analyzer = TextAnalyzer::query_pipeline();
        let result = terms(
            analyzer
                .analyze("this was outrageous fortune".to_string())
                .unwrap(),
        );
        // "was" stems to "wa" and "this" to "thi"; neither may survive.
        assert_eq!(result, vec![stem_word("outrageous"), stem_word("fortune")]);
        assert!(!result.contains(&"wa".to_string()));
        assert!(!result.contains(&"thi".to_string()));
    }

    #[test]
    fn test_query_pipeline_empties_on_all_stop_words() {
        let analyzer = TextAnalyzer::query_pipeline();
        let tokens = analyzer.analyze("to be or not to be".to_string()).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_line_pipeline_positions() {
        let analyzer = TextAnalyzer::line_pipeline();
        let tokens = analyzer
            .analyze("Once more unto the breach".to_string())
            .unwrap();
        let positions: Vec<usize> = tokens.iter().map(|t| t.pos).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }
}
