//! Text normalization for the lexicon pipeline.
//!
//! Lowercases, strips URL-like runs and punctuation, removes digits,
//! tokenizes and drops stopwords. Total over every input: it never fails and
//! never inserts placeholder tokens.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::stopwords::StopwordSet;
use super::tokenizer::{Tokenizer, WordTokenizer};

// NOTE: expect() is acceptable for compile-time constant patterns.
static NOISE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http\S+|www.\S+|\S+\.com\S+|[^\w\s]").expect("Invalid regex: noise pattern")
});

static DIGIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid regex: digit pattern"));

static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex: whitespace pattern"));

/// Turns raw text into an ordered sequence of sentiment-relevant tokens.
#[derive(Clone)]
pub struct Normalizer {
    stopwords: Arc<StopwordSet>,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl Normalizer {
    pub fn new(stopwords: Arc<StopwordSet>, tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self {
            stopwords,
            tokenizer,
        }
    }

    /// Normalizer backed by the bundled English stopwords and the word tokenizer.
    pub fn english() -> Self {
        Self::new(
            Arc::new(StopwordSet::english()),
            Arc::new(WordTokenizer::new()),
        )
    }

    /// Lowercase, then strip noise and digits and collapse whitespace runs.
    ///
    /// Stripping repeats until the text is stable, since removing digits can
    /// join fragments into a new URL-like run (`ww1wsite` -> `wwwsite`), and
    /// `www.` matches a single separator (`www  good` -> `www good`).
    /// The result is then exactly what re-joining its tokens would produce.
    pub fn clean(&self, text: &str) -> String {
        let mut current = text.to_lowercase();
        loop {
            let without_noise = NOISE_PATTERN.replace_all(&current, "");
            let without_digits = DIGIT_PATTERN.replace_all(&without_noise, "");
            let next = WHITESPACE_PATTERN
                .replace_all(&without_digits, " ")
                .into_owned();
            if next == current {
                return next;
            }
            current = next;
        }
    }

    /// Full normalization: clean, tokenize, drop stopwords. Order and duplicates are preserved.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);
        self.tokenizer
            .tokenize(&cleaned)
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .collect()
    }

    /// Missing input normalizes to an empty sequence.
    pub fn normalize_opt(&self, text: Option<&str>) -> Vec<String> {
        text.map(|t| self.normalize(t)).unwrap_or_default()
    }

    /// Input that is not valid UTF-8 text normalizes to an empty sequence.
    pub fn normalize_bytes(&self, bytes: &[u8]) -> Vec<String> {
        self.normalize_opt(std::str::from_utf8(bytes).ok())
    }
}
