//! English stopword set.
//!
//! The bundled list is the NLTK English corpus. A replacement list can be
//! loaded from a file with one word per line (`#` comments allowed).

use crate::error::AppError;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

const BUNDLED_STOPWORDS: &str = include_str!("../../data/stopwords_en.txt");

/// Immutable set of words dropped from normalized token sequences.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// The bundled English stopword list.
    pub fn english() -> Self {
        Self::parse(BUNDLED_STOPWORDS)
    }

    /// Load a stopword list from disk. An unreadable or empty file is a startup failure.
    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| AppError::unreadable("stopword file", path, e))?;

        let set = Self::parse(&data);
        if set.is_empty() {
            return Err(AppError::ResourceInit(format!(
                "stopword file {} contains no entries",
                path.display()
            )));
        }

        info!("Loaded {} stopwords from {}", set.len(), path.display());
        Ok(set)
    }

    /// Parse a newline-separated list, skipping blank lines and `#` comments.
    pub fn parse(data: &str) -> Self {
        let words = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.to_lowercase())
            .collect();
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}
