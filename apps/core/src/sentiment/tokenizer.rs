//! Word tokenization.
//!
//! Splits on Unicode word boundaries (UAX #29) and then separates English
//! contractions the way Treebank-style tokenizers do: `don't` becomes
//! `do` + `n't`, `she's` becomes `she` + `'s`, `cannot` becomes `can` + `not`.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into word tokens.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Fused words and the byte offset where they split.
const FUSED_WORDS: &[(&str, usize)] = &[
    ("cannot", 3),
    ("gimme", 3),
    ("gonna", 3),
    ("gotta", 3),
    ("lemme", 3),
    ("wanna", 3),
];

/// Clitics split off the end of a word, apostrophe included.
const CLITICS: &[&str] = &["n't", "'s", "'m", "'d", "'re", "'ve", "'ll"];

/// Default tokenizer: Unicode word segmentation plus contraction splitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl WordTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn split_word(word: &str, out: &mut Vec<String>) {
        let word = word.replace('\u{2019}', "'");
        let lower = word.to_lowercase();

        if let Some(&(_, at)) = FUSED_WORDS.iter().find(|(fused, _)| *fused == lower) {
            if word.is_char_boundary(at) {
                out.push(word[..at].to_string());
                out.push(word[at..].to_string());
                return;
            }
        }

        for clitic in CLITICS {
            if lower.len() > clitic.len() && lower.ends_with(clitic) {
                let cut = word.len() - clitic.len();
                if cut > 0 && word.is_char_boundary(cut) {
                    out.push(word[..cut].to_string());
                    out.push(word[cut..].to_string());
                    return;
                }
            }
        }

        out.push(word);
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for word in text.unicode_words() {
            Self::split_word(word, &mut tokens);
        }
        tokens
    }
}
