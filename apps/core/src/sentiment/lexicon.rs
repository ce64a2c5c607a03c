//! Lexicon-based polarity scoring.
//!
//! `ValenceLexicon` reads a word -> mean valence table and applies the VADER
//! heuristics: boosters and dampeners, capitalization emphasis, negation in a
//! three-word window, "but" contrast, "least" and punctuation emphasis.

use crate::error::{AppError, ModelFault};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

use super::prediction::PolarityScores;

const BUNDLED_LEXICON: &str = include_str!("../../data/lexicon.tsv");

/// Scores text for positive, negative and neutral polarity.
pub trait LexiconResource: Send + Sync {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, ModelFault>;
}

const BOOSTER_INCREMENT: f64 = 0.293;
const BOOSTER_DECREMENT: f64 = -0.293;
const CAPS_INCREMENT: f64 = 0.733;
const NEGATION_SCALAR: f64 = -0.74;
const COMPOUND_ALPHA: f64 = 15.0;
const EXCLAMATION_INCREMENT: f64 = 0.292;
const MAX_EXCLAMATIONS: usize = 4;
const QUESTION_INCREMENT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;
const BUT_BEFORE_SCALAR: f64 = 0.5;
const BUT_AFTER_SCALAR: f64 = 1.5;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

static BOOSTERS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut boosters = HashMap::new();
    for word in [
        "absolutely", "amazingly", "awfully", "completely", "considerably", "decidedly", "deeply",
        "enormously", "entirely", "especially", "exceptionally", "extremely", "fabulously",
        "flipping", "fricking", "frigging", "fully", "greatly", "hella", "highly", "hugely",
        "incredibly", "intensely", "majorly", "more", "most", "particularly", "purely", "quite",
        "really", "remarkably", "so", "substantially", "thoroughly", "totally", "tremendously",
        "uber", "unbelievably", "unusually", "utterly", "very",
    ] {
        boosters.insert(word, BOOSTER_INCREMENT);
    }
    for word in [
        "almost", "barely", "hardly", "kinda", "kindof", "less", "little", "marginally",
        "occasionally", "partly", "scarcely", "slightly", "somewhat", "sorta", "sortof",
    ] {
        boosters.insert(word, BOOSTER_DECREMENT);
    }
    boosters
});

/// Word -> mean valence table with VADER-style scoring rules.
#[derive(Debug, Clone)]
pub struct ValenceLexicon {
    valences: HashMap<String, f64>,
}

impl ValenceLexicon {
    /// The lexicon compiled into the binary.
    pub fn bundled() -> Result<Self, AppError> {
        Self::parse(BUNDLED_LEXICON)
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| AppError::unreadable("lexicon", path, e))?;
        let lexicon = Self::parse(&data)?;
        info!("Loaded {} lexicon entries from {}", lexicon.len(), path.display());
        Ok(lexicon)
    }

    /// Parse `token<TAB>mean[<TAB>...]` lines. Blank lines and `#` comments are skipped.
    ///
    /// Tokens keep their case, so `:D` and `:d` stay distinct. Each token is
    /// also reachable through its lowercase form unless that form has its own entry.
    pub fn parse(data: &str) -> Result<Self, AppError> {
        let mut valences = HashMap::new();

        for (number, line) in data.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let mut fields = line.split('\t');
            let token = fields.next().unwrap_or_default().trim();
            let mean = fields.next().ok_or_else(|| {
                AppError::ResourceInit(format!("lexicon line {}: missing valence", number + 1))
            })?;
            let mean: f64 = mean.trim().parse().map_err(|e| {
                AppError::ResourceInit(format!(
                    "lexicon line {}: invalid valence '{}': {}",
                    number + 1,
                    mean,
                    e
                ))
            })?;
            if token.is_empty() || !mean.is_finite() {
                return Err(AppError::ResourceInit(format!(
                    "lexicon line {}: malformed entry",
                    number + 1
                )));
            }
            let lowered = token.to_lowercase();
            if lowered != token {
                valences.entry(lowered).or_insert(mean);
            }
            valences.insert(token.to_string(), mean);
        }

        if valences.is_empty() {
            return Err(AppError::ResourceInit(
                "lexicon contains no entries".to_string(),
            ));
        }

        Ok(Self { valences })
    }

    pub fn len(&self) -> usize {
        self.valences.len()
    }

    pub fn valence(&self, word: &str) -> Option<f64> {
        self.valences.get(word).copied()
    }

    fn sentiment_valence(
        &self,
        i: usize,
        words: &[String],
        lowered: &[String],
        caps_differ: bool,
    ) -> f64 {
        let exact = self.valence(&words[i]);
        let Some(mut valence) = exact.or_else(|| self.valence(&lowered[i])) else {
            return 0.0;
        };

        if caps_differ && is_all_caps(&words[i]) {
            valence += CAPS_INCREMENT.copysign(valence);
        }

        for start in 0..3 {
            if i <= start {
                break;
            }
            let j = i - start - 1;
            if self.valences.contains_key(&lowered[j]) {
                continue;
            }
            let mut scalar = booster_scalar(&words[j], &lowered[j], valence, caps_differ);
            if start == 1 {
                scalar *= 0.95;
            } else if start == 2 {
                scalar *= 0.9;
            }
            valence += scalar;
            valence = negation_check(valence, lowered, start, i);
        }

        self.least_check(valence, lowered, i)
    }

    fn least_check(&self, valence: f64, lowered: &[String], i: usize) -> f64 {
        if i == 0 || lowered[i - 1] != "least" || self.valences.contains_key(&lowered[i - 1]) {
            return valence;
        }
        if i > 1 && (lowered[i - 2] == "at" || lowered[i - 2] == "very") {
            return valence;
        }
        valence * NEGATION_SCALAR
    }
}

impl LexiconResource for ValenceLexicon {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, ModelFault> {
        let words = words_and_emoticons(text);
        let lowered: Vec<String> = words.iter().map(|w| w.to_lowercase()).collect();
        let caps_differ = allcap_differential(&words);

        let mut sentiments = Vec::with_capacity(words.len());
        for i in 0..words.len() {
            let is_booster = BOOSTERS.contains_key(lowered[i].as_str());
            let is_kind_of = lowered[i] == "kind" && lowered.get(i + 1).is_some_and(|w| w == "of");
            if is_booster || is_kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.sentiment_valence(i, &words, &lowered, caps_differ));
        }

        but_check(&lowered, &mut sentiments);
        Ok(score_valence(&sentiments, text))
    }
}

/// Whitespace split, punctuation stripped from word edges unless that would
/// leave two characters or fewer (emoticons), single characters dropped.
fn words_and_emoticons(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|w| w.chars().count() > 1)
        .map(|w| {
            let stripped = w.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                w.to_string()
            } else {
                stripped.to_string()
            }
        })
        .collect()
}

fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// True when some, but not all, words are written in capitals.
fn allcap_differential(words: &[String]) -> bool {
    let caps = words.iter().filter(|w| is_all_caps(w)).count();
    caps > 0 && caps < words.len()
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

fn booster_scalar(word: &str, lower: &str, valence: f64, caps_differ: bool) -> f64 {
    let Some(&base) = BOOSTERS.get(lower) else {
        return 0.0;
    };
    let mut scalar = if valence < 0.0 { -base } else { base };
    if caps_differ && is_all_caps(word) {
        scalar += if valence > 0.0 { CAPS_INCREMENT } else { -CAPS_INCREMENT };
    }
    scalar
}

fn negation_check(valence: f64, lowered: &[String], start: usize, i: usize) -> f64 {
    let is_so_or_this = |w: &str| w == "so" || w == "this";
    match start {
        0 => {
            if is_negation(&lowered[i - 1]) {
                return valence * NEGATION_SCALAR;
            }
        }
        1 => {
            if lowered[i - 2] == "never" && is_so_or_this(&lowered[i - 1]) {
                return valence * 1.25;
            }
            if lowered[i - 2] == "without" && lowered[i - 1] == "doubt" {
                return valence;
            }
            if is_negation(&lowered[i - 2]) {
                return valence * NEGATION_SCALAR;
            }
        }
        2 => {
            if lowered[i - 3] == "never"
                && (is_so_or_this(&lowered[i - 2]) || is_so_or_this(&lowered[i - 1]))
            {
                return valence * 1.25;
            }
            if lowered[i - 3] == "without"
                && (lowered[i - 2] == "doubt" || lowered[i - 1] == "doubt")
            {
                return valence;
            }
            if is_negation(&lowered[i - 3]) {
                return valence * NEGATION_SCALAR;
            }
        }
        _ => {}
    }
    valence
}

/// Sentiment before the first "but" is halved, after it is boosted.
fn but_check(lowered: &[String], sentiments: &mut [f64]) {
    let Some(but_index) = lowered.iter().position(|w| w == "but") else {
        return;
    };
    for (index, sentiment) in sentiments.iter_mut().enumerate() {
        if index < but_index {
            *sentiment *= BUT_BEFORE_SCALAR;
        } else if index > but_index {
            *sentiment *= BUT_AFTER_SCALAR;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let exclamation_amp = exclamations as f64 * EXCLAMATION_INCREMENT;

    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_INCREMENT,
        _ => QUESTION_CAP,
    };

    exclamation_amp + question_amp
}

fn normalize_compound(score: f64) -> f64 {
    (score / (score * score + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::neutral();
    }

    let mut total: f64 = sentiments.iter().sum();
    let punct_amp = punctuation_emphasis(text);
    if total > 0.0 {
        total += punct_amp;
    } else if total < 0.0 {
        total -= punct_amp;
    }
    let compound = normalize_compound(total);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0.0;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > f64::abs(neg_sum) {
        pos_sum += punct_amp;
    } else if pos_sum < f64::abs(neg_sum) {
        neg_sum -= punct_amp;
    }

    let denominator = pos_sum + neg_sum.abs() + neu_count;
    PolarityScores {
        pos: round_to((pos_sum / denominator).abs(), 3),
        neg: round_to((neg_sum / denominator).abs(), 3),
        neu: round_to((neu_count / denominator).abs(), 3),
        compound: round_to(compound, 4),
    }
}
