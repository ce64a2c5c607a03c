//! Mapping raw scorer output to user-facing categories.
//!
//! The lexicon path is ternary and thresholded on the compound score; the
//! classifier path is binary and taken from the model label. The two label
//! spaces are separate types on purpose.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::prediction::PolarityScores;

/// Compound scores at or above this are positive.
pub const POSITIVE_THRESHOLD: f64 = 0.05;
/// Compound scores at or below this are negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Model label that means "positive"; every other label is negative.
pub const POSITIVE_LABEL: i64 = 1;

/// Ternary category produced by the lexicon path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LexiconCategory {
    Positive,
    Negative,
    Neutral,
}

impl LexiconCategory {
    pub fn label(&self) -> &'static str {
        match self {
            LexiconCategory::Positive => "Positive",
            LexiconCategory::Negative => "Negative",
            LexiconCategory::Neutral => "Neutral",
        }
    }
}

impl fmt::Display for LexiconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Binary category produced by the classifier path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassifierCategory {
    Positive,
    Negative,
}

impl ClassifierCategory {
    /// Only the literal positive label maps to `Positive`.
    pub fn from_label(label: i64) -> Self {
        if label == POSITIVE_LABEL {
            ClassifierCategory::Positive
        } else {
            ClassifierCategory::Negative
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ClassifierCategory::Positive => "Positive",
            ClassifierCategory::Negative => "Negative",
        }
    }
}

impl fmt::Display for ClassifierCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Categorize on `compound` alone. NaN falls through to `Neutral`.
pub fn categorize(scores: &PolarityScores) -> LexiconCategory {
    if scores.compound >= POSITIVE_THRESHOLD {
        LexiconCategory::Positive
    } else if scores.compound <= NEGATIVE_THRESHOLD {
        LexiconCategory::Negative
    } else {
        LexiconCategory::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_compound(compound: f64) -> PolarityScores {
        PolarityScores {
            pos: 0.0,
            neg: 0.0,
            neu: 1.0,
            compound,
        }
    }

    #[test]
    fn test_thresholds_inclusive() {
        assert_eq!(categorize(&with_compound(0.05)), LexiconCategory::Positive);
        assert_eq!(categorize(&with_compound(-0.05)), LexiconCategory::Negative);
        assert_eq!(categorize(&with_compound(0.0)), LexiconCategory::Neutral);
    }

    #[test]
    fn test_gap_is_neutral() {
        assert_eq!(categorize(&with_compound(0.049999)), LexiconCategory::Neutral);
        assert_eq!(categorize(&with_compound(-0.049999)), LexiconCategory::Neutral);
    }

    #[test]
    fn test_extremes() {
        assert_eq!(categorize(&with_compound(1.0)), LexiconCategory::Positive);
        assert_eq!(categorize(&with_compound(-1.0)), LexiconCategory::Negative);
    }

    #[test]
    fn test_only_compound_matters() {
        let scores = PolarityScores {
            pos: 0.0,
            neg: 1.0,
            neu: 0.0,
            compound: 0.3,
        };
        assert_eq!(categorize(&scores), LexiconCategory::Positive);
    }

    #[test]
    fn test_nan_is_neutral() {
        assert_eq!(categorize(&with_compound(f64::NAN)), LexiconCategory::Neutral);
    }

    #[test]
    fn test_classifier_label_mapping() {
        assert_eq!(ClassifierCategory::from_label(1), ClassifierCategory::Positive);
        assert_eq!(ClassifierCategory::from_label(0), ClassifierCategory::Negative);
        assert_eq!(ClassifierCategory::from_label(2), ClassifierCategory::Negative);
        assert_eq!(ClassifierCategory::from_label(-1), ClassifierCategory::Negative);
    }

    #[test]
    fn test_serialized_labels() {
        assert_eq!(
            serde_json::to_string(&ClassifierCategory::Positive).unwrap(),
            "\"Positive\""
        );
        assert_eq!(
            serde_json::to_string(&LexiconCategory::Neutral).unwrap(),
            "\"Neutral\""
        );
        assert_eq!(LexiconCategory::Negative.to_string(), "Negative");
    }
}
