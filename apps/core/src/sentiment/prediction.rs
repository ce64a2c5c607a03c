//! Prediction values returned by the sentiment service.

use serde::{Deserialize, Serialize};

use super::categorizer::{ClassifierCategory, LexiconCategory};

/// Four polarity scores produced together by the lexicon resource.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Proportion of positive sentiment (0.0 - 1.0)
    pub pos: f64,
    /// Proportion of negative sentiment (0.0 - 1.0)
    pub neg: f64,
    /// Proportion of neutral text (0.0 - 1.0)
    pub neu: f64,
    /// Normalized aggregate polarity (-1.0 - 1.0)
    pub compound: f64,
}

/// Tolerance on `pos + neg + neu`, which is rounded per field.
const PROPORTION_SUM_TOLERANCE: f64 = 0.01;

impl PolarityScores {
    /// Scores for text with nothing to score.
    pub fn neutral() -> Self {
        Self {
            pos: 0.0,
            neg: 0.0,
            neu: 1.0,
            compound: 0.0,
        }
    }

    /// Check the field ranges and that the proportions sum to about one.
    pub fn check(&self) -> Result<(), String> {
        for (name, value) in [("pos", self.pos), ("neg", self.neg), ("neu", self.neu)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} score {} outside [0, 1]", name, value));
            }
        }
        if !(-1.0..=1.0).contains(&self.compound) {
            return Err(format!("compound score {} outside [-1, 1]", self.compound));
        }
        let sum = self.pos + self.neg + self.neu;
        if (sum - 1.0).abs() > PROPORTION_SUM_TOLERANCE {
            return Err(format!("proportions sum to {} instead of 1", sum));
        }
        Ok(())
    }
}

/// Outcome of the classifier path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassifierPrediction {
    pub category: ClassifierCategory,
}

/// Outcome of the lexicon path, with the scores it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LexiconPrediction {
    pub category: LexiconCategory,
    pub scores: PolarityScores,
    /// Tokens the scores were computed from
    pub tokens: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_well_formed() {
        assert!(PolarityScores::neutral().check().is_ok());
    }

    #[test]
    fn test_check_rejects_out_of_range() {
        let scores = PolarityScores {
            pos: 1.2,
            neg: 0.0,
            neu: 0.0,
            compound: 0.5,
        };
        assert!(scores.check().is_err());

        let scores = PolarityScores {
            pos: 0.5,
            neg: 0.0,
            neu: 0.5,
            compound: 1.5,
        };
        assert!(scores.check().is_err());
    }

    #[test]
    fn test_check_rejects_nan() {
        let scores = PolarityScores {
            pos: f64::NAN,
            neg: 0.0,
            neu: 1.0,
            compound: 0.0,
        };
        assert!(scores.check().is_err());
    }

    #[test]
    fn test_check_tolerates_rounding() {
        let scores = PolarityScores {
            pos: 0.333,
            neg: 0.333,
            neu: 0.333,
            compound: 0.0,
        };
        assert!(scores.check().is_ok());
    }

    #[test]
    fn test_check_rejects_bad_sum() {
        let scores = PolarityScores {
            pos: 0.2,
            neg: 0.2,
            neu: 0.2,
            compound: 0.0,
        };
        assert!(scores.check().is_err());
    }
}
