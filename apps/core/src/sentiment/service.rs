//! Sentiment Service - entry point for both prediction paths.
//!
//! - Classifier path: raw text -> model label -> binary category.
//!   Text goes to the model verbatim; the model's own feature pipeline is the
//!   only normalization on this path.
//! - Lexicon path: raw text -> normalizer -> polarity scores -> ternary category.
//!
//! Empty or whitespace-only input is rejected before any resource is touched.
//! Resource faults, including panics, surface once as `PredictionFailure`.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, ModelFault};

use super::categorizer::{categorize, ClassifierCategory};
use super::classifier::ClassifierModel;
use super::lexicon::LexiconResource;
use super::normalizer::Normalizer;
use super::prediction::{ClassifierPrediction, LexiconPrediction, PolarityScores};

/// Shared, read-only prediction service.
#[derive(Clone)]
pub struct SentimentService {
    classifier: Arc<dyn ClassifierModel>,
    lexicon: Arc<dyn LexiconResource>,
    normalizer: Normalizer,
}

impl SentimentService {
    pub fn new(
        classifier: Arc<dyn ClassifierModel>,
        lexicon: Arc<dyn LexiconResource>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            classifier,
            lexicon,
            normalizer,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Classify raw review text as Positive or Negative.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn predict_classifier(&self, text: &str) -> Result<ClassifierPrediction, AppError> {
        ensure_not_blank(text)?;

        let input = [text.to_string()];
        let labels = guarded(|| self.classifier.predict(&input)).inspect_err(|e| {
            warn!("Classifier fault: {}", e);
        })?;

        let label = match labels.as_slice() {
            [label] => *label,
            other => {
                warn!("Classifier returned {} labels for one input", other.len());
                return Err(ModelFault::Cardinality {
                    expected: 1,
                    actual: other.len(),
                }
                .into());
            }
        };

        let category = ClassifierCategory::from_label(label);
        info!(label, %category, "Classifier prediction");
        Ok(ClassifierPrediction { category })
    }

    /// Normalize, score and categorize text on the lexicon path.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn predict_lexicon(&self, text: &str) -> Result<LexiconPrediction, AppError> {
        ensure_not_blank(text)?;

        let tokens = self.normalizer.normalize(text);
        debug!(token_count = tokens.len(), "Normalized input");

        let scores = self.score(&tokens)?;
        let category = categorize(&scores);
        info!(compound = scores.compound, %category, "Lexicon prediction");

        Ok(LexiconPrediction {
            category,
            scores,
            tokens,
        })
    }

    /// Score a normalized token sequence. An empty sequence is passed through;
    /// the resource decides what empty text scores.
    pub fn score(&self, tokens: &[String]) -> Result<PolarityScores, AppError> {
        let text = tokens.join(" ");
        let scores = guarded(|| self.lexicon.polarity_scores(&text)).inspect_err(|e| {
            warn!("Lexicon fault: {}", e);
        })?;

        scores.check().map_err(|reason| {
            warn!("Lexicon returned malformed scores: {}", reason);
            ModelFault::Internal(format!("malformed polarity scores: {}", reason))
        })?;

        Ok(scores)
    }
}

/// Reject missing, empty or whitespace-only input.
pub fn ensure_not_blank(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "text must not be empty or whitespace-only".to_string(),
        ));
    }
    Ok(())
}

/// Run an opaque resource call, turning a panic into a `ModelFault`.
fn guarded<T>(call: impl FnOnce() -> Result<T, ModelFault>) -> Result<T, ModelFault> {
    match panic::catch_unwind(AssertUnwindSafe(call)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(ModelFault::Panicked(message))
        }
    }
}
