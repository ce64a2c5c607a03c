//! Pre-trained text classifier.
//!
//! The model owns its feature pipeline end to end: callers pass raw review
//! text and get one label per input. `LinearTextPipeline` evaluates an
//! exported bag-of-n-grams vectorizer followed by a linear decision function.

use crate::error::{AppError, ModelFault};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

const BUNDLED_MODEL: &str = include_str!("../../data/review_model.json");

/// A fitted classifier that maps raw texts to integer labels, one per input.
pub trait ClassifierModel: Send + Sync {
    fn predict(&self, texts: &[String]) -> Result<Vec<i64>, ModelFault>;
}

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: token pattern"));

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Row normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// Serialized vectorizer state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequencies, indexed like the vocabulary. Absent means raw term counts.
    #[serde(default)]
    pub idf: Option<Vec<f64>>,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Norm,
}

/// Serialized binary linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifierSpec {
    pub coef: Vec<f64>,
    pub intercept: f64,
    /// `[negative_class, positive_class]`; a decision above zero selects the second.
    pub classes: Vec<i64>,
}

/// On-disk model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineArtifact {
    pub vectorizer: VectorizerSpec,
    pub classifier: LinearClassifierSpec,
}

/// Vectorizer + linear classifier evaluated in-process.
#[derive(Debug, Clone)]
pub struct LinearTextPipeline {
    artifact: PipelineArtifact,
}

impl LinearTextPipeline {
    /// The small demo model compiled into the binary.
    pub fn bundled() -> Result<Self, AppError> {
        Self::from_json(BUNDLED_MODEL)
    }

    pub fn from_path(path: &Path) -> Result<Self, AppError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| AppError::unreadable("model", path, e))?;
        let pipeline = Self::from_json(&data)?;
        info!(
            "Loaded classifier from {} ({} features)",
            path.display(),
            pipeline.feature_count()
        );
        Ok(pipeline)
    }

    pub fn from_json(data: &str) -> Result<Self, AppError> {
        let artifact: PipelineArtifact = serde_json::from_str(data)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: PipelineArtifact) -> Result<Self, AppError> {
        let vectorizer = &artifact.vectorizer;
        let classifier = &artifact.classifier;
        let features = classifier.coef.len();

        let (min_n, max_n) = vectorizer.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(AppError::ResourceInit(format!(
                "invalid ngram_range ({}, {})",
                min_n, max_n
            )));
        }
        if vectorizer.vocabulary.len() != features {
            return Err(AppError::ResourceInit(format!(
                "vocabulary has {} terms but classifier has {} coefficients",
                vectorizer.vocabulary.len(),
                features
            )));
        }
        if let Some(index) = vectorizer.vocabulary.values().find(|&&i| i >= features) {
            return Err(AppError::ResourceInit(format!(
                "vocabulary index {} out of range",
                index
            )));
        }
        if let Some(idf) = &vectorizer.idf {
            if idf.len() != features {
                return Err(AppError::ResourceInit(format!(
                    "idf has {} weights but classifier has {} coefficients",
                    idf.len(),
                    features
                )));
            }
        }
        if classifier.classes.len() != 2 {
            return Err(AppError::ResourceInit(format!(
                "expected 2 classes, found {}",
                classifier.classes.len()
            )));
        }

        Ok(Self { artifact })
    }

    pub fn feature_count(&self) -> usize {
        self.artifact.classifier.coef.len()
    }

    /// Word n-grams in the order the vectorizer was fitted with.
    fn analyze(&self, text: &str) -> Vec<String> {
        let vectorizer = &self.artifact.vectorizer;
        let text = if vectorizer.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        let words: Vec<&str> = TOKEN_PATTERN.find_iter(&text).map(|m| m.as_str()).collect();

        let (min_n, max_n) = vectorizer.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n {
            if n > words.len() {
                break;
            }
            for window in words.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn transform(&self, text: &str) -> HashMap<usize, f64> {
        let vectorizer = &self.artifact.vectorizer;
        let mut features: HashMap<usize, f64> = HashMap::new();
        for term in self.analyze(text) {
            if let Some(&index) = vectorizer.vocabulary.get(&term) {
                *features.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, value) in features.iter_mut() {
            if vectorizer.sublinear_tf {
                *value = 1.0 + value.ln();
            }
            if let Some(idf) = &vectorizer.idf {
                *value *= idf[*index];
            }
        }

        if vectorizer.norm == Norm::L2 {
            let magnitude = features.values().map(|v| v * v).sum::<f64>().sqrt();
            if magnitude > 0.0 {
                for value in features.values_mut() {
                    *value /= magnitude;
                }
            }
        }

        features
    }

    /// Signed distance from the decision boundary.
    pub fn decision_function(&self, text: &str) -> f64 {
        let classifier = &self.artifact.classifier;
        self.transform(text)
            .into_iter()
            .map(|(index, value)| classifier.coef[index] * value)
            .sum::<f64>()
            + classifier.intercept
    }
}

impl ClassifierModel for LinearTextPipeline {
    fn predict(&self, texts: &[String]) -> Result<Vec<i64>, ModelFault> {
        let classes = &self.artifact.classifier.classes;
        Ok(texts
            .iter()
            .map(|text| {
                if self.decision_function(text) > 0.0 {
                    classes[1]
                } else {
                    classes[0]
                }
            })
            .collect())
    }
}
