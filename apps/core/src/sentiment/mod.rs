//! # Sentiment Module
//!
//! Text normalization and dual-strategy sentiment scoring.
//!
//! ## Components
//! - `normalizer`: lowercasing, noise stripping, tokenization, stopword removal
//! - `tokenizer`: Unicode word segmentation with contraction splitting
//! - `stopwords`: English stopword set
//! - `lexicon`: polarity scoring resource (VADER-style valence lexicon)
//! - `classifier`: pre-trained text classifier (linear pipeline artifact)
//! - `categorizer`: compound thresholds and label mapping
//! - `prediction`: output data structures
//! - `service`: orchestrates both prediction paths

pub mod categorizer;
pub mod classifier;
pub mod lexicon;
pub mod normalizer;
pub mod prediction;
pub mod service;
pub mod stopwords;
pub mod tokenizer;

pub use categorizer::{categorize, ClassifierCategory, LexiconCategory};
pub use classifier::{ClassifierModel, LinearTextPipeline};
pub use lexicon::{LexiconResource, ValenceLexicon};
pub use normalizer::Normalizer;
pub use prediction::{ClassifierPrediction, LexiconPrediction, PolarityScores};
pub use service::SentimentService;
pub use stopwords::StopwordSet;
pub use tokenizer::{Tokenizer, WordTokenizer};
