//! Startup initialization.
//!
//! Every resource is loaded exactly once here. The resulting `AppContext` is
//! immutable and cloned cheaply into request handlers.

use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::AppError;
use crate::sentiment::{
    ClassifierModel, LexiconResource, LinearTextPipeline, Normalizer, SentimentService,
    StopwordSet, ValenceLexicon, WordTokenizer,
};

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub service: Arc<SentimentService>,
}

impl AppContext {
    pub fn new(service: SentimentService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Load the model, lexicon and stopwords named by `config`, or the bundled ones.
    ///
    /// Any failure is a `ResourceInitializationFailure`; the caller must not serve
    /// requests without a context.
    pub fn initialize(config: &AppConfig) -> Result<Self, AppError> {
        let start = Instant::now();

        let stopwords = match &config.stopwords_path {
            Some(path) => {
                info!("Loading stopwords from {}", path.display());
                StopwordSet::from_path(path)
            }
            None => {
                info!("Using bundled English stopwords");
                Ok(StopwordSet::english())
            }
        }
        .map_err(as_init_failure)?;

        let lexicon = match &config.lexicon_path {
            Some(path) => {
                info!("Loading lexicon from {}", path.display());
                ValenceLexicon::from_path(path)
            }
            None => {
                info!("Using bundled valence lexicon");
                ValenceLexicon::bundled()
            }
        }
        .map_err(as_init_failure)?;

        let classifier = match &config.model_path {
            Some(path) => {
                info!("Loading classifier from {}", path.display());
                LinearTextPipeline::from_path(path)
            }
            None => {
                info!("Using bundled demo classifier");
                LinearTextPipeline::bundled()
            }
        }
        .map_err(as_init_failure)?;

        let normalizer = Normalizer::new(Arc::new(stopwords), Arc::new(WordTokenizer::new()));
        let classifier: Arc<dyn ClassifierModel> = Arc::new(classifier);
        let lexicon: Arc<dyn LexiconResource> = Arc::new(lexicon);

        info!("Resources initialized in {} ms", start.elapsed().as_millis());
        Ok(Self::new(SentimentService::new(classifier, lexicon, normalizer)))
    }
}

fn as_init_failure(err: AppError) -> AppError {
    let err = match err {
        AppError::ResourceInit(_) => err,
        other => AppError::ResourceInit(other.to_string()),
    };
    error!("{}", err);
    err
}
