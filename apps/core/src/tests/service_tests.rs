//! Sentiment Service Tests
//!
//! Both prediction paths against scripted resources: validation ordering,
//! label mapping, fault and panic propagation, malformed resource output.

use crate::error::{AppError, ErrorKind, ModelFault};
use crate::sentiment::{
    ClassifierCategory, ClassifierModel, LexiconCategory, LexiconResource, Normalizer,
    PolarityScores, SentimentService,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// --- Mock Components ---

#[derive(Clone)]
enum Script<T> {
    Return(T),
    Fail(String),
    Panic(String),
}

struct MockClassifier {
    script: Script<Vec<i64>>,
    calls: Arc<AtomicUsize>,
    seen: Mutex<Vec<String>>,
}

impl MockClassifier {
    fn new(script: Script<Vec<i64>>) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl ClassifierModel for MockClassifier {
    fn predict(&self, texts: &[String]) -> Result<Vec<i64>, ModelFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().extend(texts.iter().cloned());
        match &self.script {
            Script::Return(labels) => Ok(labels.clone()),
            Script::Fail(msg) => Err(ModelFault::Internal(msg.clone())),
            Script::Panic(msg) => panic!("{}", msg),
        }
    }
}

struct MockLexicon {
    script: Script<PolarityScores>,
    calls: Arc<AtomicUsize>,
    seen: Mutex<Vec<String>>,
}

impl MockLexicon {
    fn new(script: Script<PolarityScores>) -> Self {
        Self {
            script,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl LexiconResource for MockLexicon {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, ModelFault> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(text.to_string());
        match &self.script {
            Script::Return(scores) => Ok(*scores),
            Script::Fail(msg) => Err(ModelFault::Internal(msg.clone())),
            Script::Panic(msg) => panic!("{}", msg),
        }
    }
}

fn scores(pos: f64, neg: f64, neu: f64, compound: f64) -> PolarityScores {
    PolarityScores {
        pos,
        neg,
        neu,
        compound,
    }
}

fn service_with(
    classifier: Arc<MockClassifier>,
    lexicon: Arc<MockLexicon>,
) -> SentimentService {
    SentimentService::new(classifier, lexicon, Normalizer::english())
}

#[cfg(test)]
mod classifier_path_tests {
    use super::*;

    fn setup(script: Script<Vec<i64>>) -> (SentimentService, Arc<MockClassifier>) {
        let classifier = Arc::new(MockClassifier::new(script));
        let lexicon = Arc::new(MockLexicon::new(Script::Return(PolarityScores::neutral())));
        (service_with(classifier.clone(), lexicon), classifier)
    }

    #[test]
    fn test_label_one_is_positive() {
        let (service, _) = setup(Script::Return(vec![1]));
        let prediction = service.predict_classifier("Loved it").unwrap();
        assert_eq!(prediction.category, ClassifierCategory::Positive);
    }

    #[test]
    fn test_other_labels_are_negative() {
        for label in [0, 2, -1] {
            let (service, _) = setup(Script::Return(vec![label]));
            let prediction = service.predict_classifier("Meh").unwrap();
            assert_eq!(
                prediction.category,
                ClassifierCategory::Negative,
                "Expected Negative for label {}",
                label
            );
        }
    }

    #[test]
    fn test_raw_text_reaches_model_unmodified() {
        let (service, classifier) = setup(Script::Return(vec![1]));
        let text = "  The 2nd Act was GREAT!!! see www.example.com  ";
        service.predict_classifier(text).unwrap();
        assert_eq!(*classifier.seen.lock().unwrap(), vec![text.to_string()]);
    }

    #[test]
    fn test_blank_input_never_invokes_model() {
        let (service, classifier) = setup(Script::Return(vec![1]));
        for text in ["", "   ", "\n\t"] {
            let err = service.predict_classifier(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        }
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_model_fault_keeps_message() {
        let (service, classifier) = setup(Script::Fail("weights file truncated".to_string()));
        let err = service.predict_classifier("Great film").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PredictionFailure);
        assert!(err.to_string().contains("weights file truncated"));
        assert_eq!(classifier.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_model_panic_becomes_prediction_failure() {
        let (service, _) = setup(Script::Panic("vectorizer exploded".to_string()));
        let err = service.predict_classifier("Great film").unwrap_err();
        match err {
            AppError::Prediction(ModelFault::Panicked(msg)) => {
                assert_eq!(msg, "vectorizer exploded")
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_wrong_output_count_is_prediction_failure() {
        for labels in [vec![], vec![1, 0]] {
            let expected_actual = labels.len();
            let (service, _) = setup(Script::Return(labels));
            let err = service.predict_classifier("Great film").unwrap_err();
            match err {
                AppError::Prediction(fault) => assert_eq!(
                    fault,
                    ModelFault::Cardinality {
                        expected: 1,
                        actual: expected_actual,
                    }
                ),
                other => panic!("unexpected error: {:?}", other),
            }
        }
    }
}

#[cfg(test)]
mod lexicon_path_tests {
    use super::*;

    fn setup(script: Script<PolarityScores>) -> (SentimentService, Arc<MockLexicon>) {
        let classifier = Arc::new(MockClassifier::new(Script::Return(vec![1])));
        let lexicon = Arc::new(MockLexicon::new(script));
        (service_with(classifier, lexicon.clone()), lexicon)
    }

    #[test]
    fn test_lexicon_receives_normalized_text() {
        let (service, lexicon) = setup(Script::Return(scores(0.6, 0.0, 0.4, 0.7)));
        let prediction = service
            .predict_lexicon("The acting was GREAT, see https://x.io 10/10!")
            .unwrap();
        assert_eq!(*lexicon.seen.lock().unwrap(), vec!["acting great see".to_string()]);
        assert_eq!(prediction.tokens, vec!["acting", "great", "see"]);
        assert_eq!(prediction.category, LexiconCategory::Positive);
    }

    #[test]
    fn test_category_follows_compound() {
        let cases = [
            (0.05, LexiconCategory::Positive),
            (-0.05, LexiconCategory::Negative),
            (0.0, LexiconCategory::Neutral),
            (0.049999, LexiconCategory::Neutral),
        ];
        for (compound, expected) in cases {
            let (service, _) = setup(Script::Return(scores(0.2, 0.2, 0.6, compound)));
            let prediction = service.predict_lexicon("some words here").unwrap();
            assert_eq!(prediction.category, expected, "compound {}", compound);
            assert_eq!(prediction.scores.compound, compound);
        }
    }

    #[test]
    fn test_blank_input_computes_no_scores() {
        let (service, lexicon) = setup(Script::Return(PolarityScores::neutral()));
        let err = service.predict_lexicon("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        let err = service.predict_lexicon(" \r\n ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailure);
        assert_eq!(lexicon.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_input_that_normalizes_to_nothing_is_still_scored() {
        let (service, lexicon) = setup(Script::Return(PolarityScores::neutral()));
        let prediction = service.predict_lexicon("the 42 of it!!").unwrap();
        assert!(prediction.tokens.is_empty());
        assert_eq!(*lexicon.seen.lock().unwrap(), vec![String::new()]);
        assert_eq!(prediction.category, LexiconCategory::Neutral);
    }

    #[test]
    fn test_lexicon_fault_keeps_message() {
        let (service, _) = setup(Script::Fail("lexicon table missing".to_string()));
        let err = service.predict_lexicon("good film").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PredictionFailure);
        assert!(err.to_string().contains("lexicon table missing"));
    }

    #[test]
    fn test_lexicon_panic_becomes_prediction_failure() {
        let (service, _) = setup(Script::Panic("index out of range".to_string()));
        let err = service.predict_lexicon("good film").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PredictionFailure);
        assert!(err.to_string().contains("index out of range"));
    }

    #[test]
    fn test_malformed_scores_are_rejected() {
        for bad in [
            scores(0.5, 0.5, 0.5, 0.1),
            scores(0.0, 0.0, 1.0, 1.5),
            scores(f64::NAN, 0.0, 1.0, 0.0),
            scores(-0.1, 0.1, 1.0, 0.0),
        ] {
            let (service, _) = setup(Script::Return(bad));
            let err = service.predict_lexicon("good film").unwrap_err();
            assert_eq!(err.kind(), ErrorKind::PredictionFailure);
        }
    }
}
