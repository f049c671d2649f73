//! Batch sentiment labelling with a batch-granular neutral fallback.

use pulso_core::Sentiment;

use crate::model::{ClassScores, SentimentModel};

/// Labels for one batch, plus why the batch was defaulted (if it was).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSentiments {
    pub labels: Vec<Sentiment>,
    /// Set when inference failed and every label was defaulted to neutral.
    pub fallback_reason: Option<String>,
}

impl BatchSentiments {
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }

    fn neutral(len: usize, reason: String) -> Self {
        Self {
            labels: vec![Sentiment::Neutral; len],
            fallback_reason: Some(reason),
        }
    }
}

/// Wraps a [`SentimentModel`] for batch inference.
///
/// Output always has the same length and order as the input. Inference
/// failures are logged and never propagated: the whole batch becomes
/// [`Sentiment::Neutral`].
pub struct SentimentClassifier<M> {
    model: M,
}

impl<M: SentimentModel + Sync> SentimentClassifier<M> {
    #[must_use]
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// One label per text. Empty input returns empty output without calling the model.
    pub async fn classify(&self, texts: &[&str]) -> Vec<Sentiment> {
        self.classify_batch(texts).await.labels
    }

    /// Like [`SentimentClassifier::classify`], also reporting whether the
    /// batch fell back to neutral.
    pub async fn classify_batch(&self, texts: &[&str]) -> BatchSentiments {
        if texts.is_empty() {
            return BatchSentiments {
                labels: Vec::new(),
                fallback_reason: None,
            };
        }

        match self.model.predict(texts).await {
            Ok(scores) if scores.len() == texts.len() => BatchSentiments {
                labels: scores.iter().map(strongest_class).collect(),
                fallback_reason: None,
            },
            Ok(scores) => {
                let reason = format!(
                    "model returned {} predictions for {} inputs",
                    scores.len(),
                    texts.len()
                );
                tracing::error!(batch = texts.len(), %reason, "sentiment inference failed; defaulting batch to neutral");
                BatchSentiments::neutral(texts.len(), reason)
            }
            Err(e) => {
                tracing::error!(batch = texts.len(), error = %e, "sentiment inference failed; defaulting batch to neutral");
                BatchSentiments::neutral(texts.len(), e.to_string())
            }
        }
    }
}

/// Highest-probability class; ties go to the lower class index.
fn strongest_class(scores: &ClassScores) -> Sentiment {
    let mut best = 0;
    for (index, score) in scores.iter().enumerate().skip(1) {
        if score.total_cmp(&scores[best]).is_gt() {
            best = index;
        }
    }
    Sentiment::from_class_index(best).unwrap_or(Sentiment::Neutral)
}
