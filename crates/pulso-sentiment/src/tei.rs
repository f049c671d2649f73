//! TEI (Text Embeddings Inference) client for sequence-classification models.
//!
//! Serves a three-class Spanish sentiment model (e.g.
//! `finiteautomata/beto-sentiment-analysis`) through TEI's `/predict` route.

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::model::{ClassScores, SentimentModel};

/// TEI HTTP client for `/predict`.
pub struct TeiSentimentModel {
    client: reqwest::Client,
    url: String,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    /// One single-sequence batch entry per text.
    inputs: Vec<[&'a str; 1]>,
    truncate: bool,
    raw_scores: bool,
}

#[derive(Debug, Deserialize)]
struct Prediction {
    score: f32,
    label: String,
}

/// Maps a model label to its class index.
///
/// Accepts the `NEG`/`NEU`/`POS` family (any case, any suffix) and the
/// generic `LABEL_0`..`LABEL_2` names.
fn class_index(label: &str) -> Option<usize> {
    let upper = label.to_ascii_uppercase();
    if upper.starts_with("NEG") {
        Some(0)
    } else if upper.starts_with("NEU") {
        Some(1)
    } else if upper.starts_with("POS") {
        Some(2)
    } else {
        upper
            .strip_prefix("LABEL_")
            .and_then(|n| n.parse::<usize>().ok())
            .filter(|n| *n < 3)
    }
}

fn to_class_scores(predictions: Vec<Prediction>) -> Result<ClassScores, SentimentError> {
    let mut scores = [0.0_f32; 3];
    for prediction in predictions {
        let index = class_index(&prediction.label)
            .ok_or_else(|| SentimentError::UnknownLabel(prediction.label.clone()))?;
        scores[index] = prediction.score;
    }
    Ok(scores)
}

impl TeiSentimentModel {
    /// # Errors
    ///
    /// Returns [`SentimentError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(tei_url: &str, timeout_secs: u64) -> Result<Self, SentimentError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            url: format!("{}/predict", tei_url.trim_end_matches('/')),
        })
    }

    async fn predict_batch(&self, texts: &[&str]) -> Result<Vec<ClassScores>, SentimentError> {
        let request = PredictRequest {
            inputs: texts.iter().map(|t| [*t]).collect(),
            truncate: true,
            raw_scores: false,
        };
        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(SentimentError::Inference {
                status: status.as_u16(),
                message: body.chars().take(300).collect(),
            });
        }

        let batch: Vec<Vec<Prediction>> =
            serde_json::from_str(&body).map_err(|e| SentimentError::Deserialize {
                context: "TEI /predict".to_owned(),
                source: e,
            })?;

        if batch.len() != texts.len() {
            return Err(SentimentError::ShapeMismatch {
                expected: texts.len(),
                got: batch.len(),
            });
        }

        batch.into_iter().map(to_class_scores).collect()
    }
}

impl SentimentModel for TeiSentimentModel {
    fn predict(
        &self,
        texts: &[&str],
    ) -> impl Future<Output = Result<Vec<ClassScores>, SentimentError>> + Send {
        self.predict_batch(texts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_index_accepts_beto_labels() {
        assert_eq!(class_index("NEG"), Some(0));
        assert_eq!(class_index("NEU"), Some(1));
        assert_eq!(class_index("POS"), Some(2));
        assert_eq!(class_index("positive"), Some(2));
    }

    #[test]
    fn class_index_accepts_generic_labels() {
        assert_eq!(class_index("LABEL_0"), Some(0));
        assert_eq!(class_index("label_2"), Some(2));
        assert_eq!(class_index("LABEL_3"), None);
        assert_eq!(class_index("joy"), None);
    }

    #[test]
    fn scores_are_placed_by_label_not_position() {
        let predictions = vec![
            Prediction {
                score: 0.7,
                label: "POS".to_owned(),
            },
            Prediction {
                score: 0.2,
                label: "NEU".to_owned(),
            },
            Prediction {
                score: 0.1,
                label: "NEG".to_owned(),
            },
        ];
        assert_eq!(to_class_scores(predictions).unwrap(), [0.1, 0.2, 0.7]);
    }

    #[test]
    fn request_wraps_each_text_as_single_sequence() {
        let request = PredictRequest {
            inputs: vec![["hola"], ["chao"]],
            truncate: true,
            raw_scores: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["inputs"], serde_json::json!([["hola"], ["chao"]]));
        assert_eq!(json["truncate"], true);
    }

    #[test]
    fn predict_url_has_single_slash() {
        let model = TeiSentimentModel::new("http://tei:8080/", 5).unwrap();
        assert_eq!(model.url, "http://tei:8080/predict");
    }
}
