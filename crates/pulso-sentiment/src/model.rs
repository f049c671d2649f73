use std::future::Future;

use crate::error::SentimentError;

/// Class probabilities for one input, indexed like
/// [`pulso_core::Sentiment::CLASS_ORDER`] (negative, neutral, positive).
pub type ClassScores = [f32; 3];

/// A pretrained three-class sentiment model.
///
/// Implementations tokenize and score a whole batch in one call and return
/// one [`ClassScores`] per input, in input order.
pub trait SentimentModel {
    fn predict(
        &self,
        texts: &[&str],
    ) -> impl Future<Output = Result<Vec<ClassScores>, SentimentError>> + Send;
}
