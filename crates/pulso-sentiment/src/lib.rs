//! Batch sentiment inference for Pulso.
//!
//! [`SentimentClassifier`] turns post texts into three-class labels using any
//! [`SentimentModel`]; [`TeiSentimentModel`] is the production model, served
//! by a TEI `/predict` endpoint.

pub mod classifier;
pub mod error;
pub mod model;
pub mod tei;

pub use classifier::{BatchSentiments, SentimentClassifier};
pub use error::SentimentError;
pub use model::{ClassScores, SentimentModel};
pub use tei::TeiSentimentModel;
