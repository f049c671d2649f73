use pulso_search::SearchError;
use pulso_sentiment::SentimentError;
use thiserror::Error;

/// Failures that end a whole analysis run, or prevent one from starting.
///
/// Per-concept search failures and per-batch inference failures never
/// become a `PipelineError`; they are logged and the run carries on.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid analysis request: {0}")]
    InvalidRequest(String),

    /// The run stopped unexpectedly (panic or cancellation).
    #[error("analysis run failed: {0}")]
    Aborted(String),

    #[error("search client setup failed: {0}")]
    SearchSetup(#[source] SearchError),

    #[error("sentiment model setup failed: {0}")]
    SentimentSetup(#[source] SentimentError),
}
