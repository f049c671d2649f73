use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("inference server returned status {status}: {message}")]
    Inference { status: u16, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model returned {got} predictions for {expected} inputs")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("model returned unknown class label '{0}'")]
    UnknownLabel(String),

    #[error("invalid inference configuration: {0}")]
    Config(String),
}
