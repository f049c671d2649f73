//! Domain types and configuration shared by every Pulso crate.
//!
//! Holds the immutable concept tables, sentiment labels and tallies, the
//! post record produced by search + inference, and the environment-driven
//! [`AppConfig`].

pub mod app_config;
pub mod concepts;
pub mod config;
pub mod posts;
pub mod sentiment;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use concepts::{BucketKey, Concept, ConceptTemplates, LOCATION_PLACEHOLDER};
pub use config::{load_app_config, load_app_config_from_env};
pub use posts::{Post, PostMeta};
pub use sentiment::{Sentiment, SentimentCounts};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
