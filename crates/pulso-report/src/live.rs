//! The production pipeline: X API recent search plus a TEI-served model.

use pulso_core::AppConfig;
use pulso_search::{BackoffPolicy, SearchGateway, XApiClient};
use pulso_sentiment::{SentimentClassifier, TeiSentimentModel};

use crate::error::PipelineError;
use crate::pipeline::Pipeline;

pub type LivePipeline = Pipeline<XApiClient, TeiSentimentModel>;

/// Builds the collaborators described by `config`. Call once at startup.
///
/// # Errors
///
/// Returns [`PipelineError::SearchSetup`] or [`PipelineError::SentimentSetup`]
/// if an HTTP client cannot be built.
pub fn build_live_pipeline(config: &AppConfig) -> Result<LivePipeline, PipelineError> {
    let client = XApiClient::with_base_url(
        &config.x_bearer_token,
        config.search_timeout_secs,
        &config.x_base_url,
    )
    .map_err(PipelineError::SearchSetup)?;
    let backoff =
        BackoffPolicy::from_secs(config.search_max_attempts, config.search_backoff_base_secs);
    let search = SearchGateway::new(client, config.search_max_results, backoff);

    let model = TeiSentimentModel::new(&config.sentiment_url, config.sentiment_timeout_secs)
        .map_err(PipelineError::SentimentSetup)?;

    tracing::info!(
        search_url = %config.x_base_url,
        sentiment_url = %config.sentiment_url,
        max_results = config.search_max_results,
        max_attempts = config.search_max_attempts,
        "pipeline collaborators ready"
    );

    Ok(Pipeline::new(
        search,
        SentimentClassifier::new(model),
        config.default_location.clone(),
    ))
}
