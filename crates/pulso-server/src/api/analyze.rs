use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use pulso_report::{AnalysisOutcome, AnalysisRequest, AnalyzeResponse, Pipeline, PipelineError};
use pulso_search::RecentSearch;
use pulso_sentiment::SentimentModel;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

/// Something that can run one analysis. [`Pipeline`] in production; tests
/// plug in canned or failing implementations.
pub trait Analyzer: Send + Sync + 'static {
    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisOutcome, PipelineError>> + Send;
}

impl<C, M> Analyzer for Pipeline<C, M>
where
    C: RecentSearch + Send + Sync + 'static,
    M: SentimentModel + Send + Sync + 'static,
{
    fn analyze(
        &self,
        request: AnalysisRequest,
    ) -> impl Future<Output = Result<AnalysisOutcome, PipelineError>> + Send {
        Pipeline::analyze(self, request)
    }
}

/// `POST /analyze`
///
/// Runs hold the state's run lock, so overlapping requests queue instead of
/// sharing the collaborators. The run itself executes on its own task; a
/// panic there becomes a 500 rather than a dropped connection.
pub(super) async fn analyze<A: Analyzer>(
    State(state): State<AppState<A>>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = body.map_err(|rejection| {
        tracing::warn!(request_id = %req_id.0, error = %rejection, "rejected analyze request body");
        ApiError::bad_request(rejection.body_text())
    })?;

    let _run = state.run_lock.lock().await;
    let started = Instant::now();
    let analyzer = Arc::clone(&state.analyzer);

    let outcome = tokio::spawn(async move { analyzer.analyze(request).await })
        .await
        .map_err(|e| PipelineError::Aborted(e.to_string()))
        .and_then(|result| result)
        .map_err(|e| ApiError::from_pipeline(&req_id, &e))?;

    tracing::info!(
        request_id = %req_id.0,
        location = %outcome.request.location,
        posts = outcome.stats.posts_collected,
        skipped_concepts = outcome.stats.skipped.len(),
        elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        "analysis served"
    );

    Ok(Json(AnalyzeResponse::success(
        outcome.report,
        outcome.chart_data,
    )))
}
