mod analyze;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use pulso_report::{AnalyzeResponse, PipelineError};
use serde::Serialize;
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use analyze::Analyzer;

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

/// Shared handler state: the analyzer built at startup and the lock that
/// keeps runs from overlapping.
pub struct AppState<A> {
    pub analyzer: Arc<A>,
    run_lock: Arc<Mutex<()>>,
}

impl<A> AppState<A> {
    pub fn new(analyzer: A) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            run_lock: Arc::new(Mutex::new(())),
        }
    }
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            run_lock: Arc::clone(&self.run_lock),
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub(super) fn from_pipeline(req_id: &RequestId, error: &PipelineError) -> Self {
        let status = match error {
            PipelineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            PipelineError::Aborted(_)
            | PipelineError::SearchSetup(_)
            | PipelineError::SentimentSetup(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(request_id = %req_id.0, error = %error, "analysis failed");
        } else {
            tracing::warn!(request_id = %req_id.0, error = %error, "analysis request rejected");
        }
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(AnalyzeResponse::error(self.message))).into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

pub fn build_app<A: Analyzer>(state: AppState<A>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", post(analyze::analyze::<A>))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use pulso_core::Concept;
    use pulso_report::{
        AnalysisOutcome, AnalysisRequest, Classification, Pipeline, RunStats, NO_ANALYSIS, NO_PLAN,
    };
    use pulso_search::{BackoffPolicy, RecentSearch, SearchError, SearchGateway, SearchPage};
    use pulso_sentiment::{ClassScores, SentimentClassifier, SentimentError, SentimentModel};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    struct EmptySearch;

    impl RecentSearch for EmptySearch {
        async fn search_recent(&self, _query: &str, _max: u32) -> Result<SearchPage, SearchError> {
            Ok(SearchPage::default())
        }
    }

    struct NeutralModel;

    impl SentimentModel for NeutralModel {
        async fn predict(&self, texts: &[&str]) -> Result<Vec<ClassScores>, SentimentError> {
            Ok(vec![[0.0, 1.0, 0.0]; texts.len()])
        }
    }

    fn empty_pipeline() -> Pipeline<EmptySearch, NeutralModel> {
        Pipeline::new(
            SearchGateway::new(EmptySearch, 10, BackoffPolicy::from_secs(3, 0)),
            SentimentClassifier::new(NeutralModel),
            "Bogotá",
        )
    }

    struct PanickingAnalyzer;

    impl Analyzer for PanickingAnalyzer {
        async fn analyze(
            &self,
            _request: AnalysisRequest,
        ) -> Result<AnalysisOutcome, PipelineError> {
            panic!("sentiment model state corrupted")
        }
    }

    /// Sleeps, then records how many runs were in flight at once.
    struct SlowAnalyzer {
        in_flight: std::sync::atomic::AtomicUsize,
        max_seen: std::sync::atomic::AtomicUsize,
    }

    impl Analyzer for SlowAnalyzer {
        async fn analyze(
            &self,
            request: AnalysisRequest,
        ) -> Result<AnalysisOutcome, PipelineError> {
            use std::sync::atomic::Ordering;

            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_seen.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let request = request.resolve("Bogotá")?;
            let classification = Classification::default();
            let (report, chart_data) =
                pulso_report::synthesize(&classification, &request.candidate_name, &request.location);
            Ok(AnalysisOutcome {
                request,
                classification,
                chart_data,
                report,
                stats: RunStats::default(),
            })
        }
    }

    fn post_analyze(body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/analyze")
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&body).expect("json parse")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = build_app(AppState::new(empty_pipeline()));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn analyze_without_posts_succeeds_with_no_data_report() {
        let app = build_app(AppState::new(empty_pipeline()));
        let body = json!({"location": "Medellín", "candidate_name": "Ana Pérez", "politician": null});
        let response = app
            .oneshot(post_analyze(body.to_string()))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let json = json_body(response).await;
        assert_eq!(json["status"], "success");
        assert_eq!(json["report"]["analisis"], NO_ANALYSIS);
        assert_eq!(json["report"]["plan"], NO_PLAN);
        assert_eq!(json["report"]["chart_config"]["type"], "bar");
        assert_eq!(json["chart_data"]["labels"], json!([]));
        assert!(json.get("message").is_none());
        assert!(json["report"]["discurso"]
            .as_str()
            .expect("speech")
            .contains(&format!("Respecto a {}:", Concept::Seguridad)));
    }

    #[tokio::test]
    async fn empty_object_uses_defaults() {
        let app = build_app(AppState::new(empty_pipeline()));
        let response = app.oneshot(post_analyze("{}")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let speech = json["report"]["discurso"].as_str().expect("speech");
        assert!(speech.starts_with("Queridos ciudadanos de Bogotá, soy [Nombre del Candidato],"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_structured_400() {
        let app = build_app(AppState::new(empty_pipeline()));
        let response = app
            .oneshot(post_analyze("{\"location\": "))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["message"].as_str().is_some_and(|m| !m.is_empty()));
        assert!(json.get("report").is_none());
    }

    #[tokio::test]
    async fn overlong_location_is_rejected() {
        let app = build_app(AppState::new(empty_pipeline()));
        let body = json!({"location": "x".repeat(500)});
        let response = app
            .oneshot(post_analyze(body.to_string()))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["status"], "error");
    }

    #[tokio::test]
    async fn panicking_run_becomes_500() {
        let app = build_app(AppState::new(PanickingAnalyzer));
        let response = app.oneshot(post_analyze("{}")).await.expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert_eq!(json["status"], "error");
        assert!(json["message"]
            .as_str()
            .expect("message")
            .starts_with("analysis run failed"));
    }

    #[tokio::test]
    async fn concurrent_requests_run_one_at_a_time() {
        let analyzer = SlowAnalyzer {
            in_flight: std::sync::atomic::AtomicUsize::new(0),
            max_seen: std::sync::atomic::AtomicUsize::new(0),
        };
        let state = AppState::new(analyzer);
        let app = build_app(state.clone());

        let (a, b) = tokio::join!(
            app.clone().oneshot(post_analyze("{}")),
            app.oneshot(post_analyze("{}")),
        );
        assert_eq!(a.expect("response").status(), StatusCode::OK);
        assert_eq!(b.expect("response").status(), StatusCode::OK);
        assert_eq!(
            state
                .analyzer
                .max_seen
                .load(std::sync::atomic::Ordering::SeqCst),
            1
        );
    }

    #[test]
    fn invalid_request_maps_to_400() {
        let err = PipelineError::InvalidRequest("bad".to_owned());
        let response = ApiError::from_pipeline(&RequestId("r-1".to_owned()), &err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
