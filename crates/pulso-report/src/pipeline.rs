//! End-to-end analysis run: search, sentiment, classification, plan, report.

use pulso_core::{Concept, Post, Sentiment};
use pulso_search::{RecentSearch, SearchErrorKind, SearchGateway};
use pulso_sentiment::{SentimentClassifier, SentimentModel};
use serde::Deserialize;

use crate::chart::{chart_data, ChartData};
use crate::classify::{classify_posts, Classification};
use crate::error::PipelineError;
use crate::plan::build_plan;
use crate::report::{compose_report, Report, ReportInputs};

/// Used when the request leaves `candidate_name` blank.
pub const CANDIDATE_PLACEHOLDER: &str = "[Nombre del Candidato]";
/// Longest accepted location, in characters.
pub const MAX_LOCATION_CHARS: usize = 100;

/// Body of an analysis request. Every field is optional; see [`AnalysisRequest::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisRequest {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub politician: Option<String>,
}

/// An [`AnalysisRequest`] with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    pub location: String,
    pub candidate_name: String,
    pub politician: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl AnalysisRequest {
    /// Applies defaults: a blank or `"none"` location becomes
    /// `default_location`, a blank candidate becomes [`CANDIDATE_PLACEHOLDER`],
    /// and a blank politician means no actor filter.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidRequest`] when the location is longer
    /// than [`MAX_LOCATION_CHARS`].
    pub fn resolve(self, default_location: &str) -> Result<ResolvedRequest, PipelineError> {
        let location = non_blank(self.location)
            .filter(|l| !l.eq_ignore_ascii_case("none"))
            .unwrap_or_else(|| default_location.to_owned());

        let len = location.chars().count();
        if len > MAX_LOCATION_CHARS {
            return Err(PipelineError::InvalidRequest(format!(
                "location is {len} characters long; at most {MAX_LOCATION_CHARS} are accepted"
            )));
        }

        Ok(ResolvedRequest {
            location,
            candidate_name: non_blank(self.candidate_name)
                .unwrap_or_else(|| CANDIDATE_PLACEHOLDER.to_owned()),
            politician: non_blank(self.politician),
        })
    }
}

/// A concept whose search failed and was left out of the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedConcept {
    pub concept: Concept,
    pub kind: SearchErrorKind,
    pub message: String,
}

/// What happened during a run, for logging and callers that care.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub posts_collected: usize,
    pub skipped: Vec<SkippedConcept>,
    /// Concepts whose sentiment batch fell back to neutral.
    pub neutral_fallbacks: Vec<Concept>,
    pub malformed_records: usize,
}

#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub request: ResolvedRequest,
    pub classification: Classification,
    pub chart_data: ChartData,
    pub report: Report,
    pub stats: RunStats,
}

/// Classification → plan → chart → report, with no I/O.
#[must_use]
pub fn synthesize(
    classification: &Classification,
    candidate_name: &str,
    location: &str,
) -> (Report, ChartData) {
    let plan = build_plan(classification, location);
    let chart = chart_data(classification);
    let report = compose_report(&ReportInputs {
        classification,
        plan: &plan,
        chart: &chart,
        candidate_name,
        location,
    });
    (report, chart)
}

/// The search and sentiment collaborators, built once at process start and
/// shared by every run.
pub struct Pipeline<C, M> {
    search: SearchGateway<C>,
    sentiment: SentimentClassifier<M>,
    default_location: String,
}

impl<C, M> Pipeline<C, M>
where
    C: RecentSearch + Sync,
    M: SentimentModel + Sync,
{
    #[must_use]
    pub fn new(
        search: SearchGateway<C>,
        sentiment: SentimentClassifier<M>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            search,
            sentiment,
            default_location: default_location.into(),
        }
    }

    #[must_use]
    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    /// Searches every concept in order and labels each result set with one
    /// sentiment batch. A failed search skips only its concept.
    pub async fn collect_posts(&self, request: &ResolvedRequest) -> (Vec<Post>, RunStats) {
        let mut posts = Vec::new();
        let mut stats = RunStats::default();

        for concept in Concept::ALL {
            let found = match self
                .search
                .search_concept(&request.location, concept, request.politician.as_deref())
                .await
            {
                Ok(found) => found,
                Err(e) => {
                    let kind = e.kind();
                    tracing::warn!(%concept, ?kind, error = %e, "concept search failed; skipping concept");
                    stats.skipped.push(SkippedConcept {
                        concept,
                        kind,
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if found.is_empty() {
                tracing::info!(%concept, "no posts found");
                continue;
            }

            // Blank records stay out of the model batch; the classifier rejects them.
            let texts: Vec<&str> = found
                .iter()
                .map(|p| p.text.as_str())
                .filter(|text| !text.trim().is_empty())
                .collect();
            let batch = self.sentiment.classify_batch(&texts).await;
            if batch.is_fallback() {
                stats.neutral_fallbacks.push(concept);
            }

            tracing::info!(%concept, posts = found.len(), "collected posts");
            stats.posts_collected += found.len();
            let mut labels = batch.labels.into_iter();
            posts.extend(found.into_iter().map(|p| {
                let sentiment = if p.text.trim().is_empty() {
                    Sentiment::Neutral
                } else {
                    labels.next().unwrap_or(Sentiment::Neutral)
                };
                Post::new(p.text, concept, sentiment).with_meta(p.meta)
            }));
        }

        (posts, stats)
    }

    /// Runs one full analysis.
    ///
    /// 1. Resolve request defaults.
    /// 2. Search each concept and label its posts (failures skip the concept).
    /// 3. Bucket posts by concept keyword.
    /// 4. Build the plan, chart data and report.
    ///
    /// Finding nothing at all is not an error: the report carries its
    /// "no data" messages instead.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidRequest`] if the request cannot be resolved.
    pub async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisOutcome, PipelineError> {
        let request = request.resolve(&self.default_location)?;
        tracing::info!(
            location = %request.location,
            politician = request.politician.as_deref().unwrap_or("-"),
            "starting analysis"
        );

        let (posts, mut stats) = self.collect_posts(&request).await;

        let classification = classify_posts(posts);
        stats.malformed_records = classification.malformed().len();

        let (report, chart_data) =
            synthesize(&classification, &request.candidate_name, &request.location);

        tracing::info!(
            location = %request.location,
            posts = stats.posts_collected,
            classified = classification.post_count(),
            unmatched = classification.unmatched().len(),
            skipped_concepts = stats.skipped.len(),
            neutral_fallbacks = stats.neutral_fallbacks.len(),
            "analysis complete"
        );

        Ok(AnalysisOutcome {
            request,
            classification,
            chart_data,
            report,
            stats,
        })
    }
}
