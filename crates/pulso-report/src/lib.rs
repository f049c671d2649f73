//! Turns searched posts into the Pulso campaign report.
//!
//! [`classify_posts`] buckets sentiment-tagged posts by PND concept,
//! [`build_plan`] derives one strategic entry per concept, and
//! [`compose_report`] renders the summary, analysis, plan, speech and chart.
//! [`Pipeline`] wires these behind the search and sentiment collaborators.

pub mod chart;
pub mod classify;
pub mod error;
pub mod live;
pub mod pipeline;
pub mod plan;
pub mod report;
pub mod response;

pub use chart::{chart_config, chart_data, ChartConfig, ChartData, ChartDataset};
pub use classify::{classify_posts, Classification, ClassifiedPost, ConceptBucket, MalformedRecord};
pub use error::PipelineError;
pub use live::{build_live_pipeline, LivePipeline};
pub use pipeline::{
    synthesize, AnalysisOutcome, AnalysisRequest, Pipeline, ResolvedRequest, RunStats,
    SkippedConcept, CANDIDATE_PLACEHOLDER,
};
pub use plan::{build_plan, PlanEntry};
pub use report::{compose_report, Report, ReportInputs, NO_ANALYSIS, NO_PLAN, NO_SUMMARY};
pub use response::AnalyzeResponse;
