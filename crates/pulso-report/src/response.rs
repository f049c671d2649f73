//! The response envelope shared by the HTTP server and the CLI.

use serde::Serialize;

use crate::chart::ChartData;
use crate::error::PipelineError;
use crate::pipeline::AnalysisOutcome;
use crate::report::Report;

/// `{status: "success", report, chart_data}` or `{status: "error", message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<Report>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_data: Option<ChartData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AnalyzeResponse {
    #[must_use]
    pub fn success(report: Report, chart_data: ChartData) -> Self {
        Self {
            status: "success",
            report: Some(report),
            chart_data: Some(chart_data),
            message: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            report: None,
            chart_data: None,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

impl From<&Result<AnalysisOutcome, PipelineError>> for AnalyzeResponse {
    fn from(result: &Result<AnalysisOutcome, PipelineError>) -> Self {
        match result {
            Ok(outcome) => Self::success(outcome.report.clone(), outcome.chart_data.clone()),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
