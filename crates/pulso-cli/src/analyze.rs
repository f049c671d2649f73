use std::fmt::Write as _;

use anyhow::Context;
use pulso_core::{AppConfig, Concept};
use pulso_report::{build_live_pipeline, AnalysisRequest, AnalyzeResponse};

/// Builds the live pipeline, runs one analysis and prints the response
/// envelope. Errors are printed as an error envelope and also returned so
/// the process exits non-zero.
pub(crate) async fn run_analyze(
    config: &AppConfig,
    request: AnalysisRequest,
    pretty: bool,
) -> anyhow::Result<()> {
    let pipeline = build_live_pipeline(config).context("failed to build pipeline")?;
    let result = pipeline.analyze(request).await;

    println!("{}", render(&AnalyzeResponse::from(&result), pretty)?);

    if let Ok(outcome) = &result {
        for skipped in &outcome.stats.skipped {
            tracing::warn!(concept = %skipped.concept, kind = ?skipped.kind, "concept was skipped");
        }
    }
    result.map(|_| ()).map_err(anyhow::Error::from)
}

pub(crate) fn render(response: &AnalyzeResponse, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    }
}

/// One line per concept: `name: kw1, kw2, ...`.
pub(crate) fn concept_listing() -> String {
    let mut out = String::new();
    for concept in Concept::ALL {
        let _ = writeln!(out, "{concept}: {}", concept.keywords().join(", "));
    }
    out
}
