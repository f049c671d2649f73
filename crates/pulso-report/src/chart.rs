//! Stacked-bar chart data (Chart.js shape) for per-concept sentiment.

use pulso_core::{Concept, Sentiment};
use serde::Serialize;

use crate::classify::Classification;

pub const POSITIVE_COLOR: &str = "#36A2EB";
pub const NEGATIVE_COLOR: &str = "#FF6384";
pub const NEUTRAL_COLOR: &str = "#FFCE56";

const STACK_ID: &str = "Stack 0";
const CHART_TITLE: &str = "Distribución de Sentimientos por Concepto";
const X_AXIS_TITLE: &str = "Conceptos del PND";
const Y_AXIS_TITLE: &str = "Conteo de Tweets";

/// Dataset order in every chart.
const SERIES: [(Sentiment, &str); 3] = [
    (Sentiment::Positive, POSITIVE_COLOR),
    (Sentiment::Negative, NEGATIVE_COLOR),
    (Sentiment::Neutral, NEUTRAL_COLOR),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: &'static str,
    pub data: Vec<usize>,
    pub background_color: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<&'static str>,
}

/// Labels are the concepts with at least one post; each dataset's `data`
/// is aligned with `labels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartData {
    pub labels: Vec<Concept>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[must_use]
pub fn chart_data(classification: &Classification) -> ChartData {
    let labels: Vec<Concept> = Concept::ALL
        .into_iter()
        .filter(|c| !classification.concept(*c).is_empty())
        .collect();

    let datasets = SERIES
        .into_iter()
        .map(|(sentiment, color)| ChartDataset {
            label: sentiment.capitalized(),
            data: labels
                .iter()
                .map(|c| classification.concept(*c).counts().get(sentiment))
                .collect(),
            background_color: color,
            stack: None,
        })
        .collect();

    ChartData { labels, datasets }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartOptions {
    pub scales: Scales,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scales {
    pub x: Axis,
    pub y: Axis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    pub stacked: bool,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plugins {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: &'static str,
}

impl Title {
    const fn shown(text: &'static str) -> Self {
        Self {
            display: true,
            text,
        }
    }
}

/// Stacked bar configuration wrapping `data`, every dataset on one stack.
#[must_use]
pub fn chart_config(data: &ChartData) -> ChartConfig {
    let mut data = data.clone();
    for dataset in &mut data.datasets {
        dataset.stack = Some(STACK_ID);
    }
    ChartConfig {
        kind: "bar",
        data,
        options: ChartOptions {
            scales: Scales {
                x: Axis {
                    stacked: true,
                    title: Title::shown(X_AXIS_TITLE),
                },
                y: Axis {
                    stacked: true,
                    title: Title::shown(Y_AXIS_TITLE),
                },
            },
            plugins: Plugins {
                title: Title::shown(CHART_TITLE),
            },
        },
    }
}
