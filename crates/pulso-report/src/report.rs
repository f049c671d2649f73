//! Final report: executive summary, analysis, plan text, speech and chart.

use pulso_core::{Concept, Sentiment, SentimentCounts};
use serde::Serialize;

use crate::chart::{chart_config, ChartConfig, ChartData};
use crate::classify::Classification;
use crate::plan::PlanEntry;

pub const NO_SUMMARY: &str = "No data available for executive summary.";
pub const NO_ANALYSIS: &str = "No data available for analysis.";
pub const NO_PLAN: &str = "No data available for strategic planning.";

/// Shown in the summary when no concept qualifies as most negative/positive.
const NO_CONCEPT: &str = "ninguno";

const SPEECH_CLOSING_PREFIX: &str = "Juntos, alineados con el PND 2022-2026, construiremos un";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub resumen: String,
    pub analisis: String,
    pub plan: String,
    pub discurso: String,
    pub grafico: String,
    pub chart_config: ChartConfig,
}

/// Inputs of [`compose_report`]. Everything is borrowed; composition is pure.
#[derive(Debug, Clone, Copy)]
pub struct ReportInputs<'a> {
    pub classification: &'a Classification,
    pub plan: &'a [PlanEntry],
    pub chart: &'a ChartData,
    pub candidate_name: &'a str,
    pub location: &'a str,
}

/// Builds the report. Identical inputs always produce byte-identical output.
#[must_use]
pub fn compose_report(inputs: &ReportInputs<'_>) -> Report {
    let has_data = inputs.classification.has_concept_data();

    let (resumen, analisis, plan) = if has_data {
        (
            executive_summary(inputs.classification, inputs.location),
            analysis(inputs.classification),
            plan_text(inputs.classification, inputs.plan),
        )
    } else {
        (NO_SUMMARY.to_owned(), NO_ANALYSIS.to_owned(), NO_PLAN.to_owned())
    };

    Report {
        resumen,
        analisis,
        plan,
        discurso: speech(inputs.plan, inputs.candidate_name, inputs.location),
        grafico: chart_description(inputs.chart, inputs.location),
        chart_config: chart_config(inputs.chart),
    }
}

/// Concept with the strictly highest share of `sentiment`; ties keep the
/// earlier concept. Concepts without posts never qualify.
fn leading_concept(classification: &Classification, sentiment: Sentiment) -> Option<Concept> {
    let mut best: Option<(Concept, SentimentCounts)> = None;
    for concept in Concept::ALL {
        let counts = classification.concept(concept).counts();
        if counts.total() == 0 {
            continue;
        }
        // Compare shares exactly: a/b > c/d  <=>  a*d > c*b.
        let beats = match best {
            None => true,
            Some((_, top)) => {
                counts.get(sentiment) * top.total() > top.get(sentiment) * counts.total()
            }
        };
        if beats {
            best = Some((concept, counts));
        }
    }
    best.map(|(concept, _)| concept)
}

fn leading_label(classification: &Classification, sentiment: Sentiment) -> (String, usize) {
    match leading_concept(classification, sentiment) {
        Some(concept) => (
            concept.name().to_owned(),
            classification.concept(concept).counts().get(sentiment),
        ),
        None => (NO_CONCEPT.to_owned(), 0),
    }
}

fn executive_summary(classification: &Classification, location: &str) -> String {
    let totals = classification.concept_totals();

    let mut tones = [Sentiment::Neutral, Sentiment::Negative, Sentiment::Positive];
    // Stable: equal shares keep the order above.
    tones.sort_by_key(|s| std::cmp::Reverse(totals.get(*s)));
    let tone = |s: Sentiment| format!("{} ({:.1}%)", s.label(), totals.percent(s));

    let (most_negative, negative_count) = leading_label(classification, Sentiment::Negative);
    let (most_positive, positive_count) = leading_label(classification, Sentiment::Positive);

    let topics = Concept::ALL
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(", ");

    let mut summary = format!(
        "<p>El análisis de tweets recientes en {location} revela preocupaciones ciudadanas \
         alineadas con los conceptos clave del Plan Nacional de Desarrollo (PND 2022-2026). \
         Se clasificaron {total} tweets en español (excluyendo retweets) sobre {topics}.</p>\
         <p><strong>Tendencias generales</strong>: predomina el tono {first}, seguido de {second} \
         y {third}. El tema más crítico es {most_negative} ({negative_count} negativos), \
         mientras que {most_positive} destaca por su positividad ({positive_count} positivos).</p>",
        total = totals.total(),
        first = tone(tones[0]),
        second = tone(tones[1]),
        third = tone(tones[2]),
    );

    let unmatched = classification.unmatched().len();
    if unmatched > 0 {
        summary.push_str(&format!(
            "<p><strong>Sin clasificar</strong>: {unmatched} tweets capturados en las búsquedas \
             no contenían palabras clave específicas y no se incluyen en estos totales.</p>"
        ));
    }

    summary.push_str(&format!(
        "<p>Este panorama sugiere que los electores de {location} buscan acciones concretas \
         en los temas con mayor carga negativa.</p>"
    ));
    summary
}

fn analysis(classification: &Classification) -> String {
    let mut sections = Vec::new();
    for concept in Concept::ALL {
        let bucket = classification.concept(concept);
        if bucket.is_empty() {
            continue;
        }
        let counts = bucket.counts();
        let mut section = format!(
            "{concept} ({} tweets, Sentimientos: Positivo {}, Negativo {}, Neutral {}):",
            bucket.len(),
            counts.positive,
            counts.negative,
            counts.neutral
        );
        for post in bucket.posts() {
            section.push_str(&format!(
                "\n  - \"{}\" ({})",
                post.text,
                post.sentiment.capitalized()
            ));
        }
        sections.push(section);
    }
    sections.join("\n")
}

fn plan_text(classification: &Classification, plan: &[PlanEntry]) -> String {
    plan.iter()
        .map(|entry| {
            let negative = classification
                .concept(entry.concept)
                .counts()
                .percent(Sentiment::Negative);
            format!(
                "{}: Necesidad: {} ({negative:.1}% negativo). Propuesta: {} Impacto: {}",
                entry.concept, entry.necesidad, entry.propuesta, entry.impacto
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn speech(plan: &[PlanEntry], candidate_name: &str, location: &str) -> String {
    let mut speech = format!(
        "Queridos ciudadanos de {location}, soy {candidate_name}, un abogado de Bogotá con \
         pasión por la ganadería y el arte, y un enfoque ligero pero comprometido en la \
         política.\n\n"
    );
    for entry in plan {
        speech.push_str(&format!("Respecto a {}:\n{}\n\n", entry.concept, entry.discurso));
    }
    speech.push_str(&format!(
        "{SPEECH_CLOSING_PREFIX} {location} mejor. ¡Voten por el cambio real!"
    ));
    speech
}

fn chart_description(chart: &ChartData, location: &str) -> String {
    if chart.is_empty() {
        format!("Sin datos suficientes para graficar sentimientos por concepto en {location}.")
    } else {
        format!(
            "Distribución de sentimientos (positivo, negativo, neutral) en {} conceptos del PND \
             para {location}.",
            chart.labels.len()
        )
    }
}
