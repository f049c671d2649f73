//! Per-concept strategic plan entries.

use pulso_core::{Concept, Sentiment, SentimentCounts};
use serde::Serialize;

use crate::classify::{Classification, ConceptBucket};

/// Posts quoted in a non-empty need statement.
pub const NEED_SAMPLE_POSTS: usize = 3;
/// Characters kept from each quoted post before the ellipsis.
pub const NEED_EXCERPT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub concept: Concept,
    pub necesidad: String,
    pub propuesta: String,
    pub discurso: String,
    pub impacto: String,
}

/// First [`NEED_EXCERPT_CHARS`] characters of `text`, with `...` only when cut.
fn excerpt(text: &str) -> String {
    match text.char_indices().nth(NEED_EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

/// `Sentimientos: Positivo n (x.x%), Negativo n (x.x%), Neutral n (x.x%)`
pub(crate) fn sentiment_breakdown(counts: SentimentCounts) -> String {
    let part = |s: Sentiment| format!("{} {} ({:.1}%)", s.capitalized(), counts.get(s), counts.percent(s));
    format!(
        "Sentimientos: {}, {}, {}",
        part(Sentiment::Positive),
        part(Sentiment::Negative),
        part(Sentiment::Neutral)
    )
}

fn need_statement(concept: Concept, bucket: &ConceptBucket, location: &str) -> String {
    if bucket.is_empty() {
        return format!("No se encontraron tweets específicos sobre {concept} en {location}.");
    }
    let samples = bucket
        .posts()
        .iter()
        .take(NEED_SAMPLE_POSTS)
        .map(|post| excerpt(&post.text))
        .collect::<Vec<_>>()
        .join("; ");
    format!(
        "Los electores de {location} expresan preocupaciones sobre {concept}: {samples}\n{}",
        sentiment_breakdown(bucket.counts())
    )
}

/// One entry per concept, in canonical order. The fallback bucket never gets an entry.
#[must_use]
pub fn build_plan(classification: &Classification, location: &str) -> Vec<PlanEntry> {
    Concept::ALL
        .into_iter()
        .map(|concept| {
            let bucket = classification.concept(concept);
            let templates = concept.templates();
            tracing::debug!(%concept, posts = bucket.len(), "building plan entry");
            PlanEntry {
                concept,
                necesidad: need_statement(concept, bucket, location),
                propuesta: templates.propuesta_for(location),
                discurso: templates.discurso_for(location),
                impacto: templates.impacto.to_owned(),
            }
        })
        .collect()
}
