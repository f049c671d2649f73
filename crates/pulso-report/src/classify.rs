//! Concept bucketing of sentiment-tagged posts.
//!
//! A post stays in the concept it was searched under only if its text
//! contains one of that concept's keywords; otherwise it lands in the
//! fallback bucket. Every well-formed post ends up in exactly one bucket.

use pulso_core::{BucketKey, Concept, Post, PostMeta, Sentiment, SentimentCounts};
use serde::ser::{Serialize, Serializer};
use thiserror::Error;

const UNMATCHED_EXPLANATION: &str =
    "No contiene palabras clave específicas, pero fue capturado en la búsqueda.";

/// A post record rejected at the classifier boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("post #{index} has no concept tag")]
    MissingConcept { index: usize },

    #[error("post #{index} has empty text")]
    EmptyText { index: usize },
}

/// A post as it appears inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ClassifiedPost {
    pub text: String,
    pub explanation: String,
    pub sentiment: Sentiment,
    /// Concept whose query captured the post.
    pub searched_concept: Concept,
    /// Keywords of `searched_concept` present in the text; empty in the fallback bucket.
    pub matched_keywords: Vec<&'static str>,
    pub meta: PostMeta,
}

/// Posts of one bucket and their sentiment tally.
///
/// Only [`ConceptBucket::push`] mutates a bucket, so the tally total always
/// equals the number of posts.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ConceptBucket {
    tweets: Vec<ClassifiedPost>,
    sentiments: SentimentCounts,
}

impl ConceptBucket {
    pub fn push(&mut self, post: ClassifiedPost) {
        self.sentiments.record(post.sentiment);
        self.tweets.push(post);
    }

    #[must_use]
    pub fn posts(&self) -> &[ClassifiedPost] {
        &self.tweets
    }

    #[must_use]
    pub fn counts(&self) -> SentimentCounts {
        self.sentiments
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }
}

/// The eleven buckets of one run, plus the records that were rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    buckets: [ConceptBucket; 11],
    malformed: Vec<MalformedRecord>,
}

fn slot(key: BucketKey) -> usize {
    match key {
        BucketKey::Concept(concept) => concept as usize,
        BucketKey::Unmatched => 10,
    }
}

impl Classification {
    #[must_use]
    pub fn bucket(&self, key: BucketKey) -> &ConceptBucket {
        &self.buckets[slot(key)]
    }

    #[must_use]
    pub fn concept(&self, concept: Concept) -> &ConceptBucket {
        self.bucket(BucketKey::Concept(concept))
    }

    #[must_use]
    pub fn unmatched(&self) -> &ConceptBucket {
        self.bucket(BucketKey::Unmatched)
    }

    /// All buckets in [`BucketKey::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, &ConceptBucket)> {
        BucketKey::ALL.into_iter().map(|key| (key, self.bucket(key)))
    }

    #[must_use]
    pub fn malformed(&self) -> &[MalformedRecord] {
        &self.malformed
    }

    /// Sentiment tally across the ten concept buckets (fallback excluded).
    #[must_use]
    pub fn concept_totals(&self) -> SentimentCounts {
        Concept::ALL
            .iter()
            .fold(SentimentCounts::default(), |acc, c| acc.merged(self.concept(*c).counts()))
    }

    /// `true` when at least one concept bucket holds a post.
    #[must_use]
    pub fn has_concept_data(&self) -> bool {
        Concept::ALL.iter().any(|c| !self.concept(*c).is_empty())
    }

    /// Number of classified posts across all eleven buckets.
    #[must_use]
    pub fn post_count(&self) -> usize {
        self.buckets.iter().map(ConceptBucket::len).sum()
    }

    fn place(&mut self, key: BucketKey, post: ClassifiedPost) {
        self.buckets[slot(key)].push(post);
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(key, bucket)| (key.name(), bucket)))
    }
}

fn validate(index: usize, post: &Post) -> Result<Concept, MalformedRecord> {
    let concept = post
        .concept
        .ok_or(MalformedRecord::MissingConcept { index })?;
    if post.text.trim().is_empty() {
        return Err(MalformedRecord::EmptyText { index });
    }
    Ok(concept)
}

/// Buckets `posts` by keyword match against the concept each was searched under.
pub fn classify_posts(posts: impl IntoIterator<Item = Post>) -> Classification {
    let mut classification = Classification::default();

    for (index, post) in posts.into_iter().enumerate() {
        let concept = match validate(index, &post) {
            Ok(concept) => concept,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed post record");
                classification.malformed.push(e);
                continue;
            }
        };

        let matched_keywords = concept.matching_keywords(&post.text);
        let (key, explanation) = if matched_keywords.is_empty() {
            (BucketKey::Unmatched, UNMATCHED_EXPLANATION.to_owned())
        } else {
            (
                BucketKey::Concept(concept),
                format!(
                    "Identificado en búsqueda específica para {concept}: {}",
                    concept.keywords().join(", ")
                ),
            )
        };

        classification.place(
            key,
            ClassifiedPost {
                text: post.text,
                explanation,
                sentiment: post.sentiment,
                searched_concept: concept,
                matched_keywords,
                meta: post.meta,
            },
        );
    }

    classification
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untagged(text: &str) -> Post {
        Post {
            concept: None,
            ..Post::new(text, Concept::Salud, Sentiment::Neutral)
        }
    }

    #[test]
    fn empty_input_yields_eleven_empty_buckets() {
        let classification = classify_posts(Vec::new());
        assert_eq!(classification.iter().count(), 11);
        assert!(classification.iter().all(|(_, b)| b.is_empty()));
        assert!(!classification.has_concept_data());
    }

    #[test]
    fn keyword_match_stays_in_searched_concept() {
        let classification = classify_posts(vec![Post::new(
            "Faltan VACUNAS en el centro de salud",
            Concept::Salud,
            Sentiment::Negative,
        )]);
        let bucket = classification.concept(Concept::Salud);
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.counts().negative, 1);
        let post = &bucket.posts()[0];
        assert_eq!(post.matched_keywords, vec!["salud", "vacunas"]);
        assert_eq!(
            post.explanation,
            "Identificado en búsqueda específica para salud: salud, hospitales, clínicas, pandemia, vacunas"
        );
        assert!(classification.unmatched().is_empty());
    }

    #[test]
    fn no_keyword_goes_to_fallback_bucket() {
        let classification = classify_posts(vec![Post::new(
            "Qué lindo día en el parque",
            Concept::Seguridad,
            Sentiment::Positive,
        )]);
        assert!(classification.concept(Concept::Seguridad).is_empty());
        let fallback = classification.unmatched();
        assert_eq!(fallback.len(), 1);
        assert_eq!(fallback.counts().positive, 1);
        assert_eq!(fallback.posts()[0].explanation, UNMATCHED_EXPLANATION);
        assert_eq!(fallback.posts()[0].searched_concept, Concept::Seguridad);
    }

    #[test]
    fn keyword_of_another_concept_does_not_count() {
        // "salud" belongs to a different concept than the one searched.
        let classification = classify_posts(vec![Post::new(
            "La salud mental importa",
            Concept::Educacion,
            Sentiment::Neutral,
        )]);
        assert!(classification.concept(Concept::Salud).is_empty());
        assert_eq!(classification.unmatched().len(), 1);
    }

    #[test]
    fn malformed_records_are_skipped_and_not_counted() {
        let classification = classify_posts(vec![
            untagged("sin concepto"),
            Post::new("   ", Concept::Salud, Sentiment::Negative),
            Post::new("hospitales llenos", Concept::Salud, Sentiment::Negative),
        ]);
        assert_eq!(
            classification.malformed(),
            &[
                MalformedRecord::MissingConcept { index: 0 },
                MalformedRecord::EmptyText { index: 1 }
            ]
        );
        assert_eq!(classification.post_count(), 1);
    }

    #[test]
    fn every_post_lands_in_exactly_one_bucket_and_tallies_match() {
        let mut posts = Vec::new();
        let sentiments = [Sentiment::Positive, Sentiment::Negative, Sentiment::Neutral];
        for (i, concept) in Concept::ALL.into_iter().enumerate() {
            let keyword = concept.keywords()[0];
            posts.push(Post::new(
                format!("hablemos de {keyword}"),
                concept,
                sentiments[i % 3],
            ));
            posts.push(Post::new("nada relacionado", concept, sentiments[(i + 1) % 3]));
        }
        let input_len = posts.len();

        let classification = classify_posts(posts);
        assert_eq!(classification.post_count(), input_len);
        for (key, bucket) in classification.iter() {
            assert_eq!(bucket.counts().total(), bucket.len(), "tally mismatch in {}", key.name());
        }
        for concept in Concept::ALL {
            assert_eq!(classification.concept(concept).len(), 1);
        }
        assert_eq!(classification.unmatched().len(), 10);
    }

    #[test]
    fn concept_totals_exclude_fallback() {
        let classification = classify_posts(vec![
            Post::new("seguridad ya", Concept::Seguridad, Sentiment::Negative),
            Post::new("otra cosa", Concept::Seguridad, Sentiment::Positive),
        ]);
        let totals = classification.concept_totals();
        assert_eq!(totals.total(), 1);
        assert_eq!(totals.negative, 1);
    }

    #[test]
    fn serializes_buckets_by_name() {
        let classification = classify_posts(vec![Post::new(
            "crimen en el barrio",
            Concept::Seguridad,
            Sentiment::Negative,
        )]);
        let json = serde_json::to_value(&classification).unwrap();
        assert_eq!(json["seguridad"]["sentiments"]["negativo"], 1);
        assert_eq!(json["seguridad"]["tweets"][0]["sentiment"], "negativo");
        assert!(json["Ninguno"]["tweets"].as_array().unwrap().is_empty());
    }
}
