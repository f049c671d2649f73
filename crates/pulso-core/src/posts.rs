use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::concepts::Concept;
use crate::sentiment::Sentiment;

/// Author and engagement details returned alongside a post's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PostMeta {
    pub id: String,
    pub author_id: Option<String>,
    /// Author handle, `unknown` when the service did not expand it.
    pub username: String,
    pub url: String,
    pub created_at: Option<DateTime<Utc>>,
    pub like_count: u64,
    pub retweet_count: u64,
    pub in_reply_to_user_id: Option<String>,
    pub geo_place_id: Option<String>,
    /// Entity names from the service's context annotations.
    pub context_entities: Vec<String>,
    pub media_keys: Vec<String>,
}

/// A post tagged with the concept it was searched under and its sentiment.
///
/// `concept` is optional so that records arriving without a tag can be
/// rejected at the classifier boundary rather than guessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub text: String,
    pub concept: Option<Concept>,
    pub sentiment: Sentiment,
    pub meta: PostMeta,
}

impl Post {
    #[must_use]
    pub fn new(text: impl Into<String>, concept: Concept, sentiment: Sentiment) -> Self {
        Self {
            text: text.into(),
            concept: Some(concept),
            sentiment,
            meta: PostMeta::default(),
        }
    }

    #[must_use]
    pub fn with_meta(mut self, meta: PostMeta) -> Self {
        self.meta = meta;
        self
    }
}
