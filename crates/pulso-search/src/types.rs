//! Wire types for the recent-search endpoint and the gateway's output.

use chrono::{DateTime, Utc};
use pulso_core::PostMeta;
use serde::{Deserialize, Deserializer};

/// One page of recent-search results.
///
/// When nothing matches, the service omits `data` and `includes` entirely,
/// so both default to empty. Entries in `data` that do not parse as a post
/// are logged and dropped without failing the page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchPage {
    #[serde(default, deserialize_with = "skip_malformed_posts")]
    pub data: Vec<ApiPost>,
    #[serde(default)]
    pub includes: Includes,
    pub meta: Option<SearchMeta>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default)]
    pub users: Vec<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub result_count: u32,
    pub newest_id: Option<String>,
    pub oldest_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: String,
    pub username: String,
}

/// A missing `id` or `text` defaults to empty; blank posts are rejected
/// downstream by the concept classifier.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPost {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub text: String,
    pub author_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub public_metrics: Option<PublicMetrics>,
    pub geo: Option<Geo>,
    pub in_reply_to_user_id: Option<String>,
    #[serde(default)]
    pub context_annotations: Vec<ContextAnnotation>,
    pub attachments: Option<Attachments>,
}

fn skip_malformed_posts<'de, D>(deserializer: D) -> Result<Vec<ApiPost>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value::<ApiPost>(value)
                .map_err(|e| {
                    tracing::warn!(index, error = %e, "skipping malformed post entry");
                })
                .ok()
        })
        .collect())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PublicMetrics {
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geo {
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextAnnotation {
    pub entity: Option<ContextEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContextEntity {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Attachments {
    #[serde(default)]
    pub media_keys: Vec<String>,
}

/// A post returned by the gateway: its text plus author/engagement metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundPost {
    pub text: String,
    pub meta: PostMeta,
}

impl SearchPage {
    /// Joins each post with its expanded author and flattens metadata.
    #[must_use]
    pub fn into_posts(self) -> Vec<FoundPost> {
        let users = self.includes.users;
        self.data
            .into_iter()
            .map(|post| {
                let username = post
                    .author_id
                    .as_deref()
                    .and_then(|author| users.iter().find(|u| u.id == author))
                    .map_or_else(|| "unknown".to_owned(), |u| u.username.clone());
                let metrics = post.public_metrics.unwrap_or_default();
                let meta = PostMeta {
                    url: format!("https://twitter.com/{username}/status/{}", post.id),
                    id: post.id,
                    author_id: post.author_id,
                    username,
                    created_at: post.created_at,
                    like_count: metrics.like_count,
                    retweet_count: metrics.retweet_count,
                    in_reply_to_user_id: post.in_reply_to_user_id,
                    geo_place_id: post.geo.and_then(|g| g.place_id),
                    context_entities: post
                        .context_annotations
                        .into_iter()
                        .filter_map(|a| a.entity.map(|e| e.name))
                        .collect(),
                    media_keys: post.attachments.unwrap_or_default().media_keys,
                };
                FoundPost {
                    text: post.text,
                    meta,
                }
            })
            .collect()
    }
}
