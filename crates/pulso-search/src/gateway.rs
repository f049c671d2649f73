//! Per-concept search with rate-limit back-off.

use pulso_core::Concept;

use crate::client::RecentSearch;
use crate::error::SearchError;
use crate::query::{build_concept_query, MAX_QUERY_LEN};
use crate::retry::{retry_rate_limited, BackoffPolicy};
use crate::types::FoundPost;

/// Issues recent-search queries through a [`RecentSearch`] collaborator,
/// retrying rate-limited calls according to its [`BackoffPolicy`].
///
/// Constructed once at process start and reused across sequential runs.
pub struct SearchGateway<C> {
    client: C,
    max_results: u32,
    backoff: BackoffPolicy,
}

impl<C: RecentSearch + Sync> SearchGateway<C> {
    #[must_use]
    pub fn new(client: C, max_results: u32, backoff: BackoffPolicy) -> Self {
        Self {
            client,
            max_results,
            backoff,
        }
    }

    #[must_use]
    pub fn max_results(&self) -> u32 {
        self.max_results
    }

    /// Runs one query and returns its posts joined with author metadata.
    ///
    /// # Errors
    ///
    /// - [`SearchError::QueryTooLong`] before any call when `query` exceeds
    ///   [`MAX_QUERY_LEN`] characters.
    /// - [`SearchError::RateLimitExceeded`] when every attempt was rate limited.
    /// - Any other client error, immediately.
    pub async fn search(&self, query: &str) -> Result<Vec<FoundPost>, SearchError> {
        let len = query.chars().count();
        if len > MAX_QUERY_LEN {
            return Err(SearchError::QueryTooLong {
                len,
                max: MAX_QUERY_LEN,
            });
        }

        let client = &self.client;
        let max_results = self.max_results;
        let page = retry_rate_limited(&self.backoff, move || {
            client.search_recent(query, max_results)
        })
        .await?;
        Ok(page.into_posts())
    }

    /// Builds and runs the query for `concept` (see [`build_concept_query`]).
    ///
    /// # Errors
    ///
    /// Same as [`SearchGateway::search`].
    pub async fn search_concept(
        &self,
        location: &str,
        concept: Concept,
        politician: Option<&str>,
    ) -> Result<Vec<FoundPost>, SearchError> {
        let query = build_concept_query(location, concept, politician);
        tracing::debug!(concept = %concept, query = %query, "searching concept");
        self.search(&query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::types::{ApiPost, SearchPage};

    /// Rate-limits the first `limited` calls, then returns one post.
    struct FlakySearch {
        limited: u32,
        calls: AtomicU32,
    }

    impl RecentSearch for FlakySearch {
        async fn search_recent(
            &self,
            query: &str,
            _max_results: u32,
        ) -> Result<SearchPage, SearchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.limited {
                return Err(SearchError::RateLimited {
                    reset_after_secs: Some(1),
                });
            }
            Ok(SearchPage {
                data: vec![ApiPost {
                    id: "1".to_owned(),
                    text: format!("resultado para {query}"),
                    author_id: None,
                    created_at: None,
                    public_metrics: None,
                    geo: None,
                    in_reply_to_user_id: None,
                    context_annotations: Vec::new(),
                    attachments: None,
                }],
                ..SearchPage::default()
            })
        }
    }

    fn gateway(limited: u32) -> SearchGateway<FlakySearch> {
        SearchGateway::new(
            FlakySearch {
                limited,
                calls: AtomicU32::new(0),
            },
            10,
            BackoffPolicy::from_secs(3, 0),
        )
    }

    #[tokio::test]
    async fn recovers_after_rate_limit() {
        let gateway = gateway(2);
        let posts = gateway.search("salud").await.expect("search");
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].meta.username, "unknown");
        assert_eq!(gateway.client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_three_attempts() {
        let gateway = gateway(u32::MAX);
        let result = gateway.search("salud").await;
        assert!(matches!(
            result,
            Err(SearchError::RateLimitExceeded { attempts: 3 })
        ));
        assert_eq!(gateway.client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn rejects_overlong_query_without_calling() {
        let gateway = gateway(0);
        let query = "a".repeat(MAX_QUERY_LEN + 1);
        let result = gateway.search(&query).await;
        assert!(matches!(result, Err(SearchError::QueryTooLong { len: 513, max: 512 })));
        assert_eq!(gateway.client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_concept_builds_query() {
        let gateway = gateway(0);
        let posts = gateway
            .search_concept("Cali", Concept::Salud, None)
            .await
            .expect("search");
        assert!(posts[0].text.contains("\"Cali\" (salud OR hospitales"));
        assert!(posts[0].text.ends_with("lang:es -is:retweet"));
    }
}
