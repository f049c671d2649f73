//! HTTP client for the X (Twitter) API v2 recent-search endpoint.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};

use crate::error::SearchError;
use crate::types::SearchPage;

const DEFAULT_BASE_URL: &str = "https://api.twitter.com/";
const RECENT_SEARCH_PATH: &str = "2/tweets/search/recent";

/// Post fields requested on every search.
pub const TWEET_FIELDS: &str =
    "created_at,author_id,public_metrics,geo,in_reply_to_user_id,context_annotations,attachments";
pub const EXPANSIONS: &str = "author_id";
pub const USER_FIELDS: &str = "username";

/// A single recent-search call, without any retry.
///
/// Implementations must report HTTP 429 as [`SearchError::RateLimited`] so
/// the gateway can tell it apart from other failures.
pub trait RecentSearch {
    fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<SearchPage, SearchError>> + Send;
}

/// Bearer-token client for the recent-search endpoint.
///
/// Use [`XApiClient::new`] for production or [`XApiClient::with_base_url`]
/// to point at a mock server in tests.
pub struct XApiClient {
    client: Client,
    bearer_token: String,
    search_url: Url,
}

impl XApiClient {
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(bearer_token: &str, timeout_secs: u64) -> Result<Self, SearchError> {
        Self::with_base_url(bearer_token, timeout_secs, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`SearchError::Config`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        bearer_token: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pulso/0.1 (civic-listening)")
            .build()?;

        // Exactly one trailing slash, so joining keeps any base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let search_url = Url::parse(&normalised)
            .and_then(|base| base.join(RECENT_SEARCH_PATH))
            .map_err(|e| SearchError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            bearer_token: bearer_token.to_owned(),
            search_url,
        })
    }

    fn build_url(&self, query: &str, max_results: u32) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("query", query)
            .append_pair("max_results", &max_results.to_string())
            .append_pair("tweet.fields", TWEET_FIELDS)
            .append_pair("expansions", EXPANSIONS)
            .append_pair("user.fields", USER_FIELDS);
        url
    }

    async fn fetch_page(&self, query: &str, max_results: u32) -> Result<SearchPage, SearchError> {
        let url = self.build_url(query, max_results);
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let reset_after_secs = response
                .headers()
                .get("x-rate-limit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<i64>().ok())
                .map(|reset_epoch| {
                    u64::try_from(reset_epoch - chrono::Utc::now().timestamp()).unwrap_or(0)
                });
            return Err(SearchError::RateLimited { reset_after_secs });
        }

        let body = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::Api {
                status: status.as_u16(),
                message: body.chars().take(300).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: format!("recent search (query={query})"),
            source: e,
        })
    }
}

impl RecentSearch for XApiClient {
    fn search_recent(
        &self,
        query: &str,
        max_results: u32,
    ) -> impl Future<Output = Result<SearchPage, SearchError>> + Send {
        self.fetch_page(query, max_results)
    }
}
