//! Post search for Pulso.
//!
//! Builds one recent-search query per PND concept, calls the X API v2
//! recent-search endpoint with a bearer token, and retries rate-limited
//! calls with exponential back-off (60 s, 120 s, 240 s by default).

pub mod client;
pub mod error;
pub mod gateway;
pub mod query;
pub mod retry;
pub mod types;

pub use client::{RecentSearch, XApiClient};
pub use error::{SearchError, SearchErrorKind};
pub use gateway::SearchGateway;
pub use query::{build_concept_query, MAX_QUERY_LEN};
pub use retry::BackoffPolicy;
pub use types::{FoundPost, SearchPage};
