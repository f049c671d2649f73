use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub x_bearer_token: String,
    pub x_base_url: String,
    pub search_max_results: u32,
    pub search_timeout_secs: u64,
    pub search_max_attempts: u32,
    pub search_backoff_base_secs: u64,
    pub sentiment_url: String,
    pub sentiment_timeout_secs: u64,
    pub default_location: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("x_bearer_token", &"[redacted]")
            .field("x_base_url", &self.x_base_url)
            .field("search_max_results", &self.search_max_results)
            .field("search_timeout_secs", &self.search_timeout_secs)
            .field("search_max_attempts", &self.search_max_attempts)
            .field("search_backoff_base_secs", &self.search_backoff_base_secs)
            .field("sentiment_url", &self.sentiment_url)
            .field("sentiment_timeout_secs", &self.sentiment_timeout_secs)
            .field("default_location", &self.default_location)
            .finish()
    }
}
