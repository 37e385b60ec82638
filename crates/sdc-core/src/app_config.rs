use reqwest::Url;

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

/// Runtime configuration for the suggestion pipeline.
///
/// Built by [`crate::load_app_config`]; every field maps to one `SDC_*`
/// environment variable.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Which full-text service to query (`{api_base_url}/2.1/full-text/search`).
    pub api_base_url: Url,
    /// Which geocoding provider to query (`{geocode_base_url}/{term}.json`).
    pub geocode_base_url: Url,
    /// Credential sent as `access_token` on every geocode lookup.
    pub geocode_token: String,
    /// Comma-separated country filter sent to the geocoder.
    pub geocode_country: String,
    /// Inputs shorter than this many characters never start a cycle.
    pub min_query_len: usize,
    /// Maximum number of full-text suggestions kept per cycle.
    pub fulltext_result_cap: usize,
    /// When `true`, a failing source contributes zero suggestions instead of
    /// failing the whole cycle.
    pub partial_results: bool,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Origin of the hosting page; relative navigation targets resolve
    /// against it.
    pub site_base_url: Url,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url.as_str())
            .field("geocode_base_url", &self.geocode_base_url.as_str())
            .field("geocode_token", &"[redacted]")
            .field("geocode_country", &self.geocode_country)
            .field("min_query_len", &self.min_query_len)
            .field("fulltext_result_cap", &self.fulltext_result_cap)
            .field("partial_results", &self.partial_results)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("site_base_url", &self.site_base_url.as_str())
            .finish()
    }
}
