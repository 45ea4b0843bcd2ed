use serde::{Deserialize, Serialize};

/// Wikipedia gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Site root; search goes to `/w/api.php`, pages to `/wiki/<Title>`
    #[serde(default = "GatewayConfig::default_base_url")]
    pub base_url: String,

    /// Request timeout (seconds)
    #[serde(default = "GatewayConfig::default_timeout")]
    pub timeout: u64,

    /// User-Agent header
    #[serde(default = "GatewayConfig::default_user_agent")]
    pub user_agent: String,

    /// Maximum response size (bytes)
    #[serde(default = "GatewayConfig::default_max_size")]
    pub max_size: usize,

    /// Delays in seconds between retries of a failed request; empty means a
    /// single attempt.
    #[serde(default)]
    pub retry_delays: Vec<u64>,

    /// Number of page bodies kept in memory
    #[serde(default = "GatewayConfig::default_page_cache_capacity")]
    pub page_cache_capacity: u64,
}

impl GatewayConfig {
    fn default_base_url() -> String {
        "https://en.wikipedia.org".to_string()
    }

    const fn default_timeout() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        format!("Mozilla/5.0 (compatible; factcheck/{})", env!("CARGO_PKG_VERSION"))
    }

    const fn default_max_size() -> usize {
        5_000_000 // 5MB
    }

    const fn default_page_cache_capacity() -> u64 {
        256
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            timeout: Self::default_timeout(),
            user_agent: Self::default_user_agent(),
            max_size: Self::default_max_size(),
            retry_delays: Vec::new(),
            page_cache_capacity: Self::default_page_cache_capacity(),
        }
    }
}
