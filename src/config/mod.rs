/// Application configuration module
use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub nasa_api_url: String,
    pub nasa_api_key: String,
    pub bind_addr: String,
    pub http_timeout_seconds: u64,
}

impl AppConfig {
    /// Load configuration from `.env` and environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let nasa_api_url = get("NASA_API_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "https://api.nasa.gov".to_string());

        let nasa_api_key = get("NASA_API_KEY")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "DEMO_KEY".to_string());

        let bind_addr = get("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        Self {
            nasa_api_url,
            nasa_api_key,
            bind_addr,
            http_timeout_seconds: parse_u64(get("HTTP_TIMEOUT_SECONDS"), 30),
        }
    }
}

fn parse_u64(value: Option<String>, default: u64) -> u64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}
