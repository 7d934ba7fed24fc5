pub const DEFAULT_GATEWAY_LOCATION: &str = "http://localhost:8090/";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the platform gateway.
    /// Set via MODELOP_GATEWAY_LOCATION env var. Default: http://localhost:8090/.
    pub gateway_location: String,
    /// Bearer token sent with every notification service request.
    pub access_token: Option<String>,
    /// Total request timeout in seconds. Set via MODELOP_REQUEST_TIMEOUT_SECS. Default: 30.
    pub request_timeout_secs: u64,
    /// Transient-failure retries handled by the HTTP client. 0 = disabled.
    /// Set via MODELOP_MAX_RETRIES env var. Default: 0.
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_location: DEFAULT_GATEWAY_LOCATION.to_string(),
            access_token: None,
            request_timeout_secs: 30,
            max_retries: 0,
        }
    }
}

impl Config {
    pub fn with_gateway_location(mut self, location: impl Into<String>) -> Self {
        self.gateway_location = location.into();
        self
    }
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let gateway_location = std::env::var("MODELOP_GATEWAY_LOCATION")
        .unwrap_or_else(|_| DEFAULT_GATEWAY_LOCATION.into());

    if url::Url::parse(&gateway_location).is_err() {
        anyhow::bail!(
            "MODELOP_GATEWAY_LOCATION is not a valid URL: {}",
            gateway_location
        );
    }

    Ok(Config {
        gateway_location,
        access_token: std::env::var("MODELOP_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty()),
        request_timeout_secs: parse_or("MODELOP_REQUEST_TIMEOUT_SECS", 30),
        max_retries: parse_or("MODELOP_MAX_RETRIES", 0),
    })
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
