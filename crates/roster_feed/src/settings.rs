use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:30120/monitor/players.json";

#[derive(Debug, Clone, PartialEq)]
pub struct FeedSettings {
    pub endpoint: String,
    /// Opaque auth token sent with every request.
    pub token: String,
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: String::new(),
            poll_interval: Duration::from_millis(5000),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}
