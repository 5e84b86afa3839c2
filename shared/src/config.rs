use std::time::Duration;

use serde::Deserialize;

fn default_dial_timeout_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_client_id() -> String {
    "topic-report".into()
}

/// Client tunables read once at startup from `TOPIC_REPORT_*` variables.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("TOPIC_REPORT").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn dial_timeout(&self) -> Duration {
        Duration::from_millis(self.dial_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dial_timeout_ms: default_dial_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            client_id: default_client_id(),
        }
    }
}
