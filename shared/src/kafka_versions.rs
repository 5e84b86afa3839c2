//! Central registry for the Kafka protocol versions the client can be pinned to.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// All supported Kafka protocol versions, oldest first.
pub const KAFKA_VERSIONS: &[&str] = &[
    "2.0.0", "2.1.0", "2.2.0", "2.3.0", "2.4.0", "2.5.0", "2.6.0", "2.7.0", "2.8.0", "3.0.0",
    "3.1.0", "3.2.0", "3.3.0", "3.4.0",
];

/// Version used when none is given on the command line.
pub const DEFAULT_KAFKA_VERSION: &str = "2.7.0";

/// A validated entry of [`KAFKA_VERSIONS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KafkaVersion(&'static str);

impl KafkaVersion {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl FromStr for KafkaVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KAFKA_VERSIONS
            .iter()
            .copied()
            .find(|v| *v == s)
            .map(KafkaVersion)
            .ok_or_else(|| ConfigError::UnsupportedVersion(s.to_string()))
    }
}

impl Default for KafkaVersion {
    fn default() -> Self {
        KafkaVersion(DEFAULT_KAFKA_VERSION)
    }
}

impl fmt::Display for KafkaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
