use shared::error::{ClusterError, ConfigError};
use thiserror::Error;

/// Errors that abort a report run.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid business-regexp")]
    InvalidRegexp(#[from] regex::Error),
    #[error("invalid kafka-version")]
    Config(#[from] ConfigError),
    #[error("failed to list topics")]
    ListTopics(#[source] ClusterError),
    #[error("failed to write report")]
    Io(#[from] std::io::Error),
}
