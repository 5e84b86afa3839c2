use rdkafka::error::KafkaError;
use thiserror::Error;

/// Failure of a single administrative call against the cluster.
#[derive(Error, Debug)]
pub enum ClusterError {
    #[error("Kafka client error: {0}")]
    Client(#[from] KafkaError),
    #[error("topic {0} is not present in cluster metadata")]
    UnknownTopic(String),
    #[error("broker reported an error for topic {topic}: {reason}")]
    Topic { topic: String, reason: String },
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported version {0:?}, use one of: 2.0.0..3.4.0")]
    UnsupportedVersion(String),
}
