//! Building blocks shared by the reporting tools: environment settings,
//! error types, the supported Kafka protocol versions and read-only cluster
//! access.

pub mod config;
pub mod error;
pub mod kafka;
pub mod kafka_versions;
