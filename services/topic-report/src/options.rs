use shared::config::Settings;
use shared::kafka::ClusterConfig;
use shared::kafka_versions::KafkaVersion;

use crate::error::ReportError;
use crate::selector::TopicFilter;

/// Run configuration, built once from the command line.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub brokers: Vec<String>,
    pub filter: TopicFilter,
    pub kafka_version: KafkaVersion,
}

impl ReportOptions {
    /// Validates the raw flag values. Nothing here touches the network, so an
    /// invalid regexp or version fails before any client exists.
    pub fn new(
        brokers: &str,
        business_regexp: &str,
        topic_grep: Option<&str>,
        kafka_version: &str,
    ) -> Result<Self, ReportError> {
        let filter = TopicFilter::new(business_regexp, topic_grep)?;
        let kafka_version = kafka_version.parse::<KafkaVersion>()?;
        let brokers = brokers
            .split(',')
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        Ok(Self {
            brokers,
            filter,
            kafka_version,
        })
    }

    pub fn cluster_config(&self, settings: Settings) -> ClusterConfig {
        ClusterConfig {
            brokers: self.brokers.clone(),
            version: self.kafka_version,
            settings,
        }
    }
}
