//! Read-only Kafka administration calls used to build topic reports.
//!
//! [`Cluster`] is the contract the reporting code is written against;
//! [`KafkaCluster`] fulfils it through librdkafka.

use std::collections::BTreeMap;
use std::time::Duration;

use rdkafka::consumer::{BaseConsumer, Consumer};
use rdkafka::error::RDKafkaErrorCode;
use rdkafka::{ClientConfig, Offset, TopicPartitionList};
use tracing::debug;

use crate::config::Settings;
use crate::error::ClusterError;
use crate::kafka_versions::KafkaVersion;

/// Topic attributes taken from cluster metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopicMetadata {
    /// Number of partitions reported by the broker. Zero when the broker
    /// returned the topic with an error.
    pub partitions: i32,
}

/// Which end of a partition log to query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetBound {
    Oldest,
    Newest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDescription {
    pub group_id: String,
    pub state: String,
    /// Member ids currently registered with the group coordinator.
    pub members: Vec<String>,
}

impl GroupDescription {
    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}

/// topic -> partition -> committed offset (`-1` when nothing is committed).
pub type CommittedOffsets = BTreeMap<String, BTreeMap<i32, i64>>;

/// Administrative queries issued against a cluster, one call at a time.
pub trait Cluster {
    fn list_topics(&self) -> Result<BTreeMap<String, TopicMetadata>, ClusterError>;

    fn list_partitions(&self, topic: &str) -> Result<Vec<i32>, ClusterError>;

    fn get_offset(
        &self,
        topic: &str,
        partition: i32,
        bound: OffsetBound,
    ) -> Result<i64, ClusterError>;

    /// Known consumer groups mapped to their coordinator state.
    fn list_consumer_groups(&self) -> Result<BTreeMap<String, String>, ClusterError>;

    /// Descriptions for the requested groups. Groups the coordinator does not
    /// know about are left out of the reply.
    fn describe_consumer_groups(
        &self,
        group_ids: &[String],
    ) -> Result<Vec<GroupDescription>, ClusterError>;

    /// Every committed offset of `group_id`, without a partition filter.
    fn list_consumer_group_offsets(&self, group_id: &str) -> Result<CommittedOffsets, ClusterError>;
}

/// Everything needed to open a client against one cluster.
#[derive(Debug, Clone)]
pub struct ClusterConfig {
    pub brokers: Vec<String>,
    /// Recorded for diagnostics; librdkafka negotiates API versions itself.
    pub version: KafkaVersion,
    pub settings: Settings,
}

impl ClusterConfig {
    /// librdkafka properties shared by every client this crate creates.
    pub fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::new();
        cfg.set("bootstrap.servers", self.brokers.join(","))
            .set("client.id", &self.settings.client_id)
            .set(
                "socket.connection.setup.timeout.ms",
                self.settings.dial_timeout_ms.to_string(),
            )
            .set("socket.timeout.ms", self.settings.request_timeout_ms.to_string())
            .set("enable.auto.commit", "false");
        cfg
    }
}

/// librdkafka-backed [`Cluster`]. The underlying client is closed when the
/// value is dropped.
pub struct KafkaCluster {
    consumer: BaseConsumer,
    config: ClusterConfig,
    timeout: Duration,
}

impl KafkaCluster {
    pub fn connect(config: ClusterConfig) -> Result<Self, ClusterError> {
        let consumer: BaseConsumer = config.client_config().create()?;
        debug!(
            brokers = %config.brokers.join(","),
            version = %config.version,
            "kafka client created"
        );
        let timeout = config.settings.request_timeout();
        Ok(Self {
            consumer,
            config,
            timeout,
        })
    }
}

impl Drop for KafkaCluster {
    fn drop(&mut self) {
        debug!("closing kafka client");
    }
}

impl Cluster for KafkaCluster {
    fn list_topics(&self) -> Result<BTreeMap<String, TopicMetadata>, ClusterError> {
        let metadata = self.consumer.fetch_metadata(None, self.timeout)?;
        Ok(metadata
            .topics()
            .iter()
            .map(|t| {
                (
                    t.name().to_string(),
                    TopicMetadata {
                        partitions: t.partitions().len() as i32,
                    },
                )
            })
            .collect())
    }

    fn list_partitions(&self, topic: &str) -> Result<Vec<i32>, ClusterError> {
        let metadata = self.consumer.fetch_metadata(Some(topic), self.timeout)?;
        let entry = metadata
            .topics()
            .iter()
            .find(|t| t.name() == topic)
            .ok_or_else(|| ClusterError::UnknownTopic(topic.to_string()))?;
        if let Some(err) = entry.error() {
            return Err(ClusterError::Topic {
                topic: topic.to_string(),
                reason: RDKafkaErrorCode::from(err).to_string(),
            });
        }
        Ok(entry.partitions().iter().map(|p| p.id()).collect())
    }

    fn get_offset(
        &self,
        topic: &str,
        partition: i32,
        bound: OffsetBound,
    ) -> Result<i64, ClusterError> {
        let (low, high) = self
            .consumer
            .fetch_watermarks(topic, partition, self.timeout)?;
        Ok(match bound {
            OffsetBound::Oldest => low,
            OffsetBound::Newest => high,
        })
    }

    fn list_consumer_groups(&self) -> Result<BTreeMap<String, String>, ClusterError> {
        let groups = self.consumer.fetch_group_list(None, self.timeout)?;
        Ok(groups
            .groups()
            .iter()
            .map(|g| (g.name().to_string(), g.state().to_string()))
            .collect())
    }

    fn describe_consumer_groups(
        &self,
        group_ids: &[String],
    ) -> Result<Vec<GroupDescription>, ClusterError> {
        let groups = self.consumer.fetch_group_list(None, self.timeout)?;
        Ok(groups
            .groups()
            .iter()
            .filter(|g| group_ids.iter().any(|id| id == g.name()))
            .map(|g| GroupDescription {
                group_id: g.name().to_string(),
                state: g.state().to_string(),
                members: g.members().iter().map(|m| m.id().to_string()).collect(),
            })
            .collect())
    }

    fn list_consumer_group_offsets(&self, group_id: &str) -> Result<CommittedOffsets, ClusterError> {
        let metadata = self.consumer.fetch_metadata(None, self.timeout)?;
        let mut tpl = TopicPartitionList::new();
        for topic in metadata.topics() {
            for partition in topic.partitions() {
                tpl.add_partition(topic.name(), partition.id());
            }
        }
        if tpl.count() == 0 {
            return Ok(CommittedOffsets::new());
        }

        // OffsetFetch is keyed on the client's own group.id.
        let group_consumer: BaseConsumer = self
            .config
            .client_config()
            .set("group.id", group_id)
            .create()?;
        let committed = group_consumer.committed_offsets(tpl, self.timeout)?;

        let mut offsets = CommittedOffsets::new();
        for elem in committed.elements() {
            let offset = match (elem.error(), elem.offset()) {
                (Ok(()), Offset::Offset(o)) => o,
                _ => -1,
            };
            offsets
                .entry(elem.topic().to_string())
                .or_default()
                .insert(elem.partition(), offset);
        }
        Ok(offsets)
    }
}
