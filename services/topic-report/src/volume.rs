//! Approximate message counts from partition offset bounds.

use std::collections::BTreeMap;

use shared::error::ClusterError;
use shared::kafka::{Cluster, OffsetBound, TopicMetadata};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicStats {
    pub partitions: i32,
    pub messages: i64,
}

/// Estimates the volume of every selected topic.
///
/// Topics whose partition count cannot be determined are left out of the
/// returned map; per-partition failures only drop that partition.
pub fn estimate_volumes<C: Cluster + ?Sized>(
    cluster: &C,
    topics: &BTreeMap<String, TopicMetadata>,
    selected: &[String],
) -> BTreeMap<String, TopicStats> {
    let mut stats = BTreeMap::new();
    for topic in selected {
        let partitions = match partition_count(cluster, topic, topics.get(topic)) {
            Ok(p) => p,
            Err(e) => {
                warn!(topic = %topic, %e, "failed to get partitions for topic");
                continue;
            }
        };
        stats.insert(topic.clone(), estimate_topic(cluster, topic, partitions));
    }
    stats
}

fn partition_count<C: Cluster + ?Sized>(
    cluster: &C,
    topic: &str,
    metadata: Option<&TopicMetadata>,
) -> Result<i32, ClusterError> {
    match metadata {
        Some(m) if m.partitions > 0 => Ok(m.partitions),
        _ => Ok(cluster.list_partitions(topic)?.len() as i32),
    }
}

fn estimate_topic<C: Cluster + ?Sized>(cluster: &C, topic: &str, partitions: i32) -> TopicStats {
    let mut oldest_sum = 0i64;
    let mut newest_sum = 0i64;

    for partition in 0..partitions {
        let oldest = match cluster.get_offset(topic, partition, OffsetBound::Oldest) {
            Ok(o) => o,
            Err(e) => {
                warn!(topic = %topic, partition, %e, "GetOffset(Oldest) failed");
                continue;
            }
        };
        let newest = match cluster.get_offset(topic, partition, OffsetBound::Newest) {
            Ok(o) => o,
            Err(e) => {
                warn!(topic = %topic, partition, %e, "GetOffset(Newest) failed");
                continue;
            }
        };
        // negative offsets mean "unknown"
        oldest_sum += oldest.max(0);
        newest_sum += newest.max(0);
    }

    let messages = estimate_messages(oldest_sum, newest_sum);
    debug!(
        topic = %topic,
        partitions,
        oldest_sum,
        newest_sum,
        messages,
        "estimated topic volume"
    );
    TopicStats {
        partitions,
        messages,
    }
}

/// `newest - oldest`, or `newest` alone when the difference is negative.
///
/// The difference can go negative when leadership moves or the log is
/// truncated between the two reads; falling back to the newest sum is a
/// heuristic, not an exact count.
pub fn estimate_messages(oldest_sum: i64, newest_sum: i64) -> i64 {
    let messages = newest_sum - oldest_sum;
    if messages < 0 {
        newest_sum
    } else {
        messages
    }
}
