//! Attributes active consumer group members to the topics they consume.

use std::collections::{BTreeMap, BTreeSet};

use shared::kafka::Cluster;
use tracing::{debug, warn};

/// Sum of active member counts per selected topic.
///
/// A group counts towards a topic when it has at least one member and at
/// least one partition of that topic with a committed offset `>= 0`. Topics
/// nobody consumes are absent from the map.
pub fn attribute_consumers<C: Cluster + ?Sized>(
    cluster: &C,
    selected: &[String],
) -> BTreeMap<String, i64> {
    let mut consumers = BTreeMap::new();

    let groups = match cluster.list_consumer_groups() {
        Ok(g) => g,
        Err(e) => {
            warn!(%e, "failed to list consumer groups");
            return consumers;
        }
    };
    let mut group_ids: Vec<String> = groups.into_keys().collect();
    group_ids.sort();
    if group_ids.is_empty() {
        return consumers;
    }

    let members = active_members(cluster, &group_ids);
    let selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();

    for group in &group_ids {
        let count = members.get(group).copied().unwrap_or(0);
        if count == 0 {
            continue;
        }

        let offsets = match cluster.list_consumer_group_offsets(group) {
            Ok(o) => o,
            Err(e) => {
                warn!(group = %group, %e, "ListConsumerGroupOffsets failed");
                continue;
            }
        };

        for (topic, partitions) in &offsets {
            if !selected.contains(topic.as_str()) {
                continue;
            }
            if !is_consuming(partitions) {
                continue;
            }
            *consumers.entry(topic.clone()).or_insert(0) += count;
        }
    }
    consumers
}

/// Member count per group id; groups missing from the describe reply are absent.
fn active_members<C: Cluster + ?Sized>(cluster: &C, group_ids: &[String]) -> BTreeMap<String, i64> {
    match cluster.describe_consumer_groups(group_ids) {
        Ok(descriptions) => descriptions
            .into_iter()
            .map(|d| {
                debug!(
                    group = %d.group_id,
                    state = %d.state,
                    members = d.member_count(),
                    "described consumer group"
                );
                (d.group_id, d.members.len() as i64)
            })
            .collect(),
        Err(e) => {
            warn!(%e, "DescribeConsumerGroups failed");
            BTreeMap::new()
        }
    }
}

fn is_consuming(partitions: &BTreeMap<i32, i64>) -> bool {
    partitions.values().any(|offset| *offset >= 0)
}
