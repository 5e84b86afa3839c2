#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use shared::error::ClusterError;
use shared::kafka::{Cluster, CommittedOffsets, GroupDescription, OffsetBound, TopicMetadata};

fn unavailable(what: &str) -> ClusterError {
    ClusterError::Topic {
        topic: what.to_string(),
        reason: "request timed out".to_string(),
    }
}

/// In-memory cluster with switchable failures.
#[derive(Default)]
pub struct MemoryCluster {
    pub topics: BTreeMap<String, TopicMetadata>,
    pub partitions: BTreeMap<String, Vec<i32>>,
    /// (topic, partition) -> (oldest, newest)
    pub offsets: BTreeMap<(String, i32), (i64, i64)>,
    pub groups: BTreeMap<String, GroupDescription>,
    pub committed: BTreeMap<String, CommittedOffsets>,

    pub fail_list_topics: bool,
    pub fail_list_groups: bool,
    pub fail_describe: bool,
    pub fail_partitions: BTreeSet<String>,
    pub fail_offsets: BTreeSet<(String, i32, bool)>,
    pub fail_group_offsets: BTreeSet<String>,
    /// Groups listed but left out of the describe reply.
    pub undescribed: BTreeSet<String>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a topic whose partition `i` has the `i`-th offset pair.
    pub fn topic(mut self, name: &str, bounds: &[(i64, i64)]) -> Self {
        self.topics.insert(
            name.to_string(),
            TopicMetadata {
                partitions: bounds.len() as i32,
            },
        );
        self.partitions
            .insert(name.to_string(), (0..bounds.len() as i32).collect());
        for (p, bound) in bounds.iter().enumerate() {
            self.offsets.insert((name.to_string(), p as i32), *bound);
        }
        self
    }

    pub fn group(mut self, id: &str, members: usize, committed: &[(&str, i32, i64)]) -> Self {
        self.groups.insert(
            id.to_string(),
            GroupDescription {
                group_id: id.to_string(),
                state: if members > 0 { "Stable" } else { "Empty" }.to_string(),
                members: (0..members).map(|m| format!("{id}-member-{m}")).collect(),
            },
        );
        let mut offsets = CommittedOffsets::new();
        for (topic, partition, offset) in committed {
            offsets
                .entry(topic.to_string())
                .or_default()
                .insert(*partition, *offset);
        }
        self.committed.insert(id.to_string(), offsets);
        self
    }

    pub fn failing_offset(mut self, topic: &str, partition: i32, bound: OffsetBound) -> Self {
        self.fail_offsets
            .insert((topic.to_string(), partition, bound == OffsetBound::Oldest));
        self
    }
}

impl Cluster for MemoryCluster {
    fn list_topics(&self) -> Result<BTreeMap<String, TopicMetadata>, ClusterError> {
        if self.fail_list_topics {
            return Err(unavailable("metadata"));
        }
        Ok(self.topics.clone())
    }

    fn list_partitions(&self, topic: &str) -> Result<Vec<i32>, ClusterError> {
        if self.fail_partitions.contains(topic) {
            return Err(unavailable(topic));
        }
        self.partitions
            .get(topic)
            .cloned()
            .ok_or_else(|| ClusterError::UnknownTopic(topic.to_string()))
    }

    fn get_offset(
        &self,
        topic: &str,
        partition: i32,
        bound: OffsetBound,
    ) -> Result<i64, ClusterError> {
        let oldest = bound == OffsetBound::Oldest;
        if self
            .fail_offsets
            .contains(&(topic.to_string(), partition, oldest))
        {
            return Err(unavailable(topic));
        }
        let (low, high) = self
            .offsets
            .get(&(topic.to_string(), partition))
            .copied()
            .ok_or_else(|| ClusterError::UnknownTopic(topic.to_string()))?;
        Ok(if oldest { low } else { high })
    }

    fn list_consumer_groups(&self) -> Result<BTreeMap<String, String>, ClusterError> {
        if self.fail_list_groups {
            return Err(unavailable("groups"));
        }
        Ok(self
            .groups
            .iter()
            .map(|(id, g)| (id.clone(), g.state.clone()))
            .collect())
    }

    fn describe_consumer_groups(
        &self,
        group_ids: &[String],
    ) -> Result<Vec<GroupDescription>, ClusterError> {
        if self.fail_describe {
            return Err(unavailable("groups"));
        }
        Ok(group_ids
            .iter()
            .filter(|id| !self.undescribed.contains(*id))
            .filter_map(|id| self.groups.get(id).cloned())
            .collect())
    }

    fn list_consumer_group_offsets(&self, group_id: &str) -> Result<CommittedOffsets, ClusterError> {
        if self.fail_group_offsets.contains(group_id) {
            return Err(unavailable(group_id));
        }
        Ok(self.committed.get(group_id).cloned().unwrap_or_default())
    }
}

pub fn names(topics: &[&str]) -> Vec<String> {
    topics.iter().map(|t| t.to_string()).collect()
}
