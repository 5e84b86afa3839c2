//! Picks the business topics out of the full cluster listing.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::ReportError;

/// Inclusion regex plus an optional substring a topic name must contain.
#[derive(Debug, Clone)]
pub struct TopicFilter {
    business: Regex,
    grep: Option<String>,
}

impl TopicFilter {
    /// Compiles the filter. An empty `topic_grep` disables substring matching.
    pub fn new(business_regexp: &str, topic_grep: Option<&str>) -> Result<Self, ReportError> {
        let business = Regex::new(business_regexp)?;
        let grep = topic_grep.filter(|g| !g.is_empty()).map(str::to_string);
        Ok(Self { business, grep })
    }

    pub fn matches(&self, topic: &str) -> bool {
        if !self.business.is_match(topic) {
            return false;
        }
        match &self.grep {
            Some(grep) => topic.contains(grep.as_str()),
            None => true,
        }
    }
}

/// Names of all topics passing `filter`, ascending.
pub fn select_topics<V>(topics: &BTreeMap<String, V>, filter: &TopicFilter) -> Vec<String> {
    topics
        .keys()
        .filter(|name| filter.matches(name))
        .cloned()
        .collect()
}
