//! CSV output of the topic report.
//!
//! Fields are written as-is; a topic name containing a comma will break the
//! column layout.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use crate::volume::TopicStats;

pub const HEADER: &str = "topic,partitions,consumers,messages";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub topic: String,
    pub partitions: i32,
    pub consumers: i64,
    pub messages: i64,
}

impl fmt::Display for ReportRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.topic, self.partitions, self.consumers, self.messages
        )
    }
}

/// Joins volume and consumer data into one row per selected topic, keeping
/// the order of `selected`. Missing data becomes zero.
pub fn build_rows(
    selected: &[String],
    stats: &BTreeMap<String, TopicStats>,
    consumers: &BTreeMap<String, i64>,
) -> Vec<ReportRow> {
    selected
        .iter()
        .map(|topic| {
            let s = stats.get(topic).copied().unwrap_or_default();
            ReportRow {
                topic: topic.clone(),
                partitions: s.partitions,
                consumers: consumers.get(topic).copied().unwrap_or(0),
                messages: s.messages,
            }
        })
        .collect()
}

pub fn write_header<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{HEADER}")
}

pub fn write_rows<W: Write + ?Sized>(out: &mut W, rows: &[ReportRow]) -> io::Result<()> {
    for row in rows {
        writeln!(out, "{row}")?;
    }
    Ok(())
}
