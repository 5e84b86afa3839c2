//! Per-topic partition, consumer and message-volume report for a Kafka
//! cluster.
//!
//! [`run`] lists topics, keeps the business topics, estimates their volume
//! from offset bounds, attributes active consumer group members to them and
//! writes one CSV line per topic.

pub mod consumers;
pub mod error;
pub mod options;
pub mod report;
pub mod selector;
pub mod volume;

use std::io::Write;

use shared::kafka::Cluster;
use tracing::info;

pub use error::ReportError;
pub use options::ReportOptions;
pub use report::ReportRow;

/// Builds the report and writes it to `out`.
///
/// The header is written as soon as the topic listing succeeded, so a run
/// that selects nothing still produces it. Only a failed topic listing or a
/// write error aborts; everything else degrades to zero values.
pub fn run<C, W>(cluster: &C, options: &ReportOptions, out: &mut W) -> Result<Vec<ReportRow>, ReportError>
where
    C: Cluster + ?Sized,
    W: Write + ?Sized,
{
    let topics = cluster.list_topics().map_err(ReportError::ListTopics)?;
    let selected = selector::select_topics(&topics, &options.filter);

    report::write_header(out)?;
    if selected.is_empty() {
        out.flush()?;
        return Ok(Vec::new());
    }
    info!("found {} business topics", selected.len());

    let stats = volume::estimate_volumes(cluster, &topics, &selected);
    let consumers = consumers::attribute_consumers(cluster, &selected);

    let rows = report::build_rows(&selected, &stats, &consumers);
    report::write_rows(out, &rows)?;
    out.flush()?;
    Ok(rows)
}
