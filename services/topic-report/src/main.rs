//! Prints `topic,partitions,consumers,messages` for the business topics of a
//! Kafka cluster.

use std::io;

use anyhow::Context;
use clap::Parser;
use shared::config::Settings;
use shared::kafka::KafkaCluster;
use shared::kafka_versions::DEFAULT_KAFKA_VERSION;
use topic_report::ReportOptions;
use tracing_subscriber::{fmt, EnvFilter};

/// Kafka topic report: partitions, active consumers and approximate messages.
#[derive(Parser, Debug)]
#[command(name = "topic-report", version, about)]
struct Args {
    /// Comma-separated list of Kafka brokers.
    #[arg(long, default_value = "localhost:9092")]
    brokers: String,

    /// Regexp for business topics (default: not starting with _).
    #[arg(long, default_value = "^[^_].*")]
    business_regexp: String,

    /// Optional substring filter for topic names.
    #[arg(long)]
    topic_grep: Option<String>,

    /// Kafka protocol version (2.0.0 .. 3.4.0).
    #[arg(long, default_value = DEFAULT_KAFKA_VERSION)]
    kafka_version: String,

    /// Verbose logging to stderr.
    #[arg(short = 'v')]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = ReportOptions::new(
        &args.brokers,
        &args.business_regexp,
        args.topic_grep.as_deref(),
        &args.kafka_version,
    )?;
    let settings = Settings::new().context("failed to load settings")?;

    let cluster = KafkaCluster::connect(options.cluster_config(settings))
        .context("failed to create Kafka client")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    topic_report::run(&cluster, &options, &mut out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["topic-report"]).unwrap();
        assert_eq!(args.brokers, "localhost:9092");
        assert_eq!(args.business_regexp, "^[^_].*");
        assert_eq!(args.topic_grep, None);
        assert_eq!(args.kafka_version, "2.7.0");
        assert!(!args.verbose);
    }

    #[test]
    fn long_flags_and_verbose() {
        let args = Args::try_parse_from([
            "topic-report",
            "--brokers",
            "k1:9092,k2:9092",
            "--business-regexp",
            "^orders",
            "--topic-grep",
            "eu",
            "--kafka-version=3.4.0",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.brokers, "k1:9092,k2:9092");
        assert_eq!(args.business_regexp, "^orders");
        assert_eq!(args.topic_grep.as_deref(), Some("eu"));
        assert_eq!(args.kafka_version, "3.4.0");
        assert!(args.verbose);
    }
}
