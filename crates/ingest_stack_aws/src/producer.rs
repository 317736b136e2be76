//! Push loop for feeding sample telemetry into a deployed stack.
//!
//! The deployed selector is discovered from the stack's outputs, the push
//! target is derived from the same deterministic names the orchestrator used,
//! and every record flows through the injected `RecordSink` so the loop is
//! testable without cloud access.

use std::time::Duration;

use rand::Rng;

use ingest_stack_core::config::{EventSourceKind, StackConfig};
use ingest_stack_core::naming;
use ingest_stack_core::orchestrator::OUTPUT_STREAMING_SERVICE;

use crate::adapters::outputs::StackOutputsSource;
use crate::adapters::sink::RecordSink;
use crate::telemetry::TelemetryRecord;

/// Partition key passed with every stream record. The original tooling sends
/// the literal field name rather than the per-record value; with a one-shard
/// stream the distribution is the same either way.
pub const PARTITION_KEY: &str = "vehicle_id";
pub const DEFAULT_RECORD_COUNT: usize = 50;
pub const DEFAULT_RECORD_INTERVAL_MS: u64 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTarget {
    Kinesis { stream_name: String },
    Sqs { queue_url: String },
}

impl std::fmt::Display for PushTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Kinesis { stream_name } => write!(f, "Kinesis stream {stream_name}"),
            Self::Sqs { queue_url } => write!(f, "SQS queue {queue_url}"),
        }
    }
}

/// Resolves where records should go by asking the deployed stack which
/// service it provisioned.
pub fn resolve_target(
    config: &StackConfig,
    outputs: &dyn StackOutputsSource,
) -> Result<PushTarget, String> {
    let selector = outputs
        .output_value(OUTPUT_STREAMING_SERVICE)?
        .ok_or_else(|| format!("stack output {OUTPUT_STREAMING_SERVICE} not found"))?;

    match EventSourceKind::from_selector(&selector) {
        EventSourceKind::Kinesis => Ok(PushTarget::Kinesis {
            stream_name: naming::stream_name(&config.project_name, &config.account_id),
        }),
        EventSourceKind::Sqs => Ok(PushTarget::Sqs {
            queue_url: naming::queue_url(
                &config.region,
                &config.account_id,
                &naming::queue_name(&config.project_name, &config.account_id),
            ),
        }),
        EventSourceKind::None => Err(format!(
            "deployed stack reports no recognized streaming service (got {selector:?})"
        )),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushSummary {
    pub records_pushed: usize,
}

/// Generates `count` telemetry records and pushes each through the sink.
/// Stops at the first sink failure.
pub fn push_records(
    sink: &dyn RecordSink,
    rng: &mut impl Rng,
    count: usize,
) -> Result<PushSummary, String> {
    for _ in 0..count {
        let record = TelemetryRecord::sample(rng);
        let payload = serde_json::to_vec(&record)
            .map_err(|error| format!("failed to serialize telemetry record: {error}"))?;
        sink.push(PARTITION_KEY, &payload)?;
    }

    Ok(PushSummary {
        records_pushed: count,
    })
}

/// Sink wrapper that spaces pushes out to a fixed interval, matching the
/// streaming rate of the original tooling.
pub struct PacedSink<S: RecordSink> {
    inner: S,
    interval: Duration,
}

impl<S: RecordSink> PacedSink<S> {
    pub fn new(inner: S, interval: Duration) -> Self {
        Self { inner, interval }
    }
}

impl<S: RecordSink> RecordSink for PacedSink<S> {
    fn push(&self, partition_key: &str, payload: &[u8]) -> Result<(), String> {
        self.inner.push(partition_key, payload)?;
        std::thread::sleep(self.interval);
        Ok(())
    }
}
