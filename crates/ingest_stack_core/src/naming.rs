//! Deterministic physical naming and graph fingerprinting.
//!
//! Every physical name derives from the project name and account id, so two
//! runs over identical configuration produce byte-identical names. The
//! fingerprint hashes the stable JSON form of a graph and is the cheap way to
//! assert structural idempotence.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::graph::ResourceGraph;

pub fn vpc_name(project: &str, account: &str) -> String {
    format!("{project}-{account}-vpc")
}

pub fn secret_name(project: &str, account: &str) -> String {
    format!("{project}-{account}-secret")
}

pub fn function_name(project: &str, account: &str) -> String {
    format!("{project}-{account}-processor")
}

pub fn stream_name(project: &str, account: &str) -> String {
    format!("{project}-{account}-stream")
}

pub fn queue_name(project: &str, account: &str) -> String {
    format!("{project}-{account}-queue")
}

/// URL form the queue is addressed by once deployed.
pub fn queue_url(region: &str, account: &str, queue_name: &str) -> String {
    format!("https://sqs.{region}.amazonaws.com/{account}/{queue_name}")
}

pub fn graph_fingerprint(graph: &ResourceGraph) -> String {
    let mut hasher = Sha256::new();
    hasher.update(stable_graph_json(graph));
    format!("{:x}", hasher.finalize())
}

pub fn stable_graph_json(value: impl Serialize) -> String {
    serde_json::to_string(&value).expect("serialization of graph value should not fail")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Relation, ResourceGraph};

    #[test]
    fn builds_expected_physical_names() {
        assert_eq!(vpc_name("telemetry", "123456789012"), "telemetry-123456789012-vpc");
        assert_eq!(
            secret_name("telemetry", "123456789012"),
            "telemetry-123456789012-secret"
        );
        assert_eq!(
            function_name("telemetry", "123456789012"),
            "telemetry-123456789012-processor"
        );
        assert_eq!(
            stream_name("telemetry", "123456789012"),
            "telemetry-123456789012-stream"
        );
        assert_eq!(
            queue_name("telemetry", "123456789012"),
            "telemetry-123456789012-queue"
        );
    }

    #[test]
    fn builds_queue_url_in_regional_form() {
        assert_eq!(
            queue_url("eu-central-1", "123456789012", "telemetry-123456789012-queue"),
            "https://sqs.eu-central-1.amazonaws.com/123456789012/telemetry-123456789012-queue"
        );
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive_to_structure() {
        let empty = ResourceGraph::default();
        assert_eq!(graph_fingerprint(&empty), graph_fingerprint(&empty));

        let mut other = ResourceGraph::default();
        other.add_edge("IngestStream", "ProcessorFunction", Relation::Triggers);
        assert_ne!(graph_fingerprint(&empty), graph_fingerprint(&other));
    }
}
