//! Typed specifications for every resource the stack can declare.
//!
//! These are plain data. Fixed parameters (timeouts, memory, batch sizes)
//! live here as constants so the orchestrator and its tests share one source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const NETWORK_MAX_AZS: u32 = 1;
pub const FUNCTION_TIMEOUT_SECONDS: u64 = 30;
pub const FUNCTION_MEMORY_MB: u32 = 3008;
pub const EVENT_BATCH_SIZE: u32 = 10;
pub const STREAM_SHARD_COUNT: u32 = 1;
pub const QUEUE_VISIBILITY_TIMEOUT_SECONDS: u64 = 30;
pub const QUEUE_RETENTION_DAYS: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubnetKind {
    PrivateWithEgress,
    Public,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubnetSpec {
    pub name: String,
    pub kind: SubnetKind,
}

/// One logical network segment. A single availability zone keeps the stack
/// minimal; production deployments would spread across several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkSpec {
    pub name: String,
    pub max_azs: u32,
    pub subnets: Vec<SubnetSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecurityGroupSpec {
    pub network: String,
    pub allow_all_outbound: bool,
}

/// Secret container seeded with the database credentials. The supplied
/// password is embedded verbatim in the creation template alongside the other
/// connection fields; one extra key named after the project is generated at
/// creation time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SecretSpec {
    pub name: String,
    pub template: BTreeMap<String, String>,
    pub generate_key: String,
    pub exclude_punctuation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Architecture {
    Arm64,
    X86_64,
}

/// Container-image function placed in the private subnet with outbound-only
/// network access.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionSpec {
    pub name: String,
    pub image_asset: String,
    pub architecture: Architecture,
    pub timeout_seconds: u64,
    pub memory_mb: u32,
    pub network: String,
    pub subnet: SubnetKind,
    pub security_group: String,
    pub environment: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    Retain,
    Destroy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StreamSpec {
    pub name: String,
    pub shard_count: u32,
    pub removal_policy: RemovalPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueueSpec {
    pub name: String,
    pub visibility_timeout_seconds: u64,
    pub retention_days: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingPosition {
    TrimHorizon,
    Latest,
}

/// Wires an event source to a function. `starting_position` only applies to
/// stream sources; queue sources consume from the head.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventSourceMappingSpec {
    pub function: String,
    pub source: String,
    pub batch_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_position: Option<StartingPosition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndpointService {
    KinesisStreams,
}

/// Interface endpoint so the private subnet can reach the streaming service
/// without traversing the public internet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VpcEndpointSpec {
    pub network: String,
    pub service: EndpointService,
    pub subnet: SubnetKind,
    pub private_dns_enabled: bool,
}
