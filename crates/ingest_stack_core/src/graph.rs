//! Declarative resource graph: nodes, relationship edges, and stack outputs.
//!
//! A graph is built once per orchestration run and is immutable afterwards.
//! Nothing in here talks to a cloud control plane; the graph is handed to an
//! external deployment engine for diffing and applying.

use serde::{Deserialize, Serialize};

use crate::resources::{
    EventSourceMappingSpec, FunctionSpec, NetworkSpec, QueueSpec, SecretSpec, SecurityGroupSpec,
    StreamSpec, VpcEndpointSpec,
};

/// One declared resource, tagged with the provider type it renders to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ResourceSpec {
    #[serde(rename = "aws:ec2:vpc")]
    Network(NetworkSpec),
    #[serde(rename = "aws:ec2:security-group")]
    SecurityGroup(SecurityGroupSpec),
    #[serde(rename = "aws:secretsmanager:secret")]
    Secret(SecretSpec),
    #[serde(rename = "aws:lambda:docker-image-function")]
    Function(FunctionSpec),
    #[serde(rename = "aws:kinesis:stream")]
    Stream(StreamSpec),
    #[serde(rename = "aws:sqs:queue")]
    Queue(QueueSpec),
    #[serde(rename = "aws:lambda:event-source-mapping")]
    EventSourceMapping(EventSourceMappingSpec),
    #[serde(rename = "aws:ec2:vpc-endpoint")]
    VpcEndpoint(VpcEndpointSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Network,
    SecurityGroup,
    Secret,
    Function,
    Stream,
    Queue,
    EventSourceMapping,
    VpcEndpoint,
}

impl ResourceSpec {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Network(_) => ResourceKind::Network,
            Self::SecurityGroup(_) => ResourceKind::SecurityGroup,
            Self::Secret(_) => ResourceKind::Secret,
            Self::Function(_) => ResourceKind::Function,
            Self::Stream(_) => ResourceKind::Stream,
            Self::Queue(_) => ResourceKind::Queue,
            Self::EventSourceMapping(_) => ResourceKind::EventSourceMapping,
            Self::VpcEndpoint(_) => ResourceKind::VpcEndpoint,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resource {
    pub logical_id: String,
    pub spec: ResourceSpec,
}

/// Directed relationship between two declared resources, `from` acting on
/// `to`: a secret grants read access to the function, a stream triggers the
/// function, the function is deployed into the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    GrantsRead,
    GrantsConsume,
    Triggers,
    DeployedInto,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub relation: Relation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAttribute {
    Arn,
    Id,
}

impl ResourceAttribute {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Arn => "Arn",
            Self::Id => "Id",
        }
    }
}

/// Output values are either known at construction time or deferred references
/// resolved by the deployment engine once the resource exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputValue {
    Literal(String),
    Attribute {
        resource: String,
        attribute: ResourceAttribute,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackOutput {
    pub key: String,
    pub value: OutputValue,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResourceGraph {
    pub resources: Vec<Resource>,
    pub edges: Vec<Edge>,
    pub outputs: Vec<StackOutput>,
}

impl ResourceGraph {
    pub fn add_resource(&mut self, logical_id: impl Into<String>, spec: ResourceSpec) {
        self.resources.push(Resource {
            logical_id: logical_id.into(),
            spec,
        });
    }

    pub fn add_edge(&mut self, from: impl Into<String>, to: impl Into<String>, relation: Relation) {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            relation,
        });
    }

    pub fn add_output(
        &mut self,
        key: impl Into<String>,
        value: OutputValue,
        description: impl Into<String>,
    ) {
        self.outputs.push(StackOutput {
            key: key.into(),
            value,
            description: description.into(),
        });
    }

    pub fn resource(&self, logical_id: &str) -> Option<&Resource> {
        self.resources
            .iter()
            .find(|resource| resource.logical_id == logical_id)
    }

    pub fn resources_of(&self, kind: ResourceKind) -> Vec<&Resource> {
        self.resources
            .iter()
            .filter(|resource| resource.spec.kind() == kind)
            .collect()
    }

    pub fn count_of(&self, kind: ResourceKind) -> usize {
        self.resources_of(kind).len()
    }

    pub fn has_edge(&self, from: &str, to: &str, relation: Relation) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.from == from && edge.to == to && edge.relation == relation)
    }

    /// All resources that declare a grant or trigger toward `logical_id`.
    pub fn edges_into(&self, logical_id: &str) -> Vec<&Edge> {
        self.edges
            .iter()
            .filter(|edge| edge.to == logical_id)
            .collect()
    }

    pub fn output(&self, key: &str) -> Option<&StackOutput> {
        self.outputs.iter().find(|output| output.key == key)
    }
}
