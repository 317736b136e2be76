//! Single-pass construction of the stack's resource graph.
//!
//! `build` is total and pure: it performs no I/O, cannot fail, and produces a
//! structurally identical graph for identical configuration. Required-field
//! enforcement happens at the process boundary via `StackConfig::validate`.

use std::collections::BTreeMap;

use crate::config::{EventSourceKind, StackConfig};
use crate::graph::{OutputValue, Relation, ResourceAttribute, ResourceGraph, ResourceSpec};
use crate::naming;
use crate::resources::{
    Architecture, EndpointService, EventSourceMappingSpec, FunctionSpec, NetworkSpec, QueueSpec,
    RemovalPolicy, SecretSpec, SecurityGroupSpec, StartingPosition, StreamSpec, SubnetKind,
    SubnetSpec, VpcEndpointSpec, EVENT_BATCH_SIZE, FUNCTION_MEMORY_MB, FUNCTION_TIMEOUT_SECONDS,
    NETWORK_MAX_AZS, QUEUE_RETENTION_DAYS, QUEUE_VISIBILITY_TIMEOUT_SECONDS, STREAM_SHARD_COUNT,
};

/// Name the deployment engine registers the whole stack under.
pub const STACK_NAME: &str = "StreamingIngestStack";

pub const NETWORK_ID: &str = "IngestVpc";
pub const SECRET_ID: &str = "DbCredentialsSecret";
pub const SECURITY_GROUP_ID: &str = "ProcessorSecurityGroup";
pub const FUNCTION_ID: &str = "ProcessorFunction";
pub const STREAM_ID: &str = "IngestStream";
pub const QUEUE_ID: &str = "IngestQueue";
pub const STREAM_TRIGGER_ID: &str = "StreamTrigger";
pub const QUEUE_TRIGGER_ID: &str = "QueueTrigger";
pub const STREAM_ENDPOINT_ID: &str = "KinesisEndpoint";

pub const OUTPUT_STREAMING_SERVICE: &str = "StreamingService";
pub const OUTPUT_FUNCTION_ARN: &str = "ProcessorFunctionArn";
pub const OUTPUT_VPC_ID: &str = "VpcId";
pub const OUTPUT_STREAM_ARN: &str = "StreamArn";
pub const OUTPUT_QUEUE_ARN: &str = "QueueArn";

// Environment contract of the deployed processor function.
pub const FUNCTION_ENV_SECRET_NAME: &str = "SECRET_NAME";
pub const FUNCTION_ENV_REGION: &str = "REGION";
pub const FUNCTION_ENV_SERVICE: &str = "SERVICE";

// Keys of the secret's creation template, read back by the function runtime.
pub const SECRET_KEY_USERNAME: &str = "DB_USERNAME";
pub const SECRET_KEY_PASSWORD: &str = "PASSWORD";
pub const SECRET_KEY_ENDPOINT: &str = "ENDPOINT";
pub const SECRET_KEY_DATABASE: &str = "DATABASE_NAME";
pub const SECRET_KEY_TABLE: &str = "DESTINATION_TABLE";

pub const PRIVATE_SUBNET_NAME: &str = "PrivateSubnet";
pub const PUBLIC_SUBNET_NAME: &str = "PublicSubnet";
pub const FUNCTION_IMAGE_ASSET: &str = "lambda";

/// Builds the full resource graph for one environment description.
pub fn build(config: &StackConfig) -> ResourceGraph {
    let project = config.project_name.as_str();
    let account = config.account_id.as_str();
    let mut graph = ResourceGraph::default();

    graph.add_resource(
        NETWORK_ID,
        ResourceSpec::Network(NetworkSpec {
            name: naming::vpc_name(project, account),
            max_azs: NETWORK_MAX_AZS,
            subnets: vec![
                SubnetSpec {
                    name: PRIVATE_SUBNET_NAME.to_string(),
                    kind: SubnetKind::PrivateWithEgress,
                },
                SubnetSpec {
                    name: PUBLIC_SUBNET_NAME.to_string(),
                    kind: SubnetKind::Public,
                },
            ],
        }),
    );

    let secret_name = naming::secret_name(project, account);
    graph.add_resource(
        SECRET_ID,
        ResourceSpec::Secret(SecretSpec {
            name: secret_name.clone(),
            template: credential_template(config),
            generate_key: config.project_name.clone(),
            exclude_punctuation: true,
        }),
    );

    graph.add_resource(
        SECURITY_GROUP_ID,
        ResourceSpec::SecurityGroup(SecurityGroupSpec {
            network: NETWORK_ID.to_string(),
            allow_all_outbound: true,
        }),
    );

    graph.add_resource(
        FUNCTION_ID,
        ResourceSpec::Function(FunctionSpec {
            name: naming::function_name(project, account),
            image_asset: FUNCTION_IMAGE_ASSET.to_string(),
            architecture: Architecture::Arm64,
            timeout_seconds: FUNCTION_TIMEOUT_SECONDS,
            memory_mb: FUNCTION_MEMORY_MB,
            network: NETWORK_ID.to_string(),
            subnet: SubnetKind::PrivateWithEgress,
            security_group: SECURITY_GROUP_ID.to_string(),
            environment: BTreeMap::from([
                (FUNCTION_ENV_SECRET_NAME.to_string(), secret_name),
                (FUNCTION_ENV_REGION.to_string(), config.region.clone()),
                (
                    FUNCTION_ENV_SERVICE.to_string(),
                    config.streaming_service.clone(),
                ),
            ]),
        }),
    );
    graph.add_edge(FUNCTION_ID, NETWORK_ID, Relation::DeployedInto);
    graph.add_edge(SECRET_ID, FUNCTION_ID, Relation::GrantsRead);

    match config.event_source() {
        EventSourceKind::Kinesis => add_stream_source(&mut graph, project, account),
        EventSourceKind::Sqs => add_queue_source(&mut graph, project, account),
        EventSourceKind::None => {}
    }

    graph.add_output(
        OUTPUT_STREAMING_SERVICE,
        OutputValue::Literal(config.streaming_service.clone()),
        "The name of the streaming service used.",
    );
    graph.add_output(
        OUTPUT_FUNCTION_ARN,
        OutputValue::Attribute {
            resource: FUNCTION_ID.to_string(),
            attribute: ResourceAttribute::Arn,
        },
        "The ARN of the processor function",
    );
    graph.add_output(
        OUTPUT_VPC_ID,
        OutputValue::Attribute {
            resource: NETWORK_ID.to_string(),
            attribute: ResourceAttribute::Id,
        },
        "VPC Id",
    );

    graph
}

fn add_stream_source(graph: &mut ResourceGraph, project: &str, account: &str) {
    graph.add_resource(
        STREAM_ID,
        ResourceSpec::Stream(StreamSpec {
            name: naming::stream_name(project, account),
            shard_count: STREAM_SHARD_COUNT,
            removal_policy: RemovalPolicy::Destroy,
        }),
    );
    graph.add_edge(STREAM_ID, FUNCTION_ID, Relation::GrantsRead);

    graph.add_resource(
        STREAM_TRIGGER_ID,
        ResourceSpec::EventSourceMapping(EventSourceMappingSpec {
            function: FUNCTION_ID.to_string(),
            source: STREAM_ID.to_string(),
            batch_size: EVENT_BATCH_SIZE,
            starting_position: Some(StartingPosition::TrimHorizon),
        }),
    );
    graph.add_edge(STREAM_ID, FUNCTION_ID, Relation::Triggers);

    graph.add_resource(
        STREAM_ENDPOINT_ID,
        ResourceSpec::VpcEndpoint(VpcEndpointSpec {
            network: NETWORK_ID.to_string(),
            service: EndpointService::KinesisStreams,
            subnet: SubnetKind::PrivateWithEgress,
            private_dns_enabled: true,
        }),
    );

    graph.add_output(
        OUTPUT_STREAM_ARN,
        OutputValue::Attribute {
            resource: STREAM_ID.to_string(),
            attribute: ResourceAttribute::Arn,
        },
        "The ARN of the Kinesis Data Stream",
    );
}

fn add_queue_source(graph: &mut ResourceGraph, project: &str, account: &str) {
    graph.add_resource(
        QUEUE_ID,
        ResourceSpec::Queue(QueueSpec {
            name: naming::queue_name(project, account),
            visibility_timeout_seconds: QUEUE_VISIBILITY_TIMEOUT_SECONDS,
            retention_days: QUEUE_RETENTION_DAYS,
        }),
    );
    graph.add_edge(QUEUE_ID, FUNCTION_ID, Relation::GrantsConsume);

    graph.add_resource(
        QUEUE_TRIGGER_ID,
        ResourceSpec::EventSourceMapping(EventSourceMappingSpec {
            function: FUNCTION_ID.to_string(),
            source: QUEUE_ID.to_string(),
            batch_size: EVENT_BATCH_SIZE,
            starting_position: None,
        }),
    );
    graph.add_edge(QUEUE_ID, FUNCTION_ID, Relation::Triggers);

    graph.add_output(
        OUTPUT_QUEUE_ARN,
        OutputValue::Attribute {
            resource: QUEUE_ID.to_string(),
            attribute: ResourceAttribute::Arn,
        },
        "The ARN of the SQS Queue",
    );
}

/// The secret's creation template embeds the supplied credential fields
/// verbatim, the password included. That mirrors the deployed system as it
/// exists; see DESIGN.md for why it is preserved rather than fixed.
fn credential_template(config: &StackConfig) -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            SECRET_KEY_USERNAME.to_string(),
            config.db_username.clone(),
        ),
        (
            SECRET_KEY_PASSWORD.to_string(),
            config.db_password.clone(),
        ),
        (SECRET_KEY_ENDPOINT.to_string(), config.db_endpoint.clone()),
        (
            SECRET_KEY_DATABASE.to_string(),
            config.database_name.clone(),
        ),
        (
            SECRET_KEY_TABLE.to_string(),
            config.destination_table.clone(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ResourceKind;
    use crate::naming::graph_fingerprint;

    fn sample_config(streaming_service: &str) -> StackConfig {
        StackConfig {
            project_name: "telemetry".to_string(),
            region: "eu-central-1".to_string(),
            account_id: "123456789012".to_string(),
            db_endpoint: "svc-1234.aws-frankfurt-1.svc.singlestore.com".to_string(),
            db_username: "admin".to_string(),
            db_password: "hunter2".to_string(),
            database_name: "vehicles".to_string(),
            destination_table: "telemetry_events".to_string(),
            streaming_service: streaming_service.to_string(),
        }
    }

    #[test]
    fn every_graph_has_one_network_secret_and_function() {
        for selector in ["Kinesis", "SQS", "", "Kafka"] {
            let graph = build(&sample_config(selector));

            assert_eq!(graph.count_of(ResourceKind::Network), 1);
            assert_eq!(graph.count_of(ResourceKind::Secret), 1);
            assert_eq!(graph.count_of(ResourceKind::Function), 1);
            assert!(graph.count_of(ResourceKind::Stream) + graph.count_of(ResourceKind::Queue) <= 1);
        }
    }

    #[test]
    fn kinesis_selector_wires_stream_endpoint_and_grant() {
        let graph = build(&sample_config("Kinesis"));

        assert_eq!(graph.count_of(ResourceKind::Stream), 1);
        assert_eq!(graph.count_of(ResourceKind::Queue), 0);
        assert_eq!(graph.count_of(ResourceKind::VpcEndpoint), 1);
        assert!(graph.has_edge(STREAM_ID, FUNCTION_ID, Relation::GrantsRead));
        assert!(graph.has_edge(STREAM_ID, FUNCTION_ID, Relation::Triggers));
        assert!(graph.output(OUTPUT_STREAM_ARN).is_some());
        assert!(graph.output(OUTPUT_QUEUE_ARN).is_none());

        let ResourceSpec::EventSourceMapping(mapping) = &graph
            .resource(STREAM_TRIGGER_ID)
            .expect("trigger should exist")
            .spec
        else {
            panic!("trigger should be an event source mapping");
        };
        assert_eq!(mapping.batch_size, EVENT_BATCH_SIZE);
        assert_eq!(mapping.starting_position, Some(StartingPosition::TrimHorizon));
    }

    #[test]
    fn sqs_selector_wires_queue_and_consume_grant() {
        let graph = build(&sample_config("SQS"));

        assert_eq!(graph.count_of(ResourceKind::Queue), 1);
        assert_eq!(graph.count_of(ResourceKind::Stream), 0);
        assert_eq!(graph.count_of(ResourceKind::VpcEndpoint), 0);
        assert!(graph.has_edge(QUEUE_ID, FUNCTION_ID, Relation::GrantsConsume));
        assert!(graph.has_edge(QUEUE_ID, FUNCTION_ID, Relation::Triggers));
        assert!(graph.output(OUTPUT_QUEUE_ARN).is_some());

        let ResourceSpec::Queue(queue) = &graph
            .resource(QUEUE_ID)
            .expect("queue should exist")
            .spec
        else {
            panic!("queue resource should hold a queue spec");
        };
        assert_eq!(queue.visibility_timeout_seconds, 30);
        assert_eq!(queue.retention_days, 4);
    }

    #[test]
    fn unknown_selector_leaves_the_function_untriggered() {
        for selector in ["", "Kafka", "sqs"] {
            let graph = build(&sample_config(selector));

            assert_eq!(graph.count_of(ResourceKind::Stream), 0);
            assert_eq!(graph.count_of(ResourceKind::Queue), 0);
            assert_eq!(graph.count_of(ResourceKind::EventSourceMapping), 0);
            assert!(!graph
                .edges
                .iter()
                .any(|edge| edge.relation == Relation::Triggers));
            assert_eq!(graph.outputs.len(), 3);
        }
    }

    #[test]
    fn function_is_placed_in_the_private_subnet() {
        let graph = build(&sample_config("Kinesis"));

        let ResourceSpec::Function(function) = &graph
            .resource(FUNCTION_ID)
            .expect("function should exist")
            .spec
        else {
            panic!("function resource should hold a function spec");
        };
        assert_eq!(function.subnet, SubnetKind::PrivateWithEgress);
        assert_eq!(function.timeout_seconds, 30);
        assert_eq!(function.memory_mb, 3008);
        assert_eq!(function.architecture, Architecture::Arm64);
        assert!(graph.has_edge(FUNCTION_ID, NETWORK_ID, Relation::DeployedInto));
    }

    #[test]
    fn function_environment_carries_the_runtime_contract() {
        let graph = build(&sample_config("SQS"));

        let ResourceSpec::Function(function) = &graph
            .resource(FUNCTION_ID)
            .expect("function should exist")
            .spec
        else {
            panic!("function resource should hold a function spec");
        };
        assert_eq!(
            function.environment[FUNCTION_ENV_SECRET_NAME],
            "telemetry-123456789012-secret"
        );
        assert_eq!(function.environment[FUNCTION_ENV_REGION], "eu-central-1");
        assert_eq!(function.environment[FUNCTION_ENV_SERVICE], "SQS");
    }

    #[test]
    fn secret_template_embeds_credentials_verbatim() {
        let config = sample_config("Kinesis");
        let graph = build(&config);

        let ResourceSpec::Secret(secret) = &graph
            .resource(SECRET_ID)
            .expect("secret should exist")
            .spec
        else {
            panic!("secret resource should hold a secret spec");
        };
        assert_eq!(secret.template[SECRET_KEY_USERNAME], config.db_username);
        assert_eq!(secret.template[SECRET_KEY_PASSWORD], config.db_password);
        assert_eq!(secret.template[SECRET_KEY_ENDPOINT], config.db_endpoint);
        assert_eq!(secret.template[SECRET_KEY_DATABASE], config.database_name);
        assert_eq!(secret.template[SECRET_KEY_TABLE], config.destination_table);
        assert_eq!(secret.generate_key, config.project_name);
        assert!(secret.exclude_punctuation);
    }

    #[test]
    fn identical_configuration_yields_identical_graphs() {
        let config = sample_config("Kinesis");

        let first = build(&config);
        let second = build(&config);

        assert_eq!(first, second);
        assert_eq!(graph_fingerprint(&first), graph_fingerprint(&second));
    }

    #[test]
    fn selector_output_echoes_the_raw_configuration_value() {
        let graph = build(&sample_config("Kafka"));

        let output = graph
            .output(OUTPUT_STREAMING_SERVICE)
            .expect("selector output should exist");
        assert_eq!(output.value, OutputValue::Literal("Kafka".to_string()));
    }
}
