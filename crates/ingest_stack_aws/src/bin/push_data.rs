use std::time::Duration;

use aws_sdk_kinesis::primitives::Blob;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ingest_stack_aws::adapters::outputs::StackOutputsSource;
use ingest_stack_aws::adapters::sink::RecordSink;
use ingest_stack_aws::producer::{
    push_records, resolve_target, PacedSink, PushTarget, DEFAULT_RECORD_COUNT,
    DEFAULT_RECORD_INTERVAL_MS,
};
use ingest_stack_core::config::StackConfig;
use ingest_stack_core::orchestrator::STACK_NAME;

struct CloudFormationOutputs {
    client: aws_sdk_cloudformation::Client,
    stack_name: String,
}

impl StackOutputsSource for CloudFormationOutputs {
    fn output_value(&self, key: &str) -> Result<Option<String>, String> {
        let client = self.client.clone();
        let stack_name = self.stack_name.clone();
        let key = key.to_string();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let response = client
                    .describe_stacks()
                    .stack_name(&stack_name)
                    .send()
                    .await
                    .map_err(|error| format!("failed to describe stack {stack_name}: {error}"))?;

                let Some(stack) = response.stacks().first() else {
                    return Err(format!("no stacks found with name {stack_name}"));
                };

                Ok(stack
                    .outputs()
                    .iter()
                    .find(|output| output.output_key() == Some(key.as_str()))
                    .and_then(|output| output.output_value().map(str::to_string)))
            })
        })
    }
}

struct KinesisSink {
    client: aws_sdk_kinesis::Client,
    stream_name: String,
}

impl RecordSink for KinesisSink {
    fn push(&self, partition_key: &str, payload: &[u8]) -> Result<(), String> {
        let client = self.client.clone();
        let stream_name = self.stream_name.clone();
        let partition_key = partition_key.to_string();
        let payload = payload.to_vec();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_record()
                    .stream_name(stream_name)
                    .partition_key(partition_key)
                    .data(Blob::new(payload))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to put record: {error}"))
            })
        })
    }
}

struct SqsSink {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl RecordSink for SqsSink {
    fn push(&self, _partition_key: &str, payload: &[u8]) -> Result<(), String> {
        let client = self.client.clone();
        let queue_url = self.queue_url.clone();
        let body = String::from_utf8_lossy(payload).into_owned();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(queue_url)
                    .message_body(body)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to send message: {error}"))
            })
        })
    }
}

async fn run() -> Result<(), String> {
    let config = StackConfig::from_env();
    config.validate().map_err(|error| error.to_string())?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let outputs = CloudFormationOutputs {
        client: aws_sdk_cloudformation::Client::new(&aws_config),
        stack_name: STACK_NAME.to_string(),
    };

    let target = resolve_target(&config, &outputs)?;
    println!("pushing {DEFAULT_RECORD_COUNT} records to {target}");

    let interval = Duration::from_millis(DEFAULT_RECORD_INTERVAL_MS);
    let mut rng = StdRng::from_entropy();
    let summary = match target {
        PushTarget::Kinesis { stream_name } => {
            let sink = PacedSink::new(
                KinesisSink {
                    client: aws_sdk_kinesis::Client::new(&aws_config),
                    stream_name,
                },
                interval,
            );
            push_records(&sink, &mut rng, DEFAULT_RECORD_COUNT)?
        }
        PushTarget::Sqs { queue_url } => {
            let sink = PacedSink::new(
                SqsSink {
                    client: aws_sdk_sqs::Client::new(&aws_config),
                    queue_url,
                },
                interval,
            );
            push_records(&sink, &mut rng, DEFAULT_RECORD_COUNT)?
        }
    };

    println!("pushed {} records", summary.records_pushed);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(message) = run().await {
        eprintln!("{message}");
        std::process::exit(1);
    }
}
