use serde::{Deserialize, Serialize};

pub const ENV_PROJECT_NAME: &str = "PROJECT_NAME";
pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";
pub const ENV_DB_ENDPOINT: &str = "DB_ENDPOINT";
pub const ENV_DB_USERNAME: &str = "DB_USERNAME";
pub const ENV_DB_PASSWORD: &str = "DB_PASSWORD";
pub const ENV_DATABASE_NAME: &str = "DATABASE_NAME";
pub const ENV_DESTINATION_TABLE: &str = "DESTINATION_TABLE";
pub const ENV_STREAMING_SERVICE: &str = "STREAMING_SERVICE";

/// Flat environment description consumed by the orchestrator. Read once at
/// process start and passed by value; never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StackConfig {
    pub project_name: String,
    pub region: String,
    pub account_id: String,
    pub db_endpoint: String,
    pub db_username: String,
    pub db_password: String,
    pub database_name: String,
    pub destination_table: String,
    pub streaming_service: String,
}

impl StackConfig {
    /// Reads the nine stack variables from the process environment. Missing
    /// variables become empty strings, never absent fields.
    pub fn from_env() -> Self {
        Self {
            project_name: env_or_empty(ENV_PROJECT_NAME),
            region: env_or_empty(ENV_REGION),
            account_id: env_or_empty(ENV_ACCOUNT_ID),
            db_endpoint: env_or_empty(ENV_DB_ENDPOINT),
            db_username: env_or_empty(ENV_DB_USERNAME),
            db_password: env_or_empty(ENV_DB_PASSWORD),
            database_name: env_or_empty(ENV_DATABASE_NAME),
            destination_table: env_or_empty(ENV_DESTINATION_TABLE),
            streaming_service: env_or_empty(ENV_STREAMING_SERVICE),
        }
    }

    /// Fails fast on configuration the orchestrator cannot name resources
    /// without. Every physical name derives from the project name and account
    /// id; the remaining fields are embedded verbatim and may be empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_name.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "{ENV_PROJECT_NAME} cannot be empty"
            )));
        }
        if self.account_id.trim().is_empty() {
            return Err(ValidationError::new(format!(
                "{ENV_ACCOUNT_ID} cannot be empty"
            )));
        }
        Ok(())
    }

    pub fn event_source(&self) -> EventSourceKind {
        EventSourceKind::from_selector(&self.streaming_service)
    }
}

fn env_or_empty(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

/// Which event source the stack wires in front of the processor function.
/// Any selector other than the two recognized values means the function is
/// deployed without a trigger, which is a valid inert configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSourceKind {
    Kinesis,
    Sqs,
    None,
}

impl EventSourceKind {
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "Kinesis" => Self::Kinesis,
            "SQS" => Self::Sqs,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
