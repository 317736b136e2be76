//! Deterministic provisioning core for the streaming ingestion stack.
//!
//! This crate owns the environment configuration contract, the declarative
//! resource graph, physical naming, and template rendering. It intentionally
//! excludes AWS SDK concerns: applying a rendered template is the deployment
//! engine's job, and pushing data into a deployed stack lives in
//! `crates/ingest_stack_aws`.

pub mod config;
pub mod graph;
pub mod naming;
pub mod orchestrator;
pub mod resources;
pub mod template;
