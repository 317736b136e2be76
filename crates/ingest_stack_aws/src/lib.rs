//! AWS-facing adapters and binaries for the ingestion stack.
//!
//! This crate owns runtime integration details: resolving deployed stack
//! outputs, pushing sample telemetry into whichever event source the stack
//! provisioned, and the `synth` and `push_data` binaries. Graph construction
//! stays in `ingest_stack_core`.

pub mod adapters;
pub mod producer;
pub mod telemetry;
