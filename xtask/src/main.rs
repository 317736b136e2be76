use std::process::{exit, Command, ExitStatus};

use clap::{Parser, Subcommand};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the streaming ingestion stack workspace",
    long_about = "A unified CLI for synthesizing the stack template, pushing\n\
                  sample telemetry, and running CI checks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the stack template from the current environment
    Synth,
    /// Push sample telemetry into the deployed event source
    Push,
    /// Run CI checks (fmt, clippy, tests)
    Ci,
}

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn cargo(args: &[&str]) -> ExitStatus {
    eprintln!("+ cargo {}", args.join(" "));
    Command::new("cargo")
        .args(args)
        .status()
        .expect("failed to execute cargo")
}

fn run_cargo(args: &[&str]) {
    let status = cargo(args);
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&[
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ]);

    step("Test ingest_stack_core");
    run_cargo(&["test", "-p", "ingest_stack_core"]);

    step("Test ingest_stack_aws");
    run_cargo(&["test", "-p", "ingest_stack_aws"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Synth => {
            run_cargo(&["run", "-p", "ingest_stack_aws", "--bin", "synth"]);
        }
        Commands::Push => {
            run_cargo(&["run", "-p", "ingest_stack_aws", "--bin", "push_data"]);
        }
        Commands::Ci => {
            ci_check();
        }
    }
}
