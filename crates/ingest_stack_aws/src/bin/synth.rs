use ingest_stack_core::config::StackConfig;
use ingest_stack_core::orchestrator;
use ingest_stack_core::template::render_template;

fn main() {
    let config = StackConfig::from_env();
    if let Err(error) = config.validate() {
        eprintln!("invalid stack configuration: {error}");
        std::process::exit(1);
    }

    let graph = orchestrator::build(&config);
    let template = render_template(&graph);
    println!(
        "{}",
        serde_json::to_string_pretty(&template).expect("template should serialize")
    );
}
