use clap::Parser;
use openapi_stats::{Config, FileDiscovery};

#[derive(Parser)]
#[command(name = "count-api-specs")]
#[command(about = "Count YAML and JSON API description files.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {}

fn main() -> anyhow::Result<()> {
    let _cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load()?;
    let counts = FileDiscovery::new(config).count_files()?;
    counts.print_summary();

    Ok(())
}
