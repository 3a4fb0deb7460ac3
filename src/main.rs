use clap::Parser;
use openapi_stats::{
    progress::{ConsoleProgress, Progress, SilentProgress},
    Analyzer, Config, OutputMode, Reporter,
};

#[derive(Parser)]
#[command(name = "openapi-stats")]
#[command(about = "Process OpenAPI 3.x YAML files and collect statistics.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Write results to data/openapi3_stats.csv instead of printing.
    #[arg(long)]
    csv: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = Config::load()?;
    let mode = if cli.csv {
        OutputMode::Table
    } else {
        OutputMode::Text
    };

    let mut progress: Box<dyn Progress> = if config.show_progress {
        Box::new(ConsoleProgress::new())
    } else {
        Box::new(SilentProgress)
    };

    let analyzer = Analyzer::new(config.clone());
    let results = analyzer.analyze(progress.as_mut())?;

    let reporter = Reporter::new(&config.csv_path);
    reporter.report(&results, mode)?;

    Ok(())
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
