//! GWL CLI - Command line tool for groundwater station readings.

use clap::Parser;
use env_logger::Env;

#[derive(Parser)]
#[command(
    name = "gwl-cli",
    version,
    about = "Groundwater level station summaries and trend predictions"
)]
struct Cli {
    /// Log dataset loading and filtering at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: gwl_cmd::Command,
}

impl Cli {
    fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_filter())).init();
    gwl_cmd::run(cli.command).await
}
