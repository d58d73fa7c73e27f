//! Command implementations for GWL CLI.
//!
//! Every subcommand loads one immutable dataset snapshot, then works on it
//! synchronously.

use clap::Subcommand;
use gwl_data::trend::Horizon;

pub mod config;
pub mod map;
pub mod station;
pub mod summary;

use config::DashboardConfig;

#[derive(Subcommand)]
pub enum Command {
    /// Summarize every station: latest level and predicted level
    Summary {
        #[command(flatten)]
        config: DashboardConfig,

        /// week, month, year or a number of days; alerts always use the year prediction
        #[arg(long, default_value = "year")]
        horizon: Horizon,

        /// Only stations whose name or district contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Print JSON instead of text cards
        #[arg(long)]
        json: bool,
    },

    /// Predict one station's level
    Predict {
        #[command(flatten)]
        config: DashboardConfig,

        /// Station name, as in the `station_name` column
        #[arg(short = 't', long)]
        station: String,

        /// week, month, year or a number of days
        #[arg(long, default_value = "year")]
        horizon: Horizon,
    },

    /// Print one station's full reading history
    History {
        #[command(flatten)]
        config: DashboardConfig,

        /// Station name, as in the `station_name` column
        #[arg(short = 't', long)]
        station: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Export station markers as GeoJSON
    Map {
        #[command(flatten)]
        config: DashboardConfig,

        /// Output path; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout();
    match command {
        Command::Summary {
            config,
            horizon,
            search,
            json,
        } => {
            let dataset = config.load_dataset().await?;
            summary::run_summary(&mut stdout, &dataset, &config, horizon, search.as_deref(), json)
        }
        Command::Predict {
            config,
            station,
            horizon,
        } => {
            let dataset = config.load_dataset().await?;
            station::run_predict(&mut stdout, &dataset, &station, horizon)
        }
        Command::History {
            config,
            station,
            json,
        } => {
            let dataset = config.load_dataset().await?;
            station::run_history(&mut stdout, &dataset, &station, json)
        }
        Command::Map { config, output } => {
            let dataset = config.load_dataset().await?;
            map::run_map(&dataset, output.as_deref()).await
        }
    }
}
