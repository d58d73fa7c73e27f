//! Settings shared by every subcommand.

use anyhow::Context;
use clap::Args;
use gwl_core::dataset::{Dataset, DatasetSource, DEFAULT_DATASET};
use gwl_data::alert::{AlertPolicy, DEFAULT_ALERT_THRESHOLD};
use gwl_data::search::MIN_SEARCH_LEN;

#[derive(Args, Debug, Clone)]
pub struct DashboardConfig {
    /// Dataset CSV path or http(s) URL; `.gz` content is inflated
    #[arg(short = 'd', long, env = "GWL_DATASET", default_value = DEFAULT_DATASET)]
    pub dataset: DatasetSource,

    /// Predicted level above which a station is flagged critical
    #[arg(long, env = "GWL_ALERT_THRESHOLD", default_value_t = DEFAULT_ALERT_THRESHOLD)]
    pub alert_threshold: f64,

    /// Search terms shorter than this match every station
    #[arg(long, env = "GWL_MIN_SEARCH_LEN", default_value_t = MIN_SEARCH_LEN)]
    pub min_search_len: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            dataset: DatasetSource::default(),
            alert_threshold: DEFAULT_ALERT_THRESHOLD,
            min_search_len: MIN_SEARCH_LEN,
        }
    }
}

impl DashboardConfig {
    pub fn alert_policy(&self) -> AlertPolicy {
        AlertPolicy::new(self.alert_threshold)
    }

    /// Load the configured dataset. A failure here ends the command.
    pub async fn load_dataset(&self) -> anyhow::Result<Dataset> {
        Dataset::load(&self.dataset)
            .await
            .with_context(|| format!("Could not load data file {}", self.dataset))
    }
}
