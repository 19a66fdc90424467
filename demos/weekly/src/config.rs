use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use sg_ga::GaConfig;
use sg_sim::NetworkConfig;

/// Everything one optimisation run needs.  Missing fields take their
/// defaults, so `{}` is a valid file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub network: NetworkConfig,
    pub ga:      GaConfig,
    /// Fixed seed for a reproducible run; entropy when absent.
    pub seed:    Option<u64>,
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading run config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing run config {}", path.display()))
    }
}
