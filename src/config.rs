//! Settings loading and layering.
//!
//! Settings come from three layers, later layers winning: built-in defaults,
//! an optional config file (TOML/JSON/YAML, whatever the `config` crate can
//! read), then `QOSBOARD_*` environment variables. Command-line flags are
//! applied on top by the binary.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Backend base URL the query client talks to.
    pub backend: String,
    /// Site whose telemetry the dashboard shows.
    pub site: String,
    /// Initial period token for every time chart.
    pub period: String,
    /// Auto-refresh interval in seconds; 0 disables auto-refresh.
    pub refresh: u64,
    /// Per-request timeout in seconds; absent means no timeout.
    pub timeout: Option<u64>,
    /// Funnel the traffic of all sites rather than direct children only.
    pub funnel_all_sites: bool,
}

impl Settings {
    /// Load settings from defaults, an optional file, and the environment.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("backend", "http://localhost:8000")?
            .set_default("site", "main")?
            .set_default("period", "24h")?
            .set_default("refresh", 0u64)?
            .set_default("funnel_all_sites", false)?;

        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Environment::with_prefix("QOSBOARD"))
            .build()
            .and_then(Config::try_deserialize)
            .context("failed to load settings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_a_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings.backend, "http://localhost:8000");
        assert_eq!(settings.site, "main");
        assert_eq!(settings.period, "24h");
        assert_eq!(settings.refresh, 0);
        assert_eq!(settings.timeout, None);
        assert!(!settings.funnel_all_sites);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = std::env::temp_dir().join("qosboard-config-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        std::fs::write(
            &path,
            "backend = \"http://backend:9000\"\nperiod = \"1h\"\ntimeout = 30\n",
        )
        .unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.backend, "http://backend:9000");
        assert_eq!(settings.period, "1h");
        assert_eq!(settings.timeout, Some(30));
        // Untouched keys keep their defaults.
        assert_eq!(settings.site, "main");
    }
}
