//! User settings at <config dir>/footprint/config.json.
//!
//! Every field is optional in the file; missing fields take defaults.
//! A missing or unreadable file yields the defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Host city used when none is given on the command line.
    pub host: String,
    /// Number of countries shown individually in the emitters chart.
    pub top: usize,
    /// Directory for saved charts.
    pub chart_dir: PathBuf,
    /// `tracing` filter directive used when RUST_LOG is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "Zurich".into(),
            top: 8,
            chart_dir: PathBuf::from("."),
            log_filter: "warn".into(),
        }
    }
}

impl Settings {
    /// Load from the default location.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from a specific path.
    pub fn load_from(path: &Path) -> Self {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "no settings file, using defaults");
                return Self::default();
            }
        };

        serde_json::from_str(&data).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "malformed settings file, using defaults");
            Self::default()
        })
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("footprint").join("config.json"))
    }

    /// File name for a saved chart: `<chart_dir>/<host>_emitters.txt`.
    pub fn chart_path(&self, host: &str) -> PathBuf {
        let slug: String = host
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect();
        self.chart_dir.join(format!("{}_emitters.txt", slug))
    }
}
