use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, ScanError};

const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScannerConfig {
    /// Trailing calendar days of history requested per symbol.
    pub lookback_days: i64,

    /// Base directory for all artifacts. The run-date folder goes under it.
    pub output_dir: String,

    /// strftime format of the run-date folder name. ISO by default so the
    /// date folders sort lexicographically; set "%d-%m-%Y" for the DD-MM-YYYY
    /// layout instead.
    pub date_format: String,

    /// When true, also dump the cleaned records plus computed metrics as
    /// one CSV per symbol.
    pub export_raw_data: bool,

    /// Pause between per-symbol history requests, in milliseconds.
    pub request_delay_ms: u64,

    /// Per-call HTTP timeout, in seconds.
    pub http_timeout_secs: u64,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            output_dir: "output".to_string(),
            date_format: "%Y-%m-%d".to_string(),
            export_raw_data: false,
            request_delay_ms: 250,
            http_timeout_secs: 10,
        }
    }
}

impl ScannerConfig {
    /// Loads configuration from 'config.yaml' in the current working
    /// directory. A missing file is not an error: the scanner is meant to
    /// run with no setup, so built-in defaults apply. An unreadable or
    /// invalid file is fatal.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    fn load_from(path: &Path) -> Result<Self> {
        let config = if path.exists() {
            let yaml_content = fs::read_to_string(path).map_err(|e| {
                ScanError::Config(format!("failed to read {}: {}", path.display(), e))
            })?;
            serde_yaml::from_str(&yaml_content).map_err(|e| {
                ScanError::Config(format!("failed to parse {}: {}", path.display(), e))
            })?
        } else {
            tracing::info!("no {} found, using defaults", CONFIG_FILE);
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.lookback_days < 1 {
            return Err(ScanError::Config("lookback_days must be at least 1".into()));
        }
        if self.output_dir.is_empty() {
            return Err(ScanError::Config("output_dir is empty".into()));
        }
        if self.date_format.is_empty() {
            return Err(ScanError::Config("date_format is empty".into()));
        }
        // A bad strftime string only fails when first formatted, which
        // would be mid-run. Probe it here instead.
        let mut probe = String::new();
        use std::fmt::Write;
        if write!(probe, "{}", chrono::Local::now().format(&self.date_format)).is_err() {
            return Err(ScanError::Config(format!(
                "invalid date_format '{}'",
                self.date_format
            )));
        }
        Ok(())
    }

    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
