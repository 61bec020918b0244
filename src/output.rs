//! Output path layout: `<base>/<run-date>/<metric>/<SYMBOL>_<metric>.png`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Which volatility series an artifact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Daily,
    Intraday,
}

impl Metric {
    /// Subfolder and file-suffix name.
    pub fn folder(self) -> &'static str {
        match self {
            Metric::Daily => "daily_vix",
            Metric::Intraday => "intra_vix",
        }
    }

    /// Human-readable name used in plot titles.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Daily => "Daily Volatility (dv)",
            Metric::Intraday => "Intra-day Volatility (iv)",
        }
    }
}

/// Replaces non-alphanumeric characters with '_' so tickers like "M&M"
/// stay filesystem-safe.
pub fn safe_symbol(symbol: &str) -> String {
    symbol
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Resolves the PNG path for one (symbol, metric) artifact, creating all
/// intermediate directories. Safe to call repeatedly within a run.
pub fn resolve_output_path(
    base_dir: &Path,
    run_date: &str,
    metric: Metric,
    symbol: &str,
) -> io::Result<PathBuf> {
    let dir = base_dir.join(run_date).join(metric.folder());
    fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("{}_{}.png", safe_symbol(symbol), metric.folder())))
}

/// Resolves the per-symbol CSV path for the optional raw-data export,
/// directly under the run-date folder.
pub fn resolve_csv_path(base_dir: &Path, run_date: &str, symbol: &str) -> io::Result<PathBuf> {
    let dir = base_dir.join(run_date);
    fs::create_dir_all(&dir)?;
    Ok(dir.join(format!("{}.csv", safe_symbol(symbol))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_dated_metric_path() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            resolve_output_path(dir.path(), "2026-08-07", Metric::Daily, "RELIANCE").unwrap();
        assert_eq!(
            path,
            dir.path()
                .join("2026-08-07")
                .join("daily_vix")
                .join("RELIANCE_daily_vix.png")
        );
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn intraday_goes_to_its_own_folder() {
        let dir = tempfile::tempdir().unwrap();
        let path =
            resolve_output_path(dir.path(), "2026-08-07", Metric::Intraday, "TCS").unwrap();
        assert!(path.ends_with("intra_vix/TCS_intra_vix.png"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let a = resolve_output_path(dir.path(), "2026-08-07", Metric::Daily, "TCS").unwrap();
        let b = resolve_output_path(dir.path(), "2026-08-07", Metric::Daily, "TCS").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn sanitizes_symbol() {
        assert_eq!(safe_symbol("M&M"), "M_M");
        assert_eq!(safe_symbol("BAJAJ-AUTO"), "BAJAJ_AUTO");
        assert_eq!(safe_symbol("TCS"), "TCS");
    }
}
