//! Pipeline driver: fetch → compute → render → save, one symbol at a time.
//!
//! Per-symbol failures are recorded and the loop moves on; only the initial
//! symbol-list fetch aborts the run.

use chrono::Local;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::ScannerConfig;
use crate::error::{Result, ScanError};
use crate::export::write_raw_csv;
use crate::histogram::render_histogram;
use crate::models::filter_valid;
use crate::output::{resolve_csv_path, resolve_output_path, Metric};
use crate::report::{RunReport, SymbolFailure};
use crate::source::{HistoryFetcher, SymbolSource};
use crate::stats::summarize;
use crate::volatility::{daily_volatility, intraday_volatility};

enum SymbolOutcome {
    /// Number of artifacts written for the symbol.
    Rendered(usize),
    /// Fetch succeeded but the window holds no tradable history.
    NoHistory,
}

/// Runs the full scan once and returns the report.
pub async fn run<S, H>(source: &S, fetcher: &H, cfg: &ScannerConfig) -> Result<RunReport>
where
    S: SymbolSource,
    H: HistoryFetcher,
{
    let start = Instant::now();
    let mut report = RunReport::new();

    let symbols = source.fetch_fo_symbols().await?;
    info!(count = symbols.len(), "✅ F&O symbol list fetched");

    // Computed once so a midnight rollover cannot split the output tree.
    let run_date = Local::now().format(&cfg.date_format).to_string();
    let base_dir = Path::new(&cfg.output_dir);

    for (idx, symbol) in symbols.iter().enumerate() {
        report.total += 1;
        debug!(
            symbol = %symbol,
            progress = format!("{}/{}", idx + 1, symbols.len()),
            "processing"
        );

        match process_symbol(fetcher, cfg, base_dir, &run_date, symbol).await {
            Ok(SymbolOutcome::Rendered(n)) => {
                report.succeeded += 1;
                report.artifacts += n;
            }
            Ok(SymbolOutcome::NoHistory) => {
                report.skipped += 1;
                debug!(symbol = %symbol, "no tradable history in window");
            }
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "⚠️ symbol failed");
                report.failed.push(SymbolFailure {
                    symbol: symbol.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if idx + 1 < symbols.len() {
            sleep(cfg.request_delay()).await;
        }
    }

    report.elapsed = start.elapsed();
    Ok(report)
}

async fn process_symbol<H: HistoryFetcher>(
    fetcher: &H,
    cfg: &ScannerConfig,
    base_dir: &Path,
    run_date: &str,
    symbol: &str,
) -> Result<SymbolOutcome> {
    let records = fetcher.fetch_price_history(symbol, cfg.lookback_days).await?;
    if records.is_empty() {
        return Ok(SymbolOutcome::NoHistory);
    }

    // Cleaning happens once per record; both metrics share the valid set.
    let valid = filter_valid(&records);
    if valid.is_empty() {
        return Err(ScanError::InsufficientData(format!(
            "no valid records for {symbol} after cleaning ({} fetched)",
            records.len()
        )));
    }

    let daily = daily_volatility(&valid);
    let intraday = intraday_volatility(&valid);

    let mut rendered = 0;
    let mut last_error = None;
    for (metric, series) in [(Metric::Daily, &daily), (Metric::Intraday, &intraday)] {
        match render_metric(base_dir, run_date, symbol, metric, series) {
            Ok(path) => {
                rendered += 1;
                info!(symbol, path = %path.display(), "🖼 histogram saved");
            }
            Err(e) => {
                warn!(symbol, metric = metric.folder(), error = %e, "artifact skipped");
                last_error = Some(e);
            }
        }
    }

    if cfg.export_raw_data {
        let csv_path = resolve_csv_path(base_dir, run_date, symbol)?;
        write_raw_csv(&csv_path, &valid, &daily, &intraday)?;
        info!(symbol, path = %csv_path.display(), "raw data exported");
    }

    match rendered {
        0 => Err(last_error
            .unwrap_or_else(|| ScanError::Render("no artifact produced".to_string()))),
        n => Ok(SymbolOutcome::Rendered(n)),
    }
}

fn render_metric(
    base_dir: &Path,
    run_date: &str,
    symbol: &str,
    metric: Metric,
    series: &[f64],
) -> Result<PathBuf> {
    let stats = summarize(series)?;
    let path = resolve_output_path(base_dir, run_date, metric, symbol)?;
    let title = format!(
        "{} Histogram for {} ({} sessions)",
        metric.title(),
        symbol,
        series.len()
    );
    render_histogram(series, &stats, &title, &path)?;
    Ok(path)
}
