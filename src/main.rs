use tracing::{error, info};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

use fno_volatility::config::ScannerConfig;
use fno_volatility::pipeline;
use fno_volatility::source::NseClient;

/// Custom timer implementation to format log timestamps using the system's
/// local timezone. By default, tracing uses UTC (Zulu time), which can be
/// confusing for local debugging.
struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Local::now();
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

#[tokio::main]
async fn main() {
    // Initialize the tracing subscriber.
    // 1. Reads the log level from the RUST_LOG environment variable (defaults to "info").
    // 2. Injects the custom LocalTimer to ensure logs show local time.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_timer(LocalTimer)
        .init();

    // Load configuration immediately at startup.
    // Adopts a "Fail Fast" strategy: an invalid config file exits immediately.
    let cfg = match ScannerConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("❌ Critical Error: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "🚀 Starting F&O Volatility Scanner (lookback: {} days, output: {})",
        cfg.lookback_days, cfg.output_dir
    );

    let client = match NseClient::connect(cfg.http_timeout()).await {
        Ok(c) => c,
        Err(e) => {
            error!("❌ Critical Error: {}", e);
            std::process::exit(1);
        }
    };

    match pipeline::run(&client, &client, &cfg).await {
        Ok(report) => report.log_summary(),
        Err(e) => {
            error!("❌ Scan aborted: {}", e);
            std::process::exit(1);
        }
    }
}
