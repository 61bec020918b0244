use std::time::Duration;

/// One failed symbol and the reason recorded for it.
#[derive(Debug, Clone)]
pub struct SymbolFailure {
    pub symbol: String,
    pub reason: String,
}

/// Outcome of a full pipeline run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Symbols attempted.
    pub total: usize,
    /// Symbols with at least one artifact written.
    pub succeeded: usize,
    /// Symbols with no tradable history in the window.
    pub skipped: usize,
    /// Symbols that produced no artifact, with reasons.
    pub failed: Vec<SymbolFailure>,
    /// Histogram files written across all symbols.
    pub artifacts: usize,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.succeeded as f64 / self.total as f64) * 100.0
        }
    }

    /// Logs the run summary, then one warning per failed symbol.
    pub fn log_summary(&self) {
        tracing::info!(
            total = self.total,
            succeeded = self.succeeded,
            skipped = self.skipped,
            failed = self.failed.len(),
            artifacts = self.artifacts,
            success_rate = format!("{:.1}%", self.success_rate()),
            elapsed = format!("{:.1}s", self.elapsed.as_secs_f64()),
            "📊 Scan complete"
        );
        for f in &self.failed {
            tracing::warn!(symbol = %f.symbol, reason = %f.reason, "symbol failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_handles_empty_run() {
        assert_eq!(RunReport::new().success_rate(), 0.0);
    }

    #[test]
    fn success_rate_is_a_percentage() {
        let report = RunReport {
            total: 4,
            succeeded: 3,
            ..Default::default()
        };
        assert!((report.success_rate() - 75.0).abs() < 1e-9);
    }
}
