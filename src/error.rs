use thiserror::Error;

/// Scanner error taxonomy.
///
/// Only `SourceUnavailable` aborts a run; everything else is isolated at the
/// pipeline boundary and recorded against the symbol that caused it.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The F&O symbol list endpoint is unreachable or returned garbage.
    #[error("F&O symbol source unavailable: {0}")]
    SourceUnavailable(String),

    /// Price history fetch failed for one symbol.
    #[error("history fetch failed for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    /// No valid records left after cleaning; mean/stddev are undefined.
    #[error("insufficient data: {0}")]
    InsufficientData(String),

    /// Degenerate statistics at render time (empty series or zero spread).
    #[error("render failed: {0}")]
    Render(String),

    /// Invalid configuration file.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
