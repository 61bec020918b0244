// src/lib.rs

pub mod config;
pub mod error;
pub mod export;
pub mod histogram;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod stats;
pub mod volatility;

pub use config::ScannerConfig;
pub use error::{Result, ScanError};
pub use report::RunReport;
pub use source::{HistoryFetcher, NseClient, SymbolSource};
