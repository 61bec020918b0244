//! Per-record volatility metrics.
//!
//! Both metrics are expressed in percentage form (ratio x 100), applied
//! uniformly so the histograms of the two series share one unit.

use crate::models::ValidRecord;

/// Daily volatility: day-over-day relative close change.
///
/// `(close - prev_close) / prev_close * 100` per record. One output value
/// per valid record, in source order.
pub fn daily_volatility(records: &[ValidRecord]) -> Vec<f64> {
    records
        .iter()
        .map(|r| (r.close - r.prev_close) / r.prev_close * 100.0)
        .collect()
}

/// Intraday volatility: session range relative to the previous close.
///
/// `(high - low) / prev_close * 100` per record.
pub fn intraday_volatility(records: &[ValidRecord]) -> Vec<f64> {
    records
        .iter()
        .map(|r| (r.high - r.low) / r.prev_close * 100.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn record(close: f64, prev_close: f64, high: f64, low: f64) -> ValidRecord {
        ValidRecord {
            trade_date: "05-01-2026".to_string(),
            close,
            prev_close,
            high,
            low,
        }
    }

    #[test]
    fn daily_matches_formula() {
        // close=110, prev=100 => +10% in percentage form.
        let series = daily_volatility(&[record(110.0, 100.0, 115.0, 105.0)]);
        assert!((series[0] - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn intraday_matches_formula() {
        // high=115, low=105, prev=100 => 10% range.
        let series = intraday_volatility(&[record(110.0, 100.0, 115.0, 105.0)]);
        assert!((series[0] - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn daily_is_signed() {
        let series = daily_volatility(&[record(95.0, 100.0, 101.0, 94.0)]);
        assert!((series[0] + 5.0).abs() < TOLERANCE);
    }

    #[test]
    fn series_length_equals_record_count() {
        let records = vec![record(101.0, 100.0, 102.0, 99.0); 7];
        assert_eq!(daily_volatility(&records).len(), 7);
        assert_eq!(intraday_volatility(&records).len(), 7);
    }

    #[test]
    fn empty_records_give_empty_series() {
        assert!(daily_volatility(&[]).is_empty());
        assert!(intraday_volatility(&[]).is_empty());
    }

    #[test]
    fn recomputation_is_exact_over_many_records() {
        let records: Vec<ValidRecord> = (1..50)
            .map(|i| {
                let prev = 50.0 + i as f64;
                record(prev * 1.02, prev, prev * 1.05, prev * 0.97)
            })
            .collect();
        for (r, dv) in records.iter().zip(daily_volatility(&records)) {
            let expected = (r.close - r.prev_close) / r.prev_close * 100.0;
            assert!((dv - expected).abs() < TOLERANCE);
        }
    }
}
