use crate::error::{Result, ScanError};

/// Summary statistics of one volatility series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1 divisor). Zero for a single sample.
    pub std_dev: f64,
    pub median: f64,
}

/// Computes mean, sample standard deviation and median of a series.
///
/// An empty series has no defined mean or spread and is rejected with
/// `InsufficientData`; callers decide whether that skips the symbol or just
/// the affected metric.
pub fn summarize(series: &[f64]) -> Result<SummaryStats> {
    if series.is_empty() {
        return Err(ScanError::InsufficientData(
            "empty volatility series".to_string(),
        ));
    }

    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;

    let std_dev = if series.len() < 2 {
        // A single observation has no spread.
        0.0
    } else {
        let variance = series.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        variance.sqrt()
    };

    Ok(SummaryStats {
        mean,
        std_dev,
        median: median(series),
    })
}

/// Middle value of the sorted series; the two central values are averaged
/// for even lengths. Callers guarantee a non-empty slice.
fn median(series: &[f64]) -> f64 {
    let mut sorted = series.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn empty_series_is_insufficient() {
        assert!(matches!(
            summarize(&[]),
            Err(ScanError::InsufficientData(_))
        ));
    }

    #[test]
    fn single_element_has_zero_spread() {
        let stats = summarize(&[2.5]).unwrap();
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.median, 2.5);
    }

    #[test]
    fn identical_values_have_zero_spread() {
        let stats = summarize(&[2.0; 30]).unwrap();
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.mean, 2.0);
    }

    #[test]
    fn known_series() {
        // mean 2.5, sample variance 5/3.
        let stats = summarize(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert!((stats.mean - 2.5).abs() < TOLERANCE);
        assert!((stats.std_dev - (5.0f64 / 3.0).sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn median_odd_length() {
        let stats = summarize(&[9.0, 1.0, 5.0]).unwrap();
        assert_eq!(stats.median, 5.0);
    }

    #[test]
    fn median_even_length_averages_center() {
        let stats = summarize(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!((stats.median - 2.5).abs() < TOLERANCE);
    }

    #[test]
    fn order_independent() {
        let a = summarize(&[1.0, 2.0, 3.0]).unwrap();
        let b = summarize(&[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(a, b);
    }
}
