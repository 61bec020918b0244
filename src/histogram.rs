//! Histogram binning and PNG rendering.
//!
//! Bins are one standard deviation wide and centered on the mean, so the
//! x-axis reads in sigma offsets ("-2σ", "-1σ", "0", "+1σ", ...) instead of
//! raw values.

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use std::path::Path;

use crate::error::{Result, ScanError};
use crate::stats::SummaryStats;

const PLOT_WIDTH: u32 = 1200;
const PLOT_HEIGHT: u32 = 700;

/// Bin layout for one series. Bin `k` covers
/// `[mean + (k - 0.5) * width, mean + (k + 0.5) * width)`, which puts the
/// mean at the center of bin 0.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSpec {
    pub mean: f64,
    pub bin_width: f64,
    pub first_bin: i32,
    pub last_bin: i32,
}

impl HistogramSpec {
    /// Derives the bin layout from the series and its summary statistics.
    ///
    /// Fails with `Render` when the series is empty or the spread is zero:
    /// a zero-width bin is undefined, and a flat series has nothing worth
    /// plotting.
    pub fn from_stats(series: &[f64], stats: &SummaryStats) -> Result<Self> {
        if series.is_empty() {
            return Err(ScanError::Render("empty series".to_string()));
        }
        if stats.std_dev <= 0.0 {
            return Err(ScanError::Render(format!(
                "zero spread (stddev = {}), bin width undefined",
                stats.std_dev
            )));
        }

        let mut first_bin = i32::MAX;
        let mut last_bin = i32::MIN;
        for v in series {
            let k = offset(*v, stats.mean, stats.std_dev);
            first_bin = first_bin.min(k);
            last_bin = last_bin.max(k);
        }

        Ok(Self {
            mean: stats.mean,
            bin_width: stats.std_dev,
            first_bin,
            last_bin,
        })
    }

    /// Bin offset for a value, clamped into the layout's range.
    pub fn bin_index(&self, value: f64) -> i32 {
        offset(value, self.mean, self.bin_width).clamp(self.first_bin, self.last_bin)
    }

    pub fn num_bins(&self) -> usize {
        (self.last_bin - self.first_bin + 1) as usize
    }

    /// Axis label for a bin offset: "0" at the mean, "+2σ" / "-1σ" around it.
    pub fn label(k: i32) -> String {
        match k {
            0 => "0".to_string(),
            k if k > 0 => format!("+{k}σ"),
            k => format!("{k}σ"),
        }
    }
}

fn offset(value: f64, mean: f64, width: f64) -> i32 {
    ((value - mean) / width + 0.5).floor() as i32
}

/// Renders the series as a histogram PNG at `output_path`.
///
/// The plot is annotated with the numeric mean, standard deviation and
/// median. Exactly one file is written, silently overwriting an existing
/// one; degenerate input fails before anything touches the filesystem.
pub fn render_histogram(
    series: &[f64],
    stats: &SummaryStats,
    title: &str,
    output_path: &Path,
) -> Result<()> {
    let spec = HistogramSpec::from_stats(series, stats)?;

    let mut counts = vec![0u32; spec.num_bins()];
    for v in series {
        counts[(spec.bin_index(*v) - spec.first_bin) as usize] += 1;
    }
    let tallest = counts.iter().copied().max().unwrap_or(1);
    let y_max = tallest + (tallest / 10).max(1);

    let root = BitMapBackend::new(output_path, (PLOT_WIDTH, PLOT_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| ScanError::Render(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 26))
        .margin(14)
        .x_label_area_size(48)
        .y_label_area_size(58)
        .build_cartesian_2d(
            (spec.first_bin..spec.last_bin + 1).into_segmented(),
            0u32..y_max,
        )
        .map_err(|e| ScanError::Render(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc("Frequency")
        .x_desc("Offset from mean (bin width = 1 std dev)")
        .x_labels(spec.num_bins().min(13))
        .x_label_formatter(&|seg| match seg {
            SegmentValue::CenterOf(k) | SegmentValue::Exact(k) => HistogramSpec::label(*k),
            SegmentValue::Last => String::new(),
        })
        .draw()
        .map_err(|e| ScanError::Render(e.to_string()))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(RGBColor(0, 160, 220).mix(0.75).filled())
                .margin(2)
                .data(series.iter().map(|v| (spec.bin_index(*v), 1u32))),
        )
        .map_err(|e| ScanError::Render(e.to_string()))?;

    // Stats box, top-left under the caption.
    let annotation = [
        format!("Mean: {:.4}", stats.mean),
        format!("Std Dev: {:.4}", stats.std_dev),
        format!("Median: {:.4}", stats.median),
    ];
    for (i, line) in annotation.iter().enumerate() {
        root.draw(&Text::new(
            line.clone(),
            (80, 80 + i as i32 * 24),
            ("sans-serif", 19),
        ))
        .map_err(|e| ScanError::Render(e.to_string()))?;
    }

    root.present().map_err(|e| ScanError::Render(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::summarize;

    #[test]
    fn bin_width_equals_std_dev() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = summarize(&series).unwrap();
        let spec = HistogramSpec::from_stats(&series, &stats).unwrap();
        assert_eq!(spec.bin_width, stats.std_dev);
    }

    #[test]
    fn mean_sits_in_center_bin() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = summarize(&series).unwrap();
        let spec = HistogramSpec::from_stats(&series, &stats).unwrap();
        assert_eq!(spec.bin_index(stats.mean), 0);
        assert_eq!(spec.bin_index(stats.mean + 0.4 * stats.std_dev), 0);
        assert_eq!(spec.bin_index(stats.mean + 0.6 * stats.std_dev), 1);
        assert_eq!(spec.bin_index(stats.mean - 0.6 * stats.std_dev), -1);
    }

    #[test]
    fn bins_span_min_to_max() {
        let series = [1.0, 2.0, 3.0, 4.0, 10.0];
        let stats = summarize(&series).unwrap();
        let spec = HistogramSpec::from_stats(&series, &stats).unwrap();
        let total: usize = series
            .iter()
            .map(|v| {
                let k = spec.bin_index(*v);
                assert!(k >= spec.first_bin && k <= spec.last_bin);
                1
            })
            .sum();
        assert_eq!(total, series.len());
        assert!(spec.first_bin <= 0 && spec.last_bin >= 0);
    }

    #[test]
    fn zero_spread_is_a_render_error() {
        let series = [2.0; 30];
        let stats = summarize(&series).unwrap();
        assert!(matches!(
            HistogramSpec::from_stats(&series, &stats),
            Err(ScanError::Render(_))
        ));
    }

    #[test]
    fn empty_series_is_a_render_error() {
        let stats = SummaryStats {
            mean: 0.0,
            std_dev: 1.0,
            median: 0.0,
        };
        assert!(matches!(
            HistogramSpec::from_stats(&[], &stats),
            Err(ScanError::Render(_))
        ));
    }

    #[test]
    fn sigma_labels() {
        assert_eq!(HistogramSpec::label(0), "0");
        assert_eq!(HistogramSpec::label(1), "+1σ");
        assert_eq!(HistogramSpec::label(-2), "-2σ");
    }

    #[test]
    fn render_writes_one_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("series.png");
        let series: Vec<f64> = (0..40).map(|i| (i % 7) as f64 * 0.5 - 1.5).collect();
        let stats = summarize(&series).unwrap();

        render_histogram(&series, &stats, "test histogram", &path).unwrap();

        let meta = std::fs::metadata(&path).unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn degenerate_render_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flat.png");
        let series = [2.0; 30];
        let stats = summarize(&series).unwrap();

        assert!(render_histogram(&series, &stats, "flat", &path).is_err());
        assert!(!path.exists());
    }
}
