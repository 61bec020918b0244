//! Optional raw-data CSV sink, enabled by `export_raw_data` in the config.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::models::ValidRecord;

/// Writes the cleaned records with both computed metrics appended, one row
/// per record in source order. Overwrites silently.
pub fn write_raw_csv(
    path: &Path,
    records: &[ValidRecord],
    daily: &[f64],
    intraday: &[f64],
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "date,close,prev_close,high,low,daily_vol,intra_vol")?;
    for ((r, dv), iv) in records.iter().zip(daily).zip(intraday) {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            r.trade_date, r.close, r.prev_close, r.high, r.low, dv, iv
        )?;
    }
    out.flush()
}
