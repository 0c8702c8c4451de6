//! CSV export of sweep curves.
//!
//! - Magnitude sweep: one `magnitude` column plus one column per bucket
//!   (`sn10`, `sn15`, ...)
//! - Time sweep: `time_s`, `snr`

use std::path::Path;

use crate::errors::EtcError;
use crate::sweep::{SweepResult, TimeCurve};

/// Write the magnitude sweep as CSV
pub fn curves_to_csv(result: &SweepResult, output_path: &Path) -> Result<(), EtcError> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    let mut header = vec!["magnitude".to_string()];
    header.extend(result.curves.iter().map(|c| c.name()));
    wtr.write_record(&header)?;

    for (i, magnitude) in result.magnitudes.iter().enumerate() {
        let mut row = vec![format!("{magnitude:.6}")];
        row.extend(result.curves.iter().map(|c| format!("{:.6e}", c.snr[i])));
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the S/N-vs-time curve as CSV
pub fn time_curve_to_csv(curve: &TimeCurve, output_path: &Path) -> Result<(), EtcError> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    wtr.write_record(["time_s", "snr"])?;
    for (t, snr) in curve.points() {
        wtr.write_record(&[format!("{t:.3}"), format!("{snr:.6e}")])?;
    }

    wtr.flush()?;
    Ok(())
}
