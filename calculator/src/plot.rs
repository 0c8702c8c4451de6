//! Chart rendering for sweep results using `plotters`.

use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::errors::EtcError;
use crate::sweep::{SweepResult, TimeCurve};

/// Line colours for successive exposure buckets
const BUCKET_COLORS: [RGBColor; 6] = [
    RGBColor(100, 149, 237), // cornflower blue
    RGBColor(210, 105, 30),  // chocolate
    RGBColor(32, 178, 170),  // light sea green
    RGBColor(60, 179, 113),  // medium sea green
    RGBColor(178, 34, 34),   // firebrick
    RGBColor(139, 0, 139),   // dark magenta
];

fn plot_err<E: std::fmt::Display>(err: E) -> EtcError {
    EtcError::Plot(err.to_string())
}

/// Default chart file name, tagged with the airmass
pub fn default_plot_path(airmass: f64) -> PathBuf {
    PathBuf::from(format!("snr_mag_X_{airmass:.2}.png"))
}

/// Positive finite range of a set of S/N values, padded by a few percent
fn snr_bounds<'a>(values: impl Iterator<Item = &'a f64>) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .copied()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo.is_finite() && hi.is_finite() {
        Some((lo * 0.9, hi * 1.1))
    } else {
        None
    }
}

/// Render S/N against magnitude, one line per bucket, on a log S/N axis
pub fn render_magnitude_chart(
    result: &SweepResult,
    output_path: &Path,
    size: (u32, u32),
) -> Result<(), EtcError> {
    let (y_min, y_max) = snr_bounds(result.curves.iter().flat_map(|c| c.snr.iter()))
        .ok_or_else(|| EtcError::Plot("no positive S/N values to plot".to_string()))?;
    let (x_min, x_max) = finite_extent(&result.magnitudes)
        .ok_or_else(|| EtcError::Plot("no finite magnitudes to plot".to_string()))?;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Airmass = {:.2}", result.airmass),
            ("sans-serif", 32).into_font().color(&BLACK),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_min..x_max, (y_min..y_max).log_scale())
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("V")
        .y_desc("S/N")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(plot_err)?;

    for (curve, color) in result.curves.iter().zip(BUCKET_COLORS.iter().cycle()) {
        let color = *color;
        chart
            .draw_series(LineSeries::new(
                curve.points().filter(|(m, s)| m.is_finite() && s.is_finite() && *s > 0.0),
                color.stroke_width(3),
            ))
            .map_err(plot_err)?
            .label(curve.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3)));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// Render S/N against integration time for the fixed-magnitude sweep
pub fn render_time_chart(
    curve: &TimeCurve,
    output_path: &Path,
    size: (u32, u32),
) -> Result<(), EtcError> {
    let (_, y_max) = snr_bounds(curve.snr.iter())
        .ok_or_else(|| EtcError::Plot("no positive S/N values to plot".to_string()))?;
    let (t_min, t_max) = finite_extent(&curve.times_s)
        .ok_or_else(|| EtcError::Plot("no finite times to plot".to_string()))?;

    let root = BitMapBackend::new(output_path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let root = root.margin(20, 20, 20, 20);

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("V = {:.2}", curve.magnitude),
            ("sans-serif", 32).into_font().color(&BLACK),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(t_min..t_max, 0.0..y_max)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Integration time (s)")
        .y_desc("S/N")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(LineSeries::new(
            curve.points().filter(|(_, s)| s.is_finite()),
            BUCKET_COLORS[0].stroke_width(3),
        ))
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    (lo < hi).then_some((lo, hi))
}
