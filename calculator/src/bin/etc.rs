//! Exposure time calculator for the FEROS spectrograph (or any configured instrument)
//!
//! Sweeps S/N over source magnitude for a set of exposure buckets at a
//! fixed airmass, reports limiting magnitudes and required exposures, and
//! optionally writes the curves as CSV and PNG charts.

use std::path::PathBuf;

use calculator::export::{curves_to_csv, time_curve_to_csv};
use calculator::plot::{default_plot_path, render_magnitude_chart, render_time_chart};
use calculator::shared_args::SweepArgs;
use calculator::units::TimeExt;
use calculator::{EtcError, RunConfig, SweepEngine};
use clap::Parser;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "Exposure Time Calculator",
    about = "Signal-to-noise versus magnitude and exposure time for a spectrograph",
    long_about = None
)]
struct Args {
    /// JSON run configuration (defaults to FEROS at airmass 2.5)
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(flatten)]
    sweep: SweepArgs,

    /// S/N used for limiting magnitudes and required exposures
    #[arg(long, default_value_t = 10.0)]
    target_snr: f64,

    /// Write the magnitude sweep to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Write the S/N-vs-time curve to this CSV file
    #[arg(long)]
    time_csv: Option<PathBuf>,

    /// Render the S/N-vs-magnitude chart
    #[arg(long)]
    plot: bool,

    /// Chart output path (defaults to snr_mag_X_<airmass>.png)
    #[arg(long, requires = "plot")]
    plot_path: Option<PathBuf>,

    /// Render the S/N-vs-time chart to this path
    #[arg(long)]
    time_plot: Option<PathBuf>,

    /// Chart size in pixels as WIDTHxHEIGHT
    #[arg(long, default_value = "1200x800", value_parser = parse_size)]
    plot_size: (u32, u32),

    /// Write the effective configuration to this JSON file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
}

/// Parse a chart size string such as "1200x800"
fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once('x')
        .ok_or_else(|| "Size must be in format 'WIDTHxHEIGHT'".to_string())?;
    let w: u32 = w
        .trim()
        .parse()
        .map_err(|_| format!("Invalid width: {}", w))?;
    let h: u32 = h
        .trim()
        .parse()
        .map_err(|_| format!("Invalid height: {}", h))?;
    if w == 0 || h == 0 {
        return Err("Chart dimensions must be non-zero".to_string());
    }
    Ok((w, h))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RunConfig::load_from_file(path)?,
        None => RunConfig::default(),
    };
    args.sweep.apply(&mut config.observation);

    if let Some(path) = &args.write_config {
        config.save_to_file(path)?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let grid = config.observation.to_grid()?;
    let engine = SweepEngine::new(config.instrument.clone());
    let result = engine.run(&grid)?;
    let rates = engine.rates(grid.airmass())?;

    println!("Exposure Time Calculator");
    println!("========================");
    println!();
    println!("Instrument: {}", config.instrument.name);
    println!("Airmass: {:.2}", result.airmass);
    println!(
        "Magnitude range: {:.2} to {:.2} ({} points)",
        config.observation.magnitude_min,
        config.observation.magnitude_max,
        result.magnitudes.len()
    );
    println!("Sky background: {:.4e} e⁻/s", rates.background_rate());
    println!();

    println!("Limiting magnitude at S/N = {}", args.target_snr);
    println!("{:<12} {:>12}", "Exposure", "Magnitude");
    println!("{:-<25}", "");
    for curve in &result.curves {
        match curve.limiting_magnitude(args.target_snr) {
            Ok(Some(mag)) => println!("{:<12} {:>12.3}", curve.label(), mag),
            Ok(None) => println!("{:<12} {:>12}", curve.label(), "n/a"),
            Err(e) => {
                warn!("Limiting magnitude for {} failed: {}", curve.label(), e);
                println!("{:<12} {:>12}", curve.label(), "n/a");
            }
        }
    }
    println!();

    let fixed = grid.fixed_magnitude();
    let longest = grid.longest_exposure();
    let budget = rates.noise_budget(fixed, longest);
    println!("Fixed magnitude V = {:.2}", fixed);
    println!("  Source rate: {:.4e} e⁻/s", rates.source_rate(fixed));
    println!(
        "  Dominant noise at {:.1} min: {:?}",
        longest.as_minutes(),
        budget.dominant()
    );
    match rates.required_exposure(fixed, args.target_snr) {
        Ok(t) => println!(
            "  Exposure for S/N = {}: {:.1} s ({:.2} min)",
            args.target_snr,
            t.as_seconds(),
            t.as_minutes()
        ),
        Err(EtcError::UnreachableSnr { .. }) => {
            println!("  S/N = {} is unreachable", args.target_snr)
        }
        Err(e) => {
            warn!("Required exposure at V = {:.2} failed: {}", fixed, e);
            println!("  Exposure for S/N = {}: n/a", args.target_snr)
        }
    }
    if let Some((t, snr)) = result.time_curve.points().last() {
        println!("  S/N after {:.0} s: {:.2}", t, snr);
    }

    if let Some(path) = &args.csv {
        curves_to_csv(&result, path)?;
        info!("Magnitude sweep written to {}", path.display());
    }
    if let Some(path) = &args.time_csv {
        time_curve_to_csv(&result.time_curve, path)?;
        info!("Time sweep written to {}", path.display());
    }
    if args.plot {
        let path = args
            .plot_path
            .clone()
            .unwrap_or_else(|| default_plot_path(result.airmass));
        render_magnitude_chart(&result, &path, args.plot_size)?;
        println!();
        println!("Chart written to {}", path.display());
    }
    if let Some(path) = &args.time_plot {
        render_time_chart(&result.time_curve, path, args.plot_size)?;
        println!("Time chart written to {}", path.display());
    }

    Ok(())
}
