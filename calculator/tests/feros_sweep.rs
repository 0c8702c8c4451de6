//! End-to-end sweep of the FEROS configuration at airmass 2.5.

use approx::assert_relative_eq;
use calculator::export::curves_to_csv;
use calculator::units::{Time, TimeExt};
use calculator::{InstrumentConfig, RunConfig, SweepEngine, SweepResult};
use tempfile::TempDir;

fn default_sweep() -> SweepResult {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = RunConfig::default();
    let grid = config.observation.to_grid().unwrap();
    SweepEngine::new(config.instrument).run(&grid).unwrap()
}

#[test]
fn test_longer_exposures_dominate_everywhere() {
    let result = default_sweep();
    assert_eq!(result.magnitudes.len(), 10_000);
    assert_eq!(result.curves.len(), 6);

    let short = result.curve(Time::from_minutes(10.0)).unwrap();
    let long = result.curve(Time::from_minutes(60.0)).unwrap();
    for ((m, s10), s60) in short.points().zip(long.snr.iter()) {
        assert!(*s60 > s10, "S/N at m = {m} did not grow: {s10} -> {s60}");
    }

    // Each successive bucket sits above the previous one
    for pair in result.curves.windows(2) {
        assert!(pair[1].snr[5_000] > pair[0].snr[5_000]);
    }
}

#[test]
fn test_bright_end_is_source_limited() {
    let result = default_sweep();
    let instrument = InstrumentConfig::feros();
    let engine = SweepEngine::new(instrument);
    let rates = engine.rates(2.5).unwrap();

    let curve = result.curve(Time::from_minutes(10.0)).unwrap();
    let n = rates.source_rate(result.magnitudes[0]);
    let shot_limit = (n * 600.0).sqrt();
    assert_relative_eq!(curve.snr[0], shot_limit, max_relative = 1e-3);
}

#[test]
fn test_faint_end_is_below_unity() {
    let result = default_sweep();
    let curve = result.curve(Time::from_minutes(10.0)).unwrap();
    let faintest = *curve.snr.last().unwrap();
    assert_eq!(*result.magnitudes.last().unwrap(), 20.0);
    assert!(faintest > 0.0 && faintest < 1.0, "S/N at m = 20: {faintest}");
}

#[test]
fn test_limiting_magnitudes_get_fainter_with_time() {
    let result = default_sweep();
    let limits: Vec<f64> = result
        .curves
        .iter()
        .map(|c| c.limiting_magnitude(10.0).unwrap().unwrap())
        .collect();

    for pair in limits.windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert!(limits.iter().all(|m| *m > 6.0 && *m < 20.0));
}

#[test]
fn test_time_sweep_matches_required_exposure() {
    let result = default_sweep();
    let engine = SweepEngine::new(InstrumentConfig::feros());
    let rates = engine.rates(2.5).unwrap();

    assert_eq!(result.time_curve.magnitude, 12.82);
    assert_eq!(result.time_curve.snr[0], 0.0);
    let (t_end, snr_end) = result.time_curve.points().last().unwrap();
    assert_eq!(t_end, 3600.0);
    assert_relative_eq!(
        snr_end,
        rates.snr(12.82, Time::from_seconds(3600.0)),
        max_relative = 1e-12
    );

    let t = rates.required_exposure(12.82, 50.0).unwrap();
    assert!(t.as_seconds() > 0.0 && t.as_seconds() < 3600.0);
    assert_relative_eq!(rates.snr(12.82, t), 50.0, max_relative = 1e-9);
}

#[test]
fn test_config_file_drives_csv_export() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("run.json");
    let csv_path = dir.path().join("curves.csv");

    let mut config = RunConfig::default();
    config.observation.magnitude_points = 50;
    config.observation.exposures_minutes = vec![10.0, 60.0];
    config.save_to_file(&config_path).unwrap();

    let loaded = RunConfig::load_from_file(&config_path).unwrap();
    let grid = loaded.observation.to_grid().unwrap();
    let result = SweepEngine::new(loaded.instrument).run(&grid).unwrap();
    curves_to_csv(&result, &csv_path).unwrap();

    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(
        rdr.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["magnitude", "sn10", "sn60"]
    );
    assert_eq!(rdr.records().count(), 50);
}

#[test]
fn test_degenerate_grids_still_export() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new().unwrap();

    // One magnitude and a zero-length bucket: nothing to invert, but the
    // sweep and its CSV output must still go through
    let mut config = RunConfig::default();
    config.observation.magnitude_min = 12.0;
    config.observation.magnitude_max = 12.0;
    config.observation.magnitude_points = 1;
    config.observation.exposures_minutes = vec![0.0, 10.0];

    let grid = config.observation.to_grid().unwrap();
    let result = SweepEngine::new(config.instrument).run(&grid).unwrap();
    assert_eq!(result.curves[0].snr, vec![0.0]);
    for curve in &result.curves {
        assert_eq!(curve.limiting_magnitude(10.0).unwrap(), None);
    }
    assert_relative_eq!(grid.longest_exposure().as_minutes(), 10.0, epsilon = 1e-9);

    let csv_path = dir.path().join("single.csv");
    curves_to_csv(&result, &csv_path).unwrap();
    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(rdr.records().count(), 1);
}
