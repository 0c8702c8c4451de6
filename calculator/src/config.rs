//! JSON run configuration: instrument parameters plus the observation grid.

use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::EtcError;
use crate::hardware::InstrumentConfig;
use crate::photometry::AirmassSpec;
use crate::sweep::grid::{
    ObservationGrid, DEFAULT_EXPOSURES_MINUTES, DEFAULT_FIXED_MAGNITUDE,
    DEFAULT_TIME_SWEEP_POINTS, DEFAULT_TIME_SWEEP_SECONDS,
};
use crate::units::{Time, TimeExt};

/// Observation parameters as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservationConfig {
    pub airmass: AirmassSpec,
    pub magnitude_min: f64,
    pub magnitude_max: f64,
    pub magnitude_points: usize,
    pub exposures_minutes: Vec<f64>,
    /// Magnitude followed by the S/N-vs-time curve
    pub fixed_magnitude: f64,
    pub time_sweep_seconds: f64,
    pub time_sweep_points: usize,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            airmass: AirmassSpec::default(),
            magnitude_min: 6.0,
            magnitude_max: 20.0,
            magnitude_points: 10_000,
            exposures_minutes: DEFAULT_EXPOSURES_MINUTES.to_vec(),
            fixed_magnitude: DEFAULT_FIXED_MAGNITUDE,
            time_sweep_seconds: DEFAULT_TIME_SWEEP_SECONDS,
            time_sweep_points: DEFAULT_TIME_SWEEP_POINTS,
        }
    }
}

impl ObservationConfig {
    /// Build the grid this configuration describes
    pub fn to_grid(&self) -> Result<ObservationGrid, EtcError> {
        let airmass = self.airmass.resolve()?;
        let base = ObservationGrid::linear(
            self.magnitude_min,
            self.magnitude_max,
            self.magnitude_points,
            airmass,
        )?;
        let exposures: Vec<Time> = self
            .exposures_minutes
            .iter()
            .map(|&min| Time::from_minutes(min))
            .collect();

        ObservationGrid::new(base.magnitudes().to_vec(), exposures, airmass)?
            .with_fixed_magnitude(self.fixed_magnitude)
            .with_time_sweep(
                Time::from_seconds(self.time_sweep_seconds),
                self.time_sweep_points,
            )
    }
}

/// Complete description of one calculator run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RunConfig {
    pub instrument: InstrumentConfig,
    #[serde(default)]
    pub observation: ObservationConfig,
}

impl RunConfig {
    /// Save to JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), EtcError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from JSON file, validating the instrument parameters
    pub fn load_from_file(path: &Path) -> Result<Self, EtcError> {
        let json = std::fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&json)?;
        config.instrument.validate()?;
        info!(
            "Loaded configuration '{}' from {}",
            config.instrument.name,
            path.display()
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_grid() {
        let grid = RunConfig::default().observation.to_grid().unwrap();
        assert_eq!(grid.magnitudes().len(), 10_000);
        assert_eq!(grid.exposures().len(), 6);
        assert_eq!(grid.airmass(), 2.5);
        assert_eq!(grid.fixed_magnitude(), 12.82);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("feros.json");

        let mut config = RunConfig::default();
        config.observation.airmass = AirmassSpec::ZenithAngle { degrees: 45.0 };
        config.observation.exposures_minutes = vec![5.0, 120.0];
        config.save_to_file(&path).unwrap();

        let loaded = RunConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        let grid = loaded.observation.to_grid().unwrap();
        assert_eq!(grid.exposures().len(), 2);
        assert!(grid.airmass() > 1.4 && grid.airmass() < 1.42);
    }

    #[test]
    fn test_partial_observation_section_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");

        let instrument = serde_json::to_value(InstrumentConfig::feros()).unwrap();
        let json = serde_json::json!({
            "instrument": instrument,
            "observation": { "magnitude_points": 100 }
        });
        std::fs::write(&path, json.to_string()).unwrap();

        let loaded = RunConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.observation.magnitude_points, 100);
        assert_eq!(loaded.observation.magnitude_min, 6.0);
        assert_eq!(loaded.observation.airmass, AirmassSpec::Direct { airmass: 2.5 });
    }

    #[test]
    fn test_invalid_instrument_in_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");

        let mut config = RunConfig::default();
        config.instrument.efficiency = 0.0;
        config.save_to_file(&path).unwrap();

        assert!(matches!(
            RunConfig::load_from_file(&path),
            Err(EtcError::Config(_))
        ));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("garbage.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            RunConfig::load_from_file(&path),
            Err(EtcError::Json(_))
        ));
        assert!(matches!(
            RunConfig::load_from_file(&dir.path().join("missing.json")),
            Err(EtcError::Io(_))
        ));
    }
}
