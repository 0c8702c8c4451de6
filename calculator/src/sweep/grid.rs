//! Magnitude grid and exposure buckets for a sweep.

use crate::algo::misc::linspace;
use crate::errors::EtcError;
use crate::units::{Time, TimeExt};

/// Exposure buckets evaluated by default, in minutes
pub const DEFAULT_EXPOSURES_MINUTES: [f64; 6] = [10.0, 15.0, 20.0, 30.0, 45.0, 60.0];

/// Magnitude followed by the time sweep unless another is chosen
pub const DEFAULT_FIXED_MAGNITUDE: f64 = 12.82;

/// Length of the time sweep in seconds
pub const DEFAULT_TIME_SWEEP_SECONDS: f64 = 3600.0;

/// Samples in the time sweep
pub const DEFAULT_TIME_SWEEP_POINTS: usize = 10_000;

/// Everything a sweep iterates over, fixed for one run.
#[derive(Debug, Clone)]
pub struct ObservationGrid {
    magnitudes: Vec<f64>,
    exposures: Vec<Time>,
    airmass: f64,
    fixed_magnitude: f64,
    time_samples_s: Vec<f64>,
}

impl ObservationGrid {
    /// Create a grid from explicit magnitudes and exposure buckets.
    ///
    /// Finite magnitudes must be in ascending order. Non-finite entries are
    /// kept so they show up as undefined points in the output curves.
    pub fn new(magnitudes: Vec<f64>, exposures: Vec<Time>, airmass: f64) -> Result<Self, EtcError> {
        if magnitudes.is_empty() {
            return Err(EtcError::InvalidGrid("magnitude grid is empty".to_string()));
        }

        let mut previous = f64::NEG_INFINITY;
        for &m in magnitudes.iter().filter(|m| m.is_finite()) {
            if m < previous {
                return Err(EtcError::InvalidGrid(format!(
                    "magnitudes must be ascending, found {m} after {previous}"
                )));
            }
            previous = m;
        }

        if exposures.is_empty() {
            return Err(EtcError::InvalidGrid("no exposure buckets".to_string()));
        }
        if let Some(bad) = exposures
            .iter()
            .map(|t| t.as_seconds())
            .find(|s| !s.is_finite() || *s < 0.0)
        {
            return Err(EtcError::InvalidGrid(format!(
                "exposure times must be finite and non-negative, got {bad} s"
            )));
        }

        if !airmass.is_finite() {
            return Err(EtcError::InvalidGrid(format!(
                "airmass must be finite, got {airmass}"
            )));
        }

        Ok(Self {
            magnitudes,
            exposures,
            airmass,
            fixed_magnitude: DEFAULT_FIXED_MAGNITUDE,
            time_samples_s: linspace(0.0, DEFAULT_TIME_SWEEP_SECONDS, DEFAULT_TIME_SWEEP_POINTS),
        })
    }

    /// Evenly spaced magnitudes over `[min_mag, max_mag]` with the default buckets
    pub fn linear(min_mag: f64, max_mag: f64, points: usize, airmass: f64) -> Result<Self, EtcError> {
        if !(min_mag.is_finite() && max_mag.is_finite()) || min_mag > max_mag {
            return Err(EtcError::InvalidGrid(format!(
                "invalid magnitude range {min_mag}..{max_mag}"
            )));
        }
        Self::new(linspace(min_mag, max_mag, points), default_exposures(), airmass)
    }

    /// Choose the magnitude followed by the time sweep
    pub fn with_fixed_magnitude(mut self, magnitude: f64) -> Self {
        self.fixed_magnitude = magnitude;
        self
    }

    /// Sample the time sweep at `points` evenly spaced times over `[0, duration]`
    pub fn with_time_sweep(mut self, duration: Time, points: usize) -> Result<Self, EtcError> {
        let seconds = duration.as_seconds();
        if !seconds.is_finite() || seconds < 0.0 || points == 0 {
            return Err(EtcError::InvalidGrid(format!(
                "time sweep needs a non-negative duration and at least one sample, got {seconds} s x {points}"
            )));
        }
        self.time_samples_s = linspace(0.0, seconds, points);
        Ok(self)
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    pub fn exposures(&self) -> &[Time] {
        &self.exposures
    }

    pub fn airmass(&self) -> f64 {
        self.airmass
    }

    /// Longest exposure bucket
    pub fn longest_exposure(&self) -> Time {
        self.exposures
            .iter()
            .copied()
            .fold(Time::from_seconds(0.0), |longest, t| {
                if t > longest {
                    t
                } else {
                    longest
                }
            })
    }

    pub fn fixed_magnitude(&self) -> f64 {
        self.fixed_magnitude
    }

    /// Time sweep sample times in seconds
    pub fn time_samples(&self) -> &[f64] {
        &self.time_samples_s
    }
}

/// The 10/15/20/30/45/60 minute buckets
pub fn default_exposures() -> Vec<Time> {
    DEFAULT_EXPOSURES_MINUTES
        .iter()
        .map(|&min| Time::from_minutes(min))
        .collect()
}
