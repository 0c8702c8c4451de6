//! Error types for the exposure time calculator.
//!
//! Formula-level failures are returned at the operation boundary. Inside a
//! sweep, undefined points are carried as NaN instead of surfacing here.

use thiserror::Error;

use crate::algo::misc::InterpError;

/// Errors that can occur while evaluating the signal and noise model
#[derive(Debug, Error)]
pub enum EtcError {
    #[error("Wavelength must be positive and finite, got {0} nm")]
    InvalidWavelength(f64),

    #[error("Zenith angle {0}° is outside [0°, 90°); airmass diverges")]
    InvalidAirmass(f64),

    #[error("Signal-to-noise is undefined for a total noise variance of {0}")]
    DegenerateSnr(f64),

    #[error("Invalid observation grid: {0}")]
    InvalidGrid(String),

    #[error("Target S/N {target} is unreachable with a source rate of {source_rate} e⁻/s")]
    UnreachableSnr { target: f64, source_rate: f64 },

    #[error("Interpolation failed: {0}")]
    Interp(#[from] InterpError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed configuration file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Plot rendering failed: {0}")]
    Plot(String),
}
