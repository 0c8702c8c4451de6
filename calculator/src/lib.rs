//! Exposure time calculator for ground-based optical spectrographs
//!
//! Converts a target's apparent magnitude into detected photon rates,
//! combines them with sky, dark current, and read noise into a
//! signal-to-noise estimate, and sweeps that estimate over grids of
//! magnitude and integration time.

pub mod algo;
pub mod config;
pub mod errors;
pub mod export;
pub mod hardware;
pub mod photometry;
pub mod plot;
pub mod shared_args;
pub mod sweep;
pub mod units;

pub use config::{ObservationConfig, RunConfig};
pub use errors::EtcError;
pub use hardware::{exposure_time_for_snr, signal_to_noise, InstrumentConfig, NoiseBudget};
pub use photometry::{airmass, correct_mag, flux, photon_energy, photon_rate, AirmassSpec};
pub use sweep::{ObservationGrid, PhotonRates, SnCurve, SweepEngine, SweepResult, TimeCurve};
