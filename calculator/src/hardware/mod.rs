//! Hardware module for instrument configuration and detector noise

pub mod instrument;
pub mod sensor_noise;

pub use instrument::InstrumentConfig;
pub use sensor_noise::{exposure_time_for_snr, signal_to_noise, NoiseBudget, NoiseTerm};
