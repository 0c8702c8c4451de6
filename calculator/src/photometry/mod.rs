//! Photometry models: photon energy, extinction, and flux conversion

pub mod extinction;
pub mod flux;
pub mod photon;

pub use extinction::{airmass, correct_mag, AirmassSpec};
pub use flux::{flux, photon_rate};
pub use photon::{photon_energy, SI};
