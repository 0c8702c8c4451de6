//! Photon energy from wavelength.

use crate::errors::EtcError;
use crate::units::{Energy, EnergyExt, Length, LengthExt};

/// Physical constants in SI units
pub struct SI {}

impl SI {
    /// Planck's constant
    /// Units: 6.62607015e-34 J⋅s
    pub const PLANCK_CONSTANT: f64 = 6.62607015e-34;

    /// Speed of light in vacuum
    /// Units: 299792458 m/s
    pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
}

/// Energy carried by a single photon of the given wavelength, E = h·c/λ.
///
/// # Errors
/// `EtcError::InvalidWavelength` if the wavelength is not positive and finite.
pub fn photon_energy(wavelength: Length) -> Result<Energy, EtcError> {
    let wavelength_m = wavelength.as_meters();
    if !wavelength_m.is_finite() || wavelength_m <= 0.0 {
        return Err(EtcError::InvalidWavelength(wavelength.as_nanometers()));
    }
    Ok(Energy::from_joules(
        SI::PLANCK_CONSTANT * SI::SPEED_OF_LIGHT / wavelength_m,
    ))
}
