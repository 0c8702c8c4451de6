//! Instrument and site parameters for one calculator run.

use serde::{Deserialize, Serialize};

use crate::errors::EtcError;
use crate::units::{Area, AreaExt, Length, LengthExt, SpectralFluxDensity};

/// Fixed instrument, detector and site parameters.
///
/// Values are stored in the units they are usually quoted in so that
/// configuration files stay readable. The typed accessors convert at the
/// formula boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Name/identifier of the instrument configuration
    pub name: String,
    /// Band zero-point flux in erg s⁻¹ cm⁻² Å⁻¹
    pub zero_point: f64,
    /// Extinction coefficient in magnitudes per airmass
    pub extinction: f64,
    /// Sky background magnitude
    pub sky_magnitude: f64,
    /// Spectral bin width in nanometers
    pub bin_width_nm: f64,
    /// Central wavelength in nanometers
    pub wavelength_nm: f64,
    /// End-to-end efficiency (0.0 to 1.0)
    pub efficiency: f64,
    /// Telescope collecting area in m²
    pub aperture_area_m2: f64,
    /// Pixels summed per spectral bin
    pub pixels: u32,
    /// Dark current in electrons/pixel/second
    pub dark_current: f64,
    /// Read noise in electrons RMS per pixel
    pub read_noise: f64,
}

impl InstrumentConfig {
    /// FEROS on the MPG/ESO 2.2 m in the V band, around echelle order 40.
    ///
    /// Sky magnitude is the bright-night La Silla value.
    pub fn feros() -> Self {
        Self {
            name: "FEROS V band".to_string(),
            zero_point: 3.60994e-09,
            extinction: 0.1,
            sky_magnitude: 20.0,
            bin_width_nm: 0.0051,
            wavelength_nm: 555.15,
            efficiency: 0.14,
            aperture_area_m2: 3.8,
            pixels: 3,
            dark_current: 0.000305556,
            read_noise: 4.8,
        }
    }

    /// Check every parameter is physically meaningful
    pub fn validate(&self) -> Result<(), EtcError> {
        if !self.wavelength_nm.is_finite() || self.wavelength_nm <= 0.0 {
            return Err(EtcError::InvalidWavelength(self.wavelength_nm));
        }

        let positive = [
            ("zero_point", self.zero_point),
            ("bin_width_nm", self.bin_width_nm),
            ("aperture_area_m2", self.aperture_area_m2),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(EtcError::Config(format!(
                    "{field} must be positive and finite, got {value}"
                )));
            }
        }

        let non_negative = [
            ("dark_current", self.dark_current),
            ("read_noise", self.read_noise),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(EtcError::Config(format!(
                    "{field} must be non-negative and finite, got {value}"
                )));
            }
        }

        if !(self.efficiency > 0.0 && self.efficiency <= 1.0) {
            return Err(EtcError::Config(format!(
                "efficiency must be in (0, 1], got {}",
                self.efficiency
            )));
        }

        if !self.extinction.is_finite() || !self.sky_magnitude.is_finite() {
            return Err(EtcError::Config(
                "extinction and sky_magnitude must be finite".to_string(),
            ));
        }

        if self.pixels == 0 {
            return Err(EtcError::Config("pixels must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Central wavelength of the spectral bin
    pub fn wavelength(&self) -> Length {
        Length::from_nanometers(self.wavelength_nm)
    }

    /// Width of the spectral bin
    pub fn bin_width(&self) -> Length {
        Length::from_nanometers(self.bin_width_nm)
    }

    /// Telescope collecting area
    pub fn aperture_area(&self) -> Area {
        Area::from_square_meters(self.aperture_area_m2)
    }

    /// Band zero-point as a flux density
    pub fn zero_point(&self) -> SpectralFluxDensity {
        SpectralFluxDensity::from_erg_per_s_cm2_angstrom(self.zero_point)
    }
}

impl Default for InstrumentConfig {
    fn default() -> Self {
        Self::feros()
    }
}
