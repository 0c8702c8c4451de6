//! Airmass and atmospheric extinction.
//!
//! Airmass follows Hardie (1962), "Photoelectric Reductions", Astronomical
//! Techniques ch. 8: a third-order correction to the plane-parallel sec(z).

use serde::{Deserialize, Serialize};

use crate::errors::EtcError;

/// Airmass for a zenith angle in degrees.
///
/// X = sec z − 0.0018167 (sec z − 1) − 0.002875 (sec z − 1)² − 0.0008083 (sec z − 1)³
///
/// # Errors
/// `EtcError::InvalidAirmass` for angles outside [0°, 90°), where sec z diverges.
pub fn airmass(zenith_angle_deg: f64) -> Result<f64, EtcError> {
    if !(0.0..90.0).contains(&zenith_angle_deg) {
        return Err(EtcError::InvalidAirmass(zenith_angle_deg));
    }

    let secz = 1.0 / zenith_angle_deg.to_radians().cos();
    let excess = secz - 1.0;
    Ok(secz - 0.0018167 * excess - 0.002875 * excess.powi(2) - 0.0008083 * excess.powi(3))
}

/// Apparent magnitude after extinction through `airmass` atmospheres.
///
/// # Arguments
/// * `magnitude` - Magnitude above the atmosphere
/// * `airmass` - Airmass X
/// * `extinction` - Extinction coefficient k in magnitudes per airmass
pub fn correct_mag(magnitude: f64, airmass: f64, extinction: f64) -> f64 {
    magnitude + extinction * airmass
}

/// How the airmass of an observation is specified
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AirmassSpec {
    /// Airmass given directly
    Direct { airmass: f64 },
    /// Airmass derived from a zenith angle in degrees
    ZenithAngle { degrees: f64 },
}

impl AirmassSpec {
    /// Resolve to a numeric airmass
    pub fn resolve(&self) -> Result<f64, EtcError> {
        match *self {
            AirmassSpec::Direct { airmass } => {
                if airmass.is_finite() {
                    Ok(airmass)
                } else {
                    Err(EtcError::Config(format!("Airmass must be finite, got {airmass}")))
                }
            }
            AirmassSpec::ZenithAngle { degrees } => airmass(degrees),
        }
    }
}

impl Default for AirmassSpec {
    fn default() -> Self {
        AirmassSpec::Direct { airmass: 2.5 }
    }
}
