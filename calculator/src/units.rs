//! Type-safe physical units for exposure time calculations
//!
//! Wavelengths, areas, times and energies use the `uom` crate so that the
//! formula boundaries convert explicitly instead of silently mixing units.
//! Spectral flux density has no `uom` quantity, so it gets a small newtype
//! with one constructor and accessor per supported unit.

use std::ops::{Div, Mul};

use uom::si::area::{square_centimeter, square_meter};
use uom::si::energy::{erg, joule};
use uom::si::length::{angstrom, centimeter, meter, micrometer, nanometer};
use uom::si::time::{hour, minute, second};

/// Type alias for length measurements (wavelengths, bin widths)
pub type Length = uom::si::f64::Length;

/// Type alias for collecting areas
pub type Area = uom::si::f64::Area;

/// Type alias for integration times
pub type Time = uom::si::f64::Time;

/// Type alias for per-photon energies
pub type Energy = uom::si::f64::Energy;

/// Extension trait for length conversions commonly used in spectroscopy
pub trait LengthExt {
    /// Create length from nanometers (wavelengths)
    fn from_nanometers(nm: f64) -> Self;

    /// Get length in nanometers
    fn as_nanometers(&self) -> f64;

    /// Create length from micrometers
    fn from_micrometers(um: f64) -> Self;

    /// Get length in micrometers
    fn as_micrometers(&self) -> f64;

    /// Create length from angstroms
    fn from_angstroms(a: f64) -> Self;

    /// Get length in angstroms
    fn as_angstroms(&self) -> f64;

    /// Get length in centimeters
    fn as_centimeters(&self) -> f64;

    /// Create length from meters
    fn from_meters(m: f64) -> Self;

    /// Get length in meters
    fn as_meters(&self) -> f64;
}

/// Extension trait for telescope collecting areas
pub trait AreaExt {
    fn from_square_meters(m2: f64) -> Self;
    fn as_square_meters(&self) -> f64;
    fn from_square_centimeters(cm2: f64) -> Self;
    fn as_square_centimeters(&self) -> f64;
}

/// Extension trait for exposure times
pub trait TimeExt {
    fn from_seconds(s: f64) -> Self;
    fn as_seconds(&self) -> f64;
    fn from_minutes(min: f64) -> Self;
    fn as_minutes(&self) -> f64;
    fn from_hours(h: f64) -> Self;
}

/// Extension trait for photon energies
pub trait EnergyExt {
    fn from_joules(j: f64) -> Self;
    fn as_joules(&self) -> f64;
    fn as_ergs(&self) -> f64;
}

impl LengthExt for Length {
    fn from_nanometers(nm: f64) -> Self {
        Length::new::<nanometer>(nm)
    }

    fn as_nanometers(&self) -> f64 {
        self.get::<nanometer>()
    }

    fn from_micrometers(um: f64) -> Self {
        Length::new::<micrometer>(um)
    }

    fn as_micrometers(&self) -> f64 {
        self.get::<micrometer>()
    }

    fn from_angstroms(a: f64) -> Self {
        Length::new::<angstrom>(a)
    }

    fn as_angstroms(&self) -> f64 {
        self.get::<angstrom>()
    }

    fn as_centimeters(&self) -> f64 {
        self.get::<centimeter>()
    }

    fn from_meters(m: f64) -> Self {
        Length::new::<meter>(m)
    }

    fn as_meters(&self) -> f64 {
        self.get::<meter>()
    }
}

impl AreaExt for Area {
    fn from_square_meters(m2: f64) -> Self {
        Area::new::<square_meter>(m2)
    }

    fn as_square_meters(&self) -> f64 {
        self.get::<square_meter>()
    }

    fn from_square_centimeters(cm2: f64) -> Self {
        Area::new::<square_centimeter>(cm2)
    }

    fn as_square_centimeters(&self) -> f64 {
        self.get::<square_centimeter>()
    }
}

impl TimeExt for Time {
    fn from_seconds(s: f64) -> Self {
        Time::new::<second>(s)
    }

    fn as_seconds(&self) -> f64 {
        self.get::<second>()
    }

    fn from_minutes(min: f64) -> Self {
        Time::new::<minute>(min)
    }

    fn as_minutes(&self) -> f64 {
        self.get::<minute>()
    }

    fn from_hours(h: f64) -> Self {
        Time::new::<hour>(h)
    }
}

impl EnergyExt for Energy {
    fn from_joules(j: f64) -> Self {
        Energy::new::<joule>(j)
    }

    fn as_joules(&self) -> f64 {
        self.get::<joule>()
    }

    fn as_ergs(&self) -> f64 {
        self.get::<erg>()
    }
}

/// Spectral flux density (power per area per wavelength interval)
///
/// Stored internally in W m⁻³. Band zero-points are usually quoted in
/// erg s⁻¹ cm⁻² Å⁻¹ while the photon-rate arithmetic runs in W m⁻² µm⁻¹.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SpectralFluxDensity {
    watts_per_m3: f64,
}

impl SpectralFluxDensity {
    /// 1 erg s⁻¹ cm⁻² Å⁻¹ = 1e-7 W / (1e-4 m² · 1e-10 m)
    const ERG_S_CM2_ANGSTROM_IN_SI: f64 = 1e7;

    /// 1 W m⁻² µm⁻¹ = 1 W / (1 m² · 1e-6 m)
    const W_M2_UM_IN_SI: f64 = 1e6;

    pub fn from_erg_per_s_cm2_angstrom(value: f64) -> Self {
        Self {
            watts_per_m3: value * Self::ERG_S_CM2_ANGSTROM_IN_SI,
        }
    }

    pub fn as_erg_per_s_cm2_angstrom(&self) -> f64 {
        self.watts_per_m3 / Self::ERG_S_CM2_ANGSTROM_IN_SI
    }

    pub fn from_watts_per_m2_per_um(value: f64) -> Self {
        Self {
            watts_per_m3: value * Self::W_M2_UM_IN_SI,
        }
    }

    pub fn as_watts_per_m2_per_um(&self) -> f64 {
        self.watts_per_m3 / Self::W_M2_UM_IN_SI
    }

    pub fn as_watts_per_m3(&self) -> f64 {
        self.watts_per_m3
    }
}

impl Mul<f64> for SpectralFluxDensity {
    type Output = SpectralFluxDensity;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            watts_per_m3: self.watts_per_m3 * rhs,
        }
    }
}

/// Ratio of two flux densities is dimensionless
impl Div for SpectralFluxDensity {
    type Output = f64;

    fn div(self, rhs: Self) -> Self::Output {
        self.watts_per_m3 / rhs.watts_per_m3
    }
}
