//! Magnitude to flux and flux to detected photon rate.

use crate::units::{Area, AreaExt, Energy, EnergyExt, Length, LengthExt, SpectralFluxDensity};

/// Flux density of a source of the given (extinction-corrected) magnitude.
///
/// F = 10^(−0.4·m) · Z, where Z is the band zero-point flux.
pub fn flux(magnitude: f64, zero_point: SpectralFluxDensity) -> SpectralFluxDensity {
    zero_point * 10f64.powf(-0.4 * magnitude)
}

/// Detected photo-electron rate for a flux density across one spectral bin.
///
/// rate = (F / P) · b · f · A · npx
///
/// # Arguments
/// * `flux` - Spectral flux density at the telescope
/// * `photon_energy` - Energy per photon at the bin wavelength
/// * `bin_width` - Spectral width of the bin
/// * `efficiency` - End-to-end efficiency (atmosphere excluded)
/// * `aperture` - Collecting area
/// * `pixels` - Number of pixels the signal is summed over
///
/// # Returns
/// Photo-electrons per second
pub fn photon_rate(
    flux: SpectralFluxDensity,
    photon_energy: Energy,
    bin_width: Length,
    efficiency: f64,
    aperture: Area,
    pixels: u32,
) -> f64 {
    // photons s⁻¹ m⁻² µm⁻¹
    let photon_flux = flux.as_watts_per_m2_per_um() / photon_energy.as_joules();
    photon_flux * bin_width.as_micrometers() * efficiency * aperture.as_square_meters() * pixels as f64
}
