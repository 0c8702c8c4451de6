//! S/N evaluation across a magnitude grid and a set of exposure buckets.

use log::{debug, info, warn};
use rayon::prelude::*;

use crate::errors::EtcError;
use crate::hardware::sensor_noise::{exposure_time_for_snr, signal_to_noise, NoiseBudget};
use crate::hardware::InstrumentConfig;
use crate::photometry::{correct_mag, flux, photon_energy, photon_rate};
use crate::sweep::curve::{SnCurve, TimeCurve};
use crate::sweep::grid::ObservationGrid;
use crate::units::{Energy, EnergyExt, Time, TimeExt};

/// Photon rates for one instrument at one airmass.
///
/// Photon energy and the sky background rate depend only on the instrument
/// and the airmass, so they are computed once here and shared by every
/// source magnitude.
#[derive(Debug, Clone)]
pub struct PhotonRates<'a> {
    instrument: &'a InstrumentConfig,
    airmass: f64,
    photon_energy: Energy,
    background_rate: f64,
}

impl<'a> PhotonRates<'a> {
    pub fn new(instrument: &'a InstrumentConfig, airmass: f64) -> Result<Self, EtcError> {
        instrument.validate()?;

        let photon_energy = photon_energy(instrument.wavelength())?;
        debug!(
            "Photon energy at {:.2} nm: {:.4e} J",
            instrument.wavelength_nm,
            photon_energy.as_joules()
        );

        let mut rates = Self {
            instrument,
            airmass,
            photon_energy,
            background_rate: 0.0,
        };
        rates.background_rate = rates.source_rate(instrument.sky_magnitude);
        debug!(
            "Sky background (m = {:.2}, X = {:.2}): {:.4e} e⁻/s",
            instrument.sky_magnitude, airmass, rates.background_rate
        );

        Ok(rates)
    }

    /// Detected electrons per second from a source of magnitude `magnitude`
    /// above the atmosphere
    pub fn source_rate(&self, magnitude: f64) -> f64 {
        let corrected = correct_mag(magnitude, self.airmass, self.instrument.extinction);
        let f = flux(corrected, self.instrument.zero_point());
        photon_rate(
            f,
            self.photon_energy,
            self.instrument.bin_width(),
            self.instrument.efficiency,
            self.instrument.aperture_area(),
            self.instrument.pixels,
        )
    }

    /// Sky background electrons per second
    pub fn background_rate(&self) -> f64 {
        self.background_rate
    }

    pub fn photon_energy(&self) -> Energy {
        self.photon_energy
    }

    pub fn airmass(&self) -> f64 {
        self.airmass
    }

    /// S/N for a known source rate
    pub fn snr_for_rate(&self, source_rate: f64, exposure_s: f64) -> f64 {
        signal_to_noise(
            source_rate,
            self.background_rate,
            self.instrument.read_noise,
            self.instrument.pixels as f64,
            self.instrument.dark_current,
            exposure_s,
        )
    }

    /// S/N for a source of the given magnitude
    pub fn snr(&self, magnitude: f64, exposure: Time) -> f64 {
        self.snr_for_rate(self.source_rate(magnitude), exposure.as_seconds())
    }

    /// Noise breakdown for a source of the given magnitude
    pub fn noise_budget(&self, magnitude: f64, exposure: Time) -> NoiseBudget {
        NoiseBudget::new(
            self.source_rate(magnitude),
            self.background_rate,
            self.instrument.read_noise,
            self.instrument.pixels as f64,
            self.instrument.dark_current,
            exposure.as_seconds(),
        )
    }

    /// Integration time for a source of the given magnitude to reach `target_snr`
    pub fn required_exposure(&self, magnitude: f64, target_snr: f64) -> Result<Time, EtcError> {
        let seconds = exposure_time_for_snr(
            self.source_rate(magnitude),
            self.background_rate,
            self.instrument.read_noise,
            self.instrument.pixels as f64,
            self.instrument.dark_current,
            target_snr,
        )?;
        Ok(Time::from_seconds(seconds))
    }

    /// S/N against time at a fixed magnitude
    pub fn time_curve(&self, magnitude: f64, times_s: &[f64]) -> TimeCurve {
        let rate = self.source_rate(magnitude);
        TimeCurve {
            magnitude,
            times_s: times_s.to_vec(),
            snr: times_s.iter().map(|&t| self.snr_for_rate(rate, t)).collect(),
        }
    }
}

/// Everything a sweep produces
#[derive(Debug, Clone)]
pub struct SweepResult {
    /// Airmass the sweep was evaluated at
    pub airmass: f64,
    /// Magnitude grid all curves are indexed against
    pub magnitudes: Vec<f64>,
    /// One curve per exposure bucket, in bucket order
    pub curves: Vec<SnCurve>,
    /// S/N against time at the grid's fixed magnitude
    pub time_curve: TimeCurve,
}

impl SweepResult {
    /// Curve for the bucket closest to `exposure`, if any is within a second
    pub fn curve(&self, exposure: Time) -> Option<&SnCurve> {
        let target = exposure.as_seconds();
        self.curves
            .iter()
            .find(|c| (c.exposure.as_seconds() - target).abs() < 1.0)
    }
}

/// Runs the S/N model for one instrument over observation grids
#[derive(Debug, Clone)]
pub struct SweepEngine {
    instrument: InstrumentConfig,
}

impl SweepEngine {
    pub fn new(instrument: InstrumentConfig) -> Self {
        Self { instrument }
    }

    pub fn instrument(&self) -> &InstrumentConfig {
        &self.instrument
    }

    /// Photon rates at the given airmass
    pub fn rates(&self, airmass: f64) -> Result<PhotonRates<'_>, EtcError> {
        PhotonRates::new(&self.instrument, airmass)
    }

    /// Evaluate every bucket at every grid magnitude, plus the time sweep.
    ///
    /// Undefined points come back as NaN in their curve; they never abort
    /// the sweep.
    pub fn run(&self, grid: &ObservationGrid) -> Result<SweepResult, EtcError> {
        let rates = self.rates(grid.airmass())?;
        let pixels = self.instrument.pixels as f64;

        // Source rates are independent per magnitude; collect keeps grid order
        let source_rates: Vec<f64> = grid
            .magnitudes()
            .par_iter()
            .map(|&m| rates.source_rate(m))
            .collect();

        let curves: Vec<SnCurve> = grid
            .exposures()
            .iter()
            .map(|&exposure| {
                let t = exposure.as_seconds();
                let snr = source_rates
                    .par_iter()
                    .map(|&rate| {
                        signal_to_noise(
                            rate,
                            rates.background_rate(),
                            self.instrument.read_noise,
                            pixels,
                            self.instrument.dark_current,
                            t,
                        )
                    })
                    .collect();
                SnCurve {
                    exposure,
                    magnitudes: grid.magnitudes().to_vec(),
                    snr,
                }
            })
            .collect();

        let undefined: usize = curves
            .iter()
            .map(|c| c.snr.iter().filter(|s| s.is_nan()).count())
            .sum();
        if undefined > 0 {
            warn!("{undefined} sweep points have undefined S/N");
        }

        let time_curve = rates.time_curve(grid.fixed_magnitude(), grid.time_samples());

        info!(
            "Evaluated {} magnitudes across {} exposure buckets at X = {:.2}",
            grid.magnitudes().len(),
            curves.len(),
            grid.airmass()
        );

        Ok(SweepResult {
            airmass: grid.airmass(),
            magnitudes: grid.magnitudes().to_vec(),
            curves,
            time_curve,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::grid::default_exposures;
    use crate::units::{AreaExt, LengthExt};
    use approx::assert_relative_eq;

    fn feros_rates(instrument: &InstrumentConfig) -> PhotonRates<'_> {
        PhotonRates::new(instrument, 2.5).unwrap()
    }

    #[test]
    fn test_background_follows_source_path() {
        let feros = InstrumentConfig::feros();
        let rates = feros_rates(&feros);
        assert_eq!(rates.background_rate(), rates.source_rate(feros.sky_magnitude));
    }

    #[test]
    fn test_source_rate_by_hand() {
        let feros = InstrumentConfig::feros();
        let rates = feros_rates(&feros);

        let corrected = 12.82 + 0.1 * 2.5;
        let flux_si = 10f64.powf(-0.4 * corrected) * 3.60994e-09 * 10.0;
        let photon_j = 6.62607015e-34 * 299_792_458.0 / 555.15e-9;
        let expected = flux_si / photon_j
            * feros.bin_width().as_micrometers()
            * 0.14
            * feros.aperture_area().as_square_meters()
            * 3.0;

        assert_relative_eq!(rates.source_rate(12.82), expected, max_relative = 1e-9);
        // A few electrons per second for a V ~ 13 star in a 5 mÅ bin
        assert!(expected > 1.0 && expected < 10.0);
    }

    #[test]
    fn test_invalid_instrument_rejected() {
        let mut broken = InstrumentConfig::feros();
        broken.wavelength_nm = -1.0;
        assert!(matches!(
            PhotonRates::new(&broken, 1.0),
            Err(EtcError::InvalidWavelength(_))
        ));
        assert!(SweepEngine::new(broken)
            .run(&ObservationGrid::linear(6.0, 20.0, 10, 1.0).unwrap())
            .is_err());
    }

    #[test]
    fn test_higher_airmass_lowers_snr() {
        let feros = InstrumentConfig::feros();
        let low = PhotonRates::new(&feros, 1.0).unwrap();
        let high = PhotonRates::new(&feros, 2.5).unwrap();
        let t = Time::from_minutes(10.0);
        assert!(high.snr(14.0, t) < low.snr(14.0, t));
    }

    #[test]
    fn test_curves_align_with_grid() {
        let engine = SweepEngine::new(InstrumentConfig::feros());
        let grid = ObservationGrid::linear(6.0, 20.0, 50, 2.5).unwrap();
        let result = engine.run(&grid).unwrap();

        assert_eq!(result.curves.len(), 6);
        assert_eq!(result.magnitudes, grid.magnitudes());
        for curve in &result.curves {
            assert_eq!(curve.magnitudes, grid.magnitudes());
            assert_eq!(curve.snr.len(), 50);
            assert!(curve.snr.windows(2).all(|w| w[1] < w[0]));
        }

        let rates = engine.rates(2.5).unwrap();
        let ten = result.curve(Time::from_minutes(10.0)).unwrap();
        assert_eq!(ten.name(), "sn10");
        assert_relative_eq!(
            ten.snr[17],
            rates.snr(grid.magnitudes()[17], Time::from_minutes(10.0)),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_nan_magnitude_only_affects_its_point() {
        let engine = SweepEngine::new(InstrumentConfig::feros());
        let grid =
            ObservationGrid::new(vec![10.0, f64::NAN, 12.0], default_exposures(), 2.5).unwrap();
        let result = engine.run(&grid).unwrap();

        for curve in &result.curves {
            assert!(curve.snr[0].is_finite());
            assert!(curve.snr[1].is_nan());
            assert!(curve.snr[2].is_finite());
        }
    }

    #[test]
    fn test_time_curve_uses_chosen_magnitude() {
        let engine = SweepEngine::new(InstrumentConfig::feros());
        let grid = ObservationGrid::linear(6.0, 20.0, 20, 2.5)
            .unwrap()
            .with_fixed_magnitude(14.0);
        let result = engine.run(&grid).unwrap();

        let curve = &result.time_curve;
        assert_eq!(curve.magnitude, 14.0);
        assert_eq!(curve.snr[0], 0.0);
        assert!(curve.snr.windows(2).all(|w| w[1] > w[0]));

        // The time sweep ends at one hour and must agree with the 60 minute bucket
        let rates = engine.rates(2.5).unwrap();
        assert_relative_eq!(
            *curve.snr.last().unwrap(),
            rates.snr(14.0, Time::from_hours(1.0)),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_required_exposure_round_trip() {
        let feros = InstrumentConfig::feros();
        let rates = feros_rates(&feros);
        let t = rates.required_exposure(12.82, 50.0).unwrap();
        assert_relative_eq!(rates.snr(12.82, t), 50.0, max_relative = 1e-9);

        // Fainter needs longer
        let fainter = rates.required_exposure(14.0, 50.0).unwrap();
        assert!(fainter.as_seconds() > t.as_seconds());
    }

    #[test]
    fn test_noise_budget_regimes() {
        let feros = InstrumentConfig::feros();
        let rates = feros_rates(&feros);
        let t = Time::from_minutes(10.0);
        assert_eq!(
            rates.noise_budget(6.0, t).dominant(),
            crate::hardware::NoiseTerm::Source
        );
        assert_eq!(
            rates.noise_budget(20.0, t).dominant(),
            crate::hardware::NoiseTerm::ReadNoise
        );
    }

    #[test]
    fn test_photon_energy_exposed() {
        let feros = InstrumentConfig::feros();
        let rates = feros_rates(&feros);
        assert_relative_eq!(
            rates.photon_energy().as_joules(),
            6.62607015e-34 * 299_792_458.0 / feros.wavelength().as_meters(),
            max_relative = 1e-12
        );
        assert_eq!(rates.airmass(), 2.5);
    }
}
