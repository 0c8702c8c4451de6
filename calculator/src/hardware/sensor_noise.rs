//! Detector noise model and the signal-to-noise equation.
//!
//! Four independent noise sources add in quadrature:
//! - **Source shot noise**: n·t
//! - **Background shot noise**: N·t·npx
//! - **Dark current shot noise**: npx·dark·t
//! - **Read noise**: npx·φ², once per readout and independent of t
//!
//! The same equation is solved for t to answer "how long for a given S/N".

use crate::errors::EtcError;

/// Signal-to-noise of a single exposure.
///
/// SN = n·t / sqrt(n·t + N·t·m + m·dark·t + m·φ²)
///
/// # Arguments
/// * `source_rate` - Source photo-electrons per second (n)
/// * `background_rate` - Background photo-electrons per second (N)
/// * `read_noise` - Read noise in electrons per pixel per read (φ)
/// * `pixels` - Number of pixels (m)
/// * `dark_current` - Dark current in electrons per pixel per second
/// * `exposure_s` - Integration time in seconds (t)
///
/// # Returns
/// The S/N. A zero-length exposure yields 0. A non-positive noise variance
/// at any other exposure yields NaN so that a bad point does not stop a sweep.
pub fn signal_to_noise(
    source_rate: f64,
    background_rate: f64,
    read_noise: f64,
    pixels: f64,
    dark_current: f64,
    exposure_s: f64,
) -> f64 {
    if exposure_s == 0.0 {
        return 0.0;
    }

    let signal = source_rate * exposure_s;
    let variance = signal
        + background_rate * exposure_s * pixels
        + pixels * dark_current * exposure_s
        + pixels * read_noise * read_noise;

    if variance <= 0.0 {
        return f64::NAN;
    }
    signal / variance.sqrt()
}

/// Integration time needed to reach `target_snr`.
///
/// Solves n²t² − SN²(n + N·m + m·dark)·t − SN²·m·φ² = 0 for its positive root.
///
/// # Errors
/// `EtcError::UnreachableSnr` when the source delivers no signal or the
/// target is not a positive finite number.
pub fn exposure_time_for_snr(
    source_rate: f64,
    background_rate: f64,
    read_noise: f64,
    pixels: f64,
    dark_current: f64,
    target_snr: f64,
) -> Result<f64, EtcError> {
    if !source_rate.is_finite()
        || source_rate <= 0.0
        || !target_snr.is_finite()
        || target_snr <= 0.0
    {
        return Err(EtcError::UnreachableSnr {
            target: target_snr,
            source_rate,
        });
    }

    let snr2 = target_snr * target_snr;
    let rate_terms = source_rate + background_rate * pixels + pixels * dark_current;
    let read_term = pixels * read_noise * read_noise;

    let a = source_rate * source_rate;
    let b = snr2 * rate_terms;
    let c = snr2 * read_term;

    Ok((b + (b * b + 4.0 * a * c).sqrt()) / (2.0 * a))
}

/// Which term dominates the noise variance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseTerm {
    Source,
    Background,
    DarkCurrent,
    ReadNoise,
}

/// Per-term breakdown of the collected signal and noise variance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseBudget {
    /// Collected source electrons
    pub signal: f64,
    /// Source shot noise variance
    pub source_variance: f64,
    /// Background shot noise variance, summed over pixels
    pub background_variance: f64,
    /// Dark current shot noise variance, summed over pixels
    pub dark_variance: f64,
    /// Read noise variance, summed over pixels
    pub read_variance: f64,
}

impl NoiseBudget {
    pub fn new(
        source_rate: f64,
        background_rate: f64,
        read_noise: f64,
        pixels: f64,
        dark_current: f64,
        exposure_s: f64,
    ) -> Self {
        let signal = source_rate * exposure_s;
        Self {
            signal,
            source_variance: signal,
            background_variance: background_rate * exposure_s * pixels,
            dark_variance: pixels * dark_current * exposure_s,
            read_variance: pixels * read_noise * read_noise,
        }
    }

    pub fn total_variance(&self) -> f64 {
        self.source_variance + self.background_variance + self.dark_variance + self.read_variance
    }

    /// S/N for this budget
    ///
    /// # Errors
    /// `EtcError::DegenerateSnr` when the total variance is not positive.
    pub fn snr(&self) -> Result<f64, EtcError> {
        let variance = self.total_variance();
        if variance.is_nan() || variance <= 0.0 {
            return Err(EtcError::DegenerateSnr(variance));
        }
        Ok(self.signal / variance.sqrt())
    }

    /// The largest single contributor to the variance
    pub fn dominant(&self) -> NoiseTerm {
        [
            (NoiseTerm::Source, self.source_variance),
            (NoiseTerm::Background, self.background_variance),
            (NoiseTerm::DarkCurrent, self.dark_variance),
            (NoiseTerm::ReadNoise, self.read_variance),
        ]
        .into_iter()
        .fold((NoiseTerm::Source, f64::NEG_INFINITY), |best, term| {
            if term.1 > best.1 {
                term
            } else {
                best
            }
        })
        .0
    }
}
