//! Sweep output curves.

use crate::algo::misc::{interp, InterpError};
use crate::errors::EtcError;
use crate::units::{Time, TimeExt};

/// S/N against magnitude for one exposure bucket
#[derive(Debug, Clone)]
pub struct SnCurve {
    /// Integration time of this bucket
    pub exposure: Time,
    /// Magnitudes, in grid order
    pub magnitudes: Vec<f64>,
    /// S/N at each magnitude
    pub snr: Vec<f64>,
}

impl SnCurve {
    /// Short column name, e.g. `sn10` for the ten minute bucket
    pub fn name(&self) -> String {
        let minutes = self.exposure.as_minutes();
        if minutes.fract() == 0.0 {
            format!("sn{}", minutes as u64)
        } else {
            format!("sn{minutes:.1}")
        }
    }

    /// Human readable label, e.g. `t = 10 min`
    pub fn label(&self) -> String {
        let minutes = self.exposure.as_minutes();
        if minutes.fract() == 0.0 {
            format!("t = {} min", minutes as u64)
        } else {
            format!("t = {minutes:.1} min")
        }
    }

    /// (magnitude, S/N) pairs in grid order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.magnitudes.iter().copied().zip(self.snr.iter().copied())
    }

    /// Faintest magnitude reaching `target_snr` in this exposure.
    ///
    /// Returns `Ok(None)` when the target is outside the S/N range the curve
    /// spans, or when the curve cannot be inverted (fewer than two points,
    /// flat or undefined S/N such as a zero-length bucket).
    pub fn limiting_magnitude(&self, target_snr: f64) -> Result<Option<f64>, EtcError> {
        match interp(target_snr, &self.snr, &self.magnitudes) {
            Ok(magnitude) => Ok(Some(magnitude)),
            Err(
                InterpError::OutOfBounds(..)
                | InterpError::InsufficientData
                | InterpError::NotMonotonic,
            ) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// S/N against integration time for one fixed magnitude
#[derive(Debug, Clone)]
pub struct TimeCurve {
    /// Source magnitude held fixed across the curve
    pub magnitude: f64,
    /// Sample times in seconds
    pub times_s: Vec<f64>,
    /// S/N at each sample time
    pub snr: Vec<f64>,
}

impl TimeCurve {
    /// (seconds, S/N) pairs in time order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times_s.iter().copied().zip(self.snr.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn curve(minutes: f64) -> SnCurve {
        SnCurve {
            exposure: Time::from_minutes(minutes),
            magnitudes: vec![10.0, 12.0, 14.0, 16.0],
            snr: vec![200.0, 80.0, 20.0, 4.0],
        }
    }

    #[test]
    fn test_names_and_labels() {
        assert_eq!(curve(10.0).name(), "sn10");
        assert_eq!(curve(60.0).label(), "t = 60 min");
        assert_eq!(curve(7.5).name(), "sn7.5");
        assert_eq!(curve(7.5).label(), "t = 7.5 min");
    }

    #[test]
    fn test_limiting_magnitude() {
        let c = curve(10.0);
        assert_relative_eq!(c.limiting_magnitude(50.0).unwrap().unwrap(), 13.0, epsilon = 1e-12);
        assert_relative_eq!(c.limiting_magnitude(20.0).unwrap().unwrap(), 14.0, epsilon = 1e-12);
        assert_eq!(c.limiting_magnitude(1000.0).unwrap(), None);
        assert_eq!(c.limiting_magnitude(1.0).unwrap(), None);
    }

    #[test]
    fn test_limiting_magnitude_skips_nan_curves() {
        let mut c = curve(10.0);
        c.snr[1] = f64::NAN;
        assert_eq!(c.limiting_magnitude(50.0).unwrap(), None);
    }

    #[test]
    fn test_limiting_magnitude_of_single_point_curve() {
        let c = SnCurve {
            exposure: Time::from_minutes(10.0),
            magnitudes: vec![12.0],
            snr: vec![40.0],
        };
        assert_eq!(c.limiting_magnitude(10.0).unwrap(), None);
    }

    #[test]
    fn test_limiting_magnitude_of_zero_exposure_curve() {
        let mut c = curve(0.0);
        c.snr = vec![0.0; 4];
        assert_eq!(c.limiting_magnitude(10.0).unwrap(), None);
    }

    #[test]
    fn test_limiting_magnitude_mismatched_curve_is_an_error() {
        let mut c = curve(10.0);
        c.snr.pop();
        assert!(matches!(
            c.limiting_magnitude(50.0),
            Err(EtcError::Interp(InterpError::MismatchedLengths))
        ));
    }

    #[test]
    fn test_points_zip() {
        let pairs: Vec<(f64, f64)> = curve(10.0).points().collect();
        assert_eq!(pairs[0], (10.0, 200.0));
        assert_eq!(pairs.len(), 4);
    }
}
