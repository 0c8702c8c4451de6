//! Grid construction and interpolation helpers.
//!
//! - **linspace**: evenly spaced samples, endpoints included
//! - **interp**: 1D linear interpolation over strictly monotonic data, in
//!   either direction. S/N curves fall with magnitude, so inverting one
//!   (magnitude as a function of S/N) means interpolating over a
//!   descending abscissa.

use thiserror::Error;

/// Errors that can occur during interpolation operations.
#[derive(Error, Debug)]
pub enum InterpError {
    #[error("Value {0} is out of bounds for interpolation range [{1}, {2}]")]
    OutOfBounds(f64, f64, f64),
    #[error("Input vectors must have at least 2 points")]
    InsufficientData,
    #[error("Input vectors must have the same length")]
    MismatchedLengths,
    #[error("X values must be strictly monotonic")]
    NotMonotonic,
}

/// Evenly spaced values over `[start, stop]`, both endpoints included.
///
/// # Examples
///
/// ```rust
/// use calculator::algo::misc::linspace;
///
/// let mags = linspace(6.0, 20.0, 8);
/// assert_eq!(mags.len(), 8);
/// assert_eq!(mags[0], 6.0);
/// assert_eq!(mags[7], 20.0);
/// assert_eq!(mags[1], 8.0);
/// ```
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            // Pin the last sample so accumulated rounding never overshoots
            values[n - 1] = stop;
            values
        }
    }
}

/// Linear interpolation over strictly monotonic `xs`.
///
/// `xs` may be ascending or descending; the direction is taken from the
/// first two samples and every later pair must follow it.
///
/// # Examples
///
/// ```rust
/// use calculator::algo::misc::interp;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // A falling S/N curve: magnitude as a function of S/N
/// let snr = vec![100.0, 50.0, 10.0];
/// let mags = vec![10.0, 12.0, 14.0];
///
/// assert_eq!(interp(30.0, &snr, &mags)?, 13.0);
/// assert_eq!(interp(50.0, &snr, &mags)?, 12.0);
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// * `InterpError::OutOfBounds` - x is outside the range spanned by `xs` (or NaN)
/// * `InterpError::InsufficientData` - Less than 2 data points provided
/// * `InterpError::MismatchedLengths` - xs and ys have different lengths
/// * `InterpError::NotMonotonic` - xs is not strictly monotonic
pub fn interp(x: f64, xs: &[f64], ys: &[f64]) -> Result<f64, InterpError> {
    if xs.len() != ys.len() {
        return Err(InterpError::MismatchedLengths);
    }

    if xs.len() < 2 {
        return Err(InterpError::InsufficientData);
    }

    let ascending = xs[1] > xs[0];
    let monotonic = xs.windows(2).all(|pair| {
        if ascending {
            pair[1] > pair[0]
        } else {
            pair[1] < pair[0]
        }
    });
    if !monotonic {
        return Err(InterpError::NotMonotonic);
    }

    let (lo, hi) = if ascending {
        (xs[0], xs[xs.len() - 1])
    } else {
        (xs[xs.len() - 1], xs[0])
    };

    if !x.is_finite() || x < lo || x > hi {
        return Err(InterpError::OutOfBounds(x, lo, hi));
    }

    // First index at or past x in the direction of travel
    let idx = xs.partition_point(|&probe| if ascending { probe < x } else { probe > x });
    if xs[idx] == x {
        return Ok(ys[idx]);
    }

    let (x1, x2) = (xs[idx - 1], xs[idx]);
    let (y1, y2) = (ys[idx - 1], ys[idx]);

    let t = (x - x1) / (x2 - x1);
    Ok(y1 + t * (y2 - y1))
}
