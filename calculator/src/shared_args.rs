use crate::config::ObservationConfig;
use crate::photometry::AirmassSpec;
use clap::Args;
use std::time::Duration;

/// Parse duration string with units (e.g., "10m", "1.5h", "90s", "500ms")
fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();

    // Extract numeric part and unit
    let (num_str, unit) = if let Some(num) = s.strip_suffix("ms") {
        (num, "ms")
    } else if let Some(num) = s.strip_suffix('s') {
        (num, "s")
    } else if let Some(num) = s.strip_suffix('h') {
        (num, "h")
    } else if let Some(num) = s.strip_suffix('m') {
        (num, "m")
    } else {
        // Bucket lengths default to minutes
        (s, "m")
    };

    let value: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid numeric value: {}", num_str))?;

    if !value.is_finite() {
        return Err("Duration must be finite".to_string());
    }
    if value < 0.0 {
        return Err("Duration cannot be negative".to_string());
    }

    let duration = match unit {
        "ms" => Duration::from_secs_f64(value / 1000.0),
        "s" => Duration::from_secs_f64(value),
        "m" => Duration::from_secs_f64(value * 60.0),
        "h" => Duration::from_secs_f64(value * 3600.0),
        _ => return Err(format!("Unknown time unit: {}", unit)),
    };

    Ok(duration)
}

/// Wrapper for Duration that parses from the command line and has a nice Display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationArg(pub Duration);

impl DurationArg {
    pub fn as_minutes(&self) -> f64 {
        self.0.as_secs_f64() / 60.0
    }
}

impl std::str::FromStr for DurationArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_duration(s).map(DurationArg)
    }
}

impl std::fmt::Display for DurationArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.0.as_secs_f64();

        if secs >= 60.0 && secs % 60.0 == 0.0 {
            write!(f, "{}m", secs / 60.0)
        } else if secs >= 1.0 {
            write!(f, "{:.3}s", secs)
        } else {
            write!(f, "{}ms", self.0.as_millis())
        }
    }
}

/// Observation overrides shared by the calculator binaries
///
/// Every field is optional; anything left unset keeps the value from the
/// configuration file (or the built-in defaults).
#[derive(Args, Debug, Clone, Default)]
pub struct SweepArgs {
    /// Airmass of the observation
    #[arg(long, conflicts_with = "zenith_angle")]
    pub airmass: Option<f64>,

    /// Zenith angle in degrees, converted to airmass
    #[arg(long)]
    pub zenith_angle: Option<f64>,

    /// Brightest magnitude of the sweep
    #[arg(long)]
    pub mag_min: Option<f64>,

    /// Faintest magnitude of the sweep
    #[arg(long)]
    pub mag_max: Option<f64>,

    /// Number of magnitude samples
    #[arg(long)]
    pub points: Option<usize>,

    /// Exposure buckets, comma separated (e.g., "10m,30m,1h")
    #[arg(long, value_delimiter = ',')]
    pub exposures: Option<Vec<DurationArg>>,

    /// Magnitude followed by the S/N-vs-time curve
    #[arg(long)]
    pub fixed_magnitude: Option<f64>,
}

impl SweepArgs {
    /// Apply the overrides on top of an observation configuration
    pub fn apply(&self, observation: &mut ObservationConfig) {
        if let Some(airmass) = self.airmass {
            observation.airmass = AirmassSpec::Direct { airmass };
        }
        if let Some(degrees) = self.zenith_angle {
            observation.airmass = AirmassSpec::ZenithAngle { degrees };
        }
        if let Some(min) = self.mag_min {
            observation.magnitude_min = min;
        }
        if let Some(max) = self.mag_max {
            observation.magnitude_max = max;
        }
        if let Some(points) = self.points {
            observation.magnitude_points = points;
        }
        if let Some(exposures) = &self.exposures {
            observation.exposures_minutes = exposures.iter().map(|e| e.as_minutes()).collect();
        }
        if let Some(mag) = self.fixed_magnitude {
            observation.fixed_magnitude = mag;
        }
    }
}
