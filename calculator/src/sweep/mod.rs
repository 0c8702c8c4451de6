//! Parameter sweeps over magnitude and integration time

pub mod curve;
pub mod engine;
pub mod grid;

pub use curve::{SnCurve, TimeCurve};
pub use engine::{PhotonRates, SweepEngine, SweepResult};
pub use grid::{default_exposures, ObservationGrid, DEFAULT_EXPOSURES_MINUTES};
