//! Numerical helpers shared by the sweep and reporting code

pub mod misc;

pub use misc::{interp, linspace, InterpError};
