use crate::Thermodynamics::NASAdata::NASAError;
use thiserror::Error;

/// Failures raised by the reactor core and its reference collaborators.
///
/// Slightly negative moles and vanishing heat capacity are not errors; the integrator's
/// error control handles them.
#[derive(Debug, Error)]
pub enum ReactorError {
    /// invalid setup, e.g. a phase without species or a mismatched buffer
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("incompatible phase type '{found}' provided, expected '{expected}'")]
    IncompatiblePhase { expected: String, found: String },
    /// an operation was called before `initialize`
    #[error("{0}: reactor must be initialized first")]
    NotInitialized(&'static str),
    #[error("index {index} is out of bounds (size {size})")]
    OutOfRange { index: usize, size: usize },
    #[error("thermodynamic data error: {0}")]
    Thermo(#[from] NASAError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings could not be (de)serialized: {0}")]
    Serde(#[from] serde_json::Error),
}
