//! NASA 7-coefficient species thermodynamics.
//!
//! Coefficient layouts follow the library format used across the crate:
//! * 9 numbers: `[T_min, T_max, a1..a7]` (one temperature range)
//! * 17 numbers: `[T_min, T_mid, T_max, a1..a7 (low), a1..a7 (high)]`
//!
//! ```text
//! Cp/R  = a1 + a2 T + a3 T² + a4 T³ + a5 T⁴
//! H/RT  = a1 + a2 T/2 + a3 T²/3 + a4 T³/4 + a5 T⁴/5 + a6/T
//! S/R   = a1 ln T + a2 T + a3 T²/2 + a4 T³/3 + a5 T⁴/4 + a7
//! ```
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, PartialEq)]
pub enum NASAError {
    NoCoefficientsFound { temperature: f64, range: String },
    InvalidTemperatureRange,
    InvalidCoefficientCount(usize),
}

impl fmt::Display for NASAError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NASAError::NoCoefficientsFound { temperature, range } => {
                write!(
                    f,
                    "No coefficients found for temperature {} K. Valid range: {}",
                    temperature, range
                )
            }
            NASAError::InvalidTemperatureRange => {
                write!(f, "Invalid temperature range in coefficient data")
            }
            NASAError::InvalidCoefficientCount(n) => {
                write!(
                    f,
                    "NASA7 data must hold 9 or 17 numbers, got {}",
                    n
                )
            }
        }
    }
}

impl Error for NASAError {}

pub type Coeffs = [f64; 7];

fn cp_r(t: f64, a: &Coeffs) -> f64 {
    a[0] + a[1] * t + a[2] * t.powi(2) + a[3] * t.powi(3) + a[4] * t.powi(4)
}
fn h_rt(t: f64, a: &Coeffs) -> f64 {
    a[0] + a[1] * t / 2.0
        + a[2] * t.powi(2) / 3.0
        + a[3] * t.powi(3) / 4.0
        + a[4] * t.powi(4) / 5.0
        + a[5] / t
}
fn s_r(t: f64, a: &Coeffs) -> f64 {
    a[0] * t.ln() + a[1] * t + a[2] * t.powi(2) / 2.0 + a[3] * t.powi(3) / 3.0 + a[4] * t.powi(4) / 4.0
        + a[6]
}

/// raw library record
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NASAinput {
    #[serde(rename = "Cp")]
    pub cp: Vec<f64>,
}

/// Parsed NASA7 polynomial for one species.
///
/// Evaluation outside the declared range uses the nearest range instead of failing:
/// the reactor perturbs temperature for finite differences and must not be stopped
/// by a state a few micro-kelvin past the fitted interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NASAinput", into = "NASAinput")]
pub struct NASAdata {
    t_min: f64,
    t_mid: f64,
    t_max: f64,
    low: Coeffs,
    high: Coeffs,
}

impl TryFrom<NASAinput> for NASAdata {
    type Error = NASAError;
    fn try_from(input: NASAinput) -> Result<Self, Self::Error> {
        NASAdata::from_coefficients(&input.cp)
    }
}

impl From<NASAdata> for NASAinput {
    fn from(data: NASAdata) -> Self {
        let mut cp = Vec::with_capacity(17);
        if data.low == data.high && data.t_mid == data.t_max {
            cp.extend([data.t_min, data.t_max]);
            cp.extend(data.low);
        } else {
            cp.extend([data.t_min, data.t_mid, data.t_max]);
            cp.extend(data.low);
            cp.extend(data.high);
        }
        NASAinput { cp }
    }
}

impl NASAdata {
    /// parse a flat coefficient record (9 or 17 numbers)
    pub fn from_coefficients(c_data: &[f64]) -> Result<Self, NASAError> {
        let take = |slice: &[f64]| -> Coeffs {
            let mut a = [0.0; 7];
            a.copy_from_slice(slice);
            a
        };
        let data = match c_data.len() {
            9 => {
                let a = take(&c_data[2..9]);
                NASAdata {
                    t_min: c_data[0],
                    t_mid: c_data[1],
                    t_max: c_data[1],
                    low: a,
                    high: a,
                }
            }
            17 => NASAdata {
                t_min: c_data[0],
                t_mid: c_data[1],
                t_max: c_data[2],
                low: take(&c_data[3..10]),
                high: take(&c_data[10..17]),
            },
            n => return Err(NASAError::InvalidCoefficientCount(n)),
        };
        if !(data.t_min < data.t_mid && data.t_mid <= data.t_max) {
            return Err(NASAError::InvalidTemperatureRange);
        }
        Ok(data)
    }

    /// Species with constant heat capacity `cp` (J/(kmol·K)) and enthalpy `h_ref`
    /// (J/kmol) at `t_ref`. Handy for model problems.
    pub fn constant_cp(cp: f64, h_ref: f64, t_ref: f64) -> Self {
        let r = super::phase::GAS_CONSTANT;
        let a1 = cp / r;
        let a6 = h_ref / r - a1 * t_ref;
        let a = [a1, 0.0, 0.0, 0.0, 0.0, a6, 0.0];
        NASAdata {
            t_min: 1.0,
            t_mid: 10000.0,
            t_max: 10000.0,
            low: a,
            high: a,
        }
    }

    /// strict lookup of the coefficient set covering `t`
    pub fn coefficients_at(&self, t: f64) -> Result<&Coeffs, NASAError> {
        if self.t_min <= t && t <= self.t_mid {
            Ok(&self.low)
        } else if self.t_mid < t && t <= self.t_max {
            Ok(&self.high)
        } else {
            Err(NASAError::NoCoefficientsFound {
                temperature: t,
                range: format!("{} - {} - {}", self.t_min, self.t_mid, self.t_max),
            })
        }
    }

    fn coeffs(&self, t: f64) -> &Coeffs {
        if t <= self.t_mid { &self.low } else { &self.high }
    }

    pub fn temperature_range(&self) -> (f64, f64) {
        (self.t_min, self.t_max)
    }

    /// dimensionless heat capacity Cp/R
    pub fn cp_r(&self, t: f64) -> f64 {
        cp_r(t, self.coeffs(t))
    }
    /// dimensionless enthalpy H/RT
    pub fn h_rt(&self, t: f64) -> f64 {
        h_rt(t, self.coeffs(t))
    }
    /// dimensionless entropy S/R
    pub fn s_r(&self, t: f64) -> f64 {
        s_r(t, self.coeffs(t))
    }
}
