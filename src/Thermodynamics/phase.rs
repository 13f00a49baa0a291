//! # Phase traits
//!
//! The reactor never owns a concrete equation of state. It talks to the bulk gas through
//! [`ThermoPhase`] and to attached surfaces through the smaller [`Phase`] trait, so any
//! property evaluator implementing these traits can be plugged in.
//!
//! All quantities are SI with kmol as the amount unit (J/kmol, kg/kmol, m³/kmol).
use std::fmt;

/// Universal gas constant, J/(kmol·K)
pub const GAS_CONSTANT: f64 = 8314.462618;
/// One standard atmosphere, Pa
pub const ONE_ATM: f64 = 101325.0;

/// kind of equation of state behind a phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    IdealGas,
    Surface,
    /// any other equation of state provided by a caller
    Other(&'static str),
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhaseKind::IdealGas => write!(f, "ideal-gas"),
            PhaseKind::Surface => write!(f, "surface"),
            PhaseKind::Other(name) => write!(f, "{}", name),
        }
    }
}

/// Species bookkeeping and the per-species properties shared by bulk and surface phases.
pub trait Phase: fmt::Debug {
    fn kind(&self) -> PhaseKind;
    fn name(&self) -> &str;
    fn n_species(&self) -> usize;
    fn species_name(&self, k: usize) -> Option<&str>;
    fn species_index(&self, name: &str) -> Option<usize> {
        (0..self.n_species()).find(|&k| self.species_name(k) == Some(name))
    }
    fn temperature(&self) -> f64;
    /// partial molar enthalpies, J/kmol
    fn partial_molar_enthalpies(&self, out: &mut [f64]);
    /// partial molar heat capacities at constant pressure, J/(kmol·K)
    fn partial_molar_cp(&self, out: &mut [f64]);
}

/// Equation-of-state evaluator for the bulk phase of a reactor.
///
/// `save_state`/`restore_state` form the cache the reactor relies on: after
/// `set_moles_no_truncate` + `set_state_tp` the reactor saves the state once, and every
/// later property query is preceded by a `restore_state` of that buffer.
pub trait ThermoPhase: Phase {
    fn pressure(&self) -> f64;
    /// kg/m³
    fn density(&self) -> f64;
    /// m³/kmol
    fn molar_volume(&self) -> f64;
    /// J/(kg·K)
    fn cp_mass(&self) -> f64;
    /// J/kg
    fn enthalpy_mass(&self) -> f64;
    fn set_state_tp(&mut self, t: f64, p: f64);
    /// Sets the composition from mole numbers without clipping negative entries.
    fn set_moles_no_truncate(&mut self, moles: &[f64]);
    fn save_state(&self, out: &mut Vec<f64>);
    fn restore_state(&mut self, state: &[f64]);
    /// kg/kmol
    fn molecular_weights(&self) -> &[f64];
    fn inverse_molecular_weights(&self) -> &[f64];
    fn mass_fractions(&self) -> &[f64];
    fn mole_fractions(&self, out: &mut [f64]);
    /// molar concentrations, kmol/m³
    fn concentrations(&self, out: &mut [f64]) {
        self.mole_fractions(out);
        let molar_density = 1.0 / self.molar_volume();
        for c in out.iter_mut() {
            *c *= molar_density;
        }
    }
}
