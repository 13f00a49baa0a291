//! Small phases, kinetics and reactors shared by the reactor tests.
use super::reactor::IdealGasConstPressureMoleReactor;
use crate::Kinetics::kinetics_api::Kinetics;
use crate::Thermodynamics::NASAdata::NASAdata;
use crate::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
use crate::Thermodynamics::phase::{ONE_ATM, Phase, PhaseKind, ThermoPhase};
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// ideal gas of constant-cp species `(name, molecular weight, cp J/kmol/K, h at 298.15 K)`
pub fn gas(species: &[(&str, f64, f64, f64)]) -> IdealGasPhase {
    let species = species
        .iter()
        .map(|(name, mw, cp, h)| GasSpecies::new(name, *mw, NASAdata::constant_cp(*cp, *h, 298.15)))
        .collect();
    IdealGasPhase::new("gas", species).unwrap()
}

pub fn two_species_gas() -> IdealGasPhase {
    let mut g = gas(&[("A", 2.0, 29000.0, 0.0), ("B", 4.0, 31000.0, -2.0e7)]);
    g.set_moles_no_truncate(&[1.0, 1.0]);
    g.set_state_tp(1000.0, ONE_ATM);
    g
}

pub fn reactor_with(thermo: IdealGasPhase) -> IdealGasConstPressureMoleReactor {
    let mut r = IdealGasConstPressureMoleReactor::new("test");
    r.set_thermo(Box::new(thermo)).unwrap();
    r
}

/// Kinetics returning fixed production rates and derivative matrix.
#[derive(Debug, Clone)]
pub struct FixedRates {
    pub rates: Vec<f64>,
    pub ddn: Vec<(usize, usize, f64)>,
}

impl FixedRates {
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates, ddn: Vec::new() }
    }
}

impl Kinetics for FixedRates {
    fn n_species(&self) -> usize {
        self.rates.len()
    }
    fn n_reactions(&self) -> usize {
        0
    }
    fn net_production_rates(&mut self, _thermo: &dyn ThermoPhase, out: &mut [f64]) {
        out.copy_from_slice(&self.rates);
    }
    fn net_production_rates_ddn(&mut self, _thermo: &dyn ThermoPhase) -> CscMatrix<f64> {
        let n = self.rates.len();
        let mut coo = CooMatrix::new(n, n);
        for &(i, j, v) in &self.ddn {
            coo.push(i, j, v);
        }
        CscMatrix::from(&coo)
    }
}

/// Ideal gas reporting an arbitrary kind and optionally hiding its species.
#[derive(Debug, Clone)]
pub struct DisguisedPhase {
    pub inner: IdealGasPhase,
    pub kind: PhaseKind,
    pub hide_species: bool,
}

impl Phase for DisguisedPhase {
    fn kind(&self) -> PhaseKind {
        self.kind
    }
    fn name(&self) -> &str {
        self.inner.name()
    }
    fn n_species(&self) -> usize {
        if self.hide_species { 0 } else { self.inner.n_species() }
    }
    fn species_name(&self, k: usize) -> Option<&str> {
        self.inner.species_name(k)
    }
    fn temperature(&self) -> f64 {
        self.inner.temperature()
    }
    fn partial_molar_enthalpies(&self, out: &mut [f64]) {
        self.inner.partial_molar_enthalpies(out)
    }
    fn partial_molar_cp(&self, out: &mut [f64]) {
        self.inner.partial_molar_cp(out)
    }
}

impl ThermoPhase for DisguisedPhase {
    fn pressure(&self) -> f64 {
        self.inner.pressure()
    }
    fn density(&self) -> f64 {
        self.inner.density()
    }
    fn molar_volume(&self) -> f64 {
        self.inner.molar_volume()
    }
    fn cp_mass(&self) -> f64 {
        self.inner.cp_mass()
    }
    fn enthalpy_mass(&self) -> f64 {
        self.inner.enthalpy_mass()
    }
    fn set_state_tp(&mut self, t: f64, p: f64) {
        self.inner.set_state_tp(t, p)
    }
    fn set_moles_no_truncate(&mut self, moles: &[f64]) {
        self.inner.set_moles_no_truncate(moles)
    }
    fn save_state(&self, out: &mut Vec<f64>) {
        self.inner.save_state(out)
    }
    fn restore_state(&mut self, state: &[f64]) {
        self.inner.restore_state(state)
    }
    fn molecular_weights(&self) -> &[f64] {
        self.inner.molecular_weights()
    }
    fn inverse_molecular_weights(&self) -> &[f64] {
        self.inner.inverse_molecular_weights()
    }
    fn mass_fractions(&self) -> &[f64] {
        self.inner.mass_fractions()
    }
    fn mole_fractions(&self, out: &mut [f64]) {
        self.inner.mole_fractions(out)
    }
}
