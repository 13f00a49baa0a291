//! Ideal-gas mixture with NASA7 species thermodynamics.
use super::NASAdata::NASAdata;
use super::phase::{GAS_CONSTANT, ONE_ATM, Phase, PhaseKind, ThermoPhase};
use crate::ReactorsZeroD::errors::ReactorError;
use serde::{Deserialize, Serialize};

/// one species of a bulk phase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasSpecies {
    pub name: String,
    /// kg/kmol
    pub molecular_weight: f64,
    pub thermo: NASAdata,
}

impl GasSpecies {
    pub fn new(name: &str, molecular_weight: f64, thermo: NASAdata) -> Self {
        Self {
            name: name.to_string(),
            molecular_weight,
            thermo,
        }
    }
}

/// Ideal-gas mixture. The state is `(T, P, Y)`; the saved-state buffer is laid out as
/// `[T, P, Y_0, ..., Y_{K-1}]`.
#[derive(Debug, Clone)]
pub struct IdealGasPhase {
    name: String,
    species: Vec<GasSpecies>,
    mw: Vec<f64>,
    inv_mw: Vec<f64>,
    t: f64,
    p: f64,
    y: Vec<f64>,
    /// mean molecular weight, kg/kmol
    mean_mw: f64,
}

impl IdealGasPhase {
    pub fn new(name: &str, species: Vec<GasSpecies>) -> Result<Self, ReactorError> {
        if species.is_empty() {
            return Err(ReactorError::Configuration(format!(
                "phase '{}' has no species",
                name
            )));
        }
        if let Some(bad) = species.iter().find(|s| !(s.molecular_weight > 0.0)) {
            return Err(ReactorError::Configuration(format!(
                "species '{}' has non-positive molecular weight {}",
                bad.name, bad.molecular_weight
            )));
        }
        let mw: Vec<f64> = species.iter().map(|s| s.molecular_weight).collect();
        let inv_mw = mw.iter().map(|w| 1.0 / w).collect();
        let mut y = vec![0.0; species.len()];
        y[0] = 1.0;
        let mut phase = Self {
            name: name.to_string(),
            species,
            mw,
            inv_mw,
            t: 300.0,
            p: ONE_ATM,
            y,
            mean_mw: 0.0,
        };
        phase.update_mean_mw();
        Ok(phase)
    }

    fn update_mean_mw(&mut self) {
        let sum: f64 = self
            .y
            .iter()
            .zip(&self.inv_mw)
            .map(|(y, inv)| y * inv)
            .sum();
        self.mean_mw = 1.0 / sum;
    }

    /// Sets mass fractions. Values are normalized to sum to one.
    pub fn set_mass_fractions(&mut self, y: &[f64]) -> Result<(), ReactorError> {
        if y.len() != self.species.len() {
            return Err(ReactorError::Configuration(format!(
                "expected {} mass fractions, got {}",
                self.species.len(),
                y.len()
            )));
        }
        let total: f64 = y.iter().sum();
        if !(total > 0.0) {
            return Err(ReactorError::Configuration(
                "mass fractions must have a positive sum".to_string(),
            ));
        }
        self.y = y.iter().map(|v| v / total).collect();
        self.update_mean_mw();
        Ok(())
    }

    /// Sets mole fractions by species name; unnamed species get zero.
    pub fn set_mole_fractions_by_name(&mut self, x: &[(&str, f64)]) -> Result<(), ReactorError> {
        let mut moles = vec![0.0; self.species.len()];
        for (name, value) in x {
            let k = self.species_index(name).ok_or_else(|| {
                ReactorError::Configuration(format!("unknown species '{}' in phase '{}'", name, self.name))
            })?;
            moles[k] = *value;
        }
        if !(moles.iter().sum::<f64>() > 0.0) {
            return Err(ReactorError::Configuration(
                "mole fractions must have a positive sum".to_string(),
            ));
        }
        self.set_moles_no_truncate(&moles);
        Ok(())
    }

    pub fn mean_molecular_weight(&self) -> f64 {
        self.mean_mw
    }

    pub fn species(&self) -> &[GasSpecies] {
        &self.species
    }
}

impl Phase for IdealGasPhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::IdealGas
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn n_species(&self) -> usize {
        self.species.len()
    }
    fn species_name(&self, k: usize) -> Option<&str> {
        self.species.get(k).map(|s| s.name.as_str())
    }
    fn temperature(&self) -> f64 {
        self.t
    }
    fn partial_molar_enthalpies(&self, out: &mut [f64]) {
        let rt = GAS_CONSTANT * self.t;
        for (o, s) in out.iter_mut().zip(&self.species) {
            *o = s.thermo.h_rt(self.t) * rt;
        }
    }
    fn partial_molar_cp(&self, out: &mut [f64]) {
        for (o, s) in out.iter_mut().zip(&self.species) {
            *o = s.thermo.cp_r(self.t) * GAS_CONSTANT;
        }
    }
}

impl ThermoPhase for IdealGasPhase {
    fn pressure(&self) -> f64 {
        self.p
    }
    fn density(&self) -> f64 {
        self.p * self.mean_mw / (GAS_CONSTANT * self.t)
    }
    fn molar_volume(&self) -> f64 {
        GAS_CONSTANT * self.t / self.p
    }
    fn cp_mass(&self) -> f64 {
        self.species
            .iter()
            .zip(&self.y)
            .zip(&self.inv_mw)
            .map(|((s, y), inv)| s.thermo.cp_r(self.t) * GAS_CONSTANT * y * inv)
            .sum()
    }
    fn enthalpy_mass(&self) -> f64 {
        let rt = GAS_CONSTANT * self.t;
        self.species
            .iter()
            .zip(&self.y)
            .zip(&self.inv_mw)
            .map(|((s, y), inv)| s.thermo.h_rt(self.t) * rt * y * inv)
            .sum()
    }
    fn set_state_tp(&mut self, t: f64, p: f64) {
        self.t = t;
        self.p = p;
    }
    fn set_moles_no_truncate(&mut self, moles: &[f64]) {
        let total_mass: f64 = moles.iter().zip(&self.mw).map(|(n, w)| n * w).sum();
        for (k, y) in self.y.iter_mut().enumerate() {
            *y = moles[k] * self.mw[k] / total_mass;
        }
        self.update_mean_mw();
    }
    fn save_state(&self, out: &mut Vec<f64>) {
        out.clear();
        out.push(self.t);
        out.push(self.p);
        out.extend_from_slice(&self.y);
    }
    fn restore_state(&mut self, state: &[f64]) {
        if state.len() != self.y.len() + 2 {
            return;
        }
        self.t = state[0];
        self.p = state[1];
        self.y.copy_from_slice(&state[2..]);
        self.update_mean_mw();
    }
    fn molecular_weights(&self) -> &[f64] {
        &self.mw
    }
    fn inverse_molecular_weights(&self) -> &[f64] {
        &self.inv_mw
    }
    fn mass_fractions(&self) -> &[f64] {
        &self.y
    }
    fn mole_fractions(&self, out: &mut [f64]) {
        for (k, x) in out.iter_mut().enumerate() {
            *x = self.y[k] * self.inv_mw[k] * self.mean_mw;
        }
    }
}
