//! # Surfaces attached to a reactor
//!
//! Surface species enter the reactor state as mole numbers
//! `n_k = θ_k Γ A / size_k`. The coupler converts between moles and coverages, writes
//! the surface equations `dn_k/dt = ṡ_k A` and hands the bulk-species production back to
//! the reactor.
use super::errors::ReactorError;
use super::triplets::TripletList;
use crate::Kinetics::kinetics_api::SurfaceKinetics;
use crate::Thermodynamics::phase::{Phase, ThermoPhase};
use crate::Thermodynamics::surface_phase::SurfacePhase;
use log::info;

/// Quantities of the temperature row the surface terms couple into.
#[derive(Debug, Clone, Copy)]
pub struct EnergyCoupling<'a> {
    /// `Σ_i n_i c_p,i` over bulk and surface species, J/K
    pub ncp: f64,
    /// gas-phase heat release `V Σ_k h_k ω̇_k`, W
    pub qdot: f64,
    /// partial molar enthalpies of the bulk species
    pub enthalpies: &'a [f64],
    /// partial molar heat capacities of every state species after the temperature
    pub heat_capacities: &'a [f64],
}

#[derive(Debug)]
pub struct ReactorSurface {
    thermo: SurfacePhase,
    kinetics: Option<Box<dyn SurfaceKinetics>>,
    /// m²
    area: f64,
    work: Vec<f64>,
}

impl ReactorSurface {
    pub fn new(thermo: SurfacePhase, area: f64) -> Result<Self, ReactorError> {
        if !(area > 0.0) {
            return Err(ReactorError::Configuration(format!(
                "surface '{}' needs a positive area, got {}",
                thermo.name(),
                area
            )));
        }
        Ok(Self {
            thermo,
            kinetics: None,
            area,
            work: Vec::new(),
        })
    }

    pub fn set_kinetics(&mut self, kinetics: Box<dyn SurfaceKinetics>) -> Result<(), ReactorError> {
        if kinetics.n_surface_species() != self.thermo.n_species() {
            return Err(ReactorError::Configuration(format!(
                "surface kinetics expects {} surface species, '{}' has {}",
                kinetics.n_surface_species(),
                self.thermo.name(),
                self.thermo.n_species()
            )));
        }
        info!(
            "surface '{}': kinetics attached over {} species",
            self.thermo.name(),
            kinetics.n_total_species()
        );
        self.work = vec![0.0; kinetics.n_total_species()];
        self.kinetics = Some(kinetics);
        Ok(())
    }

    pub fn with_kinetics(mut self, kinetics: Box<dyn SurfaceKinetics>) -> Result<Self, ReactorError> {
        self.set_kinetics(kinetics)?;
        Ok(self)
    }

    pub fn thermo(&self) -> &SurfacePhase {
        &self.thermo
    }
    pub fn area(&self) -> f64 {
        self.area
    }
    pub fn set_area(&mut self, area: f64) {
        self.area = area;
    }
    pub fn n_species(&self) -> usize {
        self.thermo.n_species()
    }

    /// Surfaces carry no time-dependent behavior; kept for symmetry with flow devices.
    pub fn update(&mut self, _time: f64) {}

    /// checks the kinetics gas species count against the reactor's bulk phase
    pub(crate) fn check_gas(&self, n_gas: usize) -> Result<(), ReactorError> {
        match &self.kinetics {
            Some(kin) if kin.n_gas_species() != n_gas => Err(ReactorError::Configuration(format!(
                "surface kinetics on '{}' expects {} gas species, reactor has {}",
                self.thermo.name(),
                kin.n_gas_species(),
                n_gas
            ))),
            _ => Ok(()),
        }
    }

    /// moles of the surface species, kmol
    pub fn get_moles(&self, out: &mut [f64]) {
        let sites = self.thermo.site_density() * self.area;
        for (k, (n, theta)) in out.iter_mut().zip(self.thermo.coverages()).enumerate() {
            *n = theta * sites / self.thermo.size(k);
        }
    }

    /// sets coverages from mole numbers without normalizing
    pub fn set_moles(&mut self, moles: &[f64]) {
        let sites = self.thermo.site_density() * self.area;
        let theta: Vec<f64> = moles
            .iter()
            .enumerate()
            .map(|(k, n)| n * self.thermo.size(k) / sites)
            .collect();
        self.thermo.set_coverages_no_norm(&theta);
    }

    pub(crate) fn sync_temperature(&mut self, t: f64) {
        self.thermo.set_temperature(t);
    }

    /// Writes `lhs = 1`, `rhs = ṡ A` for this surface's species and adds the bulk
    /// production `ṡ_k A` (kmol/s) into `sdot`.
    pub fn eval(&mut self, gas: &dyn ThermoPhase, lhs: &mut [f64], rhs: &mut [f64], sdot: &mut [f64]) {
        self.sync_temperature(gas.temperature());
        lhs.iter_mut().for_each(|l| *l = 1.0);
        let Some(kin) = self.kinetics.as_deref_mut() else {
            rhs.iter_mut().for_each(|r| *r = 0.0);
            return;
        };
        let n_gas = kin.n_gas_species();
        kin.net_production_rates(gas, &self.thermo, &mut self.work);
        for (r, s) in rhs.iter_mut().zip(&self.work[n_gas..]) {
            *r = s * self.area;
        }
        for (out, s) in sdot.iter_mut().zip(&self.work[..n_gas]) {
            *out += s * self.area;
        }
    }

    /// Maps `∂ṡ/∂C` into state offsets. Gas rows go to `sidx + k`, surface rows to
    /// `offset + k`; gas columns are scaled by `A/V`, surface columns by `1`.
    pub fn add_jacobian(
        &mut self,
        gas: &dyn ThermoPhase,
        volume: f64,
        sidx: usize,
        offset: usize,
        energy: Option<EnergyCoupling>,
        trips: &mut TripletList,
    ) {
        self.sync_temperature(gas.temperature());
        let Some(kin) = self.kinetics.as_deref_mut() else {
            return;
        };
        let n_gas = kin.n_gas_species();
        let ddc = kin.net_production_rates_ddc(gas, &self.thermo);
        let state_index = |i: usize| if i < n_gas { sidx + i } else { offset + i - n_gas };
        // Σ_r h_r J_rc over gas rows, per column
        let mut heat_sums = vec![0.0; n_gas + self.thermo.n_species()];
        for (row, col, value) in ddc.triplet_iter() {
            let scale = if col < n_gas { self.area / volume } else { 1.0 };
            let v = scale * value;
            trips.push(state_index(row), state_index(col), v);
            if let Some(e) = &energy {
                if row < n_gas {
                    heat_sums[col] += e.enthalpies[row] * v;
                }
            }
        }
        let Some(e) = energy else {
            return;
        };
        if e.ncp == 0.0 {
            return;
        }
        kin.net_production_rates(gas, &self.thermo, &mut self.work);
        let qdot_surface: f64 = self.work[..n_gas]
            .iter()
            .zip(e.enthalpies)
            .map(|(s, h)| s * self.area * h)
            .sum();
        let denom = 1.0 / (e.ncp * e.ncp);
        for (c, sum) in heat_sums.iter().enumerate() {
            let col = state_index(c);
            let cp = e.heat_capacities[col - sidx];
            let mut value = -sum / e.ncp + cp * qdot_surface * denom;
            if c >= n_gas {
                value += cp * e.qdot * denom;
            }
            trips.push(0, col, value);
        }
    }
}

///////////////////////////TESTING////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thermodynamics::NASAdata::NASAdata;
    use crate::Thermodynamics::surface_phase::SurfaceSpecies;
    use approx::assert_relative_eq;

    fn surface() -> ReactorSurface {
        let th = NASAdata::constant_cp(0.0, 0.0, 298.15);
        let mut phase = SurfacePhase::new(
            "surf",
            vec![SurfaceSpecies::new("S", 1.0, th.clone()), SurfaceSpecies::new("O2(S)", 2.0, th)],
            2.0e-8,
        )
        .unwrap();
        phase.set_coverages(&[0.6, 0.4]).unwrap();
        ReactorSurface::new(phase, 0.5).unwrap()
    }

    #[test]
    fn test_moles_coverages_round_trip() {
        let mut s = surface();
        let mut n = [0.0; 2];
        s.get_moles(&mut n);
        assert_relative_eq!(n[0], 0.6 * 2.0e-8 * 0.5);
        assert_relative_eq!(n[1], 0.4 * 2.0e-8 * 0.5 / 2.0);
        s.set_moles(&n);
        assert_relative_eq!(s.thermo().coverages()[1], 0.4, max_relative = 1e-12);
    }

    #[test]
    fn test_no_kinetics_gives_zero_rates() {
        use crate::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
        let gas = IdealGasPhase::new(
            "gas",
            vec![GasSpecies::new("A", 2.0, NASAdata::constant_cp(29000.0, 0.0, 298.15))],
        )
        .unwrap();
        let mut s = surface();
        let mut lhs = [0.0; 2];
        let mut rhs = [7.0; 2];
        let mut sdot = [0.0; 1];
        s.eval(&gas, &mut lhs, &mut rhs, &mut sdot);
        assert_eq!(lhs, [1.0, 1.0]);
        assert_eq!(rhs, [0.0, 0.0]);
        assert_eq!(sdot, [0.0]);
    }

    #[test]
    fn test_bad_area() {
        let th = NASAdata::constant_cp(0.0, 0.0, 298.15);
        let phase = SurfacePhase::new("surf", vec![SurfaceSpecies::new("S", 1.0, th)], 1e-8).unwrap();
        assert!(ReactorSurface::new(phase, 0.0).is_err());
    }
}
