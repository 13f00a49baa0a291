//! # Hybrid Jacobian
//!
//! `J = ∂(rhs/lhs)/∂y` assembled from triplets:
//!
//! 1. chemistry block `(k+sidx, j+sidx)`: `∂ω̇_k/∂C_j + ω̇_k v̂` for every entry stored by
//!    the kinetics derivative. Entries absent from that structure are dropped even though
//!    `ω̇_k v̂` is non-zero there, which keeps the matrix as sparse as the chemistry;
//!    `dense_volume_correction` adds them back.
//! 2. temperature column from a one-sided finite difference of the full residual;
//! 3. temperature row from the chemistry block and the heat capacities;
//! 4. surface blocks from the surface couplers.
use super::errors::ReactorError;
use super::reactor::IdealGasConstPressureMoleReactor;
use super::surface::EnergyCoupling;
use super::triplets::TripletList;
use crate::Thermodynamics::phase::Phase;
use log::{debug, error};
use nalgebra_sparse::CscMatrix;
use std::collections::HashSet;
use std::ops::{Deref, DerefMut};

/// Re-applies a captured state when dropped, whatever happened while it was alive.
struct StateGuard<'a> {
    reactor: &'a mut IdealGasConstPressureMoleReactor,
    saved: Vec<f64>,
}

impl<'a> StateGuard<'a> {
    fn new(reactor: &'a mut IdealGasConstPressureMoleReactor, saved: Vec<f64>) -> Self {
        Self { reactor, saved }
    }
}

impl Deref for StateGuard<'_> {
    type Target = IdealGasConstPressureMoleReactor;
    fn deref(&self) -> &Self::Target {
        self.reactor
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.reactor
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.reactor.update_state(&self.saved) {
            error!(
                "reactor '{}': failed to restore state after perturbation: {}",
                self.reactor.name, e
            );
        }
    }
}

impl IdealGasConstPressureMoleReactor {
    pub fn jacobian(&mut self) -> Result<CscMatrix<f64>, ReactorError> {
        let layout = match &self.layout {
            Some(layout) if layout.nv() > 0 => layout.clone(),
            _ => return Err(ReactorError::NotInitialized("jacobian")),
        };
        let nv = layout.nv();
        let sidx = layout.sidx();
        let nsp = layout.n_species();
        let mut trips = TripletList::new(nv, nv);

        // chemistry block, rescaled to moles at constant pressure
        let mut wdot = vec![0.0; nsp];
        let mut exact: Vec<(usize, usize, f64)> = Vec::new();
        let chemistry = self.chemistry;
        {
            let thermo = self
                .thermo
                .as_deref_mut()
                .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
            thermo.restore_state(&self.state);
            if let Some(kin) = self.kinetics.as_deref_mut().filter(|_| chemistry) {
                kin.net_production_rates(thermo, &mut wdot);
                let ddn = kin.net_production_rates_ddn(thermo);
                let molar_volume = thermo.molar_volume();
                for (k, j, value) in ddn.triplet_iter() {
                    exact.push((k, j, value + wdot[k] * molar_volume));
                }
                if self.dense_volume_correction {
                    let stored: HashSet<(usize, usize)> = exact.iter().map(|&(k, j, _)| (k, j)).collect();
                    for (k, w) in wdot.iter().enumerate().filter(|(_, w)| **w != 0.0) {
                        for j in (0..nsp).filter(|j| !stored.contains(&(k, *j))) {
                            exact.push((k, j, w * molar_volume));
                        }
                    }
                }
            }
        }
        trips.extend(exact.iter().map(|&(k, j, v)| (k + sidx, j + sidx, v)));

        let mut ncp = 0.0;
        let mut energy_terms = None;
        if self.energy {
            let mut y_current = vec![0.0; nv];
            self.get_state(&mut y_current)?;
            let delta_t = y_current[0] * self.fd_scale * f64::EPSILON.sqrt();
            let time = self.time;
            let mut lhs_perturbed = vec![1.0; nv];
            let mut rhs_perturbed = vec![0.0; nv];
            {
                let mut guard = StateGuard::new(self, y_current.clone());
                let mut y_perturbed = y_current.clone();
                y_perturbed[0] += delta_t;
                guard.update_state(&y_perturbed)?;
                guard.eval(time, &mut lhs_perturbed, &mut rhs_perturbed)?;
            }
            let mut lhs_current = vec![1.0; nv];
            let mut rhs_current = vec![0.0; nv];
            self.eval(time, &mut lhs_current, &mut rhs_current)?;
            for j in 0..nv {
                let ydot_perturbed = rhs_perturbed[j] / lhs_perturbed[j];
                let ydot_current = rhs_current[j] / lhs_current[j];
                trips.push(j, 0, (ydot_perturbed - ydot_current) / delta_t);
            }

            // temperature row
            let thermo = self
                .thermo
                .as_deref_mut()
                .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
            thermo.restore_state(&self.state);
            let mut enthalpy = vec![0.0; nsp];
            thermo.partial_molar_enthalpies(&mut enthalpy);
            let mut heat_capacity = vec![0.0; nv - sidx];
            thermo.partial_molar_cp(&mut heat_capacity[..nsp]);
            for (i, surface) in self.surfaces.iter().enumerate() {
                let range = layout.surface_range(i);
                surface
                    .thermo()
                    .partial_molar_cp(&mut heat_capacity[range.start - sidx..range.end - sidx]);
            }
            let qdot = self.volume * enthalpy.iter().zip(&wdot).map(|(h, w)| h * w).sum::<f64>();
            ncp = y_current[sidx..]
                .iter()
                .zip(&heat_capacity)
                .map(|(n, cp)| n * cp)
                .sum();
            if ncp != 0.0 {
                let denom = 1.0 / (ncp * ncp);
                let mut hk_dnkdnj_sum = vec![0.0; nsp];
                for &(k, j, v) in &exact {
                    hk_dnkdnj_sum[j] += enthalpy[k] * v;
                }
                for j in 0..nsp {
                    trips.push(
                        0,
                        j + sidx,
                        (heat_capacity[j] * qdot - ncp * hk_dnkdnj_sum[j]) * denom,
                    );
                }
            } else {
                debug!("reactor '{}': zero heat capacity, temperature row skipped", self.name);
            }
            energy_terms = Some((enthalpy, heat_capacity, qdot));
        }

        // surfaces
        let thermo = self
            .thermo
            .as_deref()
            .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
        for (i, surface) in self.surfaces.iter_mut().enumerate() {
            let coupling = energy_terms.as_ref().map(|(h, cp, qdot)| EnergyCoupling {
                ncp,
                qdot: *qdot,
                enthalpies: h,
                heat_capacities: cp,
            });
            surface.add_jacobian(
                thermo,
                self.volume,
                sidx,
                layout.surface_offset(i),
                coupling,
                &mut trips,
            );
        }
        debug!(
            "reactor '{}': Jacobian assembled from {} triplets",
            self.name,
            trips.len()
        );
        trips.assemble()
    }
}
