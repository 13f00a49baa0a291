//! # Kinetics interfaces used by the reactor
//!
//! The reactor only needs production rates and their concentration derivatives. Any
//! chemistry evaluator implementing these traits can be attached.
use crate::Thermodynamics::phase::ThermoPhase;
use crate::Thermodynamics::surface_phase::SurfacePhase;
use nalgebra_sparse::CscMatrix;
use std::fmt;

/// Homogeneous (bulk-phase) chemistry.
pub trait Kinetics: fmt::Debug {
    /// number of species, equal to the number of species of the bulk phase
    fn n_species(&self) -> usize;
    fn n_reactions(&self) -> usize;
    /// Net molar production rates `ω̇_k`, kmol/(m³·s), at the current state of `thermo`.
    fn net_production_rates(&mut self, thermo: &dyn ThermoPhase, out: &mut [f64]);
    /// `∂ω̇_k/∂C_j` (1/s) at fixed volume and rate constants, `n_species × n_species`.
    /// Structural zeros are absent from the matrix; stored entries may be numerically zero.
    fn net_production_rates_ddn(&mut self, thermo: &dyn ThermoPhase) -> CscMatrix<f64>;
}

/// Heterogeneous chemistry on a surface. Species are indexed over the combined list
/// `[gas species..., surface species...]`.
pub trait SurfaceKinetics: fmt::Debug {
    fn n_gas_species(&self) -> usize;
    fn n_surface_species(&self) -> usize;
    fn n_total_species(&self) -> usize {
        self.n_gas_species() + self.n_surface_species()
    }
    /// Net production rates per unit area, kmol/(m²·s), over the combined species list.
    fn net_production_rates(
        &mut self,
        gas: &dyn ThermoPhase,
        surface: &SurfacePhase,
        out: &mut [f64],
    );
    /// `∂ṡ_k/∂C_j` in concentration units (m/s for gas columns, 1/s for surface columns).
    fn net_production_rates_ddc(
        &mut self,
        gas: &dyn ThermoPhase,
        surface: &SurfacePhase,
    ) -> CscMatrix<f64>;
}
