//! # Zero-dimensional constant-pressure reactor
//!
//! Well-mixed ideal-gas reactor held at constant pressure whose state is expressed in
//! mole numbers. The module supplies an implicit ODE/DAE integrator with the residual
//! `lhs · dy/dt = rhs` and a sparse Jacobian `∂(rhs/lhs)/∂y`.
//!
//! ## Mathematical Model
//!
//! ### Nomenclature
//!
//! | Symbol | Description | Units |
//! |--------|-------------|-------|
//! | `T` | Temperature | K |
//! | `n_k` | Moles of bulk species `k` | kmol |
//! | `n_s` | Moles of surface species `s` | kmol |
//! | `V` | Reactor volume | m³ |
//! | `m` | Reactor mass | kg |
//! | `c_p` | Mass heat capacity | J/(kg·K) |
//! | `h_k` | Partial molar enthalpy | J/kmol |
//! | `ω̇_k` | Net production rate, bulk chemistry | kmol/(m³·s) |
//! | `ṡ_k` | Net production rate, surfaces (area folded in) | kmol/s |
//! | `Q̇` | Heat added through walls | W |
//! | `ṁ` | Mass flow rate through a flow device | kg/s |
//! | `W_k` | Molecular weight | kg/kmol |
//!
//! ### State vector
//!
//! `y = [T, n_0 .. n_{K-1}, n_surf ...]`, temperature first, then bulk species, then the
//! species of every attached surface in attachment order.
//!
//! ### Governing Equations
//!
//! ```text
//! m c_p dT/dt = Q̇ − Σ_k (ω̇_k V + ṡ_k) h_k + Σ_in ṁ h_in − Σ_in Σ_k h_k ṁ_k / W_k
//! dn_k/dt     = ω̇_k V + ṡ_k − Σ_out ṁ_out,k / W_k + Σ_in ṁ_in,k / W_k
//! ```
//!
//! With energy disabled the temperature equation degenerates to `dT/dt = 0`.
//!
//! ### Jacobian
//!
//! - analytic chemistry block `∂(ω̇_k V)/∂n_j = ∂ω̇_k/∂C_j + ω̇_k v̂` (`v̂` molar volume),
//!   only for entries present in the chemistry derivative structure;
//! - temperature column by one-sided finite differences;
//! - temperature row `(c_p,j q̇ − N c_p Σ_k h_k J_kj)/(N c_p)²`;
//! - surface blocks mapped from concentration units.

/// error type of the reactor and its collaborators
pub mod errors;
/// offsets of the state-vector components
pub mod layout;
/// coordinate-list accumulator for the sparse Jacobian
pub mod triplets;
/// inlets, outlets and walls coupled to the reactor
pub mod devices;
/// surfaces attached to the reactor and their coupling terms
pub mod surface;
/// the reactor: configuration, state vector and initialization
///  # Examples
/// ```
/// use ZeroDReactors::ReactorsZeroD::reactor::IdealGasConstPressureMoleReactor;
/// use ZeroDReactors::Thermodynamics::NASAdata::NASAdata;
/// use ZeroDReactors::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
/// let th = NASAdata::constant_cp(29000.0, 0.0, 298.15);
/// let gas = IdealGasPhase::new("gas", vec![GasSpecies::new("N2", 28.0, th)]).unwrap();
/// let mut reactor = IdealGasConstPressureMoleReactor::new("r1");
/// reactor.set_thermo(Box::new(gas)).unwrap();
/// reactor.initialize(0.0).unwrap();
/// let mut y = vec![0.0; reactor.neq()];
/// reactor.get_state(&mut y).unwrap();
/// let mut lhs = vec![0.0; reactor.neq()];
/// let mut rhs = vec![0.0; reactor.neq()];
/// reactor.eval(0.0, &mut lhs, &mut rhs).unwrap();
/// assert_eq!(rhs[1], 0.0);
/// ```
pub mod reactor;
/// right-hand side and left-hand-side coefficients of the governing equations
pub mod residual;
/// hybrid analytic and finite-difference Jacobian
pub mod jacobian;
/// mapping between component names and state offsets, tabular state report
pub mod components;
#[cfg(test)]
mod test_fixtures;
mod reactor_tests;
