/// traits describing what the reactor needs from an equation of state
pub mod phase;
/// NASA 7-coefficient polynomials for species heat capacity, enthalpy and entropy
///  # Examples
/// ```
/// use ZeroDReactors::Thermodynamics::NASAdata::NASAdata;
/// let data = NASAdata::from_coefficients(&[300.0, 1000.0, 3.5, 0.0, 0.0, 0.0, 0.0, -1000.0, 4.0]).unwrap();
/// assert!((data.cp_r(500.0) - 3.5).abs() < 1e-12);
/// ```
#[allow(non_snake_case)]
pub mod NASAdata;
/// ideal-gas mixture: the bulk phase of the constant-pressure reactor
///  # Examples
/// ```
/// use ZeroDReactors::Thermodynamics::NASAdata::NASAdata;
/// use ZeroDReactors::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
/// use ZeroDReactors::Thermodynamics::phase::{ThermoPhase, ONE_ATM};
/// let species = vec![
///     GasSpecies::new("H2", 2.016, NASAdata::constant_cp(29000.0, 0.0, 298.15)),
///     GasSpecies::new("N2", 28.014, NASAdata::constant_cp(29100.0, 0.0, 298.15)),
/// ];
/// let mut gas = IdealGasPhase::new("gas", species).unwrap();
/// gas.set_mole_fractions_by_name(&[("H2", 0.1), ("N2", 0.9)]).unwrap();
/// gas.set_state_tp(1000.0, ONE_ATM);
/// println!("density {} kg/m3", gas.density());
/// ```
pub mod ideal_gas;
/// site-fraction surface phase
pub mod surface_phase;
