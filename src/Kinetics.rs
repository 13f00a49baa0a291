/// traits the reactor uses to query chemistry: net production rates and their
/// concentration derivatives for bulk and surface mechanisms
pub mod kinetics_api;
/// eng
/// Rate constants of chemical reactions. The supported kinds form one closed enum
/// (`RateExpression`): elementary Arrhenius, falloff (Lindemann and Troe), pressure-dependent
/// Arrhenius (P-log), Chebyshev and the linear mixture rule (LMR-R).
/// ATTENTION! use absolute temperature in Kelvin and pressure in Pa!
///  # Examples
/// ```
/// use ZeroDReactors::Kinetics::rates::{ArrheniusRate, RateContext, RateEvaluator, RateExpression};
/// let rate: RateExpression = ArrheniusRate::new(1.0e10, 0.0, 1.0e8).into();
/// let x = [1.0];
/// let ctx = RateContext::new(1000.0, 101325.0, &x);
/// println!("{} k = {}", rate.rate_type(), rate.eval(&ctx));
/// ```
pub mod rates;
/// Parsing of reaction equations ("2H2 + O2 => 2H2O", "A**0.5 + B -> C", "H + O2 (+M) <=> HO2 (+M)")
/// and mass-action concentration products with their derivatives
pub mod mass_action;
/// eng
/// Homogeneous mass-action kinetics of a bulk phase with analytic derivatives of the
/// net production rates with respect to concentrations.
///  # Examples
/// ```
/// use ZeroDReactors::Kinetics::gas_kinetics::{GasKinetics, Reaction};
/// use ZeroDReactors::Kinetics::kinetics_api::Kinetics;
/// use ZeroDReactors::Kinetics::rates::ArrheniusRate;
/// use ZeroDReactors::Thermodynamics::NASAdata::NASAdata;
/// use ZeroDReactors::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
/// let th = NASAdata::constant_cp(29000.0, 0.0, 298.15);
/// let gas = IdealGasPhase::new("gas", vec![
///     GasSpecies::new("A", 2.0, th.clone()),
///     GasSpecies::new("B", 2.0, th),
/// ]).unwrap();
/// let mut kin = GasKinetics::new(&gas, vec![Reaction::new("A => B", ArrheniusRate::new(1.0, 0.0, 0.0))]).unwrap();
/// let mut wdot = vec![0.0; 2];
/// kin.net_production_rates(&gas, &mut wdot);
/// assert!(wdot[0] < 0.0 && wdot[1] > 0.0);
/// ```
pub mod gas_kinetics;
/// mass-action kinetics of reactions between gas and surface species
pub mod interface_kinetics;
