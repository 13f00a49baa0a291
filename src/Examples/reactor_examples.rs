use crate::Kinetics::gas_kinetics::{GasKinetics, Reaction};
use crate::Kinetics::interface_kinetics::InterfaceKinetics;
use crate::Kinetics::rates::ArrheniusRate;
use crate::ReactorsZeroD::devices::{HeatWall, MassFlowController, ReactorOutlet, Reservoir, WallSide};
use crate::ReactorsZeroD::errors::ReactorError;
use crate::ReactorsZeroD::reactor::IdealGasConstPressureMoleReactor;
use crate::ReactorsZeroD::surface::ReactorSurface;
use crate::Thermodynamics::NASAdata::NASAdata;
use crate::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
use crate::Thermodynamics::phase::{ONE_ATM, ThermoPhase};
use crate::Thermodynamics::surface_phase::{SurfacePhase, SurfaceSpecies};
use crate::context::AppContext;
use crate::settings::ReactorSettings;
use log::info;
use nalgebra::DMatrix;

const MECHANISM: &str = r#"[
    {"equation": "H2 + O2 => 2OH", "rate": {"type": "arrhenius", "A": 1.7e10, "b": 0.0, "Ea": 2.0e8}},
    {"equation": "OH + H2 => H2O + H", "rate": {"type": "arrhenius", "A": 2.2e10, "b": 0.0, "Ea": 2.15e7}},
    {"equation": "H + O2 => OH + O", "rate": {"type": "arrhenius", "A": 2.0e11, "b": 0.0, "Ea": 7.0e7}},
    {"equation": "O + H2 => OH + H", "rate": {"type": "arrhenius", "A": 1.8e7, "b": 1.0, "Ea": 3.7e7}}
]"#;

/// constant-cp hydrogen/oxygen mixture diluted in nitrogen
fn hydrogen_air() -> Result<IdealGasPhase, ReactorError> {
    let t_ref = 298.15;
    let species = [
        ("H2", 2.016, 29900.0, 0.0),
        ("O2", 31.998, 33000.0, 0.0),
        ("H2O", 18.015, 41000.0, -2.418e8),
        ("OH", 17.007, 30500.0, 3.9e7),
        ("H", 1.008, 20786.0, 2.18e8),
        ("O", 15.999, 21000.0, 2.49e8),
        ("N2", 28.014, 32000.0, 0.0),
    ];
    let species = species
        .iter()
        .map(|(name, mw, cp, h)| GasSpecies::new(name, *mw, NASAdata::constant_cp(*cp, *h, t_ref)))
        .collect();
    let mut gas = IdealGasPhase::new("h2-air", species)?;
    gas.set_mole_fractions_by_name(&[("H2", 2.0), ("O2", 1.0), ("N2", 3.76)])?;
    gas.set_state_tp(1200.0, ONE_ATM);
    Ok(gas)
}

/// Explicit Euler march of `lhs · dy/dt = rhs`; returns the final state.
fn march(reactor: &mut IdealGasConstPressureMoleReactor, dt: f64, steps: usize) -> Result<Vec<f64>, ReactorError> {
    let n = reactor.neq();
    let mut y = vec![0.0; n];
    let mut lhs = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    reactor.get_state(&mut y)?;
    let mut t = reactor.time();
    for step in 0..steps {
        reactor.eval(t, &mut lhs, &mut rhs)?;
        for i in 0..n {
            y[i] += dt * rhs[i] / lhs[i];
        }
        t += dt;
        reactor.update_state(&y)?;
        if step % 100 == 0 {
            info!("t = {:.3e} s, T = {:.2} K, V = {:.4e} m3", t, y[0], reactor.volume());
        }
    }
    reactor.set_time(t);
    Ok(y)
}

fn print_jacobian(reactor: &mut IdealGasConstPressureMoleReactor) -> Result<(), ReactorError> {
    let jac = reactor.jacobian()?;
    println!("Jacobian: {} x {}, {} stored entries", jac.nrows(), jac.ncols(), jac.nnz());
    println!("{:.3e}", DMatrix::from(&jac));
    Ok(())
}

pub fn reactor_examples(task: usize) -> Result<(), ReactorError> {
    match task {
        0 => {
            // HOMOGENEOUS IGNITION
            let gas = hydrogen_air()?;
            let kinetics = GasKinetics::from_json(&gas, MECHANISM)?;
            let mut reactor = IdealGasConstPressureMoleReactor::new("ignition");
            reactor.set_thermo(Box::new(gas))?;
            reactor.set_kinetics(Box::new(kinetics));
            reactor.set_initial_volume(1.0e-3);
            reactor.initialize(0.0)?;
            let mut y = vec![0.0; reactor.neq()];
            reactor.get_state(&mut y)?;
            reactor.print_state(&y)?;
            print_jacobian(&mut reactor)?;
            let y = march(&mut reactor, 1.0e-8, 1000)?;
            reactor.print_state(&y)?;
            println!("index of H2O: {:?}", reactor.component_index("H2O"));
        }
        1 => {
            // ADSORPTION ON A CATALYTIC WALL
            let gas = hydrogen_air()?;
            let th = NASAdata::constant_cp(15000.0, 0.0, 298.15);
            let mut surf = SurfacePhase::new(
                "catalyst",
                vec![
                    SurfaceSpecies::new("PT(S)", 1.0, th.clone()),
                    SurfaceSpecies::new("H(S)", 1.0, th.clone()),
                    SurfaceSpecies::new("O(S)", 1.0, th),
                ],
                2.7e-8,
            )?;
            surf.set_coverages(&[1.0, 0.0, 0.0])?;
            let reactions = vec![
                Reaction::new("H2 + 2PT(S) => 2H(S)", ArrheniusRate::new(4.5e10, 0.0, 0.0)),
                Reaction::new("O2 + 2PT(S) => 2O(S)", ArrheniusRate::new(1.8e10, 0.0, 0.0)),
                Reaction::new("H(S) + O(S) => OH + 2PT(S)", ArrheniusRate::new(3.7e20, 0.0, 1.15e7)),
            ];
            let kinetics = InterfaceKinetics::new(&gas, &surf, reactions)?;
            let surface = ReactorSurface::new(surf, 1.0e-4)?.with_kinetics(Box::new(kinetics))?;
            let mut reactor = IdealGasConstPressureMoleReactor::new("catalytic");
            reactor.set_thermo(Box::new(gas))?;
            reactor.set_chemistry(false);
            reactor.set_energy(false);
            reactor.add_surface(surface);
            reactor.set_initial_volume(1.0e-6);
            reactor.initialize(0.0)?;
            let y = march(&mut reactor, 1.0e-9, 500)?;
            reactor.print_state(&y)?;
            print_jacobian(&mut reactor)?;
        }
        2 => {
            // FLOW REACTOR WITH A COOLED WALL, OPTIONS FROM reactor.json
            let mut ctx = AppContext::new();
            let settings = match ctx.find_input_file("reactor.json") {
                Ok(path) => ReactorSettings::load(path)?,
                Err(e) => {
                    ctx.write_log(&format!("{}; default options used\n", e));
                    ReactorSettings::default()
                }
            };
            let gas = hydrogen_air()?;
            let feed = Reservoir::from_phase(&gas);
            let kinetics = GasKinetics::from_json(&gas, MECHANISM)?;
            let mut reactor = IdealGasConstPressureMoleReactor::new("flow");
            reactor.set_thermo(Box::new(gas))?;
            reactor.set_kinetics(Box::new(kinetics));
            reactor.apply_settings(&settings);
            reactor.add_inlet(Box::new(MassFlowController::new(feed, 1.0e-3)));
            reactor.add_outlet(Box::new(ReactorOutlet::new(1.0e-3)));
            reactor.add_wall(Box::new(HeatWall::new(50.0, 0.1, 300.0)), WallSide::Right);
            reactor.initialize(0.0)?;
            let y = march(&mut reactor, 1.0e-6, 1000)?;
            reactor.print_state(&y)?;
            println!("heat through walls: {:.4e} W", reactor.heat_rate());
            print_jacobian(&mut reactor)?;
            ctx.teardown();
        }
        _ => {
            println!("no example with number {}", task);
        }
    }
    Ok(())
}

///////////////////////////TESTING////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixture_and_mechanism_are_consistent() {
        let gas = hydrogen_air().unwrap();
        let kinetics = GasKinetics::from_json(&gas, MECHANISM).unwrap();
        assert_eq!(kinetics.reactions().len(), 4);
        let mut x = vec![0.0; 7];
        gas.mole_fractions(&mut x);
        assert!((x[0] - 2.0 / 6.76).abs() < 1e-12);
    }

    #[test]
    fn test_short_ignition_march() {
        let gas = hydrogen_air().unwrap();
        let kinetics = GasKinetics::from_json(&gas, MECHANISM).unwrap();
        let mut reactor = IdealGasConstPressureMoleReactor::new("ignition");
        reactor.set_thermo(Box::new(gas)).unwrap();
        reactor.set_kinetics(Box::new(kinetics));
        reactor.initialize(0.0).unwrap();
        let mass = reactor.mass();
        let y = march(&mut reactor, 1.0e-9, 20).unwrap();
        assert!(y.iter().all(|v| v.is_finite()));
        // chemistry conserves mass at constant pressure
        assert!((reactor.mass() - mass).abs() < 1e-9 * mass);
        assert!((reactor.time() - 2.0e-8).abs() < 1e-20);
    }
}
