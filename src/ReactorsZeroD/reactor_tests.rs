#[cfg(test)]
mod tests {
    use super::super::devices::{HeatWall, MassFlowController, ReactorOutlet, Reservoir, WallSide};
    use super::super::errors::ReactorError;
    use super::super::reactor::IdealGasConstPressureMoleReactor;
    use super::super::surface::ReactorSurface;
    use super::super::test_fixtures::*;
    use crate::Kinetics::gas_kinetics::{GasKinetics, Reaction};
    use crate::Kinetics::interface_kinetics::InterfaceKinetics;
    use crate::Kinetics::rates::ArrheniusRate;
    use crate::Thermodynamics::NASAdata::NASAdata;
    use crate::Thermodynamics::phase::{GAS_CONSTANT, ONE_ATM, Phase, PhaseKind, ThermoPhase};
    use crate::Thermodynamics::surface_phase::{SurfacePhase, SurfaceSpecies};
    use crate::settings::ReactorSettings;
    use approx::assert_relative_eq;

    fn eval(r: &mut IdealGasConstPressureMoleReactor) -> (Vec<f64>, Vec<f64>) {
        let n = r.neq();
        let mut lhs = vec![0.0; n];
        let mut rhs = vec![0.0; n];
        r.eval(0.0, &mut lhs, &mut rhs).unwrap();
        (lhs, rhs)
    }

    #[test]
    fn test_single_species_at_rest() {
        let mut g = gas(&[("N2", 28.0, 29100.0, 0.0)]);
        g.set_state_tp(300.0, ONE_ATM);
        let mut r = reactor_with(g);
        r.set_energy(false);
        r.set_chemistry(false);
        r.initialize(0.0).unwrap();
        // volume holding exactly one kmol
        let mut y = vec![0.0; r.neq()];
        r.get_state(&mut y).unwrap();
        y[1] = 1.0;
        r.update_state(&y).unwrap();
        let (lhs, rhs) = eval(&mut r);
        assert_eq!(rhs, vec![0.0, 0.0]);
        assert_eq!(lhs, vec![1.0, 1.0]);
        assert_relative_eq!(r.volume(), GAS_CONSTANT * 300.0 / ONE_ATM, max_relative = 1e-12);
    }

    #[test]
    fn test_fixed_rates_scale_with_volume() {
        let mut r = reactor_with(two_species_gas());
        r.set_energy(false);
        r.set_initial_volume(2.0);
        r.set_kinetics(Box::new(FixedRates::new(vec![1.0, -1.0])));
        r.initialize(0.0).unwrap();
        let (_, rhs) = eval(&mut r);
        assert_relative_eq!(rhs[1], 2.0);
        assert_relative_eq!(rhs[2], -2.0);
        assert_eq!(rhs[0], 0.0);
    }

    #[test]
    fn test_chemistry_disabled_ignores_kinetics() {
        let mut r = reactor_with(two_species_gas());
        r.set_energy(false);
        r.set_chemistry(false);
        r.set_kinetics(Box::new(FixedRates::new(vec![1.0, -1.0])));
        r.initialize(0.0).unwrap();
        let (_, rhs) = eval(&mut r);
        assert_eq!(rhs, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bulk_rates_sum_to_volume_times_production() {
        let g = two_species_gas();
        let kin = GasKinetics::new(&g, vec![Reaction::new("A => 2B", ArrheniusRate::new(50.0, 0.0, 0.0))]).unwrap();
        let mut r = reactor_with(g);
        r.set_energy(false);
        r.set_initial_volume(0.3);
        r.set_kinetics(Box::new(kin));
        r.initialize(0.0).unwrap();
        let (_, rhs) = eval(&mut r);
        let total_wdot: f64 = r.net_production_rates().iter().sum();
        assert!(total_wdot > 0.0);
        assert_relative_eq!(rhs[1] + rhs[2], r.volume() * total_wdot, max_relative = 1e-12);
    }

    #[test]
    fn test_outlet_removes_species() {
        let mut g = gas(&[("A", 2.0, 29000.0, 0.0), ("B", 4.0, 29000.0, 0.0)]);
        g.set_state_tp(500.0, ONE_ATM);
        let mut r = reactor_with(g);
        r.set_energy(false);
        r.add_outlet(Box::new(ReactorOutlet::new(1.0)));
        r.initialize(0.0).unwrap();
        let (_, rhs) = eval(&mut r);
        assert_relative_eq!(rhs[1], -0.5);
        assert_eq!(rhs[2], 0.0);
    }

    #[test]
    fn test_inlet_adds_species_and_enthalpy() {
        let mut g = two_species_gas();
        let upstream = Reservoir::new(vec![0.0, 1.0], 1.0e6);
        g.set_state_tp(800.0, ONE_ATM);
        let mut hk = vec![0.0; 2];
        g.partial_molar_enthalpies(&mut hk);
        let mut r = reactor_with(g);
        r.add_inlet(Box::new(MassFlowController::new(upstream, 2.0)));
        r.initialize(0.0).unwrap();
        let (lhs, rhs) = eval(&mut r);
        // 2 kg/s of B with W = 4
        assert_relative_eq!(rhs[2], 0.5);
        assert_relative_eq!(rhs[0], 1.0e6 * 2.0 - hk[1] * 0.5, max_relative = 1e-12);
        assert_relative_eq!(lhs[0], r.mass() * r.thermo().unwrap().cp_mass(), max_relative = 1e-12);
    }

    #[test]
    fn test_wall_heat_enters_energy_equation() {
        let mut r = reactor_with(two_species_gas());
        r.add_wall(Box::new(HeatWall::new(5.0, 2.0, 1100.0)), WallSide::Right);
        r.add_wall(Box::new(HeatWall::new(0.0, 1.0, 300.0).with_heat_flux(40.0)), WallSide::Left);
        r.initialize(0.0).unwrap();
        let (_, rhs) = eval(&mut r);
        assert_relative_eq!(r.heat_rate(), 5.0 * 2.0 * 100.0 - 40.0, max_relative = 1e-12);
        assert_relative_eq!(rhs[0], 960.0, max_relative = 1e-12);
    }

    #[test]
    fn test_energy_disabled_gives_trivial_temperature_equation() {
        let mut r = reactor_with(two_species_gas());
        r.set_energy(false);
        r.add_wall(Box::new(HeatWall::new(5.0, 2.0, 1100.0)), WallSide::Right);
        r.initialize(0.0).unwrap();
        let (lhs, rhs) = eval(&mut r);
        assert_eq!(rhs[0], 0.0);
        assert_eq!(lhs[0], 1.0);
    }

    #[test]
    fn test_state_round_trip_is_idempotent() {
        let mut r = reactor_with(two_species_gas());
        r.set_initial_volume(0.7);
        r.initialize(0.0).unwrap();
        let n = r.neq();
        let mut y1 = vec![0.0; n];
        r.get_state(&mut y1).unwrap();
        r.update_state(&y1).unwrap();
        let mut y2 = vec![0.0; n];
        r.get_state(&mut y2).unwrap();
        r.update_state(&y2).unwrap();
        let mut y3 = vec![0.0; n];
        r.get_state(&mut y3).unwrap();
        for i in 0..n {
            assert_relative_eq!(y2[i], y3[i], max_relative = 1e-12);
            assert_relative_eq!(y1[i], y2[i], max_relative = 1e-12);
        }
        assert_relative_eq!(r.volume(), 0.7, max_relative = 1e-12);
    }

    #[test]
    fn test_update_state_sets_mass_and_volume() {
        let mut r = reactor_with(two_species_gas());
        r.initialize(0.0).unwrap();
        r.update_state(&[600.0, 2.0, 0.5]).unwrap();
        assert_relative_eq!(r.mass(), 2.0 * 2.0 + 0.5 * 4.0);
        assert_relative_eq!(r.volume(), 2.5 * GAS_CONSTANT * 600.0 / ONE_ATM, max_relative = 1e-12);
        assert_relative_eq!(r.thermo().unwrap().temperature(), 600.0);
    }

    fn surface_setup() -> IdealGasConstPressureMoleReactor {
        let g = two_species_gas();
        let th = NASAdata::constant_cp(10000.0, 0.0, 298.15);
        let mut surf = SurfacePhase::new(
            "surf",
            vec![SurfaceSpecies::new("S", 1.0, th.clone()), SurfaceSpecies::new("A(S)", 1.0, th)],
            1.0e-8,
        )
        .unwrap();
        surf.set_coverages(&[0.9, 0.1]).unwrap();
        let kin = InterfaceKinetics::new(
            &g,
            &surf,
            vec![Reaction::new("A + S => A(S)", ArrheniusRate::new(1.0e7, 0.0, 0.0))],
        )
        .unwrap();
        let surface = ReactorSurface::new(surf, 0.2).unwrap().with_kinetics(Box::new(kin)).unwrap();
        let mut r = reactor_with(g);
        r.set_energy(false);
        r.set_chemistry(false);
        r.add_surface(surface);
        r.initialize(0.0).unwrap();
        r
    }

    #[test]
    fn test_surface_production_feeds_bulk_and_surface_rows() {
        let mut r = surface_setup();
        assert_eq!(r.neq(), 5);
        let (lhs, rhs) = eval(&mut r);
        let c_a = 0.5 * ONE_ATM / (GAS_CONSTANT * 1000.0);
        let rate = 1.0e7 * c_a * 0.9e-8 * 0.2;
        assert_relative_eq!(rhs[1], -rate, max_relative = 1e-12);
        assert_relative_eq!(rhs[3], -rate, max_relative = 1e-12);
        assert_relative_eq!(rhs[4], rate, max_relative = 1e-12);
        assert_eq!(&lhs[3..], &[1.0, 1.0]);
    }

    #[test]
    fn test_surface_moles_in_state() {
        let mut r = surface_setup();
        let mut y = vec![0.0; r.neq()];
        r.get_state(&mut y).unwrap();
        assert_relative_eq!(y[3], 0.9 * 1.0e-8 * 0.2, max_relative = 1e-12);
        y[4] *= 2.0;
        r.update_state(&y).unwrap();
        assert_relative_eq!(r.surfaces()[0].thermo().coverages()[1], 0.2, max_relative = 1e-12);
    }

    #[test]
    fn test_component_names_and_indices_are_inverse() {
        let r = surface_setup();
        for i in 0..r.neq() {
            let name = r.component_name(i).unwrap();
            assert_eq!(r.component_index(&name), Some(i));
        }
        assert_eq!(r.component_name(0).unwrap(), "temperature");
        assert_eq!(r.component_name(4).unwrap(), "A(S)");
        assert_eq!(r.component_index("B"), Some(2));
        assert_eq!(r.component_index("X"), None);
        assert!(matches!(r.component_name(5), Err(ReactorError::OutOfRange { index: 5, size: 5 })));
    }

    #[test]
    fn test_state_table_lists_components() {
        let mut r = surface_setup();
        let mut y = vec![0.0; r.neq()];
        r.get_state(&mut y).unwrap();
        let text = r.state_table(&y).unwrap().to_string();
        assert!(text.contains("temperature"));
        assert!(text.contains("A(S)"));
        assert!(r.state_table(&y[..2]).is_err());
    }

    #[test]
    fn test_operations_before_initialize() {
        let mut r = reactor_with(two_species_gas());
        let mut lhs = vec![0.0; 3];
        let mut rhs = vec![0.0; 3];
        assert!(matches!(r.eval(0.0, &mut lhs, &mut rhs), Err(ReactorError::NotInitialized(_))));
        assert!(matches!(r.get_state(&mut lhs), Err(ReactorError::NotInitialized(_))));
        assert!(matches!(r.jacobian(), Err(ReactorError::NotInitialized(_))));
        assert_eq!(r.neq(), 0);
        assert_eq!(r.component_index("temperature"), None);
    }

    #[test]
    fn test_empty_reactor_and_bad_buffers() {
        let mut empty = IdealGasConstPressureMoleReactor::new("empty");
        assert!(matches!(empty.initialize(0.0), Err(ReactorError::Configuration(_))));
        let mut r = reactor_with(two_species_gas());
        r.initialize(0.0).unwrap();
        let mut lhs = vec![0.0; 2];
        let mut rhs = vec![0.0; 3];
        assert!(matches!(r.eval(0.0, &mut lhs, &mut rhs), Err(ReactorError::Configuration(_))));
    }

    #[test]
    fn test_rejects_non_ideal_gas_phase() {
        let mut r = IdealGasConstPressureMoleReactor::new("r");
        let phase = DisguisedPhase {
            inner: two_species_gas(),
            kind: PhaseKind::Other("redlich-kwong"),
            hide_species: false,
        };
        match r.set_thermo(Box::new(phase)) {
            Err(ReactorError::IncompatiblePhase { expected, found }) => {
                assert_eq!(expected, "ideal-gas");
                assert_eq!(found, "redlich-kwong");
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_phase_without_species() {
        let mut r = IdealGasConstPressureMoleReactor::new("r");
        let phase = DisguisedPhase {
            inner: two_species_gas(),
            kind: PhaseKind::IdealGas,
            hide_species: true,
        };
        r.set_thermo(Box::new(phase)).unwrap();
        assert!(matches!(r.initialize(0.0), Err(ReactorError::Configuration(_))));
    }

    #[test]
    fn test_kinetics_size_mismatch() {
        let mut r = reactor_with(two_species_gas());
        r.set_kinetics(Box::new(FixedRates::new(vec![1.0])));
        assert!(matches!(r.initialize(0.0), Err(ReactorError::Configuration(_))));
    }

    #[test]
    fn test_settings_are_applied() {
        let mut r = reactor_with(two_species_gas());
        r.apply_settings(&ReactorSettings {
            energy: false,
            chemistry: false,
            pressure: Some(2.0 * ONE_ATM),
            volume: 3.0,
            fd_scale: 0.0,
            dense_volume_correction: true,
        });
        r.initialize(0.0).unwrap();
        assert!(!r.energy_enabled());
        assert!(!r.chemistry_enabled());
        assert_relative_eq!(r.pressure(), 2.0 * ONE_ATM);
        assert_relative_eq!(r.volume(), 3.0);
        assert_relative_eq!(r.mass(), r.thermo().unwrap().density() * 3.0, max_relative = 1e-12);
    }
}
