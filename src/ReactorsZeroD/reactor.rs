//! # Constant-pressure ideal-gas reactor with moles as the state
//!
//! Configuration (phase, kinetics, surfaces, devices, flags), the mapping between the
//! reactor and its state vector, and initialization. The residual and the Jacobian are
//! implemented in the sibling `residual` and `jacobian` modules on the same type.
use super::devices::{ConnectedState, FlowDevice, Wall, WallSide};
use super::errors::ReactorError;
use super::layout::StateLayout;
use super::surface::ReactorSurface;
use crate::Kinetics::kinetics_api::Kinetics;
use crate::Thermodynamics::phase::{PhaseKind, ThermoPhase};
use crate::settings::ReactorSettings;
use log::{info, warn};

#[derive(Debug)]
pub struct IdealGasConstPressureMoleReactor {
    pub name: String,
    pub(crate) thermo: Option<Box<dyn ThermoPhase>>,
    pub(crate) kinetics: Option<Box<dyn Kinetics>>,
    pub(crate) surfaces: Vec<ReactorSurface>,
    pub(crate) inlets: Vec<Box<dyn FlowDevice>>,
    pub(crate) outlets: Vec<Box<dyn FlowDevice>>,
    pub(crate) walls: Vec<(Box<dyn Wall>, WallSide)>,
    /// solve the energy equation
    pub(crate) energy: bool,
    /// evaluate bulk chemistry
    pub(crate) chemistry: bool,
    /// pressure imposed at initialization instead of the phase's own, Pa
    pub(crate) pressure_override: Option<f64>,
    /// Pa
    pub(crate) pressure: f64,
    /// m³
    pub(crate) volume: f64,
    /// kg
    pub(crate) mass: f64,
    /// temperature of the last applied state, K
    pub(crate) temperature: f64,
    /// heat added through walls at the last evaluation, W
    pub(crate) qdot: f64,
    /// multiplier of the finite-difference temperature step
    pub(crate) fd_scale: f64,
    pub(crate) dense_volume_correction: bool,
    /// equation-of-state cache saved after every state update
    pub(crate) state: Vec<f64>,
    pub(crate) layout: Option<StateLayout>,
    pub(crate) hk: Vec<f64>,
    pub(crate) wdot: Vec<f64>,
    pub(crate) sdot: Vec<f64>,
    pub(crate) time: f64,
}

impl IdealGasConstPressureMoleReactor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            thermo: None,
            kinetics: None,
            surfaces: Vec::new(),
            inlets: Vec::new(),
            outlets: Vec::new(),
            walls: Vec::new(),
            energy: true,
            chemistry: true,
            pressure_override: None,
            pressure: 0.0,
            volume: 1.0,
            mass: 0.0,
            temperature: 0.0,
            qdot: 0.0,
            fd_scale: 1.0,
            dense_volume_correction: false,
            state: Vec::new(),
            layout: None,
            hk: Vec::new(),
            wdot: Vec::new(),
            sdot: Vec::new(),
            time: 0.0,
        }
    }

    /// Attaches the bulk phase. Only ideal-gas phases are accepted.
    pub fn set_thermo(&mut self, thermo: Box<dyn ThermoPhase>) -> Result<(), ReactorError> {
        if thermo.kind() != PhaseKind::IdealGas {
            return Err(ReactorError::IncompatiblePhase {
                expected: PhaseKind::IdealGas.to_string(),
                found: thermo.kind().to_string(),
            });
        }
        info!(
            "reactor '{}': phase '{}' with {} species attached",
            self.name,
            thermo.name(),
            thermo.n_species()
        );
        self.thermo = Some(thermo);
        self.layout = None;
        Ok(())
    }

    pub fn set_kinetics(&mut self, kinetics: Box<dyn Kinetics>) {
        self.kinetics = Some(kinetics);
    }

    pub fn add_surface(&mut self, surface: ReactorSurface) {
        self.surfaces.push(surface);
        self.layout = None;
    }

    pub fn add_inlet(&mut self, inlet: Box<dyn FlowDevice>) {
        self.inlets.push(inlet);
    }

    pub fn add_outlet(&mut self, outlet: Box<dyn FlowDevice>) {
        self.outlets.push(outlet);
    }

    pub fn add_wall(&mut self, wall: Box<dyn Wall>, side: WallSide) {
        self.walls.push((wall, side));
    }

    pub fn set_initial_volume(&mut self, volume: f64) {
        self.volume = volume;
    }

    pub fn set_energy(&mut self, energy: bool) {
        self.energy = energy;
    }

    pub fn set_chemistry(&mut self, chemistry: bool) {
        self.chemistry = chemistry;
    }

    pub fn set_pressure(&mut self, pressure: f64) {
        self.pressure_override = Some(pressure);
    }

    /// scale of the finite-difference temperature step, `ΔT = T · scale · sqrt(ε)`
    pub fn set_fd_scale(&mut self, scale: f64) {
        self.fd_scale = scale;
    }

    pub fn set_dense_volume_correction(&mut self, dense: bool) {
        self.dense_volume_correction = dense;
    }

    pub fn apply_settings(&mut self, settings: &ReactorSettings) {
        self.energy = settings.energy;
        self.chemistry = settings.chemistry;
        self.volume = settings.volume;
        self.pressure_override = settings.pressure;
        if settings.fd_scale > 0.0 {
            self.fd_scale = settings.fd_scale;
        } else {
            warn!(
                "reactor '{}': ignoring non-positive fd_scale {}",
                self.name, settings.fd_scale
            );
        }
        self.dense_volume_correction = settings.dense_volume_correction;
    }

    pub fn thermo(&self) -> Option<&dyn ThermoPhase> {
        self.thermo.as_deref()
    }
    pub fn surfaces(&self) -> &[ReactorSurface] {
        &self.surfaces
    }
    pub fn energy_enabled(&self) -> bool {
        self.energy
    }
    pub fn chemistry_enabled(&self) -> bool {
        self.chemistry
    }
    pub fn volume(&self) -> f64 {
        self.volume
    }
    pub fn mass(&self) -> f64 {
        self.mass
    }
    pub fn pressure(&self) -> f64 {
        self.pressure
    }
    pub fn time(&self) -> f64 {
        self.time
    }
    /// time used for the evaluations inside `jacobian`
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    pub fn layout(&self) -> Option<&StateLayout> {
        self.layout.as_ref()
    }

    /// number of equations, zero before `initialize`
    pub fn neq(&self) -> usize {
        self.layout.as_ref().map(StateLayout::nv).unwrap_or(0)
    }

    /// Builds the state layout and sizes the work buffers from the attached phase,
    /// surfaces and kinetics.
    pub fn initialize(&mut self, t0: f64) -> Result<(), ReactorError> {
        let thermo = self
            .thermo
            .as_deref_mut()
            .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
        let nsp = thermo.n_species();
        if let Some(kin) = &self.kinetics {
            if kin.n_species() != nsp {
                return Err(ReactorError::Configuration(format!(
                    "kinetics has {} species, phase '{}' has {}",
                    kin.n_species(),
                    thermo.name(),
                    nsp
                )));
            }
        }
        for surface in &self.surfaces {
            surface.check_gas(nsp)?;
        }
        let counts: Vec<usize> = self.surfaces.iter().map(|s| s.n_species()).collect();
        let layout = StateLayout::new(nsp, &counts, true)?;
        if let Some(p) = self.pressure_override {
            let t = thermo.temperature();
            thermo.set_state_tp(t, p);
        }
        self.pressure = thermo.pressure();
        self.temperature = thermo.temperature();
        self.mass = thermo.density() * self.volume;
        thermo.save_state(&mut self.state);
        let connected = ConnectedState::from_phase(thermo);
        for outlet in self.outlets.iter_mut() {
            outlet.update_connected(&connected);
        }
        for surface in self.surfaces.iter_mut() {
            surface.sync_temperature(self.temperature);
        }
        self.hk = vec![0.0; nsp];
        self.wdot = vec![0.0; nsp];
        self.sdot = vec![0.0; nsp];
        self.time = t0;
        info!(
            "reactor '{}' initialized at t = {}: {} equations, T = {} K, P = {} Pa, V = {} m3, m = {} kg",
            self.name,
            t0,
            layout.nv(),
            self.temperature,
            self.pressure,
            self.volume,
            self.mass
        );
        self.layout = Some(layout);
        Ok(())
    }

    /// Writes `[T, n_bulk..., n_surface...]` for the current state.
    pub fn get_state(&mut self, y: &mut [f64]) -> Result<(), ReactorError> {
        let thermo = self
            .thermo
            .as_deref_mut()
            .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
        let layout = self.layout.as_ref().ok_or(ReactorError::NotInitialized("get_state"))?;
        if y.len() != layout.nv() {
            return Err(ReactorError::Configuration(format!(
                "state vector has length {}, expected {}",
                y.len(),
                layout.nv()
            )));
        }
        thermo.restore_state(&self.state);
        self.mass = thermo.density() * self.volume;
        y[0] = thermo.temperature();
        let mass = self.mass;
        for (n, (yk, inv_w)) in y[layout.species_range()]
            .iter_mut()
            .zip(thermo.mass_fractions().iter().zip(thermo.inverse_molecular_weights()))
        {
            *n = mass * yk * inv_w;
        }
        for (i, surface) in self.surfaces.iter().enumerate() {
            surface.get_moles(&mut y[layout.surface_range(i)]);
        }
        Ok(())
    }

    /// Applies a state vector: mass and composition from the moles, temperature at the
    /// reactor pressure, volume from the density. Saves the equation-of-state cache and
    /// notifies outlets and surfaces.
    pub fn update_state(&mut self, y: &[f64]) -> Result<(), ReactorError> {
        let thermo = self
            .thermo
            .as_deref_mut()
            .ok_or_else(|| ReactorError::Configuration("reactor is empty".to_string()))?;
        let layout = self.layout.as_ref().ok_or(ReactorError::NotInitialized("update_state"))?;
        if y.len() != layout.nv() {
            return Err(ReactorError::Configuration(format!(
                "state vector has length {}, expected {}",
                y.len(),
                layout.nv()
            )));
        }
        let moles = &y[layout.species_range()];
        self.mass = moles
            .iter()
            .zip(thermo.molecular_weights())
            .map(|(n, w)| n * w)
            .sum();
        thermo.set_moles_no_truncate(moles);
        thermo.set_state_tp(y[0], self.pressure);
        self.volume = self.mass / thermo.density();
        self.temperature = y[0];
        thermo.save_state(&mut self.state);
        let connected = ConnectedState::from_phase(thermo);
        for outlet in self.outlets.iter_mut() {
            outlet.update_connected(&connected);
        }
        for (i, surface) in self.surfaces.iter_mut().enumerate() {
            surface.set_moles(&y[layout.surface_range(i)]);
            surface.sync_temperature(y[0]);
        }
        Ok(())
    }
}
