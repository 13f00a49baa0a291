//! # Flow devices and walls
//!
//! A flow device moves mass between the reactor and its surroundings. For an inlet the
//! reactor needs the mass flow rate, the specific enthalpy of the incoming stream and
//! the per-species mass flow rates; an outlet carries the reactor's own composition.
//! A wall exchanges heat; its heat rate is positive from its left to its right side.
use crate::Thermodynamics::phase::ThermoPhase;
use std::fmt;

/// State of the reactor as seen by a device it feeds.
#[derive(Debug, Clone, Default)]
pub struct ConnectedState {
    pub mass_fractions: Vec<f64>,
    /// J/kg
    pub enthalpy_mass: f64,
    /// Pa
    pub pressure: f64,
    /// K
    pub temperature: f64,
}

impl ConnectedState {
    pub fn from_phase(thermo: &dyn ThermoPhase) -> Self {
        Self {
            mass_fractions: thermo.mass_fractions().to_vec(),
            enthalpy_mass: thermo.enthalpy_mass(),
            pressure: thermo.pressure(),
            temperature: thermo.temperature(),
        }
    }
}

pub trait FlowDevice: fmt::Debug {
    /// advance any time-dependent behavior to `time`
    fn update(&mut self, _time: f64) {}
    /// called after every state update of the reactor the device draws from
    fn update_connected(&mut self, _upstream: &ConnectedState) {}
    /// kg/s
    fn mass_flow_rate(&self) -> f64;
    /// specific enthalpy of the transported stream, J/kg
    fn enthalpy_mass(&self) -> f64;
    /// mass flow rate of species `k`, kg/s
    fn outlet_species_mass_flow_rate(&self, k: usize) -> f64;
}

/// Fixed-state upstream of an inlet.
#[derive(Debug, Clone)]
pub struct Reservoir {
    pub mass_fractions: Vec<f64>,
    /// J/kg
    pub enthalpy_mass: f64,
}

impl Reservoir {
    pub fn new(mass_fractions: Vec<f64>, enthalpy_mass: f64) -> Self {
        Self {
            mass_fractions,
            enthalpy_mass,
        }
    }
    /// snapshot of the current state of a phase
    pub fn from_phase(thermo: &dyn ThermoPhase) -> Self {
        Self::new(thermo.mass_fractions().to_vec(), thermo.enthalpy_mass())
    }
}

/// Inlet delivering a set mass flow rate from a [`Reservoir`].
#[derive(Debug, Clone)]
pub struct MassFlowController {
    mdot: f64,
    upstream: Reservoir,
}

impl MassFlowController {
    pub fn new(upstream: Reservoir, mdot: f64) -> Self {
        Self { mdot, upstream }
    }
    pub fn set_mass_flow_rate(&mut self, mdot: f64) {
        self.mdot = mdot;
    }
}

impl FlowDevice for MassFlowController {
    fn mass_flow_rate(&self) -> f64 {
        self.mdot
    }
    fn enthalpy_mass(&self) -> f64 {
        self.upstream.enthalpy_mass
    }
    fn outlet_species_mass_flow_rate(&self, k: usize) -> f64 {
        self.mdot * self.upstream.mass_fractions.get(k).copied().unwrap_or(0.0)
    }
}

/// Outlet withdrawing a set mass flow rate at the reactor's composition.
#[derive(Debug, Clone, Default)]
pub struct ReactorOutlet {
    mdot: f64,
    upstream: ConnectedState,
}

impl ReactorOutlet {
    pub fn new(mdot: f64) -> Self {
        Self {
            mdot,
            upstream: ConnectedState::default(),
        }
    }
}

impl FlowDevice for ReactorOutlet {
    fn update_connected(&mut self, upstream: &ConnectedState) {
        self.upstream.clone_from(upstream);
    }
    fn mass_flow_rate(&self) -> f64 {
        self.mdot
    }
    fn enthalpy_mass(&self) -> f64 {
        self.upstream.enthalpy_mass
    }
    fn outlet_species_mass_flow_rate(&self, k: usize) -> f64 {
        self.mdot * self.upstream.mass_fractions.get(k).copied().unwrap_or(0.0)
    }
}

/// which side of a wall the reactor is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// sign applied to the wall heat rate, as heat gained by the reactor
    pub fn sign(self) -> f64 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }
}

pub trait Wall: fmt::Debug {
    /// evaluates the heat rate at `time` given the temperature of the reactor on `side`
    fn update(&mut self, time: f64, side: WallSide, reactor_temperature: f64);
    /// W, positive from left to right
    fn heat_rate(&self) -> f64;
}

/// Wall to a fixed-temperature environment: `q = U A (T_left − T_right) + q₀`.
#[derive(Debug, Clone)]
pub struct HeatWall {
    /// W/(m²·K)
    pub heat_transfer_coeff: f64,
    /// m²
    pub area: f64,
    /// K
    pub environment_temperature: f64,
    /// W, fixed heat flux from left to right
    pub heat_flux: f64,
    q: f64,
}

impl HeatWall {
    pub fn new(heat_transfer_coeff: f64, area: f64, environment_temperature: f64) -> Self {
        Self {
            heat_transfer_coeff,
            area,
            environment_temperature,
            heat_flux: 0.0,
            q: 0.0,
        }
    }
    pub fn with_heat_flux(mut self, heat_flux: f64) -> Self {
        self.heat_flux = heat_flux;
        self
    }
}

impl Wall for HeatWall {
    fn update(&mut self, _time: f64, side: WallSide, reactor_temperature: f64) {
        let (t_left, t_right) = match side {
            WallSide::Left => (reactor_temperature, self.environment_temperature),
            WallSide::Right => (self.environment_temperature, reactor_temperature),
        };
        self.q = self.heat_transfer_coeff * self.area * (t_left - t_right) + self.heat_flux;
    }
    fn heat_rate(&self) -> f64 {
        self.q
    }
}
