//! Mass-action kinetics on a surface. Species are numbered over `[gas..., surface...]`;
//! gas concentrations are `X P/(R T)` (kmol/m³), surface concentrations `Γ θ_k/size_k`
//! (kmol/m²). Rates of progress are per unit area.
use super::gas_kinetics::Reaction;
use super::kinetics_api::SurfaceKinetics;
use super::mass_action::{
    StoichTerm, concentration_product, concentration_product_derivative, parse_equation,
    resolve_side,
};
use super::rates::{ArrheniusRate, RateContext, RateEvaluator, RateExpression};
use crate::ReactorsZeroD::errors::ReactorError;
use crate::Thermodynamics::phase::{Phase, ThermoPhase};
use crate::Thermodynamics::surface_phase::SurfacePhase;
use log::info;
use nalgebra_sparse::{CooMatrix, CscMatrix};

#[derive(Debug, Clone)]
struct SurfaceStep {
    reactants: Vec<StoichTerm>,
    products: Vec<StoichTerm>,
    rate: RateExpression,
    reverse_rate: Option<ArrheniusRate>,
    nu: Vec<(usize, f64)>,
}

#[derive(Debug, Clone)]
pub struct InterfaceKinetics {
    n_gas: usize,
    n_surface: usize,
    steps: Vec<SurfaceStep>,
    conc: Vec<f64>,
    x: Vec<f64>,
    kf: Vec<f64>,
    kr: Vec<f64>,
}

impl InterfaceKinetics {
    pub fn new(
        gas: &dyn Phase,
        surface: &SurfacePhase,
        reactions: Vec<Reaction>,
    ) -> Result<Self, ReactorError> {
        let n_gas = gas.n_species();
        let n_surface = surface.n_species();
        let lookup = |name: &str| {
            gas.species_index(name)
                .or_else(|| surface.species_index(name).map(|k| k + n_gas))
        };
        let mut steps = Vec::with_capacity(reactions.len());
        for reaction in reactions {
            let parsed = parse_equation(&reaction.equation)?;
            if parsed.third_body || reaction.third_body.is_some() {
                return Err(ReactorError::Configuration(format!(
                    "surface reaction '{}' cannot have a third body",
                    reaction.equation
                )));
            }
            if parsed.reversible && reaction.reverse_rate.is_none() {
                return Err(ReactorError::Configuration(format!(
                    "reversible reaction '{}' needs a reverse rate",
                    reaction.equation
                )));
            }
            let reactants = resolve_side(&parsed.reactants, lookup, &reaction.equation)?;
            let products = resolve_side(&parsed.products, lookup, &reaction.equation)?;
            let mut nu: Vec<(usize, f64)> = Vec::new();
            for (t, sign) in reactants
                .iter()
                .map(|t| (t, -1.0))
                .chain(products.iter().map(|t| (t, 1.0)))
            {
                match nu.iter_mut().find(|(k, _)| *k == t.species) {
                    Some(entry) => entry.1 += sign * t.coefficient,
                    None => nu.push((t.species, sign * t.coefficient)),
                }
            }
            let mut rate = reaction.rate;
            rate.set_context(gas)?;
            steps.push(SurfaceStep {
                reactants,
                products,
                rate,
                reverse_rate: if parsed.reversible {
                    reaction.reverse_rate
                } else {
                    None
                },
                nu,
            });
        }
        info!(
            "interface kinetics on '{}': {} gas + {} surface species, {} reactions",
            surface.name(),
            n_gas,
            n_surface,
            steps.len()
        );
        let n_steps = steps.len();
        Ok(Self {
            n_gas,
            n_surface,
            steps,
            conc: vec![0.0; n_gas + n_surface],
            x: vec![0.0; n_gas],
            kf: vec![0.0; n_steps],
            kr: vec![0.0; n_steps],
        })
    }

    fn update(&mut self, gas: &dyn ThermoPhase, surface: &SurfacePhase) {
        let (gas_conc, surf_conc) = self.conc.split_at_mut(self.n_gas);
        gas.concentrations(gas_conc);
        surface.concentrations(surf_conc);
        gas.mole_fractions(&mut self.x);
        let t = gas.temperature();
        let p = gas.pressure();
        for (i, step) in self.steps.iter().enumerate() {
            let ctx = RateContext::new(t, p, &self.x);
            self.kf[i] = step.rate.eval(&ctx);
            self.kr[i] = step.reverse_rate.map(|rev| rev.K_const(t)).unwrap_or(0.0);
        }
    }
}

impl SurfaceKinetics for InterfaceKinetics {
    fn n_gas_species(&self) -> usize {
        self.n_gas
    }
    fn n_surface_species(&self) -> usize {
        self.n_surface
    }

    fn net_production_rates(&mut self, gas: &dyn ThermoPhase, surface: &SurfacePhase, out: &mut [f64]) {
        self.update(gas, surface);
        out.iter_mut().for_each(|s| *s = 0.0);
        for (i, step) in self.steps.iter().enumerate() {
            let q = self.kf[i] * concentration_product(&step.reactants, &self.conc)
                - self.kr[i] * concentration_product(&step.products, &self.conc);
            for &(k, nu) in &step.nu {
                out[k] += nu * q;
            }
        }
    }

    fn net_production_rates_ddc(&mut self, gas: &dyn ThermoPhase, surface: &SurfacePhase) -> CscMatrix<f64> {
        self.update(gas, surface);
        let n = self.n_gas + self.n_surface;
        let mut coo = CooMatrix::new(n, n);
        for (i, step) in self.steps.iter().enumerate() {
            let mut columns: Vec<usize> = step
                .reactants
                .iter()
                .chain(&step.products)
                .map(|t| t.species)
                .collect();
            columns.sort_unstable();
            columns.dedup();
            for &j in &columns {
                let dq = self.kf[i] * concentration_product_derivative(&step.reactants, &self.conc, j)
                    - self.kr[i] * concentration_product_derivative(&step.products, &self.conc, j);
                for &(k, nu) in &step.nu {
                    coo.push(k, j, nu * dq);
                }
            }
        }
        CscMatrix::from(&coo)
    }
}
