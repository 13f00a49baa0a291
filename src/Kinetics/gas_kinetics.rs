//! # Homogeneous mass-action kinetics
//!
//! Rate of progress of reaction `r`:
//!
//! `q_r = F_r (k_f Π_reactants C_i^{o_i} − k_r Π_products C_i^{o_i})`
//!
//! where `F_r = [M]_r = Σ_j ε_j C_j` for plain three-body reactions and `1` otherwise
//! (falloff rates carry `[M]` inside the rate constant). `ω̇_k = Σ_r ν_kr q_r`.
//!
//! The derivative matrix `∂ω̇_k/∂C_j` holds rate constants fixed. For three-body
//! reactions it includes the `ε_j (k_f Π − k_r Π)` term from `[M]`; the dependence of
//! falloff constants on `[M]` is neglected.
use super::kinetics_api::Kinetics;
use super::mass_action::{
    StoichTerm, concentration_product, concentration_product_derivative, parse_equation,
    resolve_side,
};
use super::rates::{ArrheniusRate, RateContext, RateEvaluator, RateExpression};
use crate::ReactorsZeroD::errors::ReactorError;
use crate::Thermodynamics::phase::{Phase, ThermoPhase};
use log::{debug, info};
use nalgebra_sparse::{CooMatrix, CscMatrix};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn default_efficiency() -> f64 {
    1.0
}

/// collision efficiencies of a third-body reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdBody {
    #[serde(default = "default_efficiency")]
    pub default_efficiency: f64,
    #[serde(default)]
    pub efficiencies: HashMap<String, f64>,
}

impl Default for ThirdBody {
    fn default() -> Self {
        Self {
            default_efficiency: 1.0,
            efficiencies: HashMap::new(),
        }
    }
}

impl ThirdBody {
    pub fn with_efficiencies(efficiencies: &[(&str, f64)]) -> Self {
        Self {
            default_efficiency: 1.0,
            efficiencies: efficiencies
                .iter()
                .map(|(name, eff)| (name.to_string(), *eff))
                .collect(),
        }
    }
}

/// User-facing reaction record. Stoichiometry comes from `equation`; reversible
/// equations (`<=>`, `=`) need an explicit `reverse_rate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    pub equation: String,
    pub rate: RateExpression,
    #[serde(default)]
    pub reverse_rate: Option<ArrheniusRate>,
    #[serde(default)]
    pub third_body: Option<ThirdBody>,
}

impl Reaction {
    pub fn new(equation: &str, rate: impl Into<RateExpression>) -> Self {
        Self {
            equation: equation.to_string(),
            rate: rate.into(),
            reverse_rate: None,
            third_body: None,
        }
    }
    pub fn with_reverse_rate(mut self, reverse_rate: ArrheniusRate) -> Self {
        self.reverse_rate = Some(reverse_rate);
        self
    }
    pub fn with_third_body(mut self, third_body: ThirdBody) -> Self {
        self.third_body = Some(third_body);
        self
    }
}

#[derive(Debug, Clone)]
struct CompiledReaction {
    reactants: Vec<StoichTerm>,
    products: Vec<StoichTerm>,
    rate: RateExpression,
    reverse_rate: Option<ArrheniusRate>,
    /// per-species third-body efficiencies
    efficiencies: Option<Vec<f64>>,
}

impl CompiledReaction {
    /// `[M]` multiplies the rate of progress
    fn multiplies_by_third_body(&self) -> bool {
        self.efficiencies.is_some() && !self.rate.includes_third_body()
    }

    fn net_stoichiometry(&self) -> Vec<(usize, f64)> {
        let mut nu: Vec<(usize, f64)> = Vec::new();
        let mut add = |k: usize, v: f64| match nu.iter_mut().find(|(s, _)| *s == k) {
            Some(entry) => entry.1 += v,
            None => nu.push((k, v)),
        };
        for t in &self.reactants {
            add(t.species, -t.coefficient);
        }
        for t in &self.products {
            add(t.species, t.coefficient);
        }
        nu
    }
}

/// Mass-action kinetics for the species of one bulk phase.
#[derive(Debug, Clone)]
pub struct GasKinetics {
    n_species: usize,
    reactions: Vec<Reaction>,
    compiled: Vec<CompiledReaction>,
    conc: Vec<f64>,
    x: Vec<f64>,
    kf: Vec<f64>,
    kr: Vec<f64>,
    third_body_conc: Vec<f64>,
}

impl GasKinetics {
    pub fn new(phase: &dyn Phase, reactions: Vec<Reaction>) -> Result<Self, ReactorError> {
        let n_species = phase.n_species();
        let mut compiled = Vec::with_capacity(reactions.len());
        for reaction in &reactions {
            let parsed = parse_equation(&reaction.equation)?;
            let lookup = |name: &str| phase.species_index(name);
            let reactants = resolve_side(&parsed.reactants, lookup, &reaction.equation)?;
            let products = resolve_side(&parsed.products, lookup, &reaction.equation)?;
            if parsed.reversible && reaction.reverse_rate.is_none() {
                return Err(ReactorError::Configuration(format!(
                    "reversible reaction '{}' needs a reverse rate",
                    reaction.equation
                )));
            }
            let third_body = match (&reaction.third_body, parsed.third_body) {
                (Some(tb), _) => Some(tb.clone()),
                (None, true) => Some(ThirdBody::default()),
                (None, false) => None,
            };
            let efficiencies = match third_body {
                Some(tb) => {
                    let mut eff = vec![tb.default_efficiency; n_species];
                    for (name, value) in &tb.efficiencies {
                        let k = phase.species_index(name).ok_or_else(|| {
                            ReactorError::Configuration(format!(
                                "third-body species '{}' of reaction '{}' is unknown",
                                name, reaction.equation
                            ))
                        })?;
                        eff[k] = *value;
                    }
                    Some(eff)
                }
                None => None,
            };
            let mut rate = reaction.rate.clone();
            rate.set_context(phase)?;
            debug!(
                "reaction '{}' compiled with {} rate",
                reaction.equation,
                rate.rate_type()
            );
            compiled.push(CompiledReaction {
                reactants,
                products,
                rate,
                reverse_rate: if parsed.reversible {
                    reaction.reverse_rate
                } else {
                    None
                },
                efficiencies,
            });
        }
        info!(
            "kinetics for phase '{}': {} species, {} reactions",
            phase.name(),
            n_species,
            compiled.len()
        );
        let n_reactions = compiled.len();
        Ok(Self {
            n_species,
            reactions,
            compiled,
            conc: vec![0.0; n_species],
            x: vec![0.0; n_species],
            kf: vec![0.0; n_reactions],
            kr: vec![0.0; n_reactions],
            third_body_conc: vec![0.0; n_reactions],
        })
    }

    /// Builds the mechanism from a JSON array of [`Reaction`] records.
    pub fn from_json(phase: &dyn Phase, json: &str) -> Result<Self, ReactorError> {
        let reactions: Vec<Reaction> = serde_json::from_str(json)?;
        Self::new(phase, reactions)
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    /// forward rate constants at the last evaluated state
    pub fn forward_rate_constants(&self) -> &[f64] {
        &self.kf
    }

    fn update_rates(&mut self, thermo: &dyn ThermoPhase) {
        thermo.concentrations(&mut self.conc);
        thermo.mole_fractions(&mut self.x);
        let t = thermo.temperature();
        let p = thermo.pressure();
        let total: f64 = self.conc.iter().sum();
        for (i, r) in self.compiled.iter().enumerate() {
            let m = match &r.efficiencies {
                Some(eff) => eff.iter().zip(&self.conc).map(|(e, c)| e * c).sum(),
                None => total,
            };
            self.third_body_conc[i] = m;
            let ctx = RateContext::new(t, p, &self.x).with_third_body(m);
            self.kf[i] = r.rate.eval(&ctx);
            self.kr[i] = r.reverse_rate.map(|rev| rev.K_const(t)).unwrap_or(0.0);
        }
    }

    /// rates of progress `q_r`, kmol/(m³·s)
    pub fn rates_of_progress(&mut self, thermo: &dyn ThermoPhase, out: &mut [f64]) {
        self.update_rates(thermo);
        for (i, r) in self.compiled.iter().enumerate() {
            let fwd = self.kf[i] * concentration_product(&r.reactants, &self.conc);
            let rev = self.kr[i] * concentration_product(&r.products, &self.conc);
            let factor = if r.multiplies_by_third_body() {
                self.third_body_conc[i]
            } else {
                1.0
            };
            out[i] = factor * (fwd - rev);
        }
    }
}

impl Kinetics for GasKinetics {
    fn n_species(&self) -> usize {
        self.n_species
    }
    fn n_reactions(&self) -> usize {
        self.compiled.len()
    }

    fn net_production_rates(&mut self, thermo: &dyn ThermoPhase, out: &mut [f64]) {
        let mut q = vec![0.0; self.compiled.len()];
        self.rates_of_progress(thermo, &mut q);
        out.iter_mut().for_each(|w| *w = 0.0);
        for (r, q_r) in self.compiled.iter().zip(&q) {
            for (k, nu) in r.net_stoichiometry() {
                out[k] += nu * q_r;
            }
        }
    }

    fn net_production_rates_ddn(&mut self, thermo: &dyn ThermoPhase) -> CscMatrix<f64> {
        self.update_rates(thermo);
        let mut coo = CooMatrix::new(self.n_species, self.n_species);
        for (i, r) in self.compiled.iter().enumerate() {
            let nu = r.net_stoichiometry();
            let three_body = r.multiplies_by_third_body();
            let factor = if three_body {
                self.third_body_conc[i]
            } else {
                1.0
            };
            let mut columns: Vec<usize> = r
                .reactants
                .iter()
                .chain(&r.products)
                .map(|t| t.species)
                .collect();
            let net_rate = if three_body {
                if let Some(eff) = &r.efficiencies {
                    columns.extend(eff.iter().enumerate().filter(|(_, e)| **e != 0.0).map(|(j, _)| j));
                }
                self.kf[i] * concentration_product(&r.reactants, &self.conc)
                    - self.kr[i] * concentration_product(&r.products, &self.conc)
            } else {
                0.0
            };
            columns.sort_unstable();
            columns.dedup();
            for &j in &columns {
                let mut dq = factor
                    * (self.kf[i] * concentration_product_derivative(&r.reactants, &self.conc, j)
                        - self.kr[i] * concentration_product_derivative(&r.products, &self.conc, j));
                if three_body {
                    if let Some(eff) = &r.efficiencies {
                        dq += eff[j] * net_rate;
                    }
                }
                for &(k, nu_k) in &nu {
                    coo.push(k, j, nu_k * dq);
                }
            }
        }
        CscMatrix::from(&coo)
    }
}
