#![allow(non_snake_case)]
//! # Rate-constant expressions
//!
//! The set of supported rate kinds is closed, so it is a tagged union
//! ([`RateExpression`]) dispatched through one `match` per call (generated by
//! `enum_dispatch`) instead of open-ended trait objects.
//!
//! | kind | constant |
//! |------|----------|
//! | `arrhenius` | `A T^b exp(-Ea/RT)` |
//! | `falloff` | `k∞ Pr/(1+Pr) F`, `Pr = k0 [M]/k∞`, Lindemann (`F = 1`) or Troe |
//! | `pressure-dependent-arrhenius` | P-log: `ln k` linear in `ln P` between tabulated pressures |
//! | `chebyshev` | `log10 k = Σ α_tp φ_t(T̃) φ_p(P̃)` |
//! | `linear-burke` | LMR-R: `Σ_i k_i(T, P ε_mix/ε_i) X_i ε_i/ε_mix` |
//!
//! Units: kmol, m, s, J/kmol for activation energies.
use crate::ReactorsZeroD::errors::ReactorError;
use crate::Thermodynamics::phase::{GAS_CONSTANT, Phase};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

/// Everything a rate constant may depend on, evaluated once per kinetics call.
#[derive(Debug, Clone, Copy)]
pub struct RateContext<'a> {
    pub temperature: f64,
    pub pressure: f64,
    /// third-body concentration [M] seen by the reaction, kmol/m³
    pub third_body_concentration: f64,
    pub mole_fractions: &'a [f64],
}

impl<'a> RateContext<'a> {
    pub fn new(temperature: f64, pressure: f64, mole_fractions: &'a [f64]) -> Self {
        Self {
            temperature,
            pressure,
            third_body_concentration: pressure / (GAS_CONSTANT * temperature),
            mole_fractions,
        }
    }
    pub fn with_third_body(mut self, concentration: f64) -> Self {
        self.third_body_concentration = concentration;
        self
    }
    pub fn log_p(&self) -> f64 {
        self.pressure.ln()
    }
}

#[enum_dispatch]
pub trait RateEvaluator {
    /// rate constant at the given conditions
    fn eval(&self, ctx: &RateContext) -> f64;
    fn rate_type(&self) -> &'static str;
    /// true when [M] already enters the constant (falloff) rather than the rate of progress
    fn includes_third_body(&self) -> bool {
        false
    }
    /// resolve species names against the phase the rate is evaluated in
    fn set_context(&mut self, _phase: &dyn Phase) -> Result<(), ReactorError> {
        Ok(())
    }
}

/// closed set of supported rate kinds
#[enum_dispatch(RateEvaluator)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RateExpression {
    Arrhenius(ArrheniusRate),
    Falloff(FalloffRate),
    #[serde(rename = "pressure-dependent-arrhenius")]
    Plog(PlogRate),
    Chebyshev(ChebyshevRate),
    LinearBurke(LinearBurkeRate),
}

/////////////////////////ARRHENIUS///////////////////////////////////////////////////////////////
/// simplest form of kinetic constant `A*T^b*exp(-Ea/(R*T))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrheniusRate {
    #[serde(rename = "A")]
    pub A: f64,
    pub b: f64,
    #[serde(rename = "Ea")]
    pub Ea: f64,
}

impl ArrheniusRate {
    pub fn new(A: f64, b: f64, Ea: f64) -> Self {
        Self { A, b, Ea }
    }
    pub fn K_const(&self, Temp: f64) -> f64 {
        if self.b == 0.0 && self.Ea == 0.0 {
            return self.A;
        }
        self.A * Temp.powf(self.b) * f64::exp(-self.Ea / (GAS_CONSTANT * Temp))
    }
}

impl RateEvaluator for ArrheniusRate {
    fn eval(&self, ctx: &RateContext) -> f64 {
        self.K_const(ctx.temperature)
    }
    fn rate_type(&self) -> &'static str {
        "arrhenius"
    }
}

/////////////////////////FALLOFF///////////////////////////////////////////////////////////////
/// Lindemann falloff, or Troe falloff when `troe` holds `[A, T3, T1]` or `[A, T3, T1, T2]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FalloffRate {
    pub low_rate: ArrheniusRate,
    pub high_rate: ArrheniusRate,
    #[serde(default)]
    pub troe: Option<Vec<f64>>,
}

impl FalloffRate {
    pub fn new(low_rate: ArrheniusRate, high_rate: ArrheniusRate, troe: Option<Vec<f64>>) -> Self {
        Self {
            low_rate,
            high_rate,
            troe,
        }
    }

    fn F_cent(troe: &[f64], Temp: f64) -> f64 {
        let A = troe[0];
        let T_3 = troe[1];
        let T_1 = troe[2];
        let mut F_c = (1.0 - A) * f64::exp(-Temp / T_3) + A * f64::exp(-Temp / T_1);
        if let Some(&T_2) = troe.get(3) {
            F_c += f64::exp(-T_2 / Temp);
        }
        F_c
    }

    /// rate constant at temperature `Temp` and third-body concentration `M`
    pub fn K_const(&self, Temp: f64, M: f64) -> f64 {
        let K0 = self.low_rate.K_const(Temp);
        let K_inf = self.high_rate.K_const(Temp);
        if K_inf == 0.0 {
            return 0.0;
        }
        // [M] may be transiently non-positive under perturbation; keep logs finite
        let P_r = (K0 * M / K_inf).max(f64::MIN_POSITIVE);
        let lindemann = K_inf * (P_r / (1.0 + P_r));
        match &self.troe {
            Some(troe) if troe.len() >= 3 => {
                let log_F_c = Self::F_cent(troe, Temp).max(f64::MIN_POSITIVE).log10();
                let C = -0.4 - 0.67 * log_F_c;
                let N = 0.75 - 1.27 * log_F_c;
                let f_1 = (P_r.log10() + C) / (N - 0.14 * (P_r.log10() + C));
                let F = 10.0_f64.powf(log_F_c / (1.0 + f_1.powi(2)));
                lindemann * F
            }
            _ => lindemann,
        }
    }
}

impl RateEvaluator for FalloffRate {
    fn eval(&self, ctx: &RateContext) -> f64 {
        self.K_const(ctx.temperature, ctx.third_body_concentration)
    }
    fn rate_type(&self) -> &'static str {
        if self.troe.is_some() { "troe" } else { "lindemann" }
    }
    fn includes_third_body(&self) -> bool {
        true
    }
}

/////////////////////////PRESSURE DEPENDENT (P-LOG)///////////////////////////////////////////////////////////////
/// Arrhenius expressions tabulated at pressures (Pa), interpolated linearly in `ln k`
/// versus `ln P`. Outside the table the nearest pressure is used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlogRate {
    pub rates: Vec<(f64, ArrheniusRate)>,
}

impl PlogRate {
    pub fn new(mut rates: Vec<(f64, ArrheniusRate)>) -> Result<Self, ReactorError> {
        if rates.is_empty() {
            return Err(ReactorError::Configuration(
                "P-log rate needs at least one pressure".to_string(),
            ));
        }
        if rates.iter().any(|(p, _)| !(*p > 0.0)) {
            return Err(ReactorError::Configuration(
                "P-log pressures must be positive".to_string(),
            ));
        }
        rates.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(Self { rates })
    }

    pub fn K_const(&self, Temp: f64, log_P: f64) -> f64 {
        let (Some(first), Some(last)) = (self.rates.first(), self.rates.last()) else {
            return 0.0;
        };
        if log_P <= first.0.ln() {
            return first.1.K_const(Temp);
        }
        if log_P >= last.0.ln() {
            return last.1.K_const(Temp);
        }
        let i = self
            .rates
            .iter()
            .position(|(p, _)| p.ln() >= log_P)
            .unwrap_or(self.rates.len() - 1)
            .max(1);
        let (p_low, arr_low) = &self.rates[i - 1];
        let (p_high, arr_high) = &self.rates[i];
        let ln_k_low = arr_low.K_const(Temp).ln();
        let ln_k_high = arr_high.K_const(Temp).ln();
        let w = (log_P - p_low.ln()) / (p_high.ln() - p_low.ln());
        (ln_k_low + w * (ln_k_high - ln_k_low)).exp()
    }
}

impl RateEvaluator for PlogRate {
    fn eval(&self, ctx: &RateContext) -> f64 {
        self.K_const(ctx.temperature, ctx.log_p())
    }
    fn rate_type(&self) -> &'static str {
        "pressure-dependent-arrhenius"
    }
}

/////////////////////////CHEBYSHEV///////////////////////////////////////////////////////////////
/// Chebyshev fit: `coeffs[t][p]`, temperature range in K, pressure range in Pa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChebyshevRate {
    pub temperature_range: (f64, f64),
    pub pressure_range: (f64, f64),
    pub coeffs: Vec<Vec<f64>>,
}

fn chebyshev_values(x: f64, n: usize, out: &mut Vec<f64>) {
    out.clear();
    for i in 0..n {
        let v = match i {
            0 => 1.0,
            1 => x,
            _ => 2.0 * x * out[i - 1] - out[i - 2],
        };
        out.push(v);
    }
}

impl ChebyshevRate {
    pub fn new(
        temperature_range: (f64, f64),
        pressure_range: (f64, f64),
        coeffs: Vec<Vec<f64>>,
    ) -> Result<Self, ReactorError> {
        let n_p = coeffs.first().map(|row| row.len()).unwrap_or(0);
        if n_p == 0 || coeffs.iter().any(|row| row.len() != n_p) {
            return Err(ReactorError::Configuration(
                "Chebyshev coefficients must form a non-empty rectangular table".to_string(),
            ));
        }
        if !(temperature_range.0 < temperature_range.1 && 0.0 < pressure_range.0 && pressure_range.0 < pressure_range.1) {
            return Err(ReactorError::Configuration(
                "invalid Chebyshev temperature or pressure range".to_string(),
            ));
        }
        Ok(Self {
            temperature_range,
            pressure_range,
            coeffs,
        })
    }

    pub fn K_const(&self, Temp: f64, log_P: f64) -> f64 {
        let (t_min, t_max) = self.temperature_range;
        let (p_min, p_max) = self.pressure_range;
        let t_red = (2.0 / Temp - 1.0 / t_min - 1.0 / t_max) / (1.0 / t_max - 1.0 / t_min);
        let log10_p = log_P / std::f64::consts::LN_10;
        let p_red = (2.0 * log10_p - p_min.log10() - p_max.log10()) / (p_max.log10() - p_min.log10());
        let n_p = self.coeffs.first().map(|row| row.len()).unwrap_or(0);
        let mut phi_t = Vec::with_capacity(self.coeffs.len());
        let mut phi_p = Vec::with_capacity(n_p);
        chebyshev_values(t_red, self.coeffs.len(), &mut phi_t);
        chebyshev_values(p_red, n_p, &mut phi_p);
        let mut log10_k = 0.0;
        for (row, ft) in self.coeffs.iter().zip(&phi_t) {
            for (a, fp) in row.iter().zip(&phi_p) {
                log10_k += a * ft * fp;
            }
        }
        10.0_f64.powf(log10_k)
    }
}

impl RateEvaluator for ChebyshevRate {
    fn eval(&self, ctx: &RateContext) -> f64 {
        self.K_const(ctx.temperature, ctx.log_p())
    }
    fn rate_type(&self) -> &'static str {
        "chebyshev"
    }
}

/////////////////////////LINEAR MIXTURE RULE (LMR-R)///////////////////////////////////////////////////////////////
/// pressure-dependent rate used for one collider of an LMR-R reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PressureRate {
    #[serde(rename = "pressure-dependent-arrhenius")]
    Plog(PlogRate),
    Troe(FalloffRate),
    Chebyshev(ChebyshevRate),
}

impl PressureRate {
    /// rate constant at temperature `Temp` and effective pressure `exp(log_P)`
    pub fn K_const(&self, Temp: f64, log_P: f64) -> f64 {
        match self {
            PressureRate::Plog(rate) => rate.K_const(Temp, log_P),
            PressureRate::Troe(rate) => rate.K_const(Temp, log_P.exp() / (GAS_CONSTANT * Temp)),
            PressureRate::Chebyshev(rate) => rate.K_const(Temp, log_P),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub name: String,
    /// third-body efficiency relative to the reference collider "M"
    pub efficiency: ArrheniusRate,
    pub rate: PressureRate,
}

/// Reduced-pressure linear mixture rule.
///
/// With `ε_mix = Σ_i X_i ε_i(T) + X_M`, each explicit collider contributes its own
/// pressure-dependent constant evaluated at `P ε_mix / ε_i`, weighted by `X_i ε_i / ε_mix`;
/// the remaining mixture contributes the "M" constant at `P ε_mix` weighted by
/// `X_M / ε_mix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearBurkeRate {
    pub colliders: Vec<Collider>,
    #[serde(rename = "M")]
    pub reference: PressureRate,
    #[serde(skip)]
    collider_indices: Vec<usize>,
}

impl LinearBurkeRate {
    pub fn new(colliders: Vec<Collider>, reference: PressureRate) -> Self {
        Self {
            colliders,
            reference,
            collider_indices: Vec::new(),
        }
    }

    pub fn K_const(&self, Temp: f64, log_P: f64, mole_fractions: &[f64]) -> f64 {
        let mut eps = Vec::with_capacity(self.colliders.len());
        let mut x_colliders = 0.0;
        let mut eps_mix = 0.0;
        for (collider, &k) in self.colliders.iter().zip(&self.collider_indices) {
            let x = mole_fractions.get(k).copied().unwrap_or(0.0);
            let e = collider.efficiency.K_const(Temp);
            eps.push(e);
            x_colliders += x;
            eps_mix += x * e;
        }
        let x_m = 1.0 - x_colliders;
        eps_mix += x_m;
        if !(eps_mix > 0.0) {
            return self.reference.K_const(Temp, log_P);
        }
        let log_eps_mix = eps_mix.ln();
        let mut k_lmr = 0.0;
        for ((collider, &k), e) in self.colliders.iter().zip(&self.collider_indices).zip(&eps) {
            let x = mole_fractions.get(k).copied().unwrap_or(0.0);
            if x == 0.0 || !(*e > 0.0) {
                continue;
            }
            let log_P_eff = log_P + log_eps_mix - e.ln();
            k_lmr += collider.rate.K_const(Temp, log_P_eff) * x * e / eps_mix;
        }
        k_lmr += self.reference.K_const(Temp, log_P + log_eps_mix) * x_m / eps_mix;
        k_lmr
    }
}

impl RateEvaluator for LinearBurkeRate {
    fn eval(&self, ctx: &RateContext) -> f64 {
        self.K_const(ctx.temperature, ctx.log_p(), ctx.mole_fractions)
    }
    fn rate_type(&self) -> &'static str {
        "linear-burke"
    }
    fn set_context(&mut self, phase: &dyn Phase) -> Result<(), ReactorError> {
        let mut indices = Vec::with_capacity(self.colliders.len());
        for collider in &self.colliders {
            let k = phase.species_index(&collider.name).ok_or_else(|| {
                ReactorError::Configuration(format!(
                    "collider '{}' of a linear-burke rate is not a species of phase '{}'",
                    collider.name,
                    phase.name()
                ))
            })?;
            if indices.contains(&k) {
                return Err(ReactorError::Configuration(format!(
                    "collider '{}' is listed twice",
                    collider.name
                )));
            }
            indices.push(k);
        }
        self.collider_indices = indices;
        Ok(())
    }
}

///////////////////////////TESTING////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thermodynamics::NASAdata::NASAdata;
    use crate::Thermodynamics::ideal_gas::{GasSpecies, IdealGasPhase};
    use crate::Thermodynamics::phase::ONE_ATM;
    use approx::assert_relative_eq;

    fn phase() -> IdealGasPhase {
        let th = NASAdata::constant_cp(29000.0, 0.0, 298.15);
        IdealGasPhase::new(
            "gas",
            vec![
                GasSpecies::new("H2O", 18.0, th.clone()),
                GasSpecies::new("AR", 40.0, th.clone()),
                GasSpecies::new("N2", 28.0, th),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_arrhenius() {
        let k = ArrheniusRate::new(1.0e10, 0.5, 8.0e7);
        let t: f64 = 1200.0;
        let expected = 1.0e10 * t.powf(0.5) * (-8.0e7 / (GAS_CONSTANT * t)).exp();
        let x = [1.0];
        let ctx = RateContext::new(t, ONE_ATM, &x);
        let rate: RateExpression = k.into();
        assert_relative_eq!(rate.eval(&ctx), expected, max_relative = 1e-12);
        assert_eq!(rate.rate_type(), "arrhenius");
        assert!(!rate.includes_third_body());
    }

    #[test]
    fn test_lindemann_limits() {
        let fall = FalloffRate::new(
            ArrheniusRate::new(1.0e6, 0.0, 0.0),
            ArrheniusRate::new(10.0, 0.0, 0.0),
            None,
        );
        // low-pressure limit: k ≈ k0 [M]
        assert_relative_eq!(fall.K_const(1000.0, 1e-9), 1.0e6 * 1e-9, max_relative = 1e-3);
        // high-pressure limit: k ≈ k∞
        assert_relative_eq!(fall.K_const(1000.0, 1e6), 10.0, max_relative = 1e-3);
        assert_eq!(fall.rate_type(), "lindemann");
    }

    #[test]
    fn test_troe_is_below_lindemann() {
        let low = ArrheniusRate::new(1.0e6, 0.0, 0.0);
        let high = ArrheniusRate::new(10.0, 0.0, 0.0);
        let lind = FalloffRate::new(low, high, None);
        let troe = FalloffRate::new(low, high, Some(vec![0.5, 100.0, 1000.0]));
        let m = 1.0e-5;
        assert!(troe.K_const(1000.0, m) < lind.K_const(1000.0, m));
        assert!(troe.K_const(1000.0, m) > 0.0);
    }

    #[test]
    fn test_plog_interpolation() {
        let plog = PlogRate::new(vec![
            (10.0 * ONE_ATM, ArrheniusRate::new(100.0, 0.0, 0.0)),
            (ONE_ATM, ArrheniusRate::new(1.0, 0.0, 0.0)),
        ])
        .unwrap();
        assert_relative_eq!(plog.K_const(1000.0, ONE_ATM.ln()), 1.0, max_relative = 1e-12);
        // geometric midpoint in pressure is the geometric midpoint in k
        let p_mid = (ONE_ATM * 10.0 * ONE_ATM).sqrt();
        assert_relative_eq!(plog.K_const(1000.0, p_mid.ln()), 10.0, max_relative = 1e-10);
        // clamped outside the table
        assert_relative_eq!(plog.K_const(1000.0, (1e3 * ONE_ATM).ln()), 100.0, max_relative = 1e-12);
        assert!(PlogRate::new(vec![]).is_err());
    }

    #[test]
    fn test_chebyshev_constant_term() {
        let cheb = ChebyshevRate::new((300.0, 2000.0), (1000.0, 1.0e7), vec![vec![2.0, 0.0], vec![0.0, 0.0]])
            .unwrap();
        assert_relative_eq!(cheb.K_const(800.0, ONE_ATM.ln()), 100.0, max_relative = 1e-12);
        // T̃ = 1 at T_max and -1 at T_min, φ1 = T̃
        let cheb = ChebyshevRate::new((300.0, 2000.0), (1000.0, 1.0e7), vec![vec![1.0], vec![1.0]]).unwrap();
        assert_relative_eq!(cheb.K_const(2000.0, ONE_ATM.ln()), 100.0, max_relative = 1e-10);
        assert_relative_eq!(cheb.K_const(300.0, ONE_ATM.ln()), 1.0, max_relative = 1e-10);
        assert!(ChebyshevRate::new((300.0, 2000.0), (1.0, 10.0), vec![vec![1.0], vec![]]).is_err());
    }

    fn plog_const(k: f64) -> PressureRate {
        PressureRate::Plog(PlogRate::new(vec![(ONE_ATM, ArrheniusRate::new(k, 0.0, 0.0))]).unwrap())
    }

    #[test]
    fn test_linear_burke_pure_reference_mixture() {
        let mut lmr = LinearBurkeRate::new(
            vec![Collider {
                name: "H2O".to_string(),
                efficiency: ArrheniusRate::new(5.0, 0.0, 0.0),
                rate: plog_const(7.0),
            }],
            plog_const(3.0),
        );
        let gas = phase();
        lmr.set_context(&gas).unwrap();
        // no explicit collider present -> reference rate
        assert_relative_eq!(lmr.K_const(1000.0, ONE_ATM.ln(), &[0.0, 0.5, 0.5]), 3.0, max_relative = 1e-12);
        // pure collider -> its own rate
        assert_relative_eq!(lmr.K_const(1000.0, ONE_ATM.ln(), &[1.0, 0.0, 0.0]), 7.0, max_relative = 1e-12);
        // mixture: weights X_i ε_i / ε_mix
        let k = lmr.K_const(1000.0, ONE_ATM.ln(), &[0.5, 0.5, 0.0]);
        let eps_mix = 0.5 * 5.0 + 0.5;
        assert_relative_eq!(k, 7.0 * 2.5 / eps_mix + 3.0 * 0.5 / eps_mix, max_relative = 1e-12);
    }

    #[test]
    fn test_linear_burke_unknown_collider() {
        let mut lmr = LinearBurkeRate::new(
            vec![Collider {
                name: "CO2".to_string(),
                efficiency: ArrheniusRate::new(1.0, 0.0, 0.0),
                rate: plog_const(1.0),
            }],
            plog_const(1.0),
        );
        assert!(matches!(lmr.set_context(&phase()), Err(ReactorError::Configuration(_))));
    }

    #[test]
    fn test_rate_expression_serde_tags() {
        let json = r#"{"type": "falloff", "low_rate": {"A": 1.0, "b": 0.0, "Ea": 0.0},
                       "high_rate": {"A": 2.0, "b": 0.0, "Ea": 0.0}, "troe": [0.5, 100.0, 1000.0]}"#;
        let rate: RateExpression = serde_json::from_str(json).unwrap();
        assert!(matches!(rate, RateExpression::Falloff(_)));
        assert_eq!(rate.rate_type(), "troe");
        let value = serde_json::to_value(&RateExpression::from(ArrheniusRate::new(1.0, 0.0, 0.0))).unwrap();
        assert_eq!(value["type"], "arrhenius");
    }
}
