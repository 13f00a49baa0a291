//! Mass-action building blocks shared by the gas and interface kinetics managers:
//! parsing of reaction equations, concentration products and their derivatives.
use crate::ReactorsZeroD::errors::ReactorError;
use regex::Regex;

/// one participant of a reaction side
#[derive(Debug, Clone, PartialEq)]
pub struct StoichTerm {
    pub species: usize,
    pub coefficient: f64,
    /// exponent of the concentration in the rate law
    pub order: f64,
}

/// Reaction side as parsed from an equation: `(name, stoichiometric coefficient, order)`.
pub type ParsedSide = Vec<(String, f64, f64)>;

/// parsed reaction equation
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEquation {
    pub reactants: ParsedSide,
    pub products: ParsedSide,
    pub reversible: bool,
    /// `+ M` or `(+M)` found on the reactant side
    pub third_body: bool,
}

/// Parses equations such as `"2H2 + O2 => 2H2O"`, `"A<=>2B"`, `"H + O2 (+M) = HO2 (+M)"`
/// or `"A**0.5 + B -> C"`.
///
/// Separators: `<=>`, `=` (reversible) and `=>`, `->` (irreversible). A leading number is
/// the stoichiometric coefficient; `**x` after a species overrides its reaction order
/// (default: the coefficient). A trailing `_DUP`/`_dup` marker is dropped.
pub fn parse_equation(equation: &str) -> Result<ParsedEquation, ReactorError> {
    let eq = equation.trim();
    let eq = eq
        .strip_suffix("_DUP")
        .or_else(|| eq.strip_suffix("_dup"))
        .unwrap_or(eq);
    let (lhs, rhs, reversible) = if let Some((l, r)) = eq.split_once("<=>") {
        (l, r, true)
    } else if let Some((l, r)) = eq.split_once("=>") {
        (l, r, false)
    } else if let Some((l, r)) = eq.split_once("->") {
        (l, r, false)
    } else if let Some((l, r)) = eq.split_once('=') {
        (l, r, true)
    } else {
        return Err(ReactorError::Configuration(format!(
            "no separator found in reaction equation '{}'",
            equation
        )));
    };
    let (reactants, third_body) = parse_side(lhs, equation)?;
    let (products, _) = parse_side(rhs, equation)?;
    if reactants.is_empty() || products.is_empty() {
        return Err(ReactorError::Configuration(format!(
            "reaction '{}' needs reactants and products",
            equation
        )));
    }
    Ok(ParsedEquation {
        reactants,
        products,
        reversible,
        third_body,
    })
}

/// Splits a reaction side at `+` separators. A `+` is a separator only when the next
/// non-blank character starts a term, so charges such as `O2+` stay in the name.
fn split_terms(side: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (i, c) in side.char_indices() {
        if c != '+' {
            continue;
        }
        let next = side[i + 1..].trim_start().chars().next();
        if next.is_some_and(|n| n.is_ascii_alphanumeric() || n == '.') {
            pieces.push(&side[start..i]);
            start = i + 1;
        }
    }
    pieces.push(&side[start..]);
    pieces
}

fn parse_side(side: &str, equation: &str) -> Result<(ParsedSide, bool), ReactorError> {
    // coefficient, species name, optional `**order`
    let term = Regex::new(
        r"^(?:(\d+(?:\.\d*)?|\.\d+)\s*)?([A-Za-z][^\s*]*)(?:\s*\*\*\s*(\d+(?:\.\d*)?(?:[eE][-+]?\d+)?))?$",
    )
    .map_err(|e| ReactorError::Configuration(format!("term pattern: {}", e)))?;
    let cleaned = side.replace("(+M)", " + M").replace("(+ M)", " + M");
    let mut third_body = false;
    let mut terms: ParsedSide = Vec::new();
    for raw in split_terms(&cleaned) {
        let token = raw.trim();
        if token == "M" {
            third_body = true;
            continue;
        }
        let caps = term.captures(token).ok_or_else(|| {
            ReactorError::Configuration(format!("cannot read term '{}' in '{}'", token, equation))
        })?;
        let coefficient = match caps.get(1) {
            Some(num) => num.as_str().parse::<f64>().map_err(|_| {
                ReactorError::Configuration(format!("bad coefficient '{}' in '{}'", num.as_str(), equation))
            })?,
            None => 1.0,
        };
        let name = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
        let order = match caps.get(3) {
            Some(o) => Some(o.as_str().parse::<f64>().map_err(|_| {
                ReactorError::Configuration(format!("bad order '{}' in '{}'", o.as_str(), equation))
            })?),
            None => None,
        };
        match terms.iter_mut().find(|(n, _, _)| n == name) {
            Some(term) => {
                term.1 += coefficient;
                term.2 = order.unwrap_or(term.1);
            }
            None => terms.push((name.to_string(), coefficient, order.unwrap_or(coefficient))),
        }
    }
    Ok((terms, third_body))
}

/// Resolves parsed names into species indices with `lookup`.
pub fn resolve_side(
    side: &[(String, f64, f64)],
    lookup: impl Fn(&str) -> Option<usize>,
    equation: &str,
) -> Result<Vec<StoichTerm>, ReactorError> {
    side.iter()
        .map(|(name, coefficient, order)| {
            let species = lookup(name).ok_or_else(|| {
                ReactorError::Configuration(format!(
                    "species '{}' of reaction '{}' is unknown",
                    name, equation
                ))
            })?;
            Ok(StoichTerm {
                species,
                coefficient: *coefficient,
                order: *order,
            })
        })
        .collect()
}

fn power(c: f64, order: f64) -> f64 {
    if order == order.trunc() && order.abs() < 32.0 {
        c.powi(order as i32)
    } else {
        c.max(0.0).powf(order)
    }
}

fn power_derivative(c: f64, order: f64) -> f64 {
    if order == 0.0 {
        return 0.0;
    }
    if order == order.trunc() && order.abs() < 32.0 {
        order * c.powi(order as i32 - 1)
    } else if c > 0.0 {
        order * c.powf(order - 1.0)
    } else {
        0.0
    }
}

/// `Π_i C_i^{order_i}`
pub fn concentration_product(terms: &[StoichTerm], conc: &[f64]) -> f64 {
    terms
        .iter()
        .map(|t| power(conc[t.species], t.order))
        .product()
}

/// `∂/∂C_j Π_i C_i^{order_i}`; zero when `j` does not take part.
pub fn concentration_product_derivative(terms: &[StoichTerm], conc: &[f64], j: usize) -> f64 {
    if !terms.iter().any(|t| t.species == j) {
        return 0.0;
    }
    terms
        .iter()
        .map(|t| {
            if t.species == j {
                power_derivative(conc[t.species], t.order)
            } else {
                power(conc[t.species], t.order)
            }
        })
        .product()
}
