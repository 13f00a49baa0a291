//! Surface phase described by site coverages.
use super::NASAdata::NASAdata;
use super::phase::{GAS_CONSTANT, Phase, PhaseKind};
use crate::ReactorsZeroD::errors::ReactorError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSpecies {
    pub name: String,
    /// number of sites occupied by one molecule
    #[serde(default = "one_site")]
    pub size: f64,
    pub thermo: NASAdata,
}

fn one_site() -> f64 {
    1.0
}

impl SurfaceSpecies {
    pub fn new(name: &str, size: f64, thermo: NASAdata) -> Self {
        Self {
            name: name.to_string(),
            size,
            thermo,
        }
    }
}

/// Surface phase: `site_density` in kmol/m², coverages `θ_k` (site fractions).
/// Surface concentration of species `k` is `Γ θ_k / size_k`.
#[derive(Debug, Clone)]
pub struct SurfacePhase {
    name: String,
    species: Vec<SurfaceSpecies>,
    site_density: f64,
    coverages: Vec<f64>,
    t: f64,
}

impl SurfacePhase {
    pub fn new(
        name: &str,
        species: Vec<SurfaceSpecies>,
        site_density: f64,
    ) -> Result<Self, ReactorError> {
        if !(site_density > 0.0) {
            return Err(ReactorError::Configuration(format!(
                "surface '{}' needs a positive site density",
                name
            )));
        }
        if let Some(bad) = species.iter().find(|s| !(s.size > 0.0)) {
            return Err(ReactorError::Configuration(format!(
                "surface species '{}' has non-positive size",
                bad.name
            )));
        }
        let mut coverages = vec![0.0; species.len()];
        if let Some(first) = coverages.first_mut() {
            *first = 1.0;
        }
        Ok(Self {
            name: name.to_string(),
            species,
            site_density,
            coverages,
            t: 300.0,
        })
    }

    pub fn site_density(&self) -> f64 {
        self.site_density
    }
    pub fn size(&self, k: usize) -> f64 {
        self.species[k].size
    }
    pub fn coverages(&self) -> &[f64] {
        &self.coverages
    }

    /// Sets coverages and normalizes them to sum to one.
    pub fn set_coverages(&mut self, theta: &[f64]) -> Result<(), ReactorError> {
        if theta.len() != self.species.len() {
            return Err(ReactorError::Configuration(format!(
                "expected {} coverages, got {}",
                self.species.len(),
                theta.len()
            )));
        }
        let total: f64 = theta.iter().sum();
        if !(total > 0.0) {
            return Err(ReactorError::Configuration(
                "coverages must have a positive sum".to_string(),
            ));
        }
        self.coverages = theta.iter().map(|v| v / total).collect();
        Ok(())
    }

    /// sets coverages as given; used while integrating where sums drift
    pub fn set_coverages_no_norm(&mut self, theta: &[f64]) {
        self.coverages.copy_from_slice(theta);
    }

    pub fn set_temperature(&mut self, t: f64) {
        self.t = t;
    }

    /// kmol/m²
    pub fn concentrations(&self, out: &mut [f64]) {
        for (k, c) in out.iter_mut().enumerate() {
            *c = self.site_density * self.coverages[k] / self.species[k].size;
        }
    }
}

impl Phase for SurfacePhase {
    fn kind(&self) -> PhaseKind {
        PhaseKind::Surface
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn n_species(&self) -> usize {
        self.species.len()
    }
    fn species_name(&self, k: usize) -> Option<&str> {
        self.species.get(k).map(|s| s.name.as_str())
    }
    fn temperature(&self) -> f64 {
        self.t
    }
    fn partial_molar_enthalpies(&self, out: &mut [f64]) {
        let rt = GAS_CONSTANT * self.t;
        for (o, s) in out.iter_mut().zip(&self.species) {
            *o = s.thermo.h_rt(self.t) * rt;
        }
    }
    fn partial_molar_cp(&self, out: &mut [f64]) {
        for (o, s) in out.iter_mut().zip(&self.species) {
            *o = s.thermo.cp_r(self.t) * GAS_CONSTANT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn pt_surface() -> SurfacePhase {
        let species = vec![
            SurfaceSpecies::new("PT(S)", 1.0, NASAdata::constant_cp(0.0, 0.0, 298.15)),
            SurfaceSpecies::new("O2(S)", 2.0, NASAdata::constant_cp(20000.0, 0.0, 298.15)),
        ];
        SurfacePhase::new("Pt_surf", species, 2.7e-8).unwrap()
    }

    #[test]
    fn test_concentrations_use_species_size() {
        let mut surf = pt_surface();
        surf.set_coverages(&[0.5, 0.5]).unwrap();
        let mut c = [0.0; 2];
        surf.concentrations(&mut c);
        assert_relative_eq!(c[0], 2.7e-8 * 0.5);
        assert_relative_eq!(c[1], 2.7e-8 * 0.25);
    }

    #[test]
    fn test_set_coverages_normalizes() {
        let mut surf = pt_surface();
        surf.set_coverages(&[2.0, 2.0]).unwrap();
        assert_relative_eq!(surf.coverages()[0], 0.5);
        assert!(surf.set_coverages(&[0.0, 0.0]).is_err());
        assert!(surf.set_coverages(&[1.0]).is_err());
    }

    #[test]
    fn test_species_lookup() {
        let surf = pt_surface();
        assert_eq!(surf.species_index("O2(S)"), Some(1));
        assert_eq!(surf.species_index("O2"), None);
        assert_eq!(surf.kind(), PhaseKind::Surface);
    }

    #[test]
    fn test_bad_site_density() {
        assert!(SurfacePhase::new("s", vec![], 0.0).is_err());
    }
}
