//! Names of the state-vector components.
//!
//! `"temperature"` is offset 0, followed by the bulk species and then the species of
//! each surface in attachment order. A name shared by several phases resolves to the
//! first occurrence.
use super::errors::ReactorError;
use super::layout::Slot;
use super::reactor::IdealGasConstPressureMoleReactor;
use crate::Thermodynamics::phase::Phase;
use prettytable::{Table, row};

impl IdealGasConstPressureMoleReactor {
    /// offset of the named component, `None` if the reactor has no such component
    pub fn component_index(&self, name: &str) -> Option<usize> {
        let layout = self.layout.as_ref()?;
        if name == "temperature" {
            return Some(0);
        }
        if let Some(k) = self.thermo.as_deref().and_then(|t| t.species_index(name)) {
            return Some(k + layout.sidx());
        }
        self.surfaces.iter().enumerate().find_map(|(i, surface)| {
            surface
                .thermo()
                .species_index(name)
                .map(|k| k + layout.surface_offset(i))
        })
    }

    pub fn component_name(&self, index: usize) -> Result<String, ReactorError> {
        let out_of_range = ReactorError::OutOfRange {
            index,
            size: self.neq(),
        };
        let Some(layout) = self.layout.as_ref() else {
            return Err(out_of_range);
        };
        let name = match layout.locate(index) {
            Some(Slot::Temperature) => Some("temperature"),
            Some(Slot::Bulk(k)) => self.thermo.as_deref().and_then(|t| t.species_name(k)),
            Some(Slot::Surface { surface, species }) => self
                .surfaces
                .get(surface)
                .and_then(|s| s.thermo().species_name(species)),
            None => None,
        };
        name.map(str::to_string).ok_or(out_of_range)
    }

    /// Table of `offset | component | value` for a state vector of length `neq()`.
    pub fn state_table(&self, y: &[f64]) -> Result<Table, ReactorError> {
        if y.len() != self.neq() {
            return Err(ReactorError::Configuration(format!(
                "state vector has length {}, expected {}",
                y.len(),
                self.neq()
            )));
        }
        let mut table = Table::new();
        table.add_row(row!["offset", "component", "value"]);
        for (i, value) in y.iter().enumerate() {
            table.add_row(row![i, self.component_name(i)?, format!("{:.6e}", value)]);
        }
        Ok(table)
    }

    /// prints the state table of `y` to stdout
    pub fn print_state(&self, y: &[f64]) -> Result<(), ReactorError> {
        let table = self.state_table(y)?;
        println!("reactor '{}'", self.name);
        table.printstd();
        Ok(())
    }
}
