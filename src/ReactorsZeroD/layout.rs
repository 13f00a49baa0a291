//! Offsets of the state vector `[T, bulk species..., surface species...]`.
use super::errors::ReactorError;
use std::ops::Range;

/// what lives at a state offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Temperature,
    Bulk(usize),
    Surface { surface: usize, species: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLayout {
    /// offset of the first bulk species
    sidx: usize,
    n_species: usize,
    /// first offset of each surface, then one past the end
    surface_starts: Vec<usize>,
}

impl StateLayout {
    /// `with_temperature` is always true for the constant-pressure mole reactor; the flag
    /// keeps the offset arithmetic independent of that choice.
    pub fn new(
        n_species: usize,
        surface_counts: &[usize],
        with_temperature: bool,
    ) -> Result<Self, ReactorError> {
        if n_species == 0 {
            return Err(ReactorError::Configuration(
                "bulk phase has no species".to_string(),
            ));
        }
        let sidx = usize::from(with_temperature);
        let mut surface_starts = Vec::with_capacity(surface_counts.len() + 1);
        let mut next = sidx + n_species;
        for count in surface_counts {
            surface_starts.push(next);
            next += count;
        }
        surface_starts.push(next);
        Ok(Self {
            sidx,
            n_species,
            surface_starts,
        })
    }

    pub fn sidx(&self) -> usize {
        self.sidx
    }
    pub fn n_species(&self) -> usize {
        self.n_species
    }
    /// total number of state variables
    pub fn nv(&self) -> usize {
        self.surface_starts.last().copied().unwrap_or(self.sidx + self.n_species)
    }
    pub fn n_surfaces(&self) -> usize {
        self.surface_starts.len().saturating_sub(1)
    }
    pub fn species_range(&self) -> Range<usize> {
        self.sidx..self.sidx + self.n_species
    }
    pub fn surface_offset(&self, i: usize) -> usize {
        self.surface_starts[i]
    }
    pub fn surface_range(&self, i: usize) -> Range<usize> {
        self.surface_starts[i]..self.surface_starts[i + 1]
    }

    pub fn locate(&self, offset: usize) -> Option<Slot> {
        if offset >= self.nv() {
            return None;
        }
        if offset < self.sidx {
            return Some(Slot::Temperature);
        }
        if self.species_range().contains(&offset) {
            return Some(Slot::Bulk(offset - self.sidx));
        }
        (0..self.n_surfaces())
            .find(|&i| self.surface_range(i).contains(&offset))
            .map(|i| Slot::Surface {
                surface: i,
                species: offset - self.surface_starts[i],
            })
    }
}

///////////////////////////TESTING////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let layout = StateLayout::new(3, &[2, 1], true).unwrap();
        assert_eq!(layout.sidx(), 1);
        assert_eq!(layout.nv(), 7);
        assert_eq!(layout.species_range(), 1..4);
        assert_eq!(layout.surface_range(0), 4..6);
        assert_eq!(layout.surface_offset(1), 6);
        assert_eq!(layout.locate(0), Some(Slot::Temperature));
        assert_eq!(layout.locate(3), Some(Slot::Bulk(2)));
        assert_eq!(layout.locate(5), Some(Slot::Surface { surface: 0, species: 1 }));
        assert_eq!(layout.locate(6), Some(Slot::Surface { surface: 1, species: 0 }));
        assert_eq!(layout.locate(7), None);
    }

    #[test]
    fn test_empty_surface_and_no_temperature() {
        let layout = StateLayout::new(2, &[0, 1], false).unwrap();
        assert_eq!(layout.sidx(), 0);
        assert_eq!(layout.surface_range(0), 2..2);
        assert_eq!(layout.locate(2), Some(Slot::Surface { surface: 1, species: 0 }));
    }

    #[test]
    fn test_zero_species() {
        assert!(matches!(StateLayout::new(0, &[], true), Err(ReactorError::Configuration(_))));
    }
}
