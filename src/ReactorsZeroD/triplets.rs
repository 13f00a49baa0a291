//! Append-only list of `(row, col, value)` Jacobian contributions, converted once into
//! compressed sparse column form. Duplicate coordinates are summed on conversion.
use super::errors::ReactorError;
use nalgebra_sparse::{CooMatrix, CscMatrix};

#[derive(Debug, Clone)]
pub struct TripletList {
    nrows: usize,
    ncols: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl TripletList {
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self {
            nrows,
            ncols,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn push(&mut self, row: usize, col: usize, value: f64) {
        self.rows.push(row);
        self.cols.push(col);
        self.values.push(value);
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = (usize, usize, f64)>) {
        for (row, col, value) in entries {
            self.push(row, col, value);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((r, c), v)| (*r, *c, *v))
    }

    /// Consumes the list. Out-of-bounds coordinates are reported as `OutOfRange`.
    pub fn assemble(self) -> Result<CscMatrix<f64>, ReactorError> {
        let size = self.nrows.max(self.ncols);
        if let Some(&bad) = self
            .rows
            .iter()
            .find(|&&r| r >= self.nrows)
            .or_else(|| self.cols.iter().find(|&&c| c >= self.ncols))
        {
            return Err(ReactorError::OutOfRange { index: bad, size });
        }
        let coo = CooMatrix::try_from_triplets(self.nrows, self.ncols, self.rows, self.cols, self.values)
            .map_err(|e| ReactorError::Configuration(format!("cannot assemble Jacobian: {}", e)))?;
        Ok(CscMatrix::from(&coo))
    }
}

///////////////////////////TESTING////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    #[test]
    fn test_duplicates_are_summed() {
        let mut t = TripletList::new(2, 2);
        t.push(0, 1, 1.5);
        t.push(0, 1, 2.0);
        t.push(1, 0, -1.0);
        assert_eq!(t.len(), 3);
        let m = DMatrix::from(&t.assemble().unwrap());
        assert_relative_eq!(m[(0, 1)], 3.5);
        assert_relative_eq!(m[(1, 0)], -1.0);
        assert_eq!(m[(0, 0)], 0.0);
    }

    #[test]
    fn test_order_independence() {
        let entries = vec![(0, 0, 1.0), (2, 1, 0.25), (0, 0, 3.0), (1, 2, -2.0), (2, 1, 0.5)];
        let mut forward = TripletList::new(3, 3);
        forward.extend(entries.iter().copied());
        let mut backward = TripletList::new(3, 3);
        backward.extend(entries.iter().rev().copied());
        let a = DMatrix::from(&forward.assemble().unwrap());
        let b = DMatrix::from(&backward.assemble().unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_out_of_bounds() {
        let mut t = TripletList::new(2, 2);
        t.push(2, 0, 1.0);
        assert!(matches!(t.assemble(), Err(ReactorError::OutOfRange { index: 2, .. })));
    }
}
