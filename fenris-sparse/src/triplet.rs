use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CscMatrix};

/// A square sparse matrix in triplet form.
///
/// Entries are added with **1-based** indices. Adding to the same position more than once is
/// allowed; the contributions are summed when the matrix is converted to compressed form.
#[derive(Debug, Clone)]
pub struct TripletMatrix {
    size: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl TripletMatrix {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            rows: Vec::new(),
            cols: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn with_capacity(size: usize, capacity: usize) -> Self {
        Self {
            size,
            rows: Vec::with_capacity(capacity),
            cols: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Number of rows, which equals the number of columns.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds `value` to the entry at the 1-based position `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if either index is zero or larger than the matrix size.
    #[inline]
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        assert!(
            row >= 1 && row <= self.size && col >= 1 && col <= self.size,
            "Index ({row}, {col}) out of bounds for matrix of size {}",
            self.size
        );
        self.rows.push(row - 1);
        self.cols.push(col - 1);
        self.values.push(value);
    }

    /// Number of stored triplets, duplicates included.
    pub fn nonzero_entries(&self) -> usize {
        self.values.len()
    }

    /// Iterates over the stored triplets as 0-based `(row, col, value)`.
    pub fn triplets(&self) -> impl '_ + Iterator<Item = (usize, usize, f64)> {
        self.rows
            .iter()
            .zip(&self.cols)
            .zip(&self.values)
            .map(|((&i, &j), &v)| (i, j, v))
    }

    pub fn to_coo(&self) -> CooMatrix<f64> {
        let mut coo = CooMatrix::new(self.size, self.size);
        for (i, j, v) in self.triplets() {
            coo.push(i, j, v);
        }
        coo
    }

    /// Converts to compressed column form, summing duplicate entries.
    pub fn to_csc(&self) -> CscMatrix<f64> {
        CscMatrix::from(&self.to_coo())
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.size, self.size);
        for (i, j, v) in self.triplets() {
            dense[(i, j)] += v;
        }
        dense
    }
}
