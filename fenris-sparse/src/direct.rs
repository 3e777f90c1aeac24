use crate::TripletMatrix;
use nalgebra::DMatrix;
use nalgebra_sparse::factorization::{CholeskyError, CscCholesky};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    DimensionMismatch { matrix_size: usize, rhs_len: usize },
    NotPositiveDefinite,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { matrix_size, rhs_len } => write!(
                f,
                "Right-hand side of length {rhs_len} does not match matrix of size {matrix_size}"
            ),
            Self::NotPositiveDefinite => write!(f, "Matrix is not positive definite"),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<CholeskyError> for SolveError {
    // Positive definiteness is the only failure mode of the factorization
    fn from(_: CholeskyError) -> Self {
        Self::NotPositiveDefinite
    }
}

/// Direct solver for symmetric positive definite systems.
#[derive(Debug, Clone, Default)]
pub struct DirectSolver {
    _private: (),
}

impl DirectSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves `A x = b` in place: on success, `rhs` holds the solution.
    ///
    /// On failure, `rhs` is left unchanged.
    pub fn solve(&self, matrix: &TripletMatrix, rhs: &mut [f64]) -> Result<(), SolveError> {
        let n = matrix.size();
        if rhs.len() != n {
            return Err(SolveError::DimensionMismatch {
                matrix_size: n,
                rhs_len: rhs.len(),
            });
        }
        if n == 0 {
            return Ok(());
        }

        let cholesky = CscCholesky::factor(&matrix.to_csc())?;
        let b = DMatrix::from_column_slice(n, 1, rhs);
        let x = cholesky.solve(&b);
        rhs.copy_from_slice(x.as_slice());
        Ok(())
    }
}
