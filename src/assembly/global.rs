use crate::assembly::buffers::DofBuffer;
use fenris_sparse::TripletMatrix;
use nalgebra::{DMatrix, DVector};

/// Which entries of a local matrix are added to the global system.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ScatterMode {
    All,
    NonZero,
}

/// Adds a local `(test, trial)` matrix to the global system.
///
/// The entry for trial DOF `I` and test DOF `J` is added at the 1-based position
/// `(J + 1, I + 1)`.
pub fn scatter_local_matrix(system: &mut TripletMatrix, local: &DMatrix<f64>, dofs: &DofBuffer, mode: ScatterMode) {
    assert_eq!(local.nrows(), dofs.len());
    assert_eq!(local.ncols(), dofs.len());
    for (&i, &global_i) in dofs.local_indices().iter().zip(dofs.global_indices()) {
        for (&j, &global_j) in dofs.local_indices().iter().zip(dofs.global_indices()) {
            let value = local[(j, i)];
            if mode == ScatterMode::All || value != 0.0 {
                system.add(global_j + 1, global_i + 1, value);
            }
        }
    }
}

pub fn scatter_local_vector(rhs: &mut [f64], local: &DVector<f64>, dofs: &DofBuffer) {
    assert_eq!(local.len(), dofs.len());
    for (&j, &global_j) in dofs.local_indices().iter().zip(dofs.global_indices()) {
        rhs[global_j] += local[j];
    }
}
