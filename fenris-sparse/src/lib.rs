//! Sparse matrix assembly and direct solves.
//!
//! Matrices are accumulated as unordered triplets in a [`TripletMatrix`], where repeated
//! entries are summed, and solved with a sparse Cholesky factorization from `nalgebra-sparse`.

mod direct;
mod triplet;

pub use direct::*;
pub use triplet::*;
