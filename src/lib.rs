//! Isogeometric and discontinuous Galerkin discretizations on tensor-product B-spline spaces.
//!
//! The crate builds B-spline spaces over structured two-dimensional meshes, assembles
//! weak forms by Gauss quadrature into sparse triplet systems and evaluates the resulting
//! discrete functions. The [`problem`] module ties everything together for the Laplace problem
//! with weakly imposed Dirichlet conditions.

pub mod assembly;
pub mod basis;
pub mod error;
pub mod function;
pub mod io;
pub mod mesh;
pub mod problem;
pub mod quadrature;
pub mod space;

#[cfg(feature = "proptest-support")]
pub mod proptest;

pub extern crate fenris_bspline as bspline;
pub extern crate fenris_quadrature;
pub extern crate fenris_sparse as sparse;
pub extern crate nalgebra;
