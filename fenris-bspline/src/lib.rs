//! Knot vectors and B-spline basis evaluation.
//!
//! This crate provides the pieces of spline technology that the `fenris-iga` discretization
//! core relies on: construction of clamped knot vectors with prescribed interior continuity,
//! location of knot spans and evaluation of all basis functions that are nonzero in a span,
//! including their derivatives.
//!
//! Basis functions are numbered globally from `0` to `dof_count - 1`. In the knot span `s`
//! the nonzero functions are `s - p, ..., s`, where `p` is the degree; evaluation routines
//! return them in this order.

mod eval;
mod knots;

pub use eval::*;
pub use knots::*;
