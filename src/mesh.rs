//! Structured meshes: partitions of intervals and their tensor products.
//!
//! An [`IntervalMesh`] partitions an interval into elements by a strictly increasing sequence
//! of points. Its facets are the points themselves. A [`RegularMesh`] is the tensor product of
//! two interval meshes. Its facets are edges, identified by an [`EdgeIndex`].
mod interval;
mod regular;

pub mod procedural;

pub use interval::*;
pub use regular::*;
