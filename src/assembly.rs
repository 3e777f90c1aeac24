//! Assembly of global linear systems from element and facet contributions.
//!
//! Local matrices and vectors are accumulated by quadrature over one element or edge at a
//! time ([`local`]) and then scattered into a global triplet system ([`global`]). The forms of
//! the interior-penalty discretization of the Laplace problem live in [`laplace`].
pub mod buffers;
pub mod global;
pub mod laplace;
pub mod local;
