//! B-spline function spaces and their degree-of-freedom bookkeeping.
//!
//! A [`BsplineSpace1d`] maps elements and facets of a one-dimensional mesh to the basis
//! functions supported there. A [`BsplineSpace2d`] is the tensor product of two such spaces.
//! DOFs of the product space are pairs of one-dimensional DOFs, and every conversion between
//! pairs and linear indices (element-local, facet-local and global) goes through a
//! [`MultiIndexLayout`].
use std::fmt;
use std::fmt::{Display, Formatter};

mod interval;
mod layout;
mod tensor;

pub use interval::*;
pub use layout::*;
pub use tensor::*;

/// A DOF of a tensor-product space, as a pair of x and y DOFs.
pub type DofIndex = (usize, usize);

/// A space with a finite number of degrees of freedom.
pub trait DofSpace {
    fn dof_count(&self) -> usize;
}

impl DofSpace for BsplineSpace1d {
    fn dof_count(&self) -> usize {
        BsplineSpace1d::dof_count(self)
    }
}

impl DofSpace for BsplineSpace2d {
    fn dof_count(&self) -> usize {
        BsplineSpace2d::dof_count(self)
    }
}

/// The trial space of a Petrov–Galerkin discretization has more DOFs than the test space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceDimensionError {
    pub trial: usize,
    pub test: usize,
}

impl Display for SpaceDimensionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dimension of the trial space greater than that of test space ({} > {})",
            self.trial, self.test
        )
    }
}

impl std::error::Error for SpaceDimensionError {}

/// Checks that the trial space does not have more DOFs than the test space.
pub fn check_trial_test_dimensions<Trial, Test>(trial: &Trial, test: &Test) -> Result<(), SpaceDimensionError>
where
    Trial: ?Sized + DofSpace,
    Test: ?Sized + DofSpace,
{
    let (trial, test) = (trial.dof_count(), test.dof_count());
    if trial > test {
        Err(SpaceDimensionError { trial, test })
    } else {
        Ok(())
    }
}
