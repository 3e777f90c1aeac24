//! Gauss quadrature rules for tensor-product discretizations.
//!
//! The rules are defined on the canonical interval `[-1, 1]` and can be mapped onto any
//! target interval with [`GaussRule::mapped_to`]. Rules on rectangles and edges are formed
//! by the users of this crate as tensor products of one-dimensional rules.

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod univariate;

pub use univariate::{gauss, try_gauss, GaussRule, MAX_GAUSS_POINTS};

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Indicates that a rule satisfying the given requirements is not available.
    NoRuleAvailable {
        /// The number of points that was requested.
        requested_points: usize,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuleAvailable { requested_points } => {
                write!(
                    f,
                    "There is no Gauss rule with {requested_points} points available \
                     (supported: 1 to {MAX_GAUSS_POINTS})"
                )
            }
        }
    }
}

impl std::error::Error for Error {}
