use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// A closed interval `[left, right]` with `left < right`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub left: f64,
    pub right: f64,
}

impl Interval {
    pub fn new(left: f64, right: f64) -> Self {
        assert!(left < right, "Degenerate interval [{left}, {right}]");
        Self { left, right }
    }

    pub fn length(&self) -> f64 {
        (self.right - self.left).abs()
    }

    /// Linear interpolation between the endpoints, `t = 0` giving `left` and `t = 1` `right`.
    pub fn lerp(&self, t: f64) -> f64 {
        (1.0 - t) * self.left + t * self.right
    }

    pub fn midpoint(&self) -> f64 {
        self.lerp(0.5)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.left <= x && x <= self.right
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.left, self.right)
    }
}

/// Position and normal sign of a facet of an interval mesh.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointData {
    pub position: f64,
    pub normal: f64,
}

/// Partition of an interval into consecutive subintervals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalMesh {
    points: Vec<f64>,
}

impl IntervalMesh {
    /// Creates a mesh with the given points as vertices.
    ///
    /// # Panics
    ///
    /// Panics if there are fewer than two points or the points are not strictly increasing.
    pub fn new(points: Vec<f64>) -> Self {
        assert!(points.len() >= 2, "A partition needs at least two points");
        assert!(
            points.windows(2).all(|w| w[0] < w[1]),
            "Partition points must be strictly increasing"
        );
        Self { points }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn element_count(&self) -> usize {
        self.points.len() - 1
    }

    pub fn elements(&self) -> Range<usize> {
        0..self.element_count()
    }

    pub fn subinterval(&self, element: usize) -> Interval {
        assert!(
            element < self.element_count(),
            "Subinterval index {element} out of range (element count {})",
            self.element_count()
        );
        Interval::new(self.points[element], self.points[element + 1])
    }

    pub fn facet_count(&self) -> usize {
        self.points.len()
    }

    pub fn facets(&self) -> Range<usize> {
        0..self.facet_count()
    }

    pub fn boundary_facets(&self) -> [usize; 2] {
        [0, self.points.len() - 1]
    }

    pub fn interior_facets(&self) -> Range<usize> {
        1..self.points.len() - 1
    }

    pub fn is_boundary_facet(&self, facet: usize) -> bool {
        facet == 0 || facet == self.points.len() - 1
    }

    /// Position and normal of the given facet.
    ///
    /// The normal is `-1` for the first point and `+1` for all others. This is the outward
    /// normal at the two boundary points. At interior points it is the normal pointing out of
    /// the element to the left.
    pub fn facet(&self, facet: usize) -> PointData {
        assert!(facet < self.points.len(), "Point index {facet} out of range");
        let normal = if facet > 0 { 1.0 } else { -1.0 };
        PointData {
            position: self.points[facet],
            normal,
        }
    }
}
