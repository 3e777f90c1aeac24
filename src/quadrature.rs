//! Quadrature point sets on elements and edges of a [`RegularMesh`].
use crate::mesh::{ElementIndex, EdgeIndex, Interval, Orientation, RegularMesh};
use fenris_quadrature::{gauss, try_gauss, GaussRule};
use itertools::{Itertools, Product};
use nalgebra::Point2;
use std::ops::Range;

/// An ordered set of quadrature points with weights.
pub trait QuadraturePoints {
    type Point;
    type Index: Copy;
    type Indices: Iterator<Item = Self::Index>;

    fn indices(&self) -> Self::Indices;

    fn coords(&self, q: Self::Index) -> Self::Point;

    fn weight(&self, q: Self::Index) -> f64;

    fn data(&self, q: Self::Index) -> (Self::Point, f64) {
        (self.coords(q), self.weight(q))
    }

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A Gauss rule mapped onto an interval.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalQuadraturePoints {
    rule: GaussRule,
}

impl IntervalQuadraturePoints {
    pub fn new(reference: &GaussRule, target: Interval) -> Self {
        Self {
            rule: reference.mapped_to(target.left, target.right),
        }
    }

    pub fn points(&self) -> &[f64] {
        self.rule.points()
    }

    pub fn weights(&self) -> &[f64] {
        self.rule.weights()
    }
}

impl QuadraturePoints for IntervalQuadraturePoints {
    type Point = f64;
    type Index = usize;
    type Indices = Range<usize>;

    fn indices(&self) -> Range<usize> {
        0..self.rule.len()
    }

    fn coords(&self, q: usize) -> f64 {
        self.rule.points()[q]
    }

    fn weight(&self, q: usize) -> f64 {
        self.rule.weights()[q]
    }

    fn len(&self) -> usize {
        self.rule.len()
    }
}

/// Tensor product of two interval rules, covering a rectangular element.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorQuadraturePoints {
    points_x: IntervalQuadraturePoints,
    points_y: IntervalQuadraturePoints,
}

impl TensorQuadraturePoints {
    pub fn new(points_x: IntervalQuadraturePoints, points_y: IntervalQuadraturePoints) -> Self {
        Self { points_x, points_y }
    }

    pub fn xs(&self) -> &[f64] {
        self.points_x.points()
    }

    pub fn ys(&self) -> &[f64] {
        self.points_y.points()
    }
}

impl QuadraturePoints for TensorQuadraturePoints {
    type Point = Point2<f64>;
    type Index = (usize, usize);
    type Indices = Product<Range<usize>, Range<usize>>;

    fn indices(&self) -> Self::Indices {
        self.points_x
            .indices()
            .cartesian_product(self.points_y.indices())
    }

    fn coords(&self, (qx, qy): (usize, usize)) -> Point2<f64> {
        Point2::new(self.points_x.coords(qx), self.points_y.coords(qy))
    }

    fn weight(&self, (qx, qy): (usize, usize)) -> f64 {
        self.points_x.weight(qx) * self.points_y.weight(qy)
    }

    fn len(&self) -> usize {
        self.points_x.len() * self.points_y.len()
    }
}

/// Interval rule along the free axis of an edge, placed at the edge's fixed coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeQuadraturePoints {
    points: IntervalQuadraturePoints,
    position: f64,
    direction: Orientation,
}

impl EdgeQuadraturePoints {
    pub fn new(points: IntervalQuadraturePoints, position: f64, direction: Orientation) -> Self {
        Self {
            points,
            position,
            direction,
        }
    }

    /// Coordinates along the free axis.
    pub fn points(&self) -> &[f64] {
        self.points.points()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn direction(&self) -> Orientation {
        self.direction
    }
}

impl QuadraturePoints for EdgeQuadraturePoints {
    type Point = Point2<f64>;
    type Index = usize;
    type Indices = Range<usize>;

    fn indices(&self) -> Range<usize> {
        self.points.indices()
    }

    fn coords(&self, q: usize) -> Point2<f64> {
        let s = self.points.coords(q);
        match self.direction {
            Orientation::Horizontal => Point2::new(s, self.position),
            Orientation::Vertical => Point2::new(self.position, s),
        }
    }

    fn weight(&self, q: usize) -> f64 {
        self.points.weight(q)
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Gauss quadrature with a fixed number of points per axis on the elements and edges of a mesh.
#[derive(Debug, Clone)]
pub struct MeshQuadrature<'a> {
    mesh: &'a RegularMesh,
    rule: GaussRule,
}

impl<'a> MeshQuadrature<'a> {
    /// # Panics
    ///
    /// Panics if `point_count` is zero.
    pub fn new(mesh: &'a RegularMesh, point_count: usize) -> Self {
        Self {
            mesh,
            rule: gauss(point_count),
        }
    }

    pub fn try_new(mesh: &'a RegularMesh, point_count: usize) -> Result<Self, fenris_quadrature::Error> {
        Ok(Self {
            mesh,
            rule: try_gauss(point_count)?,
        })
    }

    pub fn mesh(&self) -> &'a RegularMesh {
        self.mesh
    }

    /// Number of points per axis.
    pub fn point_count(&self) -> usize {
        self.rule.len()
    }

    pub fn element_points(&self, element: ElementIndex) -> TensorQuadraturePoints {
        let data = self.mesh.element(element);
        TensorQuadraturePoints::new(
            IntervalQuadraturePoints::new(&self.rule, data.span_x),
            IntervalQuadraturePoints::new(&self.rule, data.span_y),
        )
    }

    pub fn facet_points(&self, facet: EdgeIndex) -> EdgeQuadraturePoints {
        let edge = self.mesh.facet(facet);
        EdgeQuadraturePoints::new(
            IntervalQuadraturePoints::new(&self.rule, edge.span),
            edge.position,
            edge.direction,
        )
    }
}
