use crate::basis::{evaluate_basis_on_element, evaluate_basis_on_facet, BasisValues, VertexBasisValues};
use crate::function::FunctionValue2d;
use crate::mesh::{EdgeIndex, ElementIndex, Orientation};
use crate::quadrature::{EdgeQuadraturePoints, TensorQuadraturePoints};
use crate::space::{BsplineSpace1d, DofIndex, MultiIndexLayout};
use fenris_bspline::BsplineBasis;
use itertools::{Itertools, Product};
use std::ops::Range;

/// Evaluation of basis functions at the points of a quadrature point set.
pub trait DofEvaluator {
    type PointIndex: Copy;

    fn evaluate(&self, dof: DofIndex, q: Self::PointIndex) -> FunctionValue2d;
}

/// Tensor product of two one-dimensional B-spline spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct BsplineSpace2d {
    space_x: BsplineSpace1d,
    space_y: BsplineSpace1d,
}

impl BsplineSpace2d {
    pub fn new(basis_x: BsplineBasis, basis_y: BsplineBasis) -> Self {
        Self::from_spaces(BsplineSpace1d::new(basis_x), BsplineSpace1d::new(basis_y))
    }

    pub fn from_spaces(space_x: BsplineSpace1d, space_y: BsplineSpace1d) -> Self {
        Self { space_x, space_y }
    }

    pub fn space_x(&self) -> &BsplineSpace1d {
        &self.space_x
    }

    pub fn space_y(&self) -> &BsplineSpace1d {
        &self.space_y
    }

    pub fn dof_count(&self) -> usize {
        self.global_layout().len()
    }

    pub fn element_dof_count(&self, element: ElementIndex) -> usize {
        self.element_layout(element).len()
    }

    pub fn facet_dof_count(&self, facet: EdgeIndex) -> usize {
        self.facet_layout(facet).len()
    }

    pub fn dofs(&self) -> Product<Range<usize>, Range<usize>> {
        self.space_x.dofs().cartesian_product(self.space_y.dofs())
    }

    pub fn dofs_on_element(&self, element: ElementIndex) -> Product<Range<usize>, Range<usize>> {
        let (ex, ey) = element;
        self.space_x
            .dofs_on_element(ex)
            .cartesian_product(self.space_y.dofs_on_element(ey))
    }

    pub fn dofs_on_facet(&self, facet: EdgeIndex) -> Product<Range<usize>, Range<usize>> {
        let EdgeIndex { ix, iy, dir } = facet;
        match dir {
            Orientation::Horizontal => self
                .space_x
                .dofs_on_element(ix)
                .cartesian_product(self.space_y.dofs_on_facet(iy)),
            Orientation::Vertical => self
                .space_x
                .dofs_on_facet(ix)
                .cartesian_product(self.space_y.dofs_on_element(iy)),
        }
    }

    /// Layout of the element-local DOF pairs.
    pub fn element_layout(&self, element: ElementIndex) -> MultiIndexLayout {
        let (ex, ey) = element;
        MultiIndexLayout::new([
            self.space_x.element_dof_count(ex),
            self.space_y.element_dof_count(ey),
        ])
    }

    /// Layout of the facet-local DOF pairs.
    pub fn facet_layout(&self, facet: EdgeIndex) -> MultiIndexLayout {
        let EdgeIndex { ix, iy, dir } = facet;
        match dir {
            Orientation::Horizontal => MultiIndexLayout::new([
                self.space_x.element_dof_count(ix),
                self.space_y.facet_dof_count(iy),
            ]),
            Orientation::Vertical => MultiIndexLayout::new([
                self.space_x.facet_dof_count(ix),
                self.space_y.element_dof_count(iy),
            ]),
        }
    }

    pub fn global_layout(&self) -> MultiIndexLayout {
        MultiIndexLayout::new([self.space_x.dof_count(), self.space_y.dof_count()])
    }

    /// Pair of one-dimensional element-local indices of the DOF.
    pub fn index_on_element(&self, dof: DofIndex, element: ElementIndex) -> [usize; 2] {
        let (dx, dy) = dof;
        let (ex, ey) = element;
        [self.space_x.local_index(dx, ex), self.space_y.local_index(dy, ey)]
    }

    /// Pair of one-dimensional indices of the DOF, local to the facet across the fixed axis and
    /// to the spanned element along the free axis.
    pub fn index_on_facet(&self, dof: DofIndex, facet: EdgeIndex) -> [usize; 2] {
        let (dx, dy) = dof;
        let EdgeIndex { ix, iy, dir } = facet;
        match dir {
            Orientation::Horizontal => [
                self.space_x.local_index(dx, ix),
                self.space_y.facet_local_index(dy, iy),
            ],
            Orientation::Vertical => [
                self.space_x.facet_local_index(dx, ix),
                self.space_y.local_index(dy, iy),
            ],
        }
    }

    pub fn local_index(&self, dof: DofIndex, element: ElementIndex) -> usize {
        self.element_layout(element)
            .linear_index(self.index_on_element(dof, element))
    }

    pub fn facet_local_index(&self, dof: DofIndex, facet: EdgeIndex) -> usize {
        self.facet_layout(facet)
            .linear_index(self.index_on_facet(dof, facet))
    }

    pub fn global_index(&self, dof: DofIndex) -> usize {
        let (dx, dy) = dof;
        self.global_layout().linear_index([dx, dy])
    }

    /// Inverse of [`global_index`](Self::global_index).
    pub fn dof_index(&self, global: usize) -> DofIndex {
        let [dx, dy] = self.global_layout().multi_index(global);
        (dx, dy)
    }

    /// Evaluates the basis functions of the element at the given points.
    ///
    /// The one-dimensional tables are computed once here. `derivatives` is the highest
    /// derivative order made available, gradients are zero when it is `0`.
    pub fn dof_evaluator(
        &self,
        element: ElementIndex,
        points: &TensorQuadraturePoints,
        derivatives: usize,
    ) -> ElementEvaluator<'_> {
        let (ex, ey) = element;
        ElementEvaluator {
            space: self,
            element,
            values_x: evaluate_basis_on_element(points.xs(), &self.space_x, ex, derivatives),
            values_y: evaluate_basis_on_element(points.ys(), &self.space_y, ey, derivatives),
        }
    }

    /// Evaluates the basis functions supported on the facet at the given edge points.
    ///
    /// Along the free axis the basis of the spanned element is tabulated at the quadrature
    /// points. Across the edge, the basis is evaluated one-sidedly from both adjacent elements.
    pub fn facet_evaluator(
        &self,
        facet: EdgeIndex,
        points: &EdgeQuadraturePoints,
        derivatives: usize,
    ) -> FacetEvaluator<'_> {
        assert_eq!(points.direction(), facet.dir, "Edge points do not match facet orientation");
        let EdgeIndex { ix, iy, dir } = facet;
        let (along, across) = match dir {
            Orientation::Horizontal => (
                evaluate_basis_on_element(points.points(), &self.space_x, ix, derivatives),
                evaluate_basis_on_facet(iy, &self.space_y, derivatives),
            ),
            Orientation::Vertical => (
                evaluate_basis_on_element(points.points(), &self.space_y, iy, derivatives),
                evaluate_basis_on_facet(ix, &self.space_x, derivatives),
            ),
        };
        FacetEvaluator {
            space: self,
            facet,
            along,
            across,
        }
    }
}

/// Basis values on an element, see [`BsplineSpace2d::dof_evaluator`].
#[derive(Debug, Clone)]
pub struct ElementEvaluator<'a> {
    space: &'a BsplineSpace2d,
    element: ElementIndex,
    values_x: BasisValues,
    values_y: BasisValues,
}

impl<'a> ElementEvaluator<'a> {
    pub fn element(&self) -> ElementIndex {
        self.element
    }
}

impl<'a> DofEvaluator for ElementEvaluator<'a> {
    type PointIndex = (usize, usize);

    #[inline]
    fn evaluate(&self, dof: DofIndex, (qx, qy): (usize, usize)) -> FunctionValue2d {
        let [ix, iy] = self.space.index_on_element(dof, self.element);
        FunctionValue2d::from_product(
            self.values_x.value(qx, ix, 0),
            self.values_x.value(qx, ix, 1),
            self.values_y.value(qy, iy, 0),
            self.values_y.value(qy, iy, 1),
        )
    }
}

/// Basis values on an edge, see [`BsplineSpace2d::facet_evaluator`].
///
/// Besides the one-sided value, the evaluator provides the traces from either side and their
/// jump and average. All of them are combined with the tabulated values along the edge by the
/// product rule.
#[derive(Debug, Clone)]
pub struct FacetEvaluator<'a> {
    space: &'a BsplineSpace2d,
    facet: EdgeIndex,
    along: BasisValues,
    across: VertexBasisValues,
}

impl<'a> FacetEvaluator<'a> {
    pub fn facet(&self) -> EdgeIndex {
        self.facet
    }

    /// Combines the tabulated values along the edge with a one-sided quantity across it.
    #[inline]
    fn combine(&self, dof: DofIndex, q: usize, across: impl Fn(usize, usize) -> f64) -> FunctionValue2d {
        let [ix, iy] = self.space.index_on_facet(dof, self.facet);
        match self.facet.dir {
            Orientation::Horizontal => FunctionValue2d::from_product(
                self.along.value(q, ix, 0),
                self.along.value(q, ix, 1),
                across(iy, 0),
                across(iy, 1),
            ),
            Orientation::Vertical => FunctionValue2d::from_product(
                across(ix, 0),
                across(ix, 1),
                self.along.value(q, iy, 0),
                self.along.value(q, iy, 1),
            ),
        }
    }

    pub fn left(&self, dof: DofIndex, q: usize) -> FunctionValue2d {
        self.combine(dof, q, |i, der| self.across.left(i, der))
    }

    pub fn right(&self, dof: DofIndex, q: usize) -> FunctionValue2d {
        self.combine(dof, q, |i, der| self.across.right(i, der))
    }

    /// `normal * (left - right)`, componentwise.
    pub fn jump(&self, dof: DofIndex, q: usize, normal: f64) -> FunctionValue2d {
        self.combine(dof, q, |i, der| self.across.jump(i, der, normal))
    }

    pub fn average(&self, dof: DofIndex, q: usize) -> FunctionValue2d {
        self.combine(dof, q, |i, der| self.across.average(i, der))
    }
}

impl<'a> DofEvaluator for FacetEvaluator<'a> {
    type PointIndex = usize;

    #[inline]
    fn evaluate(&self, dof: DofIndex, q: usize) -> FunctionValue2d {
        self.combine(dof, q, |i, der| self.across.value(i, der))
    }
}
