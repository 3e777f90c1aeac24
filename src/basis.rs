//! Tables of one-dimensional basis values used by the tensor-product evaluators.
use crate::space::BsplineSpace1d;
use fenris_bspline::{eval_basis_with_derivatives, BasisEvalContext};

/// Values and derivatives of the basis functions of one element at a set of points.
///
/// Entries are addressed by point, element-local DOF and derivative order.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisValues {
    point_count: usize,
    dof_count: usize,
    derivatives: usize,
    buffer: Vec<f64>,
}

impl BasisValues {
    pub fn new(point_count: usize, dof_count: usize, derivatives: usize) -> Self {
        Self {
            point_count,
            dof_count,
            derivatives,
            buffer: vec![0.0; point_count * dof_count * (derivatives + 1)],
        }
    }

    pub fn point_count(&self) -> usize {
        self.point_count
    }

    pub fn dof_count(&self) -> usize {
        self.dof_count
    }

    /// Highest derivative order stored.
    pub fn derivatives(&self) -> usize {
        self.derivatives
    }

    /// Derivative of order `der` of local basis function `i` at point `point`.
    ///
    /// Derivatives above the stored order are reported as zero.
    #[inline]
    pub fn value(&self, point: usize, i: usize, der: usize) -> f64 {
        assert!(point < self.point_count && i < self.dof_count, "Basis value index out of bounds");
        if der > self.derivatives {
            return 0.0;
        }
        self.buffer[(point * (self.derivatives + 1) + der) * self.dof_count + i]
    }

    /// Storage for one point, laid out derivative-major as produced by
    /// [`eval_basis_with_derivatives`].
    pub fn point_buffer_mut(&mut self, point: usize) -> &mut [f64] {
        let stride = self.dof_count * (self.derivatives + 1);
        &mut self.buffer[point * stride..(point + 1) * stride]
    }
}

/// Evaluates the basis functions of `element` at the given points.
///
/// The points are expected to lie in the element. Evaluation uses the knot span of the element,
/// so points on the element boundary see the polynomial pieces of this element.
pub fn evaluate_basis_on_element(
    points: &[f64],
    space: &BsplineSpace1d,
    element: usize,
    derivatives: usize,
) -> BasisValues {
    let span = space.span(element);
    let mut values = BasisValues::new(points.len(), space.dofs_per_element(), derivatives);
    let mut context = BasisEvalContext::new(space.degree());
    for (q, &x) in points.iter().enumerate() {
        let buffer = values.point_buffer_mut(q);
        eval_basis_with_derivatives(span, x, space.basis(), buffer, derivatives, &mut context);
    }
    values
}

/// Evaluates the basis functions that are nonzero in `span` at a single point.
pub fn evaluate_basis_at_point(x: f64, space: &BsplineSpace1d, derivatives: usize, span: usize) -> BasisValues {
    let mut values = BasisValues::new(1, space.dofs_per_element(), derivatives);
    let mut context = BasisEvalContext::new(space.degree());
    eval_basis_with_derivatives(span, x, space.basis(), values.point_buffer_mut(0), derivatives, &mut context);
    values
}

/// One-sided basis values at a facet of a one-dimensional space.
///
/// The functions are numbered by their facet-local index. Functions with index up to
/// `left_last` belong to the element to the left, functions from `right_first` on to the element
/// to the right. At an interior facet both ranges overlap in the functions that straddle it.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBasisValues {
    left: Option<BasisValues>,
    right: Option<BasisValues>,
    left_last: usize,
    right_first: usize,
}

impl VertexBasisValues {
    pub fn new(
        left: Option<BasisValues>,
        right: Option<BasisValues>,
        left_last: usize,
        right_first: usize,
    ) -> Self {
        assert!(
            left.is_some() || right.is_some(),
            "Neither left nor right adjacent element data specified"
        );
        Self {
            left,
            right,
            left_last,
            right_first,
        }
    }

    pub fn has_left(&self) -> bool {
        self.left.is_some()
    }

    pub fn has_right(&self) -> bool {
        self.right.is_some()
    }

    /// Value from the left element if the function belongs to it, otherwise from the right.
    pub fn value(&self, i: usize, der: usize) -> f64 {
        if self.left.is_some() && i <= self.left_last {
            self.left(i, der)
        } else {
            self.right(i, der)
        }
    }

    pub fn left(&self, i: usize, der: usize) -> f64 {
        match &self.left {
            Some(values) if i <= self.left_last => values.value(0, i, der),
            _ => 0.0,
        }
    }

    pub fn right(&self, i: usize, der: usize) -> f64 {
        match &self.right {
            Some(values) if i >= self.right_first => values.value(0, i - self.right_first, der),
            _ => 0.0,
        }
    }

    /// `normal * (left - right)`.
    pub fn jump(&self, i: usize, der: usize, normal: f64) -> f64 {
        normal * (self.left(i, der) - self.right(i, der))
    }

    /// Mean of both sides, or the value of the only side present.
    pub fn average(&self, i: usize, der: usize) -> f64 {
        let sum = self.left(i, der) + self.right(i, der);
        if self.left.is_some() && self.right.is_some() {
            sum / 2.0
        } else {
            sum
        }
    }
}

/// Evaluates the basis at a facet, one-sidedly from each adjacent element.
pub fn evaluate_basis_on_facet(facet: usize, space: &BsplineSpace1d, derivatives: usize) -> VertexBasisValues {
    let x = space.breakpoint(facet);
    let left = space.element_left(facet);
    let right = space.element_right(facet);

    let left_values = left.map(|e| evaluate_basis_at_point(x, space, derivatives, space.span(e)));
    let right_values = right.map(|e| evaluate_basis_at_point(x, space, derivatives, space.span(e)));
    let left_last = left
        .map(|e| space.facet_local_index(space.last_dof(e), facet))
        .unwrap_or(0);
    let right_first = right
        .map(|e| space.facet_local_index(space.first_dof(e), facet))
        .unwrap_or(0);

    VertexBasisValues::new(left_values, right_values, left_last, right_first)
}
