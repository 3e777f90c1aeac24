//! Scalar values with gradients and B-spline functions on tensor-product spaces.
use crate::space::BsplineSpace2d;
use fenris_bspline::{eval_basis_with_derivatives, find_span, BasisEvalContext};
use nalgebra::{Point2, Vector2};
use std::ops::{Add, AddAssign, Mul, Sub};

/// Value and first partial derivatives of a scalar function of two variables.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FunctionValue2d {
    pub val: f64,
    pub dx: f64,
    pub dy: f64,
}

impl FunctionValue2d {
    pub fn new(val: f64, dx: f64, dy: f64) -> Self {
        Self { val, dx, dy }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn grad(&self) -> Vector2<f64> {
        Vector2::new(self.dx, self.dy)
    }

    /// Product of a function of `x` with value `bx` and derivative `dbx` and a function of `y`.
    #[inline]
    pub fn from_product(bx: f64, dbx: f64, by: f64, dby: f64) -> Self {
        Self {
            val: bx * by,
            dx: dbx * by,
            dy: bx * dby,
        }
    }
}

impl Add for FunctionValue2d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.val + rhs.val, self.dx + rhs.dx, self.dy + rhs.dy)
    }
}

impl AddAssign for FunctionValue2d {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FunctionValue2d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.val - rhs.val, self.dx - rhs.dx, self.dy - rhs.dy)
    }
}

impl Mul<f64> for FunctionValue2d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.val * rhs, self.dx * rhs, self.dy * rhs)
    }
}

/// Scratch storage for evaluating B-spline functions at arbitrary points.
#[derive(Debug, Clone)]
pub struct FunctionEvalWorkspace {
    context_x: BasisEvalContext,
    context_y: BasisEvalContext,
    values_x: Vec<f64>,
    values_y: Vec<f64>,
}

impl FunctionEvalWorkspace {
    pub fn new(space: &BsplineSpace2d) -> Self {
        let px = space.space_x().degree();
        let py = space.space_y().degree();
        Self {
            context_x: BasisEvalContext::new(px),
            context_y: BasisEvalContext::new(py),
            values_x: vec![0.0; 2 * (px + 1)],
            values_y: vec![0.0; 2 * (py + 1)],
        }
    }

    fn fits(&self, space: &BsplineSpace2d) -> bool {
        self.context_x.degree() == space.space_x().degree() && self.context_y.degree() == space.space_y().degree()
    }
}

/// A linear combination of the basis functions of a [`BsplineSpace2d`].
///
/// Coefficients are indexed by the global DOF index of the space.
#[derive(Debug, Clone, PartialEq)]
pub struct BsplineFunction2d<'a> {
    space: &'a BsplineSpace2d,
    coefficients: Vec<f64>,
}

impl<'a> BsplineFunction2d<'a> {
    /// The zero function.
    pub fn new(space: &'a BsplineSpace2d) -> Self {
        Self {
            space,
            coefficients: vec![0.0; space.dof_count()],
        }
    }

    pub fn from_coefficients(space: &'a BsplineSpace2d, coefficients: Vec<f64>) -> Self {
        assert_eq!(
            coefficients.len(),
            space.dof_count(),
            "Number of coefficients must match the dimension of the space"
        );
        Self { space, coefficients }
    }

    pub fn space(&self) -> &'a BsplineSpace2d {
        self.space
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn coefficients_mut(&mut self) -> &mut [f64] {
        &mut self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<f64> {
        self.coefficients
    }

    pub fn evaluate(&self, point: &Point2<f64>) -> f64 {
        self.evaluate_with_gradient(point).val
    }

    pub fn evaluate_with_gradient(&self, point: &Point2<f64>) -> FunctionValue2d {
        let mut workspace = FunctionEvalWorkspace::new(self.space);
        self.evaluate_with(point, &mut workspace)
    }

    /// Evaluates value and gradient, reusing the scratch storage in `workspace`.
    ///
    /// Points outside the domain are evaluated by extending the boundary polynomial pieces.
    pub fn evaluate_with(&self, point: &Point2<f64>, workspace: &mut FunctionEvalWorkspace) -> FunctionValue2d {
        assert!(workspace.fits(self.space), "Workspace was created for a different space");
        let bx = self.space.space_x().basis();
        let by = self.space.space_y().basis();
        let (px, py) = (bx.degree(), by.degree());
        let (nx, ny) = (px + 1, py + 1);

        let span_x = find_span(point.x, bx);
        let span_y = find_span(point.y, by);
        let FunctionEvalWorkspace {
            context_x,
            context_y,
            values_x,
            values_y,
        } = workspace;
        eval_basis_with_derivatives(span_x, point.x, bx, values_x, 1, context_x);
        eval_basis_with_derivatives(span_y, point.y, by, values_y, 1, context_y);

        let mut result = FunctionValue2d::zero();
        for i in 0..nx {
            for j in 0..ny {
                let dof = (span_x - px + i, span_y - py + j);
                let c = self.coefficients[self.space.global_index(dof)];
                let b = FunctionValue2d::from_product(values_x[i], values_x[nx + i], values_y[j], values_y[ny + j]);
                result += b * c;
            }
        }
        result
    }
}
