//! Functionality for error estimation.
use crate::function::{BsplineFunction2d, FunctionEvalWorkspace, FunctionValue2d};
use crate::quadrature::{MeshQuadrature, QuadraturePoints};
use nalgebra::{Point2, Vector2};

/// Sums `integrand(u_h(x), x) w` over the quadrature points of all elements.
fn integrate_over_mesh(
    u_h: &BsplineFunction2d,
    quadrature: &MeshQuadrature,
    integrand: impl Fn(&FunctionValue2d, &Point2<f64>) -> f64,
) -> f64 {
    let mut workspace = FunctionEvalWorkspace::new(u_h.space());
    let mut result = 0.0;
    for element in quadrature.mesh().elements() {
        let points = quadrature.element_points(element);
        for q in points.indices() {
            let (x, w) = points.data(q);
            let value = u_h.evaluate_with(&x, &mut workspace);
            result += integrand(&value, &x) * w;
        }
    }
    result
}

/// Estimate the squared $L^2$ error $\norm{u_h - u}^2_{L^2}$ with the given quadrature.
#[allow(non_snake_case)]
pub fn estimate_L2_error_squared(
    u_h: &BsplineFunction2d,
    u: impl Fn(&Point2<f64>) -> f64,
    quadrature: &MeshQuadrature,
) -> f64 {
    integrate_over_mesh(u_h, quadrature, |value, x| {
        let d = value.val - u(x);
        d * d
    })
}

/// Estimate the $L^2$ error $\norm{u_h - u}_{L^2}$ with the given quadrature.
#[allow(non_snake_case)]
pub fn estimate_L2_error(u_h: &BsplineFunction2d, u: impl Fn(&Point2<f64>) -> f64, quadrature: &MeshQuadrature) -> f64 {
    estimate_L2_error_squared(u_h, u, quadrature).sqrt()
}

/// Estimate the squared $H^1$ *seminorm* error $\seminorm{u_h - u}^2_{H^1}$, given the gradient
/// of $u$.
#[allow(non_snake_case)]
pub fn estimate_H1_seminorm_error_squared(
    u_h: &BsplineFunction2d,
    u_grad: impl Fn(&Point2<f64>) -> Vector2<f64>,
    quadrature: &MeshQuadrature,
) -> f64 {
    integrate_over_mesh(u_h, quadrature, |value, x| (value.grad() - u_grad(x)).norm_squared())
}

#[allow(non_snake_case)]
pub fn estimate_H1_seminorm_error(
    u_h: &BsplineFunction2d,
    u_grad: impl Fn(&Point2<f64>) -> Vector2<f64>,
    quadrature: &MeshQuadrature,
) -> f64 {
    estimate_H1_seminorm_error_squared(u_h, u_grad, quadrature).sqrt()
}
