use fenris_iga::bspline::basis_from_breakpoints;
use fenris_iga::error::{
    estimate_H1_seminorm_error, estimate_H1_seminorm_error_squared, estimate_L2_error, estimate_L2_error_squared,
};
use fenris_iga::function::BsplineFunction2d;
use fenris_iga::mesh::RegularMesh;
use fenris_iga::quadrature::MeshQuadrature;
use fenris_iga::space::BsplineSpace2d;
use matrixcompare::assert_scalar_eq;
use nalgebra::{Point2, Vector2};

fn mesh_and_space() -> (RegularMesh, BsplineSpace2d) {
    let xs = vec![0.0, 0.5, 2.0];
    let ys = vec![0.0, 0.25, 0.5, 1.0];
    let space = BsplineSpace2d::new(basis_from_breakpoints(&xs, 1, 0), basis_from_breakpoints(&ys, 1, 0));
    (RegularMesh::new(xs, ys), space)
}

#[test]
fn errors_of_zero_function() {
    let (mesh, space) = mesh_and_space();
    let quadrature = MeshQuadrature::new(&mesh, 3);
    let zero = BsplineFunction2d::new(&space);

    assert_scalar_eq!(estimate_L2_error_squared(&zero, |_| 1.0, &quadrature), 2.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(estimate_L2_error(&zero, |_| 1.0, &quadrature), 2.0f64.sqrt(), comp = abs, tol = 1e-12);

    // ∫ x^2 over [0, 2] x [0, 1]
    assert_scalar_eq!(estimate_L2_error_squared(&zero, |x| x.x, &quadrature), 8.0 / 3.0, comp = abs, tol = 1e-12);

    let gradient = |_: &Point2<f64>| Vector2::new(3.0, 4.0);
    assert_scalar_eq!(estimate_H1_seminorm_error_squared(&zero, gradient, &quadrature), 50.0, comp = abs, tol = 1e-10);
    assert_scalar_eq!(estimate_H1_seminorm_error(&zero, gradient, &quadrature), 50.0f64.sqrt(), comp = abs, tol = 1e-10);
}

#[test]
fn bilinear_interpolant_has_no_error() {
    let (mesh, space) = mesh_and_space();
    let quadrature = MeshQuadrature::new(&mesh, 2);

    // For C0 linear splines the coefficients are the nodal values
    let xs = mesh.mesh_x().points();
    let ys = mesh.mesh_y().points();
    let u = |x: f64, y: f64| 1.0 + 2.0 * x - y + 0.5 * x * y;
    let coefficients = space.dofs().map(|(i, j)| u(xs[i], ys[j])).collect();
    let function = BsplineFunction2d::from_coefficients(&space, coefficients);

    let l2 = estimate_L2_error(&function, |x| u(x.x, x.y), &quadrature);
    let h1 = estimate_H1_seminorm_error(&function, |x| Vector2::new(2.0 + 0.5 * x.y, -1.0 + 0.5 * x.x), &quadrature);
    assert!(l2 < 1e-12);
    assert!(h1 < 1e-12);
}
