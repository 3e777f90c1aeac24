use fenris_iga::basis::{evaluate_basis_at_point, evaluate_basis_on_element, evaluate_basis_on_facet, BasisValues, VertexBasisValues};
use fenris_iga::bspline::basis_from_breakpoints;
use fenris_iga::mesh::procedural::evenly_spaced;
use fenris_iga::proptest::bspline_space_1d;
use fenris_iga::space::BsplineSpace1d;
use matrixcompare::assert_scalar_eq;
use proptest::prelude::*;

fn discontinuous_linear_space() -> BsplineSpace1d {
    BsplineSpace1d::new(basis_from_breakpoints(&[0.0, 1.0, 2.0], 1, -1))
}

#[test]
fn hat_functions_on_element() {
    let space = BsplineSpace1d::new(basis_from_breakpoints(&[0.0, 1.0, 3.0], 1, 0));
    let values = evaluate_basis_on_element(&[1.0, 2.0, 3.0], &space, 1, 1);
    assert_eq!(values.point_count(), 3);
    assert_eq!(values.dof_count(), 2);
    assert_eq!(values.derivatives(), 1);

    assert_scalar_eq!(values.value(0, 0, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(1, 0, 0), 0.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(1, 1, 0), 0.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(2, 1, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(1, 0, 1), -0.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(1, 1, 1), 0.5, comp = abs, tol = 1e-14);
    // Derivatives above the stored order vanish
    assert_eq!(values.value(1, 1, 2), 0.0);
}

#[test]
fn point_evaluation_matches_element_tables() {
    let space = BsplineSpace1d::new(basis_from_breakpoints(&evenly_spaced(0.0, 1.0, 4), 3, 1));
    let x = 0.6;
    let table = evaluate_basis_on_element(&[x], &space, 2, 2);
    let point = evaluate_basis_at_point(x, &space, 2, space.span(2));
    assert_eq!(table, point);
}

#[test]
fn one_sided_values_at_discontinuity() {
    let space = discontinuous_linear_space();
    let values = evaluate_basis_on_facet(1, &space, 1);
    assert!(values.has_left() && values.has_right());

    // Facet-local DOFs 0 and 1 belong to the left element, 2 and 3 to the right one
    assert_scalar_eq!(values.left(1, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.right(1, 0), 0.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.left(2, 0), 0.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.right(2, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(1, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.value(2, 0), 1.0, comp = abs, tol = 1e-14);

    assert_scalar_eq!(values.jump(1, 0, 1.0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.jump(2, 0, 1.0), -1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.jump(2, 0, -1.0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.average(1, 0), 0.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.average(1, 1), 0.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(values.average(0, 0), 0.0, comp = abs, tol = 1e-14);
}

#[test]
fn boundary_facets_are_one_sided() {
    let space = discontinuous_linear_space();

    let first = evaluate_basis_on_facet(0, &space, 1);
    assert!(!first.has_left() && first.has_right());
    assert_scalar_eq!(first.value(0, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(first.average(0, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(first.jump(0, 0, -1.0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(first.value(0, 1), -1.0, comp = abs, tol = 1e-14);

    let last = evaluate_basis_on_facet(2, &space, 1);
    assert!(last.has_left() && !last.has_right());
    assert_scalar_eq!(last.value(1, 0), 1.0, comp = abs, tol = 1e-14);
    assert_scalar_eq!(last.jump(1, 0, 1.0), 1.0, comp = abs, tol = 1e-14);
}

#[test]
#[should_panic]
fn vertex_values_need_one_side() {
    VertexBasisValues::new(None, None, 0, 0);
}

#[test]
fn basis_values_layout() {
    let mut values = BasisValues::new(2, 3, 1);
    values
        .point_buffer_mut(1)
        .copy_from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    assert_eq!(values.value(1, 2, 0), 3.0);
    assert_eq!(values.value(1, 0, 1), 4.0);
    assert_eq!(values.value(0, 0, 0), 0.0);
}

proptest! {
    #[test]
    fn element_values_form_partition_of_unity(space in bspline_space_1d(5, 4), t in 0.0..=1.0) {
        for e in 0..space.element_count() {
            let a = space.breakpoint(e);
            let b = space.breakpoint(e + 1);
            let x = (1.0 - t) * a + t * b;
            let values = evaluate_basis_on_element(&[x], &space, e, 1);
            let sum: f64 = (0..values.dof_count()).map(|i| values.value(0, i, 0)).sum();
            let dsum: f64 = (0..values.dof_count()).map(|i| values.value(0, i, 1)).sum();
            prop_assert!((sum - 1.0).abs() < 1e-10);
            prop_assert!(dsum.abs() < 1e-8 * (1.0 + 1.0 / (b - a)));
            prop_assert!((0..values.dof_count()).all(|i| values.value(0, i, 0) >= -1e-12));
        }
    }

    #[test]
    fn continuous_spaces_have_no_value_jumps(space in bspline_space_1d(5, 4)) {
        prop_assume!(space.degree() >= 1);
        let continuous = (1..space.element_count()).all(|i| space.basis().continuity(i) >= 0);
        for f in 1..space.element_count() {
            let values = evaluate_basis_on_facet(f, &space, 1);
            let max_jump = (0..space.facet_dof_count(f))
                .map(|i| values.jump(i, 0, 1.0).abs())
                .fold(0.0, f64::max);
            if continuous {
                prop_assert!(max_jump < 1e-10);
            } else if space.basis().continuity(f) < 0 {
                prop_assert!(max_jump > 0.5);
            }
        }
    }
}
