use fenris_iga::basis::evaluate_basis_at_point;
use fenris_iga::bspline::basis_from_breakpoints;
use fenris_iga::function::FunctionValue2d;
use fenris_iga::mesh::procedural::evenly_spaced;
use fenris_iga::mesh::{EdgeIndex, ElementIndex, Orientation, RegularMesh};
use fenris_iga::proptest::{bspline_space_1d, mesh_and_space};
use fenris_iga::quadrature::{MeshQuadrature, QuadraturePoints};
use fenris_iga::space::{
    check_trial_test_dimensions, BsplineSpace1d, BsplineSpace2d, DofEvaluator, DofIndex, SpaceDimensionError,
};
use itertools::Itertools;
use matrixcompare::assert_scalar_eq;
use nalgebra::Point2;
use proptest::prelude::*;

fn quadratic_c1_space() -> BsplineSpace1d {
    BsplineSpace1d::new(basis_from_breakpoints(&[0.0, 1.0, 2.0, 3.0], 2, 1))
}

#[test]
fn continuous_space_dofs() {
    let space = quadratic_c1_space();
    assert_eq!(space.dof_count(), 5);
    assert_eq!(space.element_count(), 3);
    assert_eq!(space.facet_count(), 4);
    assert_eq!(space.dofs_on_element(0), 0..3);
    assert_eq!(space.dofs_on_element(2), 2..5);
    assert_eq!(space.first_dof(1), 1);
    assert_eq!(space.last_dof(1), 3);
    assert_eq!(space.local_index(3, 1), 2);

    assert_eq!(space.dofs_on_facet(0), 0..3);
    assert_eq!(space.dofs_on_facet(1), 0..4);
    assert_eq!(space.dofs_on_facet(2), 1..5);
    assert_eq!(space.dofs_on_facet(3), 2..5);
    assert_eq!(space.facet_dof_count(1), 4);
    assert_eq!(space.facet_local_index(3, 1), 3);
    assert_eq!(space.facet_local_index(4, 3), 2);

    assert_eq!(space.element_left(0), None);
    assert_eq!(space.element_right(0), Some(0));
    assert_eq!(space.element_left(3), Some(2));
    assert_eq!(space.element_right(3), None);
    assert_eq!(space.breakpoint(2), 2.0);
}

#[test]
fn discontinuous_space_dofs() {
    let space = BsplineSpace1d::new(basis_from_breakpoints(&[0.0, 1.0, 2.0], 2, -1));
    assert_eq!(space.dof_count(), 6);
    assert_eq!(space.dofs_on_element(0), 0..3);
    assert_eq!(space.dofs_on_element(1), 3..6);
    assert_eq!(space.dofs_on_facet(1), 0..6);
    assert_eq!(space.span(0), 2);
    assert_eq!(space.span(1), 5);
}

#[test]
#[should_panic]
fn local_index_of_unsupported_dof_panics() {
    quadratic_c1_space().local_index(4, 0);
}

#[test]
#[should_panic]
fn invalid_facet_panics() {
    quadratic_c1_space().dofs_on_facet(4);
}

#[test]
fn tensor_space_indices() {
    let bx = basis_from_breakpoints(&[0.0, 1.0, 2.0, 3.0], 2, 1);
    let by = basis_from_breakpoints(&[0.0, 1.0], 1, 0);
    let space = BsplineSpace2d::new(bx, by);
    assert_eq!(space.dof_count(), 10);
    assert_eq!(space.global_index((0, 0)), 0);
    assert_eq!(space.global_index((0, 1)), 1);
    assert_eq!(space.global_index((3, 1)), 7);
    assert_eq!(space.dof_index(7), (3, 1));

    let element = (1, 0);
    assert_eq!(space.element_dof_count(element), 6);
    let dofs: Vec<_> = space.dofs_on_element(element).collect();
    assert_eq!(dofs, vec![(1, 0), (1, 1), (2, 0), (2, 1), (3, 0), (3, 1)]);
    assert_eq!(space.index_on_element((3, 0), element), [2, 0]);
    assert_eq!(space.local_index((3, 0), element), 4);

    // Interior vertical edge at x = 1 spanning the single y element
    let facet = EdgeIndex::vertical(1, 0);
    assert_eq!(space.facet_dof_count(facet), 8);
    assert_eq!(space.index_on_facet((3, 1), facet), [3, 1]);
    assert_eq!(space.facet_local_index((3, 1), facet), 7);

    // Top edge spanning the last x element
    let facet = EdgeIndex::horizontal(2, 1);
    assert_eq!(space.facet_dof_count(facet), 6);
    assert_eq!(space.index_on_facet((4, 0), facet), [2, 0]);
}

/// Value and gradient of the restriction of a basis function to an element, zero if the
/// function is not supported there.
fn evaluate_on_element(
    space: &BsplineSpace2d,
    element: ElementIndex,
    dof: DofIndex,
    x: &Point2<f64>,
) -> FunctionValue2d {
    if !space.dofs_on_element(element).any(|d| d == dof) {
        return FunctionValue2d::zero();
    }
    let (ex, ey) = element;
    let [ix, iy] = space.index_on_element(dof, element);
    let bx = evaluate_basis_at_point(x.x, space.space_x(), 1, space.space_x().span(ex));
    let by = evaluate_basis_at_point(x.y, space.space_y(), 1, space.space_y().span(ey));
    FunctionValue2d::from_product(bx.value(0, ix, 0), bx.value(0, ix, 1), by.value(0, iy, 0), by.value(0, iy, 1))
}

fn assert_function_values_eq(actual: FunctionValue2d, expected: FunctionValue2d) {
    assert_scalar_eq!(actual.val, expected.val, comp = abs, tol = 1e-12);
    assert_scalar_eq!(actual.dx, expected.dx, comp = abs, tol = 1e-12);
    assert_scalar_eq!(actual.dy, expected.dy, comp = abs, tol = 1e-12);
}

#[test]
fn facet_traces_match_adjacent_elements() {
    let xs = vec![0.0, 1.0, 2.5];
    let ys = vec![0.0, 0.5, 1.5];
    let space = BsplineSpace2d::new(basis_from_breakpoints(&xs, 2, -1), basis_from_breakpoints(&ys, 1, -1));
    let mesh = RegularMesh::new(xs, ys);
    let quadrature = MeshQuadrature::new(&mesh, 3);

    // Interior edges with the elements below or left of them first
    let cases = [
        (EdgeIndex::vertical(1, 0), (0, 0), (1, 0)),
        (EdgeIndex::horizontal(1, 1), (1, 0), (1, 1)),
    ];
    for (facet, first, second) in cases {
        let points = quadrature.facet_points(facet);
        let eval = space.facet_evaluator(facet, &points, 1);
        let normal = mesh.facet(facet).normal;
        let n = normal.x + normal.y;
        assert_eq!(n, 1.0);

        let mut max_jump = FunctionValue2d::zero();
        for dof in space.dofs_on_facet(facet) {
            for q in points.indices() {
                let x = points.coords(q);
                let left = evaluate_on_element(&space, first, dof, &x);
                let right = evaluate_on_element(&space, second, dof, &x);

                assert_function_values_eq(eval.left(dof, q), left);
                assert_function_values_eq(eval.right(dof, q), right);
                assert_function_values_eq(eval.jump(dof, q, n), (left - right) * n);
                assert_function_values_eq(eval.jump(dof, q, -n), (right - left) * n);
                assert_function_values_eq(eval.average(dof, q), (left + right) * 0.5);
                let side = if left == FunctionValue2d::zero() { right } else { left };
                assert_function_values_eq(eval.evaluate(dof, q), side);

                let jump = eval.jump(dof, q, n);
                max_jump.val = max_jump.val.max(jump.val.abs());
                max_jump.dx = max_jump.dx.max(jump.dx.abs());
                max_jump.dy = max_jump.dy.max(jump.dy.abs());
            }
        }
        // Values and both gradient components jump across the discontinuity
        assert!(max_jump.val > 0.5, "{facet}: {max_jump:?}");
        assert!(max_jump.dx > 0.1 && max_jump.dy > 0.1, "{facet}: {max_jump:?}");
    }
}

#[test]
fn trial_space_larger_than_test_space_is_rejected() {
    let points = evenly_spaced(0.0, 1.0, 2);
    let cubic = basis_from_breakpoints(&points, 3, 2);
    let quadratic = basis_from_breakpoints(&points, 2, 1);

    let trial = BsplineSpace1d::new(cubic.clone());
    let test = BsplineSpace1d::new(quadratic.clone());
    assert_eq!(
        check_trial_test_dimensions(&trial, &test),
        Err(SpaceDimensionError { trial: 5, test: 4 })
    );
    assert_eq!(check_trial_test_dimensions(&test, &trial), Ok(()));
    assert_eq!(check_trial_test_dimensions(&test, &test), Ok(()));

    let trial = BsplineSpace2d::new(cubic.clone(), cubic);
    let test = BsplineSpace2d::new(quadratic.clone(), quadratic);
    let error = check_trial_test_dimensions(&trial, &test).unwrap_err();
    assert_eq!(
        error.to_string(),
        "Dimension of the trial space greater than that of test space (25 > 16)"
    );
}

proptest! {
    #[test]
    fn facet_dofs_cover_adjacent_elements(space in bspline_space_1d(6, 4)) {
        let p = space.degree();
        for e in 0..space.element_count() {
            let dofs = space.dofs_on_element(e);
            prop_assert_eq!(dofs.len(), p + 1);
            prop_assert!(dofs.end <= space.dof_count());
            if e > 0 {
                prop_assert!(space.first_dof(e - 1) <= space.first_dof(e));
            }
        }
        for f in 0..space.facet_count() {
            let facet_dofs = space.dofs_on_facet(f);
            for e in space.element_left(f).into_iter().chain(space.element_right(f)) {
                let dofs = space.dofs_on_element(e);
                prop_assert!(facet_dofs.start <= dofs.start && dofs.end <= facet_dofs.end);
            }
        }
        let covered = (0..space.element_count()).flat_map(|e| space.dofs_on_element(e)).unique().count();
        prop_assert_eq!(covered, space.dof_count());
    }

    #[test]
    fn local_indices_are_permutations((mesh, space) in mesh_and_space(4, 3)) {
        for element in mesh.elements() {
            let mut indices: Vec<_> = space
                .dofs_on_element(element)
                .map(|dof| space.local_index(dof, element))
                .collect();
            indices.sort_unstable();
            prop_assert_eq!(indices, (0..space.element_dof_count(element)).collect::<Vec<_>>());
        }
        for facet in mesh.facets() {
            let mut indices: Vec<_> = space
                .dofs_on_facet(facet)
                .map(|dof| space.facet_local_index(dof, facet))
                .collect();
            indices.sort_unstable();
            prop_assert_eq!(indices, (0..space.facet_dof_count(facet)).collect::<Vec<_>>());
        }
    }

    #[test]
    fn global_and_dof_indices_are_inverse((_, space) in mesh_and_space(4, 3)) {
        for (linear, dof) in space.dofs().enumerate() {
            prop_assert_eq!(space.global_index(dof), linear);
            prop_assert_eq!(space.dof_index(linear), dof);
        }
    }

    #[test]
    fn facet_dofs_contain_element_dofs((mesh, space) in mesh_and_space(4, 3)) {
        for facet in mesh.interior_facets() {
            let facet_dofs: Vec<_> = space.dofs_on_facet(facet).collect();
            let (first, second) = match facet.dir {
                Orientation::Horizontal => ((facet.ix, facet.iy - 1), (facet.ix, facet.iy)),
                Orientation::Vertical => ((facet.ix - 1, facet.iy), (facet.ix, facet.iy)),
            };
            for dof in space.dofs_on_element(first).chain(space.dofs_on_element(second)) {
                prop_assert!(facet_dofs.contains(&dof));
            }
        }
    }
}
