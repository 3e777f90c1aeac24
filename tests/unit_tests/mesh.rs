use fenris_iga::bspline::Grading;
use fenris_iga::mesh::procedural::{create_uniform_square_mesh, evenly_spaced, graded};
use fenris_iga::mesh::{EdgeIndex, Interval, IntervalMesh, Orientation, RegularMesh};
use fenris_iga::proptest::regular_mesh;
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::Vector2;
use proptest::prelude::*;
use std::collections::HashSet;

#[test]
fn interval_mesh_facets_and_normals() {
    let mesh = IntervalMesh::new(vec![0.0, 0.5, 2.0]);
    assert_eq!(mesh.element_count(), 2);
    assert_eq!(mesh.facet_count(), 3);
    assert_eq!(mesh.boundary_facets(), [0, 2]);
    assert_eq!(mesh.interior_facets(), 1..2);
    assert!(mesh.is_boundary_facet(0));
    assert!(!mesh.is_boundary_facet(1));
    assert!(mesh.is_boundary_facet(2));

    assert_eq!(mesh.facet(0).normal, -1.0);
    assert_eq!(mesh.facet(1).normal, 1.0);
    assert_eq!(mesh.facet(2).normal, 1.0);
    assert_eq!(mesh.facet(1).position, 0.5);

    let second = mesh.subinterval(1);
    assert_eq!(second, Interval::new(0.5, 2.0));
    assert_scalar_eq!(second.length(), 1.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(second.midpoint(), 1.25, comp = abs, tol = 1e-14);
    assert!(second.contains(0.5) && second.contains(2.0) && !second.contains(2.1));
}

#[test]
fn interval_and_edge_display() {
    assert_eq!(format!("{}", Interval::new(0.0, 0.5)), "[0, 0.5]");
    assert_eq!(format!("{}", EdgeIndex::horizontal(1, 2)), "(1, 2)[-]");
    assert_eq!(format!("{}", EdgeIndex::vertical(0, 3)), "(0, 3)[|]");
}

#[test]
#[should_panic]
fn interval_mesh_rejects_unsorted_points() {
    IntervalMesh::new(vec![0.0, 1.0, 1.0]);
}

#[test]
#[should_panic]
fn degenerate_interval_panics() {
    Interval::new(1.0, 1.0);
}

#[test]
fn regular_mesh_edge_data() {
    let mesh = RegularMesh::new(vec![0.0, 1.0, 3.0], vec![-1.0, 0.0, 0.5, 2.0]);
    assert_eq!(mesh.element_count(), 6);

    let element = mesh.element((1, 2));
    assert_eq!(element.span_x, Interval::new(1.0, 3.0));
    assert_eq!(element.span_y, Interval::new(0.5, 2.0));
    assert_matrix_eq!(element.center().coords, Vector2::new(2.0, 1.25), comp = abs, tol = 1e-14);

    let bottom = mesh.facet(EdgeIndex::horizontal(1, 0));
    assert_eq!(bottom.direction, Orientation::Horizontal);
    assert_eq!(bottom.span, Interval::new(1.0, 3.0));
    assert_eq!(bottom.position, -1.0);
    assert_eq!(bottom.normal, Vector2::new(0.0, -1.0));

    let interior = mesh.facet(EdgeIndex::vertical(1, 1));
    assert_eq!(interior.span, Interval::new(0.0, 0.5));
    assert_eq!(interior.position, 1.0);
    assert_eq!(interior.normal, Vector2::new(1.0, 0.0));

    let right = mesh.facet(EdgeIndex::vertical(2, 0));
    assert_eq!(right.position, 3.0);
    assert_eq!(right.normal, Vector2::new(1.0, 0.0));
}

#[test]
fn elements_are_ordered_with_x_slowest() {
    let mesh = create_uniform_square_mesh(0.0, 1.0, 2);
    let elements: Vec<_> = mesh.elements().collect();
    assert_eq!(elements, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn evenly_spaced_includes_endpoints() {
    let points = evenly_spaced(-1.0, 1.0, 4);
    assert_eq!(points.len(), 5);
    assert_eq!(points[0], -1.0);
    assert_eq!(points[4], 1.0);
    assert_scalar_eq!(points[1], -0.5, comp = abs, tol = 1e-14);
    assert_scalar_eq!(points[2], 0.0, comp = abs, tol = 1e-14);
}

#[test]
fn graded_partition_concentrates_points_to_the_right() {
    let points = graded(0.0, 2.0, 4, &Grading::default());
    let expected = [0.0, 0.9, 1.8, 1.9, 2.0];
    assert_eq!(points.len(), expected.len());
    for (x, y) in points.iter().zip(&expected) {
        assert_scalar_eq!(*x, *y, comp = abs, tol = 1e-12);
    }

    let uniform = graded(0.0, 2.0, 4, &Grading::uniform());
    for (x, y) in uniform.iter().zip(evenly_spaced(0.0, 2.0, 4)) {
        assert_scalar_eq!(*x, y, comp = abs, tol = 1e-12);
    }
}

proptest! {
    #[test]
    fn facets_are_enumerated_exactly_once(mesh in regular_mesh(6)) {
        let nx = mesh.mesh_x().element_count();
        let ny = mesh.mesh_y().element_count();

        let facets = mesh.facets();
        prop_assert_eq!(facets.len(), nx * (ny + 1) + (nx + 1) * ny);
        let unique: HashSet<_> = facets.iter().copied().collect();
        prop_assert_eq!(unique.len(), facets.len());

        let boundary = mesh.boundary_facets();
        let interior = mesh.interior_facets();
        prop_assert_eq!(boundary.len(), 2 * nx + 2 * ny);
        prop_assert_eq!(boundary.len() + interior.len(), facets.len());
        prop_assert!(boundary.iter().all(|&f| mesh.is_boundary_facet(f)));
        prop_assert!(interior.iter().all(|&f| !mesh.is_boundary_facet(f)));

        let partition: HashSet<_> = boundary.iter().chain(&interior).copied().collect();
        prop_assert_eq!(partition, unique);
    }

    #[test]
    fn boundary_normals_point_outwards(mesh in regular_mesh(5)) {
        for facet in mesh.boundary_facets() {
            let data = mesh.facet(facet);
            let (a, b) = match facet.dir {
                Orientation::Horizontal => (mesh.mesh_y().points()[0], *mesh.mesh_y().points().last().unwrap()),
                Orientation::Vertical => (mesh.mesh_x().points()[0], *mesh.mesh_x().points().last().unwrap()),
            };
            let normal = match facet.dir {
                Orientation::Horizontal => data.normal.y,
                Orientation::Vertical => data.normal.x,
            };
            prop_assert_eq!(data.normal.norm(), 1.0);
            if data.position == a {
                prop_assert_eq!(normal, -1.0);
            } else {
                prop_assert_eq!(data.position, b);
                prop_assert_eq!(normal, 1.0);
            }
        }
    }
}
