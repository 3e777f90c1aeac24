use crate::mesh::RegularMesh;
use crate::space::{BsplineSpace1d, BsplineSpace2d};
use ::proptest::prelude::*;
use fenris_bspline::basis_from_breakpoints;

/// Strictly increasing partitions with between 1 and `max_elements` elements.
///
/// Coordinates stay in a moderate range and element lengths are bounded away from zero, so that
/// basis values and quadrature weights are well-scaled.
pub fn partition(max_elements: usize) -> impl Strategy<Value = Vec<f64>> {
    assert!(max_elements > 0);
    let lengths = prop::collection::vec(0.1..2.0, 1..=max_elements);
    (-5.0..5.0, lengths).prop_map(|(start, lengths)| {
        let mut points = Vec::with_capacity(lengths.len() + 1);
        points.push(start);
        let mut x = start;
        for length in lengths {
            x += length;
            points.push(x);
        }
        points
    })
}

pub fn regular_mesh(max_elements_per_axis: usize) -> impl Strategy<Value = RegularMesh> {
    (partition(max_elements_per_axis), partition(max_elements_per_axis)).prop_map(|(xs, ys)| RegularMesh::new(xs, ys))
}

/// Degree and continuity with `degree <= max_degree` and `-1 <= continuity < degree`.
pub fn degree_and_continuity(max_degree: usize) -> impl Strategy<Value = (usize, isize)> {
    (0..=max_degree).prop_flat_map(|degree| (Just(degree), -1..degree as isize))
}

/// One-dimensional spaces over random partitions with random degree and continuity.
pub fn bspline_space_1d(max_elements: usize, max_degree: usize) -> impl Strategy<Value = BsplineSpace1d> {
    (partition(max_elements), degree_and_continuity(max_degree)).prop_map(|(points, (degree, continuity))| {
        BsplineSpace1d::new(basis_from_breakpoints(&points, degree, continuity))
    })
}

/// A regular mesh together with a tensor-product space whose breakpoints are the mesh points.
pub fn mesh_and_space(
    max_elements_per_axis: usize,
    max_degree: usize,
) -> impl Strategy<Value = (RegularMesh, BsplineSpace2d)> {
    let axis = || (partition(max_elements_per_axis), degree_and_continuity(max_degree));
    (axis(), axis()).prop_map(|((xs, (px, cx)), (ys, (py, cy)))| {
        let space = BsplineSpace2d::new(
            basis_from_breakpoints(&xs, px, cx),
            basis_from_breakpoints(&ys, py, cy),
        );
        (RegularMesh::new(xs, ys), space)
    })
}
