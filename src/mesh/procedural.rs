//! Basic procedural partition generation routines.
use crate::mesh::{IntervalMesh, RegularMesh};
use fenris_bspline::Grading;

/// `elements + 1` evenly spaced points from `a` to `b`, both included.
pub fn evenly_spaced(a: f64, b: f64, elements: usize) -> Vec<f64> {
    assert!(elements > 0, "Invalid number of partition elements");
    (0..=elements)
        .map(|i| {
            let t = i as f64 / elements as f64;
            (1.0 - t) * a + t * b
        })
        .collect()
}

/// Partition of `[a, b]` whose points are the images of evenly spaced parameters under the
/// given grading.
pub fn graded(a: f64, b: f64, elements: usize, grading: &Grading) -> Vec<f64> {
    assert!(elements > 0, "Invalid number of partition elements");
    (0..=elements)
        .map(|i| match i {
            0 => a,
            i if i == elements => b,
            i => {
                let s = grading.apply(i as f64 / elements as f64);
                (1.0 - s) * a + s * b
            }
        })
        .collect()
}

pub fn create_uniform_interval_mesh(a: f64, b: f64, elements: usize) -> IntervalMesh {
    IntervalMesh::new(evenly_spaced(a, b, elements))
}

/// Uniform mesh of the square `[a, b]^2` with `elements` elements along each axis.
pub fn create_uniform_square_mesh(a: f64, b: f64, elements: usize) -> RegularMesh {
    RegularMesh::new(evenly_spaced(a, b, elements), evenly_spaced(a, b, elements))
}
