use nalgebra::{convert, RealField};
use serde::{Deserialize, Serialize};

/// A B-spline basis of fixed degree over a clamped knot vector.
#[derive(Debug, Clone, PartialEq)]
pub struct BsplineBasis<T: RealField + Copy = f64> {
    knots: Vec<T>,
    degree: usize,
    breakpoints: Vec<T>,
}

impl<T: RealField + Copy> BsplineBasis<T> {
    /// Creates a basis from a clamped knot vector.
    ///
    /// # Panics
    ///
    /// Panics if the knot vector has fewer than `2 (degree + 1)` entries, is not
    /// non-decreasing, contains non-finite values, is not clamped (first and last knots repeated
    /// `degree + 1` times) or has an interior knot repeated more than `degree + 1` times.
    pub fn new(knots: Vec<T>, degree: usize) -> Self {
        let p = degree;
        assert!(
            knots.len() >= 2 * (p + 1),
            "Knot vector of degree {p} basis needs at least {} knots, got {}",
            2 * (p + 1),
            knots.len()
        );
        assert!(knots.iter().all(|k| k.is_finite()), "Knot vector contains non-finite values");
        assert!(knots.windows(2).all(|w| w[0] <= w[1]), "Knot vector must be non-decreasing");

        let first = knots[0];
        let last = knots[knots.len() - 1];
        assert!(first < last, "Knot vector must span a non-degenerate domain");
        assert!(
            knots[..=p].iter().all(|&k| k == first) && knots[knots.len() - p - 1..].iter().all(|&k| k == last),
            "Knot vector must be clamped"
        );

        let mut breakpoints = knots.clone();
        breakpoints.dedup();
        let basis = Self {
            knots,
            degree,
            breakpoints,
        };

        for i in 1..basis.breakpoints.len() - 1 {
            assert!(
                basis.multiplicity(i) <= p + 1,
                "Interior knot {} has multiplicity larger than degree + 1",
                basis.breakpoints[i]
            );
        }
        basis
    }

    pub fn knots(&self) -> &[T] {
        &self.knots
    }

    pub fn knot_count(&self) -> usize {
        self.knots.len()
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Number of basis functions.
    pub fn dof_count(&self) -> usize {
        self.knots.len() - self.degree - 1
    }

    /// Number of non-degenerate knot spans.
    pub fn element_count(&self) -> usize {
        self.breakpoints.len() - 1
    }

    /// The distinct knots, in increasing order.
    pub fn breakpoints(&self) -> &[T] {
        &self.breakpoints
    }

    pub fn domain(&self) -> (T, T) {
        (self.breakpoints[0], self.breakpoints[self.breakpoints.len() - 1])
    }

    /// Number of times the breakpoint with the given index appears in the knot vector.
    pub fn multiplicity(&self, breakpoint_index: usize) -> usize {
        let x = self.breakpoints[breakpoint_index];
        self.knots.iter().filter(|&&k| k == x).count()
    }

    /// Continuity of the basis at the given breakpoint.
    ///
    /// Returns `-1` for discontinuous bases. At the domain endpoints the result is `-1`, since
    /// the knots are clamped.
    pub fn continuity(&self, breakpoint_index: usize) -> isize {
        self.degree as isize - self.multiplicity(breakpoint_index) as isize
    }
}

/// Builds the clamped knot vector over `points` with interior knots repeated `r` times.
fn knots_over_breakpoints<T: RealField + Copy>(points: &[T], degree: usize, r: usize) -> Vec<T> {
    let n = points.len();
    assert!(n >= 2, "At least two breakpoints are required");
    let p = degree;
    let mut knots = Vec::with_capacity(2 * (p + 1) + (n - 2) * r);
    knots.extend(std::iter::repeat(points[0]).take(p + 1));
    for &x in &points[1..n - 1] {
        knots.extend(std::iter::repeat(x).take(r));
    }
    knots.extend(std::iter::repeat(points[n - 1]).take(p + 1));
    knots
}

fn lerp<T: RealField + Copy>(t: T, a: T, b: T) -> T {
    (T::one() - t) * a + t * b
}

/// Creates a basis over `elements` uniform elements of `[a, b]`.
///
/// Interior knots are repeated `repeated_nodes + 1` times, which gives continuity
/// `degree - repeated_nodes - 1` across interior breakpoints.
///
/// # Panics
///
/// Panics if `elements == 0`, `a >= b` or `repeated_nodes > degree`.
pub fn create_basis<T: RealField + Copy>(
    a: T,
    b: T,
    degree: usize,
    elements: usize,
    repeated_nodes: usize,
) -> BsplineBasis<T> {
    create_graded_basis(a, b, degree, elements, repeated_nodes, &Grading::uniform())
}

/// Creates a basis with interior knots distributed according to the given grading.
///
/// The `i`-th interior knot is placed at `a + s (b - a)` with `s = grading.apply(i / elements)`.
///
/// # Panics
///
/// Panics if `elements == 0`, `a >= b`, `repeated_nodes > degree` or the grading is invalid.
pub fn create_graded_basis<T: RealField + Copy>(
    a: T,
    b: T,
    degree: usize,
    elements: usize,
    repeated_nodes: usize,
    grading: &Grading,
) -> BsplineBasis<T> {
    assert!(elements > 0, "Number of elements must be positive");
    assert!(a < b, "Invalid domain [{a}, {b}]");
    assert!(
        repeated_nodes <= degree,
        "Interior knots of a degree {degree} basis can be repeated at most {degree} times"
    );
    grading.assert_valid();

    let points: Vec<T> = (0..=elements)
        .map(|i| match i {
            0 => a,
            i if i == elements => b,
            i => lerp(convert(grading.apply(i as f64 / elements as f64)), a, b),
        })
        .collect();
    BsplineBasis::new(knots_over_breakpoints(&points, degree, repeated_nodes + 1), degree)
}

/// Creates a basis with the given breakpoints and prescribed interior continuity.
///
/// A continuity of `-1` gives a discontinuous basis.
///
/// # Panics
///
/// Panics if `continuity` is not in `[-1, degree - 1]` or the breakpoints are not strictly
/// increasing.
pub fn basis_from_breakpoints<T: RealField + Copy>(
    points: &[T],
    degree: usize,
    continuity: isize,
) -> BsplineBasis<T> {
    assert!(
        continuity >= -1 && continuity < degree as isize,
        "Continuity {continuity} is not valid for a basis of degree {degree}"
    );
    assert!(points.windows(2).all(|w| w[0] < w[1]), "Breakpoints must be strictly increasing");
    let r = (degree as isize - continuity) as usize;
    BsplineBasis::new(knots_over_breakpoints(points, degree, r), degree)
}

/// Piecewise linear map of `[0, 1]` onto itself sending `x0` to `y0`.
///
/// With `y0 > x0`, knots are concentrated towards the right end of the domain, where solutions
/// of convection-dominated problems develop boundary layers.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grading {
    pub x0: f64,
    pub y0: f64,
}

impl Default for Grading {
    fn default() -> Self {
        Self { x0: 0.5, y0: 0.9 }
    }
}

impl Grading {
    /// # Panics
    ///
    /// Panics if `x0` or `y0` is not in the open interval `(0, 1)`.
    pub fn new(x0: f64, y0: f64) -> Self {
        let grading = Self { x0, y0 };
        grading.assert_valid();
        grading
    }

    pub fn uniform() -> Self {
        Self { x0: 0.5, y0: 0.5 }
    }

    fn assert_valid(&self) {
        let Self { x0, y0 } = *self;
        assert!(0.0 < x0 && x0 < 1.0, "Grading point x0 = {x0} must lie in (0, 1)");
        assert!(0.0 < y0 && y0 < 1.0, "Grading point y0 = {y0} must lie in (0, 1)");
    }

    /// # Panics
    ///
    /// Panics if `x0` or `y0` is not in the open interval `(0, 1)`.
    pub fn apply(&self, t: f64) -> f64 {
        self.assert_valid();
        let Self { x0, y0 } = *self;
        if t < x0 {
            t / x0 * y0
        } else {
            (t - x0) / (1.0 - x0) * (1.0 - y0) + y0
        }
    }
}

/// Transition point of a Shishkin mesh with `n` elements for a layer of width `eps`.
pub fn shishkin_transition(n: usize, eps: f64) -> f64 {
    (n as f64).log2() * eps
}
