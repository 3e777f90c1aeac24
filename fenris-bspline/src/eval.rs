use crate::BsplineBasis;
use nalgebra::{convert, DMatrix, RealField};

/// Scratch storage for basis evaluation.
///
/// A context is tied to a degree and can be reused for any number of evaluations with bases
/// of that degree. Each thread of evaluation needs its own context.
#[derive(Debug, Clone)]
pub struct BasisEvalContext<T: RealField + Copy = f64> {
    degree: usize,
    ndu: DMatrix<T>,
    a: DMatrix<T>,
    left: Vec<T>,
    right: Vec<T>,
}

impl<T: RealField + Copy> BasisEvalContext<T> {
    pub fn new(degree: usize) -> Self {
        let n = degree + 1;
        Self {
            degree,
            ndu: DMatrix::zeros(n, n),
            a: DMatrix::zeros(2, n),
            left: vec![T::zero(); n],
            right: vec![T::zero(); n],
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

/// Finds the knot span `s` with `knots[s] <= x < knots[s + 1]`.
///
/// The result is always a non-degenerate span in `[p, dof_count - 1]`. Points at or beyond the
/// right end of the domain are assigned to the last span, points at or before the left end to
/// the first.
pub fn find_span<T: RealField + Copy>(x: T, basis: &BsplineBasis<T>) -> usize {
    let knots = basis.knots();
    let p = basis.degree();
    let n = basis.dof_count();

    if x >= knots[n] {
        let mut s = n - 1;
        while knots[s] == knots[s + 1] {
            s -= 1;
        }
        return s;
    }
    if x <= knots[p] {
        let mut s = p;
        while knots[s] == knots[s + 1] {
            s += 1;
        }
        return s;
    }

    // Invariant: knots[low] <= x < knots[high]
    let (mut low, mut high) = (p, n);
    while high - low > 1 {
        let mid = (low + high) / 2;
        if x < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
    }
    low
}

/// Index of the first nonzero basis function on each element.
pub fn first_nonzero_dofs<T: RealField + Copy>(basis: &BsplineBasis<T>) -> Vec<usize> {
    let p = basis.degree();
    let half: T = convert(0.5);
    basis
        .breakpoints()
        .windows(2)
        .map(|w| find_span(half * (w[0] + w[1]), basis) - p)
        .collect()
}

/// Evaluates the `p + 1` basis functions that are nonzero in `span`, together with their
/// derivatives up to order `ders`.
///
/// Results are stored derivative-major: `out[k * (p + 1) + j]` holds the `k`-th derivative of
/// basis function `span - p + j`. Derivatives of order larger than `p` vanish.
///
/// `x` need not lie inside the span. In that case the polynomial pieces of the span are
/// extrapolated, which is what one-sided evaluation at breakpoints requires.
///
/// # Panics
///
/// Panics if the context degree does not match the basis, if `out` is too small or if `span`
/// is not a valid span index.
pub fn eval_basis_with_derivatives<T: RealField + Copy>(
    span: usize,
    x: T,
    basis: &BsplineBasis<T>,
    out: &mut [T],
    ders: usize,
    context: &mut BasisEvalContext<T>,
) {
    let p = basis.degree();
    let knots = basis.knots();
    let n = p + 1;
    assert_eq!(context.degree, p, "Evaluation context has wrong degree");
    assert!(out.len() >= (ders + 1) * n, "Output buffer too small");
    assert!(span >= p && span < basis.dof_count(), "Invalid span {span}");

    let BasisEvalContext { ndu, a, left, right, .. } = context;

    // Basis functions in the upper triangle, knot differences in the lower triangle
    ndu[(0, 0)] = T::one();
    for j in 1..=p {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = T::zero();
        for r in 0..j {
            ndu[(j, r)] = right[r + 1] + left[j - r];
            let temp = ndu[(r, j - 1)] / ndu[(j, r)];
            ndu[(r, j)] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        ndu[(j, j)] = saved;
    }

    out[..(ders + 1) * n].fill(T::zero());
    for j in 0..=p {
        out[j] = ndu[(j, p)];
    }

    let max_order = ders.min(p);
    for r in 0..=p {
        let (mut s1, mut s2) = (0, 1);
        a[(0, 0)] = T::one();
        for k in 1..=max_order {
            let mut d = T::zero();
            let rk = r as isize - k as isize;
            let pk = p - k;
            if r >= k {
                let rk = rk as usize;
                a[(s2, 0)] = a[(s1, 0)] / ndu[(pk + 1, rk)];
                d = a[(s2, 0)] * ndu[(rk, pk)];
            }
            let j1 = if rk >= -1 { 1 } else { (-rk) as usize };
            let j2 = if r <= pk + 1 { k - 1 } else { p - r };
            for j in j1..=j2 {
                let idx = (rk + j as isize) as usize;
                a[(s2, j)] = (a[(s1, j)] - a[(s1, j - 1)]) / ndu[(pk + 1, idx)];
                d += a[(s2, j)] * ndu[(idx, pk)];
            }
            if r <= pk {
                a[(s2, k)] = -a[(s1, k - 1)] / ndu[(pk + 1, r)];
                d += a[(s2, k)] * ndu[(r, pk)];
            }
            out[k * n + r] = d;
            std::mem::swap(&mut s1, &mut s2);
        }
    }

    let mut factor = p;
    for k in 1..=max_order {
        let scale: T = convert(factor as f64);
        for j in 0..n {
            out[k * n + j] *= scale;
        }
        factor *= p - k;
    }
}

/// Evaluates the `p + 1` basis functions that are nonzero in `span` at `x`.
pub fn eval_basis<T: RealField + Copy>(
    span: usize,
    x: T,
    basis: &BsplineBasis<T>,
    out: &mut [T],
    context: &mut BasisEvalContext<T>,
) {
    eval_basis_with_derivatives(span, x, basis, out, 0, context);
}
