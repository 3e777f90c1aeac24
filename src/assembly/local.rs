use crate::assembly::buffers::DofBuffer;
use crate::quadrature::QuadraturePoints;
use crate::space::DofIndex;
use nalgebra::{DMatrix, DVector};

/// Accumulates local matrices and vectors by quadrature.
///
/// At each quadrature point, every DOF is evaluated once into a buffer of values of type `V`.
/// The form is then evaluated for all pairs of buffered values. Local matrices are indexed as
/// `(test, trial)`.
#[derive(Debug, Clone)]
pub struct LocalAssembler<V> {
    values: Vec<V>,
}

impl<V> Default for LocalAssembler<V> {
    fn default() -> Self {
        Self { values: Vec::new() }
    }
}

impl<V> LocalAssembler<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes `M[(j, i)] = sum_q form(u_i(q), v_j(q), x_q) w_q` over the DOFs in `dofs`.
    pub fn assemble_matrix<P>(
        &mut self,
        output: &mut DMatrix<f64>,
        dofs: &DofBuffer,
        points: &P,
        mut evaluate: impl FnMut(DofIndex, P::Index) -> V,
        form: impl Fn(&V, &V, &P::Point) -> f64,
    ) where
        P: QuadraturePoints,
    {
        let n = dofs.len();
        output.resize_mut(n, n, 0.0);
        output.fill(0.0);

        for q in points.indices() {
            let (x, w) = points.data(q);
            self.values.clear();
            self.values
                .extend(dofs.dofs().iter().map(|&dof| evaluate(dof, q)));

            for (u, &i) in self.values.iter().zip(dofs.local_indices()) {
                for (v, &j) in self.values.iter().zip(dofs.local_indices()) {
                    output[(j, i)] += form(u, v, &x) * w;
                }
            }
        }
    }

    /// Computes `b[j] = sum_q form(v_j(q), x_q) w_q` over the DOFs in `dofs`.
    pub fn assemble_vector<P>(
        &mut self,
        output: &mut DVector<f64>,
        dofs: &DofBuffer,
        points: &P,
        mut evaluate: impl FnMut(DofIndex, P::Index) -> V,
        form: impl Fn(&V, &P::Point) -> f64,
    ) where
        P: QuadraturePoints,
    {
        let n = dofs.len();
        output.resize_vertically_mut(n, 0.0);
        output.fill(0.0);

        for q in points.indices() {
            let (x, w) = points.data(q);
            self.values.clear();
            self.values
                .extend(dofs.dofs().iter().map(|&dof| evaluate(dof, q)));

            for (v, &j) in self.values.iter().zip(dofs.local_indices()) {
                output[j] += form(v, &x) * w;
            }
        }
    }
}
