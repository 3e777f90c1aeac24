//! Forms of the interior-penalty discretization of `-Δu = f` with Dirichlet data `g`.
//!
//! The bilinear form is
//!
//! ```text
//! a(u, v) = Σ_K ∫_K ∇u·∇v
//!         + Σ_{F ⊂ ∂Ω} ∫_F -(∇v·n) u - (∇u·n) v + η u v
//!         + Σ_{F interior} ∫_F -{∇u·n}[v] - {∇v·n}[u] + η [u][v]
//! ```
//!
//! and the linear form is `l(v) = Σ_K ∫_K f v + Σ_{F ⊂ ∂Ω} ∫_F -(∇v·n) g + η g v`. Here `[w]` is
//! the jump `w_left - w_right` and `{w}` the average across an interior edge, with `n` pointing
//! from the left (lower) element into the right (upper) one. On the boundary, `n` is the outward
//! normal.
//!
//! The interior terms vanish for spaces that are continuous across element boundaries.
use crate::assembly::buffers::DofBuffer;
use crate::assembly::global::{scatter_local_matrix, scatter_local_vector, ScatterMode};
use crate::assembly::local::LocalAssembler;
use crate::function::FunctionValue2d;
use crate::quadrature::MeshQuadrature;
use crate::space::{BsplineSpace2d, DofEvaluator};
use fenris_sparse::TripletMatrix;
use nalgebra::{DMatrix, DVector, Point2, Vector2};

#[inline]
pub fn stiffness_form(u: &FunctionValue2d, v: &FunctionValue2d) -> f64 {
    u.dx * v.dx + u.dy * v.dy
}

/// Symmetric Nitsche terms on a boundary edge with outward normal `normal`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NitscheForm {
    pub normal: Vector2<f64>,
    pub penalty: f64,
}

impl NitscheForm {
    pub fn bilinear(&self, u: &FunctionValue2d, v: &FunctionValue2d) -> f64 {
        let n = &self.normal;
        -v.grad().dot(n) * u.val - u.grad().dot(n) * v.val + self.penalty * (u.val * v.val)
    }

    /// Boundary terms of the right-hand side for Dirichlet value `g`.
    pub fn linear(&self, g: f64, v: &FunctionValue2d) -> f64 {
        -v.grad().dot(&self.normal) * g + self.penalty * g * v.val
    }
}

/// Average and jump of a basis function across an interior edge.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FacetTrace {
    pub average: FunctionValue2d,
    pub jump: FunctionValue2d,
}

/// Symmetric interior-penalty terms on an interior edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InteriorPenaltyForm {
    pub normal: Vector2<f64>,
    pub penalty: f64,
}

impl InteriorPenaltyForm {
    pub fn bilinear(&self, u: &FacetTrace, v: &FacetTrace) -> f64 {
        let n = &self.normal;
        -u.average.grad().dot(n) * v.jump.val - v.average.grad().dot(n) * u.jump.val
            + self.penalty * (u.jump.val * v.jump.val)
    }
}

/// Adds the element stiffness terms `∫ ∇u·∇v` to the system.
pub fn assemble_stiffness(system: &mut TripletMatrix, space: &BsplineSpace2d, quadrature: &MeshQuadrature) {
    let mut dofs = DofBuffer::default();
    let mut local = DMatrix::zeros(0, 0);
    let mut assembler = LocalAssembler::new();

    for element in quadrature.mesh().elements() {
        let points = quadrature.element_points(element);
        let eval = space.dof_evaluator(element, &points, 1);
        dofs.populate_element_dofs(space, element);
        assembler.assemble_matrix(
            &mut local,
            &dofs,
            &points,
            |dof, q| eval.evaluate(dof, q),
            |u, v, _| stiffness_form(u, v),
        );
        scatter_local_matrix(system, &local, &dofs, ScatterMode::All);
    }
}

/// Adds the Nitsche terms of all boundary edges to the system.
pub fn assemble_boundary_penalty(
    system: &mut TripletMatrix,
    space: &BsplineSpace2d,
    quadrature: &MeshQuadrature,
    penalty: f64,
) {
    let mut dofs = DofBuffer::default();
    let mut local = DMatrix::zeros(0, 0);
    let mut assembler = LocalAssembler::new();
    let mesh = quadrature.mesh();

    for facet in mesh.boundary_facets() {
        let form = NitscheForm {
            normal: mesh.facet(facet).normal,
            penalty,
        };
        let points = quadrature.facet_points(facet);
        let eval = space.facet_evaluator(facet, &points, 1);
        dofs.populate_facet_dofs(space, facet);
        assembler.assemble_matrix(
            &mut local,
            &dofs,
            &points,
            |dof, q| eval.evaluate(dof, q),
            |u, v, _| form.bilinear(u, v),
        );
        scatter_local_matrix(system, &local, &dofs, ScatterMode::NonZero);
    }
}

/// Adds the symmetric interior-penalty terms of all interior edges to the system.
pub fn assemble_interior_penalty(
    system: &mut TripletMatrix,
    space: &BsplineSpace2d,
    quadrature: &MeshQuadrature,
    penalty: f64,
) {
    let mut dofs = DofBuffer::default();
    let mut local = DMatrix::zeros(0, 0);
    let mut assembler = LocalAssembler::new();
    let mesh = quadrature.mesh();

    for facet in mesh.interior_facets() {
        let form = InteriorPenaltyForm {
            normal: mesh.facet(facet).normal,
            penalty,
        };
        let points = quadrature.facet_points(facet);
        let eval = space.facet_evaluator(facet, &points, 1);
        dofs.populate_facet_dofs(space, facet);
        assembler.assemble_matrix(
            &mut local,
            &dofs,
            &points,
            |dof, q| FacetTrace {
                average: eval.average(dof, q),
                jump: eval.jump(dof, q, 1.0),
            },
            |u, v, _| form.bilinear(u, v),
        );
        scatter_local_matrix(system, &local, &dofs, ScatterMode::NonZero);
    }
}

/// Adds `∫ f v` over all elements to the right-hand side.
pub fn assemble_source(
    rhs: &mut [f64],
    space: &BsplineSpace2d,
    quadrature: &MeshQuadrature,
    source: impl Fn(&Point2<f64>) -> f64,
) {
    assert_eq!(rhs.len(), space.dof_count(), "Right-hand side has wrong dimension");
    let mut dofs = DofBuffer::default();
    let mut local = DVector::zeros(0);
    let mut assembler = LocalAssembler::new();

    for element in quadrature.mesh().elements() {
        let points = quadrature.element_points(element);
        let eval = space.dof_evaluator(element, &points, 1);
        dofs.populate_element_dofs(space, element);
        assembler.assemble_vector(
            &mut local,
            &dofs,
            &points,
            |dof, q| eval.evaluate(dof, q),
            |v, x| v.val * source(x),
        );
        scatter_local_vector(rhs, &local, &dofs);
    }
}

/// Adds the Nitsche terms for Dirichlet data `g` on all boundary edges to the right-hand side.
pub fn assemble_boundary_data(
    rhs: &mut [f64],
    space: &BsplineSpace2d,
    quadrature: &MeshQuadrature,
    penalty: f64,
    g: impl Fn(&Point2<f64>) -> f64,
) {
    assert_eq!(rhs.len(), space.dof_count(), "Right-hand side has wrong dimension");
    let mut dofs = DofBuffer::default();
    let mut local = DVector::zeros(0);
    let mut assembler = LocalAssembler::new();
    let mesh = quadrature.mesh();

    for facet in mesh.boundary_facets() {
        let form = NitscheForm {
            normal: mesh.facet(facet).normal,
            penalty,
        };
        let points = quadrature.facet_points(facet);
        let eval = space.facet_evaluator(facet, &points, 1);
        dofs.populate_facet_dofs(space, facet);
        assembler.assemble_vector(
            &mut local,
            &dofs,
            &points,
            |dof, q| eval.evaluate(dof, q),
            |v, x| form.linear(g(x), v),
        );
        scatter_local_vector(rhs, &local, &dofs);
    }
}
