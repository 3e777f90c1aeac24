//! The Laplace problem on a square, discretized with B-splines and Nitsche boundary conditions.
use crate::assembly::laplace::{
    assemble_boundary_data, assemble_boundary_penalty, assemble_interior_penalty, assemble_source, assemble_stiffness,
};
use crate::error::{estimate_H1_seminorm_error, estimate_L2_error};
use crate::function::BsplineFunction2d;
use crate::mesh::procedural::evenly_spaced;
use crate::mesh::RegularMesh;
use crate::quadrature::MeshQuadrature;
use crate::space::{BsplineSpace1d, BsplineSpace2d};
use eyre::{ensure, WrapErr};
use fenris_bspline::basis_from_breakpoints;
use fenris_quadrature::MAX_GAUSS_POINTS;
use fenris_sparse::{DirectSolver, TripletMatrix};
use log::{debug, info};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Parameters of a [`DgLaplace`] run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaplaceConfig {
    /// Interval used along both axes.
    pub domain: (f64, f64),
    /// Number of elements per axis.
    pub elements: usize,
    pub degree: usize,
    /// Continuity across interior element boundaries, `-1` for discontinuous spaces.
    pub continuity: isize,
    /// Gauss points per axis. Defaults to `degree + 1`.
    pub quadrature_points: Option<usize>,
    /// The penalty is `penalty_factor / h` with `h` the element size.
    pub penalty_factor: f64,
    /// Whether to add the symmetric interior-penalty terms on interior edges.
    pub interior_penalty: bool,
}

impl Default for LaplaceConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            elements: 128,
            degree: 3,
            continuity: 1,
            quadrature_points: None,
            penalty_factor: 1.0e6,
            interior_penalty: false,
        }
    }
}

impl LaplaceConfig {
    pub fn validate(&self) -> eyre::Result<()> {
        let (a, b) = self.domain;
        ensure!(
            a.is_finite() && b.is_finite() && a < b,
            "Invalid domain [{a}, {b}]"
        );
        ensure!(self.elements > 0, "Number of elements must be positive");
        ensure!(
            self.continuity >= -1 && self.continuity < self.degree as isize,
            "Continuity {} is not valid for degree {} (expected -1 to {})",
            self.continuity,
            self.degree,
            self.degree as isize - 1
        );
        let points = self.quadrature_point_count();
        ensure!(
            points >= 1 && points <= MAX_GAUSS_POINTS,
            "Number of quadrature points must be between 1 and {MAX_GAUSS_POINTS}, got {points}"
        );
        ensure!(
            self.penalty_factor.is_finite() && self.penalty_factor > 0.0,
            "Penalty factor must be positive, got {}",
            self.penalty_factor
        );
        ensure!(
            self.interior_penalty || self.continuity >= 0 || self.elements == 1,
            "Interior penalty terms are required for discontinuous (C-1) spaces"
        );
        Ok(())
    }

    pub fn quadrature_point_count(&self) -> usize {
        self.quadrature_points.unwrap_or(self.degree + 1)
    }

    /// Element size of the uniform mesh.
    pub fn mesh_size(&self) -> f64 {
        (self.domain.1 - self.domain.0) / self.elements as f64
    }

    pub fn penalty(&self) -> f64 {
        self.penalty_factor / self.mesh_size()
    }
}

/// Right-hand side data of `-Δu = f` in the domain, `u = g` on the boundary.
pub trait LaplaceProblemData {
    fn source(&self, x: &Point2<f64>) -> f64;

    fn boundary_value(&self, x: &Point2<f64>) -> f64;
}

/// A known solution to compare against.
pub trait ExactSolution {
    fn value(&self, x: &Point2<f64>) -> f64;

    fn gradient(&self, x: &Point2<f64>) -> Vector2<f64>;
}

/// Manufactured solution `u = 1 + sin(πx) sin(πy)`, with `f = -Δu` and `g = u`.
#[derive(Debug, Copy, Clone, Default)]
pub struct SineBumpSolution;

impl ExactSolution for SineBumpSolution {
    fn value(&self, x: &Point2<f64>) -> f64 {
        1.0 + (PI * x.x).sin() * (PI * x.y).sin()
    }

    fn gradient(&self, x: &Point2<f64>) -> Vector2<f64> {
        let (sx, cx) = (PI * x.x).sin_cos();
        let (sy, cy) = (PI * x.y).sin_cos();
        Vector2::new(PI * cx * sy, PI * sx * cy)
    }
}

impl LaplaceProblemData for SineBumpSolution {
    fn source(&self, x: &Point2<f64>) -> f64 {
        2.0 * PI * PI * (PI * x.x).sin() * (PI * x.y).sin()
    }

    fn boundary_value(&self, x: &Point2<f64>) -> f64 {
        self.value(x)
    }
}

/// Wall-clock time spent in each phase of a solve, in milliseconds.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PhaseTimings {
    pub matrix: f64,
    pub boundary: f64,
    pub interior: f64,
    pub rhs: f64,
    pub rhs_boundary: f64,
    pub solver: f64,
    pub error: f64,
}

fn millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1.0e3
}

/// Runs `f` and returns its result along with the elapsed time in milliseconds.
fn timed<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let start = Instant::now();
    let result = f();
    (result, millis(start.elapsed()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaplaceReport {
    pub dofs: usize,
    pub nonzero_entries: usize,
    pub l2_error: f64,
    pub h1_seminorm_error: f64,
    pub timings: PhaseTimings,
}

/// The discrete solution along with statistics of the solve.
#[derive(Debug, Clone)]
pub struct LaplaceSolution<'a> {
    pub function: BsplineFunction2d<'a>,
    pub nonzero_entries: usize,
    pub timings: PhaseTimings,
}

/// Assembled linear system.
#[derive(Debug, Clone)]
pub struct LaplaceSystem {
    pub matrix: TripletMatrix,
    pub rhs: Vec<f64>,
    pub timings: PhaseTimings,
}

fn has_interior_discontinuity(space: &BsplineSpace1d) -> bool {
    (1..space.element_count()).any(|i| space.basis().continuity(i) < 0)
}

/// Interior-penalty discretization of the Laplace problem on a tensor-product B-spline space.
#[derive(Debug, Clone)]
pub struct DgLaplace {
    config: LaplaceConfig,
    mesh: RegularMesh,
    space: BsplineSpace2d,
}

impl DgLaplace {
    /// Sets up a uniform mesh and a space with the configured degree and continuity.
    pub fn new(config: LaplaceConfig) -> eyre::Result<Self> {
        config.validate()?;
        let (a, b) = config.domain;
        let points = evenly_spaced(a, b, config.elements);
        let basis = basis_from_breakpoints(&points, config.degree, config.continuity);
        let mesh = RegularMesh::new(points.clone(), points);
        let space = BsplineSpace2d::new(basis.clone(), basis);
        Self::from_parts(config, mesh, space)
    }

    /// Uses the given mesh and space. The breakpoints of the space must be the mesh points.
    pub fn from_parts(config: LaplaceConfig, mesh: RegularMesh, space: BsplineSpace2d) -> eyre::Result<Self> {
        config.validate()?;
        ensure!(
            space.space_x().basis().breakpoints() == mesh.mesh_x().points()
                && space.space_y().basis().breakpoints() == mesh.mesh_y().points(),
            "Breakpoints of the space do not match the mesh"
        );

        let discontinuous = has_interior_discontinuity(space.space_x()) || has_interior_discontinuity(space.space_y());
        ensure!(
            config.interior_penalty || !discontinuous,
            "Interior penalty terms are required for discontinuous (C-1) spaces"
        );
        Ok(Self { config, mesh, space })
    }

    pub fn config(&self) -> &LaplaceConfig {
        &self.config
    }

    pub fn mesh(&self) -> &RegularMesh {
        &self.mesh
    }

    pub fn space(&self) -> &BsplineSpace2d {
        &self.space
    }

    pub fn quadrature(&self) -> MeshQuadrature<'_> {
        MeshQuadrature::new(&self.mesh, self.config.quadrature_point_count())
    }

    pub fn assemble(&self, data: &impl LaplaceProblemData) -> LaplaceSystem {
        let n = self.space.dof_count();
        let quadrature = self.quadrature();
        let eta = self.config.penalty();
        let mut timings = PhaseTimings::default();
        info!("DoFs: {n}");

        let mut matrix = TripletMatrix::new(n);
        debug!("Assembling element stiffness");
        (_, timings.matrix) = timed(|| assemble_stiffness(&mut matrix, &self.space, &quadrature));
        debug!("Assembling boundary terms");
        (_, timings.boundary) =
            timed(|| assemble_boundary_penalty(&mut matrix, &self.space, &quadrature, eta));
        if self.config.interior_penalty {
            debug!("Assembling interior penalty terms");
            (_, timings.interior) =
                timed(|| assemble_interior_penalty(&mut matrix, &self.space, &quadrature, eta));
        }
        info!("Non-zeros: {}", matrix.nonzero_entries());

        debug!("Computing RHS");
        let mut rhs = vec![0.0; n];
        (_, timings.rhs) = timed(|| assemble_source(&mut rhs, &self.space, &quadrature, |x| data.source(x)));
        (_, timings.rhs_boundary) = timed(|| {
            assemble_boundary_data(&mut rhs, &self.space, &quadrature, eta, |x| data.boundary_value(x))
        });

        LaplaceSystem { matrix, rhs, timings }
    }

    pub fn solve(&self, data: &impl LaplaceProblemData) -> eyre::Result<LaplaceSolution<'_>> {
        let LaplaceSystem {
            matrix,
            mut rhs,
            mut timings,
        } = self.assemble(data);

        debug!("Solving");
        let (result, solver_time) = timed(|| DirectSolver::new().solve(&matrix, &mut rhs));
        result.wrap_err("Failed to solve linear system")?;
        timings.solver = solver_time;

        for (name, time) in [
            ("Matrix", timings.matrix),
            ("Bndry", timings.boundary),
            ("Interior", timings.interior),
            ("RHS", timings.rhs),
            ("RHS bd", timings.rhs_boundary),
            ("Solver", timings.solver),
        ] {
            info!("{name:>8}: {time:>10.2} ms");
        }

        Ok(LaplaceSolution {
            function: BsplineFunction2d::from_coefficients(&self.space, rhs),
            nonzero_entries: matrix.nonzero_entries(),
            timings,
        })
    }

    /// Computes the errors of the solution and collects statistics.
    pub fn report(&self, solution: &LaplaceSolution, exact: &impl ExactSolution) -> eyre::Result<LaplaceReport> {
        ensure!(
            std::ptr::eq(solution.function.space(), &self.space),
            "Solution does not belong to this discretization"
        );
        let quadrature = self.quadrature();

        debug!("Computing error");
        let ((l2_error, h1_seminorm_error), error_time) = timed(|| {
            let l2 = estimate_L2_error(&solution.function, |x| exact.value(x), &quadrature);
            let h1 = estimate_H1_seminorm_error(&solution.function, |x| exact.gradient(x), &quadrature);
            (l2, h1)
        });
        info!("error = {l2_error}");

        let mut timings = solution.timings;
        timings.error = error_time;
        info!("{:>8}: {:>10.2} ms", "Error", timings.error);
        Ok(LaplaceReport {
            dofs: self.space.dof_count(),
            nonzero_entries: solution.nonzero_entries,
            l2_error,
            h1_seminorm_error,
            timings,
        })
    }
}
