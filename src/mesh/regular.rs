use crate::mesh::{Interval, IntervalMesh};
use itertools::{iproduct, Itertools, Product};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::ops::Range;

/// Element of a [`RegularMesh`], given by its x and y element indices.
pub type ElementIndex = (usize, usize);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Edge with constant y, running along the x axis.
    Horizontal,
    /// Edge with constant x, running along the y axis.
    Vertical,
}

/// Identifies an edge of a [`RegularMesh`].
///
/// For a horizontal edge, `ix` is the x element it spans and `iy` the y facet (point) it lies
/// on. For a vertical edge, `ix` is the x facet and `iy` the y element.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeIndex {
    pub ix: usize,
    pub iy: usize,
    pub dir: Orientation,
}

impl EdgeIndex {
    pub fn horizontal(ix: usize, iy: usize) -> Self {
        Self {
            ix,
            iy,
            dir: Orientation::Horizontal,
        }
    }

    pub fn vertical(ix: usize, iy: usize) -> Self {
        Self {
            ix,
            iy,
            dir: Orientation::Vertical,
        }
    }
}

impl Display for EdgeIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = match self.dir {
            Orientation::Horizontal => "-",
            Orientation::Vertical => "|",
        };
        write!(f, "({}, {})[{}]", self.ix, self.iy, sign)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ElementData {
    pub span_x: Interval,
    pub span_y: Interval,
}

impl ElementData {
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.span_x.midpoint(), self.span_y.midpoint())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeData {
    /// Extent of the edge along its free axis.
    pub span: Interval,
    /// Coordinate of the edge on its fixed axis.
    pub position: f64,
    pub direction: Orientation,
    pub normal: Vector2<f64>,
}

/// Tensor product of two interval meshes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegularMesh {
    mesh_x: IntervalMesh,
    mesh_y: IntervalMesh,
}

impl RegularMesh {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Self {
        Self::from_interval_meshes(IntervalMesh::new(xs), IntervalMesh::new(ys))
    }

    pub fn from_interval_meshes(mesh_x: IntervalMesh, mesh_y: IntervalMesh) -> Self {
        Self { mesh_x, mesh_y }
    }

    pub fn mesh_x(&self) -> &IntervalMesh {
        &self.mesh_x
    }

    pub fn mesh_y(&self) -> &IntervalMesh {
        &self.mesh_y
    }

    pub fn element_count(&self) -> usize {
        self.mesh_x.element_count() * self.mesh_y.element_count()
    }

    /// All elements, with the x index varying slowest.
    pub fn elements(&self) -> Product<Range<usize>, Range<usize>> {
        self.mesh_x.elements().cartesian_product(self.mesh_y.elements())
    }

    pub fn element(&self, element: ElementIndex) -> ElementData {
        let (ix, iy) = element;
        ElementData {
            span_x: self.mesh_x.subinterval(ix),
            span_y: self.mesh_y.subinterval(iy),
        }
    }

    /// All edges of the mesh, each exactly once: first the horizontal, then the vertical ones.
    pub fn facets(&self) -> Vec<EdgeIndex> {
        let horizontal = iproduct!(self.mesh_x.elements(), self.mesh_y.facets());
        let vertical = iproduct!(self.mesh_x.facets(), self.mesh_y.elements());
        horizontal
            .map(|(ix, iy)| EdgeIndex::horizontal(ix, iy))
            .chain(vertical.map(|(ix, iy)| EdgeIndex::vertical(ix, iy)))
            .collect()
    }

    pub fn boundary_facets(&self) -> Vec<EdgeIndex> {
        let horizontal = iproduct!(self.mesh_y.boundary_facets(), self.mesh_x.elements());
        let vertical = iproduct!(self.mesh_x.boundary_facets(), self.mesh_y.elements());
        horizontal
            .map(|(iy, ix)| EdgeIndex::horizontal(ix, iy))
            .chain(vertical.map(|(ix, iy)| EdgeIndex::vertical(ix, iy)))
            .collect()
    }

    pub fn interior_facets(&self) -> Vec<EdgeIndex> {
        let horizontal = iproduct!(self.mesh_x.elements(), self.mesh_y.interior_facets());
        let vertical = iproduct!(self.mesh_x.interior_facets(), self.mesh_y.elements());
        horizontal
            .map(|(ix, iy)| EdgeIndex::horizontal(ix, iy))
            .chain(vertical.map(|(ix, iy)| EdgeIndex::vertical(ix, iy)))
            .collect()
    }

    pub fn is_boundary_facet(&self, facet: EdgeIndex) -> bool {
        match facet.dir {
            Orientation::Horizontal => self.mesh_y.is_boundary_facet(facet.iy),
            Orientation::Vertical => self.mesh_x.is_boundary_facet(facet.ix),
        }
    }

    pub fn facet(&self, facet: EdgeIndex) -> EdgeData {
        let EdgeIndex { ix, iy, dir } = facet;
        match dir {
            Orientation::Horizontal => {
                let point = self.mesh_y.facet(iy);
                EdgeData {
                    span: self.mesh_x.subinterval(ix),
                    position: point.position,
                    direction: dir,
                    normal: Vector2::new(0.0, point.normal),
                }
            }
            Orientation::Vertical => {
                let point = self.mesh_x.facet(ix);
                EdgeData {
                    span: self.mesh_y.subinterval(iy),
                    position: point.position,
                    direction: dir,
                    normal: Vector2::new(point.normal, 0.0),
                }
            }
        }
    }
}
