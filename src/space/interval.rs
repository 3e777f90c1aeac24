use fenris_bspline::{first_nonzero_dofs, BsplineBasis};
use std::ops::Range;

/// Knot span index of every element, in increasing order.
///
/// The spans are the indices `i` with `knots[i] != knots[i + 1]`.
pub fn spans_for_elements(basis: &BsplineBasis) -> Vec<usize> {
    let spans: Vec<usize> = basis
        .knots()
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0] != w[1])
        .map(|(i, _)| i)
        .collect();
    assert_eq!(
        spans.len(),
        basis.element_count(),
        "Number of knot spans does not match number of elements"
    );
    spans
}

/// A one-dimensional B-spline space.
///
/// Elements are the non-degenerate knot spans of the basis and facets are its breakpoints, so
/// element and facet indices agree with those of an [`IntervalMesh`](crate::mesh::IntervalMesh)
/// over the breakpoints. Every element supports exactly `degree + 1` basis functions with
/// consecutive indices.
#[derive(Debug, Clone, PartialEq)]
pub struct BsplineSpace1d {
    basis: BsplineBasis,
    first_dofs: Vec<usize>,
    spans: Vec<usize>,
}

impl BsplineSpace1d {
    pub fn new(basis: BsplineBasis) -> Self {
        let first_dofs = first_nonzero_dofs(&basis);
        let spans = spans_for_elements(&basis);
        Self {
            basis,
            first_dofs,
            spans,
        }
    }

    pub fn basis(&self) -> &BsplineBasis {
        &self.basis
    }

    pub fn degree(&self) -> usize {
        self.basis.degree()
    }

    pub fn dofs_per_element(&self) -> usize {
        self.degree() + 1
    }

    pub fn dof_count(&self) -> usize {
        self.basis.dof_count()
    }

    pub fn element_count(&self) -> usize {
        self.first_dofs.len()
    }

    pub fn facet_count(&self) -> usize {
        self.element_count() + 1
    }

    pub fn element_dof_count(&self, _element: usize) -> usize {
        self.dofs_per_element()
    }

    pub fn facet_dof_count(&self, facet: usize) -> usize {
        self.dofs_on_facet(facet).len()
    }

    pub fn dofs(&self) -> Range<usize> {
        0..self.dof_count()
    }

    pub fn dofs_on_element(&self, element: usize) -> Range<usize> {
        let first = self.first_dofs[element];
        first..first + self.dofs_per_element()
    }

    pub fn first_dof(&self, element: usize) -> usize {
        self.first_dofs[element]
    }

    pub fn last_dof(&self, element: usize) -> usize {
        self.first_dof(element) + self.dofs_per_element() - 1
    }

    pub fn local_index(&self, dof: usize, element: usize) -> usize {
        let range = self.dofs_on_element(element);
        assert!(range.contains(&dof), "DOF {dof} is not supported on element {element}");
        dof - range.start
    }

    /// Element to the left of the facet, if any.
    pub fn element_left(&self, facet: usize) -> Option<usize> {
        self.assert_valid_facet(facet);
        (facet > 0).then(|| facet - 1)
    }

    /// Element to the right of the facet, if any.
    pub fn element_right(&self, facet: usize) -> Option<usize> {
        self.assert_valid_facet(facet);
        (facet < self.element_count()).then(|| facet)
    }

    /// All DOFs supported on at least one of the elements adjacent to the facet.
    pub fn dofs_on_facet(&self, facet: usize) -> Range<usize> {
        self.assert_valid_facet(facet);
        let last_element = self.element_count() - 1;
        let left = facet.saturating_sub(1);
        let right = facet.min(last_element);
        self.first_dofs[left]..self.first_dofs[right] + self.dofs_per_element()
    }

    /// Index of the DOF among [`dofs_on_facet`](Self::dofs_on_facet).
    pub fn facet_local_index(&self, dof: usize, facet: usize) -> usize {
        let range = self.dofs_on_facet(facet);
        assert!(range.contains(&dof), "DOF {dof} is not supported on facet {facet}");
        dof - range.start
    }

    /// Knot span used to evaluate the basis on the given element.
    pub fn span(&self, element: usize) -> usize {
        self.spans[element]
    }

    pub fn breakpoint(&self, facet: usize) -> f64 {
        self.basis.breakpoints()[facet]
    }

    fn assert_valid_facet(&self, facet: usize) {
        assert!(
            facet < self.facet_count(),
            "Facet index {facet} out of range (facet count {})",
            self.facet_count()
        );
    }
}
