use crate::mesh::{EdgeIndex, ElementIndex};
use crate::space::{BsplineSpace2d, DofIndex};

/// The DOFs of one element or facet together with their local and global indices.
///
/// Reused across elements to avoid repeated allocation.
#[derive(Debug, Clone, Default)]
pub struct DofBuffer {
    dofs: Vec<DofIndex>,
    local_indices: Vec<usize>,
    global_indices: Vec<usize>,
}

impl DofBuffer {
    pub fn populate_element_dofs(&mut self, space: &BsplineSpace2d, element: ElementIndex) {
        self.clear();
        for dof in space.dofs_on_element(element) {
            self.dofs.push(dof);
            self.local_indices.push(space.local_index(dof, element));
            self.global_indices.push(space.global_index(dof));
        }
    }

    pub fn populate_facet_dofs(&mut self, space: &BsplineSpace2d, facet: EdgeIndex) {
        self.clear();
        for dof in space.dofs_on_facet(facet) {
            self.dofs.push(dof);
            self.local_indices.push(space.facet_local_index(dof, facet));
            self.global_indices.push(space.global_index(dof));
        }
    }

    fn clear(&mut self) {
        self.dofs.clear();
        self.local_indices.clear();
        self.global_indices.clear();
    }

    pub fn len(&self) -> usize {
        self.dofs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dofs.is_empty()
    }

    pub fn dofs(&self) -> &[DofIndex] {
        &self.dofs
    }

    pub fn local_indices(&self) -> &[usize] {
        &self.local_indices
    }

    pub fn global_indices(&self) -> &[usize] {
        &self.global_indices
    }
}
