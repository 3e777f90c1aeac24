/// Bijection between two-dimensional multi-indices and linear indices.
///
/// The layout covers `[0, n0) x [0, n1)` and is row-major: the last index varies fastest,
/// `linear = i * n1 + j`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MultiIndexLayout {
    extents: [usize; 2],
}

impl MultiIndexLayout {
    pub fn new(extents: [usize; 2]) -> Self {
        Self { extents }
    }

    pub fn extents(&self) -> [usize; 2] {
        self.extents
    }

    pub fn len(&self) -> usize {
        self.extents[0] * self.extents[1]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn linear_index(&self, index: [usize; 2]) -> usize {
        let [i, j] = index;
        let [n0, n1] = self.extents;
        assert!(
            i < n0 && j < n1,
            "Multi-index ({i}, {j}) out of bounds for extents ({n0}, {n1})"
        );
        i * n1 + j
    }

    #[inline]
    pub fn multi_index(&self, linear: usize) -> [usize; 2] {
        assert!(linear < self.len(), "Linear index {linear} out of bounds");
        let n1 = self.extents[1];
        [linear / n1, linear % n1]
    }
}
