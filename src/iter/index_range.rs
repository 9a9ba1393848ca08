use std::iter::FusedIterator;

/// Indices, in one dimension, of the nodes of one level of a mesh hierarchy.
///
/// The indices are not stored. Coarse position `i` is mapped to the finest mesh index
/// `min(i * stride, size_finest - 1)`, so the first and last nodes of the finest mesh
/// belong to every level.
#[derive(Debug, Clone, Copy)]
pub struct TensorIndexRange {
    /// Size in this dimension of the finest mesh in the hierarchy.
    pub size_finest: usize,
    /// Size in this dimension of the mesh described by the range.
    pub size_coarse: usize,
    stride: usize,
}

impl TensorIndexRange {
    pub(crate) fn new(size_finest: usize, size_coarse: usize, stride: usize) -> Self {
        debug_assert!(size_coarse >= 1 && size_coarse <= size_finest);
        debug_assert!(stride >= 1);
        Self {
            size_finest,
            size_coarse,
            stride,
        }
    }

    /// A range yielding the single index `0`.
    ///
    /// Useful wherever an operation is written over all `N` dimensions but one of them
    /// should not take part.
    pub fn singleton() -> Self {
        Self::new(1, 1, 1)
    }

    /// Number of indices in the range.
    pub fn size(&self) -> usize {
        self.size_coarse
    }

    /// Finest mesh index at a position in the range, or `None` past the end.
    pub fn get(&self, position: usize) -> Option<usize> {
        (position < self.size_coarse).then(|| self.index_at(position))
    }

    /// Whether a finest mesh index belongs to the range.
    pub fn contains(&self, index: usize) -> bool {
        index < self.size_finest
            && (index.is_multiple_of(self.stride) || index + 1 == self.size_finest)
    }

    pub(crate) fn index_at(&self, position: usize) -> usize {
        (position * self.stride).min(self.size_finest - 1)
    }

    /// Cursor at the first index.
    pub fn begin(&self) -> IndexCursor {
        IndexCursor {
            range: *self,
            position: 0,
        }
    }

    /// Cursor one past the last index.
    pub fn end(&self) -> IndexCursor {
        IndexCursor {
            range: *self,
            position: self.size_coarse,
        }
    }

    pub fn iter(&self) -> Indices {
        Indices {
            range: *self,
            front: 0,
            back: self.size_coarse,
        }
    }
}

impl PartialEq for TensorIndexRange {
    fn eq(&self, other: &Self) -> bool {
        self.size_finest == other.size_finest && self.size_coarse == other.size_coarse
    }
}

impl Eq for TensorIndexRange {}

impl IntoIterator for TensorIndexRange {
    type Item = usize;
    type IntoIter = Indices;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &TensorIndexRange {
    type Item = usize;
    type IntoIter = Indices;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Position in a [`TensorIndexRange`].
///
/// Cursors can be stepped in both directions, so they are what node neighbors are
/// computed from. Any number of cursors into the same range can be held at once and
/// each yields the same indices on every pass. Two cursors compare equal when their
/// positions are equal; the range is not compared.
#[derive(Debug, Clone, Copy)]
pub struct IndexCursor {
    range: TensorIndexRange,
    position: usize,
}

impl IndexCursor {
    /// Finest mesh index at the cursor.
    ///
    /// ## Panics
    ///
    /// In debug builds, if the cursor is at the end of its range.
    pub fn get(&self) -> usize {
        debug_assert!(self.position < self.range.size_coarse);
        self.range.index_at(self.position)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn range(&self) -> &TensorIndexRange {
        &self.range
    }

    pub fn is_begin(&self) -> bool {
        self.position == 0
    }

    /// whether the cursor is at the last index of the range (not past it)
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.range.size_coarse
    }

    pub fn is_end(&self) -> bool {
        self.position >= self.range.size_coarse
    }

    pub fn increment(&mut self) {
        self.position += 1;
    }

    pub fn decrement(&mut self) {
        debug_assert!(self.position > 0);
        self.position -= 1;
    }

    pub(crate) fn rewind(&mut self) {
        self.position = 0;
    }
}

impl PartialEq for IndexCursor {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for IndexCursor {}

/// Iterator over the finest mesh indices of a [`TensorIndexRange`].
#[derive(Debug, Clone)]
pub struct Indices {
    range: TensorIndexRange,
    front: usize,
    back: usize,
}

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        let index = self.range.index_at(self.front);
        self.front += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Indices {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        Some(self.range.index_at(self.back))
    }
}

impl ExactSizeIterator for Indices {}

impl FusedIterator for Indices {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dyadic_range() {
        let range = TensorIndexRange::new(9, 3, 4);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![0, 4, 8]);
        assert_eq!(range.iter().rev().collect::<Vec<_>>(), vec![8, 4, 0]);
        assert_eq!(range.iter().len(), 3);
    }

    #[test]
    fn last_index_clamped() {
        // 6 nodes: multiples of 4 below 5, then 5 itself
        let range = TensorIndexRange::new(6, 3, 4);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![0, 4, 5]);
        assert!(range.contains(5));
        assert!(range.contains(4));
        assert!(!range.contains(2));
        assert!(!range.contains(6));
        assert_eq!(range.get(2), Some(5));
        assert_eq!(range.get(3), None);
    }

    #[test]
    fn singleton() {
        let range = TensorIndexRange::singleton();
        assert_eq!(range.size(), 1);
        assert_eq!(range.iter().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn cursors_step_both_ways() {
        let range = TensorIndexRange::new(5, 5, 1);
        let mut a = range.begin();
        let b = a;
        a.increment();
        a.increment();
        assert_eq!(a.get(), 2);
        assert_eq!(b.get(), 0);
        a.decrement();
        assert_eq!(a.get(), 1);
        assert_ne!(a, b);

        let mut c = range.begin();
        while c != range.end() {
            c.increment();
        }
        assert!(c.is_end());
    }

    #[test]
    fn equality_ignores_stride() {
        // two nodes remain once the stride covers the whole axis
        assert_eq!(TensorIndexRange::new(3, 2, 2), TensorIndexRange::new(3, 2, 8));
        assert_ne!(TensorIndexRange::new(5, 3, 2), TensorIndexRange::new(5, 2, 4));
    }
}
