use super::product::{CartesianProduct, ProductCursor};
use super::TensorIndexRange;
use crate::prelude::*;
use std::fmt;
use std::iter::FusedIterator;

/// A node of a mesh level, along with the index ranges it was produced from.
///
/// Dereferences to its multiindex. Two nodes are equal when their multiindices are.
#[derive(Debug, Clone, Copy, Deref)]
pub struct TensorNode<const N: usize> {
    /// Multiindex of the node in the finest mesh.
    #[deref]
    pub multiindex: [usize; N],
    inner: ProductCursor<N>,
}

impl<const N: usize> TensorNode<N> {
    pub(crate) fn new(inner: ProductCursor<N>) -> Self {
        Self {
            multiindex: inner.multiindex(),
            inner,
        }
    }

    /// The node to the left in dimension `i` *in the mesh currently being iterated over*.
    ///
    /// A node on the lefthand boundary is its own predecessor.
    ///
    /// ## Panics
    ///
    /// If `i >= N`
    pub fn predecessor(&self, i: usize) -> Self {
        if self.inner.inner(i).is_begin() {
            return *self;
        }

        let mut inner = self.inner;
        inner.inner_mut(i).decrement();
        self.moved(inner, i)
    }

    /// The node to the right in dimension `i` *in the mesh currently being iterated over*.
    ///
    /// A node on the righthand boundary is its own successor.
    ///
    /// ## Panics
    ///
    /// If `i >= N`
    pub fn successor(&self, i: usize) -> Self {
        if self.inner.inner(i).is_last() {
            return *self;
        }

        let mut inner = self.inner;
        inner.inner_mut(i).increment();
        self.moved(inner, i)
    }

    /// Index range driving dimension `i`.
    pub fn range(&self, i: usize) -> &TensorIndexRange {
        self.inner.inner(i).range()
    }

    fn moved(&self, inner: ProductCursor<N>, i: usize) -> Self {
        let mut multiindex = self.multiindex;
        multiindex[i] = inner.inner(i).get();
        Self { multiindex, inner }
    }
}

impl<const N: usize> PartialEq for TensorNode<N> {
    fn eq(&self, other: &Self) -> bool {
        self.multiindex == other.multiindex
    }
}

impl<const N: usize> Eq for TensorNode<N> {}

/// Nodes of a particular level in a mesh hierarchy.
///
/// Neighbors of the yielded nodes are taken from the mesh of this level. See
/// [`TensorReservedNodeRange`](crate::TensorReservedNodeRange) for neighbors taken
/// from the mesh which introduced each node.
pub struct TensorNodeRange<'a, const N: usize, Real> {
    /// Associated mesh hierarchy.
    pub hierarchy: &'a TensorMeshHierarchy<N, Real>,
    l: usize,
    multiindices: CartesianProduct<N>,
}

impl<'a, const N: usize, Real> TensorNodeRange<'a, N, Real>
where
    Real: traits::Real,
{
    /// Nodes of level `l` of `hierarchy`.
    pub fn new(hierarchy: &'a TensorMeshHierarchy<N, Real>, l: usize) -> Result<Self, Error> {
        hierarchy.check_mesh_index_bounds(l)?;

        let mut factors = [TensorIndexRange::singleton(); N];
        for (dimension, factor) in factors.iter_mut().enumerate() {
            *factor = hierarchy.indices(l, dimension)?;
        }

        Ok(Self {
            hierarchy,
            l,
            multiindices: CartesianProduct::new(factors),
        })
    }
}

impl<'a, const N: usize, Real> TensorNodeRange<'a, N, Real> {
    /// Index of the level being iterated over.
    pub fn level(&self) -> usize {
        self.l
    }

    /// Number of nodes in the level.
    pub fn len(&self) -> usize {
        self.multiindices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.multiindices.is_empty()
    }

    pub fn iter(&self) -> Nodes<N> {
        Nodes {
            cursor: self.multiindices.begin(),
        }
    }

    pub(crate) fn begin(&self) -> ProductCursor<N> {
        self.multiindices.begin()
    }
}

impl<'a, const N: usize, Real> Clone for TensorNodeRange<'a, N, Real> {
    fn clone(&self) -> Self {
        Self {
            hierarchy: self.hierarchy,
            l: self.l,
            multiindices: self.multiindices,
        }
    }
}

impl<'a, const N: usize, Real> fmt::Debug for TensorNodeRange<'a, N, Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorNodeRange")
            .field("l", &self.l)
            .field("multiindices", &self.multiindices)
            .finish_non_exhaustive()
    }
}

impl<'a, const N: usize, Real> PartialEq for TensorNodeRange<'a, N, Real> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.hierarchy, other.hierarchy) && self.l == other.l
    }
}

impl<'a, 'b, const N: usize, Real> IntoIterator for &'b TensorNodeRange<'a, N, Real> {
    type Item = TensorNode<N>;
    type IntoIter = Nodes<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of a [`TensorNodeRange`].
#[derive(Debug, Clone)]
pub struct Nodes<const N: usize> {
    cursor: ProductCursor<N>,
}

impl<const N: usize> Iterator for Nodes<N> {
    type Item = TensorNode<N>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_end() {
            return None;
        }

        let node = TensorNode::new(self.cursor);
        self.cursor.advance();
        Some(node)
    }
}

impl<const N: usize> FusedIterator for Nodes<N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_on_current_level() {
        let hierarchy = TensorMeshHierarchy::<1, f64>::new([9]).unwrap();
        let range = TensorNodeRange::new(&hierarchy, 2).unwrap();
        let nodes: Vec<_> = range.iter().collect();
        assert_eq!(nodes.len(), 5);

        let node = nodes[2];
        assert_eq!(node.multiindex, [4]);
        assert_eq!(node.predecessor(0).multiindex, [2]);
        assert_eq!(node.successor(0).multiindex, [6]);
        // chained steps walk along the level
        assert_eq!(node.successor(0).successor(0).multiindex, [8]);
        assert_eq!(node.predecessor(0).predecessor(0).multiindex, [0]);
    }

    #[test]
    fn boundary_nodes_are_their_own_neighbors() {
        let hierarchy = TensorMeshHierarchy::<2, f64>::new([5, 3]).unwrap();
        let range = TensorNodeRange::new(&hierarchy, hierarchy.finest_level()).unwrap();
        let first = range.iter().next().unwrap();
        let last = range.iter().last().unwrap();

        for i in 0..2 {
            assert_eq!(first.predecessor(i), first);
            assert_eq!(last.successor(i), last);
        }
        assert_eq!(first.successor(1).multiindex, [0, 1]);
    }

    #[test]
    fn equality_by_hierarchy_and_level() {
        let hierarchy = TensorMeshHierarchy::<2, f64>::new([5, 5]).unwrap();
        let other = hierarchy.clone();
        let a = TensorNodeRange::new(&hierarchy, 1).unwrap();
        let b = TensorNodeRange::new(&hierarchy, 1).unwrap();
        let c = TensorNodeRange::new(&hierarchy, 2).unwrap();
        let d = TensorNodeRange::new(&other, 1).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn level_out_of_range() {
        let hierarchy = TensorMeshHierarchy::<1, f32>::new([5]).unwrap();
        assert!(matches!(
            TensorNodeRange::new(&hierarchy, 3),
            Err(Error::LevelOutOfRange { l: 3, finest: 2 })
        ));
    }
}
