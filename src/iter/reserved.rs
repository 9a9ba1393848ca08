use super::node::{TensorNode, TensorNodeRange};
use super::product::ProductCursor;
use crate::prelude::*;
use std::fmt;
use std::iter::FusedIterator;

/// 'Reserved' nodes of a particular level in a mesh hierarchy.
///
/// The nodes are the same as those of a [`TensorNodeRange`] on the same level, in the
/// same order. The difference is in their neighbors: a reserved node only knows the
/// nodes that were present when it was introduced. If we're iterating over the finest
/// level but `node` was already present in the coarsest level, `node.predecessor(i)`
/// and `node.successor(i)` are nodes of the coarsest level, even if closer neighbors
/// appear in later levels.
pub struct TensorReservedNodeRange<'a, const N: usize, Real> {
    /// Associated mesh hierarchy.
    pub hierarchy: &'a TensorMeshHierarchy<N, Real>,
    l: usize,
    ranges: Vec<TensorNodeRange<'a, N, Real>>,
}

impl<'a, const N: usize, Real> TensorReservedNodeRange<'a, N, Real>
where
    Real: traits::Real,
{
    /// Reserved nodes of level `l` of `hierarchy`.
    pub fn new(hierarchy: &'a TensorMeshHierarchy<N, Real>, l: usize) -> Result<Self, Error> {
        hierarchy.check_mesh_index_bounds(l)?;

        let ranges = (0..=l)
            .map(|k| TensorNodeRange::new(hierarchy, k))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { hierarchy, l, ranges })
    }
}

impl<'a, const N: usize, Real> TensorReservedNodeRange<'a, N, Real> {
    /// Index of the level being iterated over.
    pub fn level(&self) -> usize {
        self.l
    }

    /// Number of nodes in the level.
    pub fn len(&self) -> usize {
        self.ranges.last().map_or(0, |range| range.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> ReservedNodes<N> {
        ReservedNodes {
            inners: self.ranges.iter().map(|range| range.begin()).collect(),
        }
    }
}

impl<'a, const N: usize, Real> Clone for TensorReservedNodeRange<'a, N, Real> {
    fn clone(&self) -> Self {
        Self {
            hierarchy: self.hierarchy,
            l: self.l,
            ranges: self.ranges.clone(),
        }
    }
}

impl<'a, const N: usize, Real> fmt::Debug for TensorReservedNodeRange<'a, N, Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorReservedNodeRange")
            .field("l", &self.l)
            .field("ranges", &self.ranges)
            .finish_non_exhaustive()
    }
}

impl<'a, const N: usize, Real> PartialEq for TensorReservedNodeRange<'a, N, Real> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.hierarchy, other.hierarchy) && self.l == other.l
    }
}

impl<'a, 'b, const N: usize, Real> IntoIterator for &'b TensorReservedNodeRange<'a, N, Real> {
    type Item = TensorNode<N>;
    type IntoIter = ReservedNodes<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the nodes of a [`TensorReservedNodeRange`].
///
/// Holds one cursor per level from the coarsest up to the level being iterated over.
/// The last cursor visits every node and decides when iteration stops. Every level's
/// nodes come up in the same relative order as they do in that level's own iteration,
/// so each coarser cursor just waits until the finest one reaches its current node.
#[derive(Debug, Clone)]
pub struct ReservedNodes<const N: usize> {
    inners: Vec<ProductCursor<N>>,
}

impl<const N: usize> Iterator for ReservedNodes<N> {
    type Item = TensorNode<N>;

    fn next(&mut self) -> Option<Self::Item> {
        let multiindex = match self.inners.last() {
            Some(finest) if !finest.is_end() => finest.multiindex(),
            _ => return None,
        };

        // the coarsest level holding the node supplies its neighbors
        let mut node = None;
        for inner in self.inners.iter_mut() {
            if !inner.is_end() && inner.multiindex() == multiindex {
                node.get_or_insert_with(|| TensorNode::new(*inner));
                inner.advance();
            }
        }
        node
    }
}

impl<const N: usize> FusedIterator for ReservedNodes<N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_from_level_of_birth() {
        let hierarchy = TensorMeshHierarchy::<1, f64>::new([9]).unwrap();
        let range = TensorReservedNodeRange::new(&hierarchy, 3).unwrap();
        let nodes: Vec<_> = range.iter().collect();
        assert_eq!(
            nodes.iter().map(|node| node.multiindex[0]).collect::<Vec<_>>(),
            (0..9).collect::<Vec<_>>()
        );

        let neighbors = |index: usize| {
            let node = nodes[index];
            (node.predecessor(0).multiindex[0], node.successor(0).multiindex[0])
        };
        assert_eq!(neighbors(0), (0, 8));
        assert_eq!(neighbors(8), (0, 8));
        assert_eq!(neighbors(4), (0, 8));
        assert_eq!(neighbors(2), (0, 4));
        assert_eq!(neighbors(6), (4, 8));
        assert_eq!(neighbors(5), (4, 6));
    }

    #[test]
    fn same_nodes_as_node_range() {
        let hierarchy = TensorMeshHierarchy::<2, f64>::new([5, 6]).unwrap();
        for l in 0..=hierarchy.finest_level() {
            let reserved = TensorReservedNodeRange::new(&hierarchy, l).unwrap();
            let plain = TensorNodeRange::new(&hierarchy, l).unwrap();
            assert!(reserved.iter().eq(plain.iter()));
            assert_eq!(reserved.len(), plain.len());
        }
    }

    #[test]
    fn equality_by_hierarchy_and_level() {
        let hierarchy = TensorMeshHierarchy::<1, f64>::new([17]).unwrap();
        let a = TensorReservedNodeRange::new(&hierarchy, 2).unwrap();
        let b = a.clone();
        let c = TensorReservedNodeRange::new(&hierarchy, 3).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
