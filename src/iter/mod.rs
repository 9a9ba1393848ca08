//! # Iteration over mesh hierarchies
//!
//! Everything here is built up from [`TensorIndexRange`], the indices in one dimension
//! of one level's nodes. `N` of those are combined by a [`CartesianProduct`] (an
//! odometer over one [`IndexCursor`] per dimension) into the multiindices of a level.
//!
//! Two ranges of [`TensorNode`]s are built on top of that:
//!
//! * [`TensorNodeRange`] yields the nodes of a level. The neighbors
//!   ([`TensorNode::predecessor`], [`TensorNode::successor`]) of a node are its
//!   neighbors in that level's mesh.
//! * [`TensorReservedNodeRange`] yields the same nodes, but the neighbors of a node are
//!   its neighbors in the mesh which introduced it. Stencils defined when a node is born
//!   stay the same whichever later level is being processed.
//!
//! All of these are restartable: iterating a range twice gives the same nodes.

mod index_range;
mod node;
mod product;
mod reserved;

pub use index_range::{IndexCursor, Indices, TensorIndexRange};
pub use node::{Nodes, TensorNode, TensorNodeRange};
pub use product::{CartesianProduct, Multiindices, ProductCursor};
pub use reserved::{ReservedNodes, TensorReservedNodeRange};
