//! # tensor-mesh
//!
//! Nested hierarchies of structured (tensor product) meshes over an `N` dimensional
//! domain, and zero-copy views of data defined on them.
//!
//! A [`TensorMeshHierarchy`] is built from the shape of the finest mesh. Coarser meshes
//! are found by repeatedly dropping every other node along each axis (both endpoints are
//! always kept). Each node of the finest mesh has a 'date of birth': the coarsest level
//! already containing it.
//!
//! Datasets live in caller owned buffers of length [`ndof`](TensorMeshHierarchy::ndof).
//! [`at`](TensorMeshHierarchy::at) addresses a buffer in row-major order, while
//! [`on_nodes`](TensorMeshHierarchy::on_nodes) and
//! [`on_new_nodes`](TensorMeshHierarchy::on_new_nodes) view a buffer in 'shuffled'
//! order, where the nodes of every level form a prefix and the nodes born on a level
//! form a contiguous block. [`shuffle`](TensorMeshHierarchy::shuffle) and
//! [`unshuffle`](TensorMeshHierarchy::unshuffle) convert between the two.
//!
//! ```
//! use tensor_mesh::TensorMeshHierarchy;
//!
//! let hierarchy = TensorMeshHierarchy::<1, f64>::new([9]).unwrap();
//! assert_eq!(hierarchy.finest_level(), 3);
//!
//! let row_major: Vec<f64> = (0..9).map(|i| i as f64).collect();
//! let mut shuffled = vec![0.0; 9];
//! hierarchy.shuffle(&row_major, &mut shuffled).unwrap();
//!
//! assert_eq!(hierarchy.on_nodes(&shuffled, 1).unwrap(), &[0.0, 8.0, 4.0]);
//! assert_eq!(hierarchy.on_new_nodes(&shuffled, 2).unwrap(), &[2.0, 6.0]);
//! ```

pub mod hierarchy;
pub mod iter;
pub mod prelude;
mod traits;

pub use hierarchy::TensorMeshHierarchy;
pub use hierarchy::{DegenerateShape, MalformedCoordinates};
pub use hierarchy::{CoordinateLength, CoordinateOrder};

pub use iter::{CartesianProduct, TensorIndexRange};
pub use iter::{TensorNode, TensorNodeRange, TensorReservedNodeRange};

pub use traits::Real;

#[cfg(feature = "ndarray")]
pub use ndarray;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("mesh index {l} is out of bounds (finest mesh index is {finest})")]
    LevelOutOfRange { l: usize, finest: usize },
    #[error("mesh indices should be nondecreasing: got {l} and then {m}")]
    LevelsDecreasing { l: usize, m: usize },
    #[error("mesh index should be nonzero")]
    ZeroLevel,
    #[error("dimension index {dimension} is out of bounds for {dimensions} dimensions")]
    DimensionOutOfRange { dimension: usize, dimensions: usize },
    #[error("index {index} in dimension {dimension} is out of bounds for a mesh of size {size}")]
    NodeOutOfRange {
        dimension: usize,
        index: usize,
        size: usize,
    },
    #[error("degenerate shape: {0}")]
    DegenerateShape(#[from] DegenerateShape),
    #[error("malformed coordinates: {0}")]
    MalformedCoordinates(#[from] MalformedCoordinates),
    #[error("buffer has length {actual} but the hierarchy has {expected} nodes")]
    BufferSize { expected: usize, actual: usize },
    #[error("array has shape {actual:?} but the finest mesh has shape {expected:?}")]
    ArrayShape {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("node index {value} has no distinct coordinate in the coordinate type")]
    NonRepresentable { value: usize },
}
