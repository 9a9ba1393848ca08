//! # Mesh hierarchies
//!
//! A [`TensorMeshHierarchy`] owns everything derived from the finest mesh: the shapes of
//! all levels, the coordinates of the finest nodes, the dates of birth of the nodes
//! along each axis, and the tables relating the row-major ('unshuffled') and the
//! level-grouped ('shuffled') orderings of the nodes.
//!
//! ## Levels
//!
//! Level `L` ([`finest_level`](TensorMeshHierarchy::finest_level)) is the mesh the
//! hierarchy was built from and level `0` is the coarsest. Along an axis with `n > 1`
//! nodes, level `l` contains the finest indices `0, s, 2s, ...` below `n - 1`, and
//! `n - 1` itself, where `s = 2^(L - l)`. `L` is the smallest number of halvings that
//! leaves two nodes along every axis. Axes with a single node are inert: they contain
//! index `0` on every level.
//!
//! ## Buffers
//!
//! The hierarchy never owns data. Queries taking a buffer check that its length is
//! [`ndof`](TensorMeshHierarchy::ndof) and then hand back references or slices into it.
//! Because the shuffled ordering puts the nodes of level `l` first, and the nodes born
//! on level `l` right after those of level `l - 1`, the views returned by
//! [`on_nodes`](TensorMeshHierarchy::on_nodes) and
//! [`on_new_nodes`](TensorMeshHierarchy::on_new_nodes) are plain subslices. Views of
//! different levels' new nodes never overlap.

mod error;
mod shuffle;

pub use error::{CoordinateLength, CoordinateOrder, DegenerateShape, MalformedCoordinates};

use crate::iter::{CartesianProduct, TensorIndexRange};
use crate::prelude::*;
use std::fmt;

/// Hierarchy of meshes produced by subsampling an initial mesh.
#[derive(Clone)]
pub struct TensorMeshHierarchy<const N: usize, Real> {
    shapes: Vec<[usize; N]>,
    coordinates: [Vec<Real>; N],
    uniform: bool,
    finest: usize,
    dates_of_birth: [Vec<usize>; N],
    // position in the shuffled ordering of each node, by unshuffled index
    shuffled_indices: Vec<usize>,
    // unshuffled index of each node, by position in the shuffled ordering
    unshuffled_indices: Vec<usize>,
}

impl<const N: usize, Real> TensorMeshHierarchy<N, Real>
where
    Real: traits::Real,
{
    /// Build a hierarchy atop a mesh with nodes spaced uniformly on `[0, 1]` in each
    /// dimension.
    pub fn new(shape: [usize; N]) -> Result<Self, Error> {
        let mut coordinates: [Vec<Real>; N] = std::array::from_fn(|_| Vec::new());
        for (n, xs) in shape.iter().zip(coordinates.iter_mut()) {
            *xs = uniform_coordinates(*n).map_err(|err| {
                tracing::warn!(?shape, "rejected shape: {}", err);
                err
            })?;
        }

        let mut hierarchy = Self::with_coordinates(shape, coordinates)?;
        hierarchy.uniform = true;
        Ok(hierarchy)
    }

    /// Build a hierarchy atop a mesh with the given node coordinates.
    ///
    /// `coordinates[d]` must have `shape[d]` entries and increase strictly. The hierarchy
    /// is not marked [uniform](Self::is_uniform) even if the coordinates happen to be.
    pub fn with_coordinates(shape: [usize; N], coordinates: [Vec<Real>; N]) -> Result<Self, Error> {
        check_shape(&shape).map_err(|err| {
            tracing::warn!(?shape, "rejected shape: {}", err);
            err
        })?;
        check_coordinates(&shape, &coordinates).map_err(|err| {
            tracing::warn!(?shape, "rejected coordinates: {}", err);
            err
        })?;

        let finest = shape.iter().map(|&n| halvings(n)).max().unwrap_or(0);
        let shapes: Vec<[usize; N]> = (0..=finest)
            .map(|l| shape.map(|n| coarse_size(n, stride(finest, l))))
            .collect();

        let mut hierarchy = Self {
            shapes,
            coordinates,
            uniform: false,
            finest,
            dates_of_birth: std::array::from_fn(|_| Vec::new()),
            shuffled_indices: Vec::new(),
            unshuffled_indices: Vec::new(),
        };

        for dimension in 0..N {
            hierarchy.dates_of_birth[dimension] = hierarchy.compute_dates_of_birth(dimension);
        }
        hierarchy.build_shuffle_tables();

        tracing::debug!(
            ?shape,
            levels = finest + 1,
            ndof = hierarchy.ndof(),
            "constructed tensor mesh hierarchy"
        );

        Ok(hierarchy)
    }

    /// Number of nodes in the finest mesh.
    pub fn ndof(&self) -> usize {
        self.shapes[self.finest].iter().product()
    }

    /// Number of nodes in the mesh of level `l`.
    pub fn ndof_level(&self, l: usize) -> Result<usize, Error> {
        self.check_mesh_index_bounds(l)?;
        Ok(self.shapes[l].iter().product())
    }

    /// Number of nodes introduced by level `l` (all of them for level `0`).
    pub fn ndof_new(&self, l: usize) -> Result<usize, Error> {
        let (start, end) = self.new_bounds(l)?;
        Ok(end - start)
    }

    /// Indices, in dimension `dimension`, of the nodes of level `l`.
    pub fn indices(&self, l: usize, dimension: usize) -> Result<TensorIndexRange, Error> {
        self.check_mesh_index_bounds(l)?;
        self.check_dimension(dimension)?;

        Ok(TensorIndexRange::new(
            self.shapes[self.finest][dimension],
            self.shapes[l][dimension],
            stride(self.finest, l),
        ))
    }

    /// Coordinates, in dimension `dimension`, of the nodes of level `l`.
    pub fn level_coordinates(&self, l: usize, dimension: usize) -> Result<Vec<Real>, Error> {
        let range = self.indices(l, dimension)?;
        let xs = &self.coordinates[dimension];
        Ok(range.iter().map(|index| xs[index]).collect())
    }

    /// Index of the level which introduced a node.
    pub fn date_of_birth(&self, multiindex: [usize; N]) -> Result<usize, Error> {
        self.check_multiindex(&multiindex)?;
        Ok(self.date_of_birth_unchecked(&multiindex))
    }

    /// Position of a node in the shuffled ordering.
    pub fn index(&self, multiindex: [usize; N]) -> Result<usize, Error> {
        self.check_multiindex(&multiindex)?;
        Ok(self.shuffled_indices[self.unshuffled_index_unchecked(&multiindex)])
    }

    /// Position of a node in the unshuffled (row-major) ordering.
    pub fn unshuffled_index(&self, multiindex: [usize; N]) -> Result<usize, Error> {
        self.check_multiindex(&multiindex)?;
        Ok(self.unshuffled_index_unchecked(&multiindex))
    }

    /// Value of a row-major dataset at a node.
    pub fn at<'v, T>(&self, v: &'v [T], multiindex: [usize; N]) -> Result<&'v T, Error> {
        self.check_buffer(v.len())?;
        let index = self.unshuffled_index(multiindex)?;
        Ok(&v[index])
    }

    /// Mutable version of [`at`](Self::at).
    pub fn at_mut<'v, T>(
        &self,
        v: &'v mut [T],
        multiindex: [usize; N],
    ) -> Result<&'v mut T, Error> {
        self.check_buffer(v.len())?;
        let index = self.unshuffled_index(multiindex)?;
        Ok(&mut v[index])
    }

    /// Values of a shuffled dataset at the nodes of level `l`.
    ///
    /// The value at a node of level `l` sits at its [shuffled index](Self::index), which
    /// is less than `ndof_level(l)`.
    pub fn on_nodes<'v, T>(&self, v: &'v [T], l: usize) -> Result<&'v [T], Error> {
        self.check_buffer(v.len())?;
        let end = self.ndof_level(l)?;
        Ok(&v[..end])
    }

    /// Mutable version of [`on_nodes`](Self::on_nodes).
    pub fn on_nodes_mut<'v, T>(&self, v: &'v mut [T], l: usize) -> Result<&'v mut [T], Error> {
        self.check_buffer(v.len())?;
        let end = self.ndof_level(l)?;
        Ok(&mut v[..end])
    }

    /// Values of a shuffled dataset at the nodes introduced by level `l`.
    pub fn on_new_nodes<'v, T>(&self, v: &'v [T], l: usize) -> Result<&'v [T], Error> {
        self.check_buffer(v.len())?;
        let (start, end) = self.new_bounds(l)?;
        Ok(&v[start..end])
    }

    /// Mutable version of [`on_new_nodes`](Self::on_new_nodes).
    pub fn on_new_nodes_mut<'v, T>(&self, v: &'v mut [T], l: usize) -> Result<&'v mut [T], Error> {
        self.check_buffer(v.len())?;
        let (start, end) = self.new_bounds(l)?;
        Ok(&mut v[start..end])
    }

    /// Values of a shuffled dataset at the nodes of level `l` which were already present
    /// on level `l - 1`.
    pub fn on_old_nodes<'v, T>(&self, v: &'v [T], l: usize) -> Result<&'v [T], Error> {
        self.check_mesh_index_bounds(l)?;
        self.check_mesh_index_nonzero(l)?;
        self.on_nodes(v, l - 1)
    }

    /// Mutable version of [`on_old_nodes`](Self::on_old_nodes).
    pub fn on_old_nodes_mut<'v, T>(&self, v: &'v mut [T], l: usize) -> Result<&'v mut [T], Error> {
        self.check_mesh_index_bounds(l)?;
        self.check_mesh_index_nonzero(l)?;
        self.on_nodes_mut(v, l - 1)
    }

    /// Values of a shuffled dataset at the nodes introduced after level `l` up to and
    /// including level `m`.
    pub fn on_nodes_between<'v, T>(
        &self,
        v: &'v [T],
        l: usize,
        m: usize,
    ) -> Result<&'v [T], Error> {
        self.check_buffer(v.len())?;
        let (start, end) = self.between_bounds(l, m)?;
        Ok(&v[start..end])
    }

    /// Mutable version of [`on_nodes_between`](Self::on_nodes_between).
    pub fn on_nodes_between_mut<'v, T>(
        &self,
        v: &'v mut [T],
        l: usize,
        m: usize,
    ) -> Result<&'v mut [T], Error> {
        self.check_buffer(v.len())?;
        let (start, end) = self.between_bounds(l, m)?;
        Ok(&mut v[start..end])
    }

    pub(crate) fn check_mesh_index_bounds(&self, l: usize) -> Result<(), Error> {
        if l > self.finest {
            return Err(Error::LevelOutOfRange {
                l,
                finest: self.finest,
            });
        }
        Ok(())
    }

    pub(crate) fn check_mesh_indices_nondecreasing(&self, l: usize, m: usize) -> Result<(), Error> {
        if l > m {
            return Err(Error::LevelsDecreasing { l, m });
        }
        Ok(())
    }

    pub(crate) fn check_mesh_index_nonzero(&self, l: usize) -> Result<(), Error> {
        if l == 0 {
            return Err(Error::ZeroLevel);
        }
        Ok(())
    }

    fn check_dimension(&self, dimension: usize) -> Result<(), Error> {
        if dimension >= N {
            return Err(Error::DimensionOutOfRange {
                dimension,
                dimensions: N,
            });
        }
        Ok(())
    }

    fn check_multiindex(&self, multiindex: &[usize; N]) -> Result<(), Error> {
        let shape = &self.shapes[self.finest];
        for (dimension, (&index, &size)) in multiindex.iter().zip(shape.iter()).enumerate() {
            if index >= size {
                return Err(Error::NodeOutOfRange {
                    dimension,
                    index,
                    size,
                });
            }
        }
        Ok(())
    }

    fn check_buffer(&self, len: usize) -> Result<(), Error> {
        let expected = self.ndof();
        if len != expected {
            return Err(Error::BufferSize {
                expected,
                actual: len,
            });
        }
        Ok(())
    }

    /// shuffled positions of the nodes born on level `l`
    fn new_bounds(&self, l: usize) -> Result<(usize, usize), Error> {
        let end = self.ndof_level(l)?;
        let start = if l == 0 { 0 } else { self.ndof_level(l - 1)? };
        Ok((start, end))
    }

    fn between_bounds(&self, l: usize, m: usize) -> Result<(usize, usize), Error> {
        self.check_mesh_index_bounds(m)?;
        self.check_mesh_indices_nondecreasing(l, m)?;
        Ok((self.ndof_level(l)?, self.ndof_level(m)?))
    }

    fn compute_dates_of_birth(&self, dimension: usize) -> Vec<usize> {
        let n = self.shapes[self.finest][dimension];
        let mut dates = vec![usize::MAX; n];
        for l in 0..=self.finest {
            let range = TensorIndexRange::new(n, self.shapes[l][dimension], stride(self.finest, l));
            for index in range.iter() {
                if dates[index] == usize::MAX {
                    dates[index] = l;
                }
            }
        }
        debug_assert!(dates.iter().all(|&date| date <= self.finest));
        dates
    }

    pub(crate) fn date_of_birth_unchecked(&self, multiindex: &[usize; N]) -> usize {
        multiindex
            .iter()
            .zip(self.dates_of_birth.iter())
            .map(|(&index, dates)| dates[index])
            .max()
            .unwrap_or(0)
    }

    pub(crate) fn unshuffled_index_unchecked(&self, multiindex: &[usize; N]) -> usize {
        multiindex
            .iter()
            .zip(self.shapes[self.finest].iter())
            .fold(0, |acc, (&index, &size)| acc * size + index)
    }

    /// Multiindices of the nodes of level `l`, in row-major order.
    pub(crate) fn level_multiindices(&self, l: usize) -> CartesianProduct<N> {
        let factors = std::array::from_fn(|dimension| {
            TensorIndexRange::new(
                self.shapes[self.finest][dimension],
                self.shapes[l][dimension],
                stride(self.finest, l),
            )
        });
        CartesianProduct::new(factors)
    }
}

impl<const N: usize, Real> TensorMeshHierarchy<N, Real> {
    /// Shapes of the meshes, from the coarsest to the finest.
    pub fn shapes(&self) -> &[[usize; N]] {
        &self.shapes
    }

    /// Coordinates of the nodes of the finest mesh.
    pub fn coordinates(&self) -> &[Vec<Real>; N] {
        &self.coordinates
    }

    /// Whether the finest mesh is the default one, with nodes spaced uniformly on `[0, 1]`
    /// in each dimension.
    ///
    /// Only hierarchies built with [`new`](Self::new) are uniform. Coordinates passed to
    /// [`with_coordinates`](Self::with_coordinates) are not compared with the default.
    pub fn is_uniform(&self) -> bool {
        self.uniform
    }

    /// Index `L` of the finest mesh.
    pub fn finest_level(&self) -> usize {
        self.finest
    }

    /// For each dimension and each index of the finest mesh along it, the level which
    /// introduced that index.
    pub fn dates_of_birth(&self) -> &[Vec<usize>; N] {
        &self.dates_of_birth
    }
}

impl<const N: usize, Real: PartialEq> PartialEq for TensorMeshHierarchy<N, Real> {
    fn eq(&self, other: &Self) -> bool {
        self.shapes == other.shapes && self.coordinates == other.coordinates
    }
}

impl<const N: usize, Real: fmt::Debug> fmt::Debug for TensorMeshHierarchy<N, Real> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorMeshHierarchy")
            .field("shapes", &self.shapes)
            .field("uniform", &self.uniform)
            .field("L", &self.finest)
            .finish_non_exhaustive()
    }
}

fn check_shape(shape: &[usize]) -> Result<(), DegenerateShape> {
    if shape.is_empty() {
        return Err(DegenerateShape::NoDimensions);
    }
    if let Some(dimension) = shape.iter().position(|&n| n == 0) {
        return Err(DegenerateShape::EmptyDimension(dimension));
    }
    if shape.iter().all(|&n| n == 1) {
        return Err(DegenerateShape::SingleNode);
    }
    Ok(())
}

fn check_coordinates<Real: traits::Real>(
    shape: &[usize],
    coordinates: &[Vec<Real>],
) -> Result<(), MalformedCoordinates> {
    for (dimension, (&n, xs)) in shape.iter().zip(coordinates.iter()).enumerate() {
        if xs.len() != n {
            return Err(CoordinateLength::new(dimension, n, xs.len()).into());
        }
        // written so that NaNs are rejected too
        if let Some(position) = xs.windows(2).position(|pair| !(pair[0] < pair[1])) {
            return Err(CoordinateOrder::new(dimension, position + 1).into());
        }
    }
    Ok(())
}

fn uniform_coordinates<Real: traits::Real>(n: usize) -> Result<Vec<Real>, Error> {
    if n <= 1 {
        return Ok(vec![Real::zero(); n]);
    }

    let last = Real::from_index(n - 1).ok_or(Error::NonRepresentable { value: n - 1 })?;
    let xs = (0..n)
        .map(|i| {
            Real::from_index(i)
                .map(|x| x / last)
                .ok_or(Error::NonRepresentable { value: i })
        })
        .collect::<Result<Vec<Real>, _>>()?;

    // neighboring indices may round to the same value in a narrow `Real`
    if let Some(position) = xs.windows(2).position(|pair| !(pair[0] < pair[1])) {
        return Err(Error::NonRepresentable {
            value: position + 1,
        });
    }
    Ok(xs)
}

/// Number of halvings taking `n` nodes down to two.
fn halvings(n: usize) -> usize {
    if n <= 2 {
        0
    } else {
        // ceil(log2(n - 1))
        (usize::BITS - (n - 2).leading_zeros()) as usize
    }
}

fn stride(finest: usize, l: usize) -> usize {
    1 << (finest - l)
}

fn coarse_size(n: usize, stride: usize) -> usize {
    if n == 1 {
        1
    } else {
        (n - 1).div_ceil(stride) + 1
    }
}
