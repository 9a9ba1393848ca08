//! Conversion between the row-major ('unshuffled') and level-grouped ('shuffled')
//! orderings of the nodes of a hierarchy.
//!
//! In the shuffled ordering the nodes born on level `0` come first, then those born on
//! level `1`, and so on. Nodes born on the same level are in the row-major order of that
//! level's mesh.

use super::TensorMeshHierarchy;
use crate::prelude::*;

#[cfg(feature = "ndarray")]
use ndarray::{ArrayD, ArrayViewD, IxDyn};

impl<const N: usize, Real> TensorMeshHierarchy<N, Real>
where
    Real: traits::Real,
{
    pub(super) fn build_shuffle_tables(&mut self) {
        let ndof = self.ndof();
        let mut shuffled_indices = vec![0; ndof];
        let mut unshuffled_indices = Vec::with_capacity(ndof);

        for l in 0..=self.finest_level() {
            for multiindex in self.level_multiindices(l).iter() {
                if self.date_of_birth_unchecked(&multiindex) != l {
                    continue;
                }
                let unshuffled = self.unshuffled_index_unchecked(&multiindex);
                shuffled_indices[unshuffled] = unshuffled_indices.len();
                unshuffled_indices.push(unshuffled);
            }
        }
        debug_assert_eq!(unshuffled_indices.len(), ndof);

        tracing::trace!(ndof, "built shuffle tables");

        self.shuffled_indices = shuffled_indices;
        self.unshuffled_indices = unshuffled_indices;
    }

    /// Reorder a row-major dataset into the shuffled ordering.
    pub fn shuffle<T: Clone>(&self, src: &[T], dst: &mut [T]) -> Result<(), Error> {
        self.check_buffer(src.len())?;
        self.check_buffer(dst.len())?;

        for (value, &shuffled) in src.iter().zip(self.shuffled_indices.iter()) {
            dst[shuffled] = value.clone();
        }
        Ok(())
    }

    /// Reorder a shuffled dataset into row-major order.
    pub fn unshuffle<T: Clone>(&self, src: &[T], dst: &mut [T]) -> Result<(), Error> {
        self.check_buffer(src.len())?;
        self.check_buffer(dst.len())?;

        for (value, &unshuffled) in src.iter().zip(self.unshuffled_indices.iter()) {
            dst[unshuffled] = value.clone();
        }
        Ok(())
    }

    /// Shuffle an array shaped like the finest mesh into a new buffer.
    #[cfg(feature = "ndarray")]
    pub fn shuffle_array<T: Clone>(&self, array: ArrayViewD<'_, T>) -> Result<Vec<T>, Error> {
        self.check_array_shape(array.shape())?;

        // logical order, whatever the memory layout of the view
        let row_major: Vec<&T> = array.iter().collect();
        Ok(self
            .unshuffled_indices
            .iter()
            .map(|&unshuffled| row_major[unshuffled].clone())
            .collect())
    }

    /// Unshuffle a buffer into an array shaped like the finest mesh.
    #[cfg(feature = "ndarray")]
    pub fn unshuffle_array<T: Clone>(&self, v: &[T]) -> Result<ArrayD<T>, Error> {
        self.check_buffer(v.len())?;

        let row_major: Vec<T> = self
            .shuffled_indices
            .iter()
            .map(|&shuffled| v[shuffled].clone())
            .collect();
        let shape = self.shapes()[self.finest_level()].to_vec();

        ArrayD::from_shape_vec(IxDyn(&shape), row_major).map_err(|_| Error::ArrayShape {
            expected: shape.clone(),
            actual: vec![v.len()],
        })
    }

    #[cfg(feature = "ndarray")]
    fn check_array_shape(&self, actual: &[usize]) -> Result<(), Error> {
        let expected = &self.shapes()[self.finest_level()];
        if actual != expected.as_slice() {
            return Err(Error::ArrayShape {
                expected: expected.to_vec(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }
}
