use super::index_range::{IndexCursor, TensorIndexRange};
use std::iter::FusedIterator;

/// Cartesian product of `N` index ranges, iterated in row-major order (the last
/// dimension varies fastest).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartesianProduct<const N: usize> {
    pub factors: [TensorIndexRange; N],
}

impl<const N: usize> CartesianProduct<N> {
    pub fn new(factors: [TensorIndexRange; N]) -> Self {
        Self { factors }
    }

    /// Number of multiindices in the product.
    pub fn len(&self) -> usize {
        self.factors.iter().map(TensorIndexRange::size).product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cursor at the first multiindex.
    pub fn begin(&self) -> ProductCursor<N> {
        ProductCursor {
            inners: self.factors.map(|factor| factor.begin()),
            exhausted: self.is_empty(),
        }
    }

    /// Cursor one past the last multiindex.
    pub fn end(&self) -> ProductCursor<N> {
        ProductCursor {
            inners: self.factors.map(|factor| factor.begin()),
            exhausted: true,
        }
    }

    pub fn iter(&self) -> Multiindices<N> {
        Multiindices {
            cursor: self.begin(),
        }
    }
}

impl<const N: usize> IntoIterator for &CartesianProduct<N> {
    type Item = [usize; N];
    type IntoIter = Multiindices<N>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Odometer over a [`CartesianProduct`]: one [`IndexCursor`] per dimension, carried
/// from the last dimension towards the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCursor<const N: usize> {
    inners: [IndexCursor; N],
    exhausted: bool,
}

impl<const N: usize> ProductCursor<N> {
    pub fn multiindex(&self) -> [usize; N] {
        self.inners.map(|inner| inner.get())
    }

    pub fn is_end(&self) -> bool {
        self.exhausted
    }

    /// Cursor of a single dimension.
    ///
    /// ## Panics
    ///
    /// If `dimension >= N`
    pub fn inner(&self, dimension: usize) -> &IndexCursor {
        &self.inners[dimension]
    }

    pub(crate) fn inner_mut(&mut self, dimension: usize) -> &mut IndexCursor {
        &mut self.inners[dimension]
    }

    /// Step to the next multiindex in row-major order.
    pub fn advance(&mut self) {
        debug_assert!(!self.exhausted);
        for inner in self.inners.iter_mut().rev() {
            inner.increment();
            if !inner.is_end() {
                return;
            }
            inner.rewind();
        }
        // every dimension wrapped around
        self.exhausted = true;
    }
}

/// Iterator over the multiindices of a [`CartesianProduct`].
#[derive(Debug, Clone)]
pub struct Multiindices<const N: usize> {
    cursor: ProductCursor<N>,
}

impl<const N: usize> Iterator for Multiindices<N> {
    type Item = [usize; N];

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.is_end() {
            return None;
        }

        let multiindex = self.cursor.multiindex();
        self.cursor.advance();
        Some(multiindex)
    }
}

impl<const N: usize> FusedIterator for Multiindices<N> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_major_order() {
        let product = CartesianProduct::new([
            TensorIndexRange::new(3, 2, 2),
            TensorIndexRange::new(5, 3, 2),
        ]);
        let expected = vec![[0, 0], [0, 2], [0, 4], [2, 0], [2, 2], [2, 4]];
        assert_eq!(product.iter().collect::<Vec<_>>(), expected);
        assert_eq!(product.len(), 6);
    }

    #[test]
    fn advancing_reaches_end() {
        let product = CartesianProduct::new([TensorIndexRange::new(2, 2, 1); 3]);
        let mut cursor = product.begin();
        let mut count = 0;
        while cursor != product.end() {
            cursor.advance();
            count += 1;
        }
        assert_eq!(count, 8);
    }

    #[test]
    fn singleton_factor_is_inert() {
        let product = CartesianProduct::new([
            TensorIndexRange::new(3, 3, 1),
            TensorIndexRange::singleton(),
        ]);
        assert_eq!(
            product.iter().collect::<Vec<_>>(),
            vec![[0, 0], [1, 0], [2, 0]]
        );
    }

    #[test]
    fn zero_dimensional_product() {
        let product = CartesianProduct::<0>::new([]);
        assert_eq!(product.iter().count(), 1);
    }
}
