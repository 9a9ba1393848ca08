//! # Traits
//!
//! Numeric bounds shared by the hierarchy and its views.

use std::fmt::Debug;

/// Floating point type used for the coordinates of the finest mesh.
///
/// Implemented for every [`Float`](num_traits::Float) that can be debug printed, so
/// `f32` and `f64` work out of the box.
pub trait Real: num_traits::Float + Debug {
    /// convert a node count or index into a coordinate value
    fn from_index(index: usize) -> Option<Self> {
        <Self as num_traits::NumCast>::from(index)
    }
}

impl<T> Real for T where T: num_traits::Float + Debug {}

#[test]
fn index_conversion() {
    assert_eq!(<f64 as Real>::from_index(17), Some(17.0));
    assert_eq!(<f32 as Real>::from_index(0), Some(0.0));
}
