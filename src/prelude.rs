//! Common traits and types that are useful for working with `tensor-mesh`
#![allow(unused_imports)]

pub use crate::hierarchy::TensorMeshHierarchy;
pub use crate::iter::{TensorIndexRange, TensorNode, TensorNodeRange, TensorReservedNodeRange};
pub use crate::traits::Real;

pub(crate) use crate::Error;
pub(crate) use crate::{hierarchy, iter, traits};

pub(crate) use derive_more::{Constructor, Deref, Display, From};
