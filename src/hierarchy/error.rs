use crate::prelude::*;

/// Reasons a shape cannot sit atop a hierarchy.
#[derive(Display, Debug, Clone, PartialEq, Eq)]
pub enum DegenerateShape {
    #[display(fmt = "a hierarchy needs at least one dimension")]
    NoDimensions,
    #[display(fmt = "dimension {_0} has size 0")]
    EmptyDimension(usize),
    #[display(fmt = "every dimension has size 1")]
    SingleNode,
}

impl std::error::Error for DegenerateShape {}

/// Problems with caller supplied coordinates.
#[derive(Display, From, Debug, Clone, PartialEq, Eq)]
pub enum MalformedCoordinates {
    #[display(fmt = "{_0}")]
    Length(CoordinateLength),
    #[display(fmt = "{_0}")]
    Order(CoordinateOrder),
}

impl std::error::Error for MalformedCoordinates {}

#[derive(Display, Debug, Clone, PartialEq, Eq, Constructor)]
#[display(
    fmt = "length of coordinate array ({actual}) does not match shape ({expected}) in dimension {dimension}"
)]
pub struct CoordinateLength {
    pub dimension: usize,
    pub expected: usize,
    pub actual: usize,
}

#[derive(Display, Debug, Clone, PartialEq, Eq, Constructor)]
#[display(
    fmt = "coordinates in dimension {dimension} do not increase strictly at position {position}"
)]
pub struct CoordinateOrder {
    pub dimension: usize,
    pub position: usize,
}
