//! Error types for domain geometry construction.
//!
//! Construction either fully succeeds or fails with one of these errors;
//! there is no partial or degraded geometry. Nothing here is recoverable:
//! the surrounding tool is expected to stop the whole distributed run,
//! since an inconsistent geometry on one process invalidates every
//! process's decomposition.

use thiserror::Error;

/// Malformed or missing box/label input. Always fatal at construction.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpecificationError {
    /// The box definition has no `x` interval.
    #[error("missing `x` interval in the box definition")]
    MissingX,
    /// `z` was declared without `y`; axes must be declared contiguously.
    #[error("`z` interval declared without `y`")]
    NonContiguousAxes,
    /// An axis bound was not given as a pair of two numbers.
    #[error("axis `{axis}` bounds must be a pair of two numbers, got {got} value(s)")]
    BoundsArity { axis: char, got: usize },
    /// An axis bound pair is not ordered `lo < hi`.
    #[error("axis `{axis}` bounds must satisfy lo < hi, got [{lo}, {hi}]")]
    UnorderedBounds { axis: char, lo: f64, hi: f64 },
    /// A per-face label list does not have one entry per face.
    #[error("box label list has length {got}, expected {expected} (two per axis)")]
    LabelShape { expected: usize, got: usize },
}

/// The process topology cannot produce a consistent Cartesian layout for
/// the requested dimension and process count.
///
/// Fatal and not retryable: a static layout mismatch cannot resolve itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// Rank does not exist in a communicator of the given size.
    #[error("rank {rank} out of range for {size} process(es)")]
    RankOutOfRange { rank: usize, size: usize },
    /// The periodicity vector does not have one entry per axis.
    #[error("periodicity vector has length {got}, expected {expected}")]
    PeriodicityLength { expected: usize, got: usize },
    /// A split factor of zero leaves an axis with no blocks.
    #[error("split factor for axis {axis} must be positive")]
    ZeroSplit { axis: usize },
    /// A process coordinate falls outside its axis's block range.
    #[error("coordinate {coord} out of range for axis {axis} split into {split} block(s)")]
    CoordOutOfRange {
        axis: usize,
        coord: usize,
        split: usize,
    },
    /// Split, coordinate, and periodicity vectors disagree on dimension.
    #[error("layout vectors disagree on dimension: split {split}, coords {coords}, periods {periods}")]
    MismatchedLayout {
        split: usize,
        coords: usize,
        periods: usize,
    },
    /// The underlying communicator could not be obtained or queried.
    #[error("process topology unavailable: {0}")]
    Unavailable(String),
}

/// Any failure surfaced by [`Geometry::new`](crate::geometry::Geometry::new).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error(transparent)]
    Specification(#[from] SpecificationError),
    #[error(transparent)]
    Topology(#[from] TopologyError),
}
