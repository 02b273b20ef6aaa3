//! Process-topology contract and built-in Cartesian providers.
//!
//! Geometry construction needs three facts from the outside world: how many
//! blocks each axis is split into, where this process sits in that grid,
//! and whether a different process adjoins each face. [`Topology`] is the
//! factory seam; realizing a layout is the single collective point of the
//! whole subsystem and must yield the same split factors on every process,
//! or the tiling invariant of the decomposition breaks.

use serde::{Deserialize, Serialize};

use crate::domain_error::TopologyError;

/// A realized Cartesian layout as seen by one process.
pub trait CartTopology {
    /// Blocks per axis; the product is the total process count.
    fn split(&self) -> &[usize];
    /// This process's 0-indexed position along each axis.
    fn coords(&self) -> &[usize];
    /// Whether a *different* process adjoins this one in the negative /
    /// positive direction of `axis`.
    fn neighbors(&self, axis: usize) -> (bool, bool);
}

/// Provider of Cartesian layouts, consumed once per geometry construction.
pub trait Topology {
    type Cart: CartTopology;

    /// Build the layout for a `dim`-dimensional box with the given per-axis
    /// periodicity. Periodic axes wrap during decomposition; non-periodic
    /// axes end at the physical boundary.
    fn cart(&self, dim: usize, periods: &[bool]) -> Result<Self::Cart, TopologyError>;
}

/// Validated Cartesian layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartGrid {
    split: Vec<usize>,
    coords: Vec<usize>,
    periods: Vec<bool>,
}

impl CartGrid {
    /// Build a layout, rejecting zero splits, out-of-range coordinates, and
    /// vectors that disagree on dimension.
    pub fn new(
        split: Vec<usize>,
        coords: Vec<usize>,
        periods: Vec<bool>,
    ) -> Result<Self, TopologyError> {
        if split.len() != coords.len() || split.len() != periods.len() {
            return Err(TopologyError::MismatchedLayout {
                split: split.len(),
                coords: coords.len(),
                periods: periods.len(),
            });
        }
        for (axis, (&blocks, &coord)) in split.iter().zip(&coords).enumerate() {
            if blocks == 0 {
                return Err(TopologyError::ZeroSplit { axis });
            }
            if coord >= blocks {
                return Err(TopologyError::CoordOutOfRange {
                    axis,
                    coord,
                    split: blocks,
                });
            }
        }
        Ok(Self {
            split,
            coords,
            periods,
        })
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.split.len()
    }

    /// Total number of processes in the grid.
    pub fn size(&self) -> usize {
        self.split.iter().product()
    }

    /// Per-axis periodicity the grid was built with.
    pub fn periods(&self) -> &[bool] {
        &self.periods
    }
}

impl CartTopology for CartGrid {
    fn split(&self) -> &[usize] {
        &self.split
    }

    fn coords(&self) -> &[usize] {
        &self.coords
    }

    fn neighbors(&self, axis: usize) -> (bool, bool) {
        // A periodic wrap only reaches a different process when the axis is
        // actually split; a single owner wraps on itself.
        let wrap = self.periods[axis] && self.split[axis] > 1;
        (
            self.coords[axis] > 0 || wrap,
            self.coords[axis] + 1 < self.split[axis] || wrap,
        )
    }
}

/// Single-process layout: nothing is split, no face has a neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerialTopology;

impl Topology for SerialTopology {
    type Cart = CartGrid;

    fn cart(&self, dim: usize, periods: &[bool]) -> Result<CartGrid, TopologyError> {
        check_periods(dim, periods)?;
        CartGrid::new(vec![1; dim], vec![0; dim], periods.to_vec())
    }
}

/// Deterministic block layout for `size` cooperating processes.
///
/// Split factors come from [`balanced_dims`] and ranks map to coordinates
/// row-major (axis 0 slowest), so every process computes the identical grid
/// without communicating.
#[derive(Debug, Clone, Copy)]
pub struct BlockTopology {
    rank: usize,
    size: usize,
}

impl BlockTopology {
    pub fn new(rank: usize, size: usize) -> Result<Self, TopologyError> {
        if rank >= size {
            return Err(TopologyError::RankOutOfRange { rank, size });
        }
        Ok(Self { rank, size })
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Topology for BlockTopology {
    type Cart = CartGrid;

    fn cart(&self, dim: usize, periods: &[bool]) -> Result<CartGrid, TopologyError> {
        check_periods(dim, periods)?;
        let split = balanced_dims(self.size, dim);
        let coords = rank_to_coords(self.rank, &split);
        CartGrid::new(split, coords, periods.to_vec())
    }
}

fn check_periods(dim: usize, periods: &[bool]) -> Result<(), TopologyError> {
    if periods.len() != dim {
        return Err(TopologyError::PeriodicityLength {
            expected: dim,
            got: periods.len(),
        });
    }
    Ok(())
}

/// Factor `size` into `dim` block counts, as even as possible, largest
/// first: the layout `MPI_Dims_create` computes.
pub fn balanced_dims(size: usize, dim: usize) -> Vec<usize> {
    let mut dims = vec![1usize; dim];
    for factor in prime_factors_desc(size) {
        // Grow the currently smallest axis.
        let slot = dims
            .iter()
            .enumerate()
            .min_by_key(|&(_, &blocks)| blocks)
            .map(|(axis, _)| axis)
            .unwrap_or(0);
        dims[slot] *= factor;
    }
    dims.sort_unstable_by(|a, b| b.cmp(a));
    dims
}

fn prime_factors_desc(mut n: usize) -> Vec<usize> {
    let mut factors = Vec::new();
    let mut p = 2;
    while p * p <= n {
        while n % p == 0 {
            factors.push(p);
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        factors.push(n);
    }
    factors.reverse();
    factors
}

/// Row-major rank decoding, axis 0 varying slowest.
fn rank_to_coords(rank: usize, split: &[usize]) -> Vec<usize> {
    let mut coords = vec![0; split.len()];
    let mut rest = rank;
    for axis in (0..split.len()).rev() {
        coords[axis] = rest % split[axis];
        rest /= split[axis];
    }
    coords
}

#[cfg(feature = "mpi-support")]
mod mpi_support {
    //! Layout provider backed by an MPI Cartesian communicator.

    use super::*;
    use mpi::environment::Universe;
    use mpi::traits::*;

    pub struct MpiTopology {
        universe: Universe,
    }

    impl MpiTopology {
        /// Initialize the MPI runtime and take ownership of it for the
        /// lifetime of the topology handle.
        pub fn new() -> Result<Self, TopologyError> {
            let universe = mpi::initialize().ok_or_else(|| {
                TopologyError::Unavailable("MPI runtime failed to initialize".into())
            })?;
            Ok(Self { universe })
        }
    }

    impl Topology for MpiTopology {
        type Cart = CartGrid;

        fn cart(&self, dim: usize, periods: &[bool]) -> Result<CartGrid, TopologyError> {
            check_periods(dim, periods)?;
            let world = self.universe.world();
            let size = world.size() as usize;
            let split = balanced_dims(size, dim);
            let dims: Vec<i32> = split.iter().map(|&blocks| blocks as i32).collect();
            let cart = world
                .create_cartesian_communicator(&dims, periods, false)
                .ok_or_else(|| {
                    TopologyError::Unavailable(format!(
                        "cannot create a {dim}-dimensional Cartesian communicator over {size} process(es)"
                    ))
                })?;
            let coords: Vec<usize> = cart
                .rank_to_coordinates(cart.rank())
                .iter()
                .map(|&coord| coord as usize)
                .collect();
            CartGrid::new(split, coords, periods.to_vec())
        }
    }
}

#[cfg(feature = "mpi-support")]
pub use mpi_support::MpiTopology;
