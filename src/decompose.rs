//! Cartesian block decomposition of the global box.
//!
//! Every process derives its sub-box from the same anchored arithmetic, so
//! the sub-boxes of a whole run tile the global box with no gap and no
//! overlap without any process ever exchanging bounds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounds of the box along one axis, `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub lo: f64,
    pub hi: f64,
}

impl AxisBounds {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Self { lo, hi }
    }

    /// Extent `hi - lo`.
    pub fn length(&self) -> f64 {
        self.hi - self.lo
    }

    /// Whether `other` lies inside this interval.
    pub fn contains(&self, other: &AxisBounds) -> bool {
        self.lo <= other.lo && other.hi <= self.hi
    }
}

impl fmt::Display for AxisBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lo, self.hi)
    }
}

/// Sub-box owned by the process at `coords` in a grid of `split` blocks per
/// axis.
///
/// Both ends anchor on the *global* low bound: `lo + step*c` and
/// `lo + step*(c+1)`. Neighbouring processes evaluate the identical
/// expression for their shared face, so adjoining intervals agree exactly;
/// a running lower bound would accumulate rounding from block to block.
/// An unsplit axis returns the global interval bit-for-bit.
pub fn local_bounds(global: &[AxisBounds], split: &[usize], coords: &[usize]) -> Vec<AxisBounds> {
    debug_assert_eq!(global.len(), split.len());
    debug_assert_eq!(global.len(), coords.len());
    global
        .iter()
        .zip(split.iter().zip(coords))
        .map(|(axis, (&blocks, &coord))| {
            if blocks == 1 {
                return *axis;
            }
            let step = axis.length() / blocks as f64;
            AxisBounds::new(
                axis.lo + step * coord as f64,
                axis.lo + step * (coord + 1) as f64,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_split_is_bitwise_exact() {
        let global = [AxisBounds::new(0.1, 0.3), AxisBounds::new(-1.0, 2.0)];
        let local = local_bounds(&global, &[1, 1], &[0, 0]);
        assert_eq!(local[0].lo.to_bits(), global[0].lo.to_bits());
        assert_eq!(local[0].hi.to_bits(), global[0].hi.to_bits());
        assert_eq!(local[1], global[1]);
    }

    #[test]
    fn adjoining_blocks_share_the_face_exactly() {
        let global = [AxisBounds::new(-1.0, 2.0)];
        let left = local_bounds(&global, &[3], &[0]);
        let mid = local_bounds(&global, &[3], &[1]);
        let right = local_bounds(&global, &[3], &[2]);
        assert_eq!(left[0].hi.to_bits(), mid[0].lo.to_bits());
        assert_eq!(mid[0].hi.to_bits(), right[0].lo.to_bits());
        assert_eq!(left[0].lo, global[0].lo);
    }

    #[test]
    fn two_way_split_halves_the_axis() {
        let global = [AxisBounds::new(0.0, 2.0), AxisBounds::new(0.0, 1.0)];
        let local = local_bounds(&global, &[2, 1], &[0, 0]);
        assert_eq!(local[0], AxisBounds::new(0.0, 1.0));
        assert_eq!(local[1], AxisBounds::new(0.0, 1.0));
        let local = local_bounds(&global, &[2, 1], &[1, 0]);
        assert_eq!(local[0], AxisBounds::new(1.0, 2.0));
    }
}
