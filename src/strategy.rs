// model = "claude-opus-4-5"
// created = "2026-07-30"
// modified = "2026-07-30"
// driver = "Isaac Clayton"

//! Per-depth boundary strategy memo.
//!
//! LSEQ alternates allocation behavior by tree depth: at some depths new
//! digits cluster near the left bound (good for append-heavy editing), at
//! others near the right bound (good for prepend-heavy editing). The
//! choice is random per depth but must then stay fixed for the life of the
//! allocator - flip-flopping at one depth would burn through the free
//! interval from both ends at once.

use rand::Rng;

use crate::position::MAX_DEPTH;

/// Which end of a free interval to allocate near, at one tree depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Place new digits just above the left bound.
    BoundaryLo,
    /// Place new digits just below the right bound.
    BoundaryHi,
}

/// Remembers the strategy picked at each tree depth.
///
/// Slots fill lazily: the first query at a depth flips a fair coin with
/// the caller's PRNG and the answer is memoized forever.
#[derive(Clone, Debug, Default)]
pub struct StrategyMap {
    slots: [Option<Strategy>; MAX_DEPTH],
}

impl StrategyMap {
    /// Create an empty map.
    pub fn new() -> StrategyMap {
        return StrategyMap {
            slots: [None; MAX_DEPTH],
        };
    }

    /// Return the strategy for `depth`, picking and memoizing one on the
    /// first query.
    pub fn get(&mut self, depth: usize, rng: &mut impl Rng) -> Strategy {
        if let Some(strategy) = self.slots[depth] {
            return strategy;
        }

        let strategy = if rng.gen::<bool>() {
            Strategy::BoundaryLo
        } else {
            Strategy::BoundaryHi
        };
        self.slots[depth] = Some(strategy);
        return strategy;
    }
}
