// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Statistics
//!
//! Tallies maintained by the enumerator while it walks the choice tree.
//! Useful for sizing batch parameters and for sanity-checking that a model
//! is the size you think it is.

use strum::EnumCount;
use strum_macros::EnumCount as EnumCountMacro;

#[derive(EnumCountMacro, Debug, Copy, Clone)]
#[repr(u8)]
pub enum Counters {
    /// Completed permutations emitted.
    Leaves,
    /// Worklist frames expanded (one per prefix explored).
    Frames,
    /// Generator forks taken for sibling branches.
    Forks,
}

#[derive(Debug, Default)]
pub struct Statistics {
    stats: [u64; Counters::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    /// Increment the specified counter by 1.
    pub(crate) fn increment(&mut self, counter: Counters) {
        self.stats[counter as usize] += 1;
    }

    /// Get the current value of the specified counter.
    pub fn get(&self, counter: Counters) -> u64 {
        self.stats[counter as usize]
    }
}
