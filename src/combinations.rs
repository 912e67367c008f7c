//! Tracking of impossible joint assignments for one candidate variable set.
//!
//! A candidate set of `k <= 6` variables has `2^k` joint assignments, one
//! bit each in a single 64-bit register. Bit `m` set means the assignment
//! encoded by `m` (bit `i` = value of the position-`i` variable) has been
//! excluded by some clause or implication examined so far.

use crate::masks::MASKS;

/// Bit-set over the joint assignments of one candidate variable set.
#[derive(Debug, Default)]
pub struct CombinationTracker {
    table: u64,
    count: u32,
}

impl CombinationTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        CombinationTracker { table: 0, count: 0 }
    }

    /// Forget all recorded assignments; called once per seed clause.
    pub fn reset(&mut self) {
        self.table = 0;
        self.count = 0;
    }

    /// Number of distinct excluded assignments.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Raw table; bit `m` set means assignment `m` is excluded.
    #[inline]
    pub fn table(&self) -> u64 {
        self.table
    }

    /// Check whether assignment `mask` is excluded.
    #[inline]
    pub fn contains(&self, mask: u64) -> bool {
        debug_assert!(mask < 64);
        self.table >> mask & 1 == 1
    }

    /// Record assignment `mask` as excluded.
    #[inline]
    pub fn set(&mut self, mask: u64) {
        debug_assert!(mask < 64);
        let bit = 1u64 << mask;
        if self.table & bit == 0 {
            self.table |= bit;
            self.count += 1;
        }
    }

    /// Record every completion of `mask` over the `free` positions.
    ///
    /// A clause over a strict subset of the candidate variables excludes its
    /// sub-assignment for *every* value of the variables it omits, so each
    /// of the `2^free.len()` completions is a separately excluded assignment.
    pub fn extend_and_set(&mut self, mask: u64, free: &[usize]) {
        for completion in 0..1u32 << free.len() {
            let mut full = mask;
            for (j, &position) in free.iter().enumerate() {
                if completion >> j & 1 == 1 {
                    full |= 1 << position;
                }
            }
            self.set(full);
        }
    }

    /// Check whether the position-`i` variable is fully determined by the
    /// other `k - 1` variables.
    ///
    /// Folding the table by the stride of position `i` lines up the two
    /// polarities of that variable; the assignment is forced wherever at
    /// least one polarity is excluded, which must hold at every index of
    /// the fold pattern restricted to the live `2^k` entries.
    pub fn is_resolved(&self, i: usize, k: usize) -> bool {
        let folded = self.table | (self.table >> (1u64 << i));
        let mut mask = MASKS[i];
        if k < 6 {
            mask &= (1u64 << (1u64 << k)) - 1;
        }
        folded & mask == mask
    }

    /// Check whether some position of a `k`-variable candidate set is
    /// resolved.
    ///
    /// Fewer than `2^(k/2)` excluded assignments cannot resolve anything
    /// worth folding for, so the per-position scan is skipped entirely
    /// below that threshold.
    pub fn is_complete(&self, k: usize) -> bool {
        if (self.count as u64) < 1u64 << (k / 2) {
            return false;
        }
        (0..k).any(|i| self.is_resolved(i, k))
    }

    /// First resolved position of a `k`-variable candidate set, if any.
    pub fn resolved_position(&self, k: usize) -> Option<usize> {
        (0..k).find(|&i| self.is_resolved(i, k))
    }
}
