//! Approximate clause footprints and the per-variable companion index.
//!
//! A footprint is the OR over a clause's literals of `1 << (var % 32)`.
//! It is a necessary-but-not-sufficient superset test: when a companion's
//! footprint has a bit outside the seed's footprint, the companion mentions
//! a variable the seed does not, and can be pruned without touching its
//! literals. Hits still get the exact membership check in the search.

use crate::clause::{ClauseDb, ClauseRef};
use crate::types::{Lit, Var};

/// Compute the footprint of a literal sequence.
pub fn footprint(lits: &[Lit]) -> u32 {
    let mut filter = 0u32;
    for lit in lits {
        filter |= 1 << (lit.var().id() % 32);
    }
    filter
}

/// Check whether `inner` can only mention variables that `outer` mentions.
#[inline]
pub fn covers(outer: u32, inner: u32) -> bool {
    outer | inner == outer
}

/// One index entry: a candidate companion clause and its footprint.
#[derive(Debug, Clone, Copy)]
pub struct FootprintEntry {
    /// Approximate digest of the clause's variable set.
    pub filter: u32,
    /// The clause.
    pub clause: ClauseRef,
}

/// Per-variable lists of LUT-eligible clauses, built once per pass and
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct FootprintIndex {
    by_var: Vec<Vec<FootprintEntry>>,
}

impl FootprintIndex {
    /// Index every live clause with `3 <= size <= max_lut_size` and
    /// pairwise-distinct variables, learned clauses included. Binary
    /// clauses are left to the implication lists.
    pub fn build(db: &ClauseDb, max_lut_size: usize) -> Self {
        let mut by_var = vec![Vec::new(); db.num_vars()];
        for cref in db.refs() {
            let header = db.header(cref);
            let size = header.len();
            if size < 3 || size > max_lut_size || header.is_removed() {
                continue;
            }
            if !db.all_distinct(cref) {
                continue;
            }
            let entry = FootprintEntry {
                filter: footprint(db.literals(cref)),
                clause: cref,
            };
            for var in db.vars(cref) {
                by_var[var.id() as usize].push(entry);
            }
        }
        FootprintIndex { by_var }
    }

    /// Entries for every indexed clause mentioning `var`.
    #[inline]
    pub fn entries(&self, var: Var) -> &[FootprintEntry] {
        self.by_var.get(var.id() as usize).map_or(&[], Vec::as_slice)
    }
}
