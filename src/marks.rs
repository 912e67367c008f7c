//! Generation-stamped scratch marking over variables.
//!
//! The candidate search marks the seed's variables before every attempt and
//! needs the previous attempt's marks gone. Storing a generation stamp per
//! variable makes `clear` O(1): bump the current generation and all old
//! stamps become stale.

use crate::types::Var;

/// A reusable visited set over variables.
#[derive(Debug)]
pub struct VarMarks {
    stamps: Vec<u32>,
    generation: u32,
}

impl Default for VarMarks {
    fn default() -> Self {
        Self::new(0)
    }
}

impl VarMarks {
    /// Create marks for `num_vars` variables.
    pub fn new(num_vars: usize) -> Self {
        VarMarks {
            stamps: vec![0; num_vars],
            // Stamp 0 is never current, so a fresh set has nothing marked.
            generation: 1,
        }
    }

    /// Ensure the marks can hold `num_vars` variables.
    pub fn reserve(&mut self, num_vars: usize) {
        if self.stamps.len() < num_vars {
            self.stamps.resize(num_vars, 0);
        }
    }

    /// Forget all marks.
    pub fn clear(&mut self) {
        self.generation += 1;
        if self.generation == u32::MAX {
            // Stamp wrap-around: reset everything once per 2^32 clears.
            self.stamps.fill(0);
            self.generation = 1;
        }
    }

    /// Mark a variable.
    #[inline]
    pub fn insert(&mut self, var: Var) {
        self.stamps[var.id() as usize] = self.generation;
    }

    /// Check whether a variable is marked.
    #[inline]
    pub fn contains(&self, var: Var) -> bool {
        self.stamps[var.id() as usize] == self.generation
    }
}
