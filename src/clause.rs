//! Clause database with arena-allocated literals.
//!
//! All literals live in one contiguous arena; each clause is a compact
//! header pointing into it. Clauses are addressed by [`ClauseRef`] handles
//! rather than references, so per-variable index lists built over the
//! database can never dangle while flags are being rewritten.

use crate::types::{Lit, Var};

/// Index of a clause in the database.
///
/// Stable for as long as no clause is dropped; [`ClauseDb::retain`]
/// invalidates all outstanding refs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClauseRef(pub u32);

/// Compact per-clause header.
#[derive(Debug, Clone)]
pub struct ClauseHeader {
    /// Start index in the literal arena.
    lit_start: u32,
    /// Number of literals.
    lit_len: u16,
    /// Flags: bit 0 = learned, bit 1 = removed, bit 2 = used.
    flags: u8,
}

impl ClauseHeader {
    const LEARNED: u8 = 1;
    const REMOVED: u8 = 1 << 1;
    const USED: u8 = 1 << 2;

    fn new(lit_start: u32, lit_len: u16, learned: bool) -> Self {
        ClauseHeader {
            lit_start,
            lit_len,
            flags: if learned { Self::LEARNED } else { 0 },
        }
    }

    /// Check if this is a learned clause.
    #[inline]
    pub fn is_learned(&self) -> bool {
        self.flags & Self::LEARNED != 0
    }

    /// Check if this clause has been removed from the live set.
    #[inline]
    pub fn is_removed(&self) -> bool {
        self.flags & Self::REMOVED != 0
    }

    /// Mark this clause as removed.
    #[inline]
    pub fn set_removed(&mut self) {
        self.flags |= Self::REMOVED;
    }

    /// Check the scratch `used` flag.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.flags & Self::USED != 0
    }

    /// Set or clear the scratch `used` flag.
    #[inline]
    pub fn set_used(&mut self, used: bool) {
        if used {
            self.flags |= Self::USED;
        } else {
            self.flags &= !Self::USED;
        }
    }

    /// Number of literals.
    #[inline]
    pub fn len(&self) -> usize {
        self.lit_len as usize
    }

    /// Check if the clause is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lit_len == 0
    }
}

/// Clause database.
pub struct ClauseDb {
    headers: Vec<ClauseHeader>,
    literals: Vec<Lit>,
    num_vars: usize,
}

impl ClauseDb {
    /// Create a new empty clause database.
    pub fn new() -> Self {
        ClauseDb {
            headers: Vec::new(),
            literals: Vec::new(),
            num_vars: 0,
        }
    }

    /// Number of clauses.
    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Check if the database holds no clauses.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Number of variables; one past the largest variable mentioned.
    #[inline]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Add a new clause, returning its handle.
    pub fn add(&mut self, lits: &[Lit], learned: bool) -> ClauseRef {
        assert!(lits.len() <= u16::MAX as usize, "Clause too large");
        let start = self.literals.len() as u32;
        self.literals.extend_from_slice(lits);
        for &lit in lits {
            let id = lit.var().id() as usize;
            if id >= self.num_vars {
                self.num_vars = id + 1;
            }
        }
        let idx = self.headers.len() as u32;
        self.headers.push(ClauseHeader::new(start, lits.len() as u16, learned));
        ClauseRef(idx)
    }

    /// Get the header of a clause.
    #[inline]
    pub fn header(&self, cref: ClauseRef) -> &ClauseHeader {
        &self.headers[cref.0 as usize]
    }

    /// Get the mutable header of a clause.
    #[inline]
    pub fn header_mut(&mut self, cref: ClauseRef) -> &mut ClauseHeader {
        &mut self.headers[cref.0 as usize]
    }

    /// Get the literals of a clause.
    #[inline]
    pub fn literals(&self, cref: ClauseRef) -> &[Lit] {
        let h = &self.headers[cref.0 as usize];
        let start = h.lit_start as usize;
        &self.literals[start..start + h.lit_len as usize]
    }

    /// Check that the clause mentions each variable at most once.
    pub fn all_distinct(&self, cref: ClauseRef) -> bool {
        let lits = self.literals(cref);
        for (i, a) in lits.iter().enumerate() {
            for b in &lits[i + 1..] {
                if a.var() == b.var() {
                    return false;
                }
            }
        }
        true
    }

    /// Iterator over all clause handles.
    pub fn refs(&self) -> impl Iterator<Item = ClauseRef> {
        (0..self.headers.len() as u32).map(ClauseRef)
    }

    /// Iterator over the variables of a clause.
    pub fn vars(&self, cref: ClauseRef) -> impl Iterator<Item = Var> + '_ {
        self.literals(cref).iter().map(|l| l.var())
    }

    /// Keep only the clauses whose header satisfies `pred`; the literal
    /// arena is compacted in the same pass.
    ///
    /// Invalidates every outstanding [`ClauseRef`].
    pub fn retain<F>(&mut self, pred: F)
    where
        F: Fn(&ClauseHeader) -> bool,
    {
        let mut new_headers = Vec::with_capacity(self.headers.len());
        let mut new_literals = Vec::with_capacity(self.literals.len());
        for (idx, header) in self.headers.iter().enumerate() {
            if !pred(header) {
                continue;
            }
            let start = header.lit_start as usize;
            let len = header.lit_len as usize;
            let mut header = self.headers[idx].clone();
            header.lit_start = new_literals.len() as u32;
            new_literals.extend_from_slice(&self.literals[start..start + len]);
            new_headers.push(header);
        }
        self.headers = new_headers;
        self.literals = new_literals;
    }
}

impl Default for ClauseDb {
    fn default() -> Self {
        Self::new()
    }
}
