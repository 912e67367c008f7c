//! Type-safe wrappers for propositional variables and literals.
//!
//! Variables are 0-indexed and dense: a database over `n` variables uses
//! exactly the IDs `0..n`, which lets every per-variable structure be a
//! plain vector.

use std::fmt;
use std::ops::Not;

/// A propositional variable (0-indexed).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Var(u32);

impl Var {
    /// Creates a new variable with the given ID.
    pub const fn new(id: u32) -> Self {
        Var(id)
    }

    /// Returns the raw variable ID as a `u32`.
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Returns the positive literal over this variable.
    pub const fn pos(self) -> Lit {
        Lit::positive(self)
    }

    /// Returns the negative literal over this variable.
    pub const fn neg(self) -> Lit {
        Lit::negative(self)
    }
}

impl fmt::Display for Var {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl From<Var> for u32 {
    fn from(var: Var) -> Self {
        var.0
    }
}

/// A literal: a variable together with a polarity bit.
///
/// Packed as `var * 2 + negated`, so the two literals over one variable are
/// adjacent and `index()` can key per-literal vectors directly.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Lit(u32);

impl Lit {
    /// Creates the unnegated literal over `var`.
    pub const fn positive(var: Var) -> Self {
        Lit(var.0 << 1)
    }

    /// Creates the negated literal over `var`.
    pub const fn negative(var: Var) -> Self {
        Lit((var.0 << 1) | 1)
    }

    /// Returns the underlying variable.
    pub const fn var(self) -> Var {
        Var(self.0 >> 1)
    }

    /// Returns the polarity bit: `true` for a negated literal.
    pub const fn is_negated(self) -> bool {
        self.0 & 1 != 0
    }

    /// Returns the packed index `var * 2 + negated`.
    ///
    /// This ordering is also used to process each binary clause from exactly
    /// one of its endpoints during the candidate search.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Returns the literal with the opposite polarity.
    pub const fn negated(self) -> Self {
        Lit(self.0 ^ 1)
    }
}

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

impl fmt::Display for Lit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negated() {
            write!(f, "~")?;
        }
        write!(f, "{}", self.var())
    }
}
