//! Per-literal implication lists harvested from binary clauses.
//!
//! A binary clause `(x ∨ y)` is the pair of implications `¬x → y` and
//! `¬y → x`. The candidate search consumes them in that form: the list for
//! a literal `l` holds every `(other, clause)` such that the database
//! contains the clause `(¬l ∨ other)`.
//!
//! Binary clauses are served exclusively through these lists; the footprint
//! index only covers clauses of three or more literals.

use crate::clause::{ClauseDb, ClauseRef};
use crate::types::Lit;

/// One implication entry: the second literal of a binary clause, plus the
/// handle of the clause it came from.
#[derive(Debug, Clone, Copy)]
pub struct Implication {
    /// The other literal of the binary clause.
    pub other: Lit,
    /// The binary clause itself.
    pub clause: ClauseRef,
}

/// Implication lists over all literals, built once per pass.
#[derive(Debug, Default)]
pub struct BinaryImplications {
    lists: Vec<Vec<Implication>>,
}

impl BinaryImplications {
    /// Collect every live binary clause of the database, learned ones
    /// included. Tautologies and duplicate-variable binaries are skipped.
    pub fn build(db: &ClauseDb) -> Self {
        let mut lists = vec![Vec::new(); db.num_vars() * 2];
        for cref in db.refs() {
            let header = db.header(cref);
            if header.len() != 2 || header.is_removed() {
                continue;
            }
            let lits = db.literals(cref);
            let (x, y) = (lits[0], lits[1]);
            if x.var() == y.var() {
                continue;
            }
            lists[x.negated().index()].push(Implication { other: y, clause: cref });
            lists[y.negated().index()].push(Implication { other: x, clause: cref });
        }
        BinaryImplications { lists }
    }

    /// Entries for `l`: each represents a clause `(¬l ∨ other)`.
    #[inline]
    pub fn of(&self, l: Lit) -> &[Implication] {
        self.lists.get(l.index()).map_or(&[], Vec::as_slice)
    }
}
