//! The LUT extraction pass.
//!
//! Scans the clause database for groups of clauses that jointly force one
//! variable to equal a Boolean function of up to five others, and reports
//! each such group as a packed truth table. A seed clause fixes the
//! candidate variable set; companion clauses and binary implications over
//! those variables then exclude joint assignments until some position of
//! the combination table is resolved.
//!
//! The pass is single-threaded, runs to completion, and never decides
//! satisfiability; it only rewrites `used` flags and, at the end, drops the
//! clauses consumed by successful extractions.

use log::debug;

use crate::clause::{ClauseDb, ClauseRef};
use crate::combinations::CombinationTracker;
use crate::filter::{covers, footprint, FootprintIndex};
use crate::implications::BinaryImplications;
use crate::lut::Lut;
use crate::marks::VarMarks;
use crate::types::{Lit, Var};

/// Statistics for one or more extraction passes.
#[derive(Debug, Clone, Default)]
pub struct LutStats {
    /// Number of seed clauses examined.
    pub seeds: u64,
    /// Number of LUTs reported.
    pub luts: u64,
    /// Number of clauses consumed by successful extractions.
    pub consumed_clauses: u64,
}

/// The extraction engine.
///
/// All per-seed scratch state (candidate set, position table, combination
/// tracker, visited marks) is owned here and reset before each attempt, so
/// one finder can be reused across passes.
pub struct LutFinder {
    max_lut_size: usize,
    /// Candidate-set position of each variable; only entries for currently
    /// marked variables are meaningful.
    var_position: Vec<u32>,
    marks: VarMarks,
    tracker: CombinationTracker,
    /// The candidate variable set, in seed-clause order.
    vars: Vec<Var>,
    /// Per-position literal of the companion clause under examination.
    slots: Vec<Option<Lit>>,
    /// Positions a contribution leaves unconstrained.
    missing: Vec<usize>,
    /// Seed literals, copied out so headers can be rewritten while
    /// iterating.
    seed_lits: Vec<Lit>,
    /// Clauses contributing to the current candidate.
    contributing: Vec<ClauseRef>,
    /// Clauses consumed by successful extractions across the whole pass.
    consumed: Vec<ClauseRef>,
    stats: LutStats,
}

impl LutFinder {
    /// Create a finder for LUTs of up to `max_lut_size` variables
    /// (output included).
    ///
    /// # Panics
    ///
    /// Panics if `max_lut_size > 6`: the combination table is a single
    /// 64-bit word and holds only 2^6 joint assignments.
    pub fn new(max_lut_size: usize) -> Self {
        assert!(
            max_lut_size <= 6,
            "Max LUT size should be in the range 0..=6"
        );
        LutFinder {
            max_lut_size,
            var_position: Vec::new(),
            marks: VarMarks::default(),
            tracker: CombinationTracker::new(),
            vars: Vec::new(),
            slots: Vec::new(),
            missing: Vec::new(),
            seed_lits: Vec::new(),
            contributing: Vec::new(),
            consumed: Vec::new(),
            stats: LutStats::default(),
        }
    }

    /// Statistics accumulated so far.
    pub fn stats(&self) -> &LutStats {
        &self.stats
    }

    /// Run one extraction pass over the database.
    ///
    /// `on_lut` is invoked once per discovered LUT. Afterwards every clause
    /// consumed by a successful extraction is dropped from the database and
    /// the literal arena is compacted.
    pub fn run<F>(&mut self, db: &mut ClauseDb, on_lut: F)
    where
        F: FnMut(Lut),
    {
        self.run_interruptible(db, on_lut, || false);
    }

    /// Like [`run`](Self::run), with a cooperative interrupt check between
    /// seed clauses.
    ///
    /// When `interrupted` returns true the sweep stops early; LUTs already
    /// found are still committed and their clauses dropped.
    pub fn run_interruptible<F, G>(&mut self, db: &mut ClauseDb, mut on_lut: F, mut interrupted: G)
    where
        F: FnMut(Lut),
        G: FnMut() -> bool,
    {
        let index = FootprintIndex::build(db, self.max_lut_size);
        let implications = BinaryImplications::build(db);
        self.var_position.resize(db.num_vars(), 0);
        self.marks.reserve(db.num_vars());
        self.consumed.clear();
        for cref in db.refs() {
            db.header_mut(cref).set_used(false);
        }
        debug!(
            "lut pass over {} clauses, {} vars, max size {}",
            db.len(),
            db.num_vars(),
            self.max_lut_size
        );

        'sweep: for size in (3..=self.max_lut_size).rev() {
            for cref in db.refs() {
                if interrupted() {
                    debug!("lut pass interrupted");
                    break 'sweep;
                }
                let header = db.header(cref);
                if header.len() != size
                    || header.is_removed()
                    || header.is_learned()
                    || header.is_used()
                    || !db.all_distinct(cref)
                {
                    continue;
                }
                if let Some(lut) = self.check_seed(db, &index, &implications, cref) {
                    debug!("found {}", lut);
                    self.stats.luts += 1;
                    on_lut(lut);
                }
            }
        }

        // The used flags left behind by abandoned seeds are provisional;
        // recompute them from the committed consumption set before handing
        // the filter to the database.
        for cref in db.refs() {
            db.header_mut(cref).set_used(false);
        }
        for &cref in &self.consumed {
            db.header_mut(cref).set_used(true);
        }
        db.retain(|h| !h.is_used());
        debug!(
            "lut pass done: {} luts, {} clauses consumed",
            self.stats.luts, self.stats.consumed_clauses
        );
    }

    /// Run a pass and collect the discovered LUTs.
    pub fn extract(&mut self, db: &mut ClauseDb) -> Vec<Lut> {
        let mut luts = Vec::new();
        self.run(db, |lut| luts.push(lut));
        luts
    }

    /// Try to complete a LUT around one seed clause.
    fn check_seed(
        &mut self,
        db: &mut ClauseDb,
        index: &FootprintIndex,
        implications: &BinaryImplications,
        seed: ClauseRef,
    ) -> Option<Lut> {
        self.stats.seeds += 1;
        let filter = footprint(db.literals(seed));

        self.marks.clear();
        self.vars.clear();
        self.seed_lits.clear();
        self.seed_lits.extend_from_slice(db.literals(seed));
        let mut mask = 0u64;
        for (i, &lit) in db.literals(seed).iter().enumerate() {
            self.vars.push(lit.var());
            self.var_position[lit.var().id() as usize] = i as u32;
            self.marks.insert(lit.var());
            mask |= (lit.is_negated() as u64) << i;
        }

        self.tracker.reset();
        self.tracker.set(mask);
        self.contributing.clear();
        self.contributing.push(seed);
        db.header_mut(seed).set_used(true);

        for i in 0..self.seed_lits.len() {
            let l = self.seed_lits[i];
            // Companion clauses through the footprint index: cheap filter
            // first, exact candidate-set membership check inside.
            for entry in index.entries(l.var()) {
                if covers(filter, entry.filter)
                    && !db.header(entry.clause).is_used()
                    && self.contribute_clause(db, entry.clause)
                {
                    return self.build_lut(db);
                }
            }
            // Binary implications over both polarities. The index ordering
            // check processes each binary clause from exactly one endpoint.
            for s in [l, !l] {
                for imp in implications.of(s) {
                    if self.marks.contains(imp.other.var())
                        && imp.other.index() < s.index()
                        && !db.header(imp.clause).is_used()
                        && self.contribute_pair(db, !s, imp.other, imp.clause)
                    {
                        return self.build_lut(db);
                    }
                }
            }
        }
        None
    }

    /// Record the excluded sub-assignment of a companion clause.
    ///
    /// Returns true when the combination table became complete.
    fn contribute_clause(&mut self, db: &mut ClauseDb, cref: ClauseRef) -> bool {
        // Exact check behind the approximate filter.
        for lit in db.literals(cref) {
            if !self.marks.contains(lit.var()) {
                return false;
            }
        }
        debug_assert!(db.literals(cref).len() <= self.vars.len());

        let mask = self.contribution_mask(db, cref);
        db.header_mut(cref).set_used(true);
        self.contributing.push(cref);
        self.apply(mask)
    }

    /// Excluded sub-assignment of a contributor over the candidate
    /// positions; the positions it leaves unconstrained end up in
    /// `self.missing`.
    fn contribution_mask(&mut self, db: &ClauseDb, cref: ClauseRef) -> u64 {
        let k = self.vars.len();
        self.slots.clear();
        self.slots.resize(k, None);
        for &lit in db.literals(cref) {
            self.slots[self.var_position[lit.var().id() as usize] as usize] = Some(lit);
        }
        let mut mask = 0u64;
        self.missing.clear();
        for (i, slot) in self.slots.iter().enumerate() {
            match slot {
                Some(lit) => mask |= (lit.is_negated() as u64) << i,
                None => self.missing.push(i),
            }
        }
        mask
    }

    /// Record the excluded sub-assignment of a binary clause `(l1 ∨ l2)`.
    fn contribute_pair(&mut self, db: &mut ClauseDb, l1: Lit, l2: Lit, cref: ClauseRef) -> bool {
        debug_assert!(self.marks.contains(l1.var()));
        debug_assert!(self.marks.contains(l2.var()));

        let mut mask = 0u64;
        self.missing.clear();
        for (i, &var) in self.vars.iter().enumerate() {
            if var == l1.var() {
                mask |= (l1.is_negated() as u64) << i;
            } else if var == l2.var() {
                mask |= (l2.is_negated() as u64) << i;
            } else {
                self.missing.push(i);
            }
        }

        db.header_mut(cref).set_used(true);
        self.contributing.push(cref);
        self.apply(mask)
    }

    fn apply(&mut self, mask: u64) -> bool {
        self.tracker.extend_and_set(mask, &self.missing);
        self.tracker.is_complete(self.vars.len())
    }

    /// Convert the completed combination table into a truth table.
    ///
    /// The first resolved position names the output variable; it is removed
    /// from the candidate set keeping the relative order of the rest. For
    /// every joint assignment of the remaining positions, the output is
    /// forced to whichever of its two polarities is not excluded.
    ///
    /// Returns `None` when the group cannot be consumed soundly; the seed
    /// is then abandoned with nothing released or consumed.
    fn build_lut(&mut self, db: &mut ClauseDb) -> Option<Lut> {
        let k = self.vars.len();
        let position = self
            .tracker
            .resolved_position(k)
            .expect("Complete combination table should have a resolved position");
        let output = self.vars[position];

        // The truth table is read from the clauses that will actually be
        // consumed. A contributor that does not mention the output
        // constrains the inputs themselves, not the function; it stays in
        // the database, so its exclusions must not shape the table.
        let mut consumed_exclusions = CombinationTracker::new();
        for idx in 0..self.contributing.len() {
            let cref = self.contributing[idx];
            if db.literals(cref).iter().any(|l| l.var() == output) {
                let mask = self.contribution_mask(db, cref);
                consumed_exclusions.extend_and_set(mask, &self.missing);
            }
        }

        let low = (1u64 << position) - 1;
        let mut table = 0u64;
        for j in 0..1u64 << (k - 1) {
            // Expand the reduced index around the output position.
            let full0 = ((j & !low) << 1) | (j & low);
            let full1 = full0 | (1 << position);
            debug_assert!(
                self.tracker.contains(full0) || self.tracker.contains(full1),
                "Resolved position should exclude one polarity everywhere"
            );
            match (
                consumed_exclusions.contains(full0),
                consumed_exclusions.contains(full1),
            ) {
                // Output 0 excluded means the output is forced to 1.
                (true, false) => table |= 1 << j,
                (false, true) => {}
                // Only released clauses exclude this input; it stays
                // infeasible in the remaining database and the bit is a
                // don't-care.
                (false, false) => table |= 1 << j,
                // The consumed clauses alone are contradictory at this
                // input; trading them for a function table would add
                // models.
                (true, true) => return None,
            }
        }

        self.vars.remove(position);
        for idx in 0..self.contributing.len() {
            let cref = self.contributing[idx];
            if db.literals(cref).iter().any(|l| l.var() == output) {
                self.consumed.push(cref);
                self.stats.consumed_clauses += 1;
            } else {
                db.header_mut(cref).set_used(false);
            }
        }

        Some(Lut {
            table,
            inputs: self.vars.clone(),
            output,
        })
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn lit(v: i32) -> Lit {
        let var = Var::new(v.unsigned_abs() - 1);
        if v > 0 {
            var.pos()
        } else {
            var.neg()
        }
    }

    fn db_of(clauses: &[&[i32]]) -> ClauseDb {
        let mut db = ClauseDb::new();
        for c in clauses {
            let lits: Vec<Lit> = c.iter().map(|&v| lit(v)).collect();
            db.add(&lits, false);
        }
        db
    }

    /// Check the emitted truth table against the original clause set: for
    /// every input assignment, the clauses over `inputs ∪ {output}` must
    /// allow exactly the output value the table claims.
    fn assert_lut_sound(clauses: &[&[i32]], lut: &Lut) {
        let n = lut.inputs.len();
        for input_bits in 0..1u64 << n {
            let mut allowed = Vec::new();
            for output_value in [false, true] {
                let value_of = |var: Var| -> bool {
                    if var == lut.output {
                        return output_value;
                    }
                    let i = lut
                        .inputs
                        .iter()
                        .position(|&v| v == var)
                        .expect("clause variable outside the LUT");
                    input_bits >> i & 1 == 1
                };
                let satisfied = clauses.iter().all(|c| {
                    c.iter().any(|&v| {
                        let l = lit(v);
                        value_of(l.var()) != l.is_negated()
                    })
                });
                if satisfied {
                    allowed.push(output_value);
                }
            }
            assert_eq!(
                allowed,
                vec![lut.value(input_bits)],
                "input assignment {:#b}",
                input_bits
            );
        }
    }

    #[test]
    fn test_and_gate_recovery() {
        // a = b AND c: (a ∨ ¬b ∨ ¬c), (¬a ∨ b), (¬a ∨ c).
        let clauses: &[&[i32]] = &[&[1, -2, -3], &[-1, 2], &[-1, 3]];
        let mut db = db_of(clauses);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 1);
        let lut = &luts[0];
        assert_eq!(lut.output, Var::new(0));
        assert_eq!(lut.inputs, vec![Var::new(1), Var::new(2)]);
        assert_eq!(lut.table, 0b1000);
        assert_lut_sound(clauses, lut);

        // All three clauses consumed.
        assert!(db.is_empty());
        assert_eq!(finder.stats().luts, 1);
        assert_eq!(finder.stats().consumed_clauses, 3);
    }

    #[test]
    fn test_negative_partial_gate() {
        // Only two of the three AND-gate clauses: no LUT, nothing dropped.
        let mut db = db_of(&[&[1, -2, -3], &[-1, 2]]);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert!(luts.is_empty());
        assert_eq!(db.len(), 2);
    }

    #[test]
    fn test_xor_gate_recovery() {
        // a = b XOR c, the four ternary clauses.
        let clauses: &[&[i32]] = &[&[-1, 2, 3], &[-1, -2, -3], &[1, -2, 3], &[1, 2, -3]];
        let mut db = db_of(clauses);

        let mut finder = LutFinder::new(6);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 1);
        let lut = &luts[0];
        assert_eq!(lut.output, Var::new(0));
        assert_eq!(lut.inputs, vec![Var::new(1), Var::new(2)]);
        assert_eq!(lut.table, 0b0110);
        assert_lut_sound(clauses, lut);
        assert!(db.is_empty());
    }

    #[test]
    fn test_output_resolved_at_inner_position() {
        // The same AND gate, but the seed clause lists the output second:
        // extraction must work for a resolved position other than 0.
        let clauses: &[&[i32]] = &[&[-2, 1, -3], &[-1, 2], &[-1, 3]];
        let mut db = db_of(clauses);

        let mut finder = LutFinder::new(3);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 1);
        let lut = &luts[0];
        assert_eq!(lut.output, Var::new(0));
        assert_eq!(lut.inputs, vec![Var::new(1), Var::new(2)]);
        assert_eq!(lut.table, 0b1000);
        assert_lut_sound(clauses, lut);
        assert!(db.is_empty());
    }

    #[test]
    fn test_and3_gate_recovery() {
        // a = b AND c AND d, a four-variable LUT.
        let clauses: &[&[i32]] = &[&[1, -2, -3, -4], &[-1, 2], &[-1, 3], &[-1, 4]];
        let mut db = db_of(clauses);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 1);
        let lut = &luts[0];
        assert_eq!(lut.output, Var::new(0));
        assert_eq!(lut.inputs, vec![Var::new(1), Var::new(2), Var::new(3)]);
        assert_eq!(lut.table, 0x80);
        assert_lut_sound(clauses, lut);
        assert!(db.is_empty());
    }

    #[test]
    fn test_two_disjoint_gates() {
        // Two AND gates over disjoint variables; no clause may be consumed
        // by more than one LUT.
        let mut db = db_of(&[
            &[1, -2, -3],
            &[-1, 2],
            &[-1, 3],
            &[4, -5, -6],
            &[-4, 5],
            &[-4, 6],
        ]);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 2);
        let mut outputs: Vec<Var> = luts.iter().map(|l| l.output).collect();
        outputs.sort();
        assert_eq!(outputs, vec![Var::new(0), Var::new(3)]);
        assert!(db.is_empty());
        assert_eq!(finder.stats().consumed_clauses, 6);
    }

    #[test]
    fn test_learned_companion_is_consumed() {
        // Learned clauses are never seeds but do serve as companions.
        let mut db = ClauseDb::new();
        db.add(&[lit(1), lit(-2), lit(-3)], false);
        db.add(&[lit(-1), lit(2)], true);
        db.add(&[lit(-1), lit(3)], false);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 1);
        assert!(db.is_empty());
    }

    #[test]
    fn test_learned_clause_is_no_seed() {
        let mut db = ClauseDb::new();
        db.add(&[lit(1), lit(-2), lit(-3)], true);
        db.add(&[lit(-1), lit(2)], false);
        db.add(&[lit(-1), lit(3)], false);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert!(luts.is_empty());
        assert_eq!(finder.stats().seeds, 0);
        assert_eq!(db.len(), 3);
    }

    #[test]
    fn test_input_only_companion_released() {
        // (b ∨ c) contributes combinations but constrains only the inputs
        // of the discovered function; it must survive the pass.
        let clauses: &[&[i32]] = &[
            &[1, -2, -3],  // seed
            &[-1, -2, 3],  // forces a = 0 at (b, c) = (1, 0)
            &[-1, 2, -3],  // forces a = 0 at (b, c) = (0, 1)
            &[2, 3],       // blocks (b, c) = (0, 0) outright
        ];
        let mut db = db_of(clauses);

        let mut finder = LutFinder::new(3);
        let luts = finder.extract(&mut db);

        assert_eq!(luts.len(), 1);
        let lut = &luts[0];
        assert_eq!(lut.output, Var::new(0));
        assert_eq!(lut.inputs, vec![Var::new(1), Var::new(2)]);
        // (0, 0) is infeasible and its bit a don't-care; the feasible
        // entries follow the consumed clauses.
        assert!(!lut.value(0b01));
        assert!(!lut.value(0b10));
        assert!(lut.value(0b11));

        assert_eq!(finder.stats().consumed_clauses, 3);
        assert_eq!(db.len(), 1);
        assert_eq!(db.literals(ClauseRef(0)), &[lit(2), lit(3)]);
    }

    #[test]
    fn test_contradictory_group_is_not_extracted() {
        // At (b, c) = (0, 0) the first two clauses exclude both values of
        // a, and every clause mentions a, so none could be released: the
        // group has no function table and trading it for one would add
        // models. The candidate must be abandoned with nothing dropped.
        let mut db = db_of(&[
            &[1, 2, 3],
            &[-1, 2, 3],
            &[1, -2, 3],
            &[1, 2, -3],
            &[1, -2, -3],
        ]);

        let mut finder = LutFinder::new(4);
        let luts = finder.extract(&mut db);

        assert!(luts.is_empty());
        assert_eq!(finder.stats().consumed_clauses, 0);
        assert_eq!(db.len(), 5);
    }

    #[test]
    #[should_panic(expected = "Max LUT size should be in the range 0..=6")]
    fn test_oversized_max_lut_size_panics() {
        LutFinder::new(7);
    }

    #[test]
    fn test_interrupt_stops_before_any_seed() {
        let mut db = db_of(&[&[1, -2, -3], &[-1, 2], &[-1, 3]]);

        let mut finder = LutFinder::new(4);
        let mut luts = Vec::new();
        finder.run_interruptible(&mut db, |lut| luts.push(lut), || true);

        assert!(luts.is_empty());
        assert_eq!(finder.stats().seeds, 0);
        assert_eq!(db.len(), 3);
    }

    #[test]
    fn test_undersized_max_does_nothing() {
        // With max size 2 there are no eligible seeds at all.
        let mut db = db_of(&[&[1, -2, -3], &[-1, 2], &[-1, 3]]);

        let mut finder = LutFinder::new(2);
        let luts = finder.extract(&mut db);

        assert!(luts.is_empty());
        assert_eq!(finder.stats().seeds, 0);
        assert_eq!(db.len(), 3);
    }
}
