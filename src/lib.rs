//! # lut-rs: Lookup-Table Extraction from CNF
//!
//! **`lut-rs`** finds gate structure hidden in flat CNF: groups of clauses
//! that jointly force one variable to be a boolean function of up to five
//! others. Each discovered group is reported as a **LUT** (lookup table),
//! a packed 64-bit truth table over the input variables, and the defining
//! clauses are dropped from the database.
//!
//! ## How it works
//!
//! Every clause of size 3..=k is tried as a **seed**: its variables form a
//! candidate set, and each of its falsifying assignments is one *excluded
//! combination* in a 64-bit table over the 2^k joint assignments of the
//! set. Companion clauses over subsets of the candidate variables (found
//! through an approximate footprint index) and binary clauses (found
//! through implication lists) exclude further combinations. As soon as one
//! variable has some polarity excluded under *every* assignment of the
//! others, that variable is functionally determined and a LUT is emitted.
//!
//! ## Basic Usage
//!
//! ```rust
//! use lut_rs::clause::ClauseDb;
//! use lut_rs::finder::LutFinder;
//! use lut_rs::types::Var;
//!
//! // a = b AND c, encoded as three clauses.
//! let (a, b, c) = (Var::new(0), Var::new(1), Var::new(2));
//! let mut db = ClauseDb::new();
//! db.add(&[a.pos(), b.neg(), c.neg()], false);
//! db.add(&[a.neg(), b.pos()], false);
//! db.add(&[a.neg(), c.pos()], false);
//!
//! let mut finder = LutFinder::new(4);
//! let luts = finder.extract(&mut db);
//!
//! assert_eq!(luts.len(), 1);
//! assert_eq!(luts[0].output, a);
//! assert_eq!(luts[0].inputs, vec![b, c]);
//! assert_eq!(luts[0].table, 0b1000);
//! // The defining clauses were consumed.
//! assert!(db.is_empty());
//! ```
//!
//! ## Core Components
//!
//! - **[`finder`]**: The extraction pass itself; start with
//!   [`LutFinder`][crate::finder::LutFinder].
//! - **[`clause`]**: The arena-backed clause database the pass runs over.
//! - **[`combinations`]**: The 64-bit excluded-combination table and its
//!   completeness test.
//! - **[`lut`]**: The output record, a truth table plus its variables.

pub mod clause;
pub mod combinations;
pub mod filter;
pub mod finder;
pub mod implications;
pub mod lut;
pub mod marks;
pub mod masks;
pub mod types;
