//! The output record of a successful extraction.

use std::fmt;

use crate::types::Var;

/// A discovered lookup table: one variable forced to a Boolean function of
/// the others.
///
/// Only the low `2^inputs.len()` bits of `table` are meaningful; bit `m` is
/// the output value for the input assignment where bit `i` of `m` is the
/// value of `inputs[i]`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Lut {
    /// Packed truth table.
    pub table: u64,
    /// Input variables, in candidate-set order.
    pub inputs: Vec<Var>,
    /// The functionally determined variable.
    pub output: Var,
}

impl Lut {
    /// Evaluate the function at the given input assignment.
    pub fn value(&self, input_bits: u64) -> bool {
        assert!(self.inputs.len() <= 6);
        debug_assert!(input_bits < 1 << self.inputs.len());
        self.table >> input_bits & 1 == 1
    }
}

impl fmt::Display for Lut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = lut(0x{:x};", self.output, self.table)?;
        for input in &self.inputs {
            write!(f, " {}", input)?;
        }
        write!(f, ")")
    }
}
