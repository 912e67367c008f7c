//! Fold patterns for the completeness test.
//!
//! `MASKS[i]` marks every combination index whose bit `i` is clear:
//!
//! ```text
//! i = 0: ...0101010101010101
//! i = 1: ...0011001100110011
//! i = 2: ...0000111100001111
//! ```
//!
//! After folding a combination table as `t | (t >> 2^i)`, the bit at each
//! marked index tells whether at least one polarity of the position-`i`
//! variable is excluded for that assignment of the remaining variables.
//! `MASKS[6]` is all ones: the table holds only 64 = 2^6 entries, so every
//! index has bit 6 clear.

/// Number of candidate-set positions a 64-bit table can distinguish.
pub const MAX_POSITIONS: usize = 7;

/// One fold pattern per variable position.
pub const MASKS: [u64; MAX_POSITIONS] = build_masks();

const fn build_masks() -> [u64; MAX_POSITIONS] {
    let mut masks = [0u64; MAX_POSITIONS];
    let mut i = 0;
    while i < 6 {
        // 2^i ones, repeating with period 2^(i+1).
        let mut m = (1u64 << (1u64 << i)) - 1;
        let mut w = 1u64 << (i + 1);
        while w < 64 {
            m |= m << w;
            w *= 2;
        }
        masks[i] = m;
        i += 1;
    }
    masks[6] = !0;
    masks
}
