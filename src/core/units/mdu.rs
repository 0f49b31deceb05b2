//! Multiply/Divide Unit (MDU).
//!
//! Division never traps. Division by zero and signed overflow produce fixed
//! results so that guest programs behave identically on every host.

use crate::core::control::MdOp;

/// Multiply/divide unit.
pub struct Mdu;

impl Mdu {
    /// Executes a multiply or divide operation.
    ///
    /// | Case | DIV/DIVU | REM/REMU |
    /// |------|----------|----------|
    /// | `b == 0` | `0xffff_ffff` | `a` |
    /// | `i32::MIN / -1` | `i32::MIN` | `0` |
    pub fn execute(op: MdOp, a: u32, b: u32) -> u32 {
        const WORD_BITS: u32 = 32;

        match op {
            MdOp::Mul => a.wrapping_mul(b),
            MdOp::Mulhi => ((a as i32 as i64 * b as i32 as i64) >> WORD_BITS) as u32,
            MdOp::Mulhiu => ((a as u64 * b as u64) >> WORD_BITS) as u32,
            MdOp::Div => {
                if b == 0 {
                    u32::MAX
                } else {
                    (a as i32).wrapping_div(b as i32) as u32
                }
            }
            MdOp::Divu => a.checked_div(b).unwrap_or(u32::MAX),
            MdOp::Rem => {
                if b == 0 {
                    a
                } else {
                    (a as i32).wrapping_rem(b as i32) as u32
                }
            }
            MdOp::Remu => a.checked_rem(b).unwrap_or(a),
        }
    }
}
