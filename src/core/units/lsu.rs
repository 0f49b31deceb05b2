//! Load/Store Unit (LSU) Helpers.
//!
//! Address generation and the sign/zero extension of loaded values. The
//! memory access itself goes through the CPU's memory interface so that it
//! can be accounted against the data cache.

use crate::core::control::MemOp;

/// Load/store unit.
pub struct Lsu;

impl Lsu {
    /// Computes `base + offset` with 32-bit wrap-around.
    #[inline]
    pub fn effective_address(base: u32, offset: u32) -> u32 {
        base.wrapping_add(offset)
    }

    /// Extends a raw loaded value to a register value.
    ///
    /// # Arguments
    ///
    /// * `op` - The load operation that produced `raw`
    /// * `raw` - The value read from memory, zero-extended to 32 bits
    ///
    /// # Returns
    ///
    /// The sign-extended value for `Load8`/`Load16`, `raw` otherwise.
    pub fn extend(op: MemOp, raw: u32) -> u32 {
        match op {
            MemOp::Load8 => raw as u8 as i8 as i32 as u32,
            MemOp::Load16 => raw as u16 as i16 as i32 as u32,
            _ => raw,
        }
    }
}
