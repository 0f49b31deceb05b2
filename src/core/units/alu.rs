//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the execute stage. It
//! handles arithmetic, logical operations, shifts, comparisons and the bit
//! manipulation operations (SHUF, CLZ, REV, sign extension). Operands and
//! results are raw 32-bit words.

use crate::core::control::AluOp;

/// Arithmetic Logic Unit (ALU) for integer operations.
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a` - First operand (ignored by `Ldhi`/`Ldhio`)
    /// * `b` - Second operand, shift amount, or shuffle control word
    ///
    /// # Returns
    ///
    /// The 32-bit result. Unary operations (`Clz`, `Rev`, `Extb`, `Exth`)
    /// only look at `a`.
    pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        /// Shift amounts are taken modulo the word size.
        const SHAMT_MASK: u32 = 0x1f;

        /// Width of the immediate consumed by LDHI/LDHIO.
        const LDHI_SHIFT: u32 = 13;

        let shamt = b & SHAMT_MASK;
        match op {
            AluOp::Or => a | b,
            AluOp::Nor => !(a | b),
            AluOp::And => a & b,
            AluOp::Xor => a ^ b,
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Slt => ((a as i32) < (b as i32)) as u32,
            AluOp::Sltu => (a < b) as u32,
            AluOp::Asl | AluOp::Lsl => a.wrapping_shl(shamt),
            AluOp::Asr => ((a as i32) >> shamt) as u32,
            AluOp::Lsr => a >> shamt,
            AluOp::Shuf => Self::shuffle(a, b),
            AluOp::Clz => a.leading_zeros(),
            AluOp::Rev => a.reverse_bits(),
            AluOp::Extb => a as u8 as i8 as i32 as u32,
            AluOp::Exth => a as u16 as i16 as i32 as u32,
            AluOp::Ldhi => b << LDHI_SHIFT,
            AluOp::Ldhio => (b << LDHI_SHIFT) | ((1 << LDHI_SHIFT) - 1),
        }
    }

    /// Byte shuffle.
    ///
    /// Each output byte `k` is selected by the three bits `ctrl[3k+2:3k]`.
    /// Selectors 0-3 copy the corresponding byte of `a`. Selectors 4-7
    /// produce a fill byte: zero, or 0xff in sign-fill mode (`ctrl` bit 12)
    /// when the previously produced byte is negative.
    ///
    /// `shuffle(a, 0x688)` is the identity; `shuffle(a, 0x1920)` sign
    /// extends the low byte.
    pub fn shuffle(a: u32, ctrl: u32) -> u32 {
        const SIGN_FILL: u32 = 1 << 12;

        let src = a.to_le_bytes();
        let sign_fill = ctrl & SIGN_FILL != 0;
        let mut out = [0u8; 4];
        for k in 0..4 {
            let sel = (ctrl >> (3 * k)) & 7;
            out[k] = if sel & 4 == 0 {
                src[(sel & 3) as usize]
            } else if sign_fill && k > 0 && out[k - 1] & 0x80 != 0 {
                0xff
            } else {
                0
            };
        }
        u32::from_le_bytes(out)
    }
}
