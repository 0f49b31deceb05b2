//! Floating-Point Unit (FPU).
//!
//! This module implements the binary32 arithmetic unit used in the execute
//! stage: add, subtract, multiply, divide and conversions between signed
//! integers and floats. There is no double precision.

use crate::core::control::FpuOp;

/// Canonical quiet NaN produced by every operation that yields a NaN.
pub const CANONICAL_NAN: u32 = 0x7fc0_0000;

/// Floating-Point Unit (FPU) for single-precision operations.
pub struct Fpu;

impl Fpu {
    /// Executes a floating-point operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The floating-point operation to perform
    /// * `a` - First operand (binary32 bits, or a signed integer for `Itof`)
    /// * `b` - Second operand (binary32 bits, ignored by conversions)
    ///
    /// # Returns
    ///
    /// The result bits. Float results have NaNs canonicalised; `Ftoi`
    /// returns a signed integer.
    pub fn execute(op: FpuOp, a: u32, b: u32) -> u32 {
        let fa = f32::from_bits(a);
        let fb = f32::from_bits(b);
        match op {
            FpuOp::Itof => Self::canonicalize(a as i32 as f32),
            FpuOp::Ftoi => Self::to_int(fa) as u32,
            FpuOp::Add => Self::canonicalize(fa + fb),
            FpuOp::Sub => Self::canonicalize(fa - fb),
            FpuOp::Mul => Self::canonicalize(fa * fb),
            FpuOp::Div => Self::canonicalize(fa / fb),
        }
    }

    /// Converts a result to bits, replacing any NaN with [`CANONICAL_NAN`].
    #[inline]
    pub fn canonicalize(f: f32) -> u32 {
        if f.is_nan() {
            CANONICAL_NAN
        } else {
            f.to_bits()
        }
    }

    /// Round to nearest (ties to even), saturating at the `i32` range.
    /// NaN converts to zero.
    fn to_int(f: f32) -> i32 {
        // `as` saturates and maps NaN to 0.
        f.round_ties_even() as i32
    }
}
