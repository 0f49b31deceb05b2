//! MR32 instruction encoder.
//!
//! Builds machine words from operations and operands. Immediates are
//! truncated to their field width; callers are expected to pass values that
//! fit (15 bits signed for the immediate form, 21 bits for the wide form).

use super::opcodes::*;
use crate::core::control::{AluOp, BranchCond, FpuOp, MdOp, MemOp};
use crate::isa::abi::{SimRoutine, REG_Z};
use crate::isa::VectorMode;

#[inline]
fn fields(major: u32, rd: usize, ra: usize) -> u32 {
    (major << 26) | ((rd as u32 & 0x1f) << 21) | ((ra as u32 & 0x1f) << 16)
}

/// Register form: `func rd, ra, rb`.
pub fn reg(func: u32, rd: usize, ra: usize, rb: usize, mode: VectorMode) -> u32 {
    let vm = match mode {
        VectorMode::Scalar => 0,
        VectorMode::VectorScalar => 1,
        VectorMode::VectorVector => 2,
    };
    fields(MAJOR_REG, rd, ra) | (vm << 14) | ((rb as u32 & 0x1f) << 9) | (func & 0x7f)
}

/// Immediate form: `major rd, ra, imm15`.
pub fn imm(major: u32, rd: usize, ra: usize, imm: i32, vector: bool) -> u32 {
    fields(major, rd, ra) | ((vector as u32) << 15) | (imm as u32 & 0x7fff)
}

/// Wide-immediate form: `major rd, imm21`.
pub fn wide(major: u32, rd: usize, imm: i32) -> u32 {
    fields(major, rd, 0) | (imm as u32 & 0x1f_ffff)
}

/// Scalar or vector ALU operation on registers.
///
/// `Ldhi` and `Ldhio` have no register form and encode as `ldhi`/`ldhio`
/// of `rb` instead, which is rarely what a caller wants; use those helpers.
pub fn alu(op: AluOp, rd: usize, ra: usize, rb: usize, mode: VectorMode) -> u32 {
    match alu_code(op) {
        Some(code) => reg(code, rd, ra, rb, mode),
        None => wide_alu(op, rd, rb as u32),
    }
}

/// ALU operation with an immediate second operand.
pub fn alu_imm(op: AluOp, rd: usize, ra: usize, value: i32) -> u32 {
    match alu_code(op) {
        Some(code) => imm(code, rd, ra, value, false),
        None => wide_alu(op, rd, value as u32),
    }
}

/// Vector ALU operation with an immediate applied to every lane.
pub fn valu_imm(op: AluOp, vd: usize, va: usize, value: i32) -> u32 {
    match alu_code(op) {
        Some(code) => imm(code, vd, va, value, true),
        None => wide_alu(op, vd, value as u32),
    }
}

fn wide_alu(op: AluOp, rd: usize, value: u32) -> u32 {
    if op == AluOp::Ldhio {
        ldhio(rd, value)
    } else {
        ldhi(rd, value)
    }
}

pub fn muldiv(op: MdOp, rd: usize, ra: usize, rb: usize, mode: VectorMode) -> u32 {
    reg(md_code(op), rd, ra, rb, mode)
}

pub fn muldiv_imm(op: MdOp, rd: usize, ra: usize, value: i32) -> u32 {
    imm(md_code(op), rd, ra, value, false)
}

pub fn fpu(op: FpuOp, rd: usize, ra: usize, rb: usize, mode: VectorMode) -> u32 {
    reg(fpu_code(op), rd, ra, rb, mode)
}

/// Load/store with a register index (or stride/offset vector in vector modes).
pub fn mem(op: MemOp, rd: usize, ra: usize, rb: usize, mode: VectorMode) -> u32 {
    reg(mem_code(op), rd, ra, rb, mode)
}

/// Scalar load/store with an immediate offset.
pub fn mem_imm(op: MemOp, rd: usize, ra: usize, offset: i32) -> u32 {
    imm(mem_code(op), rd, ra, offset, false)
}

/// Strided vector load/store with an immediate stride.
pub fn vmem_imm(op: MemOp, vd: usize, ra: usize, stride: i32) -> u32 {
    imm(mem_code(op), vd, ra, stride, true)
}

/// Lane permutation.
pub fn perm(vd: usize, va: usize, b: usize, mode: VectorMode) -> u32 {
    reg(VEC_PERM, vd, va, b, mode)
}

/// Conditional branch on `rs`, `offset` counted in instructions.
pub fn branch(cond: BranchCond, rs: usize, offset: i32) -> u32 {
    wide(branch_code(cond), rs, offset)
}

/// Jump to `base + 4 * offset`.
pub fn j(base: usize, offset: i32) -> u32 {
    wide(J, base, offset)
}

/// Jump and link to `base + 4 * offset`.
pub fn jl(base: usize, offset: i32) -> u32 {
    wide(JL, base, offset)
}

/// Load a sign-extended 21-bit immediate.
pub fn ldi(rd: usize, value: i32) -> u32 {
    wide(LDI, rd, value)
}

/// Load `value << 13`.
pub fn ldhi(rd: usize, value: u32) -> u32 {
    wide(LDHI, rd, value as i32)
}

/// Load `(value << 13) | 0x1fff`.
pub fn ldhio(rd: usize, value: u32) -> u32 {
    wide(LDHIO, rd, value as i32)
}

/// Call a simulator routine: `JL Z, routine`.
pub fn sim_call(routine: SimRoutine) -> u32 {
    jl(REG_Z, routine.address() as i32 / 4)
}

/// Converts instruction words to a little-endian binary image.
pub fn assemble(program: &[u32]) -> Vec<u8> {
    program.iter().flat_map(|w| w.to_le_bytes()).collect()
}
