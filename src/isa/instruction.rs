//! Decoded Instruction.
//!
//! An `Instruction` is an operation plus its operand set, independent of the
//! bit layout it was decoded from.

use crate::core::control::{AluOp, BranchCond, FpuOp, MdOp, MemOp};

/// How register operands are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VectorMode {
    /// All operands are scalar registers.
    #[default]
    Scalar,
    /// `rd` and `ra` name vector registers; the second operand is a scalar
    /// register or an immediate applied to every lane.
    VectorScalar,
    /// `rd`, `ra` and the second operand all name vector registers.
    VectorVector,
}

impl VectorMode {
    /// Returns `true` for either vector form.
    pub fn is_vector(self) -> bool {
        !matches!(self, VectorMode::Scalar)
    }
}

/// Second source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    /// Register index (scalar or vector depending on the mode).
    Reg(usize),
    /// Immediate value, already extended to 32 bits.
    Imm(u32),
}

/// The functional-unit operation of an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Alu(AluOp),
    MulDiv(MdOp),
    Fpu(FpuOp),
    Mem(MemOp),
    /// Lane permutation (vector forms only).
    Permute,
    /// Conditional branch on register `rd`; the operand is a byte offset
    /// from the branch instruction.
    Branch(BranchCond),
    /// Jump to `rd + operand`; `link` stores the return address in LR.
    Jump { link: bool },
}

/// A decoded instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub op: Operation,
    /// Destination register, store source, branch condition register or
    /// jump base, depending on the operation.
    pub rd: usize,
    /// First source register.
    pub ra: usize,
    /// Second source operand.
    pub b: Operand,
    pub mode: VectorMode,
}
