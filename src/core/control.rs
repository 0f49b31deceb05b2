//! Operation selectors for the functional units.
//!
//! Each functional unit has its own closed enumeration so that dispatch is
//! checked for exhaustiveness. Numeric encodings are not defined here; they
//! belong to the architecture variant's opcode table.

/// ALU operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    /// Bitwise OR.
    Or,
    /// Bitwise NOR.
    Nor,
    /// Bitwise AND.
    And,
    /// Bitwise XOR.
    Xor,
    /// Two's-complement addition.
    Add,
    /// Two's-complement subtraction (`a - b`).
    Sub,
    /// Set if less than, signed (0 or 1).
    Slt,
    /// Set if less than, unsigned (0 or 1).
    Sltu,
    /// Arithmetic shift left (same as `Lsl`).
    Asl,
    /// Logical shift left.
    Lsl,
    /// Arithmetic shift right.
    Asr,
    /// Logical shift right.
    Lsr,
    /// Byte shuffle.
    Shuf,
    /// Count leading zeros.
    Clz,
    /// Bit reverse.
    Rev,
    /// Sign-extend from byte.
    Extb,
    /// Sign-extend from half-word.
    Exth,
    /// Load high: `b << 13`.
    Ldhi,
    /// Load high with ones: `(b << 13) | 0x1fff`.
    Ldhio,
}

/// Multiply/divide unit operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MdOp {
    Mul,
    Mulhi,
    Mulhiu,
    Div,
    Divu,
    Rem,
    Remu,
}

/// Floating-point unit operations (binary32 only).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FpuOp {
    Itof,
    Ftoi,
    Add,
    Sub,
    Mul,
    Div,
}

/// Memory access width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemWidth {
    Byte,
    Half,
    Word,
}

impl MemWidth {
    /// Returns the width in bytes.
    pub fn bytes(self) -> u32 {
        match self {
            MemWidth::Byte => 1,
            MemWidth::Half => 2,
            MemWidth::Word => 4,
        }
    }
}

/// Load/store unit operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MemOp {
    Load8,
    LoadU8,
    Load16,
    LoadU16,
    Load32,
    Store8,
    Store16,
    Store32,
    /// Load effective address; computes the address without touching memory.
    Ldea,
}

impl MemOp {
    /// Returns `true` for operations that read memory.
    pub fn is_load(self) -> bool {
        matches!(
            self,
            MemOp::Load8 | MemOp::LoadU8 | MemOp::Load16 | MemOp::LoadU16 | MemOp::Load32
        )
    }

    /// Returns `true` for operations that write memory.
    pub fn is_store(self) -> bool {
        matches!(self, MemOp::Store8 | MemOp::Store16 | MemOp::Store32)
    }

    /// Returns the access width, or `None` for `Ldea`.
    pub fn width(self) -> Option<MemWidth> {
        match self {
            MemOp::Load8 | MemOp::LoadU8 | MemOp::Store8 => Some(MemWidth::Byte),
            MemOp::Load16 | MemOp::LoadU16 | MemOp::Store16 => Some(MemWidth::Half),
            MemOp::Load32 | MemOp::Store32 => Some(MemWidth::Word),
            MemOp::Ldea => None,
        }
    }
}

/// Conditional branch predicates on a single register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BranchCond {
    /// Equal to zero.
    Z,
    /// Not zero.
    Nz,
    /// All bits set.
    S,
    /// Not all bits set.
    Ns,
    /// Negative.
    Lt,
    /// Zero or positive.
    Ge,
    /// Negative or zero.
    Le,
    /// Positive.
    Gt,
}

impl BranchCond {
    /// Evaluates the predicate on a register value.
    pub fn taken(self, val: u32) -> bool {
        let s = val as i32;
        match self {
            BranchCond::Z => val == 0,
            BranchCond::Nz => val != 0,
            BranchCond::S => val == u32::MAX,
            BranchCond::Ns => val != u32::MAX,
            BranchCond::Lt => s < 0,
            BranchCond::Ge => s >= 0,
            BranchCond::Le => s <= 0,
            BranchCond::Gt => s > 0,
        }
    }
}
