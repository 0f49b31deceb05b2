//! MR32 opcode numbers.
//!
//! Register-form instructions (major opcode 0) select their operation with
//! the 7-bit `func` field; immediate forms use the 6-bit major opcode. Where
//! an operation exists in both forms it has the same number in both.

use crate::core::control::{AluOp, BranchCond, FpuOp, MdOp, MemOp};

/// Major opcode of the register form.
pub const MAJOR_REG: u32 = 0x00;

pub const ALU_OR: u32 = 0x01;
pub const ALU_NOR: u32 = 0x02;
pub const ALU_AND: u32 = 0x03;
pub const ALU_XOR: u32 = 0x04;
pub const ALU_ADD: u32 = 0x05;
pub const ALU_SUB: u32 = 0x06;
pub const ALU_SLT: u32 = 0x07;
pub const ALU_SLTU: u32 = 0x08;
pub const ALU_ASL: u32 = 0x09;
pub const ALU_LSL: u32 = 0x0a;
pub const ALU_ASR: u32 = 0x0b;
pub const ALU_LSR: u32 = 0x0c;
pub const ALU_SHUF: u32 = 0x0d;
pub const VEC_PERM: u32 = 0x0e;
pub const ALU_CLZ: u32 = 0x50;
pub const ALU_REV: u32 = 0x51;
pub const ALU_EXTB: u32 = 0x52;
pub const ALU_EXTH: u32 = 0x53;

pub const MEM_LOAD8: u32 = 0x10;
pub const MEM_LOADU8: u32 = 0x11;
pub const MEM_LOAD16: u32 = 0x12;
pub const MEM_LOADU16: u32 = 0x13;
pub const MEM_LOAD32: u32 = 0x14;
pub const MEM_STORE8: u32 = 0x18;
pub const MEM_STORE16: u32 = 0x19;
pub const MEM_STORE32: u32 = 0x1a;
pub const MEM_LDEA: u32 = 0x1c;

pub const BR_BZ: u32 = 0x20;
pub const BR_BNZ: u32 = 0x21;
pub const BR_BS: u32 = 0x22;
pub const BR_BNS: u32 = 0x23;
pub const BR_BLT: u32 = 0x24;
pub const BR_BGE: u32 = 0x25;
pub const BR_BLE: u32 = 0x26;
pub const BR_BGT: u32 = 0x27;
pub const J: u32 = 0x28;
pub const JL: u32 = 0x29;
pub const LDI: u32 = 0x2a;
pub const LDHI: u32 = 0x2b;
pub const LDHIO: u32 = 0x2c;

pub const MD_MUL: u32 = 0x30;
pub const MD_MULHI: u32 = 0x32;
pub const MD_MULHIU: u32 = 0x33;
pub const MD_DIV: u32 = 0x34;
pub const MD_DIVU: u32 = 0x35;
pub const MD_REM: u32 = 0x36;
pub const MD_REMU: u32 = 0x37;

pub const FPU_ITOF: u32 = 0x38;
pub const FPU_FTOI: u32 = 0x39;
pub const FPU_ADD: u32 = 0x3a;
pub const FPU_SUB: u32 = 0x3b;
pub const FPU_MUL: u32 = 0x3c;
pub const FPU_DIV: u32 = 0x3d;

/// Binary ALU operations available in both register and immediate form.
pub const ALU_BINARY: [(u32, AluOp); 13] = [
    (ALU_OR, AluOp::Or),
    (ALU_NOR, AluOp::Nor),
    (ALU_AND, AluOp::And),
    (ALU_XOR, AluOp::Xor),
    (ALU_ADD, AluOp::Add),
    (ALU_SUB, AluOp::Sub),
    (ALU_SLT, AluOp::Slt),
    (ALU_SLTU, AluOp::Sltu),
    (ALU_ASL, AluOp::Asl),
    (ALU_LSL, AluOp::Lsl),
    (ALU_ASR, AluOp::Asr),
    (ALU_LSR, AluOp::Lsr),
    (ALU_SHUF, AluOp::Shuf),
];

/// Unary ALU operations (register form only, `rb` ignored).
pub const ALU_UNARY: [(u32, AluOp); 4] = [
    (ALU_CLZ, AluOp::Clz),
    (ALU_REV, AluOp::Rev),
    (ALU_EXTB, AluOp::Extb),
    (ALU_EXTH, AluOp::Exth),
];

pub const MEM_OPS: [(u32, MemOp); 9] = [
    (MEM_LOAD8, MemOp::Load8),
    (MEM_LOADU8, MemOp::LoadU8),
    (MEM_LOAD16, MemOp::Load16),
    (MEM_LOADU16, MemOp::LoadU16),
    (MEM_LOAD32, MemOp::Load32),
    (MEM_STORE8, MemOp::Store8),
    (MEM_STORE16, MemOp::Store16),
    (MEM_STORE32, MemOp::Store32),
    (MEM_LDEA, MemOp::Ldea),
];

pub const MD_OPS: [(u32, MdOp); 7] = [
    (MD_MUL, MdOp::Mul),
    (MD_MULHI, MdOp::Mulhi),
    (MD_MULHIU, MdOp::Mulhiu),
    (MD_DIV, MdOp::Div),
    (MD_DIVU, MdOp::Divu),
    (MD_REM, MdOp::Rem),
    (MD_REMU, MdOp::Remu),
];

pub const FPU_OPS: [(u32, FpuOp); 6] = [
    (FPU_ITOF, FpuOp::Itof),
    (FPU_FTOI, FpuOp::Ftoi),
    (FPU_ADD, FpuOp::Add),
    (FPU_SUB, FpuOp::Sub),
    (FPU_MUL, FpuOp::Mul),
    (FPU_DIV, FpuOp::Div),
];

pub const BRANCHES: [(u32, BranchCond); 8] = [
    (BR_BZ, BranchCond::Z),
    (BR_BNZ, BranchCond::Nz),
    (BR_BS, BranchCond::S),
    (BR_BNS, BranchCond::Ns),
    (BR_BLT, BranchCond::Lt),
    (BR_BGE, BranchCond::Ge),
    (BR_BLE, BranchCond::Le),
    (BR_BGT, BranchCond::Gt),
];

/// Finds the operation for `code` in a table.
#[inline]
pub fn lookup<T: Copy>(table: &[(u32, T)], code: u32) -> Option<T> {
    table.iter().find(|(c, _)| *c == code).map(|(_, op)| *op)
}

/// Register-form code of an ALU operation. `Ldhi`/`Ldhio` only exist in
/// the wide form and have none.
pub fn alu_code(op: AluOp) -> Option<u32> {
    let code = match op {
        AluOp::Or => ALU_OR,
        AluOp::Nor => ALU_NOR,
        AluOp::And => ALU_AND,
        AluOp::Xor => ALU_XOR,
        AluOp::Add => ALU_ADD,
        AluOp::Sub => ALU_SUB,
        AluOp::Slt => ALU_SLT,
        AluOp::Sltu => ALU_SLTU,
        AluOp::Asl => ALU_ASL,
        AluOp::Lsl => ALU_LSL,
        AluOp::Asr => ALU_ASR,
        AluOp::Lsr => ALU_LSR,
        AluOp::Shuf => ALU_SHUF,
        AluOp::Clz => ALU_CLZ,
        AluOp::Rev => ALU_REV,
        AluOp::Extb => ALU_EXTB,
        AluOp::Exth => ALU_EXTH,
        AluOp::Ldhi | AluOp::Ldhio => return None,
    };
    Some(code)
}

pub fn md_code(op: MdOp) -> u32 {
    match op {
        MdOp::Mul => MD_MUL,
        MdOp::Mulhi => MD_MULHI,
        MdOp::Mulhiu => MD_MULHIU,
        MdOp::Div => MD_DIV,
        MdOp::Divu => MD_DIVU,
        MdOp::Rem => MD_REM,
        MdOp::Remu => MD_REMU,
    }
}

pub fn fpu_code(op: FpuOp) -> u32 {
    match op {
        FpuOp::Itof => FPU_ITOF,
        FpuOp::Ftoi => FPU_FTOI,
        FpuOp::Add => FPU_ADD,
        FpuOp::Sub => FPU_SUB,
        FpuOp::Mul => FPU_MUL,
        FpuOp::Div => FPU_DIV,
    }
}

pub fn mem_code(op: MemOp) -> u32 {
    match op {
        MemOp::Load8 => MEM_LOAD8,
        MemOp::LoadU8 => MEM_LOADU8,
        MemOp::Load16 => MEM_LOAD16,
        MemOp::LoadU16 => MEM_LOADU16,
        MemOp::Load32 => MEM_LOAD32,
        MemOp::Store8 => MEM_STORE8,
        MemOp::Store16 => MEM_STORE16,
        MemOp::Store32 => MEM_STORE32,
        MemOp::Ldea => MEM_LDEA,
    }
}

pub fn branch_code(cond: BranchCond) -> u32 {
    match cond {
        BranchCond::Z => BR_BZ,
        BranchCond::Nz => BR_BNZ,
        BranchCond::S => BR_BS,
        BranchCond::Ns => BR_BNS,
        BranchCond::Lt => BR_BLT,
        BranchCond::Ge => BR_BGE,
        BranchCond::Le => BR_BLE,
        BranchCond::Gt => BR_BGT,
    }
}
