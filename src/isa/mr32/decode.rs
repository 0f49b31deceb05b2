//! MR32 instruction decoder.
//!
//! # Formats
//!
//! ```text
//!  31    26 25  21 20  16 15 14 13   9 8  7 6      0
//! +--------+------+------+-----+------+----+--------+
//! | 000000 |  rd  |  ra  | vm  |  rb  | -- |  func  |  A: register
//! +--------+------+------+-----+------+----+--------+
//! | major  |  rd  |  ra  | v |        imm15          |  C: immediate
//! +--------+------+------+---+-----------------------+
//! | major  |  rd  |             imm21                 |  D: wide immediate
//! +--------+------+-----------------------------------+
//! ```
//!
//! `vm`: 0 scalar, 1 vector/scalar, 2 vector/vector, 3 reserved.
//! `v`: the immediate form applied lane-wise to vector registers.

use super::opcodes::*;
use crate::common::Trap;
use crate::core::control::AluOp;
use crate::isa::{Instruction, Operand, Operation, VectorMode};

/// Bit-field accessors for MR32 instruction words.
pub trait InstructionBits {
    fn major(&self) -> u32;
    fn rd(&self) -> usize;
    fn ra(&self) -> usize;
    fn rb(&self) -> usize;
    fn func(&self) -> u32;
    fn vmode(&self) -> u32;
    fn vector_flag(&self) -> bool;
    fn imm15(&self) -> u32;
    fn imm21(&self) -> u32;
    fn uimm21(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline]
    fn major(&self) -> u32 {
        self >> 26
    }

    #[inline]
    fn rd(&self) -> usize {
        ((self >> 21) & 0x1f) as usize
    }

    #[inline]
    fn ra(&self) -> usize {
        ((self >> 16) & 0x1f) as usize
    }

    #[inline]
    fn rb(&self) -> usize {
        ((self >> 9) & 0x1f) as usize
    }

    #[inline]
    fn func(&self) -> u32 {
        self & 0x7f
    }

    #[inline]
    fn vmode(&self) -> u32 {
        (self >> 14) & 0x3
    }

    #[inline]
    fn vector_flag(&self) -> bool {
        (self >> 15) & 1 != 0
    }

    /// Sign-extended 15-bit immediate.
    #[inline]
    fn imm15(&self) -> u32 {
        (((self << 17) as i32) >> 17) as u32
    }

    /// Sign-extended 21-bit immediate.
    #[inline]
    fn imm21(&self) -> u32 {
        (((self << 11) as i32) >> 11) as u32
    }

    /// Zero-extended 21-bit immediate.
    #[inline]
    fn uimm21(&self) -> u32 {
        self & 0x1f_ffff
    }
}

/// Decodes one MR32 instruction word.
pub fn decode(word: u32) -> Result<Instruction, Trap> {
    match word.major() {
        MAJOR_REG => decode_reg(word),
        major @ 0x20..=0x2f => decode_wide(word, major),
        major => decode_imm(word, major),
    }
}

fn decode_reg(word: u32) -> Result<Instruction, Trap> {
    let illegal = Trap::IllegalInstruction(word);
    let mode = match word.vmode() {
        0 => VectorMode::Scalar,
        1 => VectorMode::VectorScalar,
        2 => VectorMode::VectorVector,
        _ => return Err(illegal),
    };
    let func = word.func();

    let op = if let Some(op) = lookup(&ALU_BINARY, func) {
        Operation::Alu(op)
    } else if let Some(op) = lookup(&ALU_UNARY, func) {
        Operation::Alu(op)
    } else if let Some(op) = lookup(&MEM_OPS, func) {
        Operation::Mem(op)
    } else if let Some(op) = lookup(&MD_OPS, func) {
        Operation::MulDiv(op)
    } else if let Some(op) = lookup(&FPU_OPS, func) {
        Operation::Fpu(op)
    } else if func == VEC_PERM && mode.is_vector() {
        Operation::Permute
    } else {
        return Err(illegal);
    };

    Ok(Instruction {
        op,
        rd: word.rd(),
        ra: word.ra(),
        b: Operand::Reg(word.rb()),
        mode,
    })
}

fn decode_imm(word: u32, major: u32) -> Result<Instruction, Trap> {
    let op = if let Some(op) = lookup(&ALU_BINARY, major) {
        Operation::Alu(op)
    } else if let Some(op) = lookup(&MEM_OPS, major) {
        Operation::Mem(op)
    } else if let Some(op) = lookup(&MD_OPS, major) {
        Operation::MulDiv(op)
    } else {
        return Err(Trap::IllegalInstruction(word));
    };

    let mode = if word.vector_flag() {
        VectorMode::VectorScalar
    } else {
        VectorMode::Scalar
    };

    Ok(Instruction {
        op,
        rd: word.rd(),
        ra: word.ra(),
        b: Operand::Imm(word.imm15()),
        mode,
    })
}

fn decode_wide(word: u32, major: u32) -> Result<Instruction, Trap> {
    let rd = word.rd();
    let scalar = |op, ra, imm| Instruction {
        op,
        rd,
        ra,
        b: Operand::Imm(imm),
        mode: VectorMode::Scalar,
    };

    if let Some(cond) = lookup(&BRANCHES, major) {
        return Ok(scalar(
            Operation::Branch(cond),
            0,
            word.imm21().wrapping_mul(4),
        ));
    }

    let inst = match major {
        J => scalar(Operation::Jump { link: false }, 0, word.imm21().wrapping_mul(4)),
        JL => scalar(Operation::Jump { link: true }, 0, word.imm21().wrapping_mul(4)),
        LDI => scalar(Operation::Alu(AluOp::Or), 0, word.imm21()),
        LDHI => scalar(Operation::Alu(AluOp::Ldhi), 0, word.uimm21()),
        LDHIO => scalar(Operation::Alu(AluOp::Ldhio), 0, word.uimm21()),
        _ => return Err(Trap::IllegalInstruction(word)),
    };
    Ok(inst)
}
