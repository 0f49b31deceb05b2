//! MR32: the reference MRISC32 encoding.
//!
//! Fixed 32-bit instruction words with three formats (register, immediate,
//! wide immediate). See `decode` for the bit layout and `opcodes` for the
//! operation numbers.

/// Instruction word decoder.
pub mod decode;

/// Instruction word encoder.
pub mod encode;

/// Operation numbers.
pub mod opcodes;

use super::{Instruction, InstructionSet};
use crate::common::Trap;

/// The MR32 architecture variant.
#[derive(Clone, Copy, Debug, Default)]
pub struct Mr32;

impl InstructionSet for Mr32 {
    fn name(&self) -> &'static str {
        "MR32"
    }

    #[inline]
    fn decode(&self, word: u32) -> Result<Instruction, Trap> {
        decode::decode(word)
    }
}
