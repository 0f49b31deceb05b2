//! Instruction Set Architecture definitions.
//!
//! The core executes `Instruction`s; turning a 32-bit word into one is the
//! job of an architecture variant implementing `InstructionSet`. Variants
//! differ only in encoding. Register state, statistics, caches and the
//! semantics of every operation are shared by all of them.

/// Register names and the simulator-routine ABI.
pub mod abi;

/// Decoded instruction representation.
pub mod instruction;

/// The MRISC32 reference encoding.
pub mod mr32;

pub use instruction::{Instruction, Operand, Operation, VectorMode};
pub use mr32::Mr32;

use crate::common::Trap;

/// Decode table of one architecture variant.
pub trait InstructionSet {
    /// Human-readable variant name.
    fn name(&self) -> &'static str;

    /// Decodes one instruction word.
    ///
    /// # Errors
    ///
    /// `Trap::IllegalInstruction` if the word matches no operation.
    fn decode(&self, word: u32) -> Result<Instruction, Trap>;
}
