//! Traps and Reserved Exit Codes.
//!
//! Every fatal condition the core can detect is a `Trap`. A trap ends the
//! current `run()` immediately; there is no unwinding through the interpreter
//! loop. Each trap maps to a reserved exit code in the `0xffff_ff00` page so a
//! caller that only sees a flat exit code can still tell a simulator failure
//! from a guest-requested exit.

use thiserror::Error;

use super::data::AccessType;

/// Base of the reserved exit-code range used for simulator-level failures.
pub const RESERVED_EXIT_BASE: u32 = 0xffff_ff00;

/// Fatal conditions raised while executing a guest program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// The instruction word does not decode to any known operation.
    #[error("illegal instruction {0:#010x}")]
    IllegalInstruction(u32),

    /// The program counter is not word aligned.
    #[error("misaligned instruction fetch at {0:#010x}")]
    InstructionAddressMisaligned(u32),

    /// Instruction fetch outside of memory.
    #[error("instruction access fault at {0:#010x}")]
    InstructionAccessFault(u32),

    /// Data load outside of memory.
    #[error("load access fault at {0:#010x}")]
    LoadAccessFault(u32),

    /// Data store outside of memory.
    #[error("store access fault at {0:#010x}")]
    StoreAccessFault(u32),

    /// The guest called a simulator routine that does not exist.
    #[error("unknown simulator routine {0}")]
    UnknownSimRoutine(u32),

    /// The host raised the external abort signal.
    #[error("run aborted by host")]
    Aborted,
}

impl Trap {
    /// Builds the access fault matching an access type.
    pub fn access_fault(access: AccessType, addr: u32) -> Self {
        match access {
            AccessType::Fetch => Trap::InstructionAccessFault(addr),
            AccessType::Read => Trap::LoadAccessFault(addr),
            AccessType::Write => Trap::StoreAccessFault(addr),
        }
    }

    /// Returns the reserved exit code reported for this trap.
    pub fn exit_code(&self) -> u32 {
        let kind = match self {
            Trap::IllegalInstruction(_) => 1,
            Trap::InstructionAddressMisaligned(_) => 2,
            Trap::InstructionAccessFault(_) => 3,
            Trap::LoadAccessFault(_) => 4,
            Trap::StoreAccessFault(_) => 5,
            Trap::UnknownSimRoutine(_) => 6,
            Trap::Aborted => 7,
        };
        RESERVED_EXIT_BASE | kind
    }

    /// Returns `true` if `code` lies in the reserved simulator-failure range.
    pub fn is_reserved_exit_code(code: u32) -> bool {
        (RESERVED_EXIT_BASE + 1..=RESERVED_EXIT_BASE + 7).contains(&code)
    }
}
