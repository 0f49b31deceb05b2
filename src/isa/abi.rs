//! Register conventions and the simulator-routine ABI.
//!
//! # Registers
//!
//! | Index | Name | Role |
//! |-------|------|------|
//! | 0     | Z    | Always zero |
//! | 1-3   | R1-R3 | Routine arguments, R1 is the routine result |
//! | 28    | VL   | Active vector length |
//! | 29    | LR   | Link register |
//! | 30    | SP   | Stack pointer |
//! | 31    | PC   | Program counter |
//!
//! # Simulator routines
//!
//! Jumping into the reserved page at `SIM_ROUTINE_BASE` calls routine
//! `(pc - SIM_ROUTINE_BASE) / 4` on the host and then returns to LR.

pub const NUM_REGS: usize = 32;
pub const NUM_VECTOR_REGS: usize = 32;
pub const NUM_VECTOR_ENTRIES: usize = 32;

pub const REG_Z: usize = 0;
pub const REG_R1: usize = 1;
pub const REG_R2: usize = 2;
pub const REG_R3: usize = 3;
pub const REG_VL: usize = 28;
pub const REG_LR: usize = 29;
pub const REG_SP: usize = 30;
pub const REG_PC: usize = 31;

/// First address of the reserved simulator-routine page.
pub const SIM_ROUTINE_BASE: u32 = 0xffff_0000;

/// Value returned in R1 when a host operation fails.
pub const HOST_ERROR: u32 = u32::MAX;

/// Size in bytes of the stat record written by `fstat` and `stat`.
pub const GUEST_STAT_SIZE: u32 = 32;

/// Host services reachable from guest code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimRoutine {
    Exit,
    Putchar,
    Close,
    Fstat,
    Isatty,
    Link,
    Lseek,
    Mkdir,
    Open,
    Read,
    Stat,
    Unlink,
    Write,
}

impl SimRoutine {
    const ALL: [SimRoutine; 13] = [
        SimRoutine::Exit,
        SimRoutine::Putchar,
        SimRoutine::Close,
        SimRoutine::Fstat,
        SimRoutine::Isatty,
        SimRoutine::Link,
        SimRoutine::Lseek,
        SimRoutine::Mkdir,
        SimRoutine::Open,
        SimRoutine::Read,
        SimRoutine::Stat,
        SimRoutine::Unlink,
        SimRoutine::Write,
    ];

    /// Looks up a routine by number.
    pub fn from_number(no: u32) -> Option<Self> {
        Self::ALL.get(no as usize).copied()
    }

    /// Returns the routine number.
    pub fn number(self) -> u32 {
        self as u32
    }

    /// Returns the entry address of the routine.
    pub fn address(self) -> u32 {
        SIM_ROUTINE_BASE + 4 * self.number()
    }
}

/// Returns `true` if `pc` lies in the reserved routine page.
#[inline]
pub fn is_sim_routine_address(pc: u32) -> bool {
    pc & SIM_ROUTINE_BASE == SIM_ROUTINE_BASE
}

/// Guest `open` flags (newlib values).
pub mod open_flags {
    pub const ACCMODE: u32 = 0x3;
    pub const RDONLY: u32 = 0x0;
    pub const WRONLY: u32 = 0x1;
    pub const RDWR: u32 = 0x2;
    pub const APPEND: u32 = 0x0008;
    pub const CREAT: u32 = 0x0200;
    pub const TRUNC: u32 = 0x0400;
    pub const EXCL: u32 = 0x0800;
}

/// Guest `lseek` whence values.
pub mod whence {
    pub const SET: u32 = 0;
    pub const CUR: u32 = 1;
    pub const END: u32 = 2;
}
