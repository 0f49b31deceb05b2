//! Memory Access Types.
//!
//! This module defines the classification of memory accesses used throughout
//! the simulator. The classification selects which cache is consulted for
//! timing and which trap is raised when an access falls outside memory.

/// Type of memory access operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessType {
    /// Instruction fetch access.
    ///
    /// Accounted against the instruction cache.
    Fetch,

    /// Data read access.
    ///
    /// Used when loading data from memory into registers.
    Read,

    /// Data write access.
    ///
    /// Used when storing data from registers to memory.
    Write,
}

impl AccessType {
    /// Returns `true` for data writes.
    pub fn is_write(self) -> bool {
        matches!(self, AccessType::Write)
    }
}
