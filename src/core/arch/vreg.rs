//! Vector Register File.
//!
//! Thirty-two vector registers of thirty-two 32-bit lanes each. Unlike the
//! scalar file there is no hardwired-zero register: V0 is ordinary storage.

use crate::isa::abi::{NUM_VECTOR_ENTRIES, NUM_VECTOR_REGS};

/// One vector register.
pub type VectorReg = [u32; NUM_VECTOR_ENTRIES];

/// Vector register file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VectorRegs {
    regs: Box<[VectorReg; NUM_VECTOR_REGS]>,
}

impl Default for VectorRegs {
    fn default() -> Self {
        Self {
            regs: Box::new([[0; NUM_VECTOR_ENTRIES]; NUM_VECTOR_REGS]),
        }
    }
}

impl VectorRegs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads lane `lane` of register `idx`.
    #[inline]
    pub fn read_lane(&self, idx: usize, lane: usize) -> u32 {
        self.regs[idx][lane]
    }

    /// Writes lane `lane` of register `idx`.
    #[inline]
    pub fn write_lane(&mut self, idx: usize, lane: usize, val: u32) {
        self.regs[idx][lane] = val;
    }

    /// Returns a copy of a whole register.
    ///
    /// Vector instructions read their sources through a snapshot taken
    /// before the first lane is written, so `vd == va` behaves as if all
    /// lanes were computed in parallel.
    #[inline]
    pub fn snapshot(&self, idx: usize) -> VectorReg {
        self.regs[idx]
    }

    /// Borrows a whole register.
    pub fn reg(&self, idx: usize) -> &VectorReg {
        &self.regs[idx]
    }

    /// Clears every lane of every register.
    pub fn reset(&mut self) {
        for reg in self.regs.iter_mut() {
            *reg = [0; NUM_VECTOR_ENTRIES];
        }
    }
}
