//! Scalar Register File.
//!
//! Thirty-two 32-bit registers. Register Z (index 0) is hardwired to zero;
//! register PC (index 31) is readable like any other register but is
//! maintained by the CPU core, which writes the address of the next
//! instruction into it after each step.

use std::io::{self, Write};

use crate::isa::abi::NUM_REGS;

/// Scalar register file.
///
/// Writes to Z are ignored. The file does not special-case PC; the core
/// routes writes to index 31 into the next-PC latch instead.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; NUM_REGS],
}

impl Gpr {
    /// Creates a register file with all registers cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31)
    ///
    /// # Returns
    ///
    /// The stored value, or 0 for register Z.
    #[inline]
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 {
            0
        } else {
            self.regs[idx]
        }
    }

    /// Writes a register. Writes to Z are silently dropped.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Clears every register.
    pub fn reset(&mut self) {
        self.regs = [0; NUM_REGS];
    }

    /// Formats registers `first..first + 4` as one dump line.
    fn dump_line(&self, first: usize) -> String {
        (first..first + 4)
            .map(|i| format!("r{:<2}={:#010x}", i, self.read(i)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Dumps all registers to the debug log, four per line.
    pub fn dump(&self) {
        for i in (0..NUM_REGS).step_by(4) {
            log::debug!("{}", self.dump_line(i));
        }
    }

    /// Writes all registers to `w`, four per line.
    pub fn write_dump<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        for i in (0..NUM_REGS).step_by(4) {
            writeln!(w, "{}", self.dump_line(i))?;
        }
        Ok(())
    }
}
