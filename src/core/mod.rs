//! CPU core.
//!
//! The interpreter (`Cpu`), its architectural state, the per-instruction
//! stages and the stateless functional units they call.

/// Scalar and vector register files.
pub mod arch;

/// Operation selectors for the functional units.
pub mod control;

/// The CPU core and its run loop.
pub mod cpu;

/// Fetch, decode, execute, memory access and write-back.
pub mod stages;

/// ALU, MDU, FPU, LSU, vector control and caches.
pub mod units;

pub use cpu::Cpu;
