//! Per-instruction stages.
//!
//! The core is not pipelined; each stage is a function that `Cpu::step`
//! calls in order for a single instruction.

pub mod decode;
pub mod execute;
pub mod fetch;
pub mod memory_access;
pub mod write_back;
