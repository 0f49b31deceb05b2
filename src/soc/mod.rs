//! System components around the CPU core.
//!
//! The core only talks to its surroundings through the `Memory` trait; the
//! memory timing controllers price cache misses for the cycle counter.

/// Main memory and memory timing controllers.
pub mod memory;

pub use memory::{Memory, MemoryError, Ram};
