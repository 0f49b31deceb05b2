//! Common types shared throughout the MRISC32 simulator.
//!
//! This module provides the memory access classification and the fault
//! (trap) taxonomy used by the core, the memory interface and the
//! simulator-routine bridge.

/// Memory access type definitions.
pub mod data;

/// Trap definitions and reserved exit codes.
pub mod error;

pub use data::AccessType;
pub use error::Trap;
