//! Functional units.
//!
//! Stateless helpers invoked by the execute stage. Each unit takes raw
//! 32-bit operands and produces a raw 32-bit result; none of them can fault.

/// Integer arithmetic and logic.
pub mod alu;

/// Instruction and data cache models.
pub mod cache;

/// Single-precision floating point.
pub mod fpu;

/// Address generation and load extension.
pub mod lsu;

/// Multiply and divide.
pub mod mdu;

/// Vector lane control.
pub mod vector;
