//! Architectural state.
//!
//! The scalar register file and the vector register file. Both hold raw
//! 32-bit words; interpretation (signed, unsigned, binary32) is up to the
//! functional unit that consumes them.

/// Scalar register file.
pub mod gpr;

/// Vector register file.
pub mod vreg;
