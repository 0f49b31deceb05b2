//! MRISC Simulator Library.
//!
//! This crate implements an instruction-level simulator for a 32-bit
//! MRISC32-style RISC architecture with a vector unit. Programs run on a
//! `Cpu` against any `Memory` implementation and talk to the host through a
//! small set of simulator routines.
//!
//! # Architecture
//!
//! * **Core**: one instruction per step, 32 scalar and 32 vector registers.
//! * **Memory**: flat little-endian RAM, shareable between cores, with
//!   instruction and data cache models used for cycle accounting.
//! * **Host**: file and console I/O via routines at `0xffff_0000`.
//!
//! # Modules
//!
//! * `common`: Shared types and the `Trap` error.
//! * `config`: Configuration loading and validation.
//! * `core`: CPU core implementation.
//! * `isa`: Instruction set definitions and the MR32 encoding.
//! * `sim`: Program loading and host services.
//! * `soc`: Memory and memory timing.
//! * `stats`: Performance statistics.

/// Shared types and error handling.
pub mod common;

/// Configuration system for memory, cache and tracing settings.
///
/// Loads and validates TOML configuration files.
pub mod config;

/// CPU core implementation including stages and execution units.
pub mod core;

/// Instruction Set Architecture definitions, decoders and encoders.
pub mod isa;

/// Program loading and the host side of the simulator routines.
pub mod sim;

/// Memory and memory-timing components.
pub mod soc;

/// Performance statistics collection and reporting.
pub mod stats;

pub use crate::common::Trap;
pub use crate::config::Config;
pub use crate::core::Cpu;
pub use crate::soc::memory::{Memory, Ram};
