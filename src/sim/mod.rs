//! Simulation harness support.
//!
//! Program loading and the host services behind the simulator routines.

/// Host file table and I/O for simulator routines.
pub mod host;

/// Binary image loading.
pub mod loader;
