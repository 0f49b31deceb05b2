//! Memory Timing Controller.
//!
//! This module defines the `MemoryController` trait and implementations for
//! pricing the memory access behind a cache miss. It supports a simple
//! fixed-latency model and a DRAM model that accounts for row buffer
//! locality.

use crate::config::{MemoryConfig, MemoryController as ControllerKind};

/// Trait for memory controller implementations.
pub trait MemoryController: Send {
    /// Calculates the latency for a memory access at a specific address.
    ///
    /// # Arguments
    ///
    /// * `addr` - The address being accessed.
    ///
    /// # Returns
    ///
    /// The latency in CPU cycles.
    fn access_latency(&mut self, addr: u32) -> u64;

    /// Forgets any open-row or similar history.
    fn reset(&mut self) {}
}

/// Builds the controller selected by the memory configuration.
pub fn from_config(config: &MemoryConfig) -> Box<dyn MemoryController> {
    match config.controller {
        ControllerKind::Dram => Box::new(DramController::new(
            config.t_cas,
            config.t_ras,
            config.t_pre,
        )),
        ControllerKind::Simple => Box::new(SimpleController::new(config.row_miss_latency)),
    }
}

/// A simple memory controller with fixed latency.
pub struct SimpleController {
    /// Fixed latency per access.
    latency: u64,
}

impl SimpleController {
    /// Creates a new SimpleController.
    ///
    /// # Arguments
    ///
    /// * `latency` - The fixed latency in cycles.
    pub fn new(latency: u64) -> Self {
        Self { latency }
    }
}

impl MemoryController for SimpleController {
    fn access_latency(&mut self, _addr: u32) -> u64 {
        self.latency
    }
}

/// A DRAM-aware memory controller.
///
/// Tracks the currently open row: a row hit costs only `t_cas`, a miss with
/// an open row costs `t_pre + t_ras + t_cas`, and a miss with no open row
/// costs `t_ras + t_cas`.
pub struct DramController {
    last_row: Option<u32>,
    t_cas: u64,
    t_ras: u64,
    t_pre: u64,
    row_mask: u32,
}

impl DramController {
    /// Creates a new DramController with 2 KiB rows.
    pub fn new(t_cas: u64, t_ras: u64, t_pre: u64) -> Self {
        Self {
            last_row: None,
            t_cas,
            t_ras,
            t_pre,
            row_mask: !2047,
        }
    }
}

impl MemoryController for DramController {
    fn access_latency(&mut self, addr: u32) -> u64 {
        let row = addr & self.row_mask;

        match self.last_row {
            Some(open_row) if open_row == row => self.t_cas,
            Some(_) => {
                self.last_row = Some(row);
                self.t_pre + self.t_ras + self.t_cas
            }
            None => {
                self.last_row = Some(row);
                self.t_ras + self.t_cas
            }
        }
    }

    fn reset(&mut self) {
        self.last_row = None;
    }
}
