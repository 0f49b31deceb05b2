//! Simulation statistics collection and reporting.
//!
//! Counters are updated by the CPU core as it runs and are cleared by
//! `Cpu::reset`. The text report has one `key value` pair per line after a
//! banner; the JSON form (via `serde`) uses the same keys.

use std::io::{self, Write};

use serde::Serialize;

/// Simulation statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Instructions fetched from memory (simulator routines not included).
    pub fetched_instructions: u64,
    /// Vector lanes processed, summed over all vector instructions.
    pub vector_loop_iterations: u64,
    /// Modelled cycles: one per instruction, one per extra vector lane,
    /// plus memory-controller latency on cache misses.
    pub total_cycles: u64,

    pub icache_hits: u64,
    pub icache_misses: u64,
    pub dcache_hits: u64,
    pub dcache_misses: u64,

    /// Calls into the simulator-routine page.
    pub sim_routine_calls: u64,
}

impl SimStats {
    /// Counter names and values in report order.
    pub fn entries(&self) -> [(&'static str, u64); 8] {
        [
            ("fetched_instructions", self.fetched_instructions),
            ("vector_loop_iterations", self.vector_loop_iterations),
            ("total_cycles", self.total_cycles),
            ("icache_hits", self.icache_hits),
            ("icache_misses", self.icache_misses),
            ("dcache_hits", self.dcache_hits),
            ("dcache_misses", self.dcache_misses),
            ("sim_routine_calls", self.sim_routine_calls),
        ]
    }

    /// Writes the text report.
    pub fn write_report<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "==========================================================")?;
        writeln!(w, "MRISC SIMULATION STATISTICS")?;
        writeln!(w, "==========================================================")?;
        for (name, value) in self.entries() {
            writeln!(w, "{:<24} {}", name, value)?;
        }
        writeln!(w, "==========================================================")
    }

    /// Prints the text report to stdout.
    pub fn print(&self) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if let Err(e) = self.write_report(&mut lock) {
            log::warn!("failed to write statistics: {}", e);
        }
    }
}
