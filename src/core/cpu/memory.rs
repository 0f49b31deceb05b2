//! Memory Access Helpers.
//!
//! This module contains helper methods for the `Cpu` struct related to
//! cache simulation and accesses to the borrowed memory. Values always come
//! from memory; the caches only decide how many cycles an access costs.

use super::Cpu;
use crate::common::{AccessType, Trap};
use crate::core::control::MemWidth;
use crate::isa::InstructionSet;

impl<'m, I: InstructionSet> Cpu<'m, I> {
    /// Simulates an access through the instruction or data cache.
    ///
    /// Updates the hit/miss counters of the consulted cache. A disabled
    /// cache is bypassed and costs nothing.
    ///
    /// # Returns
    ///
    /// The miss penalty in cycles (0 on a hit).
    pub fn simulate_memory_access(&mut self, addr: u32, access: AccessType) -> u64 {
        let is_inst = access == AccessType::Fetch;
        let cache = if is_inst {
            &mut self.icache
        } else {
            &mut self.dcache
        };
        if !cache.enabled {
            return 0;
        }

        let hit = cache.access(addr, access.is_write());
        match (is_inst, hit) {
            (true, true) => self.stats.icache_hits += 1,
            (true, false) => self.stats.icache_misses += 1,
            (false, true) => self.stats.dcache_hits += 1,
            (false, false) => self.stats.dcache_misses += 1,
        }

        if hit {
            0
        } else {
            self.mem_controller.access_latency(addr)
        }
    }

    /// Reads a zero-extended value of `width` bytes.
    pub(crate) fn read_mem(
        &self,
        addr: u32,
        width: MemWidth,
        access: AccessType,
    ) -> Result<u32, Trap> {
        let value = match width {
            MemWidth::Byte => self.mem.read8(addr).map(u32::from),
            MemWidth::Half => self.mem.read16(addr).map(u32::from),
            MemWidth::Word => self.mem.read32(addr),
        };
        value.map_err(|_| Trap::access_fault(access, addr))
    }

    /// Writes the low `width` bytes of `value`.
    pub(crate) fn write_mem(&self, addr: u32, width: MemWidth, value: u32) -> Result<(), Trap> {
        let result = match width {
            MemWidth::Byte => self.mem.write8(addr, value as u8),
            MemWidth::Half => self.mem.write16(addr, value as u16),
            MemWidth::Word => self.mem.write32(addr, value),
        };
        result.map_err(|_| Trap::StoreAccessFault(addr))
    }
}
