use crate::common::{AccessType, Trap};
use crate::core::control::MemWidth;
use crate::core::Cpu;
use crate::isa::InstructionSet;

/// Fetches the instruction word at `pc`.
///
/// Charges one cycle plus any instruction-cache miss penalty.
pub fn fetch_stage<I: InstructionSet>(cpu: &mut Cpu<'_, I>, pc: u32) -> Result<u32, Trap> {
    if pc % 4 != 0 {
        return Err(Trap::InstructionAddressMisaligned(pc));
    }

    let word = cpu.read_mem(pc, MemWidth::Word, AccessType::Fetch)?;
    let penalty = cpu.simulate_memory_access(pc, AccessType::Fetch);

    cpu.stats.fetched_instructions += 1;
    cpu.stats.total_cycles += 1 + penalty;
    Ok(word)
}
