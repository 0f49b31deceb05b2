use crate::common::{AccessType, Trap};
use crate::core::control::MemOp;
use crate::core::units::lsu::Lsu;
use crate::core::Cpu;
use crate::isa::InstructionSet;

/// Performs a load and returns the extended register value.
///
/// `Ldea` does not touch memory and returns `addr`.
pub fn load<I: InstructionSet>(cpu: &mut Cpu<'_, I>, op: MemOp, addr: u32) -> Result<u32, Trap> {
    let Some(width) = op.width() else {
        return Ok(addr);
    };
    let raw = cpu.read_mem(addr, width, AccessType::Read)?;
    cpu.stats.total_cycles += cpu.simulate_memory_access(addr, AccessType::Read);
    Ok(Lsu::extend(op, raw))
}

/// Performs a store of the low bytes of `value`.
pub fn store<I: InstructionSet>(
    cpu: &mut Cpu<'_, I>,
    op: MemOp,
    addr: u32,
    value: u32,
) -> Result<(), Trap> {
    let Some(width) = op.width() else {
        return Ok(());
    };
    cpu.write_mem(addr, width, value)?;
    cpu.stats.total_cycles += cpu.simulate_memory_access(addr, AccessType::Write);
    Ok(())
}
