use crate::core::Cpu;
use crate::isa::abi::REG_PC;
use crate::isa::InstructionSet;

/// Writes an instruction result to a scalar register.
///
/// A write to the PC becomes the next-instruction address.
#[inline]
pub fn write_register<I: InstructionSet>(cpu: &mut Cpu<'_, I>, rd: usize, val: u32) {
    if rd == REG_PC {
        cpu.next_pc = val;
    } else {
        cpu.regs.write(rd, val);
    }
}

/// Commits the next-instruction address.
#[inline]
pub fn retire<I: InstructionSet>(cpu: &mut Cpu<'_, I>) {
    let next = cpu.next_pc;
    cpu.regs.write(REG_PC, next);
}
