use crate::common::Trap;
use crate::core::Cpu;
use crate::isa::{Instruction, InstructionSet};

pub fn decode_stage<I: InstructionSet>(
    cpu: &mut Cpu<'_, I>,
    pc: u32,
    word: u32,
) -> Result<Instruction, Trap> {
    let inst = cpu.isa.decode(word)?;
    if cpu.trace {
        log::trace!("{:#010x}: {:08x}  {:?}", pc, word, inst);
    }
    Ok(inst)
}
