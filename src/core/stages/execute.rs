use super::memory_access;
use super::write_back::write_register;
use crate::common::Trap;
use crate::core::arch::vreg::VectorReg;
use crate::core::units::alu::Alu;
use crate::core::units::fpu::Fpu;
use crate::core::units::lsu::Lsu;
use crate::core::units::mdu::Mdu;
use crate::core::units::vector;
use crate::core::Cpu;
use crate::isa::abi::{REG_LR, REG_PC, REG_VL};
use crate::isa::{Instruction, InstructionSet, Operand, Operation, VectorMode};

/// Executes a decoded instruction, including its memory access and
/// register write-back.
///
/// `word` is only used to report an illegal operation/mode combination.
pub fn execute_stage<I: InstructionSet>(
    cpu: &mut Cpu<'_, I>,
    word: u32,
    inst: &Instruction,
) -> Result<(), Trap> {
    if inst.mode.is_vector() {
        execute_vector(cpu, word, inst)
    } else {
        execute_scalar(cpu, word, inst)
    }
}

fn scalar_operand<I: InstructionSet>(cpu: &Cpu<'_, I>, b: Operand) -> u32 {
    match b {
        Operand::Reg(r) => cpu.regs.read(r),
        Operand::Imm(v) => v,
    }
}

fn execute_scalar<I: InstructionSet>(
    cpu: &mut Cpu<'_, I>,
    word: u32,
    inst: &Instruction,
) -> Result<(), Trap> {
    let pc = cpu.regs.read(REG_PC);
    let a = cpu.regs.read(inst.ra);
    let b = scalar_operand(cpu, inst.b);

    match inst.op {
        Operation::Alu(op) => write_register(cpu, inst.rd, Alu::execute(op, a, b)),
        Operation::MulDiv(op) => write_register(cpu, inst.rd, Mdu::execute(op, a, b)),
        Operation::Fpu(op) => write_register(cpu, inst.rd, Fpu::execute(op, a, b)),
        Operation::Mem(op) => {
            let addr = Lsu::effective_address(a, b);
            if op.is_store() {
                let value = cpu.regs.read(inst.rd);
                memory_access::store(cpu, op, addr, value)?;
            } else {
                let value = memory_access::load(cpu, op, addr)?;
                write_register(cpu, inst.rd, value);
            }
        }
        Operation::Branch(cond) => {
            if cond.taken(cpu.regs.read(inst.rd)) {
                cpu.next_pc = pc.wrapping_add(b);
            }
        }
        Operation::Jump { link } => {
            let target = cpu.regs.read(inst.rd).wrapping_add(b);
            if link {
                cpu.regs.write(REG_LR, pc.wrapping_add(4));
            }
            cpu.next_pc = target;
        }
        Operation::Permute => return Err(Trap::IllegalInstruction(word)),
    }
    Ok(())
}

/// Lane-wise execution over `min(VL, 32)` lanes.
///
/// Sources are snapshotted before the first lane is written. Lanes past the
/// active count keep their old values.
fn execute_vector<I: InstructionSet>(
    cpu: &mut Cpu<'_, I>,
    word: u32,
    inst: &Instruction,
) -> Result<(), Trap> {
    let lanes = vector::active_lanes(cpu.regs.read(REG_VL));
    let vb: Option<VectorReg> = match (inst.mode, inst.b) {
        (VectorMode::VectorVector, Operand::Reg(r)) => Some(cpu.vregs.snapshot(r)),
        _ => None,
    };
    let scalar_b = scalar_operand(cpu, inst.b);
    let lane_b = |k: usize| vb.map_or(scalar_b, |v| v[k]);

    match inst.op {
        Operation::Alu(op) => {
            let va = cpu.vregs.snapshot(inst.ra);
            for k in 0..lanes {
                cpu.vregs.write_lane(inst.rd, k, Alu::execute(op, va[k], lane_b(k)));
            }
        }
        Operation::MulDiv(op) => {
            let va = cpu.vregs.snapshot(inst.ra);
            for k in 0..lanes {
                cpu.vregs.write_lane(inst.rd, k, Mdu::execute(op, va[k], lane_b(k)));
            }
        }
        Operation::Fpu(op) => {
            let va = cpu.vregs.snapshot(inst.ra);
            for k in 0..lanes {
                cpu.vregs.write_lane(inst.rd, k, Fpu::execute(op, va[k], lane_b(k)));
            }
        }
        Operation::Permute => {
            let va = cpu.vregs.snapshot(inst.ra);
            for k in 0..lanes {
                let src = match vb {
                    Some(idx) => vector::permute_index(idx[k]),
                    None => vector::rotate_index(k, scalar_b),
                };
                cpu.vregs.write_lane(inst.rd, k, va[src]);
            }
        }
        Operation::Mem(op) => {
            let base = cpu.regs.read(inst.ra);
            let data = cpu.vregs.snapshot(inst.rd);
            for k in 0..lanes {
                let addr = match vb {
                    Some(offsets) => Lsu::effective_address(base, offsets[k]),
                    None => vector::strided_address(base, scalar_b, k),
                };
                let lane = if op.is_store() {
                    memory_access::store(cpu, op, addr, data[k])
                } else {
                    memory_access::load(cpu, op, addr)
                        .map(|value| cpu.vregs.write_lane(inst.rd, k, value))
                };
                if let Err(trap) = lane {
                    count_lanes(cpu, k);
                    return Err(trap);
                }
            }
        }
        Operation::Branch(_) | Operation::Jump { .. } => {
            return Err(Trap::IllegalInstruction(word));
        }
    }

    count_lanes(cpu, lanes);
    Ok(())
}

/// Charges `lanes` completed lanes: one iteration each, one extra cycle per
/// lane after the first.
fn count_lanes<I: InstructionSet>(cpu: &mut Cpu<'_, I>, lanes: usize) {
    cpu.stats.vector_loop_iterations += lanes as u64;
    cpu.stats.total_cycles += (lanes as u64).saturating_sub(1);
}
