//! End-to-end tests: programs assembled with the MR32 encoder and run on a
//! full core.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use mrisc_sim::common::Trap;
use mrisc_sim::config::{Config, MemoryConfig};
use mrisc_sim::core::control::{AluOp, BranchCond, MemOp, MdOp};
use mrisc_sim::core::Cpu;
use mrisc_sim::isa::abi::{SimRoutine, REG_LR, REG_PC, REG_SP, REG_Z};
use mrisc_sim::isa::mr32::encode::*;
use mrisc_sim::isa::VectorMode;
use mrisc_sim::soc::memory::{Memory, Ram};
use mrisc_sim::stats::SimStats;

const RAM_SIZE: u32 = 0x10000;
const LOAD_ADDR: u32 = 0x200;
const SCALAR: VectorMode = VectorMode::Scalar;

/// Creates a configuration with small RAM and the caches disabled, so the
/// cycle count equals the instruction count.
fn create_test_config() -> Config {
    let mut config = Config {
        memory: MemoryConfig {
            ram_size: RAM_SIZE,
            ..Default::default()
        },
        ..Default::default()
    };
    config.cache.icache.enabled = false;
    config.cache.dcache.enabled = false;
    config
}

/// Creates RAM holding `program` at the load address.
fn load_program(program: &[u32]) -> Ram {
    let ram = Ram::new(RAM_SIZE as usize);
    ram.load(LOAD_ADDR, &assemble(program)).unwrap();
    ram
}

/// Output sink shared between the core and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Tests the LDHI/OR constant construction program.
#[test]
fn test_ldhi_or_exit() {
    let ram = load_program(&[
        ldhi(1, 0x12345),
        alu_imm(AluOp::Or, 1, 1, 0x678),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(0x2468_A678));
    assert_eq!(cpu.exit_code(), 0x2468_A678);
    assert!(cpu.is_terminated());
    assert_eq!(cpu.fault(), None);
    assert_eq!(cpu.stats.fetched_instructions, 3);
    assert_eq!(cpu.stats.total_cycles, 3);
    assert_eq!(cpu.stats.sim_routine_calls, 1);
}

/// Tests a counting loop: exits with N after fetching at least N instructions.
#[test]
fn test_counting_loop() {
    const N: i32 = 10;
    let ram = load_program(&[
        ldi(1, 0),
        ldi(2, N),
        alu_imm(AluOp::Add, 1, 1, 1),
        alu(AluOp::Sub, 3, 2, 1, SCALAR),
        branch(BranchCond::Nz, 3, -2),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(N as u32));
    assert_eq!(cpu.stats.fetched_instructions, 2 + 3 * N as u64 + 1);
    assert!(cpu.stats.fetched_instructions >= N as u64);
}

/// Tests a recursive-free call and return through LR.
#[test]
fn test_call_and_return() {
    // main: r1 = 5; call double; exit(r1)
    // double: r1 = r1 + r1; return
    let ram = load_program(&[
        ldi(1, 5),
        jl(REG_PC, 3),
        sim_call(SimRoutine::Exit),
        0,
        alu(AluOp::Add, 1, 1, 1, SCALAR),
        j(REG_LR, 0),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(10));
}

/// Tests stack use through SP-relative loads and stores.
#[test]
fn test_stack_store_load() {
    let ram = load_program(&[
        ldi(1, -1234),
        mem_imm(MemOp::Store32, 1, REG_SP, -4),
        ldi(1, 0),
        mem_imm(MemOp::Load32, 2, REG_SP, -4),
        mem_imm(MemOp::LoadU16, 3, REG_SP, -4),
        mem_imm(MemOp::Ldea, 4, REG_SP, -4),
        alu(AluOp::Or, 1, 2, REG_Z, SCALAR),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok((-1234i32) as u32));
    assert_eq!(cpu.regs.read(3), (-1234i32) as u32 & 0xFFFF);
    assert_eq!(cpu.regs.read(4), RAM_SIZE - 4);
    assert_eq!(cpu.regs.read(REG_SP), RAM_SIZE);
    assert_eq!(ram.read32(RAM_SIZE - 4).unwrap(), (-1234i32) as u32);
}

/// Tests that writes to Z are discarded by executing code.
#[test]
fn test_zero_register_invariant() {
    let ram = load_program(&[
        ldi(REG_Z, 77),
        alu_imm(AluOp::Add, REG_Z, REG_Z, 5),
        alu(AluOp::Or, 1, REG_Z, REG_Z, SCALAR),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(0));
    assert_eq!(cpu.regs.read(REG_Z), 0);
}

/// Tests that reading PC yields the current instruction address and that
/// writing it jumps.
#[test]
fn test_pc_register() {
    let ram = load_program(&[
        alu(AluOp::Or, 1, REG_PC, REG_Z, SCALAR),
        alu_imm(AluOp::Add, REG_PC, REG_PC, 8),
        ldi(1, 0),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    // The `ldi 1, 0` is skipped.
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(LOAD_ADDR));
    assert_eq!(cpu.stats.fetched_instructions, 3);
}

/// Tests the multiply/divide unit from a program, including the fixed
/// division-by-zero result.
#[test]
fn test_muldiv_program() {
    let ram = load_program(&[
        ldi(1, 7),
        muldiv_imm(MdOp::Mul, 1, 1, 6),
        muldiv(MdOp::Divu, 2, 1, REG_Z, SCALAR),
        alu(AluOp::Xor, 1, 1, 2, SCALAR),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(42 ^ 0xFFFF_FFFF));
}

/// Tests that an illegal instruction ends the run with its reserved code.
#[test]
fn test_illegal_instruction_fault() {
    let ram = load_program(&[ldi(1, 1), 0]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(
        cpu.run(LOAD_ADDR, RAM_SIZE),
        Err(Trap::IllegalInstruction(0))
    );
    assert_eq!(cpu.exit_code(), 0xFFFF_FF01);
    assert_eq!(cpu.fault(), Some(Trap::IllegalInstruction(0)));
    assert!(cpu.is_terminated());

    let mut dump = Vec::new();
    cpu.write_regs(&mut dump).unwrap();
    let dump = String::from_utf8(dump).unwrap();
    assert!(dump.contains("r1 =0x00000001"));
    assert!(dump.contains(&format!("r31={:#010x}", LOAD_ADDR + 4)));
}

/// Tests a jump to a misaligned address.
#[test]
fn test_misaligned_fetch_fault() {
    let ram = load_program(&[alu_imm(AluOp::Or, REG_PC, REG_Z, 0x202)]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(
        cpu.run(LOAD_ADDR, RAM_SIZE),
        Err(Trap::InstructionAddressMisaligned(0x202))
    );
    assert_eq!(cpu.exit_code(), 0xFFFF_FF02);
}

/// Tests fetching past the end of memory.
#[test]
fn test_fetch_access_fault() {
    let ram = load_program(&[j(REG_Z, 0x8000)]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(
        cpu.run(LOAD_ADDR, RAM_SIZE),
        Err(Trap::InstructionAccessFault(0x2_0000))
    );
    assert_eq!(cpu.exit_code(), 0xFFFF_FF03);
}

/// Tests loads and stores outside of memory.
#[test]
fn test_data_access_faults() {
    let config = create_test_config();

    let ram = load_program(&[ldhi(2, 0x8000), mem_imm(MemOp::Load32, 1, 2, 0)]);
    let mut cpu = Cpu::new(&ram, &config);
    assert_eq!(
        cpu.run(LOAD_ADDR, RAM_SIZE),
        Err(Trap::LoadAccessFault(0x1000_0000))
    );
    assert_eq!(cpu.exit_code(), 0xFFFF_FF04);

    let ram = load_program(&[ldhi(2, 0x8000), mem_imm(MemOp::Store8, 1, 2, 4)]);
    let mut cpu = Cpu::new(&ram, &config);
    assert_eq!(
        cpu.run(LOAD_ADDR, RAM_SIZE),
        Err(Trap::StoreAccessFault(0x1000_0004))
    );
    assert_eq!(cpu.exit_code(), 0xFFFF_FF05);
}

/// Tests a call to a routine number outside the table.
#[test]
fn test_unknown_sim_routine_fault() {
    let ram = load_program(&[jl(REG_Z, SimRoutine::Exit.address() as i32 / 4 + 100)]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(
        cpu.run(LOAD_ADDR, RAM_SIZE),
        Err(Trap::UnknownSimRoutine(100))
    );
    assert_eq!(cpu.exit_code(), 0xFFFF_FF06);
}

/// Tests that a raised abort flag stops the run before the next instruction.
#[test]
fn test_abort_before_run() {
    let ram = load_program(&[j(REG_PC, 0)]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    cpu.abort_handle().store(true, std::sync::atomic::Ordering::Relaxed);
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Err(Trap::Aborted));
    assert_eq!(cpu.exit_code(), 0xFFFF_FF07);
    assert_eq!(cpu.stats.fetched_instructions, 0);
}

/// Tests aborting an endless loop from another thread.
#[test]
fn test_abort_from_other_thread() {
    let ram = load_program(&[j(REG_PC, 0)]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    let abort = cpu.abort_handle();
    let watchdog = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        abort.store(true, std::sync::atomic::Ordering::Relaxed);
    });

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Err(Trap::Aborted));
    assert!(cpu.stats.fetched_instructions > 0);
    watchdog.join().unwrap();
}

/// Tests that a second run without reset keeps registers and counters.
#[test]
fn test_continuation_without_reset() {
    let ram = load_program(&[
        alu_imm(AluOp::Add, 5, 5, 1),
        alu(AluOp::Or, 1, 5, REG_Z, SCALAR),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(1));
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(2));
    assert_eq!(cpu.stats.fetched_instructions, 6);
    assert_eq!(cpu.stats.sim_routine_calls, 2);
}

/// Tests that reset returns the core to its power-on state.
#[test]
fn test_reset_clears_state() {
    let ram = load_program(&[
        alu_imm(AluOp::Add, 5, 5, 1),
        alu(AluOp::Or, 1, 5, REG_Z, SCALAR),
        sim_call(SimRoutine::Exit),
    ]);
    let config = Config {
        memory: MemoryConfig {
            ram_size: RAM_SIZE,
            ..Default::default()
        },
        ..Default::default()
    };
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(1));
    assert!(cpu.stats.icache_misses > 0);

    cpu.reset();
    assert_eq!(cpu.stats, SimStats::default());
    assert_eq!(cpu.pc(), 0);
    assert_eq!(cpu.regs.read(5), 0);
    assert_eq!(cpu.exit_code(), 0);
    assert!(!cpu.is_terminated());
    assert!(!cpu.icache().contains(LOAD_ADDR));

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(1));
}

/// Tests that a reset also lowers the abort flag.
#[test]
fn test_reset_clears_abort() {
    let ram = load_program(&[ldi(1, 3), sim_call(SimRoutine::Exit)]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);

    cpu.abort_handle().store(true, std::sync::atomic::Ordering::Relaxed);
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Err(Trap::Aborted));
    cpu.reset();
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(3));
}

/// Tests cache accounting and the miss penalty in the cycle count.
#[test]
fn test_cache_cycle_accounting() {
    const N: i32 = 20;
    let ram = load_program(&[
        ldi(1, N),
        alu_imm(AluOp::Add, 1, 1, -1),
        mem_imm(MemOp::Load32, 2, REG_SP, -4),
        branch(BranchCond::Nz, 1, -2),
        sim_call(SimRoutine::Exit),
    ]);
    let mut config = Config {
        memory: MemoryConfig {
            ram_size: RAM_SIZE,
            row_miss_latency: 20,
            ..Default::default()
        },
        ..Default::default()
    };
    config.cache.icache.enabled = true;
    config.cache.dcache.enabled = true;
    let mut cpu = Cpu::new(&ram, &config);

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(0));

    let s = &cpu.stats;
    assert_eq!(s.fetched_instructions, 1 + 3 * N as u64 + 1);
    assert_eq!(s.icache_hits + s.icache_misses, s.fetched_instructions);
    assert_eq!(s.dcache_hits + s.dcache_misses, N as u64);
    assert_eq!(s.dcache_misses, 1);
    assert_eq!(
        s.total_cycles,
        s.fetched_instructions + 20 * (s.icache_misses + s.dcache_misses)
    );
}

/// Tests guest output through putchar into a captured stream.
#[test]
fn test_putchar_output() {
    let ram = load_program(&[
        ldi(1, 'H' as i32),
        sim_call(SimRoutine::Putchar),
        ldi(1, 'i' as i32),
        sim_call(SimRoutine::Putchar),
        ldi(1, 0),
        sim_call(SimRoutine::Exit),
    ]);
    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);
    let out = Captured::default();
    cpu.set_output(Box::new(out.clone()));

    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(0));
    assert_eq!(out.0.lock().unwrap().as_slice(), b"Hi");
    assert_eq!(cpu.stats.sim_routine_calls, 3);
}

/// Tests two cores running on separate threads against shared memory.
#[test]
fn test_two_cores_share_memory() {
    // Sum 1..=r1 where r1 comes from the top of the stack, store the result
    // just below SP and exit with it.
    let ram = load_program(&[
        mem_imm(MemOp::Load32, 1, REG_SP, 0),
        ldi(2, 0),
        alu(AluOp::Add, 2, 2, 1, SCALAR),
        alu_imm(AluOp::Add, 1, 1, -1),
        branch(BranchCond::Nz, 1, -2),
        mem_imm(MemOp::Store32, 2, REG_SP, -4),
        alu(AluOp::Or, 1, 2, REG_Z, SCALAR),
        sim_call(SimRoutine::Exit),
    ]);
    let sp_a = 0x8000;
    let sp_b = 0xC000;
    ram.write32(sp_a, 100).unwrap();
    ram.write32(sp_b, 10).unwrap();
    let config = create_test_config();

    let (a, b) = thread::scope(|s| {
        let ha = s.spawn(|| Cpu::new(&ram, &config).run(LOAD_ADDR, sp_a));
        let hb = s.spawn(|| Cpu::new(&ram, &config).run(LOAD_ADDR, sp_b));
        (ha.join().unwrap(), hb.join().unwrap())
    });

    assert_eq!(a, Ok(5050));
    assert_eq!(b, Ok(55));
    assert_eq!(ram.read32(sp_a - 4).unwrap(), 5050);
    assert_eq!(ram.read32(sp_b - 4).unwrap(), 55);
}

/// Tests instruction tracing does not alter execution.
#[test]
fn test_trace_enabled_run() {
    let ram = load_program(&[ldi(1, 9), sim_call(SimRoutine::Exit)]);
    let mut config = create_test_config();
    config.general.trace_instructions = true;
    let mut cpu = Cpu::new(&ram, &config);

    assert!(cpu.trace);
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(9));
}

/// Tests loading a binary file from disk and running it.
#[test]
fn test_load_binary_file_and_run() {
    let path = std::env::temp_dir().join(format!("mrisc_sim_image_{}.bin", std::process::id()));
    std::fs::write(&path, assemble(&[ldi(1, 321), sim_call(SimRoutine::Exit)])).unwrap();

    let ram = Ram::new(RAM_SIZE as usize);
    let size = mrisc_sim::sim::loader::load_into(&ram, &path, LOAD_ADDR).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(size, 8);

    let config = create_test_config();
    let mut cpu = Cpu::new(&ram, &config);
    assert_eq!(cpu.run(LOAD_ADDR, RAM_SIZE), Ok(321));
}

/// Tests loader failures: a missing file and an image that does not fit.
#[test]
fn test_loader_errors() {
    use mrisc_sim::sim::loader::{self, LoadError};

    let ram = Ram::new(16);
    let missing = std::env::temp_dir().join("mrisc_sim_no_such_image.bin");
    assert!(matches!(
        loader::load_into(&ram, &missing, 0),
        Err(LoadError::Io { .. })
    ));

    let path = std::env::temp_dir().join(format!("mrisc_sim_big_{}.bin", std::process::id()));
    std::fs::write(&path, [0u8; 32]).unwrap();
    let result = loader::load_into(&ram, &path, 0);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(LoadError::Memory(_))));
}
