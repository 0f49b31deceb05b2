//! The CPU Core.
//!
//! `Cpu` interprets one instruction per `step`, in program order. It owns
//! all architectural state (scalar and vector registers), the run state
//! (terminate flag, exit code, fault), the performance counters and the
//! cache models, and borrows the memory it executes from. Several cores can
//! share one `Memory` from different threads.
//!
//! # Program counter
//!
//! Register 31 is the PC. Reading it yields the address of the executing
//! instruction; writing it from an instruction redirects control flow as a
//! jump would. After every step the core stores the next instruction
//! address back into it.

/// Cache accounting and memory accessors.
mod memory;

/// Simulator-routine dispatch.
mod routines;

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::arch::gpr::Gpr;
use super::arch::vreg::VectorRegs;
use super::stages;
use super::units::cache::CacheSim;
use crate::common::Trap;
use crate::config::Config;
use crate::isa::abi::{is_sim_routine_address, REG_LR, REG_PC, REG_SP, SIM_ROUTINE_BASE};
use crate::isa::mr32::Mr32;
use crate::isa::InstructionSet;
use crate::sim::host::HostIo;
use crate::soc::memory::controller::{self, MemoryController};
use crate::soc::memory::Memory;
use crate::stats::SimStats;

/// An MRISC CPU core.
///
/// Generic over the instruction encoding; the default is MR32.
pub struct Cpu<'m, I: InstructionSet = Mr32> {
    pub regs: Gpr,
    pub vregs: VectorRegs,
    pub stats: SimStats,
    /// Log every executed instruction at `trace` level.
    pub trace: bool,

    pub(crate) isa: I,
    pub(crate) mem: &'m dyn Memory,
    pub(crate) next_pc: u32,

    pub(crate) terminate: bool,
    pub(crate) exit_code: u32,
    pub(crate) fault: Option<Trap>,

    pub(crate) icache: CacheSim,
    pub(crate) dcache: CacheSim,
    pub(crate) mem_controller: Box<dyn MemoryController>,

    pub(crate) host: HostIo,
    abort: Arc<AtomicBool>,
}

impl<'m> Cpu<'m, Mr32> {
    /// Creates an MR32 core executing from `mem`.
    pub fn new(mem: &'m dyn Memory, config: &Config) -> Self {
        Self::with_isa(mem, config, Mr32)
    }
}

impl<'m, I: InstructionSet> Cpu<'m, I> {
    /// Creates a core for an arbitrary architecture variant.
    ///
    /// # Arguments
    ///
    /// * `mem` - Memory to execute from; must outlive the core
    /// * `config` - Cache, memory-timing and tracing settings
    /// * `isa` - Instruction decoder
    pub fn with_isa(mem: &'m dyn Memory, config: &Config, isa: I) -> Self {
        Self {
            regs: Gpr::new(),
            vregs: VectorRegs::new(),
            stats: SimStats::default(),
            trace: config.general.trace_instructions || cfg!(feature = "always-trace"),
            isa,
            mem,
            next_pc: 0,
            terminate: false,
            exit_code: 0,
            fault: None,
            icache: CacheSim::new(&config.cache.icache),
            dcache: CacheSim::new(&config.cache.dcache),
            mem_controller: controller::from_config(&config.memory),
            host: HostIo::new(),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the architecture variant.
    pub fn isa(&self) -> &I {
        &self.isa
    }

    /// Returns the core to its power-on state.
    ///
    /// Clears all registers, the run state and the statistics, invalidates
    /// both caches, closes guest files and lowers the abort flag. Memory
    /// contents are left alone.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.vregs.reset();
        self.next_pc = 0;
        self.terminate = false;
        self.exit_code = 0;
        self.fault = None;
        self.stats = SimStats::default();
        self.icache.flush();
        self.dcache.flush();
        self.mem_controller.reset();
        self.host.reset();
        self.abort.store(false, Ordering::Relaxed);
    }

    /// Runs from `addr` with the stack pointer set to `sp` until the program
    /// exits or faults.
    ///
    /// Registers and statistics carry over from any previous run unless
    /// `reset` was called in between.
    ///
    /// # Returns
    ///
    /// The exit code passed to the exit routine, or the trap that ended the
    /// run. After a trap `exit_code()` holds the trap's reserved code.
    pub fn run(&mut self, addr: u32, sp: u32) -> Result<u32, Trap> {
        self.regs.write(REG_PC, addr);
        self.regs.write(REG_SP, sp);
        self.terminate = false;
        self.fault = None;
        log::info!("[{}] run from {:#010x}, sp={:#010x}", self.isa.name(), addr, sp);

        while !self.terminate {
            if self.abort.load(Ordering::Relaxed) {
                return Err(self.raise(Trap::Aborted));
            }
            if let Err(trap) = self.step() {
                return Err(self.raise(trap));
            }
        }

        log::info!("[{}] exit code {:#x}", self.isa.name(), self.exit_code);
        Ok(self.exit_code)
    }

    /// Executes one instruction, or one simulator routine if the PC is in
    /// the routine page.
    pub fn step(&mut self) -> Result<(), Trap> {
        let pc = self.pc();

        if is_sim_routine_address(pc) {
            if pc % 4 != 0 {
                return Err(Trap::InstructionAddressMisaligned(pc));
            }
            self.call_sim_routine((pc - SIM_ROUTINE_BASE) / 4)?;
            self.stats.sim_routine_calls += 1;
            let lr = self.regs.read(REG_LR);
            self.regs.write(REG_PC, lr);
            return Ok(());
        }

        let word = stages::fetch::fetch_stage(self, pc)?;
        let inst = stages::decode::decode_stage(self, pc, word)?;
        self.next_pc = pc.wrapping_add(4);
        stages::execute::execute_stage(self, word, &inst)?;
        stages::write_back::retire(self);
        Ok(())
    }

    fn raise(&mut self, trap: Trap) -> Trap {
        self.terminate = true;
        self.exit_code = trap.exit_code();
        self.fault = Some(trap);
        log::error!("[{}] {} (pc={:#010x})", self.isa.name(), trap, self.pc());
        self.regs.dump();
        trap
    }

    /// Address of the next instruction to execute.
    #[inline]
    pub fn pc(&self) -> u32 {
        self.regs.read(REG_PC)
    }

    /// Exit code of the last run (reserved code after a trap).
    pub fn exit_code(&self) -> u32 {
        self.exit_code
    }

    /// The trap that ended the last run, if any.
    pub fn fault(&self) -> Option<Trap> {
        self.fault
    }

    pub fn is_terminated(&self) -> bool {
        self.terminate
    }

    /// Returns the external cancellation flag.
    ///
    /// Setting it from any thread stops the run loop before the next
    /// instruction with `Trap::Aborted`.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Redirects guest stdout (fd 1 and `putchar`).
    pub fn set_output(&mut self, output: Box<dyn Write + Send>) {
        self.host.set_output(output);
    }

    pub fn icache(&self) -> &CacheSim {
        &self.icache
    }

    pub fn dcache(&self) -> &CacheSim {
        &self.dcache
    }

    /// Prints the statistics report to stdout.
    pub fn dump_stats(&self) {
        self.stats.print();
    }

    /// Writes the statistics report to `w`.
    pub fn write_stats<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        self.stats.write_report(w)
    }

    /// Logs the scalar registers at `debug` level.
    pub fn dump_regs(&self) {
        self.regs.dump();
    }

    /// Writes the scalar registers to `w`.
    pub fn write_regs<W: Write + ?Sized>(&self, w: &mut W) -> io::Result<()> {
        self.regs.write_dump(w)
    }
}
