//! Simulator Routines.
//!
//! Guest code reaches host services by jumping into the reserved page at
//! `SIM_ROUTINE_BASE`. Arguments are taken from R1-R3 and the result is
//! returned in R1; a host-side failure returns -1. Control then returns to
//! the address in LR.

use super::Cpu;
use crate::common::Trap;
use crate::isa::abi::{SimRoutine, HOST_ERROR, REG_R1, REG_R2, REG_R3};
use crate::isa::InstructionSet;

impl<'m, I: InstructionSet> Cpu<'m, I> {
    /// Runs simulator routine `routine_no` against the current registers.
    ///
    /// # Errors
    ///
    /// `Trap::UnknownSimRoutine` if the number is not in the routine table.
    /// Host I/O failures are not errors; they are reported to the guest.
    pub fn call_sim_routine(&mut self, routine_no: u32) -> Result<(), Trap> {
        let routine =
            SimRoutine::from_number(routine_no).ok_or(Trap::UnknownSimRoutine(routine_no))?;
        let r1 = self.regs.read(REG_R1);
        let r2 = self.regs.read(REG_R2);
        let r3 = self.regs.read(REG_R3);
        log::debug!("sim routine {:?}({:#x}, {:#x}, {:#x})", routine, r1, r2, r3);

        if routine == SimRoutine::Exit {
            self.terminate = true;
            self.exit_code = r1;
            return Ok(());
        }

        let mem = self.mem;
        let host = &mut self.host;
        let result = match routine {
            SimRoutine::Exit => Ok(r1),
            SimRoutine::Putchar => host.putchar(r1),
            SimRoutine::Close => host.close(r1),
            SimRoutine::Fstat => host.fstat(mem, r1, r2),
            SimRoutine::Isatty => Ok(host.isatty(r1)),
            SimRoutine::Link => host.link(mem, r1, r2),
            SimRoutine::Lseek => host.lseek(r1, r2, r3),
            SimRoutine::Mkdir => host.mkdir(mem, r1, r2),
            SimRoutine::Open => host.open(mem, r1, r2, r3),
            SimRoutine::Read => host.read(mem, r1, r2, r3),
            SimRoutine::Stat => host.stat(mem, r1, r2),
            SimRoutine::Unlink => host.unlink(mem, r1),
            SimRoutine::Write => host.write(mem, r1, r2, r3),
        };

        let value = result.unwrap_or_else(|e| {
            log::debug!("sim routine {:?} failed: {}", routine, e);
            HOST_ERROR
        });
        self.regs.write(REG_R1, value);
        Ok(())
    }
}
