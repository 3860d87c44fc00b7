//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump (absolute, indirect, absolute indexed indirect)
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return from interrupt
//! - WAI / STP: Low-power wait and stop
//!
//! BRK is a software interrupt that:
//! 1. Pushes the address of BRK + 2 to the stack (high byte first, then low byte)
//! 2. Pushes processor status to stack with B set
//! 3. Sets I, clears D
//! 4. Loads PC from the IRQ vector at $FFFE/F

use crate::addressing::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, RunState, CPU, IRQ_VECTOR};

/// Executes the JMP (Jump) instruction.
///
/// Sets PC to the resolved address. Both indirect forms have already been
/// dereferenced during operand resolution, and `JMP (a)` reads its pointer
/// across a page boundary correctly.
///
/// Flags affected: None
pub(crate) fn execute_jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    cpu.regs.pc = cpu.operand_address(operand)?;
    Ok(0)
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (high byte
/// first), then jumps.
///
/// # Examples
///
/// ```
/// use lib65c02::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x2000, &[0x20, 0x00, 0x10]); // JSR $1000
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_pc(0x2000);
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.pc(), 0x1000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.memory().read(0x01FF), 0x20);
/// assert_eq!(cpu.memory().read(0x01FE), 0x02);
/// assert_eq!(cpu.cycles(), 6);
/// ```
pub(crate) fn execute_jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let target = cpu.operand_address(operand)?;
    let return_address = cpu.regs.pc.wrapping_sub(1);
    cpu.push_word(return_address);
    cpu.regs.pc = target;
    Ok(0)
}

/// Executes the RTS (Return from Subroutine) instruction.
///
/// Pulls PC (low byte first) and adds one.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.pc = cpu.pull_word().wrapping_add(1);
    Ok(0)
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// The pushed status has B and bit 5 set. After the push B and I are set in
/// the live register and D is cleared.
///
/// Cycle timing: 7 cycles (fixed)
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    // PC already points one past the opcode; the signature byte is skipped too.
    let return_address = cpu.regs.pc.wrapping_add(1);
    cpu.push_word(return_address);

    let status = cpu.regs.status_byte() | Status::BREAK.bits();
    cpu.push(status);

    cpu.regs.set_flag(Status::BREAK, true);
    cpu.regs.set_flag(Status::IRQ_DISABLE, true);
    cpu.regs.set_flag(Status::DECIMAL, false);

    cpu.regs.pc = cpu.read_word(IRQ_VECTOR);
    log::debug!(
        "BRK at 0x{:04X}, vectoring to 0x{:04X}",
        return_address.wrapping_sub(2),
        cpu.regs.pc
    );

    Ok(0)
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls the status register (every bit as stored), then PC low, then PC high.
/// Unlike RTS the pulled PC is used as-is.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let status = cpu.pull();
    cpu.regs.set_status_byte(status);
    cpu.regs.pc = cpu.pull_word();
    Ok(0)
}

/// Executes the WAI (Wait for Interrupt) instruction.
///
/// The CPU stops fetching until [`CPU::wake`] or [`CPU::reset`].
pub(crate) fn execute_wai<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.halt(RunState::Waiting);
    Ok(0)
}

/// Executes the STP (Stop) instruction.
///
/// Only [`CPU::reset`] restarts a stopped CPU.
pub(crate) fn execute_stp<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.halt(RunState::Stopped);
    Ok(0)
}
