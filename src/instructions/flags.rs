//! # Status Flag Manipulation Instructions
//!
//! This module implements instructions that directly modify processor status flags:
//! - CLC: Clear Carry Flag
//! - SEC: Set Carry Flag
//! - CLI: Clear Interrupt Disable
//! - SEI: Set Interrupt Disable
//! - CLV: Clear Overflow Flag
//! - CLD: Clear Decimal Mode
//! - SED: Set Decimal Mode
//!
//! These instructions use implied addressing mode and execute in 2 cycles.

use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the CLC (Clear Carry Flag) instruction.
///
/// # Examples
///
/// ```
/// use lib65c02::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0000, 0x18); // CLC
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_flag_c(true);
///
/// cpu.step().unwrap();
///
/// assert!(!cpu.flag_c());
/// assert_eq!(cpu.pc(), 0x0001);
/// assert_eq!(cpu.cycles(), 2);
/// ```
pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::CARRY, false);
    Ok(0)
}

/// Executes the SEC (Set Carry Flag) instruction.
pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::CARRY, true);
    Ok(0)
}

/// Executes the CLI (Clear Interrupt Disable) instruction.
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::IRQ_DISABLE, false);
    Ok(0)
}

/// Executes the SEI (Set Interrupt Disable) instruction.
pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::IRQ_DISABLE, true);
    Ok(0)
}

/// Executes the CLD (Clear Decimal Mode) instruction.
pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::DECIMAL, false);
    Ok(0)
}

/// Executes the SED (Set Decimal Mode) instruction.
///
/// ADC and SBC switch to BCD arithmetic until CLD.
pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::DECIMAL, true);
    Ok(0)
}

/// Executes the CLV (Clear Overflow Flag) instruction.
///
/// There is no matching set instruction.
pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.set_flag(Status::OVERFLOW, false);
    Ok(0)
}
