//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PHX / PHY: Push a register
//! - PHP: Push processor status
//! - PLA / PLX / PLY: Pull a register, updating Z and N
//! - PLP: Pull processor status
//!
//! The stack lives at memory addresses 0x0100-0x01FF and grows downward.
//! The stack pointer (SP) is an 8-bit register that serves as an offset into this
//! page. The full stack address is calculated as 0x0100 | SP.

use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
///
/// Stack operation:
/// 1. Write accumulator value to 0x0100 | SP
/// 2. Decrement SP (wraps from 0x00 to 0xFF)
///
/// # Examples
///
/// ```
/// use lib65c02::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0x0000, 0x48); // PHA
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x42);
///
/// cpu.step().unwrap();
///
/// assert_eq!(cpu.memory().read(0x01FF), 0x42);
/// assert_eq!(cpu.sp(), 0xFE);
/// assert_eq!(cpu.cycles(), 3);
/// ```
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.a;
    cpu.push(value);
    Ok(0)
}

pub(crate) fn execute_phx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.x;
    cpu.push(value);
    Ok(0)
}

pub(crate) fn execute_phy<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.y;
    cpu.push(value);
    Ok(0)
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// Bit 5 is always set in the pushed byte. B is pushed as currently held.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let status = cpu.regs.status_byte();
    cpu.push(status);
    Ok(0)
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.pull();
    cpu.regs.load_a(value);
    Ok(0)
}

pub(crate) fn execute_plx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.pull();
    cpu.regs.load_x(value);
    Ok(0)
}

pub(crate) fn execute_ply<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.pull();
    cpu.regs.load_y(value);
    Ok(0)
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Every bit is restored as stored, B included.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let status = cpu.pull();
    cpu.regs.set_status_byte(status);
    Ok(0)
}
