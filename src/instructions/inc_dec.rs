//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC / DEC: Memory or accumulator
//! - INX / INY / DEX / DEY: Index registers
//!
//! All of them wrap at 8 bits and update Z and N. C and V are untouched.

use crate::addressing::Operand;
use crate::{ExecutionError, MemoryBus, CPU};

fn modify<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
    delta: fn(u8) -> u8,
) -> Result<u32, ExecutionError> {
    let result = delta(cpu.read_operand(operand)?);
    cpu.write_operand(operand, result)?;
    cpu.regs.update_nz(result);
    Ok(0)
}

/// Executes the INC (Increment Memory) instruction.
///
/// `INC A` (0x1A) increments the accumulator.
pub(crate) fn execute_inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    modify(cpu, operand, |v| v.wrapping_add(1))
}

/// Executes the DEC (Decrement Memory) instruction.
///
/// `DEC A` (0x3A) decrements the accumulator.
pub(crate) fn execute_dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    modify(cpu, operand, |v| v.wrapping_sub(1))
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.x.wrapping_add(1);
    cpu.regs.load_x(value);
    Ok(0)
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.y.wrapping_add(1);
    cpu.regs.load_y(value);
    Ok(0)
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.x.wrapping_sub(1);
    cpu.regs.load_x(value);
    Ok(0)
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.y.wrapping_sub(1);
    cpu.regs.load_y(value);
    Ok(0)
}
