//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each works on the accumulator or a memory location. The bit shifted out
//! lands in C; Z and N follow the result.

use crate::addressing::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

/// Reads the operand, applies `shift` and writes back.
///
/// `shift` receives the old value and the incoming carry and returns the new
/// value and the outgoing carry.
fn shift_with<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
    shift: fn(u8, bool) -> (u8, bool),
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let (result, carry) = shift(value, cpu.regs.flag(Status::CARRY));

    cpu.write_operand(operand, result)?;
    cpu.regs.set_flag(Status::CARRY, carry);
    cpu.regs.update_nz(result);
    Ok(0)
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
///
/// Bit 0 is set to 0 and bit 7 is placed in the carry flag.
pub(crate) fn execute_asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    shift_with(cpu, operand, |v, _| (v << 1, v & 0x80 != 0))
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// Bit 7 is set to 0, so N is always cleared.
pub(crate) fn execute_lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    shift_with(cpu, operand, |v, _| (v >> 1, v & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    shift_with(cpu, operand, |v, c| ((v << 1) | c as u8, v & 0x80 != 0))
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    shift_with(cpu, operand, |v, c| ((v >> 1) | ((c as u8) << 7), v & 0x01 != 0))
}
