//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Borrow
//! - AND, ORA, EOR: Bitwise logic into the accumulator
//! - CMP, CPX, CPY: Register comparison
//! - BIT: Bit test
//!
//! ADC and SBC honor the D flag. In decimal mode the W65C02S produces valid
//! N and Z flags for the BCD result and takes one cycle longer.

use crate::addressing::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Adds the operand plus the carry flag to the accumulator.
///
/// Flags affected:
/// - N, Z: From the stored result
/// - C: Set on unsigned overflow (binary) or a result above 99 (decimal)
/// - V: Set when two operands of equal sign produce a result of the other sign
///
/// Returns one extra cycle in decimal mode.
pub(crate) fn execute_adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let a = cpu.regs.a;
    let carry_in = cpu.regs.flag(Status::CARRY) as u16;

    if cpu.regs.flag(Status::DECIMAL) {
        let mut sum = carry_in + (a & 0x0F) as u16 + (value & 0x0F) as u16;
        if sum > 0x09 {
            sum += 0x06;
        }
        sum += (a & 0xF0) as u16 + (value & 0xF0) as u16;

        // Overflow is judged before the high digit is corrected.
        let partial = sum as u8;
        let overflow = (a ^ partial) & (value ^ partial) & 0x80 != 0;

        if sum > 0x99 {
            sum += 0x60;
        }

        cpu.regs.set_flag(Status::OVERFLOW, overflow);
        cpu.regs.set_flag(Status::CARRY, sum > 0xFF);
        cpu.regs.load_a(sum as u8);
        return Ok(1);
    }

    let sum = a as u16 + value as u16 + carry_in;
    let result = sum as u8;

    // V = (A^result) & (M^result) & 0x80
    let overflow = (a ^ result) & (value ^ result) & 0x80 != 0;

    cpu.regs.set_flag(Status::OVERFLOW, overflow);
    cpu.regs.set_flag(Status::CARRY, sum > 0xFF);
    cpu.regs.load_a(result);
    Ok(0)
}

/// Executes the SBC (Subtract with Borrow) instruction.
///
/// Computes `A - M - (1 - C)`. Carry clear means a borrow occurred.
///
/// C and V always follow the binary subtraction `A + !M + C`. In decimal mode
/// the stored result is BCD-corrected and N and Z follow the corrected value.
///
/// Returns one extra cycle in decimal mode.
pub(crate) fn execute_sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let a = cpu.regs.a;
    let carry_in = cpu.regs.flag(Status::CARRY) as u16;

    let inverted = !value;
    let sum = a as u16 + inverted as u16 + carry_in;
    let binary = sum as u8;
    let overflow = (a ^ binary) & (inverted ^ binary) & 0x80 != 0;

    cpu.regs.set_flag(Status::OVERFLOW, overflow);
    cpu.regs.set_flag(Status::CARRY, sum > 0xFF);

    if cpu.regs.flag(Status::DECIMAL) {
        let borrow = 1 - carry_in as i16;
        let low = (a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow;
        let mut result = a as i16 - value as i16 - borrow;
        if result < 0 {
            result -= 0x60;
        }
        if low < 0 {
            result -= 0x06;
        }
        cpu.regs.load_a(result as u8);
        return Ok(1);
    }

    cpu.regs.load_a(binary);
    Ok(0)
}

/// Executes the AND (Logical AND) instruction.
///
/// Flags affected: N, Z
pub(crate) fn execute_and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    cpu.regs.load_a(cpu.regs.a & value);
    Ok(0)
}

/// Executes the ORA (Logical Inclusive OR) instruction.
///
/// Flags affected: N, Z
pub(crate) fn execute_ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    cpu.regs.load_a(cpu.regs.a | value);
    Ok(0)
}

/// Executes the EOR (Exclusive OR) instruction.
///
/// Flags affected: N, Z
pub(crate) fn execute_eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    cpu.regs.load_a(cpu.regs.a ^ value);
    Ok(0)
}

/// Shared body of CMP, CPX and CPY.
///
/// Computes `register + !value + 1` without storing it:
/// - C: register >= value (unsigned)
/// - Z: register == value
/// - N: bit 7 of the difference
fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    let difference = register.wrapping_sub(value);
    cpu.regs.set_flag(Status::CARRY, register >= value);
    cpu.regs.update_nz(difference);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let register = cpu.regs.a;
    compare(cpu, register, value);
    Ok(0)
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let register = cpu.regs.x;
    compare(cpu, register, value);
    Ok(0)
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let register = cpu.regs.y;
    compare(cpu, register, value);
    Ok(0)
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z is set when `A & M` is zero. For memory operands N and V are copied from
/// bits 7 and 6 of M. The immediate form only affects Z.
///
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;

    cpu.regs.set_flag(Status::ZERO, cpu.regs.a & value == 0);

    if !matches!(operand, Operand::Immediate(_)) {
        cpu.regs.set_flag(Status::NEGATIVE, value & 0x80 != 0);
        cpu.regs.set_flag(Status::OVERFLOW, value & 0x40 != 0);
    }

    Ok(0)
}
