//! # Bit Manipulation Instructions
//!
//! The Rockwell extensions carried by the W65C02S:
//! - BBRb / BBSb: Branch on zero page bit b reset / set
//! - RMBb / SMBb: Reset / set zero page bit b
//!
//! And the CMOS test-and-modify pair:
//! - TRB: Test and Reset Bits
//! - TSB: Test and Set Bits
//!
//! None of these touch N or V.

use crate::addressing::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

fn mask(bit: u8) -> u8 {
    1 << (bit & 7)
}

fn branch_on_bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    bit: u8,
    operand: &Operand,
    when_set: bool,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let offset = cpu.branch_offset(operand)?;

    if (value & mask(bit) != 0) == when_set {
        cpu.branch(offset);
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Executes BBRb: branch if bit `bit` of the zero page byte is clear.
///
/// The offset is relative to the byte after the three-byte instruction. A
/// taken branch costs one extra cycle.
pub(crate) fn execute_bbr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    bit: u8,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    branch_on_bit(cpu, bit, operand, false)
}

/// Executes BBSb: branch if bit `bit` of the zero page byte is set.
pub(crate) fn execute_bbs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    bit: u8,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    branch_on_bit(cpu, bit, operand, true)
}

/// Executes RMBb: clear bit `bit` of the zero page byte.
pub(crate) fn execute_rmb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    bit: u8,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    cpu.write_operand(operand, value & !mask(bit))?;
    Ok(0)
}

/// Executes SMBb: set bit `bit` of the zero page byte.
pub(crate) fn execute_smb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    bit: u8,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    cpu.write_operand(operand, value | mask(bit))?;
    Ok(0)
}

/// Executes the TRB (Test and Reset Bits) instruction.
///
/// Z reflects `A & M` before the write; M becomes `M & !A`.
pub(crate) fn execute_trb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let a = cpu.regs.a;
    cpu.regs.set_flag(Status::ZERO, a & value == 0);
    cpu.write_operand(operand, value & !a)?;
    Ok(0)
}

/// Executes the TSB (Test and Set Bits) instruction.
///
/// Z reflects `A & M` before the write; M becomes `M | A`.
pub(crate) fn execute_tsb<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let value = cpu.read_operand(operand)?;
    let a = cpu.regs.a;
    cpu.regs.set_flag(Status::ZERO, a & value == 0);
    cpu.write_operand(operand, value | a)?;
    Ok(0)
}
