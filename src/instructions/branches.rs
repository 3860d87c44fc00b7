//! # Branch Instructions
//!
//! This module implements relative branch operations:
//! - BCC / BCS: Branch on Carry clear / set
//! - BNE / BEQ: Branch on Zero clear / set
//! - BPL / BMI: Branch on Negative clear / set
//! - BVC / BVS: Branch on Overflow clear / set
//! - BRA: Branch always
//!
//! All branches use a signed 8-bit offset relative to the address of the next
//! instruction. A taken branch costs one cycle more than the table entry.
//! No flags are affected.

use crate::addressing::Operand;
use crate::registers::Status;
use crate::{ExecutionError, MemoryBus, CPU};

fn branch_if<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
    condition: bool,
) -> Result<u32, ExecutionError> {
    let offset = cpu.branch_offset(operand)?;

    if condition {
        cpu.branch(offset);
        Ok(1)
    } else {
        Ok(0)
    }
}

/// Executes the BCC (Branch if Carry Clear) instruction.
pub(crate) fn execute_bcc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = !cpu.regs.flag(Status::CARRY);
    branch_if(cpu, operand, taken)
}

/// Executes the BCS (Branch if Carry Set) instruction.
pub(crate) fn execute_bcs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = cpu.regs.flag(Status::CARRY);
    branch_if(cpu, operand, taken)
}

/// Executes the BEQ (Branch if Equal) instruction.
pub(crate) fn execute_beq<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = cpu.regs.flag(Status::ZERO);
    branch_if(cpu, operand, taken)
}

/// Executes the BNE (Branch if Not Equal) instruction.
pub(crate) fn execute_bne<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = !cpu.regs.flag(Status::ZERO);
    branch_if(cpu, operand, taken)
}

/// Executes the BMI (Branch if Minus) instruction.
pub(crate) fn execute_bmi<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = cpu.regs.flag(Status::NEGATIVE);
    branch_if(cpu, operand, taken)
}

/// Executes the BPL (Branch if Positive) instruction.
pub(crate) fn execute_bpl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = !cpu.regs.flag(Status::NEGATIVE);
    branch_if(cpu, operand, taken)
}

/// Executes the BVC (Branch if Overflow Clear) instruction.
pub(crate) fn execute_bvc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = !cpu.regs.flag(Status::OVERFLOW);
    branch_if(cpu, operand, taken)
}

/// Executes the BVS (Branch if Overflow Set) instruction.
pub(crate) fn execute_bvs<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    let taken = cpu.regs.flag(Status::OVERFLOW);
    branch_if(cpu, operand, taken)
}

/// Executes the BRA (Branch Always) instruction.
pub(crate) fn execute_bra<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    branch_if(cpu, operand, true)
}
