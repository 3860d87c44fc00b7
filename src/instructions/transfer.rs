//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX: Transfer Accumulator to X
//! - TAY: Transfer Accumulator to Y
//! - TXA: Transfer X to Accumulator
//! - TYA: Transfer Y to Accumulator
//! - TSX: Transfer Stack Pointer to X
//! - TXS: Transfer X to Stack Pointer
//!
//! Every transfer except TXS updates Z and N from the copied value.

use crate::{ExecutionError, MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.a;
    cpu.regs.load_x(value);
    Ok(0)
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.a;
    cpu.regs.load_y(value);
    Ok(0)
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.x;
    cpu.regs.load_a(value);
    Ok(0)
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.y;
    cpu.regs.load_a(value);
    Ok(0)
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    let value = cpu.regs.sp;
    cpu.regs.load_x(value);
    Ok(0)
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
///
/// The only transfer that leaves the flags alone.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<u32, ExecutionError> {
    cpu.regs.sp = cpu.regs.x;
    Ok(0)
}
