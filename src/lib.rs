//! # W65C02S CPU Emulator Core
//!
//! A cycle-counting emulator of the WDC W65C02S, the CMOS 6502 with the
//! Rockwell bit-manipulation extensions (`BBRb`/`BBSb`/`RMBb`/`SMBb`) and the
//! `WAI`/`STP` low-power instructions.
//!
//! The core decodes and executes one instruction per [`CPU::step`] against any
//! [`MemoryBus`], returning the cycles the instruction consumed.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib65c02::{CPU, FlatMemory, StepOutcome};
//!
//! let mut memory = FlatMemory::new();
//! // LDA #$FA; AND #$AF; CMP #$AA
//! memory.load(0x2000, &[0xA9, 0xFA, 0x29, 0xAF, 0xC9, 0xAA]);
//!
//! let mut cpu = CPU::new(memory);
//! cpu.set_pc(0x2000);
//!
//! for _ in 0..3 {
//!     assert!(matches!(cpu.step(), Ok(StepOutcome::Executed { .. })));
//! }
//!
//! assert_eq!(cpu.a(), 0xAA);
//! assert!(cpu.flag_z());
//! assert!(cpu.flag_c());
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the step engine
//! - `registers` - register file and status flag set
//! - `memory` - MemoryBus trait and a flat 64 KiB implementation
//! - `opcodes` - compile-time decode table
//! - `addressing` - addressing modes and operand handles

pub mod addressing;
pub mod cpu;
pub mod memory;
pub mod opcodes;
pub mod registers;

// Internal instruction implementations (not part of public API)
mod instructions;

pub use addressing::{Access, AddressingMode, Capabilities, Operand};
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{decode, Instruction, Operation, OPCODE_TABLE};
pub use registers::{Registers, Status, RESET_SP};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// NMI vector. Not used by the core; exported for hosts layering interrupts.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector. Not used by the core; exported for hosts layering reset.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionError {
    /// The fetched byte has no decode table entry.
    ///
    /// PC has already moved past the byte; nothing else changed.
    #[error("illegal opcode 0x{opcode:02X} at 0x{address:04X}")]
    IllegalOpcode { opcode: u8, address: u16 },

    /// An operation asked its operand for an access the addressing mode does
    /// not provide.
    #[error("operand {operand:?} does not support {access} access")]
    UnsupportedAccess { operand: Operand, access: Access },
}

/// Execution state between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunState {
    /// Fetching and executing instructions.
    #[default]
    Running,
    /// Idle after `WAI` until [`CPU::wake`] or [`CPU::reset`].
    Waiting,
    /// Stopped after `STP` until [`CPU::reset`].
    Stopped,
}

/// Successful result of [`CPU::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction ran to completion.
    Executed { opcode: u8, cycles: u32 },
    /// The CPU is idle; nothing was fetched and no cycles elapsed.
    Halted(RunState),
}

impl StepOutcome {
    /// Cycles consumed by this step, zero when halted.
    pub fn cycles(&self) -> u32 {
        match self {
            StepOutcome::Executed { cycles, .. } => *cycles,
            StepOutcome::Halted(_) => 0,
        }
    }
}
