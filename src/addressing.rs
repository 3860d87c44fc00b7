//! # Addressing Modes
//!
//! The W65C02S datasheet lists sixteen addressing modes plus the implicit
//! stack mode. Each mode is described here by static metadata (instruction
//! length, base cycle cost, extra cost of a write-back, and which operand
//! capabilities it offers). The CPU turns a mode into an [`Operand`] handle by
//! consuming the operand bytes that follow the opcode; instructions only ever
//! see that handle.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Operand capabilities an addressing mode can offer.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// Operand value can be read.
        const READ = 0b0001;
        /// Result can be written back.
        const WRITE = 0b0010;
        /// A signed branch offset is encoded.
        const OFFSET = 0b0100;
        /// The offset can be applied to PC.
        const BRANCH = 0b1000;
    }
}

/// W65C02S addressing mode.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator, Stack
/// - **1 byte**: Immediate, Relative, ZeroPage and its indexed/indirect forms
/// - **2 bytes**: Absolute and its indexed/indirect forms, ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// `a`: full 16-bit address.
    Absolute,

    /// `(a,x)`: X added to a 16-bit pointer, then dereferenced. JMP only.
    AbsoluteIndexedIndirect,

    /// `a,x`: 16-bit address plus X.
    ///
    /// Reads pay one extra cycle when the index crosses a page.
    AbsoluteX,

    /// `a,y`: 16-bit address plus Y.
    ///
    /// Reads pay one extra cycle when the index crosses a page.
    AbsoluteY,

    /// `(a)`: 16-bit pointer dereferenced. JMP only.
    ///
    /// Unlike the NMOS 6502 the pointer's high byte is fetched across a page
    /// boundary correctly.
    AbsoluteIndirect,

    /// `A`: operates on the accumulator.
    Accumulator,

    /// `#`: constant byte following the opcode.
    Immediate,

    /// `i`: no operand.
    Implied,

    /// `r`: signed 8-bit branch offset.
    Relative,

    /// `zp,r`: zero page address followed by a signed branch offset (BBRb/BBSb).
    ZeroPageRelative,

    /// `s`: implicit stack access. Push/pull behavior lives in the operation.
    Stack,

    /// `zp`: 8-bit address in page zero.
    ZeroPage,

    /// `(zp,x)`: zero page address plus X (wrapping in page zero), dereferenced.
    ZeroPageXIndirect,

    /// `zp,x`: zero page address plus X, wrapping in page zero.
    ZeroPageX,

    /// `zp,y`: zero page address plus Y, wrapping in page zero.
    ZeroPageY,

    /// `(zp)`: zero page pointer dereferenced.
    ZeroPageIndirect,

    /// `(zp),y`: zero page pointer dereferenced, then Y added.
    ///
    /// Reads pay one extra cycle when the index crosses a page.
    ZeroPageIndirectY,
}

impl AddressingMode {
    /// Every addressing mode, in datasheet order.
    pub const ALL: [AddressingMode; 17] = [
        AddressingMode::Absolute,
        AddressingMode::AbsoluteIndexedIndirect,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::AbsoluteIndirect,
        AddressingMode::Accumulator,
        AddressingMode::Immediate,
        AddressingMode::Implied,
        AddressingMode::Relative,
        AddressingMode::ZeroPageRelative,
        AddressingMode::Stack,
        AddressingMode::ZeroPage,
        AddressingMode::ZeroPageXIndirect,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::ZeroPageIndirect,
        AddressingMode::ZeroPageIndirectY,
    ];

    /// Total instruction length in bytes, opcode included.
    pub const fn size_bytes(self) -> u8 {
        match self {
            AddressingMode::Accumulator | AddressingMode::Implied | AddressingMode::Stack => 1,
            AddressingMode::Immediate
            | AddressingMode::Relative
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageXIndirect
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::ZeroPageIndirect
            | AddressingMode::ZeroPageIndirectY => 2,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteIndexedIndirect
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::AbsoluteIndirect
            | AddressingMode::ZeroPageRelative => 3,
        }
    }

    /// Base cycle cost of an instruction that reads through this mode.
    ///
    /// Page-crossing, branch and decimal-mode penalties are added at execution
    /// time.
    pub const fn base_cycles(self) -> u8 {
        match self {
            AddressingMode::Accumulator
            | AddressingMode::Immediate
            | AddressingMode::Implied
            | AddressingMode::Relative => 2,
            AddressingMode::ZeroPage | AddressingMode::Stack => 3,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY => 4,
            AddressingMode::ZeroPageRelative
            | AddressingMode::ZeroPageIndirect
            | AddressingMode::ZeroPageIndirectY => 5,
            AddressingMode::AbsoluteIndexedIndirect
            | AddressingMode::AbsoluteIndirect
            | AddressingMode::ZeroPageXIndirect => 6,
        }
    }

    /// Extra cycles a read-modify-write instruction pays for writing back.
    pub const fn write_extra_cycles(self) -> u8 {
        match self {
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX => 2,
            _ => 0,
        }
    }

    /// Operand capabilities offered by this mode.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Accumulator
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageXIndirect
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::ZeroPageIndirect
            | AddressingMode::ZeroPageIndirectY => {
                Capabilities::READ.union(Capabilities::WRITE)
            }
            AddressingMode::AbsoluteIndexedIndirect
            | AddressingMode::AbsoluteIndirect
            | AddressingMode::Immediate => Capabilities::READ,
            AddressingMode::Relative => Capabilities::OFFSET.union(Capabilities::BRANCH),
            AddressingMode::ZeroPageRelative => Capabilities::READ
                .union(Capabilities::OFFSET)
                .union(Capabilities::BRANCH),
            AddressingMode::Implied | AddressingMode::Stack => Capabilities::empty(),
        }
    }

    /// Returns true if reads through this mode can cross a page and pay for it.
    pub const fn indexes_across_pages(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::ZeroPageIndirectY
        )
    }
}

/// Operand handle bound to one instruction execution.
///
/// Produced by resolving an [`AddressingMode`] against the current PC and
/// index registers; all operand bytes have already been consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// No operand.
    None,
    /// The accumulator register.
    Accumulator,
    /// Constant byte taken from the instruction stream.
    Immediate(u8),
    /// Effective memory address. `page_crossed` is set when indexing moved the
    /// address onto a different page than the unindexed base.
    Memory { address: u16, page_crossed: bool },
    /// Signed branch offset.
    Relative(i8),
    /// Zero page address to test plus a signed branch offset.
    ZeroPageRelative { address: u16, offset: i8 },
}

impl Operand {
    /// Extra cycle owed for an indexed access that crossed a page.
    pub fn page_penalty(&self) -> u32 {
        match self {
            Operand::Memory {
                page_crossed: true, ..
            } => 1,
            _ => 0,
        }
    }
}

/// Kind of access an instruction asked of an [`Operand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Address,
    Branch,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Access::Read => "read",
            Access::Write => "write",
            Access::Address => "address",
            Access::Branch => "branch",
        };
        f.write_str(name)
    }
}
