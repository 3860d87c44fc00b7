//! # Registers and Status Flags
//!
//! The W65C02S programmer-visible state: accumulator, two index registers,
//! program counter, stack pointer and the processor status register.
//!
//! Status is kept as a [`Status`] bit-flag set. Bit 5 has no storage on the
//! real part and always reads back as 1, so [`Registers::status_byte`] forces
//! it on regardless of what was stored.

use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// Processor status flags, laid out as `N V 1 B D I Z C` (bit 7..bit 0).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Status: u8 {
        /// Carry
        const CARRY = 0b0000_0001;
        /// Zero
        const ZERO = 0b0000_0010;
        /// Interrupt disable
        const IRQ_DISABLE = 0b0000_0100;
        /// Decimal (BCD) arithmetic
        const DECIMAL = 0b0000_1000;
        /// Break
        const BREAK = 0b0001_0000;
        /// Unused, always reads as 1
        const UNUSED = 0b0010_0000;
        /// Overflow
        const OVERFLOW = 0b0100_0000;
        /// Negative
        const NEGATIVE = 0b1000_0000;
    }
}

/// Stack pointer value after power-on or [`Registers::reset`].
pub const RESET_SP: u8 = 0xFF;

/// Snapshot of every W65C02S register.
///
/// `Registers` is `Copy`; [`crate::CPU::registers`] hands out a snapshot and
/// [`crate::CPU::set_registers`] installs one.
///
/// # Examples
///
/// ```
/// use lib65c02::{Registers, Status};
///
/// let mut regs = Registers::default();
/// regs.load_a(0x80);
///
/// assert_eq!(regs.a, 0x80);
/// assert!(regs.p.contains(Status::NEGATIVE));
/// assert_eq!(regs.status_byte(), 0b1010_0000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Registers {
    /// Accumulator
    pub a: u8,
    /// X index register
    pub x: u8,
    /// Y index register
    pub y: u8,
    /// Program counter
    pub pc: u16,
    /// Stack pointer, offset into page 1
    pub sp: u8,
    /// Processor status
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: RESET_SP,
            p: Status::empty(),
        }
    }
}

impl Registers {
    /// Restores power-on defaults: A, X, Y and PC zeroed, SP at [`RESET_SP`],
    /// every flag cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Recomputes N and Z from `value`.
    pub fn update_nz(&mut self, value: u8) {
        self.p.set(Status::NEGATIVE, value & 0x80 != 0);
        self.p.set(Status::ZERO, value == 0);
    }

    /// Writes A and recomputes N/Z.
    pub fn load_a(&mut self, value: u8) {
        self.a = value;
        self.update_nz(value);
    }

    /// Writes X and recomputes N/Z.
    pub fn load_x(&mut self, value: u8) {
        self.x = value;
        self.update_nz(value);
    }

    /// Writes Y and recomputes N/Z.
    pub fn load_y(&mut self, value: u8) {
        self.y = value;
        self.update_nz(value);
    }

    /// Returns the composite status byte with bit 5 forced to 1.
    pub fn status_byte(&self) -> u8 {
        (self.p | Status::UNUSED).bits()
    }

    /// Replaces every flag from a composite status byte, B and bit 5 included.
    pub fn set_status_byte(&mut self, value: u8) {
        self.p = Status::from_bits_retain(value);
    }

    pub fn flag(&self, flag: Status) -> bool {
        self.p.contains(flag)
    }

    pub fn set_flag(&mut self, flag: Status, value: bool) {
        self.p.set(flag, value);
    }
}
