//! # Memory Bus Abstraction
//!
//! The CPU never owns a concrete memory layout. It reads and writes through the
//! `MemoryBus` trait, so a host can back the 64 KiB address space with a flat
//! array, a ROM/RAM split or a memory-mapped device bus.
//!
//! ## Design Principles
//!
//! - Addresses are `u16`, so every access already wraps modulo 0x10000
//! - No bus errors: reads and writes always succeed
//! - Memory lifetime belongs to the caller; the CPU accepts `&mut T` as well
//!   as an owned bus

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use lib65c02::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib65c02::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         // ROM writes are dropped
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic. Unmapped addresses may return any value.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic. Read-only or unmapped addresses may ignore the write.
    fn write(&mut self, addr: u16, value: u8);
}

impl<T: MemoryBus + ?Sized> MemoryBus for &mut T {
    fn read(&self, addr: u16) -> u8 {
        (**self).read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        (**self).write(addr, value);
    }
}

/// Simple 64KB flat memory implementation.
///
/// All 65536 addresses are writable RAM, initialized to 0x00.
///
/// # Examples
///
/// ```
/// use lib65c02::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(0x2000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_pc(0x2000);
/// cpu.step().unwrap();
/// assert_eq!(cpu.a(), 0x42);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 0x10000]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 0x10000]),
        }
    }

    /// Fills the whole address space with zero.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }

    /// Copies `bytes` into memory starting at `addr`.
    ///
    /// The destination address wraps past 0xFFFF back to 0x0000.
    ///
    /// ```
    /// use lib65c02::{FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0xFFFF, &[0x11, 0x22]);
    /// assert_eq!(mem.read(0xFFFF), 0x11);
    /// assert_eq!(mem.read(0x0000), 0x22);
    /// ```
    pub fn load(&mut self, addr: u16, bytes: &[u8]) {
        let mut target = addr;
        for &byte in bytes {
            self.data[target as usize] = byte;
            target = target.wrapping_add(1);
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
