//! # CPU State and Execution
//!
//! This module contains the CPU struct and the fetch-decode-execute step.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: A, X, Y, PC, SP and the status flags (see [`Registers`])
//! - **Run state**: running, waiting after `WAI`, or stopped after `STP`
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Execution Model
//!
//! - `step()`: Execute one instruction, or report that the CPU is halted
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted
//!
//! Operand bytes are consumed while resolving the addressing mode, so by the
//! time an instruction runs PC already points at the next opcode.

use log::{debug, trace, warn};

use crate::addressing::{Access, AddressingMode, Operand};
use crate::instructions;
use crate::opcodes::decode;
use crate::registers::{Registers, Status};
use crate::{ExecutionError, MemoryBus, RunState, StepOutcome, STACK_BASE};

/// W65C02S CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. Pass
/// `&mut memory` instead of `memory` to keep ownership on the caller side.
///
/// # Examples
///
/// ```
/// use lib65c02::{CPU, FlatMemory};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x0000);
/// assert_eq!(cpu.sp(), 0xFF);
/// assert_eq!(cpu.status(), 0b0010_0000);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    pub(crate) regs: Registers,

    pub(crate) state: RunState,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU in its power-on state attached to `memory`.
    ///
    /// A, X, Y and PC are zero, SP is [`crate::RESET_SP`], every flag is clear.
    /// Memory is left untouched.
    pub fn new(memory: M) -> Self {
        Self {
            regs: Registers::default(),
            state: RunState::Running,
            cycles: 0,
            memory,
        }
    }

    /// Restores power-on register state and clears the cycle counter.
    ///
    /// Memory contents and the decode table are not touched. Calling it twice
    /// is the same as calling it once.
    pub fn reset(&mut self) {
        self.regs.reset();
        self.state = RunState::Running;
        self.cycles = 0;
        debug!("cpu reset");
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// Performs the fetch-decode-execute cycle:
    /// 1. Fetch opcode byte at PC, incrementing PC
    /// 2. Look it up in the decode table
    /// 3. Resolve the addressing mode, consuming operand bytes
    /// 4. Execute the operation
    ///
    /// # Returns
    ///
    /// - `Ok(StepOutcome::Executed { .. })` with the cycles consumed
    /// - `Ok(StepOutcome::Halted(state))` if the CPU is waiting or stopped;
    ///   nothing is fetched
    /// - `Err(ExecutionError::IllegalOpcode { .. })` if the byte has no table
    ///   entry; PC has moved past it and nothing else changed
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::{CPU, ExecutionError, FlatMemory, MemoryBus, StepOutcome};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0x0000, 0xEA); // NOP
    /// mem.write(0x0001, 0x02); // unassigned
    ///
    /// let mut cpu = CPU::new(mem);
    ///
    /// assert_eq!(cpu.step(), Ok(StepOutcome::Executed { opcode: 0xEA, cycles: 2 }));
    /// assert_eq!(
    ///     cpu.step(),
    ///     Err(ExecutionError::IllegalOpcode { opcode: 0x02, address: 0x0001 })
    /// );
    /// assert_eq!(cpu.pc(), 0x0002);
    /// ```
    pub fn step(&mut self) -> Result<StepOutcome, ExecutionError> {
        if self.state != RunState::Running {
            return Ok(StepOutcome::Halted(self.state));
        }

        let address = self.regs.pc;
        let opcode = self.fetch_byte();

        let Some(instruction) = decode(opcode) else {
            warn!("illegal opcode 0x{:02X} at 0x{:04X}", opcode, address);
            return Err(ExecutionError::IllegalOpcode { opcode, address });
        };

        let operand = self.resolve(instruction.mode);

        let mut cycles = instruction.cycles as u32;
        if instruction.operation.pays_page_cross() {
            cycles += operand.page_penalty();
        }
        cycles += instructions::execute(self, instruction.operation, &operand)?;

        self.cycles += cycles as u64;

        trace!(
            "{:04X}  {:02X}  {} {:?}  cycles={} a={:02X} x={:02X} y={:02X} sp={:02X} p={:08b}",
            address,
            opcode,
            instruction.mnemonic(),
            instruction.mode,
            cycles,
            self.regs.a,
            self.regs.x,
            self.regs.y,
            self.regs.sp,
            self.regs.status_byte()
        );

        Ok(StepOutcome::Executed { opcode, cycles })
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until the cycle budget is met, the CPU halts, or
    /// an instruction fails. Returns the number of cycles actually consumed,
    /// which may overshoot the budget by part of an instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65c02::{CPU, FlatMemory};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.load(0x0000, &[0xEA; 16]); // NOPs, 2 cycles each
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(10), Ok(10));
    /// assert_eq!(cpu.pc(), 0x0005);
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let mut consumed = 0u64;

        while consumed < cycle_budget {
            match self.step()? {
                StepOutcome::Executed { cycles, .. } => consumed += cycles as u64,
                StepOutcome::Halted(_) => break,
            }
        }

        Ok(consumed)
    }

    /// Releases a CPU waiting after `WAI`.
    ///
    /// Returns true if the CPU was waiting. A stopped CPU stays stopped.
    pub fn wake(&mut self) -> bool {
        if self.state == RunState::Waiting {
            self.state = RunState::Running;
            debug!("cpu woken at 0x{:04X}", self.regs.pc);
            true
        } else {
            false
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub(crate) fn halt(&mut self, state: RunState) {
        debug!("cpu {:?} at 0x{:04X}", state, self.regs.pc);
        self.state = state;
    }

    // ========== Operand Resolution ==========

    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word; the high byte address wraps at 0xFFFF.
    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.memory.read(addr) as u16;
        let hi = self.memory.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a pointer stored in page zero; the high byte wraps within page zero.
    fn read_zero_page_word(&self, zp: u8) -> u16 {
        let lo = self.memory.read(zp as u16) as u16;
        let hi = self.memory.read(zp.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    fn indexed(base: u16, index: u8) -> Operand {
        let address = base.wrapping_add(index as u16);
        Operand::Memory {
            address,
            page_crossed: (base & 0xFF00) != (address & 0xFF00),
        }
    }

    /// Resolves `mode` into an operand handle, consuming its operand bytes.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Operand {
        let direct = |address: u16| Operand::Memory {
            address,
            page_crossed: false,
        };

        match mode {
            AddressingMode::Implied | AddressingMode::Stack => Operand::None,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => Operand::Immediate(self.fetch_byte()),
            AddressingMode::Relative => Operand::Relative(self.fetch_byte() as i8),
            AddressingMode::ZeroPageRelative => {
                let address = self.fetch_byte() as u16;
                let offset = self.fetch_byte() as i8;
                Operand::ZeroPageRelative { address, offset }
            }
            AddressingMode::Absolute => direct(self.fetch_word()),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                Self::indexed(base, self.regs.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                Self::indexed(base, self.regs.y)
            }
            AddressingMode::AbsoluteIndirect => {
                let pointer = self.fetch_word();
                direct(self.read_word(pointer))
            }
            AddressingMode::AbsoluteIndexedIndirect => {
                let pointer = self.fetch_word().wrapping_add(self.regs.x as u16);
                direct(self.read_word(pointer))
            }
            AddressingMode::ZeroPage => direct(self.fetch_byte() as u16),
            AddressingMode::ZeroPageX => {
                direct(self.fetch_byte().wrapping_add(self.regs.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                direct(self.fetch_byte().wrapping_add(self.regs.y) as u16)
            }
            AddressingMode::ZeroPageXIndirect => {
                let zp = self.fetch_byte().wrapping_add(self.regs.x);
                direct(self.read_zero_page_word(zp))
            }
            AddressingMode::ZeroPageIndirect => {
                let zp = self.fetch_byte();
                direct(self.read_zero_page_word(zp))
            }
            AddressingMode::ZeroPageIndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                Self::indexed(base, self.regs.y)
            }
        }
    }

    /// Reads the operand value.
    pub(crate) fn read_operand(&self, operand: &Operand) -> Result<u8, ExecutionError> {
        match *operand {
            Operand::Accumulator => Ok(self.regs.a),
            Operand::Immediate(value) => Ok(value),
            Operand::Memory { address, .. } | Operand::ZeroPageRelative { address, .. } => {
                Ok(self.memory.read(address))
            }
            Operand::None | Operand::Relative(_) => Err(ExecutionError::UnsupportedAccess {
                operand: *operand,
                access: Access::Read,
            }),
        }
    }

    /// Writes a result back through the operand.
    ///
    /// Accumulator writes store A without touching flags; the calling
    /// instruction owns its flag rules.
    pub(crate) fn write_operand(&mut self, operand: &Operand, value: u8) -> Result<(), ExecutionError> {
        match *operand {
            Operand::Accumulator => {
                self.regs.a = value;
                Ok(())
            }
            Operand::Memory { address, .. } => {
                self.memory.write(address, value);
                Ok(())
            }
            _ => Err(ExecutionError::UnsupportedAccess {
                operand: *operand,
                access: Access::Write,
            }),
        }
    }

    /// Effective address of a memory operand.
    pub(crate) fn operand_address(&self, operand: &Operand) -> Result<u16, ExecutionError> {
        match *operand {
            Operand::Memory { address, .. } => Ok(address),
            _ => Err(ExecutionError::UnsupportedAccess {
                operand: *operand,
                access: Access::Address,
            }),
        }
    }

    /// Signed branch offset carried by a relative operand.
    pub(crate) fn branch_offset(&self, operand: &Operand) -> Result<i8, ExecutionError> {
        match *operand {
            Operand::Relative(offset) | Operand::ZeroPageRelative { offset, .. } => Ok(offset),
            _ => Err(ExecutionError::UnsupportedAccess {
                operand: *operand,
                access: Access::Branch,
            }),
        }
    }

    /// Adds a sign-extended offset to PC.
    pub(crate) fn branch(&mut self, offset: i8) {
        self.regs.pc = self.regs.pc.wrapping_add_signed(offset as i16);
    }

    // ========== Stack ==========

    /// Stores at the stack pointer, then decrements it.
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.regs.sp as u16, value);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
    }

    /// Increments the stack pointer, then loads from it.
    pub(crate) fn pull(&mut self) -> u8 {
        self.regs.sp = self.regs.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.regs.sp as u16)
    }

    /// Pushes a word high byte first.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push((value & 0xFF) as u8);
    }

    /// Pulls a word low byte first.
    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    // ========== Register Access ==========

    /// Returns a snapshot of every register.
    pub fn registers(&self) -> Registers {
        self.regs
    }

    /// Replaces every register with `registers`.
    pub fn set_registers(&mut self, registers: Registers) {
        self.regs = registers;
    }

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.regs.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.regs.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.regs.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.regs.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP. The stack grows downward.
    pub fn sp(&self) -> u8 {
        self.regs.sp
    }

    /// Returns the status register as a packed byte, `N V 1 B D I Z C`.
    ///
    /// Bit 5 always reads as 1.
    pub fn status(&self) -> u8 {
        self.regs.status_byte()
    }

    /// Returns the total number of CPU cycles executed since construction or
    /// the last reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sets the accumulator without touching flags.
    pub fn set_a(&mut self, value: u8) {
        self.regs.a = value;
    }

    /// Sets X without touching flags.
    pub fn set_x(&mut self, value: u8) {
        self.regs.x = value;
    }

    /// Sets Y without touching flags.
    pub fn set_y(&mut self, value: u8) {
        self.regs.y = value;
    }

    /// Sets the program counter; the next `step()` fetches from `value`.
    pub fn set_pc(&mut self, value: u16) {
        self.regs.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.regs.sp = value;
    }

    /// Replaces the status register from a packed byte.
    pub fn set_status(&mut self, value: u8) {
        self.regs.set_status_byte(value);
    }

    // ========== Status Flags ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.regs.flag(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.regs.flag(Status::OVERFLOW)
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.regs.flag(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.regs.flag(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.regs.flag(Status::IRQ_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.regs.flag(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.regs.flag(Status::CARRY)
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.regs.set_flag(Status::NEGATIVE, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.regs.set_flag(Status::OVERFLOW, value);
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.regs.set_flag(Status::BREAK, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.regs.set_flag(Status::DECIMAL, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.regs.set_flag(Status::IRQ_DISABLE, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.regs.set_flag(Status::ZERO, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.regs.set_flag(Status::CARRY, value);
    }

    // ========== Memory Access ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Detaches the memory bus from the CPU.
    pub fn into_memory(self) -> M {
        self.memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn cpu_with(program: &[u8]) -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.load(0x2000, program);
        let mut cpu = CPU::new(mem);
        cpu.set_pc(0x2000);
        cpu
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.run_state(), RunState::Running);

        assert!(!cpu.flag_i());
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(!cpu.flag_d());
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_c());
        assert_eq!(cpu.status(), 0x20);
    }

    #[test]
    fn test_resolve_zero_page_x_wraps_in_page_zero() {
        let mut cpu = cpu_with(&[0xF0]);
        cpu.set_x(0x20);
        let operand = cpu.resolve(AddressingMode::ZeroPageX);
        assert_eq!(
            operand,
            Operand::Memory {
                address: 0x0010,
                page_crossed: false
            }
        );
        assert_eq!(cpu.pc(), 0x2001);
    }

    #[test]
    fn test_resolve_absolute_x_reports_page_cross() {
        let mut cpu = cpu_with(&[0xF0, 0x10]);
        cpu.set_x(0x20);
        let operand = cpu.resolve(AddressingMode::AbsoluteX);
        assert_eq!(
            operand,
            Operand::Memory {
                address: 0x1110,
                page_crossed: true
            }
        );
        assert_eq!(cpu.pc(), 0x2002);
    }

    #[test]
    fn test_resolve_indirect_y_wraps_sixteen_bits() {
        let mut cpu = cpu_with(&[0x40]);
        cpu.memory_mut().load(0x0040, &[0xF0, 0xFF]);
        cpu.set_y(0x20);
        let operand = cpu.resolve(AddressingMode::ZeroPageIndirectY);
        assert_eq!(
            operand,
            Operand::Memory {
                address: 0x0010,
                page_crossed: true
            }
        );
    }

    #[test]
    fn test_resolve_zero_page_pointer_wraps() {
        let mut cpu = cpu_with(&[0xFF]);
        cpu.memory_mut().write(0x00FF, 0x34);
        cpu.memory_mut().write(0x0000, 0x12);
        cpu.memory_mut().write(0x0100, 0x99);
        let operand = cpu.resolve(AddressingMode::ZeroPageIndirect);
        assert_eq!(cpu.operand_address(&operand), Ok(0x1234));
    }

    #[test]
    fn test_resolve_zero_page_relative_consumes_two_bytes() {
        let mut cpu = cpu_with(&[0x42, 0xFE]);
        let operand = cpu.resolve(AddressingMode::ZeroPageRelative);
        assert_eq!(
            operand,
            Operand::ZeroPageRelative {
                address: 0x0042,
                offset: -2
            }
        );
        assert_eq!(cpu.pc(), 0x2002);
    }

    #[test]
    fn test_unsupported_access_is_reported() {
        let mut cpu = cpu_with(&[]);
        assert_eq!(
            cpu.read_operand(&Operand::Relative(4)),
            Err(ExecutionError::UnsupportedAccess {
                operand: Operand::Relative(4),
                access: Access::Read
            })
        );
        assert!(cpu.write_operand(&Operand::Immediate(1), 0).is_err());
        assert!(cpu.branch_offset(&Operand::Accumulator).is_err());
        assert!(cpu.operand_address(&Operand::None).is_err());
    }

    #[test]
    fn test_stack_push_pull_symmetry() {
        let mut cpu = cpu_with(&[]);
        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFE);
        assert_eq!(cpu.memory().read(0x01FF), 0xAB);
        assert_eq!(cpu.pull(), 0xAB);
        assert_eq!(cpu.sp(), 0xFF);
    }

    #[test]
    fn test_stack_pointer_wraps() {
        let mut cpu = cpu_with(&[]);
        cpu.set_sp(0x00);
        cpu.push(0x11);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().read(0x0100), 0x11);
        assert_eq!(cpu.pull(), 0x11);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_step_illegal_opcode() {
        let mut cpu = cpu_with(&[0x02]);
        cpu.set_a(0x12);

        assert_eq!(
            cpu.step(),
            Err(ExecutionError::IllegalOpcode {
                opcode: 0x02,
                address: 0x2000
            })
        );
        assert_eq!(cpu.pc(), 0x2001);
        assert_eq!(cpu.a(), 0x12);
        assert_eq!(cpu.cycles(), 0);
    }

    #[test]
    fn test_halted_step_fetches_nothing() {
        let mut cpu = cpu_with(&[0xDB, 0xEA]);
        assert_eq!(
            cpu.step(),
            Ok(StepOutcome::Executed {
                opcode: 0xDB,
                cycles: 3
            })
        );
        assert_eq!(cpu.step(), Ok(StepOutcome::Halted(RunState::Stopped)));
        assert_eq!(cpu.pc(), 0x2001);
        assert_eq!(cpu.cycles(), 3);
    }

    #[test]
    fn test_wake_only_releases_wait() {
        let mut cpu = cpu_with(&[0xCB, 0xEA]);
        cpu.step().unwrap();
        assert_eq!(cpu.run_state(), RunState::Waiting);
        assert!(cpu.wake());
        assert_eq!(cpu.run_state(), RunState::Running);
        assert!(!cpu.wake());

        cpu.halt(RunState::Stopped);
        assert!(!cpu.wake());
        assert_eq!(cpu.run_state(), RunState::Stopped);
    }

    #[test]
    fn test_run_for_cycles_stops_when_halted() {
        let mut cpu = cpu_with(&[0xEA, 0xEA, 0xCB, 0xEA]);
        assert_eq!(cpu.run_for_cycles(100), Ok(7));
        assert_eq!(cpu.run_state(), RunState::Waiting);
    }

    #[test]
    fn test_reset_keeps_memory() {
        let mut cpu = cpu_with(&[0xA9, 0x80]);
        cpu.step().unwrap();
        cpu.reset();
        assert_eq!(cpu.registers(), Registers::default());
        assert_eq!(cpu.cycles(), 0);
        assert_eq!(cpu.memory().read(0x2000), 0xA9);
    }
}
