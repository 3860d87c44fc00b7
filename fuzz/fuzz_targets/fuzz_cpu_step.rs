//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file and memory image, then runs a few
//! instructions checking the accounting that must hold for every opcode.

#![no_main]

use arbitrary::Arbitrary;
use lib65c02::{decode, ExecutionError, FlatMemory, MemoryBus, Registers, Status, StepOutcome, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzRegisters {
    a: u8,
    x: u8,
    y: u8,
    pc: u16,
    sp: u8,
    status: u8,
}

/// Memory region for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instructions + operands)
    program: [u8; 16],
    /// Zero page contents
    zero_page: [u8; 256],
    /// Stack page contents
    stack_page: [u8; 256],
    /// IRQ/BRK vector
    irq_vector: u16,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    registers: FuzzRegisters,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0xFFFE, &input.memory.irq_vector.to_le_bytes());
    memory.load(input.registers.pc, &input.memory.program);

    let mut cpu = CPU::new(memory);
    cpu.set_registers(Registers {
        a: input.registers.a,
        x: input.registers.x,
        y: input.registers.y,
        pc: input.registers.pc,
        sp: input.registers.sp,
        p: Status::from_bits_retain(input.registers.status),
    });

    for _ in 0..4 {
        let pc = cpu.pc();
        let opcode = cpu.memory().read(pc);
        let before = cpu.cycles();

        match cpu.step() {
            Ok(StepOutcome::Executed { opcode: ran, cycles }) => {
                assert_eq!(ran, opcode);
                let base = decode(opcode).map(|i| i.cycles as u32).unwrap_or(0);
                assert!(cycles >= base && cycles <= base + 2);
                assert_eq!(cpu.cycles(), before + cycles as u64);
            }
            Ok(StepOutcome::Halted(_)) => {
                assert_eq!(cpu.pc(), pc);
                assert_eq!(cpu.cycles(), before);
                break;
            }
            Err(ExecutionError::IllegalOpcode { opcode: bad, address }) => {
                assert_eq!(bad, opcode);
                assert_eq!(address, pc);
                assert!(decode(bad).is_none());
                assert_eq!(cpu.pc(), pc.wrapping_add(1));
                break;
            }
            Err(err) => panic!("operand access failed: {err}"),
        }

        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
