//! Tests for CMP, CPX and CPY.
//!
//! A compare sets C when the register is greater than or equal to the operand,
//! Z when they are equal, and N from bit 7 of the difference. The register is
//! never modified.

use lib65c02::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, program);
    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x8000);
    cpu
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu(&[0xC9, 0x42]);
    cpu.set_a(0x42);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.a(), 0x42);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_cmp_register_greater() {
    let mut cpu = setup_cpu(&[0xC9, 0x10]);
    cpu.set_a(0x30);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_register_less() {
    let mut cpu = setup_cpu(&[0xC9, 0x20]);
    cpu.set_a(0x10);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_cmp_unsigned_ordering() {
    // 0x80 is above 0x7F unsigned even though the difference is positive.
    let mut cpu = setup_cpu(&[0xC9, 0x7F]);
    cpu.set_a(0x80);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

#[test]
fn test_cmp_leaves_overflow_alone() {
    let mut cpu = setup_cpu(&[0xC9, 0x01]);
    cpu.set_a(0x80);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(cpu.flag_v());
}

#[test]
fn test_cmp_zero_page_indirect_y() {
    let mut cpu = setup_cpu(&[0xD1, 0x05]);
    cpu.memory_mut().load(0x0005, &[0x05, 0x10]);
    cpu.memory_mut().write(0x1015, 0xAA);
    cpu.set_y(0x10);
    cpu.set_a(0xAA);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_cpx_immediate() {
    let mut cpu = setup_cpu(&[0xE0, 0x05]);
    cpu.set_x(0x05);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert_eq!(cpu.x(), 0x05);
}

#[test]
fn test_cpx_absolute() {
    let mut cpu = setup_cpu(&[0xEC, 0x0F, 0x20]);
    cpu.memory_mut().write(0x200F, 0xF9);
    cpu.set_x(0xF8);

    cpu.step().unwrap();

    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_cpy_zero_page() {
    let mut cpu = setup_cpu(&[0xC4, 0x03]);
    cpu.memory_mut().write(0x0003, 0x01);
    cpu.set_y(0x02);

    cpu.step().unwrap();

    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 3);
}
