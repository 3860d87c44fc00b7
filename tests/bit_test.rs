//! Tests for BIT, TRB and TSB.
//!
//! BIT sets Z from `A & M` and, for memory operands, copies bits 7 and 6 of M
//! into N and V. TRB and TSB set Z the same way, then clear or set the bits of
//! A in M.

use lib65c02::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, program);
    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x8000);
    cpu
}

// ========== BIT ==========

#[test]
fn test_bit_zero_page_copies_high_bits() {
    let mut cpu = setup_cpu(&[0x24, 0x10]);
    cpu.memory_mut().write(0x0010, 0xC0);
    cpu.set_a(0x01);

    cpu.step().unwrap();

    assert!(cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert_eq!(cpu.a(), 0x01);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_bit_absolute_clears_high_bits() {
    let mut cpu = setup_cpu(&[0x2C, 0x00, 0x30]);
    cpu.memory_mut().write(0x3000, 0x01);
    cpu.set_a(0x01);
    cpu.set_flag_n(true);
    cpu.set_flag_v(true);

    cpu.step().unwrap();

    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_bit_immediate_only_touches_zero() {
    let mut cpu = setup_cpu(&[0x89, 0xC0, 0x89, 0x3F]);
    cpu.set_a(0x01);

    cpu.step().unwrap();
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_v());

    cpu.set_flag_n(true);
    cpu.set_flag_v(true);
    cpu.step().unwrap();
    assert!(!cpu.flag_z());
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
}

#[test]
fn test_bit_absolute_x_page_cross() {
    let mut cpu = setup_cpu(&[0x3C, 0xFF, 0x30]);
    cpu.memory_mut().write(0x3100, 0x40);
    cpu.set_x(0x01);
    cpu.set_a(0xFF);

    cpu.step().unwrap();

    assert!(cpu.flag_v());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.cycles(), 5);
}

// ========== TSB / TRB ==========

#[test]
fn test_tsb_zero_page() {
    let mut cpu = setup_cpu(&[0x04, 0x20]);
    cpu.memory_mut().write(0x0020, 0x3C);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0020), 0x3F);
    assert!(!cpu.flag_z());
    assert_eq!(cpu.a(), 0x0F);
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_tsb_absolute_sets_zero_when_disjoint() {
    let mut cpu = setup_cpu(&[0x0C, 0x00, 0x30]);
    cpu.memory_mut().write(0x3000, 0xF0);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x3000), 0xFF);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_trb_zero_page() {
    let mut cpu = setup_cpu(&[0x14, 0x20]);
    cpu.memory_mut().write(0x0020, 0x3C);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0020), 0x30);
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 5);
}

#[test]
fn test_trb_absolute_disjoint_bits() {
    let mut cpu = setup_cpu(&[0x1C, 0x00, 0x30]);
    cpu.memory_mut().write(0x3000, 0xF0);
    cpu.set_a(0x0F);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x3000), 0xF0);
    assert!(cpu.flag_z());
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_trb_tsb_leave_n_and_v() {
    let mut cpu = setup_cpu(&[0x04, 0x20, 0x14, 0x20]);
    cpu.memory_mut().write(0x0020, 0x80);
    cpu.set_a(0x40);
    cpu.set_flag_n(false);
    cpu.set_flag_v(true);

    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0020), 0x80);
    assert!(!cpu.flag_n());
    assert!(cpu.flag_v());
}
