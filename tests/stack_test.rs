//! Tests for the push and pull instructions.
//!
//! Pushes store at 0x0100 | SP and then decrement SP. Pulls increment SP and
//! then load.

use lib65c02::{FlatMemory, MemoryBus, CPU};

fn setup_cpu(program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, program);
    let mut cpu = CPU::new(memory);
    cpu.set_pc(0x8000);
    cpu
}

#[test]
fn test_pha_pla_roundtrip() {
    let mut cpu = setup_cpu(&[0x48, 0xA9, 0x00, 0x68]);
    cpu.set_a(0x80);

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.memory().read(0x01FF), 0x80);
    assert_eq!(cpu.cycles(), 3);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    cpu.step().unwrap();
    assert_eq!(cpu.a(), 0x80);
    assert_eq!(cpu.sp(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.cycles(), 3 + 2 + 4);
}

#[test]
fn test_phx_plx() {
    let mut cpu = setup_cpu(&[0xDA, 0xA2, 0x01, 0xFA]);
    cpu.set_x(0x00);

    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.x(), 0x00);
    assert!(cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_phy_ply() {
    let mut cpu = setup_cpu(&[0x5A, 0xA0, 0x00, 0x7A]);
    cpu.set_y(0x7E);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x01FF), 0x7E);
    cpu.step().unwrap();
    cpu.step().unwrap();

    assert_eq!(cpu.y(), 0x7E);
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_php_sets_unused_bit() {
    let mut cpu = setup_cpu(&[0x08]);
    cpu.set_flag_c(true);
    cpu.set_flag_n(true);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x01FF), 0xA1);
    assert_eq!(cpu.sp(), 0xFE);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_plp_restores_every_bit() {
    let mut cpu = setup_cpu(&[0x28]);
    cpu.memory_mut().write(0x01FF, 0xDB);
    cpu.set_sp(0xFE);

    cpu.step().unwrap();

    assert_eq!(cpu.status(), 0xFB);
    assert!(cpu.flag_b());
    assert!(cpu.flag_d());
    assert!(!cpu.flag_i());
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.cycles(), 4);
}

#[test]
fn test_php_plp_roundtrip() {
    let mut cpu = setup_cpu(&[0x08, 0x18, 0xB8, 0x28]);
    cpu.set_status(0xC9);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.status(), 0xE9);
}

#[test]
fn test_stack_pointer_wraps_on_push() {
    let mut cpu = setup_cpu(&[0x48]);
    cpu.set_sp(0x00);
    cpu.set_a(0x33);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x0100), 0x33);
    assert_eq!(cpu.sp(), 0xFF);
}

#[test]
fn test_stack_pointer_wraps_on_pull() {
    let mut cpu = setup_cpu(&[0x68]);
    cpu.memory_mut().write(0x0100, 0x44);
    cpu.set_sp(0xFF);

    cpu.step().unwrap();

    assert_eq!(cpu.a(), 0x44);
    assert_eq!(cpu.sp(), 0x00);
}
