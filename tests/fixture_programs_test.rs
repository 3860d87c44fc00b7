//! Small programs loaded at 0x2000 that end in a compare.
//!
//! Each program computes a value through one addressing mode and compares it
//! with the expected result, so a passing run finishes with Z and C set.

use lib65c02::{FlatMemory, CPU};

const ORIGIN: u16 = 0x2000;

/// Loads `blocks` and `program`, then steps until PC leaves the last byte.
fn run_fixture(blocks: &[(u16, &[u8])], program: &[u8]) -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    for (addr, bytes) in blocks {
        memory.load(*addr, bytes);
    }
    memory.load(ORIGIN, program);

    let mut cpu = CPU::new(memory);
    cpu.set_pc(ORIGIN);

    let end = ORIGIN + program.len() as u16;
    for _ in 0..100 {
        if cpu.pc() == end {
            return cpu;
        }
        cpu.step().unwrap();
    }
    panic!("program never reached 0x{:04X}", end);
}

fn assert_passed(cpu: &CPU<FlatMemory>, name: &str) {
    assert!(cpu.flag_z(), "{}: Z clear", name);
    assert!(cpu.flag_c(), "{}: C clear", name);
}

const ZP_POINTER: &[u8] = &[0, 0, 0, 0, 0, 0x05, 0x10];
const TARGET_1005: &[u8] = &[0, 0, 0, 0, 0, 0xAF];
const TARGET_1002: &[u8] = &[0, 0, 0xAF];
const ZP_03_AF: &[u8] = &[0, 0, 0, 0xAF];
const ZP_07_AF: &[u8] = &[0, 0, 0, 0, 0, 0, 0, 0xAF];
const ZP_03_FA: &[u8] = &[0, 0, 0, 0xFA];
const ZP_07_FA: &[u8] = &[0, 0, 0, 0, 0, 0, 0, 0xFA];
/// TSX; RTS
const SUBROUTINE: &[u8] = &[0xBA, 0x60];

// ========== AND ==========

#[test]
fn test_and_absolute() {
    let cpu = run_fixture(
        &[(0x1000, TARGET_1002)],
        &[0xA9, 0xFA, 0x3D, 0x02, 0x10, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.abs");
}

#[test]
fn test_and_absolute_x() {
    let cpu = run_fixture(
        &[(0x1000, TARGET_1005)],
        &[0xA9, 0xFA, 0xA2, 0x03, 0x3D, 0x02, 0x10, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.abs_x");
}

#[test]
fn test_and_absolute_y() {
    let cpu = run_fixture(
        &[(0x1000, TARGET_1005)],
        &[0xA9, 0xFA, 0xA0, 0x03, 0x39, 0x02, 0x10, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.abs_y");
}

#[test]
fn test_and_immediate() {
    let cpu = run_fixture(&[], &[0xA9, 0xFA, 0x29, 0xAF, 0xC9, 0xAA]);
    assert_passed(&cpu, "and.imm");
    assert_eq!(cpu.cycles(), 6);
}

#[test]
fn test_and_zero_page() {
    let cpu = run_fixture(
        &[(0x0000, ZP_03_AF)],
        &[0xA9, 0xFA, 0x25, 0x03, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.zp");
}

#[test]
fn test_and_zero_page_x_indirect() {
    let cpu = run_fixture(
        &[(0x0000, ZP_POINTER), (0x1000, TARGET_1005)],
        &[0xA9, 0xFA, 0xA2, 0x02, 0x21, 0x03, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.zp_x_ind");
}

#[test]
fn test_and_zero_page_x() {
    let cpu = run_fixture(
        &[(0x0000, ZP_07_AF)],
        &[0xA9, 0xFA, 0xA2, 0x03, 0x35, 0x04, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.zp_x");
}

#[test]
fn test_and_zero_page_indirect() {
    let cpu = run_fixture(
        &[(0x0000, ZP_POINTER), (0x1000, TARGET_1005)],
        &[0xA9, 0xFA, 0x32, 0x05, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.zp_ind");
}

#[test]
fn test_and_zero_page_indirect_y() {
    let cpu = run_fixture(
        &[(0x0000, ZP_POINTER), (0x1010, TARGET_1005)],
        &[0xA9, 0xFA, 0xA0, 0x10, 0x31, 0x05, 0xC9, 0xAA],
    );
    assert_passed(&cpu, "and.zp_ind_y");
}

// ========== DEC ==========

#[test]
fn test_dec_absolute() {
    let cpu = run_fixture(
        &[],
        &[
            0xA9, 0xFA, 0xA2, 0xF9, 0x8D, 0x0F, 0x20, 0xCE, 0x0F, 0x20, 0xEC, 0x0F, 0x20,
        ],
    );
    assert_passed(&cpu, "dec.abs");
}

#[test]
fn test_dec_absolute_x() {
    let cpu = run_fixture(
        &[],
        &[
            0xA9, 0xFA, 0xA2, 0x0F, 0xA0, 0xF9, 0x8D, 0x0F, 0x20, 0xDE, 0x00, 0x20, 0xCC, 0x0F,
            0x20,
        ],
    );
    assert_passed(&cpu, "dec.abs_x");
}

#[test]
fn test_dec_accumulator() {
    let cpu = run_fixture(&[], &[0xA9, 0xFA, 0x3A, 0xC9, 0xF9]);
    assert_passed(&cpu, "dec.accum");
}

#[test]
fn test_dec_zero_page() {
    let cpu = run_fixture(
        &[(0x0000, ZP_03_FA)],
        &[0xA9, 0xF9, 0xC6, 0x03, 0xC5, 0x03],
    );
    assert_passed(&cpu, "dec.zp");
}

#[test]
fn test_dec_zero_page_x() {
    let cpu = run_fixture(
        &[(0x0000, ZP_07_FA)],
        &[0xA9, 0xF9, 0xA2, 0x03, 0xD6, 0x04, 0xC5, 0x07],
    );
    assert_passed(&cpu, "dec.zp_x");
}

// ========== JSR ==========

#[test]
fn test_jsr_absolute() {
    // The subroutine reads SP after the return address is pushed; the caller
    // predicted it by decrementing its own copy twice.
    let cpu = run_fixture(
        &[(0x1000, SUBROUTINE)],
        &[
            0xBA, 0xCA, 0xCA, 0x86, 0x03, 0xA2, 0x00, 0x20, 0x00, 0x10, 0xE4, 0x03,
        ],
    );
    assert_passed(&cpu, "jsr.abs");
    assert_eq!(cpu.sp(), 0xFF);
}
