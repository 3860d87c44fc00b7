//! # W65C02S Instruction Implementations
//!
//! This module contains the implementations of all W65C02S operations, organized by category.
//! Each operation is a standalone function that takes a mutable reference to the CPU and the
//! already-resolved operand, and returns the extra cycles it incurred beyond the table cost.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **bits**: Bit manipulation (BBRb, BBSb, RMBb, SMBb, TRB, TSB)
//! - **branches**: Relative branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS, BRA)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY, STZ)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, WAI, STP)
//! - **stack**: Stack operations (PHA, PHP, PHX, PHY, PLA, PLP, PLX, PLY)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

use crate::addressing::Operand;
use crate::opcodes::Operation;
use crate::{ExecutionError, MemoryBus, CPU};

pub mod alu;
pub mod bits;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

/// Runs `operation` against `operand`.
///
/// Returns the cycles owed on top of the decode table cost: a taken branch or
/// a decimal-mode ADC/SBC. Page-crossing penalties are charged by the caller.
pub(crate) fn execute<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    operand: &Operand,
) -> Result<u32, ExecutionError> {
    match operation {
        Operation::Adc => alu::execute_adc(cpu, operand),
        Operation::Sbc => alu::execute_sbc(cpu, operand),
        Operation::And => alu::execute_and(cpu, operand),
        Operation::Ora => alu::execute_ora(cpu, operand),
        Operation::Eor => alu::execute_eor(cpu, operand),
        Operation::Cmp => alu::execute_cmp(cpu, operand),
        Operation::Cpx => alu::execute_cpx(cpu, operand),
        Operation::Cpy => alu::execute_cpy(cpu, operand),
        Operation::Bit => alu::execute_bit(cpu, operand),

        Operation::Bbr(bit) => bits::execute_bbr(cpu, bit, operand),
        Operation::Bbs(bit) => bits::execute_bbs(cpu, bit, operand),
        Operation::Rmb(bit) => bits::execute_rmb(cpu, bit, operand),
        Operation::Smb(bit) => bits::execute_smb(cpu, bit, operand),
        Operation::Trb => bits::execute_trb(cpu, operand),
        Operation::Tsb => bits::execute_tsb(cpu, operand),

        Operation::Bcc => branches::execute_bcc(cpu, operand),
        Operation::Bcs => branches::execute_bcs(cpu, operand),
        Operation::Beq => branches::execute_beq(cpu, operand),
        Operation::Bne => branches::execute_bne(cpu, operand),
        Operation::Bmi => branches::execute_bmi(cpu, operand),
        Operation::Bpl => branches::execute_bpl(cpu, operand),
        Operation::Bvc => branches::execute_bvc(cpu, operand),
        Operation::Bvs => branches::execute_bvs(cpu, operand),
        Operation::Bra => branches::execute_bra(cpu, operand),

        Operation::Asl => shifts::execute_asl(cpu, operand),
        Operation::Lsr => shifts::execute_lsr(cpu, operand),
        Operation::Rol => shifts::execute_rol(cpu, operand),
        Operation::Ror => shifts::execute_ror(cpu, operand),

        Operation::Lda => load_store::execute_lda(cpu, operand),
        Operation::Ldx => load_store::execute_ldx(cpu, operand),
        Operation::Ldy => load_store::execute_ldy(cpu, operand),
        Operation::Sta => load_store::execute_sta(cpu, operand),
        Operation::Stx => load_store::execute_stx(cpu, operand),
        Operation::Sty => load_store::execute_sty(cpu, operand),
        Operation::Stz => load_store::execute_stz(cpu, operand),

        Operation::Inc => inc_dec::execute_inc(cpu, operand),
        Operation::Dec => inc_dec::execute_dec(cpu, operand),
        Operation::Inx => inc_dec::execute_inx(cpu),
        Operation::Iny => inc_dec::execute_iny(cpu),
        Operation::Dex => inc_dec::execute_dex(cpu),
        Operation::Dey => inc_dec::execute_dey(cpu),

        Operation::Jmp => control::execute_jmp(cpu, operand),
        Operation::Jsr => control::execute_jsr(cpu, operand),
        Operation::Rts => control::execute_rts(cpu),
        Operation::Rti => control::execute_rti(cpu),
        Operation::Brk => control::execute_brk(cpu),
        Operation::Nop => Ok(0),
        Operation::Wai => control::execute_wai(cpu),
        Operation::Stp => control::execute_stp(cpu),

        Operation::Pha => stack::execute_pha(cpu),
        Operation::Php => stack::execute_php(cpu),
        Operation::Phx => stack::execute_phx(cpu),
        Operation::Phy => stack::execute_phy(cpu),
        Operation::Pla => stack::execute_pla(cpu),
        Operation::Plp => stack::execute_plp(cpu),
        Operation::Plx => stack::execute_plx(cpu),
        Operation::Ply => stack::execute_ply(cpu),

        Operation::Clc => flags::execute_clc(cpu),
        Operation::Sec => flags::execute_sec(cpu),
        Operation::Cli => flags::execute_cli(cpu),
        Operation::Sei => flags::execute_sei(cpu),
        Operation::Cld => flags::execute_cld(cpu),
        Operation::Sed => flags::execute_sed(cpu),
        Operation::Clv => flags::execute_clv(cpu),

        Operation::Tax => transfer::execute_tax(cpu),
        Operation::Tay => transfer::execute_tay(cpu),
        Operation::Txa => transfer::execute_txa(cpu),
        Operation::Tya => transfer::execute_tya(cpu),
        Operation::Tsx => transfer::execute_tsx(cpu),
        Operation::Txs => transfer::execute_txs(cpu),
    }
}
