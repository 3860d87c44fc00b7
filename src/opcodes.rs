//! # Opcode Table
//!
//! The 256-entry decode table for the W65C02S, indexed by opcode byte.
//!
//! The table is built at compile time from [`OPCODE_DEFS`], a matrix of
//! (operation, addressing mode, opcode byte) rows grouped by mnemonic. The
//! builder is a `const fn`, so a duplicated opcode byte or an operation bound
//! to a mode that cannot serve it fails the build instead of surfacing at run
//! time.
//!
//! 212 bytes are assigned. The other 44 are `None` and decode-fail.

use crate::addressing::{AddressingMode, Capabilities};

/// Operation identifier.
///
/// The bit-manipulation families carry their bit index (0-7) explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bbr(u8),
    Bbs(u8),
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Bra,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Phx,
    Phy,
    Pla,
    Plp,
    Plx,
    Ply,
    Rmb(u8),
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Smb(u8),
    Sta,
    Stp,
    Stx,
    Sty,
    Stz,
    Tax,
    Tay,
    Trb,
    Tsb,
    Tsx,
    Txa,
    Txs,
    Tya,
    Wai,
}

const BBR: [&str; 8] = ["BBR0", "BBR1", "BBR2", "BBR3", "BBR4", "BBR5", "BBR6", "BBR7"];
const BBS: [&str; 8] = ["BBS0", "BBS1", "BBS2", "BBS3", "BBS4", "BBS5", "BBS6", "BBS7"];
const RMB: [&str; 8] = ["RMB0", "RMB1", "RMB2", "RMB3", "RMB4", "RMB5", "RMB6", "RMB7"];
const SMB: [&str; 8] = ["SMB0", "SMB1", "SMB2", "SMB3", "SMB4", "SMB5", "SMB6", "SMB7"];

impl Operation {
    /// Assembler mnemonic, e.g. `"LDA"` or `"BBS3"`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bbr(bit) => BBR[(bit & 7) as usize],
            Operation::Bbs(bit) => BBS[(bit & 7) as usize],
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Bra => "BRA",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Phx => "PHX",
            Operation::Phy => "PHY",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Plx => "PLX",
            Operation::Ply => "PLY",
            Operation::Rmb(bit) => RMB[(bit & 7) as usize],
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Smb(bit) => SMB[(bit & 7) as usize],
            Operation::Sta => "STA",
            Operation::Stp => "STP",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Stz => "STZ",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Trb => "TRB",
            Operation::Tsb => "TSB",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
            Operation::Wai => "WAI",
        }
    }

    /// Operand capabilities this operation needs from its addressing mode.
    pub const fn required_capabilities(self) -> Capabilities {
        match self {
            Operation::Adc
            | Operation::And
            | Operation::Bit
            | Operation::Cmp
            | Operation::Cpx
            | Operation::Cpy
            | Operation::Eor
            | Operation::Jmp
            | Operation::Jsr
            | Operation::Lda
            | Operation::Ldx
            | Operation::Ldy
            | Operation::Ora
            | Operation::Sbc => Capabilities::READ,
            Operation::Sta | Operation::Stx | Operation::Sty | Operation::Stz => {
                Capabilities::WRITE
            }
            Operation::Asl
            | Operation::Dec
            | Operation::Inc
            | Operation::Lsr
            | Operation::Rmb(_)
            | Operation::Rol
            | Operation::Ror
            | Operation::Smb(_)
            | Operation::Trb
            | Operation::Tsb => Capabilities::READ.union(Capabilities::WRITE),
            Operation::Bcc
            | Operation::Bcs
            | Operation::Beq
            | Operation::Bmi
            | Operation::Bne
            | Operation::Bpl
            | Operation::Bra
            | Operation::Bvc
            | Operation::Bvs => Capabilities::OFFSET.union(Capabilities::BRANCH),
            Operation::Bbr(_) | Operation::Bbs(_) => Capabilities::READ
                .union(Capabilities::OFFSET)
                .union(Capabilities::BRANCH),
            _ => Capabilities::empty(),
        }
    }

    /// Returns true if an indexed read by this operation pays one cycle when
    /// it crosses a page.
    pub const fn pays_page_cross(self) -> bool {
        matches!(
            self,
            Operation::Adc
                | Operation::And
                | Operation::Asl
                | Operation::Bit
                | Operation::Cmp
                | Operation::Eor
                | Operation::Lda
                | Operation::Ldx
                | Operation::Ldy
                | Operation::Lsr
                | Operation::Ora
                | Operation::Rol
                | Operation::Ror
                | Operation::Sbc
        )
    }
}

/// One decoded opcode: what to do, how to address it, and its base cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Opcode byte this entry is stored under.
    pub opcode: u8,

    /// Operation to perform.
    pub operation: Operation,

    /// Addressing mode supplying the operand.
    pub mode: AddressingMode,

    /// Base cycle count, before page-crossing, branch and decimal penalties.
    pub cycles: u8,
}

impl Instruction {
    pub fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }

    /// Total instruction size in bytes.
    pub fn size_bytes(&self) -> u8 {
        self.mode.size_bytes()
    }
}

/// Instruction costing exactly its mode's base cycles.
const fn plain(opcode: u8, operation: Operation, mode: AddressingMode) -> Instruction {
    Instruction {
        opcode,
        operation,
        mode,
        cycles: mode.base_cycles(),
    }
}

/// Read-modify-write instruction: base cycles plus the write-back.
const fn rmw(opcode: u8, operation: Operation, mode: AddressingMode) -> Instruction {
    Instruction {
        opcode,
        operation,
        mode,
        cycles: mode.base_cycles() + mode.write_extra_cycles(),
    }
}

/// Instruction whose datasheet timing does not follow from its mode.
const fn timed(opcode: u8, operation: Operation, mode: AddressingMode, cycles: u8) -> Instruction {
    Instruction {
        opcode,
        operation,
        mode,
        cycles,
    }
}

use AddressingMode::{
    Absolute as ABS, AbsoluteIndexedIndirect as ABS_X_IND, AbsoluteIndirect as ABS_IND,
    AbsoluteX as ABS_X, AbsoluteY as ABS_Y, Accumulator as ACC, Immediate as IMM, Implied as IMP,
    Relative as REL, Stack as STK, ZeroPage as ZP, ZeroPageIndirect as ZP_IND,
    ZeroPageIndirectY as ZP_IND_Y, ZeroPageRelative as ZP_REL, ZeroPageX as ZP_X,
    ZeroPageXIndirect as ZP_X_IND, ZeroPageY as ZP_Y,
};
use Operation::*;

/// Every documented W65C02S opcode, grouped by mnemonic.
pub const OPCODE_DEFS: [Instruction; 212] = [
    // ADC
    plain(0x6D, Adc, ABS),
    plain(0x7D, Adc, ABS_X),
    plain(0x79, Adc, ABS_Y),
    plain(0x69, Adc, IMM),
    plain(0x65, Adc, ZP),
    plain(0x61, Adc, ZP_X_IND),
    plain(0x75, Adc, ZP_X),
    plain(0x72, Adc, ZP_IND),
    plain(0x71, Adc, ZP_IND_Y),
    // AND
    plain(0x2D, And, ABS),
    plain(0x3D, And, ABS_X),
    plain(0x39, And, ABS_Y),
    plain(0x29, And, IMM),
    plain(0x25, And, ZP),
    plain(0x21, And, ZP_X_IND),
    plain(0x35, And, ZP_X),
    plain(0x32, And, ZP_IND),
    plain(0x31, And, ZP_IND_Y),
    // ASL
    rmw(0x0E, Asl, ABS),
    rmw(0x1E, Asl, ABS_X),
    rmw(0x0A, Asl, ACC),
    rmw(0x06, Asl, ZP),
    rmw(0x16, Asl, ZP_X),
    // BBRb
    plain(0x0F, Bbr(0), ZP_REL),
    plain(0x1F, Bbr(1), ZP_REL),
    plain(0x2F, Bbr(2), ZP_REL),
    plain(0x3F, Bbr(3), ZP_REL),
    plain(0x4F, Bbr(4), ZP_REL),
    plain(0x5F, Bbr(5), ZP_REL),
    plain(0x6F, Bbr(6), ZP_REL),
    plain(0x7F, Bbr(7), ZP_REL),
    // BBSb
    plain(0x8F, Bbs(0), ZP_REL),
    plain(0x9F, Bbs(1), ZP_REL),
    plain(0xAF, Bbs(2), ZP_REL),
    plain(0xBF, Bbs(3), ZP_REL),
    plain(0xCF, Bbs(4), ZP_REL),
    plain(0xDF, Bbs(5), ZP_REL),
    plain(0xEF, Bbs(6), ZP_REL),
    plain(0xFF, Bbs(7), ZP_REL),
    // Branches
    plain(0x90, Bcc, REL),
    plain(0xB0, Bcs, REL),
    plain(0xF0, Beq, REL),
    plain(0x30, Bmi, REL),
    plain(0xD0, Bne, REL),
    plain(0x10, Bpl, REL),
    plain(0x80, Bra, REL),
    plain(0x50, Bvc, REL),
    plain(0x70, Bvs, REL),
    // BIT
    plain(0x2C, Bit, ABS),
    plain(0x3C, Bit, ABS_X),
    plain(0x89, Bit, IMM),
    plain(0x24, Bit, ZP),
    plain(0x34, Bit, ZP_X),
    // BRK
    timed(0x00, Brk, STK, 7),
    // Flag clears
    plain(0x18, Clc, IMP),
    plain(0xD8, Cld, IMP),
    plain(0x58, Cli, IMP),
    plain(0xB8, Clv, IMP),
    // CMP
    plain(0xCD, Cmp, ABS),
    plain(0xDD, Cmp, ABS_X),
    plain(0xD9, Cmp, ABS_Y),
    plain(0xC9, Cmp, IMM),
    plain(0xC5, Cmp, ZP),
    plain(0xC1, Cmp, ZP_X_IND),
    plain(0xD5, Cmp, ZP_X),
    plain(0xD2, Cmp, ZP_IND),
    plain(0xD1, Cmp, ZP_IND_Y),
    // CPX
    plain(0xEC, Cpx, ABS),
    plain(0xE0, Cpx, IMM),
    plain(0xE4, Cpx, ZP),
    // CPY
    plain(0xCC, Cpy, ABS),
    plain(0xC0, Cpy, IMM),
    plain(0xC4, Cpy, ZP),
    // DEC
    rmw(0xCE, Dec, ABS),
    timed(0xDE, Dec, ABS_X, 7),
    rmw(0x3A, Dec, ACC),
    rmw(0xC6, Dec, ZP),
    rmw(0xD6, Dec, ZP_X),
    plain(0xCA, Dex, IMP),
    plain(0x88, Dey, IMP),
    // EOR
    plain(0x4D, Eor, ABS),
    plain(0x5D, Eor, ABS_X),
    plain(0x59, Eor, ABS_Y),
    plain(0x49, Eor, IMM),
    plain(0x45, Eor, ZP),
    plain(0x41, Eor, ZP_X_IND),
    plain(0x55, Eor, ZP_X),
    plain(0x52, Eor, ZP_IND),
    plain(0x51, Eor, ZP_IND_Y),
    // INC
    rmw(0xEE, Inc, ABS),
    timed(0xFE, Inc, ABS_X, 7),
    rmw(0x1A, Inc, ACC),
    rmw(0xE6, Inc, ZP),
    rmw(0xF6, Inc, ZP_X),
    plain(0xE8, Inx, IMP),
    plain(0xC8, Iny, IMP),
    // JMP / JSR
    timed(0x4C, Jmp, ABS, 3),
    plain(0x7C, Jmp, ABS_X_IND),
    plain(0x6C, Jmp, ABS_IND),
    timed(0x20, Jsr, ABS, 6),
    // LDA
    plain(0xAD, Lda, ABS),
    plain(0xBD, Lda, ABS_X),
    plain(0xB9, Lda, ABS_Y),
    plain(0xA9, Lda, IMM),
    plain(0xA5, Lda, ZP),
    plain(0xA1, Lda, ZP_X_IND),
    plain(0xB5, Lda, ZP_X),
    plain(0xB2, Lda, ZP_IND),
    plain(0xB1, Lda, ZP_IND_Y),
    // LDX
    plain(0xAE, Ldx, ABS),
    plain(0xBE, Ldx, ABS_Y),
    plain(0xA2, Ldx, IMM),
    plain(0xA6, Ldx, ZP),
    plain(0xB6, Ldx, ZP_Y),
    // LDY
    plain(0xAC, Ldy, ABS),
    plain(0xBC, Ldy, ABS_X),
    plain(0xA0, Ldy, IMM),
    plain(0xA4, Ldy, ZP),
    plain(0xB4, Ldy, ZP_X),
    // LSR
    rmw(0x4E, Lsr, ABS),
    rmw(0x5E, Lsr, ABS_X),
    rmw(0x4A, Lsr, ACC),
    rmw(0x46, Lsr, ZP),
    rmw(0x56, Lsr, ZP_X),
    // NOP
    plain(0xEA, Nop, IMP),
    // ORA
    plain(0x0D, Ora, ABS),
    plain(0x1D, Ora, ABS_X),
    plain(0x19, Ora, ABS_Y),
    plain(0x09, Ora, IMM),
    plain(0x05, Ora, ZP),
    plain(0x01, Ora, ZP_X_IND),
    plain(0x15, Ora, ZP_X),
    plain(0x12, Ora, ZP_IND),
    plain(0x11, Ora, ZP_IND_Y),
    // Pushes
    plain(0x48, Pha, STK),
    plain(0x08, Php, STK),
    plain(0xDA, Phx, STK),
    plain(0x5A, Phy, STK),
    // Pulls
    timed(0x68, Pla, STK, 4),
    timed(0x28, Plp, STK, 4),
    timed(0xFA, Plx, STK, 4),
    timed(0x7A, Ply, STK, 4),
    // RMBb
    rmw(0x07, Rmb(0), ZP),
    rmw(0x17, Rmb(1), ZP),
    rmw(0x27, Rmb(2), ZP),
    rmw(0x37, Rmb(3), ZP),
    rmw(0x47, Rmb(4), ZP),
    rmw(0x57, Rmb(5), ZP),
    rmw(0x67, Rmb(6), ZP),
    rmw(0x77, Rmb(7), ZP),
    // ROL
    rmw(0x2E, Rol, ABS),
    rmw(0x3E, Rol, ABS_X),
    rmw(0x2A, Rol, ACC),
    rmw(0x26, Rol, ZP),
    rmw(0x36, Rol, ZP_X),
    // ROR
    rmw(0x6E, Ror, ABS),
    rmw(0x7E, Ror, ABS_X),
    rmw(0x6A, Ror, ACC),
    rmw(0x66, Ror, ZP),
    rmw(0x76, Ror, ZP_X),
    // Returns
    timed(0x40, Rti, STK, 6),
    timed(0x60, Rts, STK, 6),
    // SBC
    plain(0xED, Sbc, ABS),
    plain(0xFD, Sbc, ABS_X),
    plain(0xF9, Sbc, ABS_Y),
    plain(0xE9, Sbc, IMM),
    plain(0xE5, Sbc, ZP),
    plain(0xE1, Sbc, ZP_X_IND),
    plain(0xF5, Sbc, ZP_X),
    plain(0xF2, Sbc, ZP_IND),
    plain(0xF1, Sbc, ZP_IND_Y),
    // Flag sets
    plain(0x38, Sec, IMP),
    plain(0xF8, Sed, IMP),
    plain(0x78, Sei, IMP),
    // SMBb
    rmw(0x87, Smb(0), ZP),
    rmw(0x97, Smb(1), ZP),
    rmw(0xA7, Smb(2), ZP),
    rmw(0xB7, Smb(3), ZP),
    rmw(0xC7, Smb(4), ZP),
    rmw(0xD7, Smb(5), ZP),
    rmw(0xE7, Smb(6), ZP),
    rmw(0xF7, Smb(7), ZP),
    // STA
    plain(0x8D, Sta, ABS),
    timed(0x9D, Sta, ABS_X, 5),
    timed(0x99, Sta, ABS_Y, 5),
    plain(0x85, Sta, ZP),
    plain(0x81, Sta, ZP_X_IND),
    plain(0x95, Sta, ZP_X),
    plain(0x92, Sta, ZP_IND),
    timed(0x91, Sta, ZP_IND_Y, 6),
    // STP
    timed(0xDB, Stp, IMP, 3),
    // STX
    plain(0x8E, Stx, ABS),
    plain(0x86, Stx, ZP),
    plain(0x96, Stx, ZP_Y),
    // STY
    plain(0x8C, Sty, ABS),
    plain(0x84, Sty, ZP),
    plain(0x94, Sty, ZP_X),
    // STZ
    plain(0x9C, Stz, ABS),
    timed(0x9E, Stz, ABS_X, 5),
    plain(0x64, Stz, ZP),
    plain(0x74, Stz, ZP_X),
    // Transfers
    plain(0xAA, Tax, IMP),
    plain(0xA8, Tay, IMP),
    plain(0xBA, Tsx, IMP),
    plain(0x8A, Txa, IMP),
    plain(0x9A, Txs, IMP),
    plain(0x98, Tya, IMP),
    // TRB / TSB
    rmw(0x1C, Trb, ABS),
    rmw(0x14, Trb, ZP),
    rmw(0x0C, Tsb, ABS),
    rmw(0x04, Tsb, ZP),
    // WAI
    timed(0xCB, Wai, IMP, 3),
];

const fn build_table(defs: &[Instruction]) -> [Option<Instruction>; 256] {
    let mut table: [Option<Instruction>; 256] = [None; 256];
    let mut i = 0;
    while i < defs.len() {
        let def = defs[i];
        if table[def.opcode as usize].is_some() {
            panic!("opcode byte assigned twice");
        }
        let needed = def.operation.required_capabilities();
        if !def.mode.capabilities().contains(needed) {
            panic!("operation bound to an addressing mode that cannot serve it");
        }
        table[def.opcode as usize] = Some(def);
        i += 1;
    }
    table
}

/// Decode table indexed by opcode byte. `None` marks an unassigned byte.
///
/// # Examples
///
/// ```
/// use lib65c02::{AddressingMode, Operation, OPCODE_TABLE};
///
/// let lda = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda.operation, Operation::Lda);
/// assert_eq!(lda.mode, AddressingMode::Immediate);
/// assert_eq!(lda.cycles, 2);
///
/// assert!(OPCODE_TABLE[0x02].is_none());
/// ```
pub static OPCODE_TABLE: [Option<Instruction>; 256] = build_table(&OPCODE_DEFS);

/// Looks up the table entry for `opcode`.
pub fn decode(opcode: u8) -> Option<&'static Instruction> {
    OPCODE_TABLE[opcode as usize].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigned_count() {
        let assigned = OPCODE_TABLE.iter().filter(|e| e.is_some()).count();
        assert_eq!(assigned, 212);
    }

    #[test]
    fn test_entries_stored_under_their_opcode() {
        for (byte, entry) in OPCODE_TABLE.iter().enumerate() {
            if let Some(instruction) = entry {
                assert_eq!(instruction.opcode as usize, byte);
            }
        }
    }

    #[test]
    fn test_bit_families_follow_column_pattern() {
        for bit in 0..8u8 {
            let row = bit << 4;
            assert_eq!(decode(row | 0x07).unwrap().operation, Rmb(bit));
            assert_eq!(decode(row | 0x0F).unwrap().operation, Bbr(bit));
            assert_eq!(decode(0x80 | row | 0x07).unwrap().operation, Smb(bit));
            assert_eq!(decode(0x80 | row | 0x0F).unwrap().operation, Bbs(bit));
        }
    }

    #[test]
    fn test_mnemonics_with_bit_index() {
        assert_eq!(Bbr(0).mnemonic(), "BBR0");
        assert_eq!(Bbs(7).mnemonic(), "BBS7");
        assert_eq!(Rmb(3).mnemonic(), "RMB3");
        assert_eq!(Smb(5).mnemonic(), "SMB5");
    }

    #[test]
    fn test_unassigned_bytes() {
        for byte in [0x02u8, 0x03, 0x0B, 0x13, 0x22, 0x44, 0x5C, 0xDC, 0xFC] {
            assert!(decode(byte).is_none(), "0x{:02X} should be unassigned", byte);
        }
    }
}
