//! # Opcode Metadata Table
//!
//! The complete 256-entry opcode table of the NMOS 6502/6510, the single
//! source of truth for decoding:
//! - **151 documented instructions**
//! - **105 undocumented opcodes**, including the unstable ones (ANE, LXA,
//!   SHA, SHX, SHY, TAS) and the twelve JAM opcodes that halt the CPU
//!
//! Each entry carries the mnemonic, addressing mode, base tact count, size in
//! bytes, whether an indexed read pays an extra tact on a page crossing, and
//! whether the opcode is documented. Branches add their taken/page-crossing
//! tacts on top of the base count dynamically.

use std::fmt;

use crate::addressing::AddressingMode;
use crate::addressing::AddressingMode::*;

/// Instruction mnemonics, documented and undocumented.
#[rustfmt::skip]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc,
    Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp,
    Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror, Rti,
    Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    // Undocumented
    Alr, Anc, Ane, Arr, Dcp, Isc, Jam, Las, Lax, Lxa, Rla, Rra, Sax, Sbx,
    Sha, Shx, Shy, Slo, Sre, Tas, Usbc,
}

impl Mnemonic {
    /// Upper-case assembler name, e.g. `"LDA"`.
    #[rustfmt::skip]
    pub fn name(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC", And => "AND", Asl => "ASL", Bcc => "BCC", Bcs => "BCS",
            Beq => "BEQ", Bit => "BIT", Bmi => "BMI", Bne => "BNE", Bpl => "BPL",
            Brk => "BRK", Bvc => "BVC", Bvs => "BVS", Clc => "CLC", Cld => "CLD",
            Cli => "CLI", Clv => "CLV", Cmp => "CMP", Cpx => "CPX", Cpy => "CPY",
            Dec => "DEC", Dex => "DEX", Dey => "DEY", Eor => "EOR", Inc => "INC",
            Inx => "INX", Iny => "INY", Jmp => "JMP", Jsr => "JSR", Lda => "LDA",
            Ldx => "LDX", Ldy => "LDY", Lsr => "LSR", Nop => "NOP", Ora => "ORA",
            Pha => "PHA", Php => "PHP", Pla => "PLA", Plp => "PLP", Rol => "ROL",
            Ror => "ROR", Rti => "RTI", Rts => "RTS", Sbc => "SBC", Sec => "SEC",
            Sed => "SED", Sei => "SEI", Sta => "STA", Stx => "STX", Sty => "STY",
            Tax => "TAX", Tay => "TAY", Tsx => "TSX", Txa => "TXA", Txs => "TXS",
            Tya => "TYA", Alr => "ALR", Anc => "ANC", Ane => "ANE", Arr => "ARR",
            Dcp => "DCP", Isc => "ISC", Jam => "JAM", Las => "LAS", Lax => "LAX",
            Lxa => "LXA", Rla => "RLA", Rra => "RRA", Sax => "SAX", Sbx => "SBX",
            Sha => "SHA", Shx => "SHX", Shy => "SHY", Slo => "SLO", Sre => "SRE",
            Tas => "TAS", Usbc => "USBC",
        }
    }

    /// Conditional branches.
    pub fn is_branch(self) -> bool {
        use Mnemonic::*;
        matches!(self, Bcc | Bcs | Beq | Bmi | Bne | Bpl | Bvc | Bvs)
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata for a single opcode.
///
/// # Examples
///
/// ```
/// use lib6510::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// let lda_abx = &OPCODE_TABLE[0xBD];
/// assert_eq!(lda_abx.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_abx.addressing_mode, AddressingMode::AbsoluteX);
/// assert_eq!(lda_abx.base_cycles, 4);
/// assert!(lda_abx.page_penalty);
///
/// let slo = &OPCODE_TABLE[0x03];
/// assert_eq!(slo.base_cycles, 8);
/// assert!(!slo.documented);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    pub mnemonic: Mnemonic,

    pub addressing_mode: AddressingMode,

    /// Tacts spent when no page is crossed and no branch is taken.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    pub size_bytes: u8,

    /// An indexed read that crosses a page boundary costs one more tact.
    pub page_penalty: bool,

    /// False for the undocumented (illegal) opcodes.
    pub documented: bool,
}

const fn op(
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    base_cycles: u8,
    size_bytes: u8,
    page_penalty: bool,
    documented: bool,
) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes,
        page_penalty,
        documented,
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = [
    /* 0x00 */ op(Mnemonic::Brk, Implicit, 7, 1, false, true),
    /* 0x01 */ op(Mnemonic::Ora, IndirectX, 6, 2, false, true),
    /* 0x02 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x03 */ op(Mnemonic::Slo, IndirectX, 8, 2, false, false),
    /* 0x04 */ op(Mnemonic::Nop, ZeroPage, 3, 2, false, false),
    /* 0x05 */ op(Mnemonic::Ora, ZeroPage, 3, 2, false, true),
    /* 0x06 */ op(Mnemonic::Asl, ZeroPage, 5, 2, false, true),
    /* 0x07 */ op(Mnemonic::Slo, ZeroPage, 5, 2, false, false),
    /* 0x08 */ op(Mnemonic::Php, Implicit, 3, 1, false, true),
    /* 0x09 */ op(Mnemonic::Ora, Immediate, 2, 2, false, true),
    /* 0x0A */ op(Mnemonic::Asl, Accumulator, 2, 1, false, true),
    /* 0x0B */ op(Mnemonic::Anc, Immediate, 2, 2, false, false),
    /* 0x0C */ op(Mnemonic::Nop, Absolute, 4, 3, false, false),
    /* 0x0D */ op(Mnemonic::Ora, Absolute, 4, 3, false, true),
    /* 0x0E */ op(Mnemonic::Asl, Absolute, 6, 3, false, true),
    /* 0x0F */ op(Mnemonic::Slo, Absolute, 6, 3, false, false),
    /* 0x10 */ op(Mnemonic::Bpl, Relative, 2, 2, false, true),
    /* 0x11 */ op(Mnemonic::Ora, IndirectY, 5, 2, true, true),
    /* 0x12 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x13 */ op(Mnemonic::Slo, IndirectY, 8, 2, false, false),
    /* 0x14 */ op(Mnemonic::Nop, ZeroPageX, 4, 2, false, false),
    /* 0x15 */ op(Mnemonic::Ora, ZeroPageX, 4, 2, false, true),
    /* 0x16 */ op(Mnemonic::Asl, ZeroPageX, 6, 2, false, true),
    /* 0x17 */ op(Mnemonic::Slo, ZeroPageX, 6, 2, false, false),
    /* 0x18 */ op(Mnemonic::Clc, Implicit, 2, 1, false, true),
    /* 0x19 */ op(Mnemonic::Ora, AbsoluteY, 4, 3, true, true),
    /* 0x1A */ op(Mnemonic::Nop, Implicit, 2, 1, false, false),
    /* 0x1B */ op(Mnemonic::Slo, AbsoluteY, 7, 3, false, false),
    /* 0x1C */ op(Mnemonic::Nop, AbsoluteX, 4, 3, true, false),
    /* 0x1D */ op(Mnemonic::Ora, AbsoluteX, 4, 3, true, true),
    /* 0x1E */ op(Mnemonic::Asl, AbsoluteX, 7, 3, false, true),
    /* 0x1F */ op(Mnemonic::Slo, AbsoluteX, 7, 3, false, false),
    /* 0x20 */ op(Mnemonic::Jsr, Absolute, 6, 3, false, true),
    /* 0x21 */ op(Mnemonic::And, IndirectX, 6, 2, false, true),
    /* 0x22 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x23 */ op(Mnemonic::Rla, IndirectX, 8, 2, false, false),
    /* 0x24 */ op(Mnemonic::Bit, ZeroPage, 3, 2, false, true),
    /* 0x25 */ op(Mnemonic::And, ZeroPage, 3, 2, false, true),
    /* 0x26 */ op(Mnemonic::Rol, ZeroPage, 5, 2, false, true),
    /* 0x27 */ op(Mnemonic::Rla, ZeroPage, 5, 2, false, false),
    /* 0x28 */ op(Mnemonic::Plp, Implicit, 4, 1, false, true),
    /* 0x29 */ op(Mnemonic::And, Immediate, 2, 2, false, true),
    /* 0x2A */ op(Mnemonic::Rol, Accumulator, 2, 1, false, true),
    /* 0x2B */ op(Mnemonic::Anc, Immediate, 2, 2, false, false),
    /* 0x2C */ op(Mnemonic::Bit, Absolute, 4, 3, false, true),
    /* 0x2D */ op(Mnemonic::And, Absolute, 4, 3, false, true),
    /* 0x2E */ op(Mnemonic::Rol, Absolute, 6, 3, false, true),
    /* 0x2F */ op(Mnemonic::Rla, Absolute, 6, 3, false, false),
    /* 0x30 */ op(Mnemonic::Bmi, Relative, 2, 2, false, true),
    /* 0x31 */ op(Mnemonic::And, IndirectY, 5, 2, true, true),
    /* 0x32 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x33 */ op(Mnemonic::Rla, IndirectY, 8, 2, false, false),
    /* 0x34 */ op(Mnemonic::Nop, ZeroPageX, 4, 2, false, false),
    /* 0x35 */ op(Mnemonic::And, ZeroPageX, 4, 2, false, true),
    /* 0x36 */ op(Mnemonic::Rol, ZeroPageX, 6, 2, false, true),
    /* 0x37 */ op(Mnemonic::Rla, ZeroPageX, 6, 2, false, false),
    /* 0x38 */ op(Mnemonic::Sec, Implicit, 2, 1, false, true),
    /* 0x39 */ op(Mnemonic::And, AbsoluteY, 4, 3, true, true),
    /* 0x3A */ op(Mnemonic::Nop, Implicit, 2, 1, false, false),
    /* 0x3B */ op(Mnemonic::Rla, AbsoluteY, 7, 3, false, false),
    /* 0x3C */ op(Mnemonic::Nop, AbsoluteX, 4, 3, true, false),
    /* 0x3D */ op(Mnemonic::And, AbsoluteX, 4, 3, true, true),
    /* 0x3E */ op(Mnemonic::Rol, AbsoluteX, 7, 3, false, true),
    /* 0x3F */ op(Mnemonic::Rla, AbsoluteX, 7, 3, false, false),
    /* 0x40 */ op(Mnemonic::Rti, Implicit, 6, 1, false, true),
    /* 0x41 */ op(Mnemonic::Eor, IndirectX, 6, 2, false, true),
    /* 0x42 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x43 */ op(Mnemonic::Sre, IndirectX, 8, 2, false, false),
    /* 0x44 */ op(Mnemonic::Nop, ZeroPage, 3, 2, false, false),
    /* 0x45 */ op(Mnemonic::Eor, ZeroPage, 3, 2, false, true),
    /* 0x46 */ op(Mnemonic::Lsr, ZeroPage, 5, 2, false, true),
    /* 0x47 */ op(Mnemonic::Sre, ZeroPage, 5, 2, false, false),
    /* 0x48 */ op(Mnemonic::Pha, Implicit, 3, 1, false, true),
    /* 0x49 */ op(Mnemonic::Eor, Immediate, 2, 2, false, true),
    /* 0x4A */ op(Mnemonic::Lsr, Accumulator, 2, 1, false, true),
    /* 0x4B */ op(Mnemonic::Alr, Immediate, 2, 2, false, false),
    /* 0x4C */ op(Mnemonic::Jmp, Absolute, 3, 3, false, true),
    /* 0x4D */ op(Mnemonic::Eor, Absolute, 4, 3, false, true),
    /* 0x4E */ op(Mnemonic::Lsr, Absolute, 6, 3, false, true),
    /* 0x4F */ op(Mnemonic::Sre, Absolute, 6, 3, false, false),
    /* 0x50 */ op(Mnemonic::Bvc, Relative, 2, 2, false, true),
    /* 0x51 */ op(Mnemonic::Eor, IndirectY, 5, 2, true, true),
    /* 0x52 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x53 */ op(Mnemonic::Sre, IndirectY, 8, 2, false, false),
    /* 0x54 */ op(Mnemonic::Nop, ZeroPageX, 4, 2, false, false),
    /* 0x55 */ op(Mnemonic::Eor, ZeroPageX, 4, 2, false, true),
    /* 0x56 */ op(Mnemonic::Lsr, ZeroPageX, 6, 2, false, true),
    /* 0x57 */ op(Mnemonic::Sre, ZeroPageX, 6, 2, false, false),
    /* 0x58 */ op(Mnemonic::Cli, Implicit, 2, 1, false, true),
    /* 0x59 */ op(Mnemonic::Eor, AbsoluteY, 4, 3, true, true),
    /* 0x5A */ op(Mnemonic::Nop, Implicit, 2, 1, false, false),
    /* 0x5B */ op(Mnemonic::Sre, AbsoluteY, 7, 3, false, false),
    /* 0x5C */ op(Mnemonic::Nop, AbsoluteX, 4, 3, true, false),
    /* 0x5D */ op(Mnemonic::Eor, AbsoluteX, 4, 3, true, true),
    /* 0x5E */ op(Mnemonic::Lsr, AbsoluteX, 7, 3, false, true),
    /* 0x5F */ op(Mnemonic::Sre, AbsoluteX, 7, 3, false, false),
    /* 0x60 */ op(Mnemonic::Rts, Implicit, 6, 1, false, true),
    /* 0x61 */ op(Mnemonic::Adc, IndirectX, 6, 2, false, true),
    /* 0x62 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x63 */ op(Mnemonic::Rra, IndirectX, 8, 2, false, false),
    /* 0x64 */ op(Mnemonic::Nop, ZeroPage, 3, 2, false, false),
    /* 0x65 */ op(Mnemonic::Adc, ZeroPage, 3, 2, false, true),
    /* 0x66 */ op(Mnemonic::Ror, ZeroPage, 5, 2, false, true),
    /* 0x67 */ op(Mnemonic::Rra, ZeroPage, 5, 2, false, false),
    /* 0x68 */ op(Mnemonic::Pla, Implicit, 4, 1, false, true),
    /* 0x69 */ op(Mnemonic::Adc, Immediate, 2, 2, false, true),
    /* 0x6A */ op(Mnemonic::Ror, Accumulator, 2, 1, false, true),
    /* 0x6B */ op(Mnemonic::Arr, Immediate, 2, 2, false, false),
    /* 0x6C */ op(Mnemonic::Jmp, Indirect, 5, 3, false, true),
    /* 0x6D */ op(Mnemonic::Adc, Absolute, 4, 3, false, true),
    /* 0x6E */ op(Mnemonic::Ror, Absolute, 6, 3, false, true),
    /* 0x6F */ op(Mnemonic::Rra, Absolute, 6, 3, false, false),
    /* 0x70 */ op(Mnemonic::Bvs, Relative, 2, 2, false, true),
    /* 0x71 */ op(Mnemonic::Adc, IndirectY, 5, 2, true, true),
    /* 0x72 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x73 */ op(Mnemonic::Rra, IndirectY, 8, 2, false, false),
    /* 0x74 */ op(Mnemonic::Nop, ZeroPageX, 4, 2, false, false),
    /* 0x75 */ op(Mnemonic::Adc, ZeroPageX, 4, 2, false, true),
    /* 0x76 */ op(Mnemonic::Ror, ZeroPageX, 6, 2, false, true),
    /* 0x77 */ op(Mnemonic::Rra, ZeroPageX, 6, 2, false, false),
    /* 0x78 */ op(Mnemonic::Sei, Implicit, 2, 1, false, true),
    /* 0x79 */ op(Mnemonic::Adc, AbsoluteY, 4, 3, true, true),
    /* 0x7A */ op(Mnemonic::Nop, Implicit, 2, 1, false, false),
    /* 0x7B */ op(Mnemonic::Rra, AbsoluteY, 7, 3, false, false),
    /* 0x7C */ op(Mnemonic::Nop, AbsoluteX, 4, 3, true, false),
    /* 0x7D */ op(Mnemonic::Adc, AbsoluteX, 4, 3, true, true),
    /* 0x7E */ op(Mnemonic::Ror, AbsoluteX, 7, 3, false, true),
    /* 0x7F */ op(Mnemonic::Rra, AbsoluteX, 7, 3, false, false),
    /* 0x80 */ op(Mnemonic::Nop, Immediate, 2, 2, false, false),
    /* 0x81 */ op(Mnemonic::Sta, IndirectX, 6, 2, false, true),
    /* 0x82 */ op(Mnemonic::Nop, Immediate, 2, 2, false, false),
    /* 0x83 */ op(Mnemonic::Sax, IndirectX, 6, 2, false, false),
    /* 0x84 */ op(Mnemonic::Sty, ZeroPage, 3, 2, false, true),
    /* 0x85 */ op(Mnemonic::Sta, ZeroPage, 3, 2, false, true),
    /* 0x86 */ op(Mnemonic::Stx, ZeroPage, 3, 2, false, true),
    /* 0x87 */ op(Mnemonic::Sax, ZeroPage, 3, 2, false, false),
    /* 0x88 */ op(Mnemonic::Dey, Implicit, 2, 1, false, true),
    /* 0x89 */ op(Mnemonic::Nop, Immediate, 2, 2, false, false),
    /* 0x8A */ op(Mnemonic::Txa, Implicit, 2, 1, false, true),
    /* 0x8B */ op(Mnemonic::Ane, Immediate, 2, 2, false, false),
    /* 0x8C */ op(Mnemonic::Sty, Absolute, 4, 3, false, true),
    /* 0x8D */ op(Mnemonic::Sta, Absolute, 4, 3, false, true),
    /* 0x8E */ op(Mnemonic::Stx, Absolute, 4, 3, false, true),
    /* 0x8F */ op(Mnemonic::Sax, Absolute, 4, 3, false, false),
    /* 0x90 */ op(Mnemonic::Bcc, Relative, 2, 2, false, true),
    /* 0x91 */ op(Mnemonic::Sta, IndirectY, 6, 2, false, true),
    /* 0x92 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0x93 */ op(Mnemonic::Sha, IndirectY, 6, 2, false, false),
    /* 0x94 */ op(Mnemonic::Sty, ZeroPageX, 4, 2, false, true),
    /* 0x95 */ op(Mnemonic::Sta, ZeroPageX, 4, 2, false, true),
    /* 0x96 */ op(Mnemonic::Stx, ZeroPageY, 4, 2, false, true),
    /* 0x97 */ op(Mnemonic::Sax, ZeroPageY, 4, 2, false, false),
    /* 0x98 */ op(Mnemonic::Tya, Implicit, 2, 1, false, true),
    /* 0x99 */ op(Mnemonic::Sta, AbsoluteY, 5, 3, false, true),
    /* 0x9A */ op(Mnemonic::Txs, Implicit, 2, 1, false, true),
    /* 0x9B */ op(Mnemonic::Tas, AbsoluteY, 5, 3, false, false),
    /* 0x9C */ op(Mnemonic::Shy, AbsoluteX, 5, 3, false, false),
    /* 0x9D */ op(Mnemonic::Sta, AbsoluteX, 5, 3, false, true),
    /* 0x9E */ op(Mnemonic::Shx, AbsoluteY, 5, 3, false, false),
    /* 0x9F */ op(Mnemonic::Sha, AbsoluteY, 5, 3, false, false),
    /* 0xA0 */ op(Mnemonic::Ldy, Immediate, 2, 2, false, true),
    /* 0xA1 */ op(Mnemonic::Lda, IndirectX, 6, 2, false, true),
    /* 0xA2 */ op(Mnemonic::Ldx, Immediate, 2, 2, false, true),
    /* 0xA3 */ op(Mnemonic::Lax, IndirectX, 6, 2, false, false),
    /* 0xA4 */ op(Mnemonic::Ldy, ZeroPage, 3, 2, false, true),
    /* 0xA5 */ op(Mnemonic::Lda, ZeroPage, 3, 2, false, true),
    /* 0xA6 */ op(Mnemonic::Ldx, ZeroPage, 3, 2, false, true),
    /* 0xA7 */ op(Mnemonic::Lax, ZeroPage, 3, 2, false, false),
    /* 0xA8 */ op(Mnemonic::Tay, Implicit, 2, 1, false, true),
    /* 0xA9 */ op(Mnemonic::Lda, Immediate, 2, 2, false, true),
    /* 0xAA */ op(Mnemonic::Tax, Implicit, 2, 1, false, true),
    /* 0xAB */ op(Mnemonic::Lxa, Immediate, 2, 2, false, false),
    /* 0xAC */ op(Mnemonic::Ldy, Absolute, 4, 3, false, true),
    /* 0xAD */ op(Mnemonic::Lda, Absolute, 4, 3, false, true),
    /* 0xAE */ op(Mnemonic::Ldx, Absolute, 4, 3, false, true),
    /* 0xAF */ op(Mnemonic::Lax, Absolute, 4, 3, false, false),
    /* 0xB0 */ op(Mnemonic::Bcs, Relative, 2, 2, false, true),
    /* 0xB1 */ op(Mnemonic::Lda, IndirectY, 5, 2, true, true),
    /* 0xB2 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0xB3 */ op(Mnemonic::Lax, IndirectY, 5, 2, true, false),
    /* 0xB4 */ op(Mnemonic::Ldy, ZeroPageX, 4, 2, false, true),
    /* 0xB5 */ op(Mnemonic::Lda, ZeroPageX, 4, 2, false, true),
    /* 0xB6 */ op(Mnemonic::Ldx, ZeroPageY, 4, 2, false, true),
    /* 0xB7 */ op(Mnemonic::Lax, ZeroPageY, 4, 2, false, false),
    /* 0xB8 */ op(Mnemonic::Clv, Implicit, 2, 1, false, true),
    /* 0xB9 */ op(Mnemonic::Lda, AbsoluteY, 4, 3, true, true),
    /* 0xBA */ op(Mnemonic::Tsx, Implicit, 2, 1, false, true),
    /* 0xBB */ op(Mnemonic::Las, AbsoluteY, 4, 3, true, false),
    /* 0xBC */ op(Mnemonic::Ldy, AbsoluteX, 4, 3, true, true),
    /* 0xBD */ op(Mnemonic::Lda, AbsoluteX, 4, 3, true, true),
    /* 0xBE */ op(Mnemonic::Ldx, AbsoluteY, 4, 3, true, true),
    /* 0xBF */ op(Mnemonic::Lax, AbsoluteY, 4, 3, true, false),
    /* 0xC0 */ op(Mnemonic::Cpy, Immediate, 2, 2, false, true),
    /* 0xC1 */ op(Mnemonic::Cmp, IndirectX, 6, 2, false, true),
    /* 0xC2 */ op(Mnemonic::Nop, Immediate, 2, 2, false, false),
    /* 0xC3 */ op(Mnemonic::Dcp, IndirectX, 8, 2, false, false),
    /* 0xC4 */ op(Mnemonic::Cpy, ZeroPage, 3, 2, false, true),
    /* 0xC5 */ op(Mnemonic::Cmp, ZeroPage, 3, 2, false, true),
    /* 0xC6 */ op(Mnemonic::Dec, ZeroPage, 5, 2, false, true),
    /* 0xC7 */ op(Mnemonic::Dcp, ZeroPage, 5, 2, false, false),
    /* 0xC8 */ op(Mnemonic::Iny, Implicit, 2, 1, false, true),
    /* 0xC9 */ op(Mnemonic::Cmp, Immediate, 2, 2, false, true),
    /* 0xCA */ op(Mnemonic::Dex, Implicit, 2, 1, false, true),
    /* 0xCB */ op(Mnemonic::Sbx, Immediate, 2, 2, false, false),
    /* 0xCC */ op(Mnemonic::Cpy, Absolute, 4, 3, false, true),
    /* 0xCD */ op(Mnemonic::Cmp, Absolute, 4, 3, false, true),
    /* 0xCE */ op(Mnemonic::Dec, Absolute, 6, 3, false, true),
    /* 0xCF */ op(Mnemonic::Dcp, Absolute, 6, 3, false, false),
    /* 0xD0 */ op(Mnemonic::Bne, Relative, 2, 2, false, true),
    /* 0xD1 */ op(Mnemonic::Cmp, IndirectY, 5, 2, true, true),
    /* 0xD2 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0xD3 */ op(Mnemonic::Dcp, IndirectY, 8, 2, false, false),
    /* 0xD4 */ op(Mnemonic::Nop, ZeroPageX, 4, 2, false, false),
    /* 0xD5 */ op(Mnemonic::Cmp, ZeroPageX, 4, 2, false, true),
    /* 0xD6 */ op(Mnemonic::Dec, ZeroPageX, 6, 2, false, true),
    /* 0xD7 */ op(Mnemonic::Dcp, ZeroPageX, 6, 2, false, false),
    /* 0xD8 */ op(Mnemonic::Cld, Implicit, 2, 1, false, true),
    /* 0xD9 */ op(Mnemonic::Cmp, AbsoluteY, 4, 3, true, true),
    /* 0xDA */ op(Mnemonic::Nop, Implicit, 2, 1, false, false),
    /* 0xDB */ op(Mnemonic::Dcp, AbsoluteY, 7, 3, false, false),
    /* 0xDC */ op(Mnemonic::Nop, AbsoluteX, 4, 3, true, false),
    /* 0xDD */ op(Mnemonic::Cmp, AbsoluteX, 4, 3, true, true),
    /* 0xDE */ op(Mnemonic::Dec, AbsoluteX, 7, 3, false, true),
    /* 0xDF */ op(Mnemonic::Dcp, AbsoluteX, 7, 3, false, false),
    /* 0xE0 */ op(Mnemonic::Cpx, Immediate, 2, 2, false, true),
    /* 0xE1 */ op(Mnemonic::Sbc, IndirectX, 6, 2, false, true),
    /* 0xE2 */ op(Mnemonic::Nop, Immediate, 2, 2, false, false),
    /* 0xE3 */ op(Mnemonic::Isc, IndirectX, 8, 2, false, false),
    /* 0xE4 */ op(Mnemonic::Cpx, ZeroPage, 3, 2, false, true),
    /* 0xE5 */ op(Mnemonic::Sbc, ZeroPage, 3, 2, false, true),
    /* 0xE6 */ op(Mnemonic::Inc, ZeroPage, 5, 2, false, true),
    /* 0xE7 */ op(Mnemonic::Isc, ZeroPage, 5, 2, false, false),
    /* 0xE8 */ op(Mnemonic::Inx, Implicit, 2, 1, false, true),
    /* 0xE9 */ op(Mnemonic::Sbc, Immediate, 2, 2, false, true),
    /* 0xEA */ op(Mnemonic::Nop, Implicit, 2, 1, false, true),
    /* 0xEB */ op(Mnemonic::Usbc, Immediate, 2, 2, false, false),
    /* 0xEC */ op(Mnemonic::Cpx, Absolute, 4, 3, false, true),
    /* 0xED */ op(Mnemonic::Sbc, Absolute, 4, 3, false, true),
    /* 0xEE */ op(Mnemonic::Inc, Absolute, 6, 3, false, true),
    /* 0xEF */ op(Mnemonic::Isc, Absolute, 6, 3, false, false),
    /* 0xF0 */ op(Mnemonic::Beq, Relative, 2, 2, false, true),
    /* 0xF1 */ op(Mnemonic::Sbc, IndirectY, 5, 2, true, true),
    /* 0xF2 */ op(Mnemonic::Jam, Implicit, 2, 1, false, false),
    /* 0xF3 */ op(Mnemonic::Isc, IndirectY, 8, 2, false, false),
    /* 0xF4 */ op(Mnemonic::Nop, ZeroPageX, 4, 2, false, false),
    /* 0xF5 */ op(Mnemonic::Sbc, ZeroPageX, 4, 2, false, true),
    /* 0xF6 */ op(Mnemonic::Inc, ZeroPageX, 6, 2, false, true),
    /* 0xF7 */ op(Mnemonic::Isc, ZeroPageX, 6, 2, false, false),
    /* 0xF8 */ op(Mnemonic::Sed, Implicit, 2, 1, false, true),
    /* 0xF9 */ op(Mnemonic::Sbc, AbsoluteY, 4, 3, true, true),
    /* 0xFA */ op(Mnemonic::Nop, Implicit, 2, 1, false, false),
    /* 0xFB */ op(Mnemonic::Isc, AbsoluteY, 7, 3, false, false),
    /* 0xFC */ op(Mnemonic::Nop, AbsoluteX, 4, 3, true, false),
    /* 0xFD */ op(Mnemonic::Sbc, AbsoluteX, 4, 3, true, true),
    /* 0xFE */ op(Mnemonic::Inc, AbsoluteX, 7, 3, false, true),
    /* 0xFF */ op(Mnemonic::Isc, AbsoluteX, 7, 3, false, false),
];
