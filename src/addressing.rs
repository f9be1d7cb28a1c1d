//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502/6510. Each mode
//! determines how many operand bytes follow the opcode and how the CPU forms
//! the effective address from them.

/// 6502 addressing modes.
///
/// # Examples
///
/// ```
/// use lib6510::AddressingMode;
///
/// assert_eq!(AddressingMode::Absolute.operand_bytes(), 2);
/// assert_eq!(AddressingMode::ZeroPageX.operand_bytes(), 1);
/// assert!(AddressingMode::AbsoluteY.is_indexed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// No operand (e.g. `CLC`, `RTS`).
    Implicit,

    /// Operates on the accumulator (e.g. `LSR A`).
    Accumulator,

    /// 8-bit constant follows the opcode (`LDA #$10`).
    Immediate,

    /// 8-bit address in page zero.
    ZeroPage,

    /// Page-zero address plus X, wrapping within page zero.
    ZeroPageX,

    /// Page-zero address plus Y, wrapping within page zero.
    ZeroPageY,

    /// Signed 8-bit branch offset relative to the next instruction.
    Relative,

    /// Full 16-bit address.
    Absolute,

    /// 16-bit address plus X.
    AbsoluteX,

    /// 16-bit address plus Y.
    AbsoluteY,

    /// `JMP ($xxxx)`, with the NMOS page-wrap bug on the pointer high byte.
    Indirect,

    /// `($zp,X)`: pointer in page zero at zp+X.
    IndirectX,

    /// `($zp),Y`: pointer in page zero, then plus Y.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
            _ => 1,
        }
    }

    /// Returns true for modes whose effective address is formed by adding an
    /// index register to a 16-bit base, where a page crossing costs a tact.
    pub fn is_indexed(self) -> bool {
        matches!(
            self,
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY | AddressingMode::IndirectY
        )
    }
}
