//! # Opcode Metadata Table
//!
//! This module contains the 256-entry opcode table that drives decoding. Every
//! byte value maps to a mnemonic, an addressing mode, a base cycle cost and
//! whether the instruction pays the indexed page-crossing penalty.
//!
//! The table covers:
//! - **151 documented instructions** - Official NMOS 6502 opcodes
//! - **105 undefined opcodes** - [`Mnemonic::Undefined`], executed as no-ops
//!
//! Undefined opcodes keep the addressing mode the NMOS decoder assigns to
//! their byte, so they consume the same operand bytes as real silicon. Their
//! cost is the cheapest documented instruction in that addressing mode.

use std::fmt;

use crate::addressing::AddressingMode;

/// Instruction mnemonics of the documented 6502 instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
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
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Any opcode outside the documented set.
    Undefined,
}

impl Mnemonic {
    /// Three-letter assembler name, `"???"` for undefined opcodes.
    pub const fn as_str(self) -> &'static str {
        use Mnemonic::*;
        match self {
            Adc => "ADC",
            And => "AND",
            Asl => "ASL",
            Bcc => "BCC",
            Bcs => "BCS",
            Beq => "BEQ",
            Bit => "BIT",
            Bmi => "BMI",
            Bne => "BNE",
            Bpl => "BPL",
            Brk => "BRK",
            Bvc => "BVC",
            Bvs => "BVS",
            Clc => "CLC",
            Cld => "CLD",
            Cli => "CLI",
            Clv => "CLV",
            Cmp => "CMP",
            Cpx => "CPX",
            Cpy => "CPY",
            Dec => "DEC",
            Dex => "DEX",
            Dey => "DEY",
            Eor => "EOR",
            Inc => "INC",
            Inx => "INX",
            Iny => "INY",
            Jmp => "JMP",
            Jsr => "JSR",
            Lda => "LDA",
            Ldx => "LDX",
            Ldy => "LDY",
            Lsr => "LSR",
            Nop => "NOP",
            Ora => "ORA",
            Pha => "PHA",
            Php => "PHP",
            Pla => "PLA",
            Plp => "PLP",
            Rol => "ROL",
            Ror => "ROR",
            Rti => "RTI",
            Rts => "RTS",
            Sbc => "SBC",
            Sec => "SEC",
            Sed => "SED",
            Sei => "SEI",
            Sta => "STA",
            Stx => "STX",
            Sty => "STY",
            Tax => "TAX",
            Tay => "TAY",
            Tsx => "TSX",
            Txa => "TXA",
            Txs => "TXS",
            Tya => "TYA",
            Undefined => "???",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for a single 6502 opcode.
///
/// # Examples
///
/// ```
/// use lib2a03::{AddressingMode, Mnemonic, OPCODE_TABLE};
///
/// // Look up LDA immediate (opcode 0xA9)
/// let lda_imm = &OPCODE_TABLE[0xA9];
/// assert_eq!(lda_imm.mnemonic, Mnemonic::Lda);
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    /// Instruction mnemonic.
    pub mnemonic: Mnemonic,

    /// Addressing mode for this instruction.
    pub addressing_mode: AddressingMode,

    /// Base cycle cost, before page-crossing and branch penalties.
    pub base_cycles: u8,

    /// Total instruction size in bytes (opcode + operands).
    ///
    /// BRK is 2: the byte after it is skipped by the return address.
    pub size_bytes: u8,

    /// Whether crossing a page while indexing costs one extra cycle.
    ///
    /// Only read-type instructions on AbsoluteX, AbsoluteY and IndirectY set this.
    pub page_cross_penalty: bool,
}

impl OpcodeMetadata {
    /// True for opcodes outside the documented instruction set.
    pub const fn is_undefined(&self) -> bool {
        matches!(self.mnemonic, Mnemonic::Undefined)
    }
}

const fn op(mnemonic: Mnemonic, addressing_mode: AddressingMode, base_cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        mnemonic,
        addressing_mode,
        base_cycles,
        size_bytes: addressing_mode.operand_bytes() + 1,
        page_cross_penalty: false,
    }
}

const fn op_read(mnemonic: Mnemonic, addressing_mode: AddressingMode, base_cycles: u8) -> OpcodeMetadata {
    OpcodeMetadata {
        page_cross_penalty: true,
        ..op(mnemonic, addressing_mode, base_cycles)
    }
}

const fn undef(addressing_mode: AddressingMode) -> OpcodeMetadata {
    op(Mnemonic::Undefined, addressing_mode, undefined_cycles(addressing_mode))
}

/// Cost charged for an undefined opcode: the cheapest documented
/// instruction sharing its addressing mode.
pub const fn undefined_cycles(mode: AddressingMode) -> u8 {
    use AddressingMode::*;
    match mode {
        Implicit | Accumulator | Immediate | Relative => 2,
        ZeroPage | Absolute => 3,
        ZeroPageX | ZeroPageY | AbsoluteX | AbsoluteY => 4,
        IndirectY | Indirect => 5,
        IndirectX => 6,
    }
}

/// Complete 256-entry opcode table indexed by opcode byte value.
///
/// # Examples
///
/// ```
/// use lib2a03::{Mnemonic, OPCODE_TABLE};
///
/// let brk = &OPCODE_TABLE[0x00];
/// assert_eq!(brk.mnemonic, Mnemonic::Brk);
/// assert_eq!(brk.size_bytes, 2);
///
/// let undefined = &OPCODE_TABLE[0x02];
/// assert!(undefined.is_undefined());
/// assert_eq!(undefined.base_cycles, 2);
/// ```
#[rustfmt::skip]
pub const OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use AddressingMode::*;
    use Mnemonic::*;

    const BRK: OpcodeMetadata = OpcodeMetadata {
        size_bytes: 2,
        ..op(Brk, Implicit, 7)
    };

    [
        // 0x00
        BRK, op(Ora, IndirectX, 6), undef(Implicit), undef(IndirectX),
        undef(ZeroPage), op(Ora, ZeroPage, 3), op(Asl, ZeroPage, 5), undef(ZeroPage),
        op(Php, Implicit, 3), op(Ora, Immediate, 2), op(Asl, Accumulator, 2), undef(Immediate),
        undef(Absolute), op(Ora, Absolute, 4), op(Asl, Absolute, 6), undef(Absolute),
        // 0x10
        op(Bpl, Relative, 2), op_read(Ora, IndirectY, 5), undef(Implicit), undef(IndirectY),
        undef(ZeroPageX), op(Ora, ZeroPageX, 4), op(Asl, ZeroPageX, 6), undef(ZeroPageX),
        op(Clc, Implicit, 2), op_read(Ora, AbsoluteY, 4), undef(Implicit), undef(AbsoluteY),
        undef(AbsoluteX), op_read(Ora, AbsoluteX, 4), op(Asl, AbsoluteX, 7), undef(AbsoluteX),
        // 0x20
        op(Jsr, Absolute, 6), op(And, IndirectX, 6), undef(Implicit), undef(IndirectX),
        op(Bit, ZeroPage, 3), op(And, ZeroPage, 3), op(Rol, ZeroPage, 5), undef(ZeroPage),
        op(Plp, Implicit, 4), op(And, Immediate, 2), op(Rol, Accumulator, 2), undef(Immediate),
        op(Bit, Absolute, 4), op(And, Absolute, 4), op(Rol, Absolute, 6), undef(Absolute),
        // 0x30
        op(Bmi, Relative, 2), op_read(And, IndirectY, 5), undef(Implicit), undef(IndirectY),
        undef(ZeroPageX), op(And, ZeroPageX, 4), op(Rol, ZeroPageX, 6), undef(ZeroPageX),
        op(Sec, Implicit, 2), op_read(And, AbsoluteY, 4), undef(Implicit), undef(AbsoluteY),
        undef(AbsoluteX), op_read(And, AbsoluteX, 4), op(Rol, AbsoluteX, 7), undef(AbsoluteX),
        // 0x40
        op(Rti, Implicit, 6), op(Eor, IndirectX, 6), undef(Implicit), undef(IndirectX),
        undef(ZeroPage), op(Eor, ZeroPage, 3), op(Lsr, ZeroPage, 5), undef(ZeroPage),
        op(Pha, Implicit, 3), op(Eor, Immediate, 2), op(Lsr, Accumulator, 2), undef(Immediate),
        op(Jmp, Absolute, 3), op(Eor, Absolute, 4), op(Lsr, Absolute, 6), undef(Absolute),
        // 0x50
        op(Bvc, Relative, 2), op_read(Eor, IndirectY, 5), undef(Implicit), undef(IndirectY),
        undef(ZeroPageX), op(Eor, ZeroPageX, 4), op(Lsr, ZeroPageX, 6), undef(ZeroPageX),
        op(Cli, Implicit, 2), op_read(Eor, AbsoluteY, 4), undef(Implicit), undef(AbsoluteY),
        undef(AbsoluteX), op_read(Eor, AbsoluteX, 4), op(Lsr, AbsoluteX, 7), undef(AbsoluteX),
        // 0x60
        op(Rts, Implicit, 6), op(Adc, IndirectX, 6), undef(Implicit), undef(IndirectX),
        undef(ZeroPage), op(Adc, ZeroPage, 3), op(Ror, ZeroPage, 5), undef(ZeroPage),
        op(Pla, Implicit, 4), op(Adc, Immediate, 2), op(Ror, Accumulator, 2), undef(Immediate),
        op(Jmp, Indirect, 5), op(Adc, Absolute, 4), op(Ror, Absolute, 6), undef(Absolute),
        // 0x70
        op(Bvs, Relative, 2), op_read(Adc, IndirectY, 5), undef(Implicit), undef(IndirectY),
        undef(ZeroPageX), op(Adc, ZeroPageX, 4), op(Ror, ZeroPageX, 6), undef(ZeroPageX),
        op(Sei, Implicit, 2), op_read(Adc, AbsoluteY, 4), undef(Implicit), undef(AbsoluteY),
        undef(AbsoluteX), op_read(Adc, AbsoluteX, 4), op(Ror, AbsoluteX, 7), undef(AbsoluteX),
        // 0x80
        undef(Immediate), op(Sta, IndirectX, 6), undef(Immediate), undef(IndirectX),
        op(Sty, ZeroPage, 3), op(Sta, ZeroPage, 3), op(Stx, ZeroPage, 3), undef(ZeroPage),
        op(Dey, Implicit, 2), undef(Immediate), op(Txa, Implicit, 2), undef(Immediate),
        op(Sty, Absolute, 4), op(Sta, Absolute, 4), op(Stx, Absolute, 4), undef(Absolute),
        // 0x90
        op(Bcc, Relative, 2), op(Sta, IndirectY, 6), undef(Implicit), undef(IndirectY),
        op(Sty, ZeroPageX, 4), op(Sta, ZeroPageX, 4), op(Stx, ZeroPageY, 4), undef(ZeroPageY),
        op(Tya, Implicit, 2), op(Sta, AbsoluteY, 5), op(Txs, Implicit, 2), undef(AbsoluteY),
        undef(AbsoluteX), op(Sta, AbsoluteX, 5), undef(AbsoluteY), undef(AbsoluteY),
        // 0xA0
        op(Ldy, Immediate, 2), op(Lda, IndirectX, 6), op(Ldx, Immediate, 2), undef(IndirectX),
        op(Ldy, ZeroPage, 3), op(Lda, ZeroPage, 3), op(Ldx, ZeroPage, 3), undef(ZeroPage),
        op(Tay, Implicit, 2), op(Lda, Immediate, 2), op(Tax, Implicit, 2), undef(Immediate),
        op(Ldy, Absolute, 4), op(Lda, Absolute, 4), op(Ldx, Absolute, 4), undef(Absolute),
        // 0xB0
        op(Bcs, Relative, 2), op_read(Lda, IndirectY, 5), undef(Implicit), undef(IndirectY),
        op(Ldy, ZeroPageX, 4), op(Lda, ZeroPageX, 4), op(Ldx, ZeroPageY, 4), undef(ZeroPageY),
        op(Clv, Implicit, 2), op_read(Lda, AbsoluteY, 4), op(Tsx, Implicit, 2), undef(AbsoluteY),
        op_read(Ldy, AbsoluteX, 4), op_read(Lda, AbsoluteX, 4), op_read(Ldx, AbsoluteY, 4), undef(AbsoluteY),
        // 0xC0
        op(Cpy, Immediate, 2), op(Cmp, IndirectX, 6), undef(Immediate), undef(IndirectX),
        op(Cpy, ZeroPage, 3), op(Cmp, ZeroPage, 3), op(Dec, ZeroPage, 5), undef(ZeroPage),
        op(Iny, Implicit, 2), op(Cmp, Immediate, 2), op(Dex, Implicit, 2), undef(Immediate),
        op(Cpy, Absolute, 4), op(Cmp, Absolute, 4), op(Dec, Absolute, 6), undef(Absolute),
        // 0xD0
        op(Bne, Relative, 2), op_read(Cmp, IndirectY, 5), undef(Implicit), undef(IndirectY),
        undef(ZeroPageX), op(Cmp, ZeroPageX, 4), op(Dec, ZeroPageX, 6), undef(ZeroPageX),
        op(Cld, Implicit, 2), op_read(Cmp, AbsoluteY, 4), undef(Implicit), undef(AbsoluteY),
        undef(AbsoluteX), op_read(Cmp, AbsoluteX, 4), op(Dec, AbsoluteX, 7), undef(AbsoluteX),
        // 0xE0
        op(Cpx, Immediate, 2), op(Sbc, IndirectX, 6), undef(Immediate), undef(IndirectX),
        op(Cpx, ZeroPage, 3), op(Sbc, ZeroPage, 3), op(Inc, ZeroPage, 5), undef(ZeroPage),
        op(Inx, Implicit, 2), op(Sbc, Immediate, 2), op(Nop, Implicit, 2), undef(Immediate),
        op(Cpx, Absolute, 4), op(Sbc, Absolute, 4), op(Inc, Absolute, 6), undef(Absolute),
        // 0xF0
        op(Beq, Relative, 2), op_read(Sbc, IndirectY, 5), undef(Implicit), undef(IndirectY),
        undef(ZeroPageX), op(Sbc, ZeroPageX, 4), op(Inc, ZeroPageX, 6), undef(ZeroPageX),
        op(Sed, Implicit, 2), op_read(Sbc, AbsoluteY, 4), undef(Implicit), undef(AbsoluteY),
        undef(AbsoluteX), op_read(Sbc, AbsoluteX, 4), op(Inc, AbsoluteX, 7), undef(AbsoluteX),
    ]
};
