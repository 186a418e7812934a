//! # Addressing Modes
//!
//! This module defines the 13 addressing modes of the 6502 and the resolver that
//! turns an instruction's operand bytes into an [`Operand`].
//!
//! The resolver runs with PC pointing at the first operand byte (the opcode has
//! already been fetched) and leaves PC at the next instruction.

use crate::{MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// The resolved address is the operand byte itself.
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ZeroPage,

    /// Zero page address indexed by X register, wraps within zero page.
    ZeroPageX,

    /// Zero page address indexed by Y register, wraps within zero page.
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions, relative to the next instruction.
    Relative,

    /// Full 16-bit address.
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Read-type instructions pay +1 cycle when a page boundary is crossed.
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Read-type instructions pay +1 cycle when a page boundary is crossed.
    AbsoluteY,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Reproduces the NMOS page-wrap bug: `JMP ($10FF)` takes its high byte
    /// from `$1000`, not `$1100`.
    Indirect,

    /// Indexed indirect: `(zp + X)` then dereference, pointer stays in zero page.
    IndirectX,

    /// Indirect indexed: zero page dereference then `+ Y`.
    ///
    /// Read-type instructions pay +1 cycle when a page boundary is crossed.
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        use AddressingMode::*;
        match self {
            Implicit | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | Relative | IndirectX | IndirectY => 1,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 2,
        }
    }
}

/// Where an instruction reads its operand from or writes its result to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// No operand.
    Implied,
    /// The accumulator register.
    Accumulator,
    /// An effective memory address (for Immediate, the operand byte's address;
    /// for Relative, the branch target).
    Address(u16),
}

/// Result of resolving an addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Resolved {
    pub operand: Operand,
    /// True when indexing (or a branch) moved the address onto another page.
    pub page_crossed: bool,
}

impl Resolved {
    const fn at(address: u16) -> Self {
        Self {
            operand: Operand::Address(address),
            page_crossed: false,
        }
    }

    const fn indexed(base: u16, address: u16) -> Self {
        Self {
            operand: Operand::Address(address),
            page_crossed: base & 0xFF00 != address & 0xFF00,
        }
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Reads the byte at PC and advances PC.
    #[inline]
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    #[inline]
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    /// Reads a little-endian word from `address` and `address + 1`.
    pub(crate) fn read_word(&self, address: u16) -> u16 {
        let lo = self.memory.read(address) as u16;
        let hi = self.memory.read(address.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }

    /// Reads a pointer from zero page; the high byte wraps to `$00` after `$FF`.
    fn read_zero_page_word(&self, pointer: u8) -> u16 {
        let lo = self.memory.read(pointer as u16) as u16;
        let hi = self.memory.read(pointer.wrapping_add(1) as u16) as u16;
        (hi << 8) | lo
    }

    /// Resolves the operand for `mode`, consuming its operand bytes.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Resolved {
        match mode {
            AddressingMode::Implicit => Resolved {
                operand: Operand::Implied,
                page_crossed: false,
            },
            AddressingMode::Accumulator => Resolved {
                operand: Operand::Accumulator,
                page_crossed: false,
            },
            AddressingMode::Immediate => {
                let address = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Resolved::at(address)
            }
            AddressingMode::ZeroPage => {
                let zp = self.fetch_byte();
                Resolved::at(zp as u16)
            }
            AddressingMode::ZeroPageX => {
                let zp = self.fetch_byte().wrapping_add(self.x);
                Resolved::at(zp as u16)
            }
            AddressingMode::ZeroPageY => {
                let zp = self.fetch_byte().wrapping_add(self.y);
                Resolved::at(zp as u16)
            }
            AddressingMode::Relative => {
                let offset = self.fetch_byte() as i8;
                let next = self.pc;
                Resolved::indexed(next, next.wrapping_add_signed(offset as i16))
            }
            AddressingMode::Absolute => {
                let address = self.fetch_word();
                Resolved::at(address)
            }
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                Resolved::indexed(base, base.wrapping_add(self.x as u16))
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                Resolved::indexed(base, base.wrapping_add(self.y as u16))
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let lo = self.memory.read(pointer) as u16;
                // The high byte never carries into the next page.
                let hi_addr = (pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF);
                let hi = self.memory.read(hi_addr) as u16;
                Resolved::at((hi << 8) | lo)
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte().wrapping_add(self.x);
                Resolved::at(self.read_zero_page_word(pointer))
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte();
                let base = self.read_zero_page_word(pointer);
                Resolved::indexed(base, base.wrapping_add(self.y as u16))
            }
        }
    }
}
