//! Execution trace lines in the layout of the well-known `nestest.log`.
//!
//! ```text
//! C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7
//! ```
//!
//! Capturing a line only reads memory, so it can run before every
//! instruction without disturbing the program.

use std::fmt;

use crate::{AddressingMode, MemoryBus, OpcodeMetadata, CPU, OPCODE_TABLE};

/// One formatted trace line: the instruction at PC plus the register file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub pc: u16,
    /// Raw instruction bytes; only the first `size` are meaningful.
    pub bytes: [u8; 3],
    pub size: u8,
    /// Disassembled instruction, e.g. `LDA ($40),Y`.
    pub instruction: String,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    pub cycles: u64,
}

impl TraceLine {
    pub(crate) fn capture<M: MemoryBus>(cpu: &CPU<M>) -> Self {
        let pc = cpu.pc();
        let opcode = cpu.read_memory(pc);
        let metadata = &OPCODE_TABLE[opcode as usize];
        // BRK's padding byte is not an operand.
        let size = metadata.addressing_mode.operand_bytes() + 1;

        let mut bytes = [opcode, 0, 0];
        for i in 1..size {
            bytes[i as usize] = cpu.read_memory(pc.wrapping_add(i as u16));
        }

        Self {
            pc,
            bytes,
            size,
            instruction: format_instruction(metadata, opcode, &bytes[1..size as usize], pc),
            a: cpu.a(),
            x: cpu.x(),
            y: cpu.y(),
            p: cpu.status(),
            sp: cpu.sp(),
            cycles: cpu.cycles(),
        }
    }
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex: Vec<String> = self.bytes[..self.size as usize]
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect();

        write!(
            f,
            "{:04X}  {:<8}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            self.pc,
            hex.join(" "),
            self.instruction,
            self.a,
            self.x,
            self.y,
            self.p,
            self.sp,
            self.cycles
        )
    }
}

/// Format a single instruction as assembly text.
///
/// `operand` holds the bytes after the opcode; `pc` is the opcode's address,
/// used to turn branch offsets into absolute targets.
pub fn format_instruction(metadata: &OpcodeMetadata, opcode: u8, operand: &[u8], pc: u16) -> String {
    if metadata.is_undefined() {
        return format!(".byte ${:02X}", opcode);
    }

    let text = format_operand(metadata.addressing_mode, operand, pc);
    if text.is_empty() {
        metadata.mnemonic.to_string()
    } else {
        format!("{} {}", metadata.mnemonic, text)
    }
}

fn format_operand(mode: AddressingMode, operand: &[u8], pc: u16) -> String {
    use AddressingMode::*;

    let byte = operand.first().copied().unwrap_or(0);
    let word = u16::from_le_bytes([byte, operand.get(1).copied().unwrap_or(0)]);

    match mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Relative => {
            let target = pc.wrapping_add(2).wrapping_add_signed(byte as i8 as i16);
            format!("${:04X}", target)
        }
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn cpu_at_c000(bytes: &[u8]) -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0xC0);
        mem.load(0xC000, bytes);
        CPU::new(mem)
    }

    #[test]
    fn test_nestest_first_line() {
        let mut cpu = cpu_at_c000(&[0x4C, 0xF5, 0xC5]);
        cpu.set_flag_i(true);
        cpu.cycles = 7;

        assert_eq!(
            cpu.trace_line().to_string(),
            "C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:7"
        );
    }

    #[test]
    fn test_branch_target_is_absolute() {
        let cpu = cpu_at_c000(&[0xD0, 0xFE]);
        assert_eq!(cpu.trace_line().instruction, "BNE $C000");
    }

    #[test]
    fn test_operand_formats() {
        let cases: [(u8, &[u8], &str); 6] = [
            (0xA9, &[0x05], "LDA #$05"),
            (0xB1, &[0x40], "LDA ($40),Y"),
            (0x81, &[0x20], "STA ($20,X)"),
            (0x6C, &[0xFF, 0x10], "JMP ($10FF)"),
            (0x0A, &[], "ASL A"),
            (0x04, &[0x10], ".byte $04"),
        ];

        for (opcode, operand, expected) in cases {
            let metadata = &OPCODE_TABLE[opcode as usize];
            assert_eq!(format_instruction(metadata, opcode, operand, 0x8000), expected);
        }
    }

    #[test]
    fn test_brk_shows_single_byte() {
        let cpu = cpu_at_c000(&[0x00, 0xFF]);
        let line = cpu.trace_line();
        assert_eq!(line.size, 1);
        assert_eq!(line.instruction, "BRK");
    }
}
