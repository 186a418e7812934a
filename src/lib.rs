//! # 2A03 CPU Core
//!
//! An instruction-level interpreter for the 6502 core inside the Ricoh 2A03,
//! the NES CPU. The 2A03 is an NMOS 6502 with the decimal ALU removed: the D
//! flag can be set and cleared but ADC and SBC are always binary.
//!
//! This crate provides the CPU state, a trait-based memory bus, a table-driven
//! opcode decoder, the addressing-mode resolver and an interrupt sequencer
//! for reset, NMI and IRQ.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib2a03::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // LDA #$05; STA $10; LDA $10; ADC #$03
//! memory.load(0x8000, &[0xA9, 0x05, 0x85, 0x10, 0xA5, 0x10, 0x69, 0x03]);
//!
//! let mut cpu = CPU::new(memory);
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//!
//! for _ in 0..4 {
//!     cpu.step().unwrap();
//! }
//! assert_eq!(cpu.a(), 0x08);
//! assert_eq!(cpu.cycles(), 10);
//! ```
//!
//! ## Architecture
//!
//! - **Bus abstraction**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Table-driven decoding**: every opcode's mnemonic, mode, size and cycles live in `OPCODE_TABLE`
//! - **Deterministic**: no global state, no OS dependencies; runs under WebAssembly
//!
//! ## Modules
//!
//! - `cpu` - CPU state and the step loop
//! - `status` - Processor status flags
//! - `memory` - MemoryBus trait and a flat 64KB implementation
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing modes and operand resolution
//! - `interrupts` - Reset/NMI/IRQ latches and servicing
//! - `config` - Behavior switches for a CPU instance
//! - `snapshot` - Save states
//! - `trace` - nestest-style execution trace lines
//!
//! ## Logging
//!
//! The crate logs through the `log` facade: `debug` for resets and interrupt
//! entry, `warn` for undefined opcodes, and one `trace` line per instruction
//! when [`CpuConfig::trace`] is enabled.

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod interrupts;
pub mod memory;
pub mod opcodes;
pub mod snapshot;
pub mod status;
pub mod trace;

// Internal instruction implementations (not part of public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::{CpuConfig, UndefinedOpcodePolicy};
pub use cpu::CPU;
pub use interrupts::{InterruptState, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use snapshot::CpuSnapshot;
pub use status::Status;
pub use trace::TraceLine;

/// Errors that can occur during CPU execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// An opcode with no documented meaning was fetched while the CPU runs
    /// under [`UndefinedOpcodePolicy::Error`].
    ///
    /// The opcode has already been consumed: PC points past it and its
    /// cycles have been charged.
    UndefinedOpcode {
        /// The opcode byte.
        opcode: u8,
        /// Address the opcode was fetched from.
        address: u16,
    },
}

impl std::fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ExecutionError::UndefinedOpcode { opcode, address } => {
                write!(f, "Undefined opcode 0x{:02X} at ${:04X}", opcode, address)
            }
        }
    }
}

impl std::error::Error for ExecutionError {}
