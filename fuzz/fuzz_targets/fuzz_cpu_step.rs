//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register file, interrupt lines and memory image,
//! then runs a handful of steps checking the invariants that must hold for
//! every opcode and every interrupt entry.

#![no_main]

use arbitrary::Arbitrary;
use lib2a03::{CpuConfig, FlatMemory, UndefinedOpcodePolicy, CPU};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzLines {
    nmi: bool,
    irq: bool,
    reset: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    lines: FuzzLines,
    strict: bool,
    /// Program bytes placed at the reset target
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Lands at 0x4000 for absolute/indexed operands
    main_memory: [u8; 256],
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0xA0, 0x00, 0x80, 0x00, 0x90]);
    memory.load(0x8000, &input.program);
    memory.load(0x0000, &input.zero_page);
    memory.load(0x0100, &input.stack_page);
    memory.load(0x4000, &input.main_memory);

    let policy = if input.strict {
        UndefinedOpcodePolicy::Error
    } else {
        UndefinedOpcodePolicy::Nop
    };
    let mut cpu = CPU::with_config(memory, CpuConfig::default().with_undefined_opcode(policy));

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    if input.lines.nmi {
        cpu.raise_nmi();
    }
    cpu.raise_irq(input.lines.irq);
    if input.lines.reset {
        cpu.request_reset();
    }

    for _ in 0..input.steps % 8 {
        let before = cpu.cycles();
        match cpu.step() {
            Ok(cycles) => {
                // Longest instruction is 7 cycles; an indexed read can add 1
                // and a taken branch at most 2 on a base of 2.
                assert!(cycles <= 7);
                assert_eq!(cpu.cycles(), before + cycles as u64);
            }
            Err(_) => {
                assert!(input.strict);
                break;
            }
        }
        assert_eq!(cpu.status() & 0x20, 0x20);
    }
});
