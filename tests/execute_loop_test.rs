//! Tests for the fetch-decode-execute loop.
//!
//! Tests cover:
//! - A short program run end to end
//! - `run_for_cycles` budget handling
//! - Undefined opcode policies
//! - Trace lines

use lib2a03::{CpuConfig, ExecutionError, FlatMemory, MemoryBus, UndefinedOpcodePolicy, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_load_store_add_program() {
    let mut cpu = setup_cpu();
    // LDA #$05; STA $10; LDA $10; ADC #$03
    cpu.load_memory(0x8000, &[0xA9, 0x05, 0x85, 0x10, 0xA5, 0x10, 0x69, 0x03]);
    let start = cpu.cycles();

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert_eq!(cpu.a(), 0x08);
    assert!(!cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(cpu.read_memory(0x0010), 0x05);
    assert_eq!(cpu.cycles() - start, 10);
    assert_eq!(cpu.pc(), 0x8008);
}

#[test]
fn test_countdown_loop() {
    let mut cpu = setup_cpu();
    // LDX #$03; loop: DEX; BNE loop; NOP
    cpu.load_memory(0x8000, &[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0xEA]);

    // LDX(2) + 3*DEX(2) + 2 taken BNE(3) + 1 untaken BNE(2)
    let spent = cpu.run_for_cycles(16).unwrap();

    assert_eq!(spent, 16);
    assert_eq!(cpu.x(), 0);
    assert!(cpu.flag_z());
    assert_eq!(cpu.pc(), 0x8005);
}

#[test]
fn test_run_for_cycles_overshoots_to_instruction_boundary() {
    let mut cpu = setup_cpu();
    cpu.load_memory(0x8000, &[0xAD, 0x00, 0x02, 0xAD, 0x00, 0x02]);

    assert_eq!(cpu.run_for_cycles(5), Ok(8));
    assert_eq!(cpu.run_for_cycles(0), Ok(0));
}

#[test]
fn test_undefined_opcode_nop_policy_consumes_operands() {
    let mut cpu = setup_cpu();
    // 0x0C: undefined, absolute mode on NMOS
    cpu.load_memory(0x8000, &[0x0C, 0x34, 0x12, 0xEA]);

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.cycles(), 3);
}

#[test]
fn test_undefined_opcode_error_policy() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.write(0x8000, 0x02);
    let config = CpuConfig::default().with_undefined_opcode(UndefinedOpcodePolicy::Error);
    let mut cpu = CPU::with_config(memory, config);

    let err = cpu.step().unwrap_err();

    assert_eq!(
        err,
        ExecutionError::UndefinedOpcode {
            opcode: 0x02,
            address: 0x8000
        }
    );
    assert_eq!(err.to_string(), "Undefined opcode 0x02 at $8000");
    assert_eq!(cpu.pc(), 0x8001);
    assert_eq!(cpu.cycles(), 2);
}

#[test]
fn test_run_for_cycles_stops_on_error() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    memory.load(0x8000, &[0xEA, 0xEA, 0x02, 0xEA]);
    let config = CpuConfig::default().with_undefined_opcode(UndefinedOpcodePolicy::Error);
    let mut cpu = CPU::with_config(memory, config);

    assert!(cpu.run_for_cycles(100).is_err());
    assert_eq!(cpu.pc(), 0x8003);
}

#[test]
fn test_trace_line_matches_nestest_layout() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0xC0]);
    memory.load(0xC000, &[0xA2, 0x00, 0x86, 0x00]);
    let mut cpu = CPU::new(memory);

    cpu.step().unwrap();
    let line = cpu.trace_line();

    assert_eq!(line.pc, 0xC002);
    assert_eq!(line.instruction, "STX $00");
    assert_eq!(
        line.to_string(),
        format!("C002  86 00     {:<32}A:00 X:00 Y:00 P:22 SP:FD CYC:2", "STX $00")
    );
}

#[test]
fn test_trace_config_does_not_change_execution() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    memory.load(0x8000, &[0xA9, 0x01, 0x0A]);
    let mut cpu = CPU::with_config(memory, CpuConfig::default().with_trace(true));

    assert_eq!(cpu.run_for_cycles(4), Ok(4));
    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.config().trace);
}
