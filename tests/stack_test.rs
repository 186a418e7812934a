//! Tests for PHA, PHP, PLA and PLP.

use lib2a03::{CpuConfig, FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_pha_pla_round_trip() {
    let mut cpu = setup_cpu();
    cpu.set_a(0x80);
    // PHA; LDA #$00; PLA
    cpu.load_memory(0x8000, &[0x48, 0xA9, 0x00, 0x68]);

    assert_eq!(cpu.step(), Ok(3));
    assert_eq!(cpu.sp(), 0xFC);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);

    cpu.step().unwrap();
    assert!(cpu.flag_z());

    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(cpu.a(), 0x80);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_php_sets_break_and_unused_by_default() {
    let mut cpu = setup_cpu();
    cpu.set_flag_c(true);
    cpu.load_memory(0x8000, &[0x08]);

    assert_eq!(cpu.step(), Ok(3));

    assert_eq!(cpu.memory().read(0x01FD), 0x31);
    // Live status keeps B clear.
    assert!(!cpu.flag_b());
}

#[test]
fn test_php_without_break() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CPU::with_config(memory, CpuConfig::default().with_php_sets_break(false));
    cpu.set_flag_c(true);
    cpu.load_memory(0x8000, &[0x08]);

    cpu.step().unwrap();

    assert_eq!(cpu.memory().read(0x01FD), 0x21);
}

#[test]
fn test_plp_applies_every_bit() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0xFC);
    cpu.memory_mut().write(0x01FD, 0xCF);
    cpu.load_memory(0x8000, &[0x28]);

    assert_eq!(cpu.step(), Ok(4));

    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_b());
    assert_eq!(cpu.status(), 0xEF);
}

#[test]
fn test_php_plp_round_trip() {
    let mut cpu = setup_cpu();
    cpu.set_status(0xC3);
    // PHP; CLC; CLV; PLP
    cpu.load_memory(0x8000, &[0x08, 0x18, 0xB8, 0x28]);

    for _ in 0..4 {
        cpu.step().unwrap();
    }

    assert!(cpu.flag_c());
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(cpu.flag_z());
    assert_eq!(cpu.sp(), 0xFD);
}

#[test]
fn test_push_wraps_stack_page() {
    let mut cpu = setup_cpu();
    cpu.set_sp(0x00);
    cpu.set_a(0x5A);
    cpu.load_memory(0x8000, &[0x48, 0x68]);

    cpu.step().unwrap();
    assert_eq!(cpu.memory().read(0x0100), 0x5A);
    assert_eq!(cpu.sp(), 0xFF);

    cpu.step().unwrap();
    assert_eq!(cpu.sp(), 0x00);
    assert_eq!(cpu.a(), 0x5A);
}
