//! Save-state serialization, only built with the `serde` feature.

#![cfg(feature = "serde")]

use lib2a03::{CpuConfig, CpuSnapshot, FlatMemory, MemoryBus, Status, UndefinedOpcodePolicy, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

#[test]
fn test_snapshot_survives_json() {
    let mut cpu = setup_cpu();
    cpu.load_memory(0x8000, &[0xA9, 0x80, 0xAA]);
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.raise_irq(true);

    let json = serde_json::to_string(&cpu.snapshot()).unwrap();
    let restored: CpuSnapshot = serde_json::from_str(&json).unwrap();

    let mut other = setup_cpu();
    other.restore(&restored);

    assert_eq!(other.a(), 0x80);
    assert_eq!(other.x(), 0x80);
    assert_eq!(other.pc(), 0x8003);
    assert_eq!(other.cycles(), 4);
    assert!(other.flag_n());
    assert!(other.irq_pending());
    assert_eq!(other.snapshot(), cpu.snapshot());
}

#[test]
fn test_status_and_config_serialize() {
    let status = Status::CARRY | Status::NEGATIVE;
    let json = serde_json::to_string(&status).unwrap();
    assert_eq!(serde_json::from_str::<Status>(&json).unwrap(), status);

    let config = CpuConfig::default().with_undefined_opcode(UndefinedOpcodePolicy::Error);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(serde_json::from_str::<CpuConfig>(&json).unwrap(), config);
}
