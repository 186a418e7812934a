//! CPU snapshots for save states and test fixtures.
//!
//! A snapshot holds processor state only. Memory belongs to the bus and is
//! saved by whoever owns it.

use crate::Status;

/// Registers, flags, cycle count and interrupt latches of a [`crate::CPU`].
///
/// Serializable with the `serde` feature.
///
/// # Examples
///
/// ```
/// use lib2a03::{CPU, FlatMemory};
///
/// let mut cpu = CPU::new(FlatMemory::new());
/// cpu.set_x(0x10);
/// let saved = cpu.snapshot();
///
/// cpu.set_x(0x99);
/// cpu.restore(&saved);
/// assert_eq!(cpu.x(), 0x10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuSnapshot {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub pc: u16,
    pub sp: u8,
    pub status: Status,
    pub cycles: u64,
    pub nmi_pending: bool,
    pub irq_pending: bool,
}
