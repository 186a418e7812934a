//! # Memory Bus Abstraction
//!
//! The `MemoryBus` trait decouples the CPU from whatever sits behind the
//! address lines: a flat 64KB image in tests, or a cartridge mapper and
//! memory-mapped PPU/APU registers in a full console.
//!
//! The trait follows 6502 hardware behavior:
//! - No bus errors - reads/writes always succeed
//! - Every `u16` is a valid address, so out-of-range access cannot happen
//! - Devices may hold the shared IRQ line through [`MemoryBus::irq_active`]

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use lib2a03::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib2a03::MemoryBus;
///
/// /// 2KB of work RAM mirrored through 0x0000-0x1FFF, PRG ROM at 0x8000.
/// struct ConsoleBus {
///     ram: [u8; 0x0800],
///     prg: Vec<u8>,
/// }
///
/// impl MemoryBus for ConsoleBus {
///     fn read(&self, addr: u16) -> u8 {
///         match addr {
///             0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
///             0x8000..=0xFFFF => self.prg[(addr as usize - 0x8000) % self.prg.len()],
///             _ => 0,
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x2000 {
///             self.ram[(addr & 0x07FF) as usize] = value;
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// Must never panic. Unmapped addresses may return any value.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// Must never panic. Writes to read-only or unmapped addresses may be ignored.
    fn write(&mut self, addr: u16, value: u8);

    /// Checks if a device on the bus is holding the IRQ line.
    ///
    /// The IRQ line is level-sensitive: the CPU keeps servicing it at every
    /// instruction boundary (while I is clear) until the device releases it.
    /// The CPU ORs this with the latch set through `CPU::raise_irq`.
    ///
    /// Returns `false` by default for plain memory.
    fn irq_active(&self) -> bool {
        false
    }
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use lib2a03::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Reset vector low byte
/// memory.write(0xFFFD, 0x80); // Reset vector high byte (PC = 0x8000)
/// memory.load(0x8000, &[0xA9, 0x05]); // LDA #$05
///
/// let mut cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.step(), Ok(2));
/// assert_eq!(cpu.a(), 0x05);
/// ```
#[derive(Clone)]
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `address`, wrapping past 0xFFFF.
    pub fn load(&mut self, address: u16, bytes: &[u8]) {
        let mut addr = address;
        for &byte in bytes {
            self.data[addr as usize] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// The whole 64KB image.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlatMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatMemory").finish_non_exhaustive()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_memory_read_write() {
        let mut mem = FlatMemory::new();

        assert_eq!(mem.read(0x0000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);

        mem.write(0x1234, 0x42);
        assert_eq!(mem.read(0x1234), 0x42);
        assert_eq!(mem.read(0x1233), 0x00);
        assert_eq!(mem.read(0x1235), 0x00);
    }

    #[test]
    fn test_load_wraps_past_end() {
        let mut mem = FlatMemory::new();
        mem.load(0xFFFE, &[0x01, 0x02, 0x03]);

        assert_eq!(mem.read(0xFFFE), 0x01);
        assert_eq!(mem.read(0xFFFF), 0x02);
        assert_eq!(mem.read(0x0000), 0x03);
    }

    #[test]
    fn test_flat_memory_has_no_irq() {
        assert!(!FlatMemory::new().irq_active());
    }
}
