//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 2A03's 6502 core and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): 8-bit offset into stack page (0x0100-0x01FF)
//! - **Status flags**: a single [`Status`] value
//! - **Cycle counter**: u64 monotonically increasing cycle count
//! - **Interrupt latches**: reset, NMI and IRQ request lines
//!
//! ## Execution Model
//!
//! - `step()`: Service a pending interrupt, or execute one instruction
//! - `run_for_cycles()`: Execute until a cycle budget is exhausted
//!
//! Each step looks the opcode up in [`OPCODE_TABLE`], resolves its addressing
//! mode, applies the instruction semantics and charges base cycles plus any
//! page-crossing or branch penalty.

use log::{debug, trace, warn};

use crate::addressing::Operand;
use crate::config::{CpuConfig, UndefinedOpcodePolicy};
use crate::instructions;
use crate::interrupts::{InterruptLines, InterruptState, RESET_VECTOR};
use crate::snapshot::CpuSnapshot;
use crate::trace::TraceLine;
use crate::{ExecutionError, MemoryBus, Status, OPCODE_TABLE};

/// Base address of the hardware stack page.
pub const STACK_BASE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait. Every
/// piece of state, interrupt latches and the cycle counter included, lives on
/// the struct, so independent instances never share anything.
///
/// # Examples
///
/// ```
/// use lib2a03::{CPU, FlatMemory, MemoryBus};
///
/// // Create memory and set reset vector
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00); // Low byte
/// memory.write(0xFFFD, 0x80); // High byte (PC = 0x8000)
///
/// // Initialize CPU - loads PC from reset vector
/// let cpu = CPU::new(memory);
///
/// assert_eq!(cpu.pc(), 0x8000);
/// assert_eq!(cpu.sp(), 0xFD);
/// assert_eq!(cpu.status(), 0x20);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer (0x0100 + sp gives full stack address)
    pub(crate) sp: u8,

    /// Processor status flags
    pub(crate) status: Status,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Pending interrupt requests
    pub(crate) lines: InterruptLines,

    /// What the last step did
    pub(crate) state: InterruptState,

    pub(crate) config: CpuConfig,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the default configuration and resets it.
    ///
    /// PC is loaded from the reset vector at 0xFFFC/0xFFFD (little-endian).
    pub fn new(memory: M) -> Self {
        Self::with_config(memory, CpuConfig::default())
    }

    /// Creates a new CPU with the given configuration and resets it.
    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: RESET_SP,
            status: Status::power_on(),
            cycles: 0,
            lines: InterruptLines::default(),
            state: InterruptState::Running,
            config,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Reinitializes registers and flags and reloads PC from the reset vector.
    ///
    /// - C, Z, I, D, B, V, N cleared; U set
    /// - A, X, Y zeroed, SP = 0xFD
    /// - Pending reset and NMI requests are dropped; the IRQ level is kept
    ///
    /// No cycles are charged and the cycle counter is not rewound.
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = RESET_SP;
        self.status = Status::power_on();
        self.lines.reset = false;
        self.lines.nmi = false;
        self.state = InterruptState::Running;
        self.pc = self.read_word(RESET_VECTOR);

        debug!("reset: PC=${:04X}", self.pc);
    }

    /// Executes one instruction and advances the CPU state.
    ///
    /// At the instruction boundary, a pending reset, NMI or unmasked IRQ is
    /// serviced instead of fetching an opcode. Otherwise:
    /// 1. Fetch opcode byte at PC
    /// 2. Look up instruction metadata in the opcode table
    /// 3. Resolve the addressing mode (advances PC past the operand)
    /// 4. Apply the instruction semantics
    /// 5. Charge base cycles plus page-crossing and branch penalties
    ///
    /// # Returns
    ///
    /// - `Ok(cycles)` with the cycles consumed by this step
    /// - `Err(ExecutionError::UndefinedOpcode { .. })` only under
    ///   [`UndefinedOpcodePolicy::Error`]; the opcode has still been consumed
    ///
    /// # Examples
    ///
    /// ```
    /// use lib2a03::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// mem.write(0x8000, 0xEA); // NOP
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.step(), Ok(2));
    /// assert_eq!(cpu.pc(), 0x8001);
    /// ```
    pub fn step(&mut self) -> Result<u32, ExecutionError> {
        if let Some(cycles) = self.poll_interrupts() {
            self.cycles += cycles as u64;
            return Ok(cycles);
        }
        self.state = InterruptState::Running;

        if self.config.trace && log::log_enabled!(log::Level::Trace) {
            trace!("{}", self.trace_line());
        }

        let address = self.pc;
        let opcode = self.fetch_byte();
        let metadata = &OPCODE_TABLE[opcode as usize];

        let resolved = self.resolve(metadata.addressing_mode);

        let mut cycles = metadata.base_cycles as u32;
        if metadata.page_cross_penalty && resolved.page_crossed {
            cycles += 1;
        }
        cycles += instructions::execute(self, metadata.mnemonic, resolved);

        self.cycles += cycles as u64;

        if metadata.is_undefined() {
            warn!(
                "undefined opcode 0x{:02X} at ${:04X} executed as NOP",
                opcode, address
            );
            if self.config.undefined_opcode == UndefinedOpcodePolicy::Error {
                return Err(ExecutionError::UndefinedOpcode { opcode, address });
            }
        }

        Ok(cycles)
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until at least `cycle_budget` cycles have elapsed
    /// or an error occurs. Returns the actual number of cycles consumed (may be
    /// slightly more than budget due to instruction granularity).
    ///
    /// # Examples
    ///
    /// ```
    /// use lib2a03::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    /// for addr in 0x8000..0x8100 {
    ///     mem.write(addr, 0xEA); // NOP
    /// }
    ///
    /// let mut cpu = CPU::new(mem);
    /// assert_eq!(cpu.run_for_cycles(9), Ok(10));
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles.saturating_add(cycle_budget);

        while self.cycles < target_cycles {
            self.step()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Formats the instruction at PC and the register state, nestest style.
    pub fn trace_line(&self) -> TraceLine {
        TraceLine::capture(self)
    }

    // ========== Stack ==========

    /// Writes a byte at `0x0100 | SP`, then decrements SP.
    pub(crate) fn push(&mut self, value: u8) {
        self.memory.write(STACK_BASE | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    /// Increments SP, then reads the byte at `0x0100 | SP`.
    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.memory.read(STACK_BASE | self.sp as u16)
    }

    /// Pushes high byte first so the word sits little-endian in memory.
    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull() as u16;
        let hi = self.pull() as u16;
        (hi << 8) | lo
    }

    // ========== Operands ==========

    /// Reads an instruction's operand.
    ///
    /// Implied operands read as the accumulator; the opcode table never pairs
    /// them with an instruction that reads memory.
    pub(crate) fn read_operand(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(address) => self.memory.read(address),
            Operand::Accumulator | Operand::Implied => self.a,
        }
    }

    /// Writes an instruction's result back to its operand.
    pub(crate) fn write_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(address) => self.memory.write(address, value),
            Operand::Accumulator | Operand::Implied => self.a = value,
        }
    }

    // ========== Memory ==========

    /// Copies `bytes` into the address space starting at `address`.
    ///
    /// Goes through `MemoryBus::write`, so mapped devices see every byte.
    pub fn load_memory(&mut self, address: u16, bytes: &[u8]) {
        let mut addr = address;
        for &byte in bytes {
            self.memory.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }

    /// Reads one byte through the memory bus.
    pub fn read_memory(&self, address: u16) -> u8 {
        self.memory.read(address)
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    // ========== Snapshots ==========

    /// Captures registers, flags, cycle count and interrupt latches.
    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            a: self.a,
            x: self.x,
            y: self.y,
            pc: self.pc,
            sp: self.sp,
            status: self.status,
            cycles: self.cycles,
            nmi_pending: self.lines.nmi,
            irq_pending: self.lines.irq,
        }
    }

    /// Restores a snapshot taken with [`CPU::snapshot`]. Memory is untouched.
    pub fn restore(&mut self, snapshot: &CpuSnapshot) {
        self.a = snapshot.a;
        self.x = snapshot.x;
        self.y = snapshot.y;
        self.pc = snapshot.pc;
        self.sp = snapshot.sp;
        self.status = snapshot.status;
        self.cycles = snapshot.cycles;
        self.lines.nmi = snapshot.nmi_pending;
        self.lines.irq = snapshot.irq_pending;
        self.lines.reset = false;
        self.state = InterruptState::Running;
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a composed byte (bit 5 always 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use lib2a03::{CPU, FlatMemory};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.set_flag_c(true);
    /// cpu.set_flag_n(true);
    /// assert_eq!(cpu.status(), 0b1010_0001);
    /// ```
    pub fn status(&self) -> u8 {
        self.status.compose()
    }

    /// Returns the status flags.
    pub fn flags(&self) -> Status {
        self.status
    }

    /// Returns the total number of CPU cycles executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.status.contains(Status::NEGATIVE)
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.status.contains(Status::OVERFLOW)
    }

    /// Returns the Unused flag, which always reads as set.
    pub fn flag_u(&self) -> bool {
        self.status.compose() & Status::UNUSED.bits() != 0
    }

    /// Returns true if the Break flag is set.
    ///
    /// The flag never gates execution; it only matters in pushed status bytes.
    pub fn flag_b(&self) -> bool {
        self.status.contains(Status::BREAK)
    }

    /// Returns true if the Decimal mode flag is set (no effect on arithmetic).
    pub fn flag_d(&self) -> bool {
        self.status.contains(Status::DECIMAL)
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.status.contains(Status::INTERRUPT_DISABLE)
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.status.contains(Status::ZERO)
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.status.contains(Status::CARRY)
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Replaces every flag from a status byte, Unused included.
    pub fn set_status(&mut self, value: u8) {
        self.status = Status::from_byte(value);
    }

    // ========== Status Flag Setters ==========

    pub fn set_flag_n(&mut self, value: bool) {
        self.status.set(Status::NEGATIVE, value);
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.status.set(Status::OVERFLOW, value);
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.status.set(Status::BREAK, value);
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.status.set(Status::DECIMAL, value);
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.status.set(Status::INTERRUPT_DISABLE, value);
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.status.set(Status::ZERO, value);
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.status.set(Status::CARRY, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    fn setup_cpu() -> CPU<FlatMemory> {
        let mut mem = FlatMemory::new();
        mem.write(0xFFFC, 0x00);
        mem.write(0xFFFD, 0x80);
        CPU::new(mem)
    }

    #[test]
    fn test_cpu_initialization() {
        let cpu = setup_cpu();

        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFD);
        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.cycles(), 0);

        assert!(!cpu.flag_i());
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_b());
        assert!(!cpu.flag_d());
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_c());
        assert!(cpu.flag_u());
    }

    #[test]
    fn test_reset_keeps_cycle_count() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0xEA);
        cpu.step().unwrap();
        cpu.set_a(0x12);
        cpu.set_flag_c(true);

        cpu.reset();

        assert_eq!(cpu.a(), 0);
        assert!(!cpu.flag_c());
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.cycles(), 2);
    }

    #[test]
    fn test_stack_wraps_within_page() {
        let mut cpu = setup_cpu();
        cpu.set_sp(0x00);
        cpu.push(0xAB);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.memory().read(0x0100), 0xAB);
        assert_eq!(cpu.pull(), 0xAB);
        assert_eq!(cpu.sp(), 0x00);
    }

    #[test]
    fn test_push_word_order() {
        let mut cpu = setup_cpu();
        cpu.push_word(0x1234);
        assert_eq!(cpu.memory().read(0x01FD), 0x12);
        assert_eq!(cpu.memory().read(0x01FC), 0x34);
        assert_eq!(cpu.pull_word(), 0x1234);
    }

    #[test]
    fn test_step_unknown_opcode_is_nop() {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(0x8000, 0x02);

        assert_eq!(cpu.step(), Ok(2));
        assert_eq!(cpu.pc(), 0x8001);
    }

    #[test]
    fn test_snapshot_restore() {
        let mut cpu = setup_cpu();
        cpu.set_a(0x42);
        cpu.set_flag_v(true);
        cpu.raise_nmi();
        let snapshot = cpu.snapshot();

        cpu.reset();
        cpu.restore(&snapshot);

        assert_eq!(cpu.a(), 0x42);
        assert!(cpu.flag_v());
        assert!(cpu.nmi_pending());
    }
}
