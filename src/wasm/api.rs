//! WASM API for the 2A03 core.
//!
//! Provides JavaScript-callable interfaces for CPU control, interrupt lines
//! and state inspection.

use wasm_bindgen::prelude::*;

use crate::{CpuConfig, FlatMemory, MemoryBus, CPU};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::ExecutionError> for JsError {
    fn from(error: crate::ExecutionError) -> Self {
        JsError::new(&error.to_string())
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator2A03 {
    cpu: CPU<FlatMemory>,
}

#[wasm_bindgen]
impl Emulator2A03 {
    /// Create an emulator with zeroed memory.
    ///
    /// The reset vector reads as `$0000` until a program and vector are
    /// loaded and `reset()` is called.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator2A03 {
            cpu: CPU::with_config(FlatMemory::new(), CpuConfig::default()),
        }
    }

    /// Execute a single instruction (or interrupt entry) and return its cycles
    pub fn step(&mut self) -> Result<u32, JsError> {
        Ok(self.cpu.step()?)
    }

    /// Execute at least `cycles` cycles and return the cycles actually spent
    pub fn run_for_cycles(&mut self, cycles: u32) -> Result<u32, JsError> {
        let spent = self.cpu.run_for_cycles(cycles as u64)?;
        Ok(spent as u32)
    }

    /// Reset the CPU; memory is kept
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    // Interrupt lines

    pub fn raise_nmi(&mut self) {
        self.cpu.raise_nmi();
    }

    pub fn raise_irq(&mut self, level: bool) {
        self.cpu.raise_irq(level);
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status()
    }

    /// Cycle count as f64 (JavaScript numbers are exact up to 2^53)
    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> f64 {
        self.cpu.cycles() as f64
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Memory access methods

    /// Read a single byte from memory
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.read_memory(addr)
    }

    /// Write a single byte to memory
    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.memory_mut().write(addr, value);
    }

    /// Copy `bytes` into memory starting at `addr`
    pub fn load_memory(&mut self, addr: u16, bytes: &[u8]) {
        self.cpu.load_memory(addr, bytes);
    }

    /// Read `len` bytes starting at `addr`, wrapping at $FFFF
    pub fn read_range(&self, addr: u16, len: u32) -> js_sys::Uint8Array {
        let bytes: Vec<u8> = (0..len)
            .map(|i| self.cpu.read_memory(addr.wrapping_add(i as u16)))
            .collect();
        js_sys::Uint8Array::from(bytes.as_slice())
    }

    /// The instruction at PC as a nestest-style trace line
    pub fn trace_line(&self) -> String {
        self.cpu.trace_line().to_string()
    }
}

impl Default for Emulator2A03 {
    fn default() -> Self {
        Self::new()
    }
}
