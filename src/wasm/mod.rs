//! WebAssembly bindings for the 2A03 core.
//!
//! Exposes a JavaScript-callable emulator over 64KB of flat memory, so a
//! browser page can load a program, single-step it and inspect registers.

pub mod api;

pub use api::Emulator2A03;
