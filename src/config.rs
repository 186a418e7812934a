//! # CPU Configuration
//!
//! Modeling choices that have no single correct answer for a software core
//! are kept here instead of being hard-wired into the execution engine.

/// What `step()` does when it fetches an undefined opcode.
///
/// In both cases the opcode is consumed exactly like a NOP: PC skips the
/// operand bytes of its addressing mode and the documented cost is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UndefinedOpcodePolicy {
    /// Execute as a no-op and return `Ok`.
    #[default]
    Nop,
    /// Execute as a no-op, then report `ExecutionError::UndefinedOpcode`.
    Error,
}

/// Tunable CPU behavior.
///
/// # Examples
///
/// ```
/// use lib2a03::{CpuConfig, UndefinedOpcodePolicy};
///
/// let config = CpuConfig::default()
///     .with_undefined_opcode(UndefinedOpcodePolicy::Error)
///     .with_trace(true);
///
/// assert!(config.php_sets_break);
/// assert!(config.trace);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CpuConfig {
    /// Undefined opcode handling.
    pub undefined_opcode: UndefinedOpcodePolicy,

    /// PHP pushes the status byte with B set, as the NMOS silicon does.
    /// When false, PHP pushes the plain composed status.
    pub php_sets_break: bool,

    /// Emit a `log::trace!` line before every instruction.
    pub trace: bool,
}

impl CpuConfig {
    pub fn with_undefined_opcode(mut self, policy: UndefinedOpcodePolicy) -> Self {
        self.undefined_opcode = policy;
        self
    }

    pub fn with_php_sets_break(mut self, enabled: bool) -> Self {
        self.php_sets_break = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            undefined_opcode: UndefinedOpcodePolicy::Nop,
            php_sets_break: true,
            trace: false,
        }
    }
}
