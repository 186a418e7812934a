//! # Stack Instructions
//!
//! - PHA: Push Accumulator
//! - PHP: Push Processor Status
//! - PLA: Pull Accumulator
//! - PLP: Pull Processor Status
//!
//! The stack lives at `0x0100-0x01FF`; push writes then decrements SP,
//! pull increments SP then reads.

use crate::{MemoryBus, Status, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.push(cpu.a);
}

/// Executes the PHP (Push Processor Status) instruction.
///
/// The pushed byte always has U set. B is set too unless the CPU was
/// configured with `php_sets_break = false`.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    let value = cpu.status.pushed(cpu.config.php_sets_break);
    cpu.push(value);
}

/// Executes the PLA (Pull Accumulator) instruction.
pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.pull();
    cpu.status.set_zn(cpu.a);
}

/// Executes the PLP (Pull Processor Status) instruction.
pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status = Status::from_byte(cpu.pull());
}
