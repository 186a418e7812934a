//! # Increment and Decrement Instructions
//!
//! - INC / DEC: memory, read-modify-write
//! - INX / INY / DEX / DEY: index registers
//!
//! All wrap at 8 bits and set Z and N from the result. Carry and overflow
//! are untouched.

use crate::addressing::Operand;
use crate::{MemoryBus, CPU};

/// Executes the INC (Increment Memory) instruction.
pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let result = cpu.read_operand(operand).wrapping_add(1);
    cpu.write_operand(operand, result);
    cpu.status.set_zn(result);
}

/// Executes the DEC (Decrement Memory) instruction.
pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let result = cpu.read_operand(operand).wrapping_sub(1);
    cpu.write_operand(operand, result);
    cpu.status.set_zn(result);
}

/// Executes the INX (Increment X Register) instruction.
pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.status.set_zn(cpu.x);
}

/// Executes the INY (Increment Y Register) instruction.
pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.status.set_zn(cpu.y);
}

/// Executes the DEX (Decrement X Register) instruction.
pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.status.set_zn(cpu.x);
}

/// Executes the DEY (Decrement Y Register) instruction.
pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.status.set_zn(cpu.y);
}
