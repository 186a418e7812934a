//! # Control Flow Instructions
//!
//! This module implements jumps, subroutine calls and returns:
//! - JMP: Jump (absolute, or indirect with the page-wrap bug)
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - RTI: Return from Interrupt
//! - BRK: Force Interrupt
//!
//! NOP needs no function; the dispatcher treats it as a no-op.

use crate::addressing::Operand;
use crate::interrupts::IRQ_VECTOR;
use crate::{MemoryBus, Status, CPU};

/// Executes the JMP (Jump) instruction.
///
/// The resolver has already followed the indirect pointer, so both forms
/// arrive here as a plain target address.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Operand::Address(target) = operand {
        cpu.pc = target;
    }
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes the address of the last byte of the JSR instruction (return
/// address minus one), high byte first.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    if let Operand::Address(target) = operand {
        let return_address = cpu.pc.wrapping_sub(1);
        cpu.push_word(return_address);
        cpu.pc = target;
    }
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pulls status then PC. Every bit of the pulled byte is applied, Unused
/// and Break included; `Status::compose` still reports Unused as set.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.status = Status::from_byte(cpu.pull());
    cpu.pc = cpu.pull_word();
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// BRK is followed by a padding byte that is skipped, so the pushed return
/// address is the BRK address plus two. The pushed status has B set.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.enter_handler(IRQ_VECTOR, true);
}
