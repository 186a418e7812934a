//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX set Z and N from the copied value.
//! TXS is the exception and leaves every flag alone.

use crate::{MemoryBus, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.a;
    cpu.status.set_zn(cpu.x);
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.y = cpu.a;
    cpu.status.set_zn(cpu.y);
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.x;
    cpu.status.set_zn(cpu.a);
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.a = cpu.y;
    cpu.status.set_zn(cpu.a);
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.x = cpu.sp;
    cpu.status.set_zn(cpu.x);
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.sp = cpu.x;
}
