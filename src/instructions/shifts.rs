//! # Shift and Rotate Instructions
//!
//! This module implements:
//! - ASL: Arithmetic Shift Left (bit 7 -> C, 0 -> bit 0)
//! - LSR: Logical Shift Right (bit 0 -> C, 0 -> bit 7)
//! - ROL: Rotate Left through carry
//! - ROR: Rotate Right through carry
//!
//! Each operates on the accumulator or on memory depending on the operand,
//! and sets C, Z and N.

use crate::addressing::Operand;
use crate::{MemoryBus, Status, CPU};

fn shift<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand, op: impl FnOnce(u8, bool) -> (u8, bool)) {
    let value = cpu.read_operand(operand);
    let (result, carry) = op(value, cpu.status.contains(Status::CARRY));
    cpu.write_operand(operand, result);
    cpu.status.set(Status::CARRY, carry);
    cpu.status.set_zn(result);
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    shift(cpu, operand, |value, _| (value << 1, value & 0x80 != 0));
}

/// Executes the LSR (Logical Shift Right) instruction.
///
/// N always ends up clear since bit 7 is filled with 0.
pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    shift(cpu, operand, |value, _| (value >> 1, value & 0x01 != 0));
}

/// Executes the ROL (Rotate Left) instruction.
pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    shift(cpu, operand, |value, carry| {
        ((value << 1) | carry as u8, value & 0x80 != 0)
    });
}

/// Executes the ROR (Rotate Right) instruction.
pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    shift(cpu, operand, |value, carry| {
        ((value >> 1) | ((carry as u8) << 7), value & 0x01 != 0)
    });
}
