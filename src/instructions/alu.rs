//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry (borrow = !C)
//! - AND, ORA, EOR: Logical operations on the accumulator
//! - CMP, CPX, CPY: Compare register with memory
//! - BIT: Test bits in memory against the accumulator
//!
//! The 2A03 has no decimal ALU: ADC and SBC are binary regardless of D.

use crate::addressing::Operand;
use crate::{MemoryBus, Status, CPU};

/// Adds `value` and carry to the accumulator, updating C, V, Z and N.
fn add_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a;
    let carry_in = cpu.status.contains(Status::CARRY) as u16;

    let result16 = a as u16 + value as u16 + carry_in;
    let result = result16 as u8;

    cpu.status.set(Status::CARRY, result16 > 0xFF);

    // Overflow: both operands share a sign and the result's sign differs.
    let overflow = (a ^ result) & (value ^ result) & 0x80 != 0;
    cpu.status.set(Status::OVERFLOW, overflow);

    cpu.a = result;
    cpu.status.set_zn(result);
}

/// Executes the ADC (Add with Carry) instruction.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    add_with_carry(cpu, value);
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// `A - M - (1 - C)` is computed as `A + !M + C`, so carry and overflow fall
/// out of the same adder as ADC.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    add_with_carry(cpu, !value);
}

/// Executes the AND (Logical AND) instruction.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a &= cpu.read_operand(operand);
    cpu.status.set_zn(cpu.a);
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a |= cpu.read_operand(operand);
    cpu.status.set_zn(cpu.a);
}

/// Executes the EOR (Exclusive OR) instruction.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    cpu.a ^= cpu.read_operand(operand);
    cpu.status.set_zn(cpu.a);
}

/// Executes the BIT (Bit Test) instruction.
///
/// - Z: set if `A & M == 0`
/// - N: bit 7 of M
/// - V: bit 6 of M
///
/// The accumulator is not modified.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    let value = cpu.read_operand(operand);
    cpu.status.set(Status::ZERO, cpu.a & value == 0);
    cpu.status.set(Status::NEGATIVE, value & 0x80 != 0);
    cpu.status.set(Status::OVERFLOW, value & 0x40 != 0);
}

fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, operand: Operand) {
    let value = cpu.read_operand(operand);
    let difference = register.wrapping_sub(value);
    cpu.status.set(Status::CARRY, register >= value);
    cpu.status.set(Status::ZERO, register == value);
    cpu.status.set(Status::NEGATIVE, difference & 0x80 != 0);
}

/// Executes the CMP (Compare Accumulator) instruction.
pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    compare(cpu, cpu.a, operand);
}

/// Executes the CPX (Compare X Register) instruction.
pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    compare(cpu, cpu.x, operand);
}

/// Executes the CPY (Compare Y Register) instruction.
pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, operand: Operand) {
    compare(cpu, cpu.y, operand);
}
