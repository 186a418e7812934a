//! # Branch Instructions
//!
//! This module implements the conditional branch instructions:
//! - BCC / BCS: Branch on Carry Clear / Set
//! - BEQ / BNE: Branch on Zero Set / Clear
//! - BMI / BPL: Branch on Negative Set / Clear
//! - BVC / BVS: Branch on Overflow Clear / Set
//!
//! ## Cycle Timing
//!
//! - Not taken: 2 cycles (the base cost from the opcode table)
//! - Taken, same page: +1 cycle
//! - Taken, target on another page than the next instruction: +2 cycles
//!
//! No flags are affected.

use crate::addressing::{Operand, Resolved};
use crate::{MemoryBus, CPU};

/// Jumps to the resolved relative target when `condition` holds.
///
/// Returns the extra cycles beyond the base cost.
pub(crate) fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, condition: bool, resolved: Resolved) -> u32 {
    if !condition {
        return 0;
    }

    let Operand::Address(target) = resolved.operand else {
        return 0;
    };
    cpu.pc = target;

    if resolved.page_crossed {
        2
    } else {
        1
    }
}
