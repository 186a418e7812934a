//! # 6502 Instruction Implementations
//!
//! This module contains the semantics of every documented instruction,
//! organized by category. Each instruction is a standalone function taking the
//! CPU and the operand already resolved by the addressing-mode resolver, so
//! one function serves every addressing-mode variant of its mnemonic.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

pub mod alu;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;

use crate::addressing::Resolved;
use crate::{MemoryBus, Mnemonic, Status, CPU};

/// Applies `mnemonic` to a resolved operand.
///
/// Returns the extra cycles the instruction itself adds (only branches do).
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, mnemonic: Mnemonic, resolved: Resolved) -> u32 {
    use Mnemonic::*;

    let operand = resolved.operand;
    let status = cpu.status;

    match mnemonic {
        // Branches
        Bcc => return branches::branch_if(cpu, !status.contains(Status::CARRY), resolved),
        Bcs => return branches::branch_if(cpu, status.contains(Status::CARRY), resolved),
        Beq => return branches::branch_if(cpu, status.contains(Status::ZERO), resolved),
        Bne => return branches::branch_if(cpu, !status.contains(Status::ZERO), resolved),
        Bmi => return branches::branch_if(cpu, status.contains(Status::NEGATIVE), resolved),
        Bpl => return branches::branch_if(cpu, !status.contains(Status::NEGATIVE), resolved),
        Bvc => return branches::branch_if(cpu, !status.contains(Status::OVERFLOW), resolved),
        Bvs => return branches::branch_if(cpu, status.contains(Status::OVERFLOW), resolved),

        // Load/store
        Lda => load_store::execute_lda(cpu, operand),
        Ldx => load_store::execute_ldx(cpu, operand),
        Ldy => load_store::execute_ldy(cpu, operand),
        Sta => load_store::execute_sta(cpu, operand),
        Stx => load_store::execute_stx(cpu, operand),
        Sty => load_store::execute_sty(cpu, operand),

        // Transfers
        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        // Stack
        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),

        // ALU
        And => alu::execute_and(cpu, operand),
        Ora => alu::execute_ora(cpu, operand),
        Eor => alu::execute_eor(cpu, operand),
        Bit => alu::execute_bit(cpu, operand),
        Adc => alu::execute_adc(cpu, operand),
        Sbc => alu::execute_sbc(cpu, operand),
        Cmp => alu::execute_cmp(cpu, operand),
        Cpx => alu::execute_cpx(cpu, operand),
        Cpy => alu::execute_cpy(cpu, operand),

        // Shifts
        Asl => shifts::execute_asl(cpu, operand),
        Lsr => shifts::execute_lsr(cpu, operand),
        Rol => shifts::execute_rol(cpu, operand),
        Ror => shifts::execute_ror(cpu, operand),

        // Increments/decrements
        Inc => inc_dec::execute_inc(cpu, operand),
        Dec => inc_dec::execute_dec(cpu, operand),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        // Control flow
        Jmp => control::execute_jmp(cpu, operand),
        Jsr => control::execute_jsr(cpu, operand),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop | Undefined => {}

        // Flags
        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),
    }

    0
}
