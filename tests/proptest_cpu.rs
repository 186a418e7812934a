//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to verify that CPU operations maintain
//! fundamental invariants across all possible input combinations.

use lib2a03::{FlatMemory, MemoryBus, Mnemonic, Status, CPU, OPCODE_TABLE};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

/// Opcodes whose only effect on PC is advancing past the instruction
fn straight_line_opcodes() -> Vec<u8> {
    OPCODE_TABLE
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            !matches!(
                m.mnemonic,
                Mnemonic::Bcc
                    | Mnemonic::Bcs
                    | Mnemonic::Beq
                    | Mnemonic::Bmi
                    | Mnemonic::Bne
                    | Mnemonic::Bpl
                    | Mnemonic::Bvc
                    | Mnemonic::Bvs
                    | Mnemonic::Jmp
                    | Mnemonic::Jsr
                    | Mnemonic::Rts
                    | Mnemonic::Rti
                    | Mnemonic::Brk
            )
        })
        .map(|(i, _)| i as u8)
        .collect()
}

// ========== Status Register ==========

proptest! {
    /// Property: applying then composing a status byte only forces bit 5
    #[test]
    fn prop_status_round_trip(value in any::<u8>()) {
        prop_assert_eq!(Status::from_byte(value).compose(), value | 0x20);

        let mut cpu = setup_cpu();
        cpu.set_status(value);
        prop_assert_eq!(cpu.status(), value | 0x20);
    }
}

// ========== PC Advancement ==========

proptest! {
    /// Property: straight-line instructions advance PC by exactly size_bytes
    #[test]
    fn prop_pc_advances_by_instruction_size(
        opcode in prop::sample::select(straight_line_opcodes()),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.load_memory(0x8000, &[opcode, operand1, operand2]);

        cpu.step().unwrap();

        let size = OPCODE_TABLE[opcode as usize].size_bytes as u16;
        prop_assert_eq!(
            cpu.pc(),
            0x8000 + size,
            "opcode 0x{:02X} ({})",
            opcode,
            OPCODE_TABLE[opcode as usize].mnemonic
        );
    }

    /// Property: a step never costs less than the base cycles or more than base + 2
    #[test]
    fn prop_cycles_within_bounds(
        opcode in any::<u8>(),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        status in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        cpu.load_memory(0x8000, &[opcode, operand1, operand2]);
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_status(status);

        let cycles = cpu.step().unwrap();
        let base = OPCODE_TABLE[opcode as usize].base_cycles as u32;

        prop_assert!(cycles >= base && cycles <= base + 2);
        prop_assert_eq!(cpu.cycles(), cycles as u64);
        prop_assert!(cpu.flag_u());
    }
}

// ========== Arithmetic and Compare ==========

proptest! {
    /// Property: LDA then CMP of the same value gives Z=1, C=1, N=0
    #[test]
    fn prop_lda_cmp_same_value(value in any::<u8>(), addr in 0x0000u16..0x0800) {
        let mut cpu = setup_cpu();
        cpu.memory_mut().write(addr, value);
        let [lo, hi] = addr.to_le_bytes();
        // LDA abs; CMP abs
        cpu.load_memory(0x8000, &[0xAD, lo, hi, 0xCD, lo, hi]);

        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert!(cpu.flag_z());
        prop_assert!(cpu.flag_c());
        prop_assert!(!cpu.flag_n());
    }

    /// Property: CLC; LDA #0; ADC #a; ADC #b matches native addition
    #[test]
    fn prop_adc_carry_chain(a in any::<u8>(), b in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.load_memory(0x8000, &[0x18, 0xA9, 0x00, 0x69, a, 0x69, b]);

        for _ in 0..4 {
            cpu.step().unwrap();
        }

        let sum = a as u16 + b as u16;
        prop_assert_eq!(cpu.a(), sum as u8);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_z(), sum as u8 == 0);
    }

    /// Property: SEC; SBC #b from a matches native subtraction with borrow
    #[test]
    fn prop_sbc_matches_subtraction(a in any::<u8>(), b in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(a);
        cpu.load_memory(0x8000, &[0x38, 0xE9, b]);

        cpu.step().unwrap();
        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), a.wrapping_sub(b));
        prop_assert_eq!(cpu.flag_c(), a >= b);
        let signed = (a as i8 as i16) - (b as i8 as i16);
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
    }

    /// Property: SBC is ADC of the complemented operand
    #[test]
    fn prop_sbc_is_adc_of_complement(a in any::<u8>(), b in any::<u8>(), carry in any::<bool>()) {
        let mut adc = setup_cpu();
        adc.set_a(a);
        adc.set_flag_c(carry);
        adc.load_memory(0x8000, &[0x69, !b]);
        adc.step().unwrap();

        let mut sbc = setup_cpu();
        sbc.set_a(a);
        sbc.set_flag_c(carry);
        sbc.load_memory(0x8000, &[0xE9, b]);
        sbc.step().unwrap();

        prop_assert_eq!(adc.a(), sbc.a());
        prop_assert_eq!(adc.status(), sbc.status());
    }
}

// ========== Subroutines and Stack ==========

proptest! {
    /// Property: JSR T; RTS returns to the instruction after the JSR
    #[test]
    fn prop_jsr_rts_round_trip(target in 0x0200u16..=0xFFFF, sp in 0x02u8..=0xFF) {
        // Keep the subroutine clear of the JSR itself and the vectors.
        prop_assume!(!(0x7FFE..=0x8003).contains(&target));
        prop_assume!(target < 0xFFF9);

        let mut cpu = setup_cpu();
        cpu.set_sp(sp);
        let [lo, hi] = target.to_le_bytes();
        cpu.load_memory(0x8000, &[0x20, lo, hi]);
        cpu.memory_mut().write(target, 0x60);

        cpu.step().unwrap();
        prop_assert_eq!(cpu.pc(), target);
        cpu.step().unwrap();

        prop_assert_eq!(cpu.pc(), 0x8003);
        prop_assert_eq!(cpu.sp(), sp);
    }

    /// Property: PHA then PLA restores A and SP
    #[test]
    fn prop_pha_pla_round_trip(value in any::<u8>(), sp in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.set_a(value);
        cpu.set_sp(sp);
        cpu.load_memory(0x8000, &[0x48, 0xA9, 0x00, 0x68]);

        for _ in 0..3 {
            cpu.step().unwrap();
        }

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.sp(), sp);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
    }
}

// ========== Branches ==========

proptest! {
    /// Property: branch cost is 2 untaken, 3 taken, 4 taken across a page
    #[test]
    fn prop_branch_timing(pc in 0x0200u16..0xF000, offset in any::<u8>(), taken in any::<bool>()) {
        let mut cpu = setup_cpu();
        cpu.set_pc(pc);
        cpu.set_flag_z(!taken);
        // BNE offset
        cpu.load_memory(pc, &[0xD0, offset]);

        let cycles = cpu.step().unwrap();

        let next = pc.wrapping_add(2);
        let target = next.wrapping_add_signed(offset as i8 as i16);
        if !taken {
            prop_assert_eq!(cycles, 2);
            prop_assert_eq!(cpu.pc(), next);
        } else if next & 0xFF00 == target & 0xFF00 {
            prop_assert_eq!(cycles, 3);
            prop_assert_eq!(cpu.pc(), target);
        } else {
            prop_assert_eq!(cycles, 4);
            prop_assert_eq!(cpu.pc(), target);
        }
    }
}
