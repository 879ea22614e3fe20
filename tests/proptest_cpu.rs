//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to check invariants that must hold for any
//! register state, operand or memory contents.

use cpu6502::{CpuCore, CpuModel, FlatMemory, MemoryBus, Status};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu(model: CpuModel, program: &[u8]) -> CpuCore<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, program);
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    let mut cpu = CpuCore::new(memory, 0xFFFF, 0, model);
    cpu.reset();
    cpu
}

fn any_model() -> impl Strategy<Value = CpuModel> {
    prop::sample::select(CpuModel::ALL.to_vec())
}

proptest! {
    /// Property: LDA #imm sets N and Z from the loaded value only
    #[test]
    fn prop_lda_flags(value in any::<u8>(), model in any_model()) {
        let mut cpu = setup_cpu(model, &[0xA9, value]);
        cpu.set_flag(Status::CARRY, true);
        cpu.set_flag(Status::OVERFLOW, true);

        cpu.step();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_z(), value == 0);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
        prop_assert!(cpu.flag_c());
        prop_assert!(cpu.flag_v());
    }

    /// Property: binary ADC followed by SEC; SBC of the same value restores A
    #[test]
    fn prop_adc_sbc_round_trip(a in any::<u8>(), value in any::<u8>(), model in any_model()) {
        // CLC ; ADC #v ; SEC ; SBC #v
        let mut cpu = setup_cpu(model, &[0x18, 0x69, value, 0x38, 0xE9, value]);
        cpu.set_a(a);

        for _ in 0..4 {
            cpu.step();
        }

        prop_assert_eq!(cpu.a(), a);
    }

    /// Property: binary ADC carry and overflow match wide arithmetic
    #[test]
    fn prop_adc_binary_flags(a in any::<u8>(), value in any::<u8>(), carry in any::<bool>()) {
        let mut cpu = setup_cpu(CpuModel::Nes2A03, &[0x69, value]);
        cpu.set_a(a);
        cpu.set_flag(Status::CARRY, carry);
        // D is ignored on the 2A03
        cpu.set_flag(Status::DECIMAL, true);

        cpu.step();

        let wide = a as u16 + value as u16 + carry as u16;
        let signed = a as i8 as i16 + value as i8 as i16 + carry as i16;
        prop_assert_eq!(cpu.a(), wide as u8);
        prop_assert_eq!(cpu.flag_c(), wide > 0xFF);
        prop_assert_eq!(cpu.flag_v(), !(-128..=127).contains(&signed));
    }

    /// Property: CMP sets C exactly when A >= M and never changes A
    #[test]
    fn prop_cmp(a in any::<u8>(), value in any::<u8>()) {
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xC9, value]);
        cpu.set_a(a);

        cpu.step();

        prop_assert_eq!(cpu.a(), a);
        prop_assert_eq!(cpu.flag_c(), a >= value);
        prop_assert_eq!(cpu.flag_z(), a == value);
    }

    /// Property: the stack pointer wraps within page 1 in both directions
    #[test]
    fn prop_stack_wraps_in_page_one(sp in any::<u8>(), value in any::<u8>()) {
        // PHA ; PLA
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x48, 0x68]);
        cpu.set_sp(sp);
        cpu.set_a(value);

        cpu.step();
        prop_assert_eq!(cpu.sp(), sp.wrapping_sub(1));
        prop_assert_eq!(cpu.memory().read(0x0100 | sp as u16), value);

        cpu.set_a(!value);
        cpu.step();
        prop_assert_eq!(cpu.sp(), sp);
        prop_assert_eq!(cpu.a(), value);
    }

    /// Property: PLP never leaves B set and always sets the unused bit
    #[test]
    fn prop_plp_normalizes_status(pulled in any::<u8>(), model in any_model()) {
        let mut cpu = setup_cpu(model, &[0x28]);
        cpu.memory_mut().write(0x0100, pulled);
        cpu.set_sp(0xFF);

        cpu.step();

        let p = cpu.status();
        prop_assert!(p.contains(Status::UNUSED));
        prop_assert!(!p.contains(Status::BREAK));
        prop_assert_eq!(p.bits() & 0xCF, pulled & 0xCF);
    }

    /// Property: any byte sequence executes without panicking, every step
    /// costs between 1 and 8 cycles and the running total is their sum
    #[test]
    fn prop_step_is_total(
        model in any_model(),
        program in prop::collection::vec(any::<u8>(), 3..64),
        a in any::<u8>(),
        x in any::<u8>(),
        y in any::<u8>(),
        p in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(model, &program);
        cpu.set_a(a);
        cpu.set_x(x);
        cpu.set_y(y);
        cpu.set_status(Status::from_bits_retain(p));

        let mut sum = 0u32;
        for _ in 0..32 {
            let cycles = cpu.step();
            prop_assert!((1..=8).contains(&cycles), "{} cycles at ${:04X}", cycles, cpu.ppc());
            prop_assert!(cpu.status().contains(Status::UNUSED));
            prop_assert!(!cpu.status().contains(Status::BREAK));
            sum += cycles;
        }
        prop_assert_eq!(cpu.total_cycles(), sum);
    }
}
