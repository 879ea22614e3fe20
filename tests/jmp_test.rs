//! Tests for JMP, JSR and RTS.
//!
//! Tests cover:
//! - Absolute and indirect jumps
//! - The NMOS indirect page-wrap bug (and its absence on the 65C02)
//! - 65C02 JMP (abs,X)
//! - Subroutine round trip

use cpu6502::{CpuCore, CpuModel, FlatMemory, MemoryBus};
use test_case::test_case;

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

#[test]
fn test_jmp_absolute() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x4C, 0x34, 0x12]);

    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x1234);
}

#[test_case(CpuModel::Nmos6502, 0x1234, 5 ; "nmos wraps within page")]
#[test_case(CpuModel::Nes2A03, 0x1234, 5 ; "2a03 wraps within page")]
#[test_case(CpuModel::Mos6510, 0x1234, 5 ; "6510 wraps within page")]
#[test_case(CpuModel::Cmos65C02, 0x5634, 6 ; "cmos crosses page")]
fn test_jmp_indirect_page_boundary(model: CpuModel, target: u16, cycles: u32) {
    // JMP ($30FF)
    let mut cpu = setup_cpu(model, &[0x6C, 0xFF, 0x30]);
    cpu.memory_mut().write(0x30FF, 0x34);
    cpu.memory_mut().write(0x3000, 0x12);
    cpu.memory_mut().write(0x3100, 0x56);

    assert_eq!(cpu.step(), cycles);
    assert_eq!(cpu.pc(), target);
}

#[test]
fn test_jmp_indirect_mid_page_same_on_all_models() {
    for model in CpuModel::ALL {
        let mut cpu = setup_cpu(model, &[0x6C, 0x80, 0x10]);
        cpu.memory_mut().write(0x1080, 0xCD);
        cpu.memory_mut().write(0x1081, 0xAB);

        cpu.step();
        assert_eq!(cpu.pc(), 0xABCD, "{}", model);
    }
}

#[test]
fn test_jmp_absolute_indexed_indirect_cmos() {
    // JMP ($2000,X) with X=4
    let mut cpu = setup_cpu(CpuModel::Cmos65C02, &[0x7C, 0x00, 0x20]);
    cpu.set_x(0x04);
    cpu.memory_mut().write(0x2004, 0x00);
    cpu.memory_mut().write(0x2005, 0x30);

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x3000);
}

#[test]
fn test_jsr_rts_round_trip() {
    // JSR $9000 ; NOP   /   $9000: LDA #$01 ; RTS
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x20, 0x00, 0x90, 0xEA]);
    cpu.memory_mut().load(0x9000, &[0xA9, 0x01, 0x60]);

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.sp(), 0xFD);
    // Return address minus one
    assert_eq!(cpu.memory().read(0x01FF), 0x80);
    assert_eq!(cpu.memory().read(0x01FE), 0x02);

    cpu.step();
    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFF);
    assert_eq!(cpu.a(), 0x01);
}
