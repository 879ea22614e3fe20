//! Tests for the undocumented NMOS opcodes.
//!
//! Tests cover:
//! - The stable read-modify-write composites and their cycle counts
//! - Immediate-only ANC/ALR/ARR/AXS
//! - Magic-constant ANE/LXA
//! - Undocumented NOPs consuming their operands
//! - JAM under both policies
//! - The same opcodes being plain NOPs on the 65C02

use cpu6502::{CpuConfig, CpuCore, CpuModel, FlatMemory, JamBehavior, MemoryBus, Status};
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
fn test_dcp_zero_page() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xC7, 0x20]);
    cpu.memory_mut().write(0x0020, 0x05);
    cpu.set_a(0x05);

    assert_eq!(cpu.step(), 5);

    assert_eq!(cpu.memory().read(0x0020), 0x04);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test_case(0xC3, 8 ; "indexed indirect")]
#[test_case(0xD3, 8 ; "indirect indexed")]
#[test_case(0xCF, 6 ; "absolute")]
#[test_case(0xDF, 7 ; "absolute x")]
#[test_case(0xDB, 7 ; "absolute y")]
fn test_dcp_modes_never_pay_page_penalty(opcode: u8, cycles: u32) {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[opcode, 0xFF, 0x20]);
    cpu.set_x(0x01);
    cpu.set_y(0x01);
    cpu.memory_mut().write(0x0000, 0xFF);
    cpu.memory_mut().write(0x00FF, 0xFF);
    cpu.memory_mut().write(0x0001, 0xFF);

    assert_eq!(cpu.step(), cycles);
}

#[test]
fn test_lax_absolute_y_page_penalty() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xBF, 0xFF, 0x20]);
    cpu.set_y(0x01);
    cpu.memory_mut().write(0x2100, 0x00);

    assert_eq!(cpu.step(), 5);
    assert_eq!((cpu.a(), cpu.x()), (0x00, 0x00));
    assert!(cpu.flag_z());
}

#[test]
fn test_sax_zero_page_y() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x97, 0x10]);
    cpu.set_a(0xCC);
    cpu.set_x(0xAA);
    cpu.set_y(0x05);
    let flags = cpu.status();

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.memory().read(0x0015), 0x88);
    assert_eq!(cpu.status(), flags);
}

#[test]
fn test_slo_absolute_x() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x1F, 0x00, 0x30]);
    cpu.set_x(0x02);
    cpu.set_a(0x01);
    cpu.memory_mut().write(0x3002, 0xC0);

    assert_eq!(cpu.step(), 7);
    assert_eq!(cpu.memory().read(0x3002), 0x80);
    assert_eq!(cpu.a(), 0x81);
    assert!(cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_axs_does_not_touch_overflow() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xCB, 0x10]);
    cpu.set_a(0xFF);
    cpu.set_x(0x08);
    cpu.set_flag(Status::OVERFLOW, true);

    cpu.step();

    assert_eq!(cpu.x(), 0xF8);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_v());
}

#[test]
fn test_ane_default_magic() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x8B, 0xFF]);
    cpu.set_a(0x01);
    cpu.set_x(0xFF);

    cpu.step();

    assert_eq!(cpu.a(), 0xEF);
}

#[test_case(0x1A, 1, 2 ; "implied")]
#[test_case(0x80, 2, 2 ; "immediate")]
#[test_case(0x04, 2, 3 ; "zero page")]
#[test_case(0x14, 2, 4 ; "zero page x")]
#[test_case(0x0C, 3, 4 ; "absolute")]
#[test_case(0x1C, 3, 4 ; "absolute x")]
fn test_undocumented_nop_consumes_operands(opcode: u8, length: u16, cycles: u32) {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[opcode, 0x00, 0x00]);
    let before = format!("{:?}", cpu.status());

    assert_eq!(cpu.step(), cycles);
    assert_eq!(cpu.pc(), 0x8000 + length);
    assert_eq!(format!("{:?}", cpu.status()), before);
}

#[test]
fn test_undocumented_nop_absolute_x_page_penalty() {
    let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xFC, 0xFF, 0x20]);
    cpu.set_x(0x01);
    assert_eq!(cpu.step(), 5);
}

#[test]
fn test_jam_opcodes_default_to_one_byte_nop() {
    for opcode in [0x02u8, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2] {
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[opcode]);
        assert_eq!(cpu.step(), 2, "opcode {:02X}", opcode);
        assert_eq!(cpu.pc(), 0x8001);
        assert!(!cpu.is_jammed());
    }
}

#[test]
fn test_jam_halt_policy_stalls() {
    let mut memory = FlatMemory::new();
    memory.load(0x8000, &[0xEA, 0x12]);
    memory.write(0xFFFD, 0x80);
    let config = CpuConfig::new(CpuModel::Mos6510).with_jam(JamBehavior::Halt);
    let mut cpu = CpuCore::with_config(memory, config);
    cpu.reset();

    cpu.step();
    cpu.step();
    assert!(cpu.is_jammed());
    assert_eq!(cpu.pc(), 0x8001);

    let total = cpu.total_cycles();
    assert_eq!(cpu.run_for(10), 10);
    assert_eq!(cpu.total_cycles(), total + 10);
    assert_eq!(cpu.pc(), 0x8001);
}

#[test]
fn test_cmos_treats_undocumented_slots_as_nops() {
    // $CB and $C3 are single-cycle NOPs on the 65C02
    let mut cpu = setup_cpu(CpuModel::Cmos65C02, &[0xCB, 0xC3]);
    cpu.set_a(0x42);
    cpu.set_x(0x42);

    assert_eq!(cpu.step(), 1);
    assert_eq!(cpu.step(), 1);
    assert_eq!(cpu.pc(), 0x8002);
    assert_eq!((cpu.a(), cpu.x()), (0x42, 0x42));
}
