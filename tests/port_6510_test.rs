//! Tests for the 6510 on-chip I/O port as seen by running code.
//!
//! Tests cover:
//! - $0000/$0001 being served by the port instead of the bus
//! - The change callback firing only when driven outputs change
//! - Input pins
//! - Reset behavior
//! - Other models using plain memory at $0000/$0001

use std::sync::{Arc, Mutex};

use cpu6502::{CpuCore, CpuModel, FlatMemory, MemoryBus};
use pretty_assertions::assert_eq;

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

type Calls = Arc<Mutex<Vec<(u8, u8)>>>;

fn record_port_changes(cpu: &mut CpuCore<FlatMemory>) -> Calls {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    cpu.set_port_callback(Some(Box::new(move |latch, ddr| {
        sink.lock().unwrap().push((latch, ddr));
    })));
    calls
}

#[test]
fn test_port_registers_shadow_the_bus() {
    // LDA #$2F ; STA $00 ; LDA #$37 ; STA $01
    let mut cpu = setup_cpu(CpuModel::Mos6510, &[0xA9, 0x2F, 0x85, 0x00, 0xA9, 0x37, 0x85, 0x01]);

    cpu.run_for(10);

    let port = cpu.port().unwrap();
    assert_eq!(port.ddr(), 0x2F);
    assert_eq!(port.latch(), 0x37);
    assert_eq!(cpu.memory().read(0x0000), 0x00);
    assert_eq!(cpu.memory().read(0x0001), 0x00);
}

#[test]
fn test_callback_fires_on_driven_change_only() {
    // STA $01 (A=$07, all inputs) ; LDA #$07 ; STA $00 ; STA $01 ; LDA #$06 ; STA $01
    let program = [0x85, 0x01, 0xA9, 0x07, 0x85, 0x00, 0x85, 0x01, 0xA9, 0x06, 0x85, 0x01];
    let mut cpu = setup_cpu(CpuModel::Mos6510, &program);
    let calls = record_port_changes(&mut cpu);
    cpu.set_a(0x07);

    for _ in 0..6 {
        cpu.step();
    }

    assert_eq!(calls.lock().unwrap().as_slice(), &[(0x07, 0x07), (0x06, 0x07)]);
}

#[test]
fn test_read_mixes_latch_and_input_pins() {
    // LDA #$0F ; STA $00 ; LDA #$05 ; STA $01 ; LDA $01
    let program = [0xA9, 0x0F, 0x85, 0x00, 0xA9, 0x05, 0x85, 0x01, 0xA5, 0x01];
    let mut cpu = setup_cpu(CpuModel::Mos6510, &program);
    cpu.set_port_input(0xA0);

    for _ in 0..5 {
        cpu.step();
    }

    assert_eq!(cpu.a(), 0xA5);
}

#[test]
fn test_reading_ddr() {
    let mut cpu = setup_cpu(CpuModel::Mos6510, &[0xA5, 0x00]);
    cpu.poke(0x0000, 0xFF);

    cpu.step();

    assert_eq!(cpu.a(), 0xFF);
    assert_eq!(cpu.peek(0x0000), 0xFF);
}

#[test]
fn test_reset_restores_inputs_without_callback() {
    let mut cpu = setup_cpu(CpuModel::Mos6510, &[]);
    let calls = record_port_changes(&mut cpu);
    cpu.poke(0x0000, 0xFF);
    cpu.poke(0x0001, 0x01);
    let before = calls.lock().unwrap().len();

    cpu.reset();

    assert_eq!(calls.lock().unwrap().len(), before);
    assert_eq!(cpu.peek(0x0000), 0x00);
    assert_eq!(cpu.peek(0x0001), 0xFF);
}

#[test]
fn test_other_models_have_no_port() {
    for model in [CpuModel::Nmos6502, CpuModel::Cmos65C02, CpuModel::Nes2A03] {
        let mut cpu = setup_cpu(model, &[0xA9, 0x12, 0x85, 0x01]);
        cpu.set_port_input(0x00);
        cpu.set_port_callback(None);

        cpu.step();
        cpu.step();

        assert!(cpu.port().is_none());
        assert_eq!(cpu.memory().read(0x0001), 0x12, "{}", model);
    }
}
