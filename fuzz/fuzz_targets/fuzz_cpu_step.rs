//! Fuzz target for CPU step execution.
//!
//! Builds an arbitrary register state, model and memory image, then runs a
//! few steps (with optional pending interrupts). Stepping must never panic
//! and must keep the status and cycle invariants.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{CpuCore, CpuModel, FlatMemory, IrqMode, MemoryBus, Status};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    model: u8,
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    p: u8,
    irq: bool,
    nmi: bool,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (a few instructions)
    program: [u8; 16],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    /// Target region for absolute and indirect operands
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
    steps: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);
    memory.load(0x8000, &input.memory.program);
    memory.load(0xFFFA, &[0x00, 0xA0, 0x00, 0x80, 0x00, 0x90]);

    let model = CpuModel::ALL[input.cpu_state.model as usize % CpuModel::ALL.len()];
    let mut cpu = CpuCore::new(memory, 0xFFFF, 0, model);
    cpu.reset();

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(Status::from_bits_retain(input.cpu_state.p));
    if input.cpu_state.irq {
        cpu.assert_irq(IrqMode::Pulse);
    }
    if input.cpu_state.nmi {
        cpu.assert_nmi();
    }

    for _ in 0..(input.steps % 8) + 1 {
        let cycles = cpu.step();

        // Nothing in the family takes more than 7 cycles plus one penalty
        assert!((1..=8).contains(&cycles), "step took {} cycles", cycles);
        assert!(cpu.status().contains(Status::UNUSED));
        assert!(!cpu.status().contains(Status::BREAK));
        assert!(cpu.total_cycles() <= 0x0FFF_FFFF);
    }
});
