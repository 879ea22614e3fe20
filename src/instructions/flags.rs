//! # Flag Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED, CLV. All take 2 cycles.
//!
//! CLI is the only one with a side effect beyond P: when it actually clears
//! I, a pending IRQ is held off until one more instruction has run.

use crate::cpu::CpuCore;
use crate::memory::MemoryBus;
use crate::status::Status;

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.p.remove(Status::CARRY);
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.p.insert(Status::CARRY);
}

/// Executes CLI (Clear Interrupt Disable).
pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    if cpu.p.contains(Status::INTERRUPT_DISABLE) {
        cpu.irq_inhibit = 2;
    }
    cpu.p.remove(Status::INTERRUPT_DISABLE);
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.p.insert(Status::INTERRUPT_DISABLE);
}

pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.p.remove(Status::DECIMAL);
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.p.insert(Status::DECIMAL);
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.p.remove(Status::OVERFLOW);
}
