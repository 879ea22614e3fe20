//! # Stack Instructions
//!
//! The stack lives in page one ($0100-$01FF) and grows downward; S wraps
//! within the page.
//!
//! - PHA / PLA, and the 65C02 PHX / PLX / PHY / PLY
//! - PHP pushes P with B and U set
//! - PLP drops B, forces U, and delays IRQs by one instruction if it clears I

use crate::cpu::CpuCore;
use crate::instructions::control::restore_status;
use crate::memory::MemoryBus;

pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.push(cpu.a);
}

pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.push(cpu.p.to_pushed_brk());
}

pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    let value = cpu.pull();
    cpu.a = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    let pulled = cpu.pull();
    restore_status(cpu, pulled);
}

pub(crate) fn execute_phx<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.push(cpu.x);
}

pub(crate) fn execute_plx<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    let value = cpu.pull();
    cpu.x = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_phy<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.push(cpu.y);
}

pub(crate) fn execute_ply<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    let value = cpu.pull();
    cpu.y = value;
    cpu.set_nz(value);
}
