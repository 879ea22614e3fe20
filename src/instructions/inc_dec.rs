//! # Increment and Decrement Instructions
//!
//! INC and DEC work on memory (or, on the 65C02, on A); INX, INY, DEX and
//! DEY on the index registers. All wrap and set N and Z; C and V are
//! untouched.

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;

pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, |_, value| value.wrapping_add(1));
    cpu.set_nz(result);
}

pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, |_, value| value.wrapping_sub(1));
    cpu.set_nz(result);
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.x = cpu.x.wrapping_add(1);
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.y = cpu.y.wrapping_add(1);
    let y = cpu.y;
    cpu.set_nz(y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.x = cpu.x.wrapping_sub(1);
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.y = cpu.y.wrapping_sub(1);
    let y = cpu.y;
    cpu.set_nz(y);
}
