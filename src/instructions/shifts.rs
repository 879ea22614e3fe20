//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR, on A or on memory. The bit shifted out lands in
//! C; N and Z come from the result.
//!
//! The `*_value` helpers are shared with the undocumented read-modify-write
//! composites (SLO, SRE, RLA, RRA) and ALR.

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;
use crate::status::Status;

pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, asl_value);
    cpu.set_nz(result);
}

pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, lsr_value);
    cpu.set_nz(result);
}

pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, rol_value);
    cpu.set_nz(result);
}

pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, ror_value);
    cpu.set_nz(result);
}

/// `value << 1`; C receives the old bit 7.
pub(crate) fn asl_value<M: MemoryBus>(cpu: &mut CpuCore<M>, value: u8) -> u8 {
    cpu.p.set(Status::CARRY, value & 0x80 != 0);
    value << 1
}

/// `value >> 1`; C receives the old bit 0.
pub(crate) fn lsr_value<M: MemoryBus>(cpu: &mut CpuCore<M>, value: u8) -> u8 {
    cpu.p.set(Status::CARRY, value & 0x01 != 0);
    value >> 1
}

/// Rotate left through carry.
pub(crate) fn rol_value<M: MemoryBus>(cpu: &mut CpuCore<M>, value: u8) -> u8 {
    let carry_in = cpu.p.contains(Status::CARRY) as u8;
    cpu.p.set(Status::CARRY, value & 0x80 != 0);
    (value << 1) | carry_in
}

/// Rotate right through carry.
pub(crate) fn ror_value<M: MemoryBus>(cpu: &mut CpuCore<M>, value: u8) -> u8 {
    let carry_in = cpu.p.contains(Status::CARRY) as u8;
    cpu.p.set(Status::CARRY, value & 0x01 != 0);
    (value >> 1) | (carry_in << 7)
}
