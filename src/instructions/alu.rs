//! # ALU Instructions
//!
//! Arithmetic and logical operations:
//! - ADC, SBC: three variants selected by [`DecimalMode`]
//! - AND, ORA, EOR
//! - CMP, CPX, CPY
//! - BIT
//!
//! ## Decimal mode
//!
//! Carry and overflow always come from the binary sum or difference (carry
//! is then adjusted by the BCD fix-up). The variants differ in N/Z and
//! timing:
//!
//! | Variant | N, Z from | Extra cycle with D set |
//! |---------|-----------|------------------------|
//! | Nmos    | binary result | no |
//! | Cmos    | corrected result | yes |
//! | Binary  | binary result, D ignored | no |

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;
use crate::opcodes::DecimalMode;
use crate::status::Status;

/// Executes ADC (Add with Carry).
///
/// Flags affected: N, V, Z, C.
pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, mode: DecimalMode) {
    let value = cpu.load_operand(operand);
    add(cpu, value, mode);
}

/// Executes SBC (Subtract with Carry).
///
/// Carry acts as an inverted borrow. Flags affected: N, V, Z, C.
pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, mode: DecimalMode) {
    let value = cpu.load_operand(operand);
    subtract(cpu, value, mode);
}

/// A + value + C, shared with RRA.
pub(crate) fn add<M: MemoryBus>(cpu: &mut CpuCore<M>, value: u8, mode: DecimalMode) {
    let a = cpu.a;
    let carry = cpu.flag_c() as u16;
    let sum = a as u16 + value as u16 + carry;
    let binary = sum as u8;

    cpu.p
        .set(Status::OVERFLOW, !(a ^ value) & (a ^ binary) & 0x80 != 0);

    let decimal = mode != DecimalMode::Binary && cpu.flag_d();
    if decimal {
        let mut result = sum;
        if (a & 0x0F) as u16 + (value & 0x0F) as u16 + carry > 9 {
            result += 0x06;
        }
        let carry_out = result > 0x99;
        if carry_out {
            result += 0x60;
        }
        cpu.p.set(Status::CARRY, carry_out);
        cpu.a = result as u8;
    } else {
        cpu.p.set(Status::CARRY, sum > 0xFF);
        cpu.a = binary;
    }

    finish_decimal_flags(cpu, binary, decimal, mode);
}

/// A - value - !C, shared with ISC.
pub(crate) fn subtract<M: MemoryBus>(cpu: &mut CpuCore<M>, value: u8, mode: DecimalMode) {
    let a = cpu.a;
    let borrow = !cpu.flag_c() as u16;
    let difference = (a as u16).wrapping_sub(value as u16).wrapping_sub(borrow);
    let binary = difference as u8;

    cpu.p
        .set(Status::OVERFLOW, (a ^ value) & (a ^ binary) & 0x80 != 0);

    let decimal = mode != DecimalMode::Binary && cpu.flag_d();
    if decimal {
        let mut result = difference;
        let low_borrow = ((a & 0x0F) as i16 - (value & 0x0F) as i16 - borrow as i16) < 0;
        if low_borrow {
            result = result.wrapping_sub(0x06);
        }
        let high = (a >> 4) as i16 - (value >> 4) as i16 - low_borrow as i16;
        if high < 0 {
            result = result.wrapping_sub(0x60);
        }
        cpu.p.set(Status::CARRY, high >= 0);
        cpu.a = result as u8;
    } else {
        cpu.p.set(Status::CARRY, difference & 0x100 == 0);
        cpu.a = binary;
    }

    finish_decimal_flags(cpu, binary, decimal, mode);
}

fn finish_decimal_flags<M: MemoryBus>(cpu: &mut CpuCore<M>, binary: u8, decimal: bool, mode: DecimalMode) {
    if decimal && mode == DecimalMode::Cmos {
        let a = cpu.a;
        cpu.set_nz(a);
        cpu.cycles += 1;
    } else {
        cpu.set_nz(binary);
    }
}

/// Executes AND. Flags affected: N, Z.
pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    cpu.a &= cpu.load_operand(operand);
    let a = cpu.a;
    cpu.set_nz(a);
}

/// Executes ORA. Flags affected: N, Z.
pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    cpu.a |= cpu.load_operand(operand);
    let a = cpu.a;
    cpu.set_nz(a);
}

/// Executes EOR. Flags affected: N, Z.
pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    cpu.a ^= cpu.load_operand(operand);
    let a = cpu.a;
    cpu.set_nz(a);
}

/// Executes CMP, CPX or CPY against `register`.
///
/// C is set when `register >= operand`; N and Z come from the difference.
pub(crate) fn execute_compare<M: MemoryBus>(cpu: &mut CpuCore<M>, register: u8, operand: Operand) {
    let value = cpu.load_operand(operand);
    compare(cpu, register, value);
}

pub(crate) fn compare<M: MemoryBus>(cpu: &mut CpuCore<M>, register: u8, value: u8) {
    cpu.p.set(Status::CARRY, register >= value);
    cpu.set_nz(register.wrapping_sub(value));
}

/// Executes BIT.
///
/// Z reflects `A & M`. Except for the 65C02 immediate form, N and V are
/// copied from bits 7 and 6 of M.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, immediate: bool) {
    let value = cpu.load_operand(operand);
    cpu.p.set(Status::ZERO, cpu.a & value == 0);
    if !immediate {
        cpu.p.set(Status::NEGATIVE, value & 0x80 != 0);
        cpu.p.set(Status::OVERFLOW, value & 0x40 != 0);
    }
}
