//! # Undocumented NMOS Instructions
//!
//! The NMOS 6502 (and the 2A03 and 6510, which share its decoder) executes
//! every opcode. The stable composites combine two documented operations
//! on the same operand:
//!
//! | Op  | Effect |
//! |-----|--------|
//! | LAX | LDA + LDX |
//! | SAX | store A & X |
//! | DCP | DEC, then CMP |
//! | ISC | INC, then SBC |
//! | SLO | ASL, then ORA |
//! | RLA | ROL, then AND |
//! | SRE | LSR, then EOR |
//! | RRA | ROR, then ADC |
//!
//! The immediate-only ANC, ALR, ARR and AXS are also stable. ANE and LXA
//! depend on an analog "magic" constant (see
//! [`CpuConfig::unstable_magic`](crate::CpuConfig)), and the SHA/SHX/SHY/TAS
//! stores AND their value with the high byte of the base address plus one.

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::instructions::alu::{add, compare, subtract};
use crate::instructions::shifts::{asl_value, lsr_value, rol_value, ror_value};
use crate::memory::MemoryBus;
use crate::opcodes::DecimalMode;
use crate::status::Status;

/// LAX: A = X = M.
pub(crate) fn execute_lax<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    cpu.a = value;
    cpu.x = value;
    cpu.set_nz(value);
}

/// SAX: M = A & X. No flags.
pub(crate) fn execute_sax<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.a & cpu.x;
    cpu.store_operand(operand, value);
}

/// DCP: M = M - 1, then compare A with M.
pub(crate) fn execute_dcp<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, |_, value| value.wrapping_sub(1));
    let a = cpu.a;
    compare(cpu, a, result);
}

/// ISC: M = M + 1, then SBC M.
pub(crate) fn execute_isc<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, mode: DecimalMode) {
    let result = cpu.modify_operand(operand, |_, value| value.wrapping_add(1));
    subtract(cpu, result, mode);
}

/// SLO: ASL M, then ORA M.
pub(crate) fn execute_slo<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, asl_value);
    cpu.a |= result;
    let a = cpu.a;
    cpu.set_nz(a);
}

/// RLA: ROL M, then AND M.
pub(crate) fn execute_rla<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, rol_value);
    cpu.a &= result;
    let a = cpu.a;
    cpu.set_nz(a);
}

/// SRE: LSR M, then EOR M.
pub(crate) fn execute_sre<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.modify_operand(operand, lsr_value);
    cpu.a ^= result;
    let a = cpu.a;
    cpu.set_nz(a);
}

/// RRA: ROR M, then ADC M. The carry out of the rotate feeds the add.
pub(crate) fn execute_rra<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, mode: DecimalMode) {
    let result = cpu.modify_operand(operand, ror_value);
    add(cpu, result, mode);
}

/// ANC: A &= imm, C = bit 7 of the result.
pub(crate) fn execute_anc<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    cpu.a &= cpu.load_operand(operand);
    let a = cpu.a;
    cpu.set_nz(a);
    cpu.p.set(Status::CARRY, a & 0x80 != 0);
}

/// ALR: A &= imm, then LSR A.
pub(crate) fn execute_alr<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let masked = cpu.a & cpu.load_operand(operand);
    let result = lsr_value(cpu, masked);
    cpu.a = result;
    cpu.set_nz(result);
}

/// ARR: A &= imm, then ROR A, with flags taken from the adder.
///
/// In binary mode C is bit 6 of the result and V is bit 6 XOR bit 5. With D
/// set on an NMOS part each nibble receives a BCD-style fix-up and N mirrors
/// the incoming carry.
pub(crate) fn execute_arr<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, mode: DecimalMode) {
    let masked = cpu.a & cpu.load_operand(operand);
    let carry_in = cpu.p.contains(Status::CARRY) as u8;
    let mut result = (masked >> 1) | (carry_in << 7);

    if mode != DecimalMode::Binary && cpu.p.contains(Status::DECIMAL) {
        cpu.p.set(Status::NEGATIVE, carry_in != 0);
        cpu.p.set(Status::ZERO, result == 0);
        cpu.p.set(Status::OVERFLOW, (masked ^ result) & 0x40 != 0);

        if (masked & 0x0F) + (masked & 0x01) > 0x05 {
            result = (result & 0xF0) | (result.wrapping_add(0x06) & 0x0F);
        }
        let high_fix = (masked & 0xF0) as u16 + (masked & 0x10) as u16 > 0x50;
        if high_fix {
            result = result.wrapping_add(0x60);
        }
        cpu.p.set(Status::CARRY, high_fix);
    } else {
        cpu.set_nz(result);
        cpu.p.set(Status::CARRY, result & 0x40 != 0);
        cpu.p
            .set(Status::OVERFLOW, ((result >> 6) ^ (result >> 5)) & 0x01 != 0);
    }

    cpu.a = result;
}

/// AXS (SBX): X = (A & X) - imm, with C set as for CMP. V is untouched.
pub(crate) fn execute_axs<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    let masked = cpu.a & cpu.x;
    cpu.p.set(Status::CARRY, masked >= value);
    cpu.x = masked.wrapping_sub(value);
    let x = cpu.x;
    cpu.set_nz(x);
}

/// ANE (XAA): A = (A | magic) & X & imm.
pub(crate) fn execute_ane<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    cpu.a = (cpu.a | cpu.config.unstable_magic) & cpu.x & value;
    let a = cpu.a;
    cpu.set_nz(a);
}

/// LXA: A = X = (A | magic) & imm.
pub(crate) fn execute_lxa<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    let result = (cpu.a | cpu.config.unstable_magic) & value;
    cpu.a = result;
    cpu.x = result;
    cpu.set_nz(result);
}

/// LAS: A = X = S = M & S.
pub(crate) fn execute_las<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let result = cpu.load_operand(operand) & cpu.sp;
    cpu.a = result;
    cpu.x = result;
    cpu.sp = result;
    cpu.set_nz(result);
}

/// TAS (SHS): S = A & X, then store S & (H + 1) at abs,Y.
pub(crate) fn execute_tas<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    cpu.sp = cpu.a & cpu.x;
    let (value, index) = (cpu.sp, cpu.y);
    unstable_store(cpu, operand, value, index);
}

/// SHA (AHX): store A & X & (H + 1).
pub(crate) fn execute_sha<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let (value, index) = (cpu.a & cpu.x, cpu.y);
    unstable_store(cpu, operand, value, index);
}

/// SHX: store X & (H + 1) at abs,Y.
pub(crate) fn execute_shx<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let (value, index) = (cpu.x, cpu.y);
    unstable_store(cpu, operand, value, index);
}

/// SHY: store Y & (H + 1) at abs,X.
pub(crate) fn execute_shy<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let (value, index) = (cpu.y, cpu.x);
    unstable_store(cpu, operand, value, index);
}

/// Store shared by SHA/SHX/SHY/TAS. `H` is the high byte of the unindexed
/// base address. When indexing crosses a page, the stored byte also
/// replaces the high byte of the target address.
fn unstable_store<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, value: u8, index: u8) {
    let Operand::Address(addr) = operand else {
        return;
    };
    let base = addr.wrapping_sub(index as u16);
    let data = value & ((base >> 8) as u8).wrapping_add(1);
    let target = if base & 0xFF00 != addr & 0xFF00 {
        ((data as u16) << 8) | (addr & 0x00FF)
    } else {
        addr
    };
    cpu.write(target, data);
}
