//! # Branch Instructions
//!
//! Relative branches (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS, BRA) and the
//! 65C02 bit-test branches BBR0-7 / BBS0-7.
//!
//! Timing on top of the base cost:
//! - +1 cycle if the branch is taken
//! - +1 more if the target lies on a different page than the next instruction

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;

/// Branches by the relative offset in `operand` when `condition` holds.
pub(crate) fn branch_if<M: MemoryBus>(cpu: &mut CpuCore<M>, condition: bool, operand: Operand) {
    if let Operand::Relative(offset) = operand {
        if condition {
            take_branch(cpu, offset);
        }
    }
}

/// Executes BBRn: branch if bit `bit` of the zero-page byte is clear.
pub(crate) fn execute_bbr<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, bit: u8) {
    if let Operand::ZeroPageRelative { zp, offset } = operand {
        if cpu.read(zp as u16) & (1 << bit) == 0 {
            take_branch(cpu, offset);
        }
    }
}

/// Executes BBSn: branch if bit `bit` of the zero-page byte is set.
pub(crate) fn execute_bbs<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, bit: u8) {
    if let Operand::ZeroPageRelative { zp, offset } = operand {
        if cpu.read(zp as u16) & (1 << bit) != 0 {
            take_branch(cpu, offset);
        }
    }
}

fn take_branch<M: MemoryBus>(cpu: &mut CpuCore<M>, offset: i8) {
    let target = cpu.pc.wrapping_add(offset as u16);
    cpu.cycles += 1;
    if target & 0xFF00 != cpu.pc & 0xFF00 {
        cpu.cycles += 1;
    }
    cpu.pc = target;
}
