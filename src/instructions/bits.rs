//! # 65C02 Bit Manipulation
//!
//! - TSB / TRB: test A against memory, then set or reset those bits
//! - RMB0-7 / SMB0-7: clear or set one bit of a zero-page byte
//!
//! BBR/BBS also test single bits but branch, so they live in `branches`.

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;
use crate::status::Status;

/// Executes TSB (Test and Set Bits).
///
/// Z is set from `A & M`, then `M | A` is written back. No other flags.
pub(crate) fn execute_tsb<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let a = cpu.a;
    cpu.modify_operand(operand, |cpu, value| {
        cpu.p.set(Status::ZERO, a & value == 0);
        value | a
    });
}

/// Executes TRB (Test and Reset Bits).
///
/// Z is set from `A & M`, then `M & !A` is written back.
pub(crate) fn execute_trb<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let a = cpu.a;
    cpu.modify_operand(operand, |cpu, value| {
        cpu.p.set(Status::ZERO, a & value == 0);
        value & !a
    });
}

/// Executes RMBn: clears bit `bit` of the zero-page operand.
pub(crate) fn execute_rmb<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, bit: u8) {
    cpu.modify_operand(operand, |_, value| value & !(1 << bit));
}

/// Executes SMBn: sets bit `bit` of the zero-page operand.
pub(crate) fn execute_smb<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand, bit: u8) {
    cpu.modify_operand(operand, |_, value| value | (1 << bit));
}

#[cfg(test)]
mod tests {
    use crate::cpu::CpuCore;
    use crate::memory::{FlatMemory, MemoryBus};
    use crate::model::CpuModel;

    fn setup_cpu(program: &[u8]) -> CpuCore<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.load(0x0200, program);
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x02);
        let mut cpu = CpuCore::new(memory, 0xFFFF, 0, CpuModel::Cmos65C02);
        cpu.reset();
        cpu
    }

    #[test]
    fn test_tsb_sets_bits_and_tests_before() {
        // TSB $10
        let mut cpu = setup_cpu(&[0x04, 0x10]);
        cpu.poke(0x10, 0x0F);
        cpu.set_a(0xF0);
        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.peek(0x10), 0xFF);
        assert!(cpu.flag_z());
    }

    #[test]
    fn test_trb_clears_bits() {
        // TRB $1234
        let mut cpu = setup_cpu(&[0x1C, 0x34, 0x12]);
        cpu.poke(0x1234, 0xFF);
        cpu.set_a(0x81);
        assert_eq!(cpu.step(), 6);
        assert_eq!(cpu.peek(0x1234), 0x7E);
        assert!(!cpu.flag_z());
    }

    #[test]
    fn test_rmb_smb() {
        // SMB3 $20 ; RMB0 $20
        let mut cpu = setup_cpu(&[0xB7, 0x20, 0x07, 0x20]);
        cpu.poke(0x20, 0x01);
        let p = cpu.status();
        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.peek(0x20), 0x09);
        cpu.step();
        assert_eq!(cpu.peek(0x20), 0x08);
        assert_eq!(cpu.status(), p);
    }
}
