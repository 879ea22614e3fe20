//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX set N and Z from the copied value. TXS does
//! not touch the flags.

use crate::cpu::CpuCore;
use crate::memory::MemoryBus;

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.x = cpu.a;
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.y = cpu.a;
    let y = cpu.y;
    cpu.set_nz(y);
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.a = cpu.x;
    let a = cpu.a;
    cpu.set_nz(a);
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.a = cpu.y;
    let a = cpu.a;
    cpu.set_nz(a);
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.x = cpu.sp;
    let x = cpu.x;
    cpu.set_nz(x);
}

pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.sp = cpu.x;
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
        let mut cpu = CpuCore::new(memory, 0xFFFF, 0, CpuModel::Nmos6502);
        cpu.reset();
        cpu
    }

    #[test]
    fn test_tsx_sets_flags() {
        let mut cpu = setup_cpu(&[0xBA]);
        assert_eq!(cpu.step(), 2);
        assert_eq!(cpu.x(), 0xFF);
        assert!(cpu.flag_n());
    }

    #[test]
    fn test_txs_leaves_flags() {
        let mut cpu = setup_cpu(&[0x9A]);
        let before = cpu.status();
        cpu.step();
        assert_eq!(cpu.sp(), 0x00);
        assert_eq!(cpu.status(), before);
    }

    #[test]
    fn test_tay_zero() {
        let mut cpu = setup_cpu(&[0xA8]);
        cpu.set_a(0x00);
        cpu.set_y(0x10);
        cpu.step();
        assert_eq!(cpu.y(), 0x00);
        assert!(cpu.flag_z());
    }
}
