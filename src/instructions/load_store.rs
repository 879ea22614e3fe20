//! # Load and Store Instructions
//!
//! LDA, LDX, LDY set N and Z from the loaded value. STA, STX, STY and the
//! 65C02 STZ write a register (or zero) and leave the flags alone.
//!
//! Stores never pay the page-crossing penalty; their base cycles already
//! include the extra bus cycle.

use crate::addressing::Operand;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;

pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    cpu.a = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    cpu.x = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let value = cpu.load_operand(operand);
    cpu.y = value;
    cpu.set_nz(value);
}

pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let a = cpu.a;
    cpu.store_operand(operand, a);
}

pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let x = cpu.x;
    cpu.store_operand(operand, x);
}

pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    let y = cpu.y;
    cpu.store_operand(operand, y);
}

pub(crate) fn execute_stz<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    cpu.store_operand(operand, 0);
}

#[cfg(test)]
mod tests {
    use crate::cpu::CpuCore;
    use crate::memory::{FlatMemory, MemoryBus};
    use crate::model::CpuModel;
    use test_case::test_case;

    fn setup_cpu(model: CpuModel, program: &[u8]) -> CpuCore<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.load(0x0200, program);
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x02);
        let mut cpu = CpuCore::new(memory, 0xFFFF, 0, model);
        cpu.reset();
        cpu
    }

    #[test_case(0x00, true, false ; "zero")]
    #[test_case(0x42, false, false ; "positive")]
    #[test_case(0x80, false, true ; "negative")]
    fn test_lda_immediate_flags(value: u8, zero: bool, negative: bool) {
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xA9, value]);
        assert_eq!(cpu.step(), 2);
        assert_eq!(cpu.a(), value);
        assert_eq!(cpu.flag_z(), zero);
        assert_eq!(cpu.flag_n(), negative);
    }

    #[test]
    fn test_lda_absolute_x_page_cross() {
        // LDA $12FF,X with X=1
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xBD, 0xFF, 0x12]);
        cpu.set_x(1);
        cpu.poke(0x1300, 0x77);
        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.a(), 0x77);
    }

    #[test]
    fn test_sta_absolute_x_has_no_penalty() {
        // STA $12FF,X with X=1
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0x9D, 0xFF, 0x12]);
        cpu.set_a(0x55);
        cpu.set_x(1);
        assert_eq!(cpu.step(), 5);
        assert_eq!(cpu.peek(0x1300), 0x55);
    }

    #[test]
    fn test_ldx_zero_page_y_wraps() {
        // LDX $F0,Y with Y=$20 reads $10
        let mut cpu = setup_cpu(CpuModel::Nmos6502, &[0xB6, 0xF0]);
        cpu.set_y(0x20);
        cpu.poke(0x10, 0x99);
        assert_eq!(cpu.step(), 4);
        assert_eq!(cpu.x(), 0x99);
    }

    #[test]
    fn test_stz() {
        // STZ $40
        let mut cpu = setup_cpu(CpuModel::Cmos65C02, &[0x64, 0x40]);
        cpu.poke(0x40, 0xAA);
        assert_eq!(cpu.step(), 3);
        assert_eq!(cpu.peek(0x40), 0x00);
    }
}
