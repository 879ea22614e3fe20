//! # Control Flow Instructions
//!
//! - BRK: software interrupt through the IRQ vector
//! - JMP: absolute, indirect and (65C02) absolute indexed indirect
//! - JSR / RTS: subroutine call and return
//! - RTI: return from interrupt
//! - Undocumented NOP variants and the JAM (KIL) opcodes
//!
//! BRK is a software interrupt that:
//! 1. Skips the padding byte after the opcode
//! 2. Pushes the return address (high byte first, then low byte)
//! 3. Pushes P with B and U set
//! 4. Sets I, and clears D where the model (or config) says so
//! 5. Loads PC from the IRQ vector at $FFFE/F

use log::{debug, warn};

use crate::addressing::Operand;
use crate::config::JamBehavior;
use crate::cpu::{CpuCore, IRQ_VECTOR};
use crate::memory::MemoryBus;
use crate::status::Status;

/// Executes BRK (Force Interrupt). Timing: 7 cycles.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.pc = cpu.pc.wrapping_add(1);
    cpu.push_word(cpu.pc);
    cpu.push(cpu.p.to_pushed_brk());
    cpu.p.insert(Status::INTERRUPT_DISABLE);
    if cpu.config.decimal_clear_on_interrupt() {
        cpu.p.remove(Status::DECIMAL);
    }
    cpu.pc = cpu.read_word(IRQ_VECTOR);
}

/// Executes JMP. The resolver has already produced the final target,
/// including the NMOS indirect page-wrap bug.
pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    if let Operand::Address(target) = operand {
        cpu.pc = target;
    }
}

/// Executes JSR. Pushes the address of the last operand byte, so RTS must
/// add one.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CpuCore<M>, operand: Operand) {
    if let Operand::Address(target) = operand {
        cpu.push_word(cpu.pc.wrapping_sub(1));
        cpu.pc = target;
    }
}

/// Executes RTS.
pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    cpu.pc = cpu.pull_word().wrapping_add(1);
}

/// Executes RTI.
///
/// Pulls P (B dropped, U forced) and then PC. Unlike RTS the address is used
/// as is. If I goes from set to clear, IRQs stay masked for one more
/// instruction.
pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    let pulled = cpu.pull();
    restore_status(cpu, pulled);
    cpu.pc = cpu.pull_word();
}

/// Replaces P with a pulled byte, arming the IRQ delay when I clears.
pub(crate) fn restore_status<M: MemoryBus>(cpu: &mut CpuCore<M>, pulled: u8) {
    let was_masked = cpu.p.contains(Status::INTERRUPT_DISABLE);
    cpu.p = Status::from_pulled(pulled);
    if was_masked && !cpu.p.contains(Status::INTERRUPT_DISABLE) {
        cpu.irq_inhibit = 2;
    }
}

/// Undocumented NOP. Operand bytes were consumed (and any dummy read cycles
/// charged) by the resolver.
pub(crate) fn execute_illegal_nop<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    debug!(
        "cpu {}: undocumented NOP at ${:04X}",
        cpu.config.cpu_id,
        cpu.ppc.wrapping_sub(1)
    );
}

/// JAM / KIL. Real silicon locks up; by default this is a one-byte NOP.
pub(crate) fn execute_jam<M: MemoryBus>(cpu: &mut CpuCore<M>) {
    let addr = cpu.ppc.wrapping_sub(1);
    match cpu.config.jam {
        JamBehavior::Nop => {
            warn!("cpu {}: JAM opcode at ${:04X} executed as NOP", cpu.config.cpu_id, addr);
        }
        JamBehavior::Halt => {
            warn!("cpu {}: JAM opcode at ${:04X}, CPU halted until reset", cpu.config.cpu_id, addr);
            cpu.jammed = true;
            cpu.pc = addr;
        }
    }
}
