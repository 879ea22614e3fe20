//! # CPU State and Execution
//!
//! [`CpuCore`] holds the programmer-visible registers, the interrupt latches,
//! the cycle counters and the model-specific decode table, and drives the
//! fetch/resolve/execute loop one instruction (or one interrupt entry) per
//! [`step`](CpuCore::step).
//!
//! ## Execution Model
//!
//! - `reset()`: load the reset vector, 6 cycles
//! - `step()`: service a pending interrupt *or* execute one instruction
//! - `run_for()`: step until a cycle budget is met or exceeded
//!
//! Interrupts are latched by `assert_irq`/`assert_nmi` and recognised only at
//! the top of the next `step`. An NMI always wins. An IRQ waits for I to be
//! clear and for the one-instruction delay that follows CLI, PLP or RTI
//! clearing I.

use std::fmt;

use log::{debug, trace};

use crate::config::CpuConfig;
use crate::instructions;
use crate::memory::MemoryBus;
use crate::model::CpuModel;
use crate::opcodes::OpcodeTable;
use crate::port_6510::{Port6510, PortCallback};
use crate::profiler::Profiler;
use crate::status::Status;
use crate::Error;

/// The cycle total wraps back to zero once it passes this value.
pub const CYCLE_TOTAL_CEILING: u32 = 0x0FFF_FFFF;

/// Cycles charged by [`CpuCore::reset`].
pub const RESET_CYCLES: u32 = 6;

/// Cycles charged for IRQ and NMI entry.
pub const INTERRUPT_CYCLES: u32 = 7;

/// Cycles a jammed CPU burns per `step`.
const JAMMED_STEP_CYCLES: u32 = 1;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// How an asserted IRQ behaves once it has been serviced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IrqMode {
    /// One-shot: the latch clears when the interrupt is taken.
    #[default]
    Pulse,
    /// Level: the latch stays set until [`CpuCore::clear_pending_interrupt`].
    Hold,
}

/// Register selector for [`CpuCore::get_reg`] and [`CpuCore::set_reg`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Register {
    A = 1,
    X = 2,
    Y = 3,
    P = 4,
    S = 5,
}

impl TryFrom<u8> for Register {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Register::A),
            2 => Ok(Register::X),
            3 => Ok(Register::Y),
            4 => Ok(Register::P),
            5 => Ok(Register::S),
            other => Err(Error::UnknownRegister(other)),
        }
    }
}

/// A 6502-family CPU attached to a memory bus.
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation
///
/// # Examples
///
/// ```
/// use cpu6502::{CpuCore, CpuModel, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xA9, 0x42]); // LDA #$42
///
/// let mut cpu = CpuCore::new(memory, 0xFFFF, 0, CpuModel::Nmos6502);
/// assert_eq!(cpu.reset(), 6);
/// assert_eq!(cpu.step(), 2);
/// assert_eq!(cpu.a(), 0x42);
/// assert_eq!(cpu.pc(), 0x8002);
/// ```
pub struct CpuCore<M: MemoryBus> {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    /// Stack pointer; the stack lives at $0100 + sp.
    pub(crate) sp: u8,
    pub(crate) p: Status,
    pub(crate) pc: u16,
    /// PC right after the last opcode fetch.
    pub(crate) ppc: u16,

    pub(crate) memory: M,
    pub(crate) config: CpuConfig,
    table: OpcodeTable,

    /// Cycles of the current (or last) step.
    pub(crate) cycles: u32,
    total_cycles: u32,

    irq_pending: bool,
    irq_mode: IrqMode,
    nmi_pending: bool,
    /// Steps left before an IRQ may be recognised again.
    pub(crate) irq_inhibit: u8,
    pub(crate) jammed: bool,

    port: Option<Port6510>,
    profiler: Profiler,
}

impl<M: MemoryBus> CpuCore<M> {
    /// Builds a core. Registers stay unset until [`reset`](Self::reset).
    ///
    /// `addr_mask` is ANDed into every address the CPU puts on the bus, so a
    /// part wired with fewer than 16 address lines can be modelled.
    pub fn new(memory: M, addr_mask: u16, cpu_id: u32, model: CpuModel) -> Self {
        let config = CpuConfig::new(model)
            .with_addr_mask(addr_mask)
            .with_cpu_id(cpu_id);
        Self::with_config(memory, config)
    }

    pub fn with_config(memory: M, config: CpuConfig) -> Self {
        let model = config.model;
        Self {
            a: 0,
            x: 0,
            y: 0,
            sp: 0,
            p: Status::UNUSED,
            pc: 0,
            ppc: 0,
            memory,
            table: OpcodeTable::for_model(model),
            cycles: 0,
            total_cycles: 0,
            irq_pending: false,
            irq_mode: IrqMode::Pulse,
            nmi_pending: false,
            irq_inhibit: 0,
            jammed: false,
            port: model.has_io_port().then(Port6510::new),
            profiler: Profiler::new(config.profiling),
            config,
        }
    }

    /// Performs the reset sequence and returns its cycle cost.
    ///
    /// A, X and Y are cleared, P becomes `I | Z | U`, S becomes $FF, pending
    /// interrupts and the cycle total are dropped, and PC is loaded from
    /// $FFFC/$FFFD. On the 6510 the I/O port returns to all-inputs.
    pub fn reset(&mut self) -> u32 {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.p = Status::RESET;
        self.sp = 0xFF;

        self.irq_pending = false;
        self.irq_mode = IrqMode::Pulse;
        self.nmi_pending = false;
        self.irq_inhibit = 0;
        self.jammed = false;
        self.total_cycles = 0;

        if let Some(port) = self.port.as_mut() {
            port.reset();
        }

        self.pc = self.read_word(RESET_VECTOR);
        self.ppc = self.pc;
        self.cycles = RESET_CYCLES;
        debug!("cpu {}: reset {} to ${:04X}", self.config.cpu_id, self.config.model, self.pc);
        self.cycles
    }

    /// Services one pending interrupt or executes one instruction, returning
    /// the cycles it took.
    pub fn step(&mut self) -> u32 {
        self.cycles = 0;

        if self.jammed {
            self.cycles = JAMMED_STEP_CYCLES;
            self.finish_step();
            return self.cycles;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            self.enter_interrupt(NMI_VECTOR);
            self.finish_step();
            return self.cycles;
        }

        if self.irq_pending && self.irq_inhibit == 0 && !self.p.contains(Status::INTERRUPT_DISABLE)
        {
            if self.irq_mode == IrqMode::Pulse {
                self.irq_pending = false;
            }
            self.enter_interrupt(IRQ_VECTOR);
            self.finish_step();
            return self.cycles;
        }

        let opcode_addr = self.pc;
        let opcode = self.fetch_byte();
        self.ppc = self.pc;
        self.p.insert(Status::UNUSED);
        self.profiler.record(opcode);

        if self.config.trace {
            self.trace_instruction(opcode_addr);
        }

        let entry = self.table[opcode];
        let operand = self.resolve_operand(entry.addressing_mode, entry.base_cycles);
        instructions::execute(self, entry, operand);
        self.cycles += entry.base_cycles as u32;

        self.finish_step();
        self.cycles
    }

    /// Steps until at least `cycles` cycles have run; returns the cycles run.
    ///
    /// The last instruction is never cut short, so the result can exceed the
    /// budget by up to one instruction.
    pub fn run_for(&mut self, cycles: u32) -> u32 {
        let mut executed = 0u32;
        while executed < cycles {
            executed = executed.saturating_add(self.step());
        }
        executed
    }

    fn finish_step(&mut self) {
        self.total_cycles = self.total_cycles.saturating_add(self.cycles);
        if self.total_cycles > CYCLE_TOTAL_CEILING {
            self.total_cycles = 0;
        }
        if self.irq_inhibit > 0 {
            self.irq_inhibit -= 1;
        }
    }

    fn enter_interrupt(&mut self, vector: u16) {
        self.push_word(self.pc);
        self.push(self.p.to_pushed_irq());
        self.p.insert(Status::INTERRUPT_DISABLE);
        if self.config.decimal_clear_on_interrupt() {
            self.p.remove(Status::DECIMAL);
        }
        self.pc = self.read_word(vector);
        self.cycles += INTERRUPT_CYCLES;
    }

    fn trace_instruction(&self, addr: u16) {
        let (text, _) = self.disassemble(addr);
        trace!(
            "cpu {}: {:04X}  {:<24} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} S:{:02X} T:{}",
            self.config.cpu_id,
            addr,
            text,
            self.a,
            self.x,
            self.y,
            self.p.bits(),
            self.sp,
            self.total_cycles
        );
    }

    // ========== Interrupts ==========

    /// Latches an IRQ request, serviced once I is clear.
    pub fn assert_irq(&mut self, mode: IrqMode) {
        self.irq_pending = true;
        self.irq_mode = mode;
    }

    /// Latches an NMI, serviced at the start of the next step.
    pub fn assert_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Drops any latched IRQ or NMI that has not been serviced yet; also how
    /// a held IRQ line is released.
    pub fn clear_pending_interrupt(&mut self) {
        self.irq_pending = false;
        self.nmi_pending = false;
    }

    pub fn irq_pending(&self) -> bool {
        self.irq_pending
    }

    pub fn nmi_pending(&self) -> bool {
        self.nmi_pending
    }

    pub fn irq_mode(&self) -> IrqMode {
        self.irq_mode
    }

    /// True after a JAM opcode under [`JamBehavior::Halt`](crate::JamBehavior::Halt).
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    // ========== Bus Access ==========

    /// Reads through the address mask and, on the 6510, the I/O port.
    pub(crate) fn read(&self, addr: u16) -> u8 {
        let addr = addr & self.config.addr_mask;
        match &self.port {
            Some(port) if addr < 2 => port.read(addr),
            _ => self.memory.read(addr),
        }
    }

    pub(crate) fn write(&mut self, addr: u16, value: u8) {
        let addr = addr & self.config.addr_mask;
        match self.port.as_mut() {
            Some(port) if addr < 2 => port.write(addr, value),
            _ => self.memory.write(addr, value),
        }
    }

    pub(crate) fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr);
        let hi = self.read(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte();
        let hi = self.fetch_byte();
        u16::from_le_bytes([lo, hi])
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.write(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read(0x0100 | self.sp as u16)
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push(hi);
        self.push(lo);
    }

    pub(crate) fn pull_word(&mut self) -> u16 {
        let lo = self.pull();
        let hi = self.pull();
        u16::from_le_bytes([lo, hi])
    }

    /// Reads a byte the way the CPU would, without side effects on the core.
    pub fn peek(&self, addr: u16) -> u8 {
        self.read(addr)
    }

    /// Writes a byte the way the CPU would (mask and 6510 port included).
    pub fn poke(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }

    /// Returns a reference to the memory bus.
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Returns a mutable reference to the memory bus.
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    pub fn into_memory(self) -> M {
        self.memory
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// PC recorded right after the most recent opcode fetch.
    pub fn ppc(&self) -> u16 {
        self.ppc
    }

    /// Returns the stack pointer value.
    ///
    /// Note: The full stack address is 0x0100 + SP. The stack grows downward from 0x01FF.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register.
    pub fn status(&self) -> Status {
        self.p
    }

    pub fn flag_n(&self) -> bool {
        self.p.contains(Status::NEGATIVE)
    }

    pub fn flag_v(&self) -> bool {
        self.p.contains(Status::OVERFLOW)
    }

    pub fn flag_d(&self) -> bool {
        self.p.contains(Status::DECIMAL)
    }

    pub fn flag_i(&self) -> bool {
        self.p.contains(Status::INTERRUPT_DISABLE)
    }

    pub fn flag_z(&self) -> bool {
        self.p.contains(Status::ZERO)
    }

    pub fn flag_c(&self) -> bool {
        self.p.contains(Status::CARRY)
    }

    /// Reads a register by selector. P always reads with U set.
    pub fn get_reg(&self, reg: Register) -> u8 {
        match reg {
            Register::A => self.a,
            Register::X => self.x,
            Register::Y => self.y,
            Register::P => (self.p | Status::UNUSED).bits(),
            Register::S => self.sp,
        }
    }

    // ========== Register Setters ==========

    pub fn set_reg(&mut self, reg: Register, value: u8) {
        match reg {
            Register::A => self.a = value,
            Register::X => self.x = value,
            Register::Y => self.y = value,
            Register::P => self.set_status(Status::from_bits_retain(value)),
            Register::S => self.sp = value,
        }
    }

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Forces a jump, e.g. for test harnesses or bank-switch restarts.
    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Replaces P. U is forced on and B dropped, as for a pulled byte.
    pub fn set_status(&mut self, status: Status) {
        self.p = Status::from_pulled(status.bits());
    }

    pub fn set_flag(&mut self, flag: Status, on: bool) {
        self.p.set(flag, on);
        self.p.insert(Status::UNUSED);
        self.p.remove(Status::BREAK);
    }

    // ========== Timing ==========

    /// Cycles taken by the most recent `step` or `reset`.
    pub fn last_cycles(&self) -> u32 {
        self.cycles
    }

    /// Cycles accumulated since reset (or since the last take).
    pub fn total_cycles(&self) -> u32 {
        self.total_cycles
    }

    /// Returns the cycle total and zeroes it.
    pub fn take_total_cycles(&mut self) -> u32 {
        std::mem::take(&mut self.total_cycles)
    }

    // ========== Configuration ==========

    pub fn model(&self) -> CpuModel {
        self.config.model
    }

    pub fn cpu_id(&self) -> u32 {
        self.config.cpu_id
    }

    pub fn addr_mask(&self) -> u16 {
        self.config.addr_mask
    }

    pub fn config(&self) -> &CpuConfig {
        &self.config
    }

    /// The decode table derived for this model.
    pub fn opcode_table(&self) -> &OpcodeTable {
        &self.table
    }

    // ========== 6510 Port ==========

    /// The on-chip port; `None` unless the model is the 6510.
    pub fn port(&self) -> Option<&Port6510> {
        self.port.as_ref()
    }

    pub fn port_mut(&mut self) -> Option<&mut Port6510> {
        self.port.as_mut()
    }

    /// Drives the port's input pins. Ignored on models without a port.
    pub fn set_port_input(&mut self, pins: u8) {
        if let Some(port) = self.port.as_mut() {
            port.set_input_pins(pins);
        }
    }

    /// Registers the port change callback. Ignored on models without a port.
    pub fn set_port_callback(&mut self, callback: Option<PortCallback>) {
        if let Some(port) = self.port.as_mut() {
            port.set_callback(callback);
        }
    }

    // ========== Profiling ==========

    pub fn profiler(&self) -> &Profiler {
        &self.profiler
    }

    pub fn set_profiling(&mut self, enabled: bool) {
        self.profiler.set_enabled(enabled);
    }

    pub fn reset_instruction_counts(&mut self) {
        self.profiler.reset();
    }

    /// Logs every executed opcode with its count and this model's mnemonic.
    pub fn log_instruction_usage(&self) {
        self.profiler.log_usage(&self.table, self.config.cpu_id);
    }
}

impl<M: MemoryBus> fmt::Debug for CpuCore<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuCore")
            .field("model", &self.config.model)
            .field("a", &self.a)
            .field("x", &self.x)
            .field("y", &self.y)
            .field("sp", &self.sp)
            .field("p", &self.p)
            .field("pc", &self.pc)
            .field("total_cycles", &self.total_cycles)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::FlatMemory;

    fn setup_cpu(model: CpuModel) -> CpuCore<FlatMemory> {
        let mut memory = FlatMemory::new();
        memory.write(0xFFFC, 0x00);
        memory.write(0xFFFD, 0x80);
        let mut cpu = CpuCore::new(memory, 0xFFFF, 0, model);
        cpu.reset();
        cpu
    }

    #[test]
    fn test_reset_state() {
        let cpu = setup_cpu(CpuModel::Nmos6502);
        assert_eq!(cpu.pc(), 0x8000);
        assert_eq!(cpu.sp(), 0xFF);
        assert_eq!(cpu.status().bits(), 0x26);
        assert_eq!(cpu.last_cycles(), 6);
        assert_eq!(cpu.total_cycles(), 0);
    }

    #[test]
    fn test_register_ids() {
        assert_eq!(Register::try_from(4).unwrap(), Register::P);
        assert!(matches!(Register::try_from(0), Err(Error::UnknownRegister(0))));
        assert!(matches!(Register::try_from(6), Err(Error::UnknownRegister(6))));
    }

    #[test]
    fn test_set_reg_p_forces_unused() {
        let mut cpu = setup_cpu(CpuModel::Nmos6502);
        cpu.set_reg(Register::P, 0x00);
        assert_eq!(cpu.get_reg(Register::P), 0x20);
        cpu.set_reg(Register::S, 0x80);
        assert_eq!(cpu.sp(), 0x80);
    }

    #[test]
    fn test_total_cycles_reset_past_ceiling() {
        let mut cpu = setup_cpu(CpuModel::Nmos6502);
        cpu.total_cycles = CYCLE_TOTAL_CEILING - 1;
        cpu.step(); // BRK at $8000 (memory is zeroed): 7 cycles
        assert_eq!(cpu.total_cycles(), 0);
    }

    #[test]
    fn test_take_total_cycles() {
        let mut cpu = setup_cpu(CpuModel::Nmos6502);
        cpu.memory_mut().write(0x8000, 0xEA);
        cpu.step();
        assert_eq!(cpu.take_total_cycles(), 2);
        assert_eq!(cpu.total_cycles(), 0);
    }

    #[test]
    fn test_address_mask_applies_to_vectors() {
        let mut memory = FlatMemory::new();
        memory.write(0x1FFC, 0x34);
        memory.write(0x1FFD, 0x12);
        let mut cpu = CpuCore::new(memory, 0x1FFF, 3, CpuModel::Nmos6502);
        cpu.reset();
        assert_eq!(cpu.pc(), 0x1234);
        assert_eq!(cpu.cpu_id(), 3);
    }

    #[test]
    fn test_port_only_on_6510() {
        assert!(setup_cpu(CpuModel::Nmos6502).port().is_none());
        let cpu = setup_cpu(CpuModel::Mos6510);
        assert_eq!(cpu.peek(0x0000), 0x00);
        assert_eq!(cpu.peek(0x0001), 0xFF);
    }
}
