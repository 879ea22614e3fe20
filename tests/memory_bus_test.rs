//! Memory bus trait tests
//!
//! Verifies FlatMemory, the default `load`, and that the core reaches the
//! bus only through the address mask.

use std::cell::RefCell;

use cpu6502::{CpuCore, CpuModel, FlatMemory, MemoryBus};

/// Bus that records every address the CPU puts on it.
struct RecordingBus {
    inner: FlatMemory,
    reads: RefCell<Vec<u16>>,
    writes: Vec<(u16, u8)>,
}

impl RecordingBus {
    fn new(inner: FlatMemory) -> Self {
        Self {
            inner,
            reads: RefCell::new(Vec::new()),
            writes: Vec::new(),
        }
    }
}

impl MemoryBus for RecordingBus {
    fn read(&self, addr: u16) -> u8 {
        self.reads.borrow_mut().push(addr);
        self.inner.read(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.writes.push((addr, value));
        self.inner.write(addr, value);
    }
}

#[test]
fn test_flat_memory_starts_zeroed() {
    let memory = FlatMemory::new();

    assert!(memory.as_slice().iter().all(|&byte| byte == 0));
    assert_eq!(memory.as_slice().len(), 0x10000);
}

#[test]
fn test_flat_memory_boundaries() {
    let mut memory = FlatMemory::default();
    memory.write(0x0000, 0x01);
    memory.write(0xFFFF, 0xFF);

    assert_eq!(memory.read(0x0000), 0x01);
    assert_eq!(memory.read(0xFFFF), 0xFF);
    assert_eq!(memory.read(0x0001), 0x00);
}

#[test]
fn test_load_wraps_at_top_of_memory() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFE, &[0x11, 0x22, 0x33]);

    assert_eq!(memory.read(0xFFFE), 0x11);
    assert_eq!(memory.read(0xFFFF), 0x22);
    assert_eq!(memory.read(0x0000), 0x33);
}

#[test]
fn test_reset_reads_only_the_vector() {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x10);
    let mut cpu = CpuCore::new(RecordingBus::new(memory), 0xFFFF, 0, CpuModel::Nmos6502);

    cpu.reset();

    assert_eq!(cpu.pc(), 0x1000);
    assert_eq!(cpu.memory().reads.borrow().as_slice(), &[0xFFFC, 0xFFFD]);
}

#[test]
fn test_cpu_accesses_are_masked() {
    let mut memory = FlatMemory::new();
    memory.write(0x1FFC, 0x00);
    memory.write(0x1FFD, 0x02);
    // STA $E345
    memory.load(0x0200, &[0x8D, 0x45, 0xE3]);
    let mut cpu = CpuCore::new(RecordingBus::new(memory), 0x1FFF, 0, CpuModel::Nes2A03);
    cpu.reset();
    cpu.set_a(0x99);

    cpu.step();

    assert_eq!(cpu.memory().writes, vec![(0x0345, 0x99)]);
    assert!(cpu.memory().reads.borrow().iter().all(|&addr| addr <= 0x1FFF));
}

#[test]
fn test_disassembly_does_not_write() {
    let mut memory = FlatMemory::new();
    memory.load(0x4000, &[0x8D, 0x00, 0x20]);
    let cpu = CpuCore::new(RecordingBus::new(memory), 0xFFFF, 0, CpuModel::Cmos65C02);

    assert_eq!(cpu.disassemble(0x4000).0, "STA $2000");
    assert!(cpu.memory().writes.is_empty());
}
