//! # Memory Bus Abstraction
//!
//! The core never owns a memory map of its own. Every access, including the
//! stack page, vector fetches and disassembly, goes through a [`MemoryBus`]
//! after the core has applied its address mask (and, on the 6510, after the
//! on-chip port at $0000/$0001 has had first refusal).
//!
//! Two buses ship with the crate:
//!
//! - [`FlatMemory`]: 64KB of RAM, nothing else.
//! - [`MappedMemory`](crate::MappedMemory): ordered read/write range lists
//!   with devices, a flat backing array and an optional strict mode.
//!
//! Bus accesses cannot fail. Real 6502 systems have no bus error line:
//! an unmapped read sees whatever floats on the data bus and a write to ROM
//! simply has no effect, so implementations return a value and move on.

/// Byte-wide access to the address space the CPU sees.
///
/// `read` takes `&self` so the disassembler and [`CpuCore::peek`](crate::CpuCore::peek)
/// can inspect memory without exclusive access; a device whose reads have
/// side effects keeps that state behind a `Cell`. `write` takes `&mut self`.
///
/// # Examples
///
/// The NES mirrors its 2KB of work RAM four times across $0000-$1FFF:
///
/// ```
/// use cpu6502::MemoryBus;
///
/// struct NesWorkRam {
///     ram: [u8; 0x800],
/// }
///
/// impl MemoryBus for NesWorkRam {
///     fn read(&self, addr: u16) -> u8 {
///         match addr {
///             0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
///             _ => 0,
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x2000 {
///             self.ram[(addr & 0x07FF) as usize] = value;
///         }
///     }
/// }
///
/// let mut bus = NesWorkRam { ram: [0; 0x800] };
/// bus.write(0x0042, 0x99);
/// assert_eq!(bus.read(0x1842), 0x99);
/// assert_eq!(bus.read(0x8000), 0x00);
/// ```
pub trait MemoryBus {
    /// Reads a byte. Must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte. Must never panic; read-only locations ignore the write.
    fn write(&mut self, addr: u16, value: u8);

    /// Copies `bytes` into consecutive addresses starting at `start`,
    /// wrapping at $FFFF.
    fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.write(addr, byte);
            addr = addr.wrapping_add(1);
        }
    }
}

/// 64KB of zero-initialised RAM with no mapping at all.
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
/// cpu.reset();
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// The whole address space, for snapshots and bulk inspection.
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..]
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
