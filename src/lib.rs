//! # 6502 Family CPU Core
//!
//! A cycle-counting interpreter for the MOS 6502 family: the NMOS 6502, the
//! CMOS 65C02, the NES 2A03 (no decimal mode) and the 6510 with its on-chip
//! I/O port.
//!
//! The core is meant to be embedded in a larger machine emulator. The host
//! owns the clock: it calls [`CpuCore::step`] or [`CpuCore::run_for`] and
//! uses the returned cycle counts to keep other chips in sync.
//!
//! ## Quick Start
//!
//! ```rust
//! use cpu6502::{CpuCore, CpuModel, FlatMemory, MemoryBus};
//!
//! let mut memory = FlatMemory::new();
//!
//! // LDA #$42 ; STA $0200
//! memory.load(0x8000, &[0xA9, 0x42, 0x8D, 0x00, 0x02]);
//!
//! // Reset vector points at the program
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//!
//! let mut cpu = CpuCore::new(memory, 0xFFFF, 0, CpuModel::Nmos6502);
//! assert_eq!(cpu.reset(), 6);
//! assert_eq!(cpu.pc(), 0x8000);
//!
//! assert_eq!(cpu.step(), 2);
//! assert_eq!(cpu.step(), 4);
//! assert_eq!(cpu.peek(0x0200), 0x42);
//! assert_eq!(cpu.total_cycles(), 6);
//! ```
//!
//! ## Architecture
//!
//! - **Per-model decode tables**: [`OpcodeTable::for_model`] patches the
//!   NMOS table once at construction; execution never branches on the model
//!   for decoding
//! - **Two-stage dispatch**: the addressing mode resolves an [`Operand`]
//!   (charging page-crossing penalties), then the operation executes on it
//! - **Pluggable bus**: anything implementing [`MemoryBus`]; [`FlatMemory`]
//!   for tests, [`MappedMemory`] for machines with devices
//! - **No panics on guest input**: every byte is a valid opcode and bad bus
//!   accesses become log lines
//!
//! ## Modules
//!
//! - `cpu` - [`CpuCore`], registers, interrupts and the step loop
//! - `opcodes` - decode tables and [`Operation`]
//! - `addressing` - addressing modes and operand resolution
//! - `memory` / `devices` - the bus trait, flat memory and range mapping
//! - `port_6510` - the 6510 I/O port
//! - `disassembler` - slice and bus disassembly
//! - `profiler` - per-opcode execution counters
//! - `wasm` - JavaScript bindings (`wasm` feature)

pub mod addressing;
pub mod config;
pub mod cpu;
pub mod devices;
pub mod disassembler;
pub mod memory;
pub mod model;
pub mod opcodes;
pub mod port_6510;
pub mod profiler;
pub mod status;

// Instruction semantics (not part of the public API)
mod instructions;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use addressing::{AddressingMode, Operand};
pub use config::{CpuConfig, JamBehavior};
pub use cpu::{CpuCore, IrqMode, Register};
pub use devices::{Device, DeviceId, MappedMemory, RamDevice, Region, RomDevice};
pub use disassembler::{disassemble, format_instruction, DisassemblyOptions, Instruction};
pub use memory::{FlatMemory, MemoryBus};
pub use model::CpuModel;
pub use opcodes::{DecimalMode, OpcodeMetadata, OpcodeTable, Operation, NMOS_OPCODE_TABLE};
pub use port_6510::{Port6510, PortCallback};
pub use profiler::{OpcodeUsage, Profiler};
pub use status::Status;

/// Errors from configuring a core or its bus.
///
/// Execution itself is infallible; these only come from setup calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("unknown CPU model: {0}")]
    UnknownModel(String),

    #[error("unknown register id {0} (expected 1..=5)")]
    UnknownRegister(u8),

    #[error("invalid address range ${start:04X}-${end:04X}")]
    InvalidRange { start: u16, end: u16 },

    #[error("device of {size} bytes cannot cover ${start:04X}-${end:04X}")]
    RegionTooSmall { start: u16, end: u16, size: usize },

    #[error("no device with id {0}")]
    UnknownDevice(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
