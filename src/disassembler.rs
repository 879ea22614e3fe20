//! # 6502 Disassembler
//!
//! Converts machine code into assembly text using a model's opcode table,
//! so the same bytes disassemble differently on NMOS and CMOS parts.
//!
//! Two entry points:
//!
//! - [`disassemble`] walks a byte slice and returns [`Instruction`] records
//! - [`CpuCore::disassemble`] formats one instruction straight from the bus,
//!   without touching CPU state
//!
//! ```
//! use cpu6502::disassembler::{disassemble, format_instruction, DisassemblyOptions};
//! use cpu6502::CpuModel;
//!
//! let options = DisassemblyOptions { start_address: 0x8000, model: CpuModel::Cmos65C02 };
//! let listing: Vec<String> = disassemble(&[0xA9, 0x42, 0x80, 0xFC], &options)
//!     .iter()
//!     .map(format_instruction)
//!     .collect();
//! assert_eq!(listing, ["LDA #$42", "BRA $8000"]);
//! ```

pub mod decoder;
pub mod formatter;

pub use formatter::format_instruction;

use crate::addressing::AddressingMode;
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;
use crate::model::CpuModel;
use crate::opcodes::OpcodeTable;

/// A single disassembled instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Address of the opcode byte
    pub address: u16,

    pub opcode: u8,

    /// Mnemonic for the selected model (e.g. "LDA", "SLO", "RMB3")
    pub mnemonic: &'static str,

    pub addressing_mode: AddressingMode,

    /// Operand bytes (0-2 depending on addressing mode)
    pub operand_bytes: Vec<u8>,

    /// Opcode plus operands; a truncated tail becomes a 1-byte `.byte`
    pub size_bytes: u8,

    /// Base cycle cost, without page-crossing or branch penalties
    pub base_cycles: u8,

    /// True for undocumented NMOS opcodes
    pub undocumented: bool,
}

/// Options controlling disassembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisassemblyOptions {
    /// Address of the first byte of the slice
    pub start_address: u16,

    /// Which decode table to use
    pub model: CpuModel,
}

/// Disassembles `bytes` from start to end.
///
/// Every opcode decodes on every model. Only an instruction cut off by the
/// end of the slice is emitted as a `.byte` directive.
pub fn disassemble(bytes: &[u8], options: &DisassemblyOptions) -> Vec<Instruction> {
    let table = OpcodeTable::for_model(options.model);
    let mut instructions = Vec::new();
    let mut offset = 0;
    let mut address = options.start_address;

    while let Some(rest) = bytes.get(offset..).filter(|rest| !rest.is_empty()) {
        let instr = decoder::decode_instruction(rest, address, &table)
            .unwrap_or_else(|| decoder::byte_directive(rest[0], address));
        offset += instr.size_bytes as usize;
        address = address.wrapping_add(instr.size_bytes as u16);
        instructions.push(instr);
    }

    instructions
}

impl<M: MemoryBus> CpuCore<M> {
    /// Disassembles the instruction at `addr` through the bus.
    ///
    /// Returns the formatted text (e.g. `"LDA #$42"`) and the instruction
    /// length in bytes. Only reads memory; registers, cycles and the 6510
    /// port are not affected.
    pub fn disassemble(&self, addr: u16) -> (String, u8) {
        let bytes = [
            self.peek(addr),
            self.peek(addr.wrapping_add(1)),
            self.peek(addr.wrapping_add(2)),
        ];
        match decoder::decode_instruction(&bytes, addr, self.opcode_table()) {
            Some(instr) => (format_instruction(&instr), instr.size_bytes),
            None => (format_instruction(&decoder::byte_directive(bytes[0], addr)), 1),
        }
    }
}
