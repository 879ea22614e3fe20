//! Instruction decoder for the disassembler.

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;
use crate::opcodes::OpcodeTable;

/// Decodes one instruction from the start of `bytes`.
///
/// Returns `None` when `bytes` is empty or too short for the operands the
/// opcode needs.
pub fn decode_instruction(bytes: &[u8], address: u16, table: &OpcodeTable) -> Option<Instruction> {
    let (&opcode, rest) = bytes.split_first()?;
    let entry = table[opcode];
    let size = entry.size_bytes();
    let operand_bytes = rest.get(..size as usize - 1)?.to_vec();

    Some(Instruction {
        address,
        opcode,
        mnemonic: entry.mnemonic(),
        addressing_mode: entry.addressing_mode,
        operand_bytes,
        size_bytes: size,
        base_cycles: entry.base_cycles,
        // The 65C02 defines every slot, including its spare NOPs
        undocumented: !table.model().is_cmos() && entry.operation.is_undocumented(),
    })
}

/// A `.byte` pseudo-instruction for data that cannot be decoded.
pub fn byte_directive(byte: u8, address: u16) -> Instruction {
    Instruction {
        address,
        opcode: byte,
        mnemonic: ".byte",
        addressing_mode: AddressingMode::Implicit,
        operand_bytes: Vec::new(),
        size_bytes: 1,
        base_cycles: 0,
        undocumented: false,
    }
}
