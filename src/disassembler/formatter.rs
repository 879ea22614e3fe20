//! Formatting of disassembled instructions as assembly text.

use crate::addressing::AddressingMode;
use crate::disassembler::Instruction;

/// Formats an instruction, e.g. `"STA ($20),Y"`.
///
/// Branch operands are shown as absolute targets.
pub fn format_instruction(instr: &Instruction) -> String {
    let operand = format_operand(instr);

    if operand.is_empty() {
        instr.mnemonic.to_string()
    } else {
        format!("{} {}", instr.mnemonic, operand)
    }
}

fn format_operand(instr: &Instruction) -> String {
    use AddressingMode::*;

    if instr.mnemonic == ".byte" {
        return format!("${:02X}", instr.opcode);
    }

    let byte = instr.operand_bytes.first().copied().unwrap_or(0);
    let word = match instr.operand_bytes.as_slice() {
        [lo, hi, ..] => u16::from_le_bytes([*lo, *hi]),
        _ => byte as u16,
    };

    match instr.addressing_mode {
        Implicit => String::new(),
        Accumulator => "A".to_string(),
        Immediate => format!("#${:02X}", byte),
        ZeroPage => format!("${:02X}", byte),
        ZeroPageX => format!("${:02X},X", byte),
        ZeroPageY => format!("${:02X},Y", byte),
        Relative => format!("${:04X}", branch_target(instr.address, 2, byte)),
        Absolute => format!("${:04X}", word),
        AbsoluteX => format!("${:04X},X", word),
        AbsoluteY => format!("${:04X},Y", word),
        Indirect => format!("(${:04X})", word),
        IndirectX => format!("(${:02X},X)", byte),
        IndirectY => format!("(${:02X}),Y", byte),
        IndirectZeroPage => format!("(${:02X})", byte),
        AbsoluteIndexedIndirect => format!("(${:04X},X)", word),
        ZeroPageRelative => {
            let offset = instr.operand_bytes.get(1).copied().unwrap_or(0);
            format!("${:02X},${:04X}", byte, branch_target(instr.address, 3, offset))
        }
    }
}

fn branch_target(address: u16, size: u16, offset: u8) -> u16 {
    address.wrapping_add(size).wrapping_add(offset as i8 as u16)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disassembler::decoder::decode_instruction;
    use crate::model::CpuModel;
    use crate::opcodes::OpcodeTable;
    use test_case::test_case;

    fn format_bytes(model: CpuModel, address: u16, bytes: &[u8]) -> String {
        let table = OpcodeTable::for_model(model);
        format_instruction(&decode_instruction(bytes, address, &table).unwrap())
    }

    #[test_case(&[0xA9, 0x42], "LDA #$42" ; "immediate")]
    #[test_case(&[0x8D, 0x00, 0x80], "STA $8000" ; "absolute")]
    #[test_case(&[0xEA], "NOP" ; "implied")]
    #[test_case(&[0x0A], "ASL A" ; "accumulator")]
    #[test_case(&[0xB6, 0x10], "LDX $10,Y" ; "zero page y")]
    #[test_case(&[0x6C, 0xFF, 0x10], "JMP ($10FF)" ; "indirect")]
    #[test_case(&[0xA1, 0x20], "LDA ($20,X)" ; "indexed indirect")]
    #[test_case(&[0x91, 0x20], "STA ($20),Y" ; "indirect indexed")]
    #[test_case(&[0xD0, 0xFE], "BNE $2000" ; "branch to self")]
    #[test_case(&[0x10, 0x7F], "BPL $2081" ; "branch forward")]
    #[test_case(&[0xC7, 0x10], "DCP $10" ; "undocumented")]
    fn test_format_nmos(bytes: &[u8], expected: &str) {
        assert_eq!(format_bytes(CpuModel::Nmos6502, 0x2000, bytes), expected);
    }

    #[test_case(&[0xB2, 0x40], "LDA ($40)" ; "zero page indirect")]
    #[test_case(&[0x7C, 0x00, 0x30], "JMP ($3000,X)" ; "absolute indexed indirect")]
    #[test_case(&[0x8F, 0x12, 0x03], "BBS0 $12,$2006" ; "bit branch")]
    #[test_case(&[0x1A], "INC A" ; "inc accumulator")]
    fn test_format_cmos(bytes: &[u8], expected: &str) {
        assert_eq!(format_bytes(CpuModel::Cmos65C02, 0x2000, bytes), expected);
    }
}
