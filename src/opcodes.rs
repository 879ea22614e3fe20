//! # Opcode Tables
//!
//! Every model's 256-entry decode table is derived from one NMOS table,
//! [`NMOS_OPCODE_TABLE`], which covers the documented instructions plus the
//! full set of undocumented ones. [`OpcodeTable::for_model`] then patches it:
//!
//! - **65C02**: the undocumented slots become the CMOS additions (TSB, TRB,
//!   STZ, BRA, PHX/PLX/PHY/PLY, RMB/SMB, BBR/BBS, `(zp)` forms, `INC A`,
//!   `DEC A`, extra BIT modes) or CMOS NOPs of the right length, and ADC/SBC
//!   switch to CMOS decimal behavior.
//! - **2A03**: ADC, SBC and their undocumented composites run binary only.
//! - **6510**: same table as the NMOS part. The I/O port lives in the core.
//!
//! The table is total: every index decodes to something, even if that is a
//! NOP.

use std::ops::Index;

use crate::addressing::AddressingMode;
use crate::model::CpuModel;

/// How ADC and SBC (and the composites built on them) treat the D flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecimalMode {
    /// BCD correction, N/V/Z from the binary result.
    Nmos,
    /// BCD correction, N/Z from the corrected result, one extra cycle when D is set.
    Cmos,
    /// D is ignored.
    Binary,
}

/// Instruction semantics, independent of addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc(DecimalMode),
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc(DecimalMode),
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,

    // 65C02 additions
    Bra,
    Phx,
    Phy,
    Plx,
    Ply,
    Stz,
    Trb,
    Tsb,
    /// Reset zero page bit n.
    Rmb(u8),
    /// Set zero page bit n.
    Smb(u8),
    /// Branch if zero page bit n is clear.
    Bbr(u8),
    /// Branch if zero page bit n is set.
    Bbs(u8),

    // NMOS undocumented
    Alr,
    Anc,
    Ane,
    Arr(DecimalMode),
    Axs,
    Dcp,
    Isc(DecimalMode),
    Jam,
    Las,
    Lax,
    Lxa,
    Rla,
    Rra(DecimalMode),
    Sax,
    Sha,
    Shx,
    Shy,
    Slo,
    Sre,
    Tas,
    /// NOP in an undocumented or reserved slot; consumes its operand bytes.
    IllegalNop,
}

const RMB: [&str; 8] = ["RMB0", "RMB1", "RMB2", "RMB3", "RMB4", "RMB5", "RMB6", "RMB7"];
const SMB: [&str; 8] = ["SMB0", "SMB1", "SMB2", "SMB3", "SMB4", "SMB5", "SMB6", "SMB7"];
const BBR: [&str; 8] = ["BBR0", "BBR1", "BBR2", "BBR3", "BBR4", "BBR5", "BBR6", "BBR7"];
const BBS: [&str; 8] = ["BBS0", "BBS1", "BBS2", "BBS3", "BBS4", "BBS5", "BBS6", "BBS7"];

impl Operation {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc(_) => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop | Operation::IllegalNop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc(_) => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
            Operation::Bra => "BRA",
            Operation::Phx => "PHX",
            Operation::Phy => "PHY",
            Operation::Plx => "PLX",
            Operation::Ply => "PLY",
            Operation::Stz => "STZ",
            Operation::Trb => "TRB",
            Operation::Tsb => "TSB",
            Operation::Rmb(bit) => RMB[(bit & 7) as usize],
            Operation::Smb(bit) => SMB[(bit & 7) as usize],
            Operation::Bbr(bit) => BBR[(bit & 7) as usize],
            Operation::Bbs(bit) => BBS[(bit & 7) as usize],
            Operation::Alr => "ALR",
            Operation::Anc => "ANC",
            Operation::Ane => "XAA",
            Operation::Arr(_) => "ARR",
            Operation::Axs => "AXS",
            Operation::Dcp => "DCP",
            Operation::Isc(_) => "ISC",
            Operation::Jam => "KIL",
            Operation::Las => "LAS",
            Operation::Lax => "LAX",
            Operation::Lxa => "LAX",
            Operation::Rla => "RLA",
            Operation::Rra(_) => "RRA",
            Operation::Sax => "SAX",
            Operation::Sha => "AHX",
            Operation::Shx => "SHX",
            Operation::Shy => "SHY",
            Operation::Slo => "SLO",
            Operation::Sre => "SRE",
            Operation::Tas => "TAS",
        }
    }

    /// True for NMOS undocumented opcodes and the reserved NOP slots.
    pub fn is_undocumented(self) -> bool {
        matches!(
            self,
            Operation::Alr
                | Operation::Anc
                | Operation::Ane
                | Operation::Arr(_)
                | Operation::Axs
                | Operation::Dcp
                | Operation::Isc(_)
                | Operation::Jam
                | Operation::Las
                | Operation::Lax
                | Operation::Lxa
                | Operation::Rla
                | Operation::Rra(_)
                | Operation::Sax
                | Operation::Sha
                | Operation::Shx
                | Operation::Shy
                | Operation::Slo
                | Operation::Sre
                | Operation::Tas
                | Operation::IllegalNop
        )
    }

    /// Conditional and unconditional relative branches, including BBR/BBS.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Operation::Bcc
                | Operation::Bcs
                | Operation::Beq
                | Operation::Bmi
                | Operation::Bne
                | Operation::Bpl
                | Operation::Bvc
                | Operation::Bvs
                | Operation::Bra
                | Operation::Bbr(_)
                | Operation::Bbs(_)
        )
    }

    fn with_decimal_mode(self, mode: DecimalMode) -> Operation {
        match self {
            Operation::Adc(_) => Operation::Adc(mode),
            Operation::Sbc(_) => Operation::Sbc(mode),
            Operation::Arr(_) => Operation::Arr(mode),
            Operation::Isc(_) => Operation::Isc(mode),
            Operation::Rra(_) => Operation::Rra(mode),
            other => other,
        }
    }
}

/// Decode information for one opcode slot.
///
/// # Examples
///
/// ```
/// use cpu6502::{AddressingMode, CpuModel, OpcodeTable};
///
/// let table = OpcodeTable::for_model(CpuModel::Nmos6502);
/// let lda_imm = &table[0xA9];
/// assert_eq!(lda_imm.mnemonic(), "LDA");
/// assert_eq!(lda_imm.addressing_mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.base_cycles, 2);
/// assert_eq!(lda_imm.size_bytes(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeMetadata {
    pub operation: Operation,
    pub addressing_mode: AddressingMode,
    /// Cycles before page-crossing, branch and decimal-mode penalties.
    pub base_cycles: u8,
}

impl OpcodeMetadata {
    pub const fn new(operation: Operation, addressing_mode: AddressingMode, base_cycles: u8) -> Self {
        OpcodeMetadata {
            operation,
            addressing_mode,
            base_cycles,
        }
    }

    pub fn mnemonic(&self) -> &'static str {
        self.operation.mnemonic()
    }

    /// Opcode plus operand bytes.
    pub fn size_bytes(&self) -> u8 {
        self.addressing_mode.instruction_size()
    }
}

/// NMOS 6502 decode table, undocumented opcodes included.
///
/// JAM slots (x2 with an odd high nibble, plus $02/$22/$42/$62) are listed
/// with 2 cycles so a core running them as NOPs stays in step.
pub const NMOS_OPCODE_TABLE: [OpcodeMetadata; 256] = {
    use crate::addressing::AddressingMode::*;
    use DecimalMode::Nmos;
    use Operation::*;

    const fn op(operation: Operation, mode: AddressingMode, cycles: u8) -> OpcodeMetadata {
        OpcodeMetadata::new(operation, mode, cycles)
    }

    [
        op(Brk, Implicit, 7),         // 0x00
        op(Ora, IndirectX, 6),        // 0x01
        op(Jam, Implicit, 2),         // 0x02
        op(Slo, IndirectX, 8),        // 0x03
        op(IllegalNop, ZeroPage, 3),  // 0x04
        op(Ora, ZeroPage, 3),         // 0x05
        op(Asl, ZeroPage, 5),         // 0x06
        op(Slo, ZeroPage, 5),         // 0x07
        op(Php, Implicit, 3),         // 0x08
        op(Ora, Immediate, 2),        // 0x09
        op(Asl, Accumulator, 2),      // 0x0A
        op(Anc, Immediate, 2),        // 0x0B
        op(IllegalNop, Absolute, 4),  // 0x0C
        op(Ora, Absolute, 4),         // 0x0D
        op(Asl, Absolute, 6),         // 0x0E
        op(Slo, Absolute, 6),         // 0x0F
        op(Bpl, Relative, 2),         // 0x10
        op(Ora, IndirectY, 5),        // 0x11
        op(Jam, Implicit, 2),         // 0x12
        op(Slo, IndirectY, 8),        // 0x13
        op(IllegalNop, ZeroPageX, 4), // 0x14
        op(Ora, ZeroPageX, 4),        // 0x15
        op(Asl, ZeroPageX, 6),        // 0x16
        op(Slo, ZeroPageX, 6),        // 0x17
        op(Clc, Implicit, 2),         // 0x18
        op(Ora, AbsoluteY, 4),        // 0x19
        op(IllegalNop, Implicit, 2),  // 0x1A
        op(Slo, AbsoluteY, 7),        // 0x1B
        op(IllegalNop, AbsoluteX, 4), // 0x1C
        op(Ora, AbsoluteX, 4),        // 0x1D
        op(Asl, AbsoluteX, 7),        // 0x1E
        op(Slo, AbsoluteX, 7),        // 0x1F
        op(Jsr, Absolute, 6),         // 0x20
        op(And, IndirectX, 6),        // 0x21
        op(Jam, Implicit, 2),         // 0x22
        op(Rla, IndirectX, 8),        // 0x23
        op(Bit, ZeroPage, 3),         // 0x24
        op(And, ZeroPage, 3),         // 0x25
        op(Rol, ZeroPage, 5),         // 0x26
        op(Rla, ZeroPage, 5),         // 0x27
        op(Plp, Implicit, 4),         // 0x28
        op(And, Immediate, 2),        // 0x29
        op(Rol, Accumulator, 2),      // 0x2A
        op(Anc, Immediate, 2),        // 0x2B
        op(Bit, Absolute, 4),         // 0x2C
        op(And, Absolute, 4),         // 0x2D
        op(Rol, Absolute, 6),         // 0x2E
        op(Rla, Absolute, 6),         // 0x2F
        op(Bmi, Relative, 2),         // 0x30
        op(And, IndirectY, 5),        // 0x31
        op(Jam, Implicit, 2),         // 0x32
        op(Rla, IndirectY, 8),        // 0x33
        op(IllegalNop, ZeroPageX, 4), // 0x34
        op(And, ZeroPageX, 4),        // 0x35
        op(Rol, ZeroPageX, 6),        // 0x36
        op(Rla, ZeroPageX, 6),        // 0x37
        op(Sec, Implicit, 2),         // 0x38
        op(And, AbsoluteY, 4),        // 0x39
        op(IllegalNop, Implicit, 2),  // 0x3A
        op(Rla, AbsoluteY, 7),        // 0x3B
        op(IllegalNop, AbsoluteX, 4), // 0x3C
        op(And, AbsoluteX, 4),        // 0x3D
        op(Rol, AbsoluteX, 7),        // 0x3E
        op(Rla, AbsoluteX, 7),        // 0x3F
        op(Rti, Implicit, 6),         // 0x40
        op(Eor, IndirectX, 6),        // 0x41
        op(Jam, Implicit, 2),         // 0x42
        op(Sre, IndirectX, 8),        // 0x43
        op(IllegalNop, ZeroPage, 3),  // 0x44
        op(Eor, ZeroPage, 3),         // 0x45
        op(Lsr, ZeroPage, 5),         // 0x46
        op(Sre, ZeroPage, 5),         // 0x47
        op(Pha, Implicit, 3),         // 0x48
        op(Eor, Immediate, 2),        // 0x49
        op(Lsr, Accumulator, 2),      // 0x4A
        op(Alr, Immediate, 2),        // 0x4B
        op(Jmp, Absolute, 3),         // 0x4C
        op(Eor, Absolute, 4),         // 0x4D
        op(Lsr, Absolute, 6),         // 0x4E
        op(Sre, Absolute, 6),         // 0x4F
        op(Bvc, Relative, 2),         // 0x50
        op(Eor, IndirectY, 5),        // 0x51
        op(Jam, Implicit, 2),         // 0x52
        op(Sre, IndirectY, 8),        // 0x53
        op(IllegalNop, ZeroPageX, 4), // 0x54
        op(Eor, ZeroPageX, 4),        // 0x55
        op(Lsr, ZeroPageX, 6),        // 0x56
        op(Sre, ZeroPageX, 6),        // 0x57
        op(Cli, Implicit, 2),         // 0x58
        op(Eor, AbsoluteY, 4),        // 0x59
        op(IllegalNop, Implicit, 2),  // 0x5A
        op(Sre, AbsoluteY, 7),        // 0x5B
        op(IllegalNop, AbsoluteX, 4), // 0x5C
        op(Eor, AbsoluteX, 4),        // 0x5D
        op(Lsr, AbsoluteX, 7),        // 0x5E
        op(Sre, AbsoluteX, 7),        // 0x5F
        op(Rts, Implicit, 6),         // 0x60
        op(Adc(Nmos), IndirectX, 6),  // 0x61
        op(Jam, Implicit, 2),         // 0x62
        op(Rra(Nmos), IndirectX, 8),  // 0x63
        op(IllegalNop, ZeroPage, 3),  // 0x64
        op(Adc(Nmos), ZeroPage, 3),   // 0x65
        op(Ror, ZeroPage, 5),         // 0x66
        op(Rra(Nmos), ZeroPage, 5),   // 0x67
        op(Pla, Implicit, 4),         // 0x68
        op(Adc(Nmos), Immediate, 2),  // 0x69
        op(Ror, Accumulator, 2),      // 0x6A
        op(Arr(Nmos), Immediate, 2),  // 0x6B
        op(Jmp, Indirect, 5),         // 0x6C
        op(Adc(Nmos), Absolute, 4),   // 0x6D
        op(Ror, Absolute, 6),         // 0x6E
        op(Rra(Nmos), Absolute, 6),   // 0x6F
        op(Bvs, Relative, 2),         // 0x70
        op(Adc(Nmos), IndirectY, 5),  // 0x71
        op(Jam, Implicit, 2),         // 0x72
        op(Rra(Nmos), IndirectY, 8),  // 0x73
        op(IllegalNop, ZeroPageX, 4), // 0x74
        op(Adc(Nmos), ZeroPageX, 4),  // 0x75
        op(Ror, ZeroPageX, 6),        // 0x76
        op(Rra(Nmos), ZeroPageX, 6),  // 0x77
        op(Sei, Implicit, 2),         // 0x78
        op(Adc(Nmos), AbsoluteY, 4),  // 0x79
        op(IllegalNop, Implicit, 2),  // 0x7A
        op(Rra(Nmos), AbsoluteY, 7),  // 0x7B
        op(IllegalNop, AbsoluteX, 4), // 0x7C
        op(Adc(Nmos), AbsoluteX, 4),  // 0x7D
        op(Ror, AbsoluteX, 7),        // 0x7E
        op(Rra(Nmos), AbsoluteX, 7),  // 0x7F
        op(IllegalNop, Immediate, 2), // 0x80
        op(Sta, IndirectX, 6),        // 0x81
        op(IllegalNop, Immediate, 2), // 0x82
        op(Sax, IndirectX, 6),        // 0x83
        op(Sty, ZeroPage, 3),         // 0x84
        op(Sta, ZeroPage, 3),         // 0x85
        op(Stx, ZeroPage, 3),         // 0x86
        op(Sax, ZeroPage, 3),         // 0x87
        op(Dey, Implicit, 2),         // 0x88
        op(IllegalNop, Immediate, 2), // 0x89
        op(Txa, Implicit, 2),         // 0x8A
        op(Ane, Immediate, 2),        // 0x8B
        op(Sty, Absolute, 4),         // 0x8C
        op(Sta, Absolute, 4),         // 0x8D
        op(Stx, Absolute, 4),         // 0x8E
        op(Sax, Absolute, 4),         // 0x8F
        op(Bcc, Relative, 2),         // 0x90
        op(Sta, IndirectY, 6),        // 0x91
        op(Jam, Implicit, 2),         // 0x92
        op(Sha, IndirectY, 6),        // 0x93
        op(Sty, ZeroPageX, 4),        // 0x94
        op(Sta, ZeroPageX, 4),        // 0x95
        op(Stx, ZeroPageY, 4),        // 0x96
        op(Sax, ZeroPageY, 4),        // 0x97
        op(Tya, Implicit, 2),         // 0x98
        op(Sta, AbsoluteY, 5),        // 0x99
        op(Txs, Implicit, 2),         // 0x9A
        op(Tas, AbsoluteY, 5),        // 0x9B
        op(Shy, AbsoluteX, 5),        // 0x9C
        op(Sta, AbsoluteX, 5),        // 0x9D
        op(Shx, AbsoluteY, 5),        // 0x9E
        op(Sha, AbsoluteY, 5),        // 0x9F
        op(Ldy, Immediate, 2),        // 0xA0
        op(Lda, IndirectX, 6),        // 0xA1
        op(Ldx, Immediate, 2),        // 0xA2
        op(Lax, IndirectX, 6),        // 0xA3
        op(Ldy, ZeroPage, 3),         // 0xA4
        op(Lda, ZeroPage, 3),         // 0xA5
        op(Ldx, ZeroPage, 3),         // 0xA6
        op(Lax, ZeroPage, 3),         // 0xA7
        op(Tay, Implicit, 2),         // 0xA8
        op(Lda, Immediate, 2),        // 0xA9
        op(Tax, Implicit, 2),         // 0xAA
        op(Lxa, Immediate, 2),        // 0xAB
        op(Ldy, Absolute, 4),         // 0xAC
        op(Lda, Absolute, 4),         // 0xAD
        op(Ldx, Absolute, 4),         // 0xAE
        op(Lax, Absolute, 4),         // 0xAF
        op(Bcs, Relative, 2),         // 0xB0
        op(Lda, IndirectY, 5),        // 0xB1
        op(Jam, Implicit, 2),         // 0xB2
        op(Lax, IndirectY, 5),        // 0xB3
        op(Ldy, ZeroPageX, 4),        // 0xB4
        op(Lda, ZeroPageX, 4),        // 0xB5
        op(Ldx, ZeroPageY, 4),        // 0xB6
        op(Lax, ZeroPageY, 4),        // 0xB7
        op(Clv, Implicit, 2),         // 0xB8
        op(Lda, AbsoluteY, 4),        // 0xB9
        op(Tsx, Implicit, 2),         // 0xBA
        op(Las, AbsoluteY, 4),        // 0xBB
        op(Ldy, AbsoluteX, 4),        // 0xBC
        op(Lda, AbsoluteX, 4),        // 0xBD
        op(Ldx, AbsoluteY, 4),        // 0xBE
        op(Lax, AbsoluteY, 4),        // 0xBF
        op(Cpy, Immediate, 2),        // 0xC0
        op(Cmp, IndirectX, 6),        // 0xC1
        op(IllegalNop, Immediate, 2), // 0xC2
        op(Dcp, IndirectX, 8),        // 0xC3
        op(Cpy, ZeroPage, 3),         // 0xC4
        op(Cmp, ZeroPage, 3),         // 0xC5
        op(Dec, ZeroPage, 5),         // 0xC6
        op(Dcp, ZeroPage, 5),         // 0xC7
        op(Iny, Implicit, 2),         // 0xC8
        op(Cmp, Immediate, 2),        // 0xC9
        op(Dex, Implicit, 2),         // 0xCA
        op(Axs, Immediate, 2),        // 0xCB
        op(Cpy, Absolute, 4),         // 0xCC
        op(Cmp, Absolute, 4),         // 0xCD
        op(Dec, Absolute, 6),         // 0xCE
        op(Dcp, Absolute, 6),         // 0xCF
        op(Bne, Relative, 2),         // 0xD0
        op(Cmp, IndirectY, 5),        // 0xD1
        op(Jam, Implicit, 2),         // 0xD2
        op(Dcp, IndirectY, 8),        // 0xD3
        op(IllegalNop, ZeroPageX, 4), // 0xD4
        op(Cmp, ZeroPageX, 4),        // 0xD5
        op(Dec, ZeroPageX, 6),        // 0xD6
        op(Dcp, ZeroPageX, 6),        // 0xD7
        op(Cld, Implicit, 2),         // 0xD8
        op(Cmp, AbsoluteY, 4),        // 0xD9
        op(IllegalNop, Implicit, 2),  // 0xDA
        op(Dcp, AbsoluteY, 7),        // 0xDB
        op(IllegalNop, AbsoluteX, 4), // 0xDC
        op(Cmp, AbsoluteX, 4),        // 0xDD
        op(Dec, AbsoluteX, 7),        // 0xDE
        op(Dcp, AbsoluteX, 7),        // 0xDF
        op(Cpx, Immediate, 2),        // 0xE0
        op(Sbc(Nmos), IndirectX, 6),  // 0xE1
        op(IllegalNop, Immediate, 2), // 0xE2
        op(Isc(Nmos), IndirectX, 8),  // 0xE3
        op(Cpx, ZeroPage, 3),         // 0xE4
        op(Sbc(Nmos), ZeroPage, 3),   // 0xE5
        op(Inc, ZeroPage, 5),         // 0xE6
        op(Isc(Nmos), ZeroPage, 5),   // 0xE7
        op(Inx, Implicit, 2),         // 0xE8
        op(Sbc(Nmos), Immediate, 2),  // 0xE9
        op(Nop, Implicit, 2),         // 0xEA
        op(Sbc(Nmos), Immediate, 2),  // 0xEB
        op(Cpx, Absolute, 4),         // 0xEC
        op(Sbc(Nmos), Absolute, 4),   // 0xED
        op(Inc, Absolute, 6),         // 0xEE
        op(Isc(Nmos), Absolute, 6),   // 0xEF
        op(Beq, Relative, 2),         // 0xF0
        op(Sbc(Nmos), IndirectY, 5),  // 0xF1
        op(Jam, Implicit, 2),         // 0xF2
        op(Isc(Nmos), IndirectY, 8),  // 0xF3
        op(IllegalNop, ZeroPageX, 4), // 0xF4
        op(Sbc(Nmos), ZeroPageX, 4),  // 0xF5
        op(Inc, ZeroPageX, 6),        // 0xF6
        op(Isc(Nmos), ZeroPageX, 6),  // 0xF7
        op(Sed, Implicit, 2),         // 0xF8
        op(Sbc(Nmos), AbsoluteY, 4),  // 0xF9
        op(IllegalNop, Implicit, 2),  // 0xFA
        op(Isc(Nmos), AbsoluteY, 7),  // 0xFB
        op(IllegalNop, AbsoluteX, 4), // 0xFC
        op(Sbc(Nmos), AbsoluteX, 4),  // 0xFD
        op(Inc, AbsoluteX, 7),        // 0xFE
        op(Isc(Nmos), AbsoluteX, 7),  // 0xFF
    ]
};

/// `(zp)` forms of the eight ALU opcodes in column 2 on the 65C02, indexed
/// by the opcode's high nibble / 2.
const CMOS_INDIRECT_ZP_OPS: [Operation; 8] = [
    Operation::Ora,
    Operation::And,
    Operation::Eor,
    Operation::Adc(DecimalMode::Cmos),
    Operation::Sta,
    Operation::Lda,
    Operation::Cmp,
    Operation::Sbc(DecimalMode::Cmos),
];

/// A model's decode table.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    model: CpuModel,
    entries: [OpcodeMetadata; 256],
}

impl OpcodeTable {
    /// Derives the decode table for `model` from [`NMOS_OPCODE_TABLE`].
    pub fn for_model(model: CpuModel) -> Self {
        let mut entries = NMOS_OPCODE_TABLE;
        match model {
            CpuModel::Nmos6502 | CpuModel::Mos6510 => {}
            CpuModel::Cmos65C02 => patch_cmos(&mut entries),
            CpuModel::Nes2A03 => {
                for entry in entries.iter_mut() {
                    entry.operation = entry.operation.with_decimal_mode(DecimalMode::Binary);
                }
            }
        }
        OpcodeTable { model, entries }
    }

    pub fn model(&self) -> CpuModel {
        self.model
    }

    /// Checked lookup for hosts holding a wider integer than a byte.
    pub fn get(&self, index: usize) -> Option<&OpcodeMetadata> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &OpcodeMetadata)> + '_ {
        (0u8..=255).zip(self.entries.iter())
    }
}

impl Index<u8> for OpcodeTable {
    type Output = OpcodeMetadata;

    fn index(&self, opcode: u8) -> &OpcodeMetadata {
        &self.entries[opcode as usize]
    }
}

fn patch_cmos(entries: &mut [OpcodeMetadata; 256]) {
    use crate::addressing::AddressingMode::*;

    for (index, entry) in entries.iter_mut().enumerate() {
        let opcode = index as u8;
        let high = opcode >> 4;
        entry.operation = entry.operation.with_decimal_mode(DecimalMode::Cmos);

        *entry = match opcode & 0x0F {
            // Every x3 and xB slot is a single-cycle, single-byte NOP.
            0x03 | 0x0B => OpcodeMetadata::new(Operation::IllegalNop, Implicit, 1),
            0x07 if high & 0x08 == 0 => OpcodeMetadata::new(Operation::Rmb(high & 7), ZeroPage, 5),
            0x07 => OpcodeMetadata::new(Operation::Smb(high & 7), ZeroPage, 5),
            0x0F if high & 0x08 == 0 => {
                OpcodeMetadata::new(Operation::Bbr(high & 7), ZeroPageRelative, 5)
            }
            0x0F => OpcodeMetadata::new(Operation::Bbs(high & 7), ZeroPageRelative, 5),
            // The resolver adds the remaining 3 cycles of the (zp) forms.
            0x02 if high & 1 == 1 => OpcodeMetadata::new(
                CMOS_INDIRECT_ZP_OPS[(high >> 1) as usize],
                IndirectZeroPage,
                2,
            ),
            0x02 if opcode != 0xA2 => OpcodeMetadata::new(Operation::IllegalNop, Immediate, 2),
            _ => *entry,
        };
    }

    let patches = [
        (0x04, Operation::Tsb, ZeroPage, 5),
        (0x0C, Operation::Tsb, Absolute, 6),
        (0x14, Operation::Trb, ZeroPage, 5),
        (0x1C, Operation::Trb, Absolute, 6),
        (0x1A, Operation::Inc, Accumulator, 2),
        (0x3A, Operation::Dec, Accumulator, 2),
        (0x34, Operation::Bit, ZeroPageX, 4),
        (0x3C, Operation::Bit, AbsoluteX, 4),
        (0x89, Operation::Bit, Immediate, 2),
        (0x44, Operation::IllegalNop, ZeroPage, 3),
        (0x54, Operation::IllegalNop, ZeroPageX, 4),
        (0xD4, Operation::IllegalNop, ZeroPageX, 4),
        (0xF4, Operation::IllegalNop, ZeroPageX, 4),
        (0x5C, Operation::IllegalNop, Absolute, 8),
        (0xDC, Operation::IllegalNop, AbsoluteX, 4),
        (0xFC, Operation::IllegalNop, AbsoluteX, 4),
        (0x5A, Operation::Phy, Implicit, 3),
        (0x7A, Operation::Ply, Implicit, 4),
        (0xDA, Operation::Phx, Implicit, 3),
        (0xFA, Operation::Plx, Implicit, 4),
        (0x64, Operation::Stz, ZeroPage, 3),
        (0x74, Operation::Stz, ZeroPageX, 4),
        (0x9C, Operation::Stz, Absolute, 4),
        (0x9E, Operation::Stz, AbsoluteX, 5),
        (0x7C, Operation::Jmp, AbsoluteIndexedIndirect, 6),
        (0x80, Operation::Bra, Relative, 2),
    ];
    for (opcode, operation, mode, cycles) in patches {
        entries[opcode] = OpcodeMetadata::new(operation, mode, cycles);
    }

    // ASL/ROL/LSR/ROR abs,X: 6 cycles, the resolver adds 1 on a page cross
    for opcode in [0x1E, 0x3E, 0x5E, 0x7E] {
        entries[opcode].base_cycles = 6;
    }
}
