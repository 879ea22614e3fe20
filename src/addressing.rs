//! # Addressing Modes
//!
//! This module defines the addressing modes of the 6502 family and the
//! resolver that turns an opcode's operand bytes into an [`Operand`].
//!
//! The 13 NMOS modes are shared by every model. The 65C02 adds three more:
//! zero-page indirect, absolute indexed indirect (only `JMP ($nnnn,X)`) and
//! the zero-page-plus-relative form used by BBR/BBS.

use crate::cpu::CpuCore;
use crate::memory::MemoryBus;

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX,
///   IndirectY, IndirectZeroPage
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect, AbsoluteIndexedIndirect,
///   ZeroPageRelative
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, INC A (65C02)
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage,

    /// Zero page address indexed by X, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit offset for branch instructions.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through a 16-bit pointer.
    ///
    /// Example: JMP ($1234). NMOS parts wrap within the pointer's page when
    /// the pointer sits at $xxFF.
    Indirect,

    /// Indexed indirect: zero page pointer at (operand + X).
    ///
    /// Example: LDA ($80,X)
    IndirectX,

    /// Indirect indexed: zero page pointer, then + Y.
    ///
    /// Example: LDA ($80),Y
    IndirectY,

    /// Zero page indirect without index (65C02).
    ///
    /// Example: LDA ($80)
    IndirectZeroPage,

    /// Absolute indexed indirect (65C02 JMP only).
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// Zero page address followed by a relative branch offset (65C02 BBR/BBS).
    ///
    /// Example: BBR3 $80,label
    ZeroPageRelative,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    pub const fn operand_bytes(self) -> u8 {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::IndirectZeroPage => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect
            | AddressingMode::AbsoluteIndexedIndirect
            | AddressingMode::ZeroPageRelative => 2,
        }
    }

    /// Total instruction length including the opcode byte.
    pub const fn instruction_size(self) -> u8 {
        self.operand_bytes() + 1
    }
}

/// Where an instruction finds its operand once the addressing mode is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Implied modes; nothing to read.
    None,
    /// The accumulator.
    Accumulator,
    /// Effective address. Immediate operands point at the operand byte itself.
    Address(u16),
    /// Branch displacement relative to the following instruction.
    Relative(i8),
    /// Zero page location and branch displacement for BBR/BBS.
    ZeroPageRelative { zp: u8, offset: i8 },
}

impl<M: MemoryBus> CpuCore<M> {
    /// Consumes the operand bytes for `mode` and computes the effective operand.
    ///
    /// Page-crossing penalties apply only when the opcode's base timing shows
    /// the optimistic case: 4 cycles for absolute indexed, 5 for `(zp),Y`.
    /// Stores and read-modify-write opcodes always pay, so their base already
    /// includes it. The exception is the 65C02 shifts and rotates on abs,X,
    /// listed at 6 cycles plus 1 on a page cross.
    pub(crate) fn resolve_operand(&mut self, mode: AddressingMode, base_cycles: u8) -> Operand {
        match mode {
            AddressingMode::Implicit => Operand::None,
            AddressingMode::Accumulator => Operand::Accumulator,
            AddressingMode::Immediate => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                Operand::Address(addr)
            }
            AddressingMode::ZeroPage => Operand::Address(self.fetch_byte() as u16),
            AddressingMode::ZeroPageX => {
                Operand::Address(self.fetch_byte().wrapping_add(self.x) as u16)
            }
            AddressingMode::ZeroPageY => {
                Operand::Address(self.fetch_byte().wrapping_add(self.y) as u16)
            }
            AddressingMode::Relative => Operand::Relative(self.fetch_byte() as i8),
            AddressingMode::Absolute => Operand::Address(self.fetch_word()),
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.x as u16);
                if base_cycles == 4 || (base_cycles == 6 && self.config.model.is_cmos()) {
                    self.page_cross_penalty(base, addr);
                }
                Operand::Address(addr)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                let addr = base.wrapping_add(self.y as u16);
                if base_cycles == 4 {
                    self.page_cross_penalty(base, addr);
                }
                Operand::Address(addr)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let target = if self.config.model.has_indirect_page_bug() {
                    let lo = self.read(pointer);
                    let hi = self.read((pointer & 0xFF00) | (pointer.wrapping_add(1) & 0x00FF));
                    u16::from_le_bytes([lo, hi])
                } else {
                    self.cycles += 1;
                    self.read_word(pointer)
                };
                Operand::Address(target)
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte().wrapping_add(self.x);
                Operand::Address(self.read_zero_page_word(zp))
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let base = self.read_zero_page_word(zp);
                let addr = base.wrapping_add(self.y as u16);
                if base_cycles == 5 {
                    self.page_cross_penalty(base, addr);
                }
                Operand::Address(addr)
            }
            AddressingMode::IndirectZeroPage => {
                let zp = self.fetch_byte();
                self.cycles += 3;
                Operand::Address(self.read_zero_page_word(zp))
            }
            AddressingMode::AbsoluteIndexedIndirect => {
                let pointer = self.fetch_word().wrapping_add(self.x as u16);
                Operand::Address(self.read_word(pointer))
            }
            AddressingMode::ZeroPageRelative => {
                let zp = self.fetch_byte();
                let offset = self.fetch_byte() as i8;
                Operand::ZeroPageRelative { zp, offset }
            }
        }
    }

    fn page_cross_penalty(&mut self, base: u16, addr: u16) {
        if (base ^ addr) & 0xFF00 != 0 {
            self.cycles += 1;
        }
    }

    /// Reads a pointer from zero page; the high byte wraps to $00 after $FF.
    fn read_zero_page_word(&self, zp: u8) -> u16 {
        let lo = self.read(zp as u16);
        let hi = self.read(zp.wrapping_add(1) as u16);
        u16::from_le_bytes([lo, hi])
    }
}
