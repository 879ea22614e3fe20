//! # Instruction Implementations
//!
//! Instruction semantics, organized by category. Every function takes the
//! CPU and the [`Operand`] the addressing-mode resolver produced; the
//! resolver has already advanced PC past the operand bytes and charged any
//! page-crossing penalty, and `step` adds the base cycles afterwards. Only
//! costs that depend on the outcome (taken branches, CMOS decimal mode) are
//! charged here.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **bits**: 65C02 TSB, TRB, RMB, SMB
//! - **branches**: conditional branches, BRA, BBR, BBS
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP, JAM
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY, STZ
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **stack**: PHA, PHP, PLA, PLP, PHX, PLX, PHY, PLY
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//! - **undocumented**: the NMOS composites (LAX, SAX, DCP, ISC, ...)

pub mod alu;
pub mod bits;
pub mod branches;
pub mod control;
pub mod flags;
pub mod inc_dec;
pub mod load_store;
pub mod shifts;
pub mod stack;
pub mod transfer;
pub mod undocumented;

use crate::addressing::{AddressingMode, Operand};
use crate::cpu::CpuCore;
use crate::memory::MemoryBus;
use crate::opcodes::{OpcodeMetadata, Operation};

impl<M: MemoryBus> CpuCore<M> {
    /// Value an instruction operates on: memory, the immediate byte or A.
    pub(crate) fn load_operand(&self, operand: Operand) -> u8 {
        match operand {
            Operand::Address(addr) => self.read(addr),
            Operand::Accumulator => self.a,
            _ => 0,
        }
    }

    /// Writes a result back to memory or A.
    pub(crate) fn store_operand(&mut self, operand: Operand, value: u8) {
        match operand {
            Operand::Address(addr) => self.write(addr, value),
            Operand::Accumulator => self.a = value,
            _ => {}
        }
    }

    /// Read-modify-write on memory or A; returns the new value.
    pub(crate) fn modify_operand(&mut self, operand: Operand, f: impl FnOnce(&mut Self, u8) -> u8) -> u8 {
        let value = self.load_operand(operand);
        let result = f(self, value);
        self.store_operand(operand, result);
        result
    }

    #[inline]
    pub(crate) fn set_nz(&mut self, value: u8) {
        self.p.set_nz(value);
    }
}

/// Runs one decoded instruction.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CpuCore<M>, entry: OpcodeMetadata, operand: Operand) {
    use Operation::*;

    let (a, x, y) = (cpu.a, cpu.x, cpu.y);
    let (c, z, n, v) = (cpu.flag_c(), cpu.flag_z(), cpu.flag_n(), cpu.flag_v());

    match entry.operation {
        Adc(mode) => alu::execute_adc(cpu, operand, mode),
        Sbc(mode) => alu::execute_sbc(cpu, operand, mode),
        And => alu::execute_and(cpu, operand),
        Ora => alu::execute_ora(cpu, operand),
        Eor => alu::execute_eor(cpu, operand),
        Cmp => alu::execute_compare(cpu, a, operand),
        Cpx => alu::execute_compare(cpu, x, operand),
        Cpy => alu::execute_compare(cpu, y, operand),
        Bit => alu::execute_bit(cpu, operand, entry.addressing_mode == AddressingMode::Immediate),

        Tsb => bits::execute_tsb(cpu, operand),
        Trb => bits::execute_trb(cpu, operand),
        Rmb(bit) => bits::execute_rmb(cpu, operand, bit),
        Smb(bit) => bits::execute_smb(cpu, operand, bit),

        Bcc => branches::branch_if(cpu, !c, operand),
        Bcs => branches::branch_if(cpu, c, operand),
        Beq => branches::branch_if(cpu, z, operand),
        Bne => branches::branch_if(cpu, !z, operand),
        Bmi => branches::branch_if(cpu, n, operand),
        Bpl => branches::branch_if(cpu, !n, operand),
        Bvs => branches::branch_if(cpu, v, operand),
        Bvc => branches::branch_if(cpu, !v, operand),
        Bra => branches::branch_if(cpu, true, operand),
        Bbr(bit) => branches::execute_bbr(cpu, operand, bit),
        Bbs(bit) => branches::execute_bbs(cpu, operand, bit),

        Brk => control::execute_brk(cpu),
        Jmp => control::execute_jmp(cpu, operand),
        Jsr => control::execute_jsr(cpu, operand),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Nop => {}
        IllegalNop => control::execute_illegal_nop(cpu),
        Jam => control::execute_jam(cpu),

        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),

        Inc => inc_dec::execute_inc(cpu, operand),
        Dec => inc_dec::execute_dec(cpu, operand),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        Lda => load_store::execute_lda(cpu, operand),
        Ldx => load_store::execute_ldx(cpu, operand),
        Ldy => load_store::execute_ldy(cpu, operand),
        Sta => load_store::execute_sta(cpu, operand),
        Stx => load_store::execute_stx(cpu, operand),
        Sty => load_store::execute_sty(cpu, operand),
        Stz => load_store::execute_stz(cpu, operand),

        Asl => shifts::execute_asl(cpu, operand),
        Lsr => shifts::execute_lsr(cpu, operand),
        Rol => shifts::execute_rol(cpu, operand),
        Ror => shifts::execute_ror(cpu, operand),

        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),
        Phx => stack::execute_phx(cpu),
        Plx => stack::execute_plx(cpu),
        Phy => stack::execute_phy(cpu),
        Ply => stack::execute_ply(cpu),

        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        Lax => undocumented::execute_lax(cpu, operand),
        Sax => undocumented::execute_sax(cpu, operand),
        Dcp => undocumented::execute_dcp(cpu, operand),
        Isc(mode) => undocumented::execute_isc(cpu, operand, mode),
        Slo => undocumented::execute_slo(cpu, operand),
        Rla => undocumented::execute_rla(cpu, operand),
        Sre => undocumented::execute_sre(cpu, operand),
        Rra(mode) => undocumented::execute_rra(cpu, operand, mode),
        Anc => undocumented::execute_anc(cpu, operand),
        Alr => undocumented::execute_alr(cpu, operand),
        Arr(mode) => undocumented::execute_arr(cpu, operand, mode),
        Axs => undocumented::execute_axs(cpu, operand),
        Ane => undocumented::execute_ane(cpu, operand),
        Lxa => undocumented::execute_lxa(cpu, operand),
        Las => undocumented::execute_las(cpu, operand),
        Tas => undocumented::execute_tas(cpu, operand),
        Sha => undocumented::execute_sha(cpu, operand),
        Shx => undocumented::execute_shx(cpu, operand),
        Shy => undocumented::execute_shy(cpu, operand),
    }
}
