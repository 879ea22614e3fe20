//! CPU model variants.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The member of the 6502 family being emulated.
///
/// The model is fixed for the lifetime of a [`CpuCore`](crate::CpuCore); it
/// selects the opcode table patches and the ALU behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CpuModel {
    /// Original NMOS 6502, including the undocumented opcodes.
    #[default]
    Nmos6502,
    /// CMOS 65C02.
    Cmos65C02,
    /// Ricoh 2A03 (NES): NMOS core with decimal mode removed.
    Nes2A03,
    /// MOS 6510: NMOS core with an I/O port at $0000/$0001.
    Mos6510,
}

impl CpuModel {
    pub const ALL: [CpuModel; 4] = [
        CpuModel::Nmos6502,
        CpuModel::Cmos65C02,
        CpuModel::Nes2A03,
        CpuModel::Mos6510,
    ];

    /// True for the 65C02 instruction set and timing.
    pub fn is_cmos(self) -> bool {
        self == CpuModel::Cmos65C02
    }

    /// False only on the 2A03, where the D flag is stored but ignored.
    pub fn has_decimal_mode(self) -> bool {
        self != CpuModel::Nes2A03
    }

    /// JMP ($xxFF) fetches the high byte from $xx00.
    pub fn has_indirect_page_bug(self) -> bool {
        !self.is_cmos()
    }

    /// The on-chip port at $0000/$0001.
    pub fn has_io_port(self) -> bool {
        self == CpuModel::Mos6510
    }

    /// Whether BRK and interrupt entry clear D when not overridden by config.
    pub fn clears_decimal_on_interrupt(self) -> bool {
        self.is_cmos()
    }

    pub fn name(self) -> &'static str {
        match self {
            CpuModel::Nmos6502 => "6502",
            CpuModel::Cmos65C02 => "65C02",
            CpuModel::Nes2A03 => "2A03",
            CpuModel::Mos6510 => "6510",
        }
    }
}

impl fmt::Display for CpuModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CpuModel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "6502" | "nmos" | "nmos6502" => Ok(CpuModel::Nmos6502),
            "65c02" | "cmos" | "cmos65c02" => Ok(CpuModel::Cmos65C02),
            "2a03" | "nes" | "nes2a03" => Ok(CpuModel::Nes2A03),
            "6510" | "mos6510" => Ok(CpuModel::Mos6510),
            _ => Err(Error::UnknownModel(s.to_string())),
        }
    }
}
