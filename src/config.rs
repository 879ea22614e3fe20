//! Construction-time configuration for [`CpuCore`](crate::CpuCore).

use crate::model::CpuModel;

/// What a JAM (KIL) opcode does on the NMOS models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JamBehavior {
    /// Execute as a 1-byte, 2-cycle NOP and log a warning.
    #[default]
    Nop,
    /// Stall the CPU until the next reset, like real silicon.
    Halt,
}

/// Options fixed when a core is built.
///
/// ```
/// use cpu6502::{CpuConfig, CpuModel, JamBehavior};
///
/// let config = CpuConfig::new(CpuModel::Mos6510)
///     .with_cpu_id(1)
///     .with_jam(JamBehavior::Halt)
///     .with_profiling(true);
/// assert_eq!(config.addr_mask, 0xFFFF);
/// assert!(!config.decimal_clear_on_interrupt());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CpuConfig {
    pub model: CpuModel,
    /// Applied to every bus address, including vector fetches.
    pub addr_mask: u16,
    /// Identifies this core in log output.
    pub cpu_id: u32,
    /// Overrides the model default for clearing D on BRK, IRQ and NMI.
    pub decimal_clear_on_interrupt: Option<bool>,
    pub jam: JamBehavior,
    pub profiling: bool,
    /// Emit one `log::trace!` line per executed instruction.
    pub trace: bool,
    /// Constant ORed into A by ANE (XAA) and LXA.
    pub unstable_magic: u8,
}

impl Default for CpuConfig {
    fn default() -> Self {
        CpuConfig {
            model: CpuModel::default(),
            addr_mask: 0xFFFF,
            cpu_id: 0,
            decimal_clear_on_interrupt: None,
            jam: JamBehavior::default(),
            profiling: false,
            trace: false,
            unstable_magic: 0xEE,
        }
    }
}

impl CpuConfig {
    pub fn new(model: CpuModel) -> Self {
        CpuConfig {
            model,
            ..CpuConfig::default()
        }
    }

    pub fn with_addr_mask(mut self, addr_mask: u16) -> Self {
        self.addr_mask = addr_mask;
        self
    }

    pub fn with_cpu_id(mut self, cpu_id: u32) -> Self {
        self.cpu_id = cpu_id;
        self
    }

    pub fn with_decimal_clear_on_interrupt(mut self, clear: bool) -> Self {
        self.decimal_clear_on_interrupt = Some(clear);
        self
    }

    pub fn with_jam(mut self, jam: JamBehavior) -> Self {
        self.jam = jam;
        self
    }

    pub fn with_profiling(mut self, enabled: bool) -> Self {
        self.profiling = enabled;
        self
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace = enabled;
        self
    }

    pub fn with_unstable_magic(mut self, magic: u8) -> Self {
        self.unstable_magic = magic;
        self
    }

    /// Resolved decimal-clear switch: the override if set, else the model default.
    pub fn decimal_clear_on_interrupt(&self) -> bool {
        self.decimal_clear_on_interrupt
            .unwrap_or_else(|| self.model.clears_decimal_on_interrupt())
    }
}
