//! Per-opcode execution counters.

use log::info;

use crate::opcodes::OpcodeTable;

/// One row of [`Profiler::usage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeUsage {
    pub opcode: u8,
    pub mnemonic: &'static str,
    pub count: u64,
}

/// Counts how often each opcode is executed. Counting is off until enabled.
#[derive(Debug, Clone)]
pub struct Profiler {
    enabled: bool,
    counts: Box<[u64; 256]>,
}

impl Profiler {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            counts: Box::new([0; 256]),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    #[inline]
    pub(crate) fn record(&mut self, opcode: u8) {
        if self.enabled {
            let count = &mut self.counts[opcode as usize];
            *count = count.saturating_add(1);
        }
    }

    /// Checked lookup; `None` for anything outside 0..=255.
    pub fn count(&self, opcode: usize) -> Option<u64> {
        self.counts.get(opcode).copied()
    }

    pub fn reset(&mut self) {
        self.counts.fill(0);
    }

    /// Opcodes with a nonzero count, in opcode order, named from `table`.
    pub fn usage(&self, table: &OpcodeTable) -> Vec<OpcodeUsage> {
        table
            .iter()
            .filter_map(|(opcode, entry)| {
                let count = self.counts[opcode as usize];
                (count > 0).then(|| OpcodeUsage {
                    opcode,
                    mnemonic: entry.mnemonic(),
                    count,
                })
            })
            .collect()
    }

    /// Logs [`usage`](Self::usage) at info level, one line per opcode.
    pub fn log_usage(&self, table: &OpcodeTable, cpu_id: u32) {
        let rows = self.usage(table);
        info!("cpu {}: {} opcodes executed ({})", cpu_id, rows.len(), table.model());
        for row in rows {
            info!(
                "cpu {}: {:02X} {:<4} {:>12}",
                cpu_id, row.opcode, row.mnemonic, row.count
            );
        }
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(false)
    }
}
