//! On-chip I/O port of the MOS 6510.
//!
//! The 6510 decodes two addresses internally, ahead of the external bus:
//!
//! - `$0000`: data direction register (1 = output, 0 = input)
//! - `$0001`: output latch on write; pin state on read
//!
//! Reading `$0001` returns `(latch & ddr) | (pins & !ddr)`: output bits show
//! what was written, input bits show what the host drives onto the pins.
//!
//! A host that banks memory from the port registers a callback. It runs only
//! when the driven output (`latch & ddr`) changes, not on every write.

use std::fmt;

/// Called with `(latch, ddr)` after the driven output changes.
///
/// `Send` so a 6510 core can be handed to another thread.
pub type PortCallback = Box<dyn FnMut(u8, u8) + Send>;

pub struct Port6510 {
    ddr: u8,
    latch: u8,
    input_pins: u8,
    on_change: Option<PortCallback>,
}

impl Port6510 {
    /// Port in its reset state: all inputs, latch clear, pins pulled high.
    pub fn new() -> Self {
        Self {
            ddr: 0x00,
            latch: 0x00,
            input_pins: 0xFF,
            on_change: None,
        }
    }

    /// Restores the reset state. The callback stays registered and is not
    /// invoked; software programs the port itself after reset.
    pub fn reset(&mut self) {
        self.ddr = 0x00;
        self.latch = 0x00;
        self.input_pins = 0xFF;
    }

    /// Reads `$0000` or `$0001`.
    pub fn read(&self, addr: u16) -> u8 {
        if addr == 0 {
            self.ddr
        } else {
            self.value()
        }
    }

    /// Writes `$0000` or `$0001`.
    pub fn write(&mut self, addr: u16, value: u8) {
        let before = self.output();
        if addr == 0 {
            self.ddr = value;
        } else {
            self.latch = value;
        }
        if self.output() != before {
            if let Some(callback) = self.on_change.as_mut() {
                callback(self.latch, self.ddr);
            }
        }
    }

    /// What a read of `$0001` returns.
    #[inline]
    pub fn value(&self) -> u8 {
        (self.latch & self.ddr) | (self.input_pins & !self.ddr)
    }

    /// Bits actively driven by the CPU.
    #[inline]
    pub fn output(&self) -> u8 {
        self.latch & self.ddr
    }

    pub fn ddr(&self) -> u8 {
        self.ddr
    }

    pub fn latch(&self) -> u8 {
        self.latch
    }

    pub fn input_pins(&self) -> u8 {
        self.input_pins
    }

    /// Sets the level the outside world drives on the pins.
    pub fn set_input_pins(&mut self, pins: u8) {
        self.input_pins = pins;
    }

    pub fn set_callback(&mut self, callback: Option<PortCallback>) {
        self.on_change = callback;
    }
}

impl Default for Port6510 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Port6510 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Port6510")
            .field("ddr", &self.ddr)
            .field("latch", &self.latch)
            .field("input_pins", &self.input_pins)
            .field("has_callback", &self.on_change.is_some())
            .finish()
    }
}
