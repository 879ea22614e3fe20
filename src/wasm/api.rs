//! WASM API for the CPU core.
//!
//! Provides JavaScript-callable interfaces for CPU control, state inspection,
//! memory access and disassembly.

use std::sync::mpsc::{self, Receiver};

use wasm_bindgen::prelude::*;

use crate::{CpuCore, CpuModel, FlatMemory, IrqMode, MemoryBus};

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl From<crate::Error> for JsError {
    fn from(err: crate::Error) -> Self {
        JsError::new(&err.to_string())
    }
}

/// One line of disassembly
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct DisassemblyLine {
    address: u16,
    bytes: Vec<u8>,
    text: String,
}

#[wasm_bindgen]
impl DisassemblyLine {
    #[wasm_bindgen(getter)]
    pub fn address(&self) -> u16 {
        self.address
    }

    #[wasm_bindgen(getter)]
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Mnemonic and operand, e.g. "LDA #$42"
    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.text.clone()
    }
}

/// Main emulator interface for JavaScript
#[wasm_bindgen]
pub struct Emulator6502 {
    cpu: CpuCore<FlatMemory>,
    program_start: u16,
    program_end: u16,
    /// Port changes queued by the core, replayed to `port_listener`.
    port_changes: Option<Receiver<(u8, u8)>>,
    port_listener: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Emulator6502 {
    /// Creates an emulator for `model` ("6502", "65c02", "2a03" or "6510")
    /// and runs the reset sequence.
    #[wasm_bindgen(constructor)]
    pub fn new(model: &str) -> Result<Emulator6502, JsError> {
        let model: CpuModel = model.parse()?;
        let mut cpu = CpuCore::new(FlatMemory::new(), 0xFFFF, 0, model);
        cpu.reset();
        Ok(Emulator6502 {
            cpu,
            program_start: 0,
            program_end: 0,
            port_changes: None,
            port_listener: None,
        })
    }

    /// Executes one instruction (or interrupt entry); returns its cycles
    pub fn step(&mut self) -> u32 {
        let cycles = self.cpu.step();
        self.notify_port_changes();
        cycles
    }

    /// Runs at least `cycles` cycles; returns the cycles actually run
    pub fn run_for(&mut self, cycles: u32) -> u32 {
        let executed = self.cpu.run_for(cycles);
        self.notify_port_changes();
        executed
    }

    /// Runs the reset sequence. Memory is left intact.
    pub fn reset(&mut self) -> u32 {
        self.cpu.reset()
    }

    #[wasm_bindgen(getter)]
    pub fn model(&self) -> String {
        self.cpu.model().name().to_string()
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.cpu.a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.cpu.x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.cpu.y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.cpu.status().bits()
    }

    #[wasm_bindgen(getter)]
    pub fn cycles(&self) -> u32 {
        self.cpu.total_cycles()
    }

    // Flag getters
    #[wasm_bindgen(getter)]
    pub fn flag_n(&self) -> bool {
        self.cpu.flag_n()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_v(&self) -> bool {
        self.cpu.flag_v()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_d(&self) -> bool {
        self.cpu.flag_d()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_i(&self) -> bool {
        self.cpu.flag_i()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    /// Set the program counter
    pub fn set_pc(&mut self, addr: u16) {
        self.cpu.set_pc(addr);
    }

    // Interrupt lines

    /// Asserts IRQ; `hold` keeps the line asserted until `clear_interrupts`
    pub fn irq(&mut self, hold: bool) {
        let mode = if hold { IrqMode::Hold } else { IrqMode::Pulse };
        self.cpu.assert_irq(mode);
    }

    pub fn nmi(&mut self) {
        self.cpu.assert_nmi();
    }

    pub fn clear_interrupts(&mut self) {
        self.cpu.clear_pending_interrupt();
    }

    // Memory access

    /// Read a byte through the CPU's view (6510 port included)
    pub fn read_memory(&self, addr: u16) -> u8 {
        self.cpu.peek(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.cpu.poke(addr, value);
        self.notify_port_changes();
    }

    /// Read a 256-byte page of RAM (for efficient display)
    pub fn get_memory_page(&self, page: u8) -> Vec<u8> {
        let start = (page as usize) << 8;
        self.cpu
            .memory()
            .as_slice()
            .get(start..start + 256)
            .map(<[u8]>::to_vec)
            .unwrap_or_default()
    }

    /// Copies `program` to RAM and points PC at it
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.cpu.memory_mut().load(start_addr, program);
        self.cpu.set_pc(start_addr);
        self.program_start = start_addr;
        self.program_end = start_addr.wrapping_add(program.len() as u16);
    }

    /// Disassembles `count` instructions starting at `start_addr`
    pub fn disassemble(&self, start_addr: u16, count: u32) -> Vec<JsValue> {
        let mut addr = start_addr;
        (0..count)
            .map(|_| {
                let (text, size) = self.cpu.disassemble(addr);
                let bytes = (0..size as u16)
                    .map(|i| self.cpu.peek(addr.wrapping_add(i)))
                    .collect();
                let line = DisassemblyLine {
                    address: addr,
                    bytes,
                    text,
                };
                addr = addr.wrapping_add(size as u16);
                JsValue::from(line)
            })
            .collect()
    }

    // 6510 port

    /// Registers `callback(latch, ddr)` for 6510 port output changes.
    /// Ignored on other models.
    ///
    /// JS functions cannot live inside the core, so changes are queued and
    /// delivered after each `step`, `run_for` or `write_memory`.
    pub fn set_port_callback(&mut self, callback: js_sys::Function) {
        let (sender, receiver) = mpsc::channel();
        self.cpu.set_port_callback(Some(Box::new(move |latch, ddr| {
            let _ = sender.send((latch, ddr));
        })));
        self.port_changes = Some(receiver);
        self.port_listener = Some(callback);
    }

    /// Sets the level external hardware drives on the 6510 port pins
    pub fn set_port_input(&mut self, pins: u8) {
        self.cpu.set_port_input(pins);
    }

    #[wasm_bindgen(getter)]
    pub fn program_start(&self) -> u16 {
        self.program_start
    }

    #[wasm_bindgen(getter)]
    pub fn program_end(&self) -> u16 {
        self.program_end
    }
}

impl Emulator6502 {
    fn notify_port_changes(&self) {
        let (Some(changes), Some(listener)) = (&self.port_changes, &self.port_listener) else {
            return;
        };
        for (latch, ddr) in changes.try_iter() {
            let _ = listener.call2(&JsValue::NULL, &JsValue::from(latch), &JsValue::from(ddr));
        }
    }
}
