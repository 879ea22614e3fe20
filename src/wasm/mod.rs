//! WebAssembly bindings for the CPU core.
//!
//! Exposes a single [`Emulator6502`] to JavaScript: a core of any supported
//! model over 64KB of flat RAM, with register inspection, memory access,
//! interrupt lines and disassembly for browser front ends.

pub mod api;

pub use api::Emulator6502;
