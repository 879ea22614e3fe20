//! Fuzz target for the disassembler.
//!
//! Disassembles arbitrary bytes for an arbitrary model, checks that the
//! listing tiles the input, and that disassembling the same bytes through a
//! core's bus gives identical text.

#![no_main]

use arbitrary::Arbitrary;
use cpu6502::{disassemble, format_instruction, CpuCore, CpuModel, DisassemblyOptions, FlatMemory, MemoryBus};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Listing {
    bytes: Vec<u8>,
    origin: u16,
    model: u8,
}

fuzz_target!(|listing: Listing| {
    if listing.bytes.len() > 0x1000 {
        return;
    }

    let model = CpuModel::ALL[listing.model as usize % CpuModel::ALL.len()];
    let options = DisassemblyOptions {
        start_address: listing.origin,
        model,
    };
    let instructions = disassemble(&listing.bytes, &options);

    let mut memory = FlatMemory::new();
    memory.load(listing.origin, &listing.bytes);
    let cpu = CpuCore::new(memory, 0xFFFF, 0, model);

    let mut next = listing.origin;
    let mut covered = 0usize;
    for instr in &instructions {
        assert_eq!(instr.address, next);
        assert!((1..=3).contains(&instr.size_bytes));
        assert_eq!(instr.operand_bytes.len() + 1, instr.size_bytes as usize);

        // The 6510 serves $0000/$0001 from its port, not the bus
        let shadowed = model.has_io_port()
            && (0..instr.size_bytes as u16).any(|i| instr.address.wrapping_add(i) < 2);
        if instr.mnemonic != ".byte" && !shadowed {
            let text = format_instruction(instr);
            assert_eq!(cpu.disassemble(instr.address), (text, instr.size_bytes));
        }

        covered += instr.size_bytes as usize;
        next = next.wrapping_add(instr.size_bytes as u16);
    }
    assert_eq!(covered, listing.bytes.len());
});
