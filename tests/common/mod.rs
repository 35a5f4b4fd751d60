// Common test utilities for ROM-based integration tests
//
// Blargg's Game Boy test ROMs report their result two ways that this harness
// understands: text written through the serial port (SB/SC), and — for the
// ROMs that use cartridge RAM as a scratchpad — a small signature written to
// $A000-$A003 (0x80, 0xDE, 0xB0, 0x61) followed by a null-terminated message
// at $A004. Either convention ends with the ROM parked in a tight backwards
// jump, which is what this harness treats as "done" once no further serial
// bytes or RAM signature change for a while.

#![allow(dead_code)]

use gb_rs::cartridge::{create_mapper, Cartridge, CgbFlag};
use gb_rs::{Bus, Cpu};
use std::fs;
use std::path::Path;

const RAM_SIGNATURE: [u8; 4] = [0x80, 0xDE, 0xB0, 0x61];
const RAM_MESSAGE_BASE: u16 = 0xA004;
const RAM_MESSAGE_MAX_LEN: usize = 512;

/// Run a Blargg-style Game Boy test ROM to completion or timeout.
///
/// Returns `(passed, message)` where `message` is whatever text the ROM
/// reported (via serial output or its cartridge-RAM scratchpad), trimmed of
/// trailing control characters. `max_cycles` bounds master-clock ticks, not
/// CPU instructions, so it scales the same way across ROMs regardless of how
/// many cycles each one's instructions take.
pub fn run_blargg_style_test(rom_path: &str, max_cycles: u64) -> Result<(bool, String), String> {
    let rom = fs::read(Path::new(rom_path))
        .map_err(|e| format!("failed to read test ROM '{}': {}", rom_path, e))?;
    let cartridge = Cartridge::from_bytes(rom).map_err(|e| e.to_string())?;
    let cgb_mode = !matches!(cartridge.header.cgb_flag, CgbFlag::Monochrome);
    let mapper = create_mapper(cartridge).map_err(|e| e.to_string())?;

    let mut bus = Bus::new(mapper, cgb_mode);
    let mut cpu = Cpu::new();

    let mut serial_output = String::new();
    let mut cycles = 0u64;

    while cycles < max_cycles {
        let m_cycles = cpu.step(&mut bus);
        bus.step_components(m_cycles as u32 * 4);
        cycles += m_cycles as u64 * 4;

        drain_serial_output(&mut bus, &mut serial_output);

        if let Some(message) = read_ram_signature_message(&bus) {
            let passed = message.contains("Passed") || message.trim() == "Passed";
            return Ok((passed, message));
        }
    }

    if !serial_output.is_empty() {
        let passed = serial_output.contains("Passed");
        return Ok((passed, serial_output));
    }

    Ok((false, format!("timed out after {} cycles with no result reported", max_cycles)))
}

/// Blargg's GB test ROMs emit one character per write to SB (0xFF01) with
/// SC's transfer-start bit (0xFF02 bit 7) set; there is no link partner so
/// the transfer completes immediately in our serial stub.
fn drain_serial_output(bus: &mut Bus, output: &mut String) {
    if bus.read(0xFF02) & 0x80 != 0 {
        let byte = bus.read(0xFF01);
        if (0x20..=0x7E).contains(&byte) || byte == b'\n' {
            output.push(byte as char);
        }
        bus.write(0xFF02, bus.read(0xFF02) & !0x80);
    }
}

fn read_ram_signature_message(bus: &Bus) -> Option<String> {
    let signature = [bus.read(0xA000), bus.read(0xA001), bus.read(0xA002), bus.read(0xA003)];
    if signature != RAM_SIGNATURE {
        return None;
    }

    let mut message = String::new();
    for offset in 0..RAM_MESSAGE_MAX_LEN {
        let byte = bus.read(RAM_MESSAGE_BASE + offset as u16);
        if byte == 0 {
            break;
        }
        if (0x20..=0x7E).contains(&byte) || byte == b'\n' {
            message.push(byte as char);
        }
    }
    Some(message)
}
