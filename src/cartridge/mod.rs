// Cartridge module - ROM header parsing and mapper dispatch
//
// A `Cartridge` owns the raw ROM image and (if present) external RAM, and
// hands off all banked address translation to a `Mapper`. The header layout
// mirrors the physical cartridge header at 0x0100-0x014F.

pub mod mappers;

pub use mappers::{create_mapper, Mapper, MapperError};

/// Hardware color-support flag read from header byte 0x0143.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgbFlag {
    /// Cartridge is DMG-only.
    Monochrome,
    /// Cartridge supports CGB enhancements but still runs on DMG.
    Enhanced,
    /// Cartridge requires a Game Boy Color.
    Exclusive,
}

/// The cartridge's memory bank controller family, from header byte 0x0147.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbcKind {
    None,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
}

/// Parsed cartridge header (0x0100-0x014F).
#[derive(Debug, Clone)]
pub struct CartridgeHeader {
    pub title: String,
    pub cgb_flag: CgbFlag,
    pub mbc_kind: MbcKind,
    pub has_ram: bool,
    pub has_battery: bool,
    pub has_timer: bool,
    pub has_rumble: bool,
    pub rom_banks: usize,
    pub ram_banks: usize,
    pub header_checksum: u8,
}

/// Errors that can occur while parsing or constructing a cartridge.
#[derive(Debug)]
pub enum CartridgeError {
    /// The ROM image is shorter than one 16KB bank.
    TooShort(usize),
    /// Byte 0x0147 does not correspond to a known cartridge type.
    UnknownCartridgeType(u8),
    /// Byte 0x0148 does not correspond to a known ROM size.
    UnknownRomSize(u8),
    /// Byte 0x0149 does not correspond to a known RAM size.
    UnknownRamSize(u8),
    /// The header checksum at 0x014D did not match the computed value.
    HeaderChecksumMismatch { expected: u8, computed: u8 },
}

impl std::fmt::Display for CartridgeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartridgeError::TooShort(len) => {
                write!(f, "ROM image is only {} bytes, too short to contain a header", len)
            }
            CartridgeError::UnknownCartridgeType(t) => {
                write!(f, "unknown cartridge type byte 0x{:02X}", t)
            }
            CartridgeError::UnknownRomSize(b) => write!(f, "unknown ROM size byte 0x{:02X}", b),
            CartridgeError::UnknownRamSize(b) => write!(f, "unknown RAM size byte 0x{:02X}", b),
            CartridgeError::HeaderChecksumMismatch { expected, computed } => write!(
                f,
                "header checksum mismatch: header says 0x{:02X}, computed 0x{:02X}",
                expected, computed
            ),
        }
    }
}

impl std::error::Error for CartridgeError {}

const HEADER_START: usize = 0x0100;
const ROM_BANK_SIZE: usize = 16 * 1024;
const RAM_BANK_SIZE: usize = 8 * 1024;

impl CartridgeHeader {
    /// Parse a cartridge header from a full ROM image.
    ///
    /// Per spec, the header checksum at 0x014D is validated but a mismatch
    /// is only logged, not fatal: real hardware ignores it outside the boot
    /// ROM, and malformed homebrew ROMs are common in the wild.
    pub fn parse(rom: &[u8]) -> Result<Self, CartridgeError> {
        if rom.len() < ROM_BANK_SIZE {
            return Err(CartridgeError::TooShort(rom.len()));
        }

        let title_bytes = &rom[HEADER_START + 0x34..HEADER_START + 0x43];
        let title = title_bytes
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        let cgb_flag = match rom[HEADER_START + 0x43] {
            0x80 => CgbFlag::Enhanced,
            0xC0 => CgbFlag::Exclusive,
            _ => CgbFlag::Monochrome,
        };

        let cart_type = rom[HEADER_START + 0x47];
        let (mbc_kind, has_ram, has_battery, has_timer, has_rumble) = decode_cart_type(cart_type)
            .ok_or(CartridgeError::UnknownCartridgeType(cart_type))?;

        let rom_size_byte = rom[HEADER_START + 0x48];
        let rom_banks = match rom_size_byte {
            0x00..=0x08 => 2usize << rom_size_byte,
            other => return Err(CartridgeError::UnknownRomSize(other)),
        };

        let ram_size_byte = rom[HEADER_START + 0x49];
        let ram_banks = match ram_size_byte {
            0x00 => 0,
            0x01 => 1, // unofficial 2KB variant, treated as one partial bank
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            other => return Err(CartridgeError::UnknownRamSize(other)),
        };

        let header_checksum = rom[HEADER_START + 0x4D];
        let computed = compute_header_checksum(rom);
        if computed != header_checksum {
            log::warn!(
                "cartridge '{}': header checksum mismatch (header=0x{:02X} computed=0x{:02X}), continuing anyway",
                title,
                header_checksum,
                computed
            );
        }

        Ok(CartridgeHeader {
            title,
            cgb_flag,
            mbc_kind,
            has_ram,
            has_battery,
            has_timer,
            has_rumble,
            rom_banks,
            ram_banks,
            header_checksum,
        })
    }
}

fn compute_header_checksum(rom: &[u8]) -> u8 {
    let mut checksum: u8 = 0;
    for &byte in &rom[HEADER_START + 0x34..HEADER_START + 0x4D] {
        checksum = checksum.wrapping_sub(byte).wrapping_sub(1);
    }
    checksum
}

fn decode_cart_type(byte: u8) -> Option<(MbcKind, bool, bool, bool, bool)> {
    use MbcKind::*;
    Some(match byte {
        0x00 => (None, false, false, false, false),
        0x01 => (Mbc1, false, false, false, false),
        0x02 => (Mbc1, true, false, false, false),
        0x03 => (Mbc1, true, true, false, false),
        0x05 => (Mbc2, false, false, false, false),
        0x06 => (Mbc2, false, true, false, false),
        0x08 => (None, true, false, false, false),
        0x09 => (None, true, true, false, false),
        0x0F => (Mbc3, false, true, true, false),
        0x10 => (Mbc3, true, true, true, false),
        0x11 => (Mbc3, false, false, false, false),
        0x12 => (Mbc3, true, false, false, false),
        0x13 => (Mbc3, true, true, false, false),
        0x19 => (Mbc5, false, false, false, false),
        0x1A => (Mbc5, true, false, false, false),
        0x1B => (Mbc5, true, true, false, false),
        0x1C => (Mbc5, false, false, false, true),
        0x1D => (Mbc5, true, false, false, true),
        0x1E => (Mbc5, true, true, false, true),
        _ => return Option::None,
    })
}

/// A loaded ROM image plus its parsed header and external RAM.
pub struct Cartridge {
    pub header: CartridgeHeader,
    pub rom: Vec<u8>,
    pub ram: Vec<u8>,
}

impl Cartridge {
    pub fn from_bytes(rom: Vec<u8>) -> Result<Self, CartridgeError> {
        let header = CartridgeHeader::parse(&rom)?;
        let ram = vec![0u8; header.ram_banks.max(1) * RAM_BANK_SIZE];
        Ok(Cartridge { header, rom, ram })
    }

    pub fn rom_bank_count(&self) -> usize {
        self.header.rom_banks
    }

    pub fn ram_bank_count(&self) -> usize {
        self.header.ram_banks
    }
}
