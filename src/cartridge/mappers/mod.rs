// Mappers module - memory bank controller implementations
//
// Each MBC variant handles ROM/RAM bank switching for a family of cartridge
// types. `create_mapper` dispatches on the parsed header's `MbcKind`.

mod mbc1;
mod mbc2;
mod mbc3;
mod mbc5;
mod none;

use super::{Cartridge, MbcKind};
pub use mbc1::Mbc1;
pub use mbc2::Mbc2;
pub use mbc3::Mbc3;
pub use mbc5::Mbc5;
pub use none::NoMbc;

/// Error type for mapper creation.
#[derive(Debug)]
pub enum MapperError {
    /// The cartridge's MBC kind has no implementation (should not occur once
    /// all header-decodable kinds are wired up, but kept as a hard boundary).
    Unimplemented(&'static str),
}

impl std::fmt::Display for MapperError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapperError::Unimplemented(kind) => write!(f, "mapper kind {} is not implemented", kind),
        }
    }
}

impl std::error::Error for MapperError {}

/// Address-translation behavior shared by every memory bank controller.
///
/// The bus consults a `Mapper` for every access in 0x0000-0x7FFF (ROM) and
/// 0xA000-0xBFFF (external RAM); everything else is handled directly by the
/// bus itself.
pub trait Mapper: Send {
    /// Read a byte from ROM space (0x0000-0x7FFF).
    fn read_rom(&self, addr: u16) -> u8;
    /// Intercept a write into ROM space; MBCs use this range purely for
    /// control registers (bank selects, RAM-enable latches).
    fn write_rom(&mut self, addr: u16, value: u8);
    /// Read a byte from external RAM space (0xA000-0xBFFF). Returns 0xFF
    /// when RAM is disabled or absent, matching open-bus behavior.
    fn read_ram(&self, addr: u16) -> u8;
    /// Write a byte to external RAM space; ignored if RAM is disabled.
    fn write_ram(&mut self, addr: u16, value: u8);
    /// Advance any mapper-internal timer (MBC3's RTC) by one 1MHz tick.
    fn tick(&mut self) {}
    /// Raw external RAM contents, for persisting battery-backed saves.
    fn ram_bytes(&self) -> &[u8];
    /// Restore external RAM contents from a save file.
    fn load_ram_bytes(&mut self, data: &[u8]);

    /// Serialize mapper-internal state (bank selects, RAM-enable latches,
    /// RTC registers) for a savestate. External RAM itself is captured
    /// separately via `ram_bytes`, not here.
    fn write_state(&self, w: &mut crate::byte_io::Writer) {
        let _ = w;
    }
    /// Restore mapper-internal state written by `write_state`.
    fn read_state(&mut self, r: &mut crate::byte_io::Reader) -> Result<(), crate::byte_io::UnexpectedEof> {
        let _ = r;
        Ok(())
    }
}

/// Build the mapper implementation matching a cartridge's header.
pub fn create_mapper(cartridge: Cartridge) -> Result<Box<dyn Mapper>, MapperError> {
    match cartridge.header.mbc_kind {
        MbcKind::None => Ok(Box::new(NoMbc::new(cartridge))),
        MbcKind::Mbc1 => Ok(Box::new(Mbc1::new(cartridge))),
        MbcKind::Mbc2 => Ok(Box::new(Mbc2::new(cartridge))),
        MbcKind::Mbc3 => Ok(Box::new(Mbc3::new(cartridge))),
        MbcKind::Mbc5 => Ok(Box::new(Mbc5::new(cartridge))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::CartridgeHeader;

    fn make_cartridge(cart_type: u8, rom_size: u8, ram_size: u8) -> Cartridge {
        const ROM_BANK_SIZE: usize = 16 * 1024;
        let mut rom = vec![0u8; ROM_BANK_SIZE * 2];
        rom[0x0100 + 0x34..0x0100 + 0x38].copy_from_slice(b"TEST");
        rom[0x0100 + 0x47] = cart_type;
        rom[0x0100 + 0x48] = rom_size;
        rom[0x0100 + 0x49] = ram_size;
        let mut checksum: u8 = 0;
        for &byte in &rom[0x0100 + 0x34..0x0100 + 0x4D] {
            checksum = checksum.wrapping_sub(byte).wrapping_sub(1);
        }
        rom[0x0100 + 0x4D] = checksum;
        let header = CartridgeHeader::parse(&rom).unwrap();
        let ram = vec![0u8; header.ram_banks.max(1) * 8192];
        Cartridge { header, rom, ram }
    }

    #[test]
    fn creates_rom_only_mapper() {
        let cart = make_cartridge(0x00, 0x00, 0x00);
        let mapper = create_mapper(cart).unwrap();
        assert_eq!(mapper.read_rom(0x0000), 0);
    }

    #[test]
    fn creates_mbc1_mapper() {
        let cart = make_cartridge(0x01, 0x00, 0x00);
        let _mapper = create_mapper(cart).unwrap();
    }

    #[test]
    fn creates_mbc3_mapper() {
        let cart = make_cartridge(0x10, 0x00, 0x02);
        let _mapper = create_mapper(cart).unwrap();
    }

    #[test]
    fn creates_mbc5_mapper() {
        let cart = make_cartridge(0x19, 0x00, 0x00);
        let _mapper = create_mapper(cart).unwrap();
    }
}
