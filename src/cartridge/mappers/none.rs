// ROM ONLY - no bank switching, cartridge type 0x00/0x08/0x09
//
// The simplest cartridge: up to 32KB of ROM mapped directly at 0x0000-0x7FFF,
// with an optional single 8KB RAM bank at 0xA000-0xBFFF.

use super::Mapper;
use crate::cartridge::Cartridge;

pub struct NoMbc {
    rom: Vec<u8>,
    ram: Vec<u8>,
    has_ram: bool,
}

impl NoMbc {
    pub fn new(cartridge: Cartridge) -> Self {
        NoMbc {
            rom: cartridge.rom,
            ram: cartridge.ram,
            has_ram: cartridge.header.has_ram,
        }
    }
}

impl Mapper for NoMbc {
    fn read_rom(&self, addr: u16) -> u8 {
        self.rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    fn write_rom(&mut self, _addr: u16, _value: u8) {
        // ROM ONLY cartridges have no control registers.
    }

    fn read_ram(&self, addr: u16) -> u8 {
        if !self.has_ram {
            return 0xFF;
        }
        let index = (addr - 0xA000) as usize;
        self.ram.get(index).copied().unwrap_or(0xFF)
    }

    fn write_ram(&mut self, addr: u16, value: u8) {
        if !self.has_ram {
            return;
        }
        let index = (addr - 0xA000) as usize;
        if let Some(slot) = self.ram.get_mut(index) {
            *slot = value;
        }
    }

    fn ram_bytes(&self) -> &[u8] {
        &self.ram
    }

    fn load_ram_bytes(&mut self, data: &[u8]) {
        let len = self.ram.len().min(data.len());
        self.ram[..len].copy_from_slice(&data[..len]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::CartridgeHeader;

    fn cart(rom_len: usize, has_ram: bool) -> Cartridge {
        let mut rom = vec![0u8; rom_len.max(16 * 1024)];
        rom[0x0100 + 0x47] = if has_ram { 0x08 } else { 0x00 };
        let ram_size_byte = if has_ram { 0x02 } else { 0x00 };
        rom[0x0100 + 0x49] = ram_size_byte;
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
    fn reads_rom_directly() {
        let mut c = cart(32 * 1024, false);
        c.rom[0x1234] = 0x42;
        let mapper = NoMbc::new(c);
        assert_eq!(mapper.read_rom(0x1234), 0x42);
    }

    #[test]
    fn writes_to_rom_space_are_ignored() {
        let mut mapper = NoMbc::new(cart(32 * 1024, false));
        mapper.write_rom(0x2000, 0xFF);
        assert_eq!(mapper.read_rom(0x2000), 0x00);
    }

    #[test]
    fn ram_disabled_reads_open_bus() {
        let mapper = NoMbc::new(cart(32 * 1024, false));
        assert_eq!(mapper.read_ram(0xA000), 0xFF);
    }

    #[test]
    fn ram_round_trips_when_present() {
        let mut mapper = NoMbc::new(cart(32 * 1024, true));
        mapper.write_ram(0xA010, 0x77);
        assert_eq!(mapper.read_ram(0xA010), 0x77);
    }
}
