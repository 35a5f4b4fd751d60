// Bus module - central address decoder
//
// The Bus owns every memory-mapped component and routes the full
// 0x0000-0xFFFF address space to them. It also owns the two interrupt
// registers (IE, IF) since no single component is a more natural home for
// them, and the CGB KEY1 speed-switch latch.
//
// Every CPU-visible memory access goes through `read`/`write`, which do not
// themselves advance any component's clock; `step_components` is the single
// place peripherals are ticked, called once per CPU byte access from
// `cpu::addressing`. This keeps the M-cycle/T-cycle timing model in one
// place instead of smeared across every instruction.

use crate::apu::Apu;
use crate::cartridge::{create_mapper, Cartridge, Mapper};
use crate::dma::{HdmaMode, Hdma, OamDma};
use crate::input::Joypad;
use crate::ppu::Ppu;
use crate::ram::{HighRam, Ram};
use crate::timer::Timer;

/// Trait for components that own a contiguous or scattered slice of the
/// address space and handle their own internal addressing.
pub trait MemoryMappedDevice {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
}

/// Minimal serial port: enough to observe test ROMs writing their pass/fail
/// string via the link cable protocol, with no remote device attached.
struct Serial {
    sb: u8,
    sc: u8,
    transfer_cycles_remaining: u32,
    interrupt_requested: bool,
}

const SERIAL_TRANSFER_CYCLES: u32 = 4096;

impl Serial {
    fn new() -> Self {
        Serial { sb: 0, sc: 0x7E, transfer_cycles_remaining: 0, interrupt_requested: false }
    }

    fn read(&self, addr: u16) -> u8 {
        match addr {
            0xFF01 => self.sb,
            0xFF02 => self.sc | 0x7E,
            _ => 0xFF,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0xFF01 => self.sb = value,
            0xFF02 => {
                self.sc = value;
                if value & 0x81 == 0x81 {
                    self.transfer_cycles_remaining = SERIAL_TRANSFER_CYCLES;
                }
            }
            _ => {}
        }
    }

    fn tick(&mut self) {
        if self.transfer_cycles_remaining == 0 {
            return;
        }
        self.transfer_cycles_remaining -= 1;
        if self.transfer_cycles_remaining == 0 {
            self.sb = 0xFF; // no remote device: shifted-in bits read as 1
            self.sc &= !0x80;
            self.interrupt_requested = true;
        }
    }

    fn take_interrupt(&mut self) -> bool {
        std::mem::replace(&mut self.interrupt_requested, false)
    }

    fn write_state(&self, w: &mut crate::byte_io::Writer) {
        w.u8(self.sb);
        w.u8(self.sc);
        w.u32(self.transfer_cycles_remaining);
        w.bool(self.interrupt_requested);
    }

    fn read_state(&mut self, r: &mut crate::byte_io::Reader) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.sb = r.u8()?;
        self.sc = r.u8()?;
        self.transfer_cycles_remaining = r.u32()?;
        self.interrupt_requested = r.bool()?;
        Ok(())
    }
}

pub struct Bus {
    mapper: Box<dyn Mapper>,
    ram: Ram,
    hram: HighRam,
    ppu: Ppu,
    apu: Apu,
    timer: Timer,
    joypad: Joypad,
    serial: Serial,
    oam_dma: OamDma,
    hdma: Hdma,
    cgb_mode: bool,
    ie: u8,
    if_: u8,
    speed_switch_armed: bool,
    total_t_cycles: u64,
    was_in_hblank: bool,
    current_speed_doubled: bool,
    strict_vram_locking: bool,
}

impl Bus {
    pub fn new(mapper: Box<dyn Mapper>, cgb_mode: bool) -> Self {
        Bus {
            mapper,
            ram: Ram::with_cgb_mode(cgb_mode),
            hram: HighRam::new(),
            ppu: Ppu::new(cgb_mode),
            apu: Apu::new(),
            timer: Timer::new(),
            joypad: Joypad::new(),
            serial: Serial::new(),
            oam_dma: OamDma::new(),
            hdma: Hdma::new(),
            cgb_mode,
            ie: 0,
            if_: 0xE0,
            speed_switch_armed: false,
            total_t_cycles: 0,
            was_in_hblank: false,
            current_speed_doubled: false,
            strict_vram_locking: true,
        }
    }

    /// Toggle whether VRAM/OAM reads and writes are blocked while the PPU is
    /// scanning or drawing (spec's documented default; some emulators relax
    /// this for compatibility with ROMs that rely on real hardware's fuzzier
    /// timing rather than a hard lock).
    pub fn set_strict_vram_locking(&mut self, strict: bool) {
        self.strict_vram_locking = strict;
    }

    fn vram_locked(&self) -> bool {
        self.strict_vram_locking && self.ppu.mode() == crate::ppu::Mode::Drawing
    }

    fn oam_locked(&self) -> bool {
        self.strict_vram_locking
            && matches!(self.ppu.mode(), crate::ppu::Mode::Drawing | crate::ppu::Mode::OamSearch)
    }

    /// Build a bus around a minimal 32KB ROM-only cartridge, for unit tests
    /// that only need a working address space.
    pub fn for_tests() -> Self {
        let mut rom = vec![0u8; 32 * 1024];
        rom[0x0100 + 0x34..0x0100 + 0x43].copy_from_slice(b"TESTROM\0\0\0\0\0\0\0\0");
        let mut checksum: u8 = 0;
        for &byte in &rom[0x0100 + 0x34..0x0100 + 0x4D] {
            checksum = checksum.wrapping_sub(byte).wrapping_sub(1);
        }
        rom[0x0100 + 0x4D] = checksum;
        let cartridge = Cartridge::from_bytes(rom).expect("well-formed test cartridge");
        let mapper = create_mapper(cartridge).expect("ROM-only mapper always builds");
        Bus::new(mapper, false)
    }

    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    pub fn joypad_mut(&mut self) -> &mut Joypad {
        &mut self.joypad
    }

    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    pub fn total_t_cycles(&self) -> u64 {
        self.total_t_cycles
    }

    pub fn cgb_mode(&self) -> bool {
        self.cgb_mode
    }

    pub fn interrupt_enable(&self) -> u8 {
        self.ie
    }

    pub fn interrupt_flags(&self) -> u8 {
        self.if_ | 0xE0
    }

    pub fn request_interrupt(&mut self, bit: u8) {
        self.if_ |= bit;
    }

    pub fn clear_interrupt_flag(&mut self, bit: u8) {
        self.if_ &= !bit;
    }

    pub fn take_speed_switch_request(&mut self) -> bool {
        std::mem::replace(&mut self.speed_switch_armed, false)
    }

    pub fn set_double_speed(&mut self, doubled: bool) {
        self.current_speed_doubled = doubled;
    }

    fn start_oam_dma(&mut self, source_high: u8) {
        self.oam_dma.start(source_high);
    }

    /// Advance every bus-owned component by `t_cycles` master-clock ticks,
    /// in the fixed order: timer, APU, joypad, PPU, DMA.
    pub fn step_components(&mut self, t_cycles: u32) {
        self.step_components_sampling_audio(t_cycles, |_, _| {})
    }

    /// Like [`step_components`](Self::step_components), additionally calling
    /// `on_apu_sample` once per master-clock tick with the APU's current
    /// resolved stereo sample. Sampling at this fixed rate (rather than once
    /// per CPU instruction, which varies in length) is what lets a host
    /// audio backend's resampler assume a steady input clock.
    pub fn step_components_sampling_audio(&mut self, t_cycles: u32, mut on_apu_sample: impl FnMut(i16, i16)) {
        for _ in 0..t_cycles {
            self.timer.tick();
            if self.timer.take_interrupt() {
                self.if_ |= 0x04;
            }

            self.apu.tick();
            let (left, right) = self.apu.sample();
            on_apu_sample(left, right);

            if self.joypad.take_interrupt() {
                self.if_ |= 0x10;
            }

            self.mapper.tick();
            self.serial.tick();
            if self.serial.take_interrupt() {
                self.if_ |= 0x08;
            }

            self.ppu.tick();
            if self.ppu.take_vblank_interrupt() {
                self.if_ |= 0x01;
            }
            if self.ppu.take_stat_interrupt() {
                self.if_ |= 0x02;
            }
            let in_hblank = self.ppu.mode() == crate::ppu::Mode::HBlank;
            if in_hblank && !self.was_in_hblank {
                if let Some((source, destination)) = self.hdma_hblank_chunk() {
                    self.copy_hdma_chunk(source, destination);
                }
            }
            self.was_in_hblank = in_hblank;

            self.total_t_cycles += 1;
        }

        if let Some((source, index)) = self.oam_dma.step() {
            let byte = self.read_bypassing_dma(source);
            self.ppu.oam.write(0xFE00 + index as u16, byte);
        }
    }

    /// HBlank-mode HDMA pops exactly one chunk per HBlank entry, detected
    /// via the HBlank/non-HBlank edge in `was_in_hblank`.
    fn hdma_hblank_chunk(&mut self) -> Option<(u16, u16)> {
        if self.hdma.mode() != Some(HdmaMode::HBlank) || !self.hdma.is_active() {
            return None;
        }
        self.hdma.next_chunk()
    }

    fn copy_hdma_chunk(&mut self, source: u16, destination: u16) {
        for i in 0..16u16 {
            let byte = self.read_bypassing_dma(source.wrapping_add(i));
            self.ppu.vram.write(destination.wrapping_add(i), byte);
        }
    }

    fn read_bypassing_dma(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.mapper.read_rom(addr),
            0x8000..=0x9FFF => self.ppu.read(addr),
            0xA000..=0xBFFF => self.mapper.read_ram(addr),
            0xC000..=0xFDFF => self.ram.read(addr),
            _ => self.read(addr),
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        if self.oam_dma.is_active() && !matches!(addr, 0xFF80..=0xFFFE) {
            return 0xFF;
        }

        match addr {
            0x0000..=0x7FFF => self.mapper.read_rom(addr),
            0x8000..=0x9FFF => {
                if self.vram_locked() {
                    0xFF
                } else {
                    self.ppu.read(addr)
                }
            }
            0xA000..=0xBFFF => self.mapper.read_ram(addr),
            0xC000..=0xFDFF => self.ram.read(addr),
            0xFE00..=0xFE9F => {
                if self.oam_locked() {
                    0xFF
                } else {
                    self.ppu.read(addr)
                }
            }
            0xFEA0..=0xFEFF => 0xFF,
            0xFF00 => self.joypad.read(),
            0xFF01..=0xFF02 => self.serial.read(addr),
            0xFF04..=0xFF07 => self.timer.read(addr),
            0xFF0F => self.interrupt_flags(),
            0xFF10..=0xFF26 | 0xFF30..=0xFF3F => self.apu.read(addr),
            0xFF40..=0xFF45 | 0xFF47..=0xFF4B | 0xFF4F | 0xFF68..=0xFF6B => self.ppu.read(addr),
            0xFF46 => self.oam_dma.source_high(),
            0xFF4D => (self.speed_switch_armed as u8) | ((self.current_speed_doubled as u8) << 7) | 0x7E,
            0xFF51..=0xFF54 => 0xFF, // HDMA source/dest registers are write-only
            0xFF55 => self.hdma.status(),
            0xFF70 => self.ram.wram_bank() | 0xF8,
            0xFF80..=0xFFFE => self.hram.read(addr),
            0xFFFF => self.ie,
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        if self.oam_dma.is_active() && !matches!(addr, 0xFF80..=0xFFFE) {
            return;
        }

        match addr {
            0x0000..=0x7FFF => self.mapper.write_rom(addr, data),
            0x8000..=0x9FFF => {
                if !self.vram_locked() {
                    self.ppu.write(addr, data);
                }
            }
            0xA000..=0xBFFF => self.mapper.write_ram(addr, data),
            0xC000..=0xFDFF => self.ram.write(addr, data),
            0xFE00..=0xFE9F => {
                if !self.oam_locked() {
                    self.ppu.write(addr, data);
                }
            }
            0xFEA0..=0xFEFF => {}
            0xFF00 => self.joypad.write(data),
            0xFF01..=0xFF02 => self.serial.write(addr, data),
            0xFF04..=0xFF07 => self.timer.write(addr, data),
            0xFF0F => self.if_ = data & 0x1F,
            0xFF10..=0xFF26 | 0xFF30..=0xFF3F => self.apu.write(addr, data),
            0xFF40..=0xFF45 | 0xFF47..=0xFF4B | 0xFF4F | 0xFF68..=0xFF6B => self.ppu.write(addr, data),
            0xFF46 => self.start_oam_dma(data),
            0xFF4D => self.speed_switch_armed = data & 0x01 != 0,
            0xFF51 => self.hdma.set_source_high(data),
            0xFF52 => self.hdma.set_source_low(data),
            0xFF53 => self.hdma.set_destination_high(data),
            0xFF54 => self.hdma.set_destination_low(data),
            0xFF55 => self.write_hdma5(data),
            0xFF70 => self.ram.set_wram_bank(data),
            0xFF80..=0xFFFE => self.hram.write(addr, data),
            0xFFFF => self.ie = data & 0x1F,
            _ => {}
        }
    }

    pub fn mapper(&self) -> &dyn Mapper {
        self.mapper.as_ref()
    }

    pub fn mapper_mut(&mut self) -> &mut dyn Mapper {
        self.mapper.as_mut()
    }

    /// Serializes every bus-owned component's mutable state, in a fixed
    /// order, for the savestate writer. Cartridge ROM/header data is not
    /// included here; SRAM and mapper bank-select state are.
    pub(crate) fn write_state(&self, w: &mut crate::byte_io::Writer) {
        self.mapper.write_state(w);
        self.ram.write_state(w);
        self.hram.write_state(w);
        self.ppu.write_state(w);
        self.apu.write_state(w);
        self.timer.write_state(w);
        self.joypad.write_state(w);
        self.serial.write_state(w);
        self.oam_dma.write_state(w);
        self.hdma.write_state(w);
        w.u8(self.ie);
        w.u8(self.if_);
        w.bool(self.speed_switch_armed);
        w.u64(self.total_t_cycles);
        w.bool(self.was_in_hblank);
        w.bool(self.current_speed_doubled);
    }

    pub(crate) fn read_state(
        &mut self,
        r: &mut crate::byte_io::Reader,
    ) -> Result<(), crate::byte_io::UnexpectedEof> {
        self.mapper.read_state(r)?;
        self.ram.read_state(r)?;
        self.hram.read_state(r)?;
        self.ppu.read_state(r)?;
        self.apu.read_state(r)?;
        self.timer.read_state(r)?;
        self.joypad.read_state(r)?;
        self.serial.read_state(r)?;
        self.oam_dma.read_state(r)?;
        self.hdma.read_state(r)?;
        self.ie = r.u8()?;
        self.if_ = r.u8()?;
        self.speed_switch_armed = r.bool()?;
        self.total_t_cycles = r.u64()?;
        self.was_in_hblank = r.bool()?;
        self.current_speed_doubled = r.bool()?;
        Ok(())
    }

    fn write_hdma5(&mut self, data: u8) {
        if self.hdma.cancel_if_hblank_active(data) {
            return;
        }
        self.hdma.start(data);
        if self.hdma.mode() == Some(crate::dma::HdmaMode::GeneralPurpose) {
            // Each 16-byte chunk stalls the CPU for 8 M-cycles (16 in double
            // speed), matching the HBlank-mode path's per-chunk accounting.
            let m_cycles_per_chunk = if self.current_speed_doubled { 16 } else { 8 };
            while let Some((source, destination)) = self.hdma.next_chunk() {
                self.copy_hdma_chunk(source, destination);
                self.step_components(m_cycles_per_chunk * 4);
            }
        }
    }
}
