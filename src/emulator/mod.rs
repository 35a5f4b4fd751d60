// Emulator module - main emulator coordinator
//
// This module provides the main emulator interface that coordinates all
// Game Boy components (CPU, Bus, and everything the Bus owns) and implements
// quality-of-life features like save states, screenshots, speed control, and
// configuration management.

mod config;
mod recent_roms;
mod save_state;
mod screenshot;

pub use config::{EmulatorConfig, PaletteMode, SpeedMode};
pub use recent_roms::RecentRomsList;
pub use save_state::{SaveState, SaveStateError};
pub use screenshot::{save_screenshot, ScreenshotError};

use crate::bus::Bus;
use crate::cartridge::{create_mapper, Cartridge, CartridgeError, CgbFlag, MapperError};
use crate::cpu::Cpu;
use crate::display::{self, FrameBuffer, VideoSink};
use crate::input::UnifiedInput;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Errors that can occur while loading a ROM.
#[derive(Debug)]
pub enum LoadRomError {
    Io(io::Error),
    Cartridge(CartridgeError),
    Mapper(MapperError),
}

impl fmt::Display for LoadRomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadRomError::Io(e) => write!(f, "I/O error: {}", e),
            LoadRomError::Cartridge(e) => write!(f, "cartridge error: {}", e),
            LoadRomError::Mapper(e) => write!(f, "mapper error: {}", e),
        }
    }
}

impl std::error::Error for LoadRomError {}

impl From<io::Error> for LoadRomError {
    fn from(e: io::Error) -> Self {
        LoadRomError::Io(e)
    }
}

impl From<CartridgeError> for LoadRomError {
    fn from(e: CartridgeError) -> Self {
        LoadRomError::Cartridge(e)
    }
}

impl From<MapperError> for LoadRomError {
    fn from(e: MapperError) -> Self {
        LoadRomError::Mapper(e)
    }
}

/// Approximate master-clock ticks per frame at the unmodified (single-speed)
/// DMG/CGB rate: 4,194,304 Hz / 59.7275 Hz.
const T_CYCLES_PER_FRAME: u32 = 70224;

/// Main emulator structure.
///
/// Coordinates the CPU and bus and provides high-level functionality for
/// running games, saving/loading states, and managing configuration. ROM
/// loading consumes the parsed `Cartridge` into a `Mapper` owned by the
/// `Bus`; only the handful of header facts a savestate or UI needs (title,
/// whether the cartridge carries RAM, which hardware mode it runs in) are
/// cached here afterward.
pub struct Emulator {
    cpu: Cpu,
    bus: Bus,
    rom_path: Option<PathBuf>,
    rom_title: String,
    has_sram: bool,
    has_battery: bool,
    config: EmulatorConfig,
    paused: bool,
    speed_mode: SpeedMode,
    last_frame_time: Option<Instant>,
}

impl Emulator {
    /// Create a new emulator instance with no ROM loaded.
    ///
    /// # Example
    ///
    /// ```
    /// use gb_rs::emulator::Emulator;
    ///
    /// let emulator = Emulator::new();
    /// ```
    pub fn new() -> Self {
        Emulator {
            cpu: Cpu::new(),
            bus: Bus::for_tests(),
            rom_path: None,
            rom_title: String::new(),
            has_sram: false,
            has_battery: false,
            config: EmulatorConfig::load_or_default(),
            paused: false,
            speed_mode: SpeedMode::Normal,
            last_frame_time: None,
        }
    }

    /// Load a ROM file from disk.
    ///
    /// Parses the header, builds the matching mapper, rebuilds the bus
    /// around it, loads any existing `.sram` battery backup, and records the
    /// ROM in the recent-ROMs list.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gb_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.gb").expect("failed to load ROM");
    /// ```
    pub fn load_rom<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LoadRomError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        self.load_rom_bytes(bytes, Some(path.to_path_buf()))?;

        let mut recent_roms = RecentRomsList::load_or_default();
        recent_roms.add(path);
        let _ = recent_roms.save();

        Ok(())
    }

    /// Load a ROM already read into memory. Exposed separately from
    /// [`load_rom`](Self::load_rom) so tests and alternative frontends
    /// (a ROM picker fed by an embedded resource, say) can construct an
    /// emulator without touching the filesystem.
    pub fn load_rom_bytes(&mut self, rom: Vec<u8>, rom_path: Option<PathBuf>) -> Result<(), LoadRomError> {
        let cartridge = Cartridge::from_bytes(rom)?;
        let title = cartridge.header.title.clone();
        let has_sram = cartridge.header.has_ram;
        let has_battery = cartridge.header.has_battery;
        let cgb_mode = !matches!(cartridge.header.cgb_flag, CgbFlag::Monochrome);

        let mapper = create_mapper(cartridge)?;
        self.bus = Bus::new(mapper, cgb_mode);
        self.bus.set_strict_vram_locking(self.config.strict_vram_locking);
        self.cpu = Cpu::new();

        self.rom_title = title;
        self.has_sram = has_sram;
        self.has_battery = has_battery;
        self.rom_path = rom_path;
        self.paused = false;

        if self.has_battery {
            if let Some(data) = self.read_sram_file() {
                self.bus.mapper_mut().load_ram_bytes(&data);
            }
        }

        Ok(())
    }

    /// Reset the emulator to its power-on state, as if pressing the reset
    /// button. The cartridge (ROM and current RAM contents) is untouched;
    /// only the CPU and bus-owned components are rebuilt.
    ///
    /// # Example
    ///
    /// ```
    /// use gb_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.reset();
    /// ```
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.paused = false;
    }

    /// Run exactly one CPU instruction (or one idle tick while halted or
    /// stopped) and advance every bus-owned component by the resulting
    /// number of master-clock ticks.
    pub fn step_instruction(&mut self) -> u8 {
        let m_cycles = self.cpu.step(&mut self.bus);
        self.bus.step_components(m_cycles as u32 * 4);
        m_cycles
    }

    /// Sample the merged host input state into the joypad register. Kept
    /// separate from [`run_frame`](Self::run_frame) so a caller that also
    /// passes itself as the `VideoSink` (e.g. a window that owns both the
    /// input state and the pixel surface) doesn't need to borrow that value
    /// both immutably and mutably in the same call.
    pub fn apply_input(&mut self, input: &UnifiedInput) {
        input.apply_to(self.bus.joypad_mut());
    }

    /// Run until the PPU reports a completed frame, honoring the current
    /// [`SpeedMode`] by running that multiple of a frame's worth of
    /// master-clock ticks before presenting. Call [`apply_input`](Self::apply_input)
    /// beforehand so the frame sees a stable joypad state throughout.
    ///
    /// `on_audio_sample` is called with each raw stereo APU sample as it is
    /// produced; a frontend without audio enabled can pass `|_, _| {}`. This
    /// keeps the emulator core decoupled from any particular audio backend
    /// (in particular, from whether the `audio` feature is compiled in).
    ///
    /// Returns `false` without doing any work if the emulator is paused.
    pub fn run_frame(
        &mut self,
        video: &mut dyn VideoSink,
        mut on_audio_sample: impl FnMut(i16, i16),
    ) -> bool {
        if self.paused || matches!(self.speed_mode, SpeedMode::Paused) {
            return false;
        }

        let frames_this_call = self.speed_mode.multiplier().max(0.0);
        let target_cycles = (T_CYCLES_PER_FRAME as f32 * frames_this_call) as u64;

        let mut consumed = 0u64;
        while consumed < target_cycles {
            let m_cycles = self.cpu.step(&mut self.bus);
            let t_cycles = m_cycles as u32 * 4;
            self.bus.step_components_sampling_audio(t_cycles, &mut on_audio_sample);
            consumed += t_cycles as u64;

            if self.bus.ppu_mut().take_frame_ready() {
                let mut frame = FrameBuffer::new();
                frame.copy_from_ppu(self.bus.ppu().frame_buffer());
                if self.config.palette_mode == PaletteMode::Grayscale {
                    apply_palette_filter(&mut frame);
                }
                video.present(&frame);
            }
        }

        self.last_frame_time = Some(Instant::now());
        true
    }

    /// Save state to a file slot.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gb_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.gb").unwrap();
    /// emulator.save_state(0).expect("failed to save state");
    /// ```
    pub fn save_state(&self, slot: u8) -> Result<(), SaveStateError> {
        let save_state = SaveState::from_emulator(self)?;
        save_state.save_to_file(slot, &self.config.save_state.save_directory, self.rom_path.as_deref())
    }

    /// Quick save to slot 0 (the default quick-save hotkey's slot).
    pub fn quick_save(&self) -> Result<(), SaveStateError> {
        self.save_state(0)
    }

    /// Load state from a file slot.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gb_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.load_rom("game.gb").unwrap();
    /// emulator.load_state(0).expect("failed to load state");
    /// ```
    pub fn load_state(&mut self, slot: u8) -> Result<(), SaveStateError> {
        let save_directory = self.config.save_state.save_directory.clone();
        let save_state = SaveState::load_from_file(slot, &save_directory, self.rom_path.as_deref())?;
        save_state.restore_to_emulator(self)
    }

    /// Quick load from slot 0 (the default quick-load hotkey's slot).
    pub fn quick_load(&mut self) -> Result<(), SaveStateError> {
        self.load_state(0)
    }

    /// Persist the cartridge's external RAM to `<rom_stem>.sram` next to the
    /// ROM, if the cartridge is battery-backed. Called on graceful shutdown
    /// and safe to call at any other time (e.g. periodic autosave).
    pub fn save_sram(&self) -> io::Result<()> {
        if !self.has_battery {
            return Ok(());
        }
        if let Some(path) = self.sram_path() {
            fs::write(path, self.bus.mapper().ram_bytes())?;
        }
        Ok(())
    }

    fn read_sram_file(&self) -> Option<Vec<u8>> {
        let path = self.sram_path()?;
        fs::read(path).ok()
    }

    fn sram_path(&self) -> Option<PathBuf> {
        self.rom_path.as_ref().map(|p| p.with_extension("sram"))
    }

    /// Whether the loaded cartridge carries any external RAM.
    pub fn has_sram(&self) -> bool {
        self.has_sram
    }

    /// Title decoded from the cartridge header (may be empty if no ROM is
    /// loaded, or if the cartridge used the post-CGB shortened title field).
    pub fn rom_title(&self) -> &str {
        &self.rom_title
    }

    /// Take a screenshot of the current frame buffer, saved as a PNG file.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gb_rs::emulator::Emulator;
    ///
    /// let mut emulator = Emulator::new();
    /// let screenshot_path = emulator.screenshot().expect("failed to save screenshot");
    /// println!("screenshot saved to: {}", screenshot_path.display());
    /// ```
    pub fn screenshot(&self) -> Result<PathBuf, ScreenshotError> {
        screenshot::save_screenshot(self.bus.ppu().frame_buffer(), self.rom_path.as_deref())
    }

    /// Set the current speed mode.
    ///
    /// # Example
    ///
    /// ```
    /// use gb_rs::emulator::{Emulator, SpeedMode};
    ///
    /// let mut emulator = Emulator::new();
    /// emulator.set_speed_mode(SpeedMode::FastForward2x);
    /// ```
    pub fn set_speed_mode(&mut self, mode: SpeedMode) {
        self.speed_mode = mode;
    }

    pub fn speed_mode(&self) -> SpeedMode {
        self.speed_mode
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &Bus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut Bus {
        &mut self.bus
    }

    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EmulatorConfig {
        &mut self.config
    }

    pub fn rom_path(&self) -> Option<&Path> {
        self.rom_path.as_deref()
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Remap every pixel of `frame` through [`display::apply_grayscale_filter`].
fn apply_palette_filter(frame: &mut FrameBuffer) {
    for y in 0..display::SCREEN_HEIGHT {
        for x in 0..display::SCREEN_WIDTH {
            let rgb = display::apply_grayscale_filter(frame.get_pixel(x, y));
            frame.set_pixel(x, y, rgb);
        }
    }
}
