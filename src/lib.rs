// Game Boy / Game Boy Color emulator library
// Core library implementing the Sharp LR35902 CPU, PPU, APU, memory map and
// cartridge controllers, with frontend-facing sink traits for video/audio.

// Public modules
pub mod apu;
#[cfg(feature = "audio")]
pub mod audio;
pub mod bus;
pub(crate) mod byte_io;
pub mod cartridge;
pub mod cpu;
pub mod dma;
pub mod display;
pub mod emulator;
pub mod input;
pub mod ppu;
pub mod ram;
pub mod timer;

// Re-export main types for convenience
pub use apu::Apu;
#[cfg(feature = "audio")]
pub use audio::{AudioConfig, AudioSink, AudioSystem, Mixer};
pub use bus::{Bus, MemoryMappedDevice};
pub use cartridge::{
    create_mapper, Cartridge, CartridgeError, CartridgeHeader, CgbFlag, Mapper, MapperError, MbcKind,
};
pub use cpu::Cpu;
pub use dma::{Hdma, HdmaMode, OamDma};
pub use display::{DisplayWindow, FrameBuffer, VideoSink, WindowConfig};
pub use emulator::{Emulator, EmulatorConfig, LoadRomError, PaletteMode, SaveState, SaveStateError, SpeedMode};
pub use input::{Button, Joypad, KeyBindings, UnifiedInput};
pub use ppu::Ppu;
pub use ram::{HighRam, Ram};
pub use timer::Timer;
