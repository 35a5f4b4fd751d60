// Save state functionality
//
// Implements the byte-sequential savestate format: a 1-byte flag field (CGB
// mode, STOP, HALT, has-SRAM), a 1-byte version, a 12-byte title, IE, IME,
// optional SRAM, then every component's serialized mutable state and every
// I/O register. This is a fixed, documented layout rather than a
// self-describing schema, so it is built directly on `byte_io` rather than
// a general-purpose serialization crate.

use crate::byte_io::{Reader, UnexpectedEof, Writer};
use crate::cpu::RunState;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Current save state format version. Bumped whenever a component's
/// `write_state`/`read_state` layout changes.
const SAVE_STATE_VERSION: u8 = 2;

const TITLE_LEN: usize = 12;

const FLAG_CGB: u8 = 0x01;
const FLAG_STOP: u8 = 0x02;
const FLAG_HALT: u8 = 0x04;
const FLAG_HAS_SRAM: u8 = 0x08;

/// Errors that can occur during save state operations.
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error reading or writing the state file.
    Io(io::Error),
    /// The state file is shorter than its declared layout requires.
    Truncated,
    /// No ROM is currently loaded, so there is nothing to save.
    NoRomLoaded,
}

impl std::fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Truncated => write!(f, "save state file is truncated or corrupt"),
            SaveStateError::NoRomLoaded => write!(f, "no ROM loaded"),
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<UnexpectedEof> for SaveStateError {
    fn from(_: UnexpectedEof) -> Self {
        SaveStateError::Truncated
    }
}

/// A captured snapshot of an `Emulator`, ready to be written to disk or
/// applied back onto a (possibly different) `Emulator` instance.
pub struct SaveState {
    bytes: Vec<u8>,
}

impl SaveState {
    /// Capture the complete state of a running emulator.
    pub fn from_emulator(emulator: &super::Emulator) -> Result<Self, SaveStateError> {
        if emulator.rom_path().is_none() {
            return Err(SaveStateError::NoRomLoaded);
        }

        let mut w = Writer::new();

        let has_sram = emulator.has_sram();
        let mut flag = 0u8;
        if emulator.bus().cgb_mode() {
            flag |= FLAG_CGB;
        }
        match emulator.cpu().run_state {
            RunState::Stopped => flag |= FLAG_STOP,
            RunState::Halted => flag |= FLAG_HALT,
            RunState::Running => {}
        }
        if has_sram {
            flag |= FLAG_HAS_SRAM;
        }
        w.u8(flag);
        w.u8(SAVE_STATE_VERSION);

        let mut title_bytes = [0u8; TITLE_LEN];
        let title = emulator.rom_title().as_bytes();
        let n = title.len().min(TITLE_LEN);
        title_bytes[..n].copy_from_slice(&title[..n]);
        w.bytes(&title_bytes);

        w.u8(emulator.bus().interrupt_enable());
        w.bool(emulator.cpu().ime);

        if has_sram {
            w.sized_bytes(emulator.bus().mapper().ram_bytes());
        }

        emulator.cpu().write_state(&mut w);
        emulator.bus().write_state(&mut w);

        Ok(SaveState { bytes: w.into_bytes() })
    }

    /// Restore this state onto an emulator. The ROM currently loaded into
    /// `emulator` does not need to be byte-identical to the one the state
    /// was captured from, only compatible enough in shape (same mapper
    /// family, same RAM size) for the component readers to succeed.
    pub fn restore_to_emulator(&self, emulator: &mut super::Emulator) -> Result<(), SaveStateError> {
        let mut r = Reader::new(&self.bytes);

        let flag = r.u8()?;
        let version = r.u8()?;
        if version != SAVE_STATE_VERSION {
            log::warn!(
                "save state version mismatch (expected {}, found {}), attempting to load anyway",
                SAVE_STATE_VERSION,
                version
            );
        }

        let title_bytes = r.bytes(TITLE_LEN)?;
        let title = String::from_utf8_lossy(title_bytes).trim_end_matches('\0').to_string();
        if !title.is_empty() && title != emulator.rom_title() {
            log::warn!(
                "save state title '{}' does not match loaded ROM '{}', loading anyway",
                title,
                emulator.rom_title()
            );
        }

        let _ie = r.u8()?;
        let _ime = r.bool()?;

        let sram = if flag & FLAG_HAS_SRAM != 0 { Some(r.sized_bytes()?) } else { None };

        emulator.cpu_mut().read_state(&mut r)?;
        emulator.bus_mut().read_state(&mut r)?;

        if let Some(data) = sram {
            emulator.bus_mut().mapper_mut().load_ram_bytes(&data);
        }

        Ok(())
    }

    /// Save this state to `<save_directory>/<rom_stem>/slot_<slot>.state`.
    pub fn save_to_file(&self, slot: u8, save_directory: &Path, rom_path: Option<&Path>) -> Result<(), SaveStateError> {
        let dir = Self::slot_directory(save_directory, rom_path);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("slot_{}.state", slot)), &self.bytes)?;
        Ok(())
    }

    /// Load a state previously written by `save_to_file`.
    pub fn load_from_file(slot: u8, save_directory: &Path, rom_path: Option<&Path>) -> Result<Self, SaveStateError> {
        let dir = Self::slot_directory(save_directory, rom_path);
        let bytes = fs::read(dir.join(format!("slot_{}.state", slot)))?;
        Ok(SaveState { bytes })
    }

    fn slot_directory(save_directory: &Path, rom_path: Option<&Path>) -> PathBuf {
        match rom_path.and_then(|p| p.file_stem()) {
            Some(stem) => save_directory.join(stem),
            None => save_directory.join("default"),
        }
    }
}
