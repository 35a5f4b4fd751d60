// Display module - frame presentation
//
// This module provides:
// - A resolved-RGB frame buffer (160x144)
// - An optional grayscale filter for the PPU's green-tinted DMG palette
// - Window creation with scaling support, using winit + pixels

pub mod framebuffer;
pub mod palette;
pub mod window;

pub use framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use palette::apply_grayscale_filter;
pub use window::{run_display, DisplayWindow, WindowConfig};

/// A sink a running emulator pushes completed frames into.
///
/// Implemented by `DisplayWindow` for interactive use; tests and headless
/// tools can implement it over a plain buffer instead.
pub trait VideoSink {
    fn present(&mut self, frame: &FrameBuffer);
}

impl VideoSink for DisplayWindow {
    fn present(&mut self, frame: &FrameBuffer) {
        self.frame_buffer_mut().copy_from_ppu(frame.as_slice());
    }
}
