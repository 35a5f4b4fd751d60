// Window module - manages display window and frame presentation
//
// Window creation, scaling, and frame rendering using the winit and pixels
// crates. Host input is read through `UnifiedInput`, which merges keyboard
// and gamepad state before it ever reaches a `Joypad`.

use super::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::input::UnifiedInput;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Window configuration.
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Scale factor (1x, 2x, 3x, ...).
    pub scale: u32,
    /// Target frame rate in Hz. The Game Boy's native rate is ~59.73 Hz.
    pub target_fps: u32,
    pub vsync: bool,
}

impl WindowConfig {
    pub fn new() -> Self {
        Self { scale: 3, target_fps: 60, vsync: true }
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    pub fn with_fps(mut self, fps: u32) -> Self {
        self.target_fps = fps.max(1);
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.target_fps as u64)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Display window that owns the host window, pixel surface, and input state.
pub struct DisplayWindow {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    config: WindowConfig,
    frame_buffer: FrameBuffer,
    last_frame_time: Instant,
    input: UnifiedInput,
}

impl DisplayWindow {
    pub fn new(config: WindowConfig) -> Self {
        Self {
            window: None,
            pixels: None,
            config,
            frame_buffer: FrameBuffer::new(),
            last_frame_time: Instant::now(),
            input: UnifiedInput::new(),
        }
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn frame_buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame_buffer
    }

    pub fn input(&self) -> &UnifiedInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut UnifiedInput {
        &mut self.input
    }

    fn render(&mut self) -> Result<(), pixels::Error> {
        if let Some(pixels) = &mut self.pixels {
            let frame = pixels.frame_mut();
            self.frame_buffer.to_rgba(frame);
            pixels.render()?;
        }
        Ok(())
    }

    fn should_render_frame(&mut self) -> bool {
        let elapsed = self.last_frame_time.elapsed();
        if elapsed >= self.config.frame_duration() {
            self.last_frame_time = Instant::now();
            true
        } else {
            false
        }
    }
}

impl ApplicationHandler for DisplayWindow {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("Game Boy")
            .with_inner_size(LogicalSize::new(self.config.window_width(), self.config.window_height()))
            .with_resizable(false);

        let window = event_loop.create_window(window_attributes).expect("failed to create window");
        let window = Arc::new(window);
        let window_size = window.inner_size();

        let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)
            .expect("failed to create pixel buffer");

        self.window = Some(window);
        self.pixels = Some(pixels);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event: KeyEvent { physical_key, state, .. }, .. } => match state {
                ElementState::Pressed => self.input.handle_key_press(physical_key),
                ElementState::Released => self.input.handle_key_release(physical_key),
            },
            WindowEvent::RedrawRequested => {
                self.input.poll_gamepads();
                if self.should_render_frame() {
                    if let Err(err) = self.render() {
                        log::error!("render error: {}", err);
                        event_loop.exit();
                    }
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Run a bare display window showing whatever is in its frame buffer, with
/// no emulation core driving it. Useful for manual testing of the window
/// and input plumbing in isolation.
pub fn run_display(config: WindowConfig) -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(if config.vsync { ControlFlow::Wait } else { ControlFlow::Poll });

    let mut display = DisplayWindow::new(config);
    log::info!(
        "starting display window: {}x{} at {}x scale, {} fps",
        SCREEN_WIDTH,
        SCREEN_HEIGHT,
        config.scale,
        config.target_fps
    );
    event_loop.run_app(&mut display)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_dmg_native_refresh() {
        let config = WindowConfig::new();
        assert_eq!(config.scale, 3);
        assert_eq!(config.target_fps, 60);
        assert!(config.vsync);
    }

    #[test]
    fn builder_methods_override_defaults() {
        let config = WindowConfig::new().with_scale(2).with_fps(30).with_vsync(false);
        assert_eq!(config.scale, 2);
        assert_eq!(config.target_fps, 30);
        assert!(!config.vsync);
    }

    #[test]
    fn window_dimensions_scale_from_native_resolution() {
        let config = WindowConfig::new().with_scale(2);
        assert_eq!(config.window_width(), 320);
        assert_eq!(config.window_height(), 288);
    }

    #[test]
    fn scale_factor_is_clamped_to_valid_range() {
        assert_eq!(WindowConfig::new().with_scale(100).scale, 8);
        assert_eq!(WindowConfig::new().with_scale(0).scale, 1);
    }
}
