// Game Boy / Game Boy Color emulator - binary entry point
//
// Wires the library's `Emulator` core to a winit window and (when the
// `audio` feature is enabled) a cpal audio output. ROM selection is a single
// positional argument; broader CLI/config-file handling lives outside the
// scope of this crate.

use gb_rs::display::{DisplayWindow, WindowConfig};
use gb_rs::Emulator;
use std::env;
use std::process::ExitCode;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

#[cfg(feature = "audio")]
use gb_rs::audio::AudioSystem;

/// Drives an `Emulator` from a winit event loop, presenting frames through a
/// `DisplayWindow` and (optionally) pushing samples to a live audio output.
struct EmulatorApp {
    display: DisplayWindow,
    emulator: Emulator,
    #[cfg(feature = "audio")]
    audio: Option<AudioSystem>,
}

impl EmulatorApp {
    fn new(config: WindowConfig, emulator: Emulator) -> Self {
        #[cfg(feature = "audio")]
        let audio = if emulator.config().audio.enabled {
            match AudioSystem::new_default() {
                Ok(mut system) => {
                    system.set_volume(emulator.config().audio.volume);
                    Some(system)
                }
                Err(err) => {
                    log::warn!("audio output unavailable: {}", err);
                    None
                }
            }
        } else {
            None
        };

        EmulatorApp {
            display: DisplayWindow::new(config),
            emulator,
            #[cfg(feature = "audio")]
            audio,
        }
    }

    fn run_one_frame(&mut self) {
        self.emulator.apply_input(self.display.input());

        #[cfg(feature = "audio")]
        {
            let audio = &mut self.audio;
            self.emulator.run_frame(&mut self.display, |left, right| {
                if let Some(audio) = audio {
                    audio.process_apu_sample(left, right);
                }
            });
        }
        #[cfg(not(feature = "audio"))]
        {
            self.emulator.run_frame(&mut self.display, |_, _| {});
        }
    }

    fn handle_hotkey(&mut self, key_code: KeyCode) {
        match key_code {
            KeyCode::F5 => {
                if let Err(err) = self.emulator.quick_save() {
                    log::error!("quick save failed: {}", err);
                }
            }
            KeyCode::F7 => {
                if let Err(err) = self.emulator.quick_load() {
                    log::error!("quick load failed: {}", err);
                }
            }
            KeyCode::F8 => self.emulator.reset(),
            KeyCode::F9 => match self.emulator.screenshot() {
                Ok(path) => log::info!("screenshot saved to {}", path.display()),
                Err(err) => log::error!("screenshot failed: {}", err),
            },
            KeyCode::KeyP => self.emulator.toggle_pause(),
            _ => {}
        }
    }

    fn shut_down(&self) {
        if let Err(err) = self.emulator.save_sram() {
            log::error!("failed to persist cartridge RAM: {}", err);
        }
        if self.emulator.config().save_state.auto_save_on_exit {
            if let Err(err) = self.emulator.quick_save() {
                log::error!("auto save on exit failed: {}", err);
            }
        }
    }
}

impl ApplicationHandler for EmulatorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        self.display.resumed(event_loop);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => self.shut_down(),
            WindowEvent::KeyboardInput { event: key_event, .. } => {
                if key_event.state == winit::event::ElementState::Pressed {
                    if let PhysicalKey::Code(code) = key_event.physical_key {
                        self.handle_hotkey(code);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.run_one_frame(),
            _ => {}
        }
        self.display.window_event(event_loop, window_id, event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.display.about_to_wait(event_loop);
    }
}

fn run(rom_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut emulator = Emulator::new();
    emulator.load_rom(rom_path)?;
    log::info!("loaded '{}' ({})", rom_path, emulator.rom_title());

    let video_config = emulator.config().video.clone();
    let window_config = WindowConfig::new()
        .with_scale(video_config.scale)
        .with_fps(video_config.fps)
        .with_vsync(video_config.vsync);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(if window_config.vsync { ControlFlow::Wait } else { ControlFlow::Poll });

    let mut app = EmulatorApp::new(window_config, emulator);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let rom_path = match env::args().nth(1) {
        Some(path) => path,
        None => {
            eprintln!("usage: gb-rs <rom-file>");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(&rom_path) {
        log::error!("{}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
