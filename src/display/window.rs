// Window module - the winit front end
//
// Creates the scaled window, owns the pixels surface, and runs the
// event loop. The inner `WindowHost` is the production HostIo: frame
// presentation through pixels, pad polling through the keyboard handler
// and gilrs, audio through the shared sample ring.
//
// Debug key bindings (handled here, applied to the scheduler):
//
// - 1..5       time dilation 200000 / 5000 / 1000 / 10 / 1
// - F          freeze toggle
// - Enter      single instruction step (while frozen)
// - R          run to the next RTS opcode, then freeze
// - N          run to the next NMI entry, then freeze
// - F1..F4     overlay flags (surfaced in the title bar)
// - F5 / F7    save / load the RAM stash

use crate::audio::SharedRing;
use crate::emulator::{Emulator, SaveState};
use crate::error::CrashReport;
use crate::host::HostIo;
use crate::input::{Controller, GamepadHandler, KeyboardHandler};
use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::palette::render_rgba;
use pixels::{Pixels, SurfaceTexture};
use std::sync::Arc;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

/// Stash file name used by the F5/F7 bindings
const STASH_FILE: &str = "stash.json";

/// Window configuration
#[derive(Debug, Clone, Copy)]
pub struct WindowConfig {
    /// Integer scale factor (1x-8x)
    pub scale: u32,
    /// Whether to enable VSync
    pub vsync: bool,
}

impl WindowConfig {
    /// Default: 3x scale with VSync
    pub fn new() -> Self {
        Self {
            scale: 3,
            vsync: true,
        }
    }

    /// Set the scale factor
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.clamp(1, 8);
        self
    }

    /// Set VSync
    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    /// Window width in physical pixels
    pub fn window_width(&self) -> u32 {
        SCREEN_WIDTH as u32 * self.scale
    }

    /// Window height in physical pixels
    pub fn window_height(&self) -> u32 {
        SCREEN_HEIGHT as u32 * self.scale
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The production HostIo implementation
struct WindowHost {
    pixels: Option<Pixels<'static>>,
    keyboard: KeyboardHandler,
    gamepads: GamepadHandler,
    ring: SharedRing,
}

impl HostIo for WindowHost {
    fn present_frame(&mut self, indices: &[u8]) {
        if let Some(pixels) = &mut self.pixels {
            render_rgba(indices, pixels.frame_mut());
            if let Err(e) = pixels.render() {
                eprintln!("render failed: {}", e);
            }
        }
    }

    fn poll_gamepad(&mut self) -> (Controller, Controller) {
        let (pad1, pad2) = self.gamepads.poll();
        (self.keyboard.state().merge(&pad1), pad2)
    }

    fn push_audio(&mut self, samples: &[f32]) {
        self.ring.lock().unwrap().push_block(samples);
    }

    fn audio_backlog(&self) -> usize {
        self.ring.lock().unwrap().amount()
    }
}

/// The application driven by the winit event loop
struct EmulatorApp {
    window: Option<Arc<Window>>,
    host: WindowHost,
    emulator: Emulator,
    config: WindowConfig,
    app_name: String,
    /// F1..F4 overlay flags; surfaced in the title bar
    overlays: [bool; 4],
    crash: Option<Box<CrashReport>>,
}

impl EmulatorApp {
    fn update_title(&self) {
        if let Some(window) = &self.window {
            let mut title = format!("dotnes - 1/{}", self.emulator.time_dilation());
            if self.emulator.is_frozen() {
                title.push_str(" [frozen]");
            }
            for (i, on) in self.overlays.iter().enumerate() {
                if *on {
                    title.push_str(&format!(" F{}", i + 1));
                }
            }
            window.set_title(&title);
        }
    }

    /// Apply a debug key; returns true when the key was consumed
    fn handle_debug_key(&mut self, key: KeyCode) -> bool {
        match key {
            KeyCode::Digit1 => self.emulator.set_time_dilation(200_000),
            KeyCode::Digit2 => self.emulator.set_time_dilation(5_000),
            KeyCode::Digit3 => self.emulator.set_time_dilation(1_000),
            KeyCode::Digit4 => self.emulator.set_time_dilation(10),
            KeyCode::Digit5 => self.emulator.set_time_dilation(1),
            KeyCode::KeyF => self.emulator.toggle_freeze(),
            KeyCode::Enter => self.emulator.request_step(),
            KeyCode::KeyR => self.emulator.request_skip_to_rts(),
            KeyCode::KeyN => self.emulator.request_skip_to_nmi(),
            KeyCode::F1 => self.overlays[0] = !self.overlays[0],
            KeyCode::F2 => self.overlays[1] = !self.overlays[1],
            KeyCode::F3 => self.overlays[2] = !self.overlays[2],
            KeyCode::F4 => self.overlays[3] = !self.overlays[3],
            KeyCode::F5 => {
                let state = self.emulator.save_state();
                match state.save_to_stash(&self.app_name, STASH_FILE) {
                    Ok(()) => println!("state stashed"),
                    Err(e) => eprintln!("stash failed: {}", e),
                }
            }
            KeyCode::F7 => match SaveState::load_from_stash(&self.app_name, STASH_FILE) {
                Ok(state) => {
                    self.emulator.load_state(&state);
                    println!("state restored");
                }
                Err(e) => eprintln!("restore failed: {}", e),
            },
            _ => return false,
        }
        self.update_title();
        true
    }
}

impl ApplicationHandler for EmulatorApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attributes = Window::default_attributes()
            .with_title("dotnes")
            .with_inner_size(LogicalSize::new(
                self.config.window_width(),
                self.config.window_height(),
            ))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .expect("failed to create window"),
        );
        let size = window.inner_size();

        let surface_texture = SurfaceTexture::new(size.width, size.height, window.clone());
        let pixels = Pixels::new(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32, surface_texture)
            .expect("failed to create pixel surface");

        self.window = Some(window);
        self.host.pixels = Some(pixels);
        self.update_title();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let pressed = state == ElementState::Pressed;
                if pressed && self.handle_debug_key(code) {
                    return;
                }
                self.host.keyboard.handle_key(code, pressed);
            }

            WindowEvent::RedrawRequested => {
                if let Err(report) = self.emulator.service_host(&mut self.host) {
                    self.crash = Some(report);
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

/// Run the window event loop until close or a fatal machine fault
///
/// Returns the crash report when the machine died, None on a clean
/// close.
pub fn run_display(
    config: WindowConfig,
    emulator: Emulator,
    ring: SharedRing,
    app_name: String,
) -> Result<Option<Box<CrashReport>>, Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = EmulatorApp {
        window: None,
        host: WindowHost {
            pixels: None,
            keyboard: KeyboardHandler::new(),
            gamepads: GamepadHandler::new(),
            ring,
        },
        emulator,
        config,
        app_name,
        overlays: [false; 4],
        crash: None,
    };

    event_loop.run_app(&mut app)?;
    Ok(app.crash)
}
