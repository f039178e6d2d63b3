// dotnes - a dot-clocked NES emulator
// Core library: the machine (CPU, PPU, APU, bus, cartridge), the
// scheduler, and the host-facing seams (display, audio, input).

// Public modules
pub mod apu;
pub mod audio;
pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod display;
pub mod emulator;
pub mod error;
pub mod host;
pub mod input;
pub mod ppu;

// Re-export main types for convenience
pub use apu::Apu;
pub use audio::{shared_ring, SampleRing, SharedRing};
pub use bus::Bus;
pub use cartridge::{builtin_rom, Cartridge, INesError, INesHeader};
pub use cpu::Cpu;
pub use display::WindowConfig;
pub use emulator::{Emulator, EmulatorConfig, SaveState, SaveStateError};
pub use error::{CrashReport, EmuError};
pub use host::{HostIo, NullHost};
pub use input::{Controller, ControllerIO};
pub use ppu::Ppu;
