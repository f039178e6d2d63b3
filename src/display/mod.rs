// Display module - window creation and frame presentation
//
// This module provides:
// - the 64-entry master palette and index-to-RGBA conversion
// - window creation with integer scaling (winit + pixels)
// - the production HostIo implementation wiring video, input, and the
//   audio ring into the event loop

pub mod palette;
pub mod window;

pub use palette::{palette_to_rgb, palette_to_rgba, MASTER_PALETTE};
pub use window::{run_display, WindowConfig};
