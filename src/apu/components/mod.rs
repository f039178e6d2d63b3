//! Common APU components used by the pulse channels

pub mod envelope;
pub mod frame_counter;
pub mod length_counter;
pub mod sweep;

pub use envelope::Envelope;
pub use frame_counter::{FrameCounter, FrameEvent, FrameMode};
pub use length_counter::LengthCounter;
pub use sweep::Sweep;
