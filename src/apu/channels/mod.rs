//! APU channel implementations

pub mod pulse;

pub use pulse::PulseChannel;
