//! APU unit tests
//!
//! Register-level tests drive the channels the way the CPU would, through
//! `Apu::write_register`; synthesis tests pull samples and check the
//! gating and mixing rules.
