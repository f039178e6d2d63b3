// Audio module - sample ring and host output
//
// Two pieces: the mutex-guarded sample ring (the only state shared
// between the emulation thread and the audio callback) and the cpal
// output stream that drains it. The ring itself is always available;
// the cpal backend sits behind the `audio` feature like the rest of the
// sound output path.
//
// The scheduler keeps the ring topped up to its low-water mark between
// host frames by synthesizing blocks from the APU; see the emulator
// module.

pub mod ring;

#[cfg(feature = "audio")]
pub mod output;

pub use ring::{shared_ring, SampleRing, SharedRing, LOW_WATER_MARK, RING_CAPACITY};

#[cfg(feature = "audio")]
pub use output::{AudioOutput, OUTPUT_SAMPLE_RATE};
