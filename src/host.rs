// Host I/O seam
//
// Everything the emulation core needs from the host platform fits in
// one trait: show a finished frame, report the gamepad states, and
// accept synthesized audio. The winit/pixels/cpal front end implements
// it for real play; tests drive the core with the in-memory NullHost.

use crate::input::Controller;

/// Host platform services
pub trait HostIo {
    /// Present a finished 256x240 frame of palette indices
    ///
    /// The host owns the palette-to-RGB conversion and the actual
    /// texture upload.
    fn present_frame(&mut self, pixels: &[u8]);

    /// Current button state of both controller ports
    fn poll_gamepad(&mut self) -> (Controller, Controller);

    /// Queue a block of mono f32 samples for playback
    fn push_audio(&mut self, samples: &[f32]);

    /// Samples queued but not yet played
    ///
    /// The scheduler uses this to keep the audio pipeline topped up to
    /// its low-water mark without overfilling it.
    fn audio_backlog(&self) -> usize;
}

/// An inert host for tests and headless runs
///
/// Remembers what the core handed it so assertions can look.
pub struct NullHost {
    /// Pad states to report
    pub pads: (Controller, Controller),
    /// Frames presented so far
    pub frames_presented: u64,
    /// Last presented frame, if any
    pub last_frame: Vec<u8>,
    /// All audio pushed so far
    pub audio: Vec<f32>,
    /// Samples "consumed" by the pretend audio device
    pub consumed: usize,
}

impl NullHost {
    pub fn new() -> Self {
        NullHost {
            pads: (Controller::new(), Controller::new()),
            frames_presented: 0,
            last_frame: Vec::new(),
            audio: Vec::new(),
            consumed: 0,
        }
    }
}

impl Default for NullHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostIo for NullHost {
    fn present_frame(&mut self, pixels: &[u8]) {
        self.frames_presented += 1;
        self.last_frame = pixels.to_vec();
    }

    fn poll_gamepad(&mut self) -> (Controller, Controller) {
        self.pads
    }

    fn push_audio(&mut self, samples: &[f32]) {
        self.audio.extend_from_slice(samples);
    }

    fn audio_backlog(&self) -> usize {
        self.audio.len() - self.consumed
    }
}
