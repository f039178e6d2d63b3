// Audio output - Handles audio playback using cpal
//
// Opens the default output device at 44.1 kHz mono and drains the shared
// sample ring from the device callback. An unavailable audio device is a
// startup error the caller surfaces and aborts on.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};

use super::ring::SharedRing;

/// Output sample rate in Hz
pub const OUTPUT_SAMPLE_RATE: u32 = 44_100;

/// Audio output handle
///
/// Keeps the device and stream alive; dropping it stops playback.
pub struct AudioOutput {
    /// Audio device
    _device: Device,

    /// Audio stream
    stream: Stream,
}

impl AudioOutput {
    /// Open the default output device and start draining the ring
    ///
    /// # Errors
    ///
    /// A descriptive message when no device exists, the format is
    /// unsupported, or the stream cannot be built or started.
    pub fn new(ring: SharedRing) -> Result<Self, String> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no audio output device available")?;

        println!("audio device: {}", device.name().unwrap_or_default());

        let config = StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(OUTPUT_SAMPLE_RATE),
            buffer_size: cpal::BufferSize::Default,
        };

        let default_config = device
            .default_output_config()
            .map_err(|e| format!("no default output config: {}", e))?;

        let stream = match default_config.sample_format() {
            SampleFormat::I16 => {
                let ring = ring.clone();
                device
                    .build_output_stream(
                        &config,
                        move |data: &mut [i16], _: &cpal::OutputCallbackInfo| {
                            ring.lock().unwrap().pop_into_pcm(data);
                        },
                        move |err| eprintln!("audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| format!("failed to build audio stream: {}", e))?
            }
            _ => {
                let ring = ring.clone();
                device
                    .build_output_stream(
                        &config,
                        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                            ring.lock().unwrap().pop_into_f32(data);
                        },
                        move |err| eprintln!("audio stream error: {}", err),
                        None,
                    )
                    .map_err(|e| format!("failed to build audio stream: {}", e))?
            }
        };

        stream
            .play()
            .map_err(|e| format!("failed to start audio stream: {}", e))?;

        println!("audio output initialized: {} Hz, mono", OUTPUT_SAMPLE_RATE);

        Ok(Self {
            _device: device,
            stream,
        })
    }

    /// Pause playback
    pub fn pause(&self) -> Result<(), String> {
        self.stream
            .pause()
            .map_err(|e| format!("failed to pause audio: {}", e))
    }

    /// Resume playback
    pub fn resume(&self) -> Result<(), String> {
        self.stream
            .play()
            .map_err(|e| format!("failed to resume audio: {}", e))
    }
}

// Note: no unit tests here; stream creation needs audio hardware. The
// ring it drains is covered in audio::ring.
