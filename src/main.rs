// dotnes - main entry point
//
// Argumentless launch opens a window running the built-in demo
// cartridge; an optional first argument names an iNES file to load
// instead. Exit status is 0 on a clean close and 1 on a fatal machine
// fault, with the crash diagnostic on stderr.

use std::env;
use std::process;

use dotnes::cartridge::{self, Cartridge};
use dotnes::display::{run_display, WindowConfig};
use dotnes::emulator::{Emulator, EmulatorConfig};

fn main() {
    let config = EmulatorConfig::load_or_default();

    let cartridge = match env::args().nth(1) {
        Some(path) => match Cartridge::from_ines_file(&path) {
            Ok(cartridge) => {
                println!("loaded {}", path);
                cartridge
            }
            Err(e) => {
                eprintln!("cannot load {}: {}", path, e);
                process::exit(1);
            }
        },
        None => cartridge::builtin_rom(),
    };

    let mut emulator = match Emulator::new(cartridge) {
        Ok(emulator) => emulator,
        Err(report) => {
            eprintln!("{}", report);
            process::exit(1);
        }
    };
    emulator.set_volume(config.audio.volume);

    let ring = dotnes::audio::shared_ring();

    // The stream must outlive the event loop; audio device failure is a
    // startup abort.
    #[cfg(feature = "audio")]
    let _audio = if config.audio.enabled {
        match dotnes::audio::AudioOutput::new(ring.clone()) {
            Ok(output) => Some(output),
            Err(e) => {
                eprintln!("audio device unavailable: {}", e);
                process::exit(1);
            }
        }
    } else {
        None
    };

    let window_config = WindowConfig::new()
        .with_scale(config.video.scale)
        .with_vsync(config.video.vsync);

    match run_display(window_config, emulator, ring, config.app_name) {
        Ok(None) => {}
        Ok(Some(report)) => {
            eprintln!("{}", report);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("window error: {}", e);
            process::exit(1);
        }
    }
}
