// Save state functionality
//
// Snapshots the CPU registers and work RAM as JSON in the platform's
// per-user data directory:
//
// - Unix:    $HOME/.local/share/<appname>/
// - Windows: %APPDATA%\roaming\<appname>\
//
// The PPU/APU side is deliberately not captured: a restored program
// rebuilds its video and audio state within a frame, which is all this
// stash is for.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::bus::Bus;
use crate::cpu::Cpu;

/// Current save state format version
const SAVE_STATE_VERSION: u32 = 1;

/// Errors that can occur during save state operations
#[derive(Debug)]
pub enum SaveStateError {
    /// I/O error
    Io(io::Error),

    /// Serialization/deserialization error
    Serialization(serde_json::Error),

    /// Save state version mismatch
    VersionMismatch { expected: u32, found: u32 },

    /// The per-user data directory cannot be determined
    NoStashDirectory,
}

impl std::fmt::Display for SaveStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveStateError::Io(e) => write!(f, "I/O error: {}", e),
            SaveStateError::Serialization(e) => write!(f, "serialization error: {}", e),
            SaveStateError::VersionMismatch { expected, found } => {
                write!(f, "version mismatch: expected {}, found {}", expected, found)
            }
            SaveStateError::NoStashDirectory => {
                write!(f, "no HOME or APPDATA to place the save directory in")
            }
        }
    }
}

impl std::error::Error for SaveStateError {}

impl From<io::Error> for SaveStateError {
    fn from(e: io::Error) -> Self {
        SaveStateError::Io(e)
    }
}

impl From<serde_json::Error> for SaveStateError {
    fn from(e: serde_json::Error) -> Self {
        SaveStateError::Serialization(e)
    }
}

/// Resolve (and create) the stash directory for `app_name`
pub fn stash_dir(app_name: &str) -> Result<PathBuf, SaveStateError> {
    let base = if cfg!(windows) {
        let appdata = env::var_os("APPDATA").ok_or(SaveStateError::NoStashDirectory)?;
        PathBuf::from(appdata).join("roaming")
    } else {
        let home = env::var_os("HOME").ok_or(SaveStateError::NoStashDirectory)?;
        PathBuf::from(home).join(".local").join("share")
    };

    let dir = base.join(app_name);
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// A machine snapshot
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveState {
    /// Format version for compatibility checking
    version: u32,

    /// CPU registers
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    pc: u16,
    status: u8,

    /// Work RAM contents (2KB)
    ram: Vec<u8>,
}

impl SaveState {
    /// Capture the current machine state
    pub fn capture(cpu: &Cpu, bus: &Bus) -> Self {
        SaveState {
            version: SAVE_STATE_VERSION,
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            sp: cpu.sp,
            pc: cpu.pc,
            status: cpu.status,
            ram: bus.ram().to_vec(),
        }
    }

    /// Restore a snapshot into the machine
    pub fn restore(&self, cpu: &mut Cpu, bus: &mut Bus) {
        cpu.a = self.a;
        cpu.x = self.x;
        cpu.y = self.y;
        cpu.sp = self.sp;
        cpu.pc = self.pc;
        cpu.status = self.status;
        bus.load_ram(&self.ram);
    }

    /// Write the snapshot into the stash directory
    pub fn save_to_stash(&self, app_name: &str, file_name: &str) -> Result<(), SaveStateError> {
        let path = stash_dir(app_name)?.join(file_name);
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Read a snapshot back from the stash directory
    pub fn load_from_stash(app_name: &str, file_name: &str) -> Result<Self, SaveStateError> {
        let path = stash_dir(app_name)?.join(file_name);
        let json = fs::read_to_string(path)?;
        let state: SaveState = serde_json::from_str(&json)?;
        if state.version != SAVE_STATE_VERSION {
            return Err(SaveStateError::VersionMismatch {
                expected: SAVE_STATE_VERSION,
                found: state.version,
            });
        }
        Ok(state)
    }
}
