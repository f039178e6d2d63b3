// Configuration management
//
// Emulator settings persisted as TOML next to the binary; a missing or
// unreadable file falls back to defaults and writes them out.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Default configuration file path
const CONFIG_FILE: &str = "dotnes.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Audio settings
    pub audio: AudioConfig,

    /// Application name, used for the save-stash directory
    pub app_name: String,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Window scale (1-8)
    pub scale: u32,

    /// Enable VSync
    pub vsync: bool,
}

/// Audio configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Enable audio output
    pub enabled: bool,

    /// Volume (0.0-1.0)
    pub volume: f32,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig {
                scale: 3,
                vsync: true,
            },
            audio: AudioConfig {
                enabled: true,
                volume: 1.0,
            },
            app_name: "dotnes".to_string(),
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration, or fall back to defaults
    ///
    /// A missing file is normal on first launch: the defaults are
    /// written out so the user has something to edit.
    pub fn load_or_default() -> Self {
        Self::load(CONFIG_FILE).unwrap_or_else(|_| {
            let config = Self::default();
            let _ = config.save(CONFIG_FILE);
            config
        })
    }

    /// Load the configuration from a specific path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Save the configuration to a specific path
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), io::Error> {
        let text = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = EmulatorConfig::default();
        assert_eq!(config.video.scale, 3);
        assert!(config.video.vsync);
        assert!(config.audio.enabled);
        assert_eq!(config.app_name, "dotnes");
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = EmulatorConfig::default();
        config.video.scale = 2;
        config.audio.volume = 0.25;

        let dir = std::env::temp_dir().join("dotnes-config-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");

        config.save(&path).unwrap();
        let loaded = EmulatorConfig::load(&path).unwrap();
        assert_eq!(loaded.video.scale, 2);
        assert_eq!(loaded.audio.volume, 0.25);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(EmulatorConfig::load("definitely-not-here.toml").is_err());
    }
}
