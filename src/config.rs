//! Settings file support.
//!
//! Settings live in `<home>/.bamboo-flight/settings.toml`. Every section and field is optional;
//! anything missing takes its default value.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the per-user data directory under the home directory.
pub const DATA_DIR_NAME: &str = ".bamboo-flight";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub controls: ControlSettings,
    pub paths: PathSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Initial window size as a multiple of the logical screen.
    pub scale: u32,
    pub fullscreen: bool,
    pub vsync: bool,
}

/// Key names for each action. Named keys use winit's names ("Space", "F11", "ArrowUp"),
/// anything else must be a single character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlSettings {
    pub confirm: String,
    pub boost: String,
    pub pause: String,
    pub exit: String,
    pub toggle_fullscreen: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub assets: PathBuf,
    /// Where the high score is kept. Defaults to the per-user data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_dir: Option<PathBuf>,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scale: 3,
            fullscreen: false,
            vsync: true,
        }
    }
}

impl DisplaySettings {
    /// Scale clamped to a usable range.
    pub fn effective_scale(&self) -> u32 {
        self.scale.clamp(1, 8)
    }
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            confirm: "Space".to_owned(),
            boost: "Space".to_owned(),
            pause: "Enter".to_owned(),
            exit: "Escape".to_owned(),
            toggle_fullscreen: "F11".to_owned(),
        }
    }
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            assets: PathBuf::from("assets"),
            save_dir: None,
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file gives defaults silently; an unreadable or
    /// malformed file gives defaults with a warning.
    pub fn load(path: &Path) -> Self {
        let data = match std::fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Failed to read settings {}: {e}", path.display());
                } else {
                    log::debug!("No settings at {}, using defaults", path.display());
                }
                return Self::default();
            }
        };

        match Self::from_toml(&data) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Parse error in {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn from_toml(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(data)
    }

    /// Default settings as commented TOML, for `--print-config`.
    pub fn default_toml() -> String {
        let body = toml::to_string_pretty(&Self::default()).unwrap_or_default();
        format!(
            "# {}\n# save_dir defaults to {}\n\n{body}",
            default_path().display(),
            data_dir().display()
        )
    }

    /// Directory for the high score file.
    pub fn save_dir(&self) -> PathBuf {
        self.paths.save_dir.clone().unwrap_or_else(data_dir)
    }
}

/// The user's home directory, or the working directory if none is set.
pub fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Per-user data directory holding settings and the high score.
pub fn data_dir() -> PathBuf {
    home_dir().join(DATA_DIR_NAME)
}

pub fn default_path() -> PathBuf {
    data_dir().join("settings.toml")
}
