//! Configuration management for forestay.
//!
//! Configuration is read from `~/.config/forestay/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app::{ForestayError, Result as AppResult};
use crate::domain::{default_accommodations, Accommodation};

pub const GUIDE_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub relay: RelayConfig,
    pub guide: GuideConfig,
    pub accommodations: Vec<Accommodation>,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay: RelayConfig::default(),
            guide: GuideConfig::default(),
            accommodations: default_accommodations(),
            colors: ColorConfig::default(),
            keybindings: KeybindingConfig::default(),
        }
    }
}

/// How calendar feeds are reached.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Route requests through `endpoint`; when false, fetch feeds directly.
    pub enabled: bool,
    /// Prefix the percent-encoded feed URL is appended to.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://corsproxy.io/?".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Settings for the local guide.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Empty means "read `GEMINI_API_KEY`".
    pub api_key: String,
    pub api_url: String,
    pub model: String,
    pub temperature: f32,
    pub system_instruction: String,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            system_instruction: "You are 'Fritz', a friendly local guide for the Black Forest. \
You help families with children find great hiking trails and activities. \
Answer briefly and warmly, in at most 2-3 sentences."
                .to_string(),
        }
    }
}

impl GuideConfig {
    /// The configured key, falling back to the environment.
    pub fn resolved_api_key(&self) -> Option<String> {
        let key = self.api_key.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }
        std::env::var(GUIDE_API_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from `path`, creating it with defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Get the default config file path: `~/.config/forestay/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("forestay").join("config.toml"))
    }

    pub fn accommodation(&self, id: &str) -> AppResult<&Accommodation> {
        self.accommodations
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| ForestayError::AccommodationNotFound(id.to_string()))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# forestay configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "1"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[relay]
# Feed hosts often refuse cross-origin reads, so requests go through a relay
# that returns the upstream body unchanged. Set enabled = false to fetch directly.
enabled = true
endpoint = "https://corsproxy.io/?"
timeout_secs = 10

[guide]
# Leave empty to read the GEMINI_API_KEY environment variable.
api_key = ""
api_url = "https://generativelanguage.googleapis.com/v1beta"
model = "gemini-2.5-flash"
temperature = 0.7

[[accommodations]]
id = "1"
title = 'Waldhaus "Fuchsbau"'
kind = "house"
guests = 6
bedrooms = 3
price = 145
rating = 4.9
features = ["Fireplace", "Sauna", "Forest edge"]
feeds = [
    "https://www.airbnb.com/calendar/ical/1345608403986703089.ics?s=ec334041650d51a74b6320bad50d39fe&locale=de",
]

[[accommodations]]
id = "2"
title = 'Apartment "Tannenzapfen"'
kind = "apartment"
guests = 4
bedrooms = 2
price = 95
rating = 4.8
features = ["Balcony", "WiFi", "Kid friendly"]
feeds = [
    "https://www.airbnb.com/calendar/ical/947626755793190991.ics?s=3395a9b3a16d5e736b454360ff356602&locale=de",
]

[colors]
border = "Green"
header = "White"
weekday = "DarkGray"
free_day = "White"
booked_day = "LightRed"
past_day = "DarkGray"
today = "Yellow"
selection_bg = "Green"
selection_fg = "Black"
range_bg = "DarkGray"
cursor_bg = "Blue"
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_left = ["h", "Left"]
move_right = ["l", "Right"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_month = ["n", "PageDown"]
prev_month = ["p", "PageUp"]
next_accommodation = ["Tab"]
prev_accommodation = ["BackTab", "Shift+Tab"]
select = ["Enter", "Space"]
clear_selection = ["Esc", "c"]
book = ["b"]
reload = ["R"]
today = ["t"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
