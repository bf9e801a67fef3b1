use std::fs;
use std::path::PathBuf;

use palettehub_theme::{EngineConfig, ForegroundStrategy, Mode, Preset, DEFAULT_SLOT_LIMIT};
use serde::{Deserialize, Serialize};
use tracing::Level;

const APP_NAME: &str = "palettehub";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "off" | "none" => LogLevel::Off,
            "error" => LogLevel::Error,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Warn,
        }
    }

    pub fn as_tracing_level(&self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub log_level: LogLevel,
    pub log_to_file: bool,
    pub default_mode: Mode,
    pub slot_limit: usize,
    pub foreground: ForegroundStrategy,
    pub preset: Preset,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            log_to_file: false,
            default_mode: Mode::Accent,
            slot_limit: DEFAULT_SLOT_LIMIT,
            foreground: ForegroundStrategy::PreferPalette,
            preset: Preset::System,
        }
    }
}

pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join(APP_NAME)
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_NAME)
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

pub fn palettes_dir() -> PathBuf {
    config_dir().join("palettes")
}

pub fn state_path() -> PathBuf {
    data_dir().join("active-theme.json")
}

pub fn log_dir() -> PathBuf {
    data_dir().join("logs")
}

pub fn ensure_dirs() -> std::io::Result<()> {
    fs::create_dir_all(config_dir())?;
    fs::create_dir_all(data_dir())?;
    Ok(())
}

impl UserConfig {
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => Self::parse(&content),
            Err(_) => Self::default(),
        }
    }

    /// Unparsable content falls back to defaults.
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let _ = ensure_dirs();
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        fs::write(config_path(), content)
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            slot_limit: self.slot_limit,
            foreground: self.foreground,
        }
    }
}
