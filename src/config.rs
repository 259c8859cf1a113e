//! Configuration loader plus strongly typed settings structures.
//!
//! The config lives in `~/.bitboard/config.toml` (or under `BITBOARD_DIR`).
//! A commented default is embedded at compile time and extracted on first run,
//! so a missing file is never an error.

use crate::data::{DisplayMode, GridSize};
use anyhow::{bail, Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "BITBOARD_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

/// Initial board state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// "8-bit" .. "128-bit"
    #[serde(default = "default_width")]
    pub width: String,
    #[serde(default)]
    pub display: DisplayMode,
}

/// Control panel sizing and loop pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_frame_interval")]
    pub frame_interval_ms: u64,
    /// 0 = derive from terminal width
    #[serde(default)]
    pub button_width: u16,
    /// 0 = derive from terminal height
    #[serde(default)]
    pub button_height: u16,
    #[serde(default = "default_padding")]
    pub padding: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_cell")]
    pub cell: String,
    #[serde(default = "default_palette")]
    pub palette: Vec<String>,
}

fn default_width() -> String {
    "64-bit".to_string()
}

fn default_frame_interval() -> u64 {
    16
}

fn default_padding() -> u16 {
    1
}

fn default_background() -> String {
    "#000000".to_string()
}

fn default_cell() -> String {
    "#ffffff".to_string()
}

fn default_palette() -> Vec<String> {
    vec!["#ffffff".to_string()]
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            display: DisplayMode::default(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval(),
            button_width: 0,
            button_height: 0,
            padding: default_padding(),
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            cell: default_cell(),
            palette: default_palette(),
        }
    }
}

/// Convert ratatui Color to hex string
pub fn color_to_hex(color: &Color) -> String {
    match color {
        Color::Rgb(r, g, b) => format!("#{:02x}{:02x}{:02x}", r, g, b),
        _ => "#ffffff".to_string(), // Default to white for non-RGB colors
    }
}

/// Convert hex string to ratatui Color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

impl Config {
    /// Parse config text without touching the filesystem
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// The embedded default config
    #[cfg(test)]
    pub fn embedded_default() -> Result<Self> {
        Self::from_toml(DEFAULT_CONFIG)
    }

    /// Load `config.toml` from the data directory, extracting the default first
    pub fn load() -> Result<Self> {
        Self::extract_defaults()?;
        let config_path = Self::config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load config from a custom file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&contents).context(format!("Invalid config file: {:?}", path))?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Reject values the UI cannot use
    pub fn validate(&self) -> Result<()> {
        self.board_width()?;
        if hex_to_color(&self.colors.background).is_none() {
            bail!("Invalid background color '{}'", self.colors.background);
        }
        if hex_to_color(&self.colors.cell).is_none() {
            bail!("Invalid cell color '{}'", self.colors.cell);
        }
        for color in &self.colors.palette {
            if hex_to_color(color).is_none() {
                bail!("Invalid palette color '{}'", color);
            }
        }
        if self.ui.frame_interval_ms == 0 {
            tracing::warn!("frame_interval_ms = 0 busy-polls the terminal");
        }
        Ok(())
    }

    pub fn board_width(&self) -> Result<GridSize> {
        self.board.width.parse()
    }

    pub fn background_color(&self) -> Color {
        hex_to_color(&self.colors.background).unwrap_or(Color::Black)
    }

    pub fn cell_color(&self) -> Color {
        hex_to_color(&self.colors.cell).unwrap_or(Color::White)
    }

    /// Button colors in assignment order (never empty)
    pub fn palette(&self) -> Vec<Color> {
        let colors: Vec<Color> = self
            .colors
            .palette
            .iter()
            .filter_map(|hex| hex_to_color(hex))
            .collect();
        if colors.is_empty() {
            vec![Color::White]
        } else {
            colors
        }
    }

    /// Write the embedded default config if none exists yet (idempotent)
    fn extract_defaults() -> Result<()> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            return Ok(());
        }
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create config directory {:?}", parent))?;
        }
        fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write default config.toml")?;
        tracing::info!("Extracted default config to {:?}", config_path);
        Ok(())
    }

    /// Expose base directory path (~/.bitboard) for logging
    pub fn base_dir() -> Result<PathBuf> {
        Self::config_dir()
    }

    /// Get the base bitboard directory (~/.bitboard/)
    /// Can be overridden with BITBOARD_DIR environment variable
    fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".bitboard"))
    }

    /// Get path to config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_is_valid() {
        let config = Config::embedded_default().expect("default config parses");
        assert_eq!(config.board_width().unwrap(), GridSize::Bits64);
        assert_eq!(config.board.display, DisplayMode::Hex);
        assert_eq!(config.ui.frame_interval_ms, 16);
        assert_eq!(config.ui.padding, 1);
        assert_eq!(config.background_color(), Color::Rgb(0, 0, 0));
        assert_eq!(config.cell_color(), Color::Rgb(255, 255, 255));
        assert_eq!(config.palette().len(), 7);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.board.width, "64-bit");
        assert_eq!(config.ui.button_width, 0);
        assert_eq!(config.palette(), vec![Color::Rgb(255, 255, 255)]);
    }

    #[test]
    fn test_partial_board_section() {
        let config = Config::from_toml("[board]\nwidth = \"128-bit\"\ndisplay = \"binary\"\n").unwrap();
        assert_eq!(config.board_width().unwrap(), GridSize::Bits128);
        assert_eq!(config.board.display, DisplayMode::Binary);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(Config::from_toml("[board]\nwidth = \"12-bit\"\n").is_err());
        assert!(Config::from_toml("[board]\ndisplay = \"octal\"\n").is_err());
        assert!(Config::from_toml("[colors]\ncell = \"white\"\n").is_err());
        assert!(Config::from_toml("[colors]\npalette = [\"#12345\"]\n").is_err());
    }

    #[test]
    fn test_hex_color_round_trip() {
        assert_eq!(hex_to_color("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(hex_to_color("00ff00"), Some(Color::Rgb(0, 255, 0)));
        assert_eq!(hex_to_color("#fff"), None);
        assert_eq!(hex_to_color("#gg0000"), None);
        assert_eq!(color_to_hex(&Color::Rgb(1, 2, 3)), "#010203");
        assert_eq!(color_to_hex(&Color::Red), "#ffffff");
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = Config::embedded_default().unwrap();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.board.width, config.board.width);
        assert_eq!(back.colors.palette, config.colors.palette);
    }

    #[test]
    fn test_load_from_path_reports_file() {
        let dir = std::env::temp_dir().join(format!("bitboard-config-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let good = dir.join("good.toml");
        let bad = dir.join("bad.toml");
        fs::write(&good, "[board]\nwidth = \"16-bit\"\n").unwrap();
        fs::write(&bad, "[board]\nwidth = \"7-bit\"\n").unwrap();

        assert_eq!(Config::load_from_path(&good).unwrap().board_width().unwrap(), GridSize::Bits16);
        let err = format!("{:#}", Config::load_from_path(&bad).unwrap_err());
        assert!(err.contains("bad.toml"), "{}", err);
        assert!(err.contains("7-bit"), "{}", err);

        fs::remove_dir_all(&dir).unwrap();
    }
}
