//! Configuration loading and defaults

use crate::constants;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub fonts: FontConfig,

    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub locale: LocaleConfig,
}

/// Pixel metrics for the fallback layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_line_height")]
    pub line_height: u32,

    #[serde(default = "default_padding")]
    pub padding: u32,

    #[serde(default = "default_icon_size")]
    pub icon_size: u32,

    #[serde(default = "default_icon_spacing")]
    pub icon_spacing: u32,

    #[serde(default = "default_button_height")]
    pub button_height: u32,

    #[serde(default = "default_button_width")]
    pub button_width: u32,

    #[serde(default = "default_button_spacing")]
    pub button_spacing: u32,

    /// Assumed width of every character
    #[serde(default = "default_glyph_width")]
    pub glyph_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Core font name tried first
    #[serde(default = "default_primary_font")]
    pub primary: String,

    /// Tried once when the primary name does not resolve
    #[serde(default = "default_fallback_font")]
    pub fallback: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// X display name such as ":1"; `$DISPLAY` when unset
    #[serde(default)]
    pub display: Option<String>,

    /// Left edge on the root window (centred when unset)
    #[serde(default)]
    pub x: Option<i16>,

    /// Top edge on the root window (centred when unset)
    #[serde(default)]
    pub y: Option<i16>,

    /// Bypass the window manager entirely; the dialog then takes focus itself
    #[serde(default)]
    pub override_redirect: bool,

    /// Ask the window manager for no title bar or borders
    #[serde(default = "default_true")]
    pub undecorated: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Locale tag such as "pt-BR"; detected from the environment when unset
    #[serde(default)]
    pub tag: Option<String>,
}

// Default value functions
fn default_line_height() -> u32 {
    constants::LINE_HEIGHT
}
fn default_padding() -> u32 {
    constants::PADDING
}
fn default_icon_size() -> u32 {
    constants::ICON_SIZE
}
fn default_icon_spacing() -> u32 {
    constants::ICON_SPACING
}
fn default_button_height() -> u32 {
    constants::BUTTON_HEIGHT
}
fn default_button_width() -> u32 {
    constants::BUTTON_WIDTH
}
fn default_button_spacing() -> u32 {
    constants::BUTTON_SPACING
}
fn default_glyph_width() -> u32 {
    constants::GLYPH_WIDTH
}
fn default_primary_font() -> String {
    constants::PRIMARY_FONT.to_string()
}
fn default_fallback_font() -> String {
    constants::FALLBACK_FONT.to_string()
}
fn default_true() -> bool {
    true
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            line_height: default_line_height(),
            padding: default_padding(),
            icon_size: default_icon_size(),
            icon_spacing: default_icon_spacing(),
            button_height: default_button_height(),
            button_width: default_button_width(),
            button_spacing: default_button_spacing(),
            glyph_width: default_glyph_width(),
        }
    }
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_font(),
            fallback: default_fallback_font(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            display: None,
            x: None,
            y: None,
            override_redirect: false,
            undecorated: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(PathBuf::from).or_else(Self::default_config_path);

        if let Some(ref path) = config_path {
            if path.exists() {
                let contents = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                let config: Config = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                return Ok(config);
            }
        }

        Ok(Config::default())
    }

    /// Get the default config file path
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "native-msgbox")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.layout.line_height, 20);
        assert_eq!(config.layout.padding, 20);
        assert_eq!(config.layout.button_width, 100);
        assert_eq!(config.fonts.fallback, "fixed");
        assert!(config.window.undecorated);
        assert!(!config.window.override_redirect);
        assert!(config.locale.tag.is_none());
        assert!(config.window.display.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let toml_str = r#"
            [layout]
            padding = 12

            [locale]
            tag = "de-DE"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.layout.padding, 12);
        assert_eq!(config.layout.line_height, 20);
        assert_eq!(config.fonts.primary, constants::PRIMARY_FONT);
        assert_eq!(config.locale.tag.as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[window]\ndisplay = \":3\"\nx = 40\ny = 50\noverride_redirect = true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.window.display.as_deref(), Some(":3"));
        assert_eq!(config.window.x, Some(40));
        assert_eq!(config.window.y, Some(50));
        assert!(config.window.override_redirect);
    }

    #[test]
    fn test_load_missing_path_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(&temp.path().join("absent.toml"))).unwrap();
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[layout]\npadding = \"wide\"\n").unwrap();

        let result = Config::load(Some(&path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
