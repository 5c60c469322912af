//! Configuration file handling for ascii-poster.
//!
//! Loads configuration from `~/.config/ascii-poster/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::render::{ImageRole, RenderConfig, LISTING_WIDTH};

/// Configuration file structure for ascii-poster.
/// Loaded from ~/.config/ascii-poster/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ascii: AsciiConfig,
}

/// `[ascii]` section. Unset fields fall back to built-in defaults.
#[derive(Debug, Deserialize, Default)]
pub struct AsciiConfig {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub colored: Option<bool>,
    #[serde(default)]
    pub role: Option<ImageRole>,
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the default path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_path();
        if path.exists() {
            Self::load_from_explicit(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a path that must exist.
    pub fn load_from_explicit(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
            path: path.clone(),
            source: e,
        })?;
        Self::parse(&content, &path)
    }

    /// Parse configuration text; `path` is only used in error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Render options from this file layered over the built-in defaults.
    pub fn render_config(&self) -> RenderConfig {
        let defaults = RenderConfig::default();
        RenderConfig {
            width: self.ascii.width.unwrap_or(defaults.width),
            height: self.ascii.height.unwrap_or(defaults.height),
            colored: self.ascii.colored.unwrap_or(defaults.colored),
            cache_dir: self.ascii.cache_dir.clone().unwrap_or(defaults.cache_dir),
            role: self.ascii.role.unwrap_or(defaults.role),
        }
    }

    /// Render options for series listings: as [`Config::render_config`],
    /// but an unset width defaults to [`LISTING_WIDTH`].
    pub fn listing_render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.ascii.width.unwrap_or(LISTING_WIDTH),
            ..self.render_config()
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {}", .path.display(), .source)]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {}", .path.display(), .source)]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ascii-poster")
        .join("config.toml")
}

/// Commented default config written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# ascii-poster configuration

[ascii]
# Output size in character cells. Set one of them to 0 to derive it
# from the image aspect ratio. Unset, renders are 8x8 and series
# listings are 30x8.
# width = 8
# height = 8
# ANSI true-color output
colored = true
# Preferred image: poster, banner, fanart
role = "poster"
# Render cache location (default: <temp dir>/sonarr-cli-ascii-cache)
# cache_dir = "/tmp/sonarr-cli-ascii-cache"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("", Path::new("test.toml")).unwrap();
        assert_eq!(config.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_ascii_section_overrides() {
        let config = Config::parse(
            r#"
            [ascii]
            width = 30
            height = 0
            colored = false
            role = "fanart"
            cache_dir = "/var/tmp/posters"
            "#,
            Path::new("test.toml"),
        )
        .unwrap();

        let render = config.render_config();
        assert_eq!(render.width, 30);
        assert_eq!(render.height, 0);
        assert!(!render.colored);
        assert_eq!(render.role, ImageRole::Fanart);
        assert_eq!(render.cache_dir, PathBuf::from("/var/tmp/posters"));
    }

    #[test]
    fn test_default_config_text_parses_to_defaults() {
        let config = Config::parse(DEFAULT_CONFIG, Path::new("default.toml")).unwrap();
        assert_eq!(config.render_config(), RenderConfig::default());
    }

    #[test]
    fn test_parse_error_mentions_path() {
        let err = Config::parse("[ascii]\nwidth = \"wide\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = Config::parse("[ascii]\nrole = \"logo\"", Path::new("x.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_listing_width_defaults_wider() {
        let config = Config::default();
        let listing = config.listing_render_config();
        assert_eq!(listing.width, LISTING_WIDTH);
        assert_eq!(listing.height, RenderConfig::default().height);
        assert_eq!(config.render_config().width, RenderConfig::default().width);
    }

    #[test]
    fn test_listing_width_respects_file() {
        let config = Config::parse("[ascii]\nwidth = 12", Path::new("x.toml")).unwrap();
        assert_eq!(config.listing_render_config().width, 12);
    }

    #[test]
    fn test_role_ignores_case() {
        for (text, expected) in [
            ("Poster", ImageRole::Poster),
            ("BANNER", ImageRole::Banner),
            ("FanArt", ImageRole::Fanart),
        ] {
            let content = format!("[ascii]\nrole = \"{}\"", text);
            let config = Config::parse(&content, Path::new("x.toml")).unwrap();
            assert_eq!(config.render_config().role, expected);
        }
    }

    #[test]
    fn test_load_from_explicit_missing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let err = Config::load_from_explicit(temp_dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError { .. }));
    }

    #[test]
    fn test_default_path_file_name() {
        let path = default_path();
        assert!(path.ends_with("ascii-poster/config.toml"));
    }
}
