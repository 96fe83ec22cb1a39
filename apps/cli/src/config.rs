//! # Configuration
//!
//! Look and output settings, layered with the `config` crate.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`QUOTEKIT__THEME__CURRENCY_SYMBOL=USD`)
//! 2. Config file: `--config <path>`, or `config.toml` in the platform
//!    config directory when present
//! 3. Defaults (this file)
//!
//! ## Example `config.toml`
//! ```toml
//! [theme]
//! preset = "ocean"
//! primary_color = "#0B4F6C"
//! currency_symbol = "$"
//! decimal_style = "point"
//! logo_path = "/home/shop/logo.png"
//!
//! [document]
//! locale = "es"
//!
//! [export]
//! out_dir = "quotes"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use quotekit_core::{DecimalStyle, Rgb, Theme};
use quotekit_render::{DocumentLabels, Locale};
use serde::{Deserialize, Serialize};

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "QUOTEKIT";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub theme: ThemeSettings,
    pub document: DocumentSettings,
    pub export: ExportSettings,
}

/// `[theme]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Built-in palette to start from (`classic`, `ocean`, `forest`, `rose`).
    pub preset: String,
    /// Overrides the preset's primary color.
    pub primary_color: Option<Rgb>,
    /// Overrides the preset's accent color.
    pub accent_color: Option<Rgb>,
    pub currency_symbol: String,
    pub decimal_style: DecimalStyle,
    pub logo_path: Option<PathBuf>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        ThemeSettings {
            preset: "classic".to_string(),
            primary_color: None,
            accent_color: None,
            currency_symbol: "ARS".to_string(),
            decimal_style: DecimalStyle::Comma,
            logo_path: None,
        }
    }
}

/// `[document]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    pub locale: Locale,
}

/// `[export]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub out_dir: PathBuf,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            out_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Loads configuration from the standard sources.
    ///
    /// An explicit path must exist; the platform default is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match explicit {
            Some(path) => Some((path.to_path_buf(), true)),
            None => default_config_path().map(|path| (path, false)),
        };
        Self::from_sources(file, true)
    }

    /// Builds the configuration from an optional file and, if `with_env`,
    /// the `QUOTEKIT__*` environment.
    pub fn from_sources(file: Option<(PathBuf, bool)>, with_env: bool) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some((path, required)) = file {
            tracing::debug!(path = %path.display(), required, "Reading config file");
            builder = builder.add_source(
                File::from(path.as_path())
                    .format(FileFormat::Toml)
                    .required(required),
            );
        }

        if with_env {
            builder = builder.add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            );
        }

        let config: AppConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if Theme::preset(&self.theme.preset).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "theme.preset".to_string(),
                reason: format!(
                    "unknown preset '{}' (expected one of {})",
                    self.theme.preset,
                    Theme::PRESETS.join(", ")
                ),
            });
        }
        if self.theme.currency_symbol.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "theme.currency_symbol".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The theme handed to the renderers.
    pub fn theme(&self) -> Theme {
        let settings = &self.theme;
        let mut theme = Theme::preset(&settings.preset)
            .unwrap_or_default()
            .with_currency(settings.currency_symbol.trim(), settings.decimal_style);

        if let Some(color) = settings.primary_color {
            theme.primary_color = color;
        }
        if let Some(color) = settings.accent_color {
            theme.accent_color = color;
        }
        if let Some(path) = &settings.logo_path {
            theme = theme.with_logo(path.clone());
        }
        theme
    }

    pub fn labels(&self) -> DocumentLabels {
        DocumentLabels::for_locale(self.document.locale)
    }
}

/// `config.toml` in the platform configuration directory.
///
/// - **Linux**: `~/.config/quotekit/config.toml`
/// - **macOS**: `~/Library/Application Support/com.quotekit.quotekit/config.toml`
/// - **Windows**: `%APPDATA%\quotekit\quotekit\config\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "quotekit", "quotekit").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}
