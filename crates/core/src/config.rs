use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which display backend feature groups paint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayKind {
    Text,
    Graphic,
}

/// Surface settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    // Fader settings
    pub use_faders_as_knobs: bool,
    pub touch_channel: bool,

    // Value settings
    pub value_upper_bound: u32,
    pub knob_sensitivity: f64,

    // Button settings
    pub long_press_ms: u64,

    // Display settings
    pub display: DisplayKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_faders_as_knobs: false,
            touch_channel: true,
            value_upper_bound: 1024,
            knob_sensitivity: 1.0,
            long_press_ms: 400,
            display: DisplayKind::Graphic,
        }
    }
}

/// Configuration manager for Keystone settings
/// Keeps the schema of available options separate from the persisted values. The file lives in
/// the user's config directory by default
pub struct ConfigManager {
    config_path: PathBuf,
    settings: Settings,
}

/// Available configuration options with validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub faders: FaderConfigSchema,
    pub values: ValueConfigSchema,
    pub buttons: ButtonConfigSchema,
    pub display: DisplayConfigSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaderConfigSchema {
    pub use_faders_as_knobs: ConfigOption<bool>,
    pub touch_channel: ConfigOption<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueConfigSchema {
    pub value_upper_bound: ConfigOption<u32>,
    pub knob_sensitivity: ConfigOption<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ButtonConfigSchema {
    pub long_press_ms: ConfigOption<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfigSchema {
    pub display: ConfigOption<DisplayKind>,
}

/// Configuration option with validation and available choices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOption<T> {
    pub default: T,
    pub valid_range: Option<(T, T)>,
    pub valid_choices: Option<Vec<T>>,
    pub description: String,
    pub requires_restart: bool,
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: Settings,
    pub created_at: String,
    pub modified_at: String,
}

impl ConfigManager {
    /// Create a new configuration manager
    /// If no path is provided, defaults to keystone/config.json in the user's config directory,
    /// or config.json in the current working directory when there is none
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(Self::default_path);

        Self {
            config_path,
            settings: Settings::default(),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("keystone").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Load settings from configuration file
    /// Writes a default file first if none exists
    pub fn load(&mut self) -> Result<Settings, ConfigError> {
        if !self.config_path.exists() {
            self.save()?;
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Config file version {} doesn't match application version {}. Using defaults for new settings.",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        Self::validate_settings(&config_file.settings).map_err(ConfigError::ValidationError)?;

        self.settings = config_file.settings;
        Ok(self.settings.clone())
    }

    /// Save current settings to configuration file
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let created_at = self
            .read_created_at()
            .unwrap_or_else(|| now.clone());

        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings.clone(),
            created_at,
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(&self.config_path, content)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn read_created_at(&self) -> Option<String> {
        let content = fs::read_to_string(&self.config_path).ok()?;
        let config_file: ConfigFile = serde_json::from_str(&content).ok()?;
        Some(config_file.created_at)
    }

    /// Update settings and save to file
    pub fn update_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        Self::validate_settings(&settings).map_err(ConfigError::ValidationError)?;
        self.settings = settings;
        self.save()
    }

    /// Get current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Get configuration file path
    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Get configuration schema with available options
    pub fn schema() -> ConfigSchema {
        let defaults = Settings::default();
        ConfigSchema {
            faders: FaderConfigSchema {
                use_faders_as_knobs: ConfigOption {
                    default: defaults.use_faders_as_knobs,
                    valid_range: None,
                    valid_choices: None,
                    description: "Fader touch is sent to the active mode as knob touch".to_string(),
                    requires_restart: false,
                },
                touch_channel: ConfigOption {
                    default: defaults.touch_channel,
                    valid_range: None,
                    valid_choices: None,
                    description: "Touching a fader selects its track".to_string(),
                    requires_restart: false,
                },
            },
            values: ValueConfigSchema {
                value_upper_bound: ConfigOption {
                    default: defaults.value_upper_bound,
                    valid_range: Some((128, 16384)),
                    valid_choices: None,
                    description: "Resolution of parameter values".to_string(),
                    requires_restart: true,
                },
                knob_sensitivity: ConfigOption {
                    default: defaults.knob_sensitivity,
                    valid_range: Some((0.1, 10.0)),
                    valid_choices: None,
                    description: "Multiplier applied to knob movements".to_string(),
                    requires_restart: false,
                },
            },
            buttons: ButtonConfigSchema {
                long_press_ms: ConfigOption {
                    default: defaults.long_press_ms,
                    valid_range: Some((100, 3000)),
                    valid_choices: None,
                    description: "Hold time in milliseconds before a press counts as long"
                        .to_string(),
                    requires_restart: false,
                },
            },
            display: DisplayConfigSchema {
                display: ConfigOption {
                    default: defaults.display,
                    valid_range: None,
                    valid_choices: Some(vec![DisplayKind::Graphic, DisplayKind::Text]),
                    description: "Display technology of the surface".to_string(),
                    requires_restart: true,
                },
            },
        }
    }

    /// Validate settings against schema
    pub fn validate_settings(settings: &Settings) -> Result<(), Vec<String>> {
        let schema = Self::schema();
        let mut errors = Vec::new();

        if let Some((min, max)) = schema.values.value_upper_bound.valid_range {
            if settings.value_upper_bound < min || settings.value_upper_bound > max {
                errors.push(format!(
                    "value_upper_bound must be between {} and {}",
                    min, max
                ));
            }
        }

        if let Some((min, max)) = schema.values.knob_sensitivity.valid_range {
            if !(min..=max).contains(&settings.knob_sensitivity) {
                errors.push(format!("knob_sensitivity must be between {} and {}", min, max));
            }
        }

        if let Some((min, max)) = schema.buttons.long_press_ms.valid_range {
            if settings.long_press_ms < min || settings.long_press_ms > max {
                errors.push(format!("long_press_ms must be between {} and {}", min, max));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Reset settings to defaults
    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.settings = Settings::default();
        self.save()
    }
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
    #[error("Config validation errors: {}", .0.join(", "))]
    ValidationError(Vec<String>),
}
