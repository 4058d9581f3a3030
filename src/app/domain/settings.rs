use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::controllers::buffer::{BufferPolicy, DEFAULT_PLACEHOLDER};
use crate::app::controllers::preview::PreviewSettings;
use crate::app::infrastructure::error::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_line_numbers")]
    pub line_numbers_enabled: bool,

    #[serde(default = "default_word_wrap")]
    pub word_wrap_enabled: bool,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// Line written below the boilerplate when there is no user content
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    #[serde(default = "default_trim_leading_blank_lines")]
    pub trim_leading_blank_lines: bool,

    #[serde(default = "default_min_scale")]
    pub min_scale: f64,

    #[serde(default = "default_max_scale")]
    pub max_scale: f64,

    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,

    #[serde(default = "default_container_padding")]
    pub container_padding: f64,

    /// Reload interval for preview pages opened in the browser, 0 disables
    #[serde(default = "default_auto_refresh_secs")]
    pub auto_refresh_secs: u32,
}

fn default_line_numbers() -> bool {
    true
}

fn default_word_wrap() -> bool {
    true
}

fn default_font_size() -> u32 {
    14
}

fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

fn default_trim_leading_blank_lines() -> bool {
    true
}

fn default_min_scale() -> f64 {
    0.2
}

fn default_max_scale() -> f64 {
    2.0
}

fn default_zoom_step() -> f64 {
    0.1
}

fn default_container_padding() -> f64 {
    32.0
}

fn default_auto_refresh_secs() -> u32 {
    2
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            line_numbers_enabled: default_line_numbers(),
            word_wrap_enabled: default_word_wrap(),
            font_size: default_font_size(),
            placeholder: default_placeholder(),
            trim_leading_blank_lines: default_trim_leading_blank_lines(),
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            zoom_step: default_zoom_step(),
            container_padding: default_container_padding(),
            auto_refresh_secs: default_auto_refresh_secs(),
        }
    }
}

impl AppSettings {
    pub fn buffer_policy(&self) -> BufferPolicy {
        let placeholder = if self.placeholder.contains('\n') || self.placeholder.trim().is_empty() {
            default_placeholder()
        } else {
            self.placeholder.clone()
        };
        BufferPolicy {
            placeholder,
            trim_leading_blank_lines: self.trim_leading_blank_lines,
        }
    }

    /// Preview bounds, repaired if the file holds an inverted or non-positive range.
    pub fn preview_settings(&self) -> PreviewSettings {
        let defaults = PreviewSettings::default();
        let valid = self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite();
        let (min_scale, max_scale) = if valid {
            (self.min_scale, self.max_scale)
        } else {
            (defaults.min_scale, defaults.max_scale)
        };
        PreviewSettings {
            min_scale,
            max_scale,
            zoom_step: if self.zoom_step > 0.0 { self.zoom_step } else { defaults.zoom_step },
            container_padding: self.container_padding.max(0.0),
        }
    }

    /// Load settings from disk, or create default if not exists
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(config_path: &Path) -> Self {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to parse settings, using defaults");
                    Self::default()
                }
            },
            Err(_) => {
                // File doesn't exist, use defaults
                let default = Self::default();
                // Try to save defaults for next time
                let _ = default.save_to(config_path);
                default
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), AppError> {
        // Ensure parent directory exists
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(config_path, json)?;

        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("pagepad");
        path.push("settings.json");
        path
    }
}
