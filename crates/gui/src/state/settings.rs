//! Application settings

use serde::{Deserialize, Serialize};

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    En,
    Pl,
}

impl Language {
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Pl => "Polski",
        }
    }

    pub fn all() -> &'static [Language] {
        &[Language::En, Language::Pl]
    }
}

/// UI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Font size in points
    pub font_size: f32,
    #[serde(default)]
    pub language: Language,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            language: Language::En,
        }
    }
}

/// Viewport camera settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewportSettings {
    /// Orbit the camera around the car while idle
    pub auto_rotate: bool,
    /// Orbit speed (1.0 = one turn per minute)
    pub auto_rotate_speed: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            auto_rotate_speed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    pub enabled: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// UI settings
    pub ui: UiSettings,
    /// Viewport settings
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub audio: AudioSettings,
}

impl AppSettings {
    fn settings_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "configurator", "car-configurator")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        Self::settings_path()
            .and_then(|path| std::fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    /// Save settings to file
    pub fn save(&self) {
        let Some(path) = Self::settings_path() else {
            return;
        };
        if let Some(dir) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(dir) {
                tracing::warn!("Failed to create settings directory: {e}");
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    tracing::warn!("Failed to write settings: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize settings: {e}"),
        }
    }
}
