use workbench_layout::LayoutSettings;
use workbench_layout::settings::SETTINGS_VERSION;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the config directory path
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("workbench")
}

pub fn get_settings_path() -> PathBuf {
    get_config_dir().join("settings.json")
}

/// Load layout settings, falling back to defaults on any problem.
pub fn load_settings(path: &Path) -> LayoutSettings {
    if !path.exists() {
        log::info!("Settings file not found at {}, using defaults", path.display());
        return LayoutSettings::default();
    }

    match read_settings(path) {
        Ok(settings) => migrate_settings(settings),
        Err(e) => {
            log::warn!("{:#}, using default settings", e);
            LayoutSettings::default()
        }
    }
}

fn read_settings(path: &Path) -> Result<LayoutSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}

fn migrate_settings(mut settings: LayoutSettings) -> LayoutSettings {
    if settings.version < SETTINGS_VERSION {
        log::info!("Migrating settings from version {} to {}", settings.version, SETTINGS_VERSION);
        settings.version = SETTINGS_VERSION;
    }
    settings
}

/// Write settings as pretty JSON, creating the config directory if needed.
pub fn save_settings(path: &Path, settings: &LayoutSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, content)?;
    Ok(())
}
