//! Settings storage
//!
//! Manages persistence of user preferences: OCR credentials, the chat
//! endpoint, and window behavior.

use crate::storage::{get_config_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default chat-completion endpoint
pub const DEFAULT_GPT_API_URL: &str = "https://free.v36.cm/v1/chat/completions";

/// Default chat model
pub const DEFAULT_GPT_MODEL: &str = "gpt-3.5-turbo";

/// Baidu OCR credentials
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrSettings {
    /// API key from the Baidu AI console
    #[serde(default)]
    pub api_key: String,
    /// Secret key from the Baidu AI console
    #[serde(default)]
    pub secret_key: String,
}

impl OcrSettings {
    /// True when both credentials are filled in
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.secret_key.trim().is_empty()
    }
}

/// Chat endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GptSettings {
    /// Chat-completion endpoint URL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Bearer token for the endpoint
    #[serde(default)]
    pub api_key: String,
    /// Model name sent in the request body
    #[serde(default = "default_model")]
    pub model: String,
}

fn default_api_url() -> String {
    DEFAULT_GPT_API_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_GPT_MODEL.to_string()
}

impl Default for GptSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            model: default_model(),
        }
    }
}

/// Window behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Keep the main window above all others
    #[serde(default)]
    pub topmost: bool,
}

/// Application settings
///
/// The field names are the on-disk JSON section names, so older config
/// files written without the `window` section still load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    /// Baidu OCR credentials
    #[serde(default)]
    pub baidu_ocr: OcrSettings,
    /// Chat endpoint configuration
    #[serde(default)]
    pub gpt: GptSettings,
    /// Window behavior
    #[serde(default)]
    pub window: WindowSettings,
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Trims stray whitespace and falls back to defaults for blank
    /// endpoint fields.
    pub fn validate(&mut self) {
        self.baidu_ocr.api_key = self.baidu_ocr.api_key.trim().to_string();
        self.baidu_ocr.secret_key = self.baidu_ocr.secret_key.trim().to_string();
        self.gpt.api_url = self.gpt.api_url.trim().to_string();
        self.gpt.api_key = self.gpt.api_key.trim().to_string();
        self.gpt.model = self.gpt.model.trim().to_string();

        if self.gpt.api_url.is_empty() {
            self.gpt.api_url = DEFAULT_GPT_API_URL.to_string();
        }

        if self.gpt.model.is_empty() {
            self.gpt.model = DEFAULT_GPT_MODEL.to_string();
        }
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_config_dir()?.join("config.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file doesn't exist or is corrupted
pub fn load_settings() -> AppSettings {
    match get_settings_path().and_then(|path| load_settings_from(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

/// Internal settings loading with error propagation
fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, using defaults");
        return Ok(AppSettings::default());
    }

    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;

    // Validate loaded settings
    settings.validate();

    tracing::debug!("Loaded settings from disk");
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    let path = get_settings_path()?;
    save_settings_to(&path, settings)
}

fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), StorageError> {
    // Ensure the parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to disk");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.gpt.api_url, DEFAULT_GPT_API_URL);
        assert_eq!(settings.gpt.model, DEFAULT_GPT_MODEL);
        assert!(settings.gpt.api_key.is_empty());
        assert!(!settings.window.topmost);
        assert!(!settings.baidu_ocr.is_configured());
    }

    #[test]
    fn test_ocr_configured_requires_both_keys() {
        let mut ocr = OcrSettings::default();
        assert!(!ocr.is_configured());

        ocr.api_key = "key".to_string();
        assert!(!ocr.is_configured());

        ocr.secret_key = "secret".to_string();
        assert!(ocr.is_configured());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = AppSettings::default();

        // Blank endpoint fields fall back to defaults
        settings.gpt.api_url = "   ".to_string();
        settings.gpt.model = String::new();
        settings.validate();
        assert_eq!(settings.gpt.api_url, DEFAULT_GPT_API_URL);
        assert_eq!(settings.gpt.model, DEFAULT_GPT_MODEL);

        // Stray whitespace is trimmed
        settings.baidu_ocr.api_key = "  abc  ".to_string();
        settings.gpt.api_key = " sk-1 ".to_string();
        settings.validate();
        assert_eq!(settings.baidu_ocr.api_key, "abc");
        assert_eq!(settings.gpt.api_key, "sk-1");
    }

    #[test]
    fn test_settings_serialization() {
        let mut settings = AppSettings::default();
        settings.baidu_ocr.api_key = "ak".to_string();
        settings.baidu_ocr.secret_key = "sk".to_string();
        settings.gpt.api_key = "token".to_string();
        settings.window.topmost = true;

        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: AppSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings.baidu_ocr.api_key, deserialized.baidu_ocr.api_key);
        assert_eq!(
            settings.baidu_ocr.secret_key,
            deserialized.baidu_ocr.secret_key
        );
        assert_eq!(settings.gpt.api_key, deserialized.gpt.api_key);
        assert_eq!(settings.window.topmost, deserialized.window.topmost);
    }

    #[test]
    fn test_settings_json_sections() {
        let settings = AppSettings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["baidu_ocr"]["api_key"].is_string());
        assert!(value["baidu_ocr"]["secret_key"].is_string());
        assert!(value["gpt"]["api_url"].is_string());
        assert!(value["gpt"]["api_key"].is_string());
        assert!(value["gpt"]["model"].is_string());
        assert!(value["window"]["topmost"].is_boolean());
    }

    #[test]
    fn test_partial_config_loads_with_defaults() {
        // Older builds wrote no `window` section and no model field
        let json = r#"{
            "baidu_ocr": { "api_key": "ak", "secret_key": "sk" },
            "gpt": { "api_url": "https://example.com/v1/chat/completions", "api_key": "token" }
        }"#;

        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.baidu_ocr.api_key, "ak");
        assert_eq!(settings.gpt.model, DEFAULT_GPT_MODEL);
        assert!(!settings.window.topmost);
    }

    #[test]
    fn test_settings_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut settings = AppSettings::default();
        settings.baidu_ocr.api_key = "ak".to_string();
        settings.baidu_ocr.secret_key = "sk".to_string();
        settings.gpt.api_url = "https://example.com/v1/chat/completions".to_string();
        settings.gpt.api_key = "token".to_string();
        settings.gpt.model = "gpt-4o-mini".to_string();
        settings.window.topmost = true;

        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();

        assert_eq!(loaded.baidu_ocr.api_key, "ak");
        assert_eq!(loaded.baidu_ocr.secret_key, "sk");
        assert_eq!(loaded.gpt.api_url, "https://example.com/v1/chat/completions");
        assert_eq!(loaded.gpt.api_key, "token");
        assert_eq!(loaded.gpt.model, "gpt-4o-mini");
        assert!(loaded.window.topmost);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("does-not-exist.json");

        let loaded = load_settings_from(&path).unwrap();
        assert_eq!(loaded.gpt.api_url, DEFAULT_GPT_API_URL);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(load_settings_from(&path).is_err());
    }
}
