//! Global settings loaded from TOML, following the same OnceLock pattern as
//! the romaji table.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub allowed_keys: String,
    #[serde(default = "default_true")]
    pub clear_pending_on_error: bool,
    #[serde(default = "default_true")]
    pub normalize_katakana: bool,
}

fn default_true() -> bool {
    true
}

impl SessionSettings {
    pub fn allows(&self, key: char) -> bool {
        key.is_ascii() && self.allowed_keys.contains(key)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        settings().session.clone()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    let keys = &s.session.allowed_keys;
    if keys.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "session.allowed_keys".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    if let Some(c) = keys
        .chars()
        .find(|c| !c.is_ascii_graphic() || c.is_ascii_uppercase())
    {
        return Err(SettingsError::InvalidValue {
            field: "session.allowed_keys".to_string(),
            reason: format!("{c:?} is not a lowercase printable ASCII key"),
        });
    }
    Ok(())
}
