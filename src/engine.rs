use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use typing_core::romaji::{RomajiConfigError, RomajiMatcher};
use typing_core::settings::{parse_settings_toml, SessionSettings, SettingsError};
use typing_session::TypingSession;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("IO error: {path}: {msg}")]
    Io { path: String, msg: String },
    #[error("invalid romaji table: {0}")]
    Romaji(#[from] RomajiConfigError),
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),
}

pub struct TypingEngine {
    matcher: Arc<RomajiMatcher>,
    settings: SessionSettings,
}

impl TypingEngine {
    /// Engine over `matcher` using the global `[session]` settings.
    pub fn new(matcher: Arc<RomajiMatcher>) -> Self {
        Self::with_settings(matcher, SessionSettings::default())
    }

    pub fn with_settings(matcher: Arc<RomajiMatcher>, settings: SessionSettings) -> Self {
        Self { matcher, settings }
    }

    /// Engine over the process-wide matcher and settings.
    pub fn from_global() -> Self {
        Self::new(RomajiMatcher::global())
    }

    /// Engine built from TOML files without touching the global singletons.
    /// A `None` path falls back to the global configuration.
    pub fn from_files(
        romaji_path: Option<&Path>,
        settings_path: Option<&Path>,
    ) -> Result<Self, EngineError> {
        let matcher = match romaji_path {
            Some(path) => Arc::new(RomajiMatcher::from_toml(&read_file(path)?)?),
            None => RomajiMatcher::global(),
        };
        let settings = match settings_path {
            Some(path) => parse_settings_toml(&read_file(path)?)?.session,
            None => SessionSettings::default(),
        };
        debug!(
            kana = matcher.table().len(),
            custom_romaji = romaji_path.is_some(),
            custom_settings = settings_path.is_some(),
            "engine loaded"
        );
        Ok(Self::with_settings(matcher, settings))
    }

    pub fn matcher(&self) -> &Arc<RomajiMatcher> {
        &self.matcher
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn create_session(&self) -> TypingSession {
        TypingSession::with_settings(Arc::clone(&self.matcher), self.settings.clone())
    }
}

fn read_file(path: &Path) -> Result<String, EngineError> {
    std::fs::read_to_string(path).map_err(|e| EngineError::Io {
        path: path.display().to_string(),
        msg: e.to_string(),
    })
}
