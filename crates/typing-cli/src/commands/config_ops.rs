use std::path::Path;

use kana_typing::TypingEngine;
use typing_core::romaji::parse_kana_toml;
use typing_core::settings::parse_settings_toml;

use super::{read_file, CliError};

pub fn romaji_export() -> &'static str {
    typing_core::romaji::default_toml()
}

pub fn romaji_validate(file: &str) -> Result<String, CliError> {
    let content = read_file(file)?;
    let table = parse_kana_toml(&content)?;
    Ok(format!(
        "OK: {} kana, {} spellings",
        table.len(),
        table.spelling_count()
    ))
}

pub fn settings_export() -> &'static str {
    typing_core::settings::default_toml()
}

pub fn settings_validate(file: &str) -> Result<String, CliError> {
    let content = read_file(file)?;
    let s = parse_settings_toml(&content)?;
    Ok(format!(
        "OK: session.allowed_keys={:?}, session.clear_pending_on_error={}, session.normalize_katakana={}",
        s.session.allowed_keys, s.session.clear_pending_on_error, s.session.normalize_katakana
    ))
}

/// Engine for one CLI run. Files given on the command line replace the
/// embedded defaults.
pub fn load_engine(romaji: Option<&str>, settings: Option<&str>) -> Result<TypingEngine, CliError> {
    Ok(TypingEngine::from_files(
        romaji.map(Path::new),
        settings.map(Path::new),
    )?)
}
