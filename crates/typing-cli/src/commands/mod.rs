pub mod config_ops;
pub mod match_ops;
pub mod session_ops;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Error reading {path}: {msg}")]
    Read { path: String, msg: String },
    #[error("Error: {0}")]
    Engine(#[from] kana_typing::EngineError),
    #[error("Error: {0}")]
    Romaji(#[from] kana_typing::RomajiConfigError),
    #[error("Error: {0}")]
    Settings(#[from] kana_typing::SettingsError),
    #[error("Error: no spellings for {0:?}")]
    UnknownKana(String),
}

pub(crate) fn read_file(path: &str) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::Read {
        path: path.to_string(),
        msg: e.to_string(),
    })
}
