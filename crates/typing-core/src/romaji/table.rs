/// Embedded default kana spelling table.
pub const DEFAULT_TOML: &str = include_str!("default_romaji.toml");
