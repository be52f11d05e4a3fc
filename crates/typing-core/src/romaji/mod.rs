//! Romaji-to-kana matching against a known kana target.
//!
//! A trie built from the kana spelling table answers "does this input
//! complete / still lead to this kana", and a thin rule layer handles sokuon
//! (っ) and hatsuon (ん), whose romaji overlaps the next kana.

mod config;
mod matcher;
mod rules;
mod table;
mod trie;


pub use config::{parse_kana_toml, KanaId, KanaTable, RomajiConfigError, MAX_KANA_UNIT_CHARS};
pub use matcher::{MatchResult, RomajiMatcher};
pub use trie::RomajiTrie;

/// Returns the embedded default spelling table TOML.
pub fn default_toml() -> &'static str {
    table::DEFAULT_TOML
}
