use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// Longest kana unit (in chars) a table key may have.
pub const MAX_KANA_UNIT_CHARS: usize = 2;

#[derive(Deserialize)]
struct RomajiConfig {
    spellings: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum RomajiConfigError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[spellings] table is empty")]
    Empty,
    #[error("kana key must be 1 or 2 characters: {0:?}")]
    InvalidKana(String),
    #[error("no spellings for kana: {0}")]
    NoSpellings(String),
    #[error("invalid spelling {spelling:?} for kana {kana}")]
    InvalidSpelling { kana: String, spelling: String },
    #[error("duplicate spelling {spelling:?} for kana {kana}")]
    DuplicateSpelling { kana: String, spelling: String },
    #[error("romaji table already initialized")]
    AlreadyInitialized,
}

/// Dense index of a kana unit inside a [`KanaTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KanaId(u16);

impl KanaId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Immutable kana → romaji spellings table.
#[derive(Debug, Clone)]
pub struct KanaTable {
    entries: Vec<(String, Vec<String>)>,
    ids: HashMap<String, KanaId>,
}

impl KanaTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn id(&self, kana: &str) -> Option<KanaId> {
        self.ids.get(kana).copied()
    }

    pub fn kana(&self, id: KanaId) -> &str {
        &self.entries[id.index()].0
    }

    /// Spellings accepted for `kana`, or an empty slice for unknown kana.
    pub fn spellings(&self, kana: &str) -> &[String] {
        self.id(kana).map_or(&[], |id| self.spellings_of(id))
    }

    pub fn spellings_of(&self, id: KanaId) -> &[String] {
        &self.entries[id.index()].1
    }

    /// Iterate `(id, kana, spellings)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (KanaId, &str, &[String])> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (kana, romaji))| (KanaId(i as u16), kana.as_str(), romaji.as_slice()))
    }

    /// Total number of (kana, spelling) pairs.
    pub fn spelling_count(&self) -> usize {
        self.entries.iter().map(|(_, r)| r.len()).sum()
    }
}

fn is_valid_spelling(romaji: &str) -> bool {
    !romaji.is_empty()
        && romaji
            .bytes()
            .all(|b| b.is_ascii_graphic() && !b.is_ascii_uppercase())
}

/// Parse TOML text into a validated [`KanaTable`].
pub fn parse_kana_toml(toml_str: &str) -> Result<KanaTable, RomajiConfigError> {
    let config: RomajiConfig =
        toml::from_str(toml_str).map_err(|e| RomajiConfigError::Parse(e.to_string()))?;

    if config.spellings.is_empty() {
        return Err(RomajiConfigError::Empty);
    }
    if config.spellings.len() > u16::MAX as usize {
        return Err(RomajiConfigError::Parse(format!(
            "too many kana entries: {}",
            config.spellings.len()
        )));
    }

    let mut entries = Vec::with_capacity(config.spellings.len());
    let mut ids = HashMap::with_capacity(config.spellings.len());

    for (kana, romaji) in config.spellings {
        let chars = kana.chars().count();
        if chars == 0 || chars > MAX_KANA_UNIT_CHARS {
            return Err(RomajiConfigError::InvalidKana(kana));
        }
        if romaji.is_empty() {
            return Err(RomajiConfigError::NoSpellings(kana));
        }
        for (i, spelling) in romaji.iter().enumerate() {
            if !is_valid_spelling(spelling) {
                return Err(RomajiConfigError::InvalidSpelling {
                    kana,
                    spelling: spelling.clone(),
                });
            }
            if romaji[..i].contains(spelling) {
                return Err(RomajiConfigError::DuplicateSpelling {
                    kana,
                    spelling: spelling.clone(),
                });
            }
        }
        ids.insert(kana.clone(), KanaId(entries.len() as u16));
        entries.push((kana, romaji));
    }

    Ok(KanaTable { entries, ids })
}
