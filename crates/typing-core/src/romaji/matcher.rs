use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};

use serde::Serialize;
use tracing::debug;

use super::config::{parse_kana_toml, KanaTable, RomajiConfigError};
use super::rules::{
    following_kana, is_consonant, match_hatsuon, match_sokuon, HATSUON, HATSUON_SPELLINGS,
    SOKUON, SOKUON_SPELLINGS,
};
use super::table::DEFAULT_TOML;
use super::trie::RomajiTrie;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// One kana unit consumed from the head of the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub is_match: bool,
    /// Prefix of the input that produced `consumed_target`.
    pub consumed_input: String,
    /// Prefix of the target (one kana unit, 1-2 chars).
    pub consumed_target: String,
    /// Target with `consumed_target` removed from the front.
    pub remaining_target: String,
}

impl MatchResult {
    pub(super) fn new(consumed_input: &str, consumed_target: impl Into<String>, rest: &str) -> Self {
        Self {
            is_match: true,
            consumed_input: consumed_input.to_string(),
            consumed_target: consumed_target.into(),
            remaining_target: rest.to_string(),
        }
    }
}

/// Matches romaji keystrokes against a kana target, one kana unit at a time.
///
/// All operations are pure functions of `(target, input)`; the matcher holds
/// only the immutable table and trie and can be shared across threads.
#[derive(Debug)]
pub struct RomajiMatcher {
    trie: RomajiTrie,
}

impl Default for RomajiMatcher {
    fn default() -> Self {
        Self::from_toml(DEFAULT_TOML).expect("embedded romaji TOML must be valid")
    }
}

impl RomajiMatcher {
    pub fn new(table: KanaTable) -> Self {
        Self {
            trie: RomajiTrie::build(table),
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, RomajiConfigError> {
        parse_kana_toml(toml_str).map(Self::new)
    }

    /// Set custom TOML before first `global()` call.
    pub fn init_custom(toml_content: String) -> Result<(), RomajiConfigError> {
        // Validate eagerly
        parse_kana_toml(&toml_content)?;
        CUSTOM_TOML
            .set(toml_content)
            .map_err(|_| RomajiConfigError::AlreadyInitialized)
    }

    /// Get or initialize the shared matcher.
    pub fn global() -> Arc<RomajiMatcher> {
        static INSTANCE: OnceLock<Arc<RomajiMatcher>> = OnceLock::new();
        INSTANCE
            .get_or_init(|| {
                let toml_str = CUSTOM_TOML
                    .get()
                    .map(|s| s.as_str())
                    .unwrap_or(DEFAULT_TOML);
                Arc::new(Self::from_toml(toml_str).expect("romaji TOML must be valid"))
            })
            .clone()
    }

    pub fn table(&self) -> &KanaTable {
        self.trie.table()
    }

    pub fn trie(&self) -> &RomajiTrie {
        &self.trie
    }

    /// Try to consume one kana unit from the head of `target` using a prefix
    /// of `input`.
    ///
    /// `None` means "not a match yet"; whether the input is still viable is
    /// answered by [`is_valid_prefix`](Self::is_valid_prefix).
    pub fn match_input(&self, target: &str, input: &str) -> Option<MatchResult> {
        if target.is_empty() || input.is_empty() {
            return None;
        }

        if let Some(r) = match_sokuon(self, target, input) {
            return Some(r);
        }

        if target.starts_with(HATSUON) {
            let r = match_hatsuon(self, target, input);
            if r.is_some() || input.starts_with('n') {
                return r;
            }
        }

        let mut best: Option<(usize, &str)> = None;
        for id in self.trie.leading_kana(target) {
            let len = self.trie.longest_match_len(input, id);
            if len > best.map_or(0, |(l, _)| l) {
                best = Some((len, self.table().kana(id)));
            }
        }

        best.map(|(len, kana)| MatchResult::new(&input[..len], kana, &target[kana.len()..]))
    }

    /// Whether more keystrokes could turn `input` into a match for the head
    /// of `target`.
    pub fn is_valid_prefix(&self, target: &str, input: &str) -> bool {
        if target.is_empty() {
            return false;
        }
        if input.is_empty() {
            return true;
        }

        if target.starts_with(SOKUON) {
            if SOKUON_SPELLINGS.iter().any(|s| s.starts_with(input)) {
                return true;
            }
            if let Some(next) = following_kana(self, target) {
                if self
                    .table()
                    .spellings_of(next)
                    .iter()
                    .any(|s| s.starts_with(input))
                {
                    return true;
                }
            }
        }

        if target.starts_with(HATSUON)
            && (HATSUON_SPELLINGS.iter().any(|s| s.starts_with(input)) || input == "n")
        {
            return true;
        }

        // Nothing longer than the longest spelling can still be a prefix.
        let viable = input.len() <= self.trie.longest_spelling()
            && self
                .trie
                .leading_kana(target)
                .into_iter()
                .any(|id| self.trie.prefix_viable(input, id));
        if !viable {
            debug!(kana = target, romaji = input, "romaji prefix rejected");
        }
        viable
    }

    /// Characters that keep `input + c` a valid prefix of `target`.
    pub fn next_chars(&self, target: &str, input: &str) -> BTreeSet<char> {
        let mut hints = BTreeSet::new();
        if target.is_empty() {
            return hints;
        }

        if target.starts_with(SOKUON) {
            continue_literal(&SOKUON_SPELLINGS, input, &mut hints);
            if input.is_empty() {
                if let Some(next) = following_kana(self, target) {
                    hints.extend(
                        self.table()
                            .spellings_of(next)
                            .iter()
                            .filter_map(|s| s.bytes().next())
                            .filter(|&b| is_consonant(b))
                            .map(char::from),
                    );
                }
            }
        }

        if target.starts_with(HATSUON) {
            continue_literal(&HATSUON_SPELLINGS, input, &mut hints);
            if input.is_empty() {
                hints.insert('n');
            }
        }

        for id in self.trie.leading_kana(target) {
            hints.extend(self.trie.next_bytes(input, id).map(char::from));
        }

        hints
    }
}

/// Push the char after `input` for each literal spelling that `input` starts.
fn continue_literal(spellings: &[&str], input: &str, hints: &mut BTreeSet<char>) {
    for s in spellings {
        if let Some(rest) = s.strip_prefix(input) {
            hints.extend(rest.chars().next());
        }
    }
}
