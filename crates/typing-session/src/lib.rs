//! Stateful typing session driving a [`RomajiMatcher`] one keystroke at a time.
//!
//! `TypingSession` owns the target phrase, the matched/pending buffers and
//! the keystroke counters. Each key goes through `handle_key`, which drains
//! as many kana units as the pending input allows and reports what happened.

mod key_handlers;
mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use typing_core::romaji::RomajiMatcher;
use typing_core::settings::SessionSettings;
use typing_core::unicode::katakana_to_hiragana;

pub use types::{KeyOutcome, KeyResponse, SessionStats};

pub struct TypingSession {
    matcher: Arc<RomajiMatcher>,
    settings: SessionSettings,

    target: String,
    matched_romaji: String,
    matched_kana: String,
    pending: String,
    remaining: String,

    stats: SessionStats,
}

impl TypingSession {
    /// Session using the global `[session]` settings.
    pub fn new(matcher: Arc<RomajiMatcher>) -> Self {
        Self::with_settings(matcher, SessionSettings::default())
    }

    pub fn with_settings(matcher: Arc<RomajiMatcher>, settings: SessionSettings) -> Self {
        Self {
            matcher,
            settings,
            target: String::new(),
            matched_romaji: String::new(),
            matched_kana: String::new(),
            pending: String::new(),
            remaining: String::new(),
            stats: SessionStats::default(),
        }
    }

    /// Start a new word. Buffers are cleared; counters carry over.
    pub fn set_target(&mut self, target: &str) {
        let target = if self.settings.normalize_katakana {
            katakana_to_hiragana(target)
        } else {
            target.to_string()
        };
        self.remaining.clone_from(&target);
        self.target = target;
        self.matched_romaji.clear();
        self.matched_kana.clear();
        self.pending.clear();
    }

    /// Drop the target, buffers and counters.
    pub fn reset(&mut self) {
        self.set_target("");
        self.stats = SessionStats::default();
    }

    pub fn matcher(&self) -> &RomajiMatcher {
        &self.matcher
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The current target after normalization.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn matched_romaji(&self) -> &str {
        &self.matched_romaji
    }

    pub fn matched_kana(&self) -> &str {
        &self.matched_kana
    }

    pub fn pending_input(&self) -> &str {
        &self.pending
    }

    pub fn remaining_target(&self) -> &str {
        &self.remaining
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// A non-empty target has been fully typed.
    pub fn is_complete(&self) -> bool {
        !self.target.is_empty() && self.remaining.is_empty()
    }

    /// Keys that would be accepted next, for on-screen hints.
    pub fn next_keys(&self) -> Vec<char> {
        self.matcher
            .next_chars(&self.remaining, &self.pending)
            .into_iter()
            .collect()
    }
}
