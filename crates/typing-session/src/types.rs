use serde::Serialize;

/// What a single keystroke did to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeyOutcome {
    /// Key is outside the allow-list; no state changed.
    Ignored,
    /// One or more kana units were consumed. `romaji` and `kana` are the
    /// concatenation of everything consumed by this keystroke.
    Matched { romaji: String, kana: String },
    /// Key was accepted into the pending buffer.
    Pending,
    /// Key cannot lead to a match and was dropped.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyResponse {
    pub outcome: KeyOutcome,
    /// True when this keystroke consumed the last kana of the target.
    pub word_complete: bool,
}

impl KeyResponse {
    pub(crate) fn ignored() -> Self {
        Self {
            outcome: KeyOutcome::Ignored,
            word_complete: false,
        }
    }

    pub(crate) fn pending() -> Self {
        Self {
            outcome: KeyOutcome::Pending,
            word_complete: false,
        }
    }

    pub(crate) fn rejected() -> Self {
        Self {
            outcome: KeyOutcome::Rejected,
            word_complete: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.outcome == KeyOutcome::Rejected
    }
}

/// Running keystroke counters. Survive `set_target` so they accumulate
/// across the words of one game; cleared by `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pub correct_keys: u32,
    pub errors: u32,
    pub current_combo: u32,
    pub max_combo: u32,
}

impl SessionStats {
    pub fn total_keys(&self) -> u32 {
        self.correct_keys + self.errors
    }

    /// Fraction of counted keystrokes that were accepted, 1.0 before any key.
    pub fn accuracy(&self) -> f64 {
        match self.total_keys() {
            0 => 1.0,
            total => f64::from(self.correct_keys) / f64::from(total),
        }
    }

    pub(crate) fn record_match(&mut self) {
        self.correct_keys += 1;
        self.current_combo += 1;
        self.max_combo = self.max_combo.max(self.current_combo);
    }

    pub(crate) fn record_prefix(&mut self) {
        self.correct_keys += 1;
    }

    pub(crate) fn record_error(&mut self) {
        self.errors += 1;
        self.current_combo = 0;
    }
}

/// Everything one keystroke consumed while draining the pending buffer.
#[derive(Debug, Default)]
pub(crate) struct Drained {
    pub romaji: String,
    pub kana: String,
    pub remaining_target: String,
    pub leftover_input: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let mut s = SessionStats::default();
        assert_eq!(s.accuracy(), 1.0);
        s.record_match();
        s.record_prefix();
        s.record_prefix();
        s.record_error();
        assert_eq!(s.total_keys(), 4);
        assert_eq!(s.accuracy(), 0.75);
    }

    #[test]
    fn test_combo_tracking() {
        let mut s = SessionStats::default();
        s.record_match();
        s.record_match();
        s.record_prefix();
        assert_eq!(s.current_combo, 2);
        s.record_error();
        assert_eq!(s.current_combo, 0);
        assert_eq!(s.max_combo, 2);
        s.record_match();
        assert_eq!(s.current_combo, 1);
        assert_eq!(s.max_combo, 2);
    }
}
