use tracing::{debug, debug_span};

use super::types::{Drained, KeyOutcome, KeyResponse};
use super::TypingSession;

impl TypingSession {
    /// Process one keystroke against the current target.
    pub fn handle_key(&mut self, key: char) -> KeyResponse {
        let _span = debug_span!("handle_key", %key).entered();

        if !self.settings.allows(key) {
            return KeyResponse::ignored();
        }

        let mut input = std::mem::take(&mut self.pending);
        input.push(key);

        if let Some(d) = self.drain(&input) {
            self.stats.record_match();
            self.matched_romaji.push_str(&d.romaji);
            self.matched_kana.push_str(&d.kana);
            self.remaining = d.remaining_target;
            self.pending = d.leftover_input;
            let word_complete = self.remaining.is_empty();
            debug!(romaji = %d.romaji, kana = %d.kana, word_complete, "matched");
            return KeyResponse {
                outcome: KeyOutcome::Matched {
                    romaji: d.romaji,
                    kana: d.kana,
                },
                word_complete,
            };
        }

        if self.matcher.is_valid_prefix(&self.remaining, &input) {
            self.stats.record_prefix();
            self.pending = input;
            return KeyResponse::pending();
        }

        self.stats.record_error();
        // `pending` was taken above and stays empty unless only the key is dropped.
        if !self.settings.clear_pending_on_error {
            input.pop();
            self.pending = input;
        }
        debug!(pending = %self.pending, "rejected");
        KeyResponse::rejected()
    }

    /// Consume kana units from the remaining target until the input runs
    /// out, the target runs out, or nothing more matches.
    fn drain(&self, input: &str) -> Option<Drained> {
        let mut d = Drained {
            remaining_target: self.remaining.clone(),
            leftover_input: input.to_string(),
            ..Drained::default()
        };
        let mut matched = false;

        while let Some(r) = self
            .matcher
            .match_input(&d.remaining_target, &d.leftover_input)
        {
            matched = true;
            d.romaji.push_str(&r.consumed_input);
            d.kana.push_str(&r.consumed_target);
            d.leftover_input.drain(..r.consumed_input.len());
            d.remaining_target = r.remaining_target;
            if d.remaining_target.is_empty() || d.leftover_input.is_empty() {
                break;
            }
        }

        matched.then_some(d)
    }
}
