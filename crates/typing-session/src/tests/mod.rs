mod proptest_fsm;

use std::sync::Arc;

use typing_core::romaji::RomajiMatcher;
use typing_core::settings::{default_toml, parse_settings_toml, SessionSettings};

use super::KeyResponse;
use super::TypingSession;

/// The embedded default `[session]` table, parsed without touching the
/// global singleton.
pub(super) fn test_settings() -> SessionSettings {
    parse_settings_toml(default_toml())
        .expect("embedded settings must parse")
        .session
}

pub(super) fn make_session(target: &str) -> TypingSession {
    let mut session = TypingSession::with_settings(RomajiMatcher::global(), test_settings());
    session.set_target(target);
    session
}

pub(super) fn make_session_with(target: &str, settings: SessionSettings) -> TypingSession {
    let mut session = TypingSession::with_settings(Arc::new(RomajiMatcher::default()), settings);
    session.set_target(target);
    session
}

/// Feed each char of `keys` to the session and collect the responses.
pub(super) fn type_string(session: &mut TypingSession, keys: &str) -> Vec<KeyResponse> {
    keys.chars().map(|c| session.handle_key(c)).collect()
}
