//! Property-based tests for the TypingSession state machine.
//!
//! Generates random keystroke sequences via proptest and verifies
//! that structural invariants hold after every action.

use proptest::prelude::*;

use super::make_session;
use crate::{KeyOutcome, SessionStats, TypingSession};

const TARGETS: &[&str] = &[
    "かく",
    "がっこう",
    "しんぶん",
    "こんにちは",
    "きょうは",
    "ちょっと",
    "ふぁいる",
    "てんはひとのうえにひとをつくらず。",
    "ラーメン",
];

// ---------------------------------------------------------------------------
// Action enum
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
enum Action {
    Key(char),
    NextTarget(usize),
    Reset,
}

fn arb_key() -> impl Strategy<Value = char> {
    // Vowels and n at higher weight so words actually get typed
    prop_oneof![
        3 => Just('a'),
        3 => Just('i'),
        3 => Just('u'),
        3 => Just('e'),
        3 => Just('o'),
        3 => Just('n'),
        4 => prop::sample::select(vec![
            'k', 's', 't', 'h', 'm', 'y', 'r', 'w', 'g', 'z',
            'd', 'b', 'p', 'c', 'f', 'j', 'l', 'v', 'x', 'q',
        ]),
        1 => prop::sample::select(vec!['-', ',', '.', '!', '?', '1']),
        1 => prop::sample::select(vec!['A', ' ', '/', 'あ']),
    ]
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        90 => arb_key().prop_map(Action::Key),
        6 => (0..TARGETS.len()).prop_map(Action::NextTarget),
        1 => Just(Action::Reset),
    ]
}

// ---------------------------------------------------------------------------
// Invariant checks, run after every action
// ---------------------------------------------------------------------------

fn assert_invariants(session: &TypingSession, before: SessionStats, action: &Action) {
    // 1. matched + remaining always reassembles the target
    assert_eq!(
        format!("{}{}", session.matched_kana(), session.remaining_target()),
        session.target(),
        "matched/remaining split broken after {action:?}",
    );

    // 2. pending input is empty or still viable
    let pending = session.pending_input();
    if !pending.is_empty() {
        assert!(
            session
                .matcher()
                .is_valid_prefix(session.remaining_target(), pending),
            "pending {pending:?} not viable for {:?} after {action:?}",
            session.remaining_target(),
        );
    }

    // 3. completion implies nothing pending
    if session.is_complete() {
        assert!(pending.is_empty() || session.remaining_target().is_empty());
    }

    // 4. counters
    let stats = session.stats();
    assert!(stats.current_combo <= stats.max_combo);
    if !matches!(action, Action::Reset) {
        assert!(stats.correct_keys >= before.correct_keys);
        assert!(stats.errors >= before.errors);
        assert!(stats.max_combo >= before.max_combo);
    }
}

fn assert_response(before: SessionStats, after: SessionStats, outcome: &KeyOutcome) {
    match outcome {
        KeyOutcome::Ignored => assert_eq!(before, after),
        KeyOutcome::Matched { romaji, kana } => {
            assert!(!romaji.is_empty() && !kana.is_empty());
            assert_eq!(after.correct_keys, before.correct_keys + 1);
            assert_eq!(after.current_combo, before.current_combo + 1);
        }
        KeyOutcome::Pending => {
            assert_eq!(after.correct_keys, before.correct_keys + 1);
            assert_eq!(after.current_combo, before.current_combo);
        }
        KeyOutcome::Rejected => {
            assert_eq!(after.errors, before.errors + 1);
            assert_eq!(after.current_combo, 0);
        }
    }
}

// ---------------------------------------------------------------------------
// proptest entry point
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn session_invariants_hold(
        start in 0..TARGETS.len(),
        actions in prop::collection::vec(arb_action(), 1..120),
    ) {
        let mut session = make_session(TARGETS[start]);
        for action in &actions {
            let before = session.stats();
            match action {
                Action::Key(c) => {
                    let resp = session.handle_key(*c);
                    assert_response(before, session.stats(), &resp.outcome);
                    if resp.word_complete {
                        assert!(session.is_complete());
                    }
                    if resp.outcome == KeyOutcome::Rejected {
                        assert_eq!(session.pending_input(), "");
                    }
                }
                Action::NextTarget(i) => session.set_target(TARGETS[*i]),
                Action::Reset => session.reset(),
            }
            assert_invariants(&session, before, action);
        }
    }
}
