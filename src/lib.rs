//! Incremental romaji typing engine.
//!
//! `TypingEngine` owns the shared [`RomajiMatcher`] and the session settings
//! and hands out [`TypingSession`]s, one per player.

mod engine;
mod trace_init;

pub use engine::{EngineError, TypingEngine};
pub use trace_init::{init_tracing, TraceGuard, FILTER_ENV, TRACE_FILE_NAME};

pub use typing_core::romaji::{KanaTable, MatchResult, RomajiConfigError, RomajiMatcher};
pub use typing_core::settings::{SessionSettings, SettingsError};
pub use typing_session::{KeyOutcome, KeyResponse, SessionStats, TypingSession};
