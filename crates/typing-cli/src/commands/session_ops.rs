use std::fmt::Write as _;

use serde::Serialize;

use kana_typing::{KeyOutcome, SessionStats, TypingEngine};

#[derive(Debug, Serialize)]
pub struct SimulationStep {
    pub key: char,
    pub outcome: KeyOutcome,
    pub word_complete: bool,
    pub matched_kana: String,
    pub pending: String,
    pub remaining: String,
}

#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub target: String,
    pub keys: String,
    pub steps: Vec<SimulationStep>,
    pub complete: bool,
    pub stats: SessionStats,
    pub accuracy: f64,
}

/// Feed `keys` through a fresh session on `target`, recording every step.
pub fn simulate(engine: &TypingEngine, target: &str, keys: &str) -> SimulationReport {
    let mut session = engine.create_session();
    session.set_target(target);

    let steps = keys
        .chars()
        .map(|key| {
            let resp = session.handle_key(key);
            SimulationStep {
                key,
                outcome: resp.outcome,
                word_complete: resp.word_complete,
                matched_kana: session.matched_kana().to_string(),
                pending: session.pending_input().to_string(),
                remaining: session.remaining_target().to_string(),
            }
        })
        .collect();

    let stats = session.stats();
    SimulationReport {
        target: session.target().to_string(),
        keys: keys.to_string(),
        steps,
        complete: session.is_complete(),
        stats,
        accuracy: stats.accuracy(),
    }
}

pub fn format_simulation(report: &SimulationReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let outcome = match &step.outcome {
            KeyOutcome::Ignored => "ignored".to_string(),
            KeyOutcome::Pending => "pending".to_string(),
            KeyOutcome::Rejected => "REJECT".to_string(),
            KeyOutcome::Matched { romaji, kana } => format!("{romaji} -> {kana}"),
        };
        let _ = writeln!(
            out,
            "{:?}  {outcome:<12} [{}|{}] pending={:?}",
            step.key, step.matched_kana, step.remaining, step.pending
        );
    }
    let s = &report.stats;
    let _ = writeln!(
        out,
        "{}: correct={} errors={} max_combo={} accuracy={:.1}%",
        if report.complete { "complete" } else { "incomplete" },
        s.correct_keys,
        s.errors,
        s.max_combo,
        report.accuracy * 100.0
    );
    out
}
