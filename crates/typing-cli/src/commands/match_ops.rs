use std::fmt::Write as _;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use kana_typing::{KanaTable, MatchResult, RomajiMatcher};

use super::CliError;

/// Everything the matcher says about one `(target, input)` pair.
#[derive(Debug, Serialize)]
pub struct MatchReport {
    pub target: String,
    pub input: String,
    pub result: Option<MatchResult>,
    pub valid_prefix: bool,
    pub next_chars: Vec<char>,
}

pub fn match_report(matcher: &RomajiMatcher, target: &str, input: &str) -> MatchReport {
    MatchReport {
        target: target.to_string(),
        input: input.to_string(),
        result: matcher.match_input(target, input),
        valid_prefix: matcher.is_valid_prefix(target, input),
        next_chars: matcher.next_chars(target, input).into_iter().collect(),
    }
}

pub fn format_match(report: &MatchReport) -> String {
    let mut out = String::new();
    match &report.result {
        Some(r) => {
            let _ = writeln!(
                out,
                "match: {:?} -> {} (remaining {:?})",
                r.consumed_input, r.consumed_target, r.remaining_target
            );
        }
        None => out.push_str("match: none\n"),
    }
    let _ = writeln!(out, "prefix: {}", prefix_label(report.valid_prefix));
    let _ = writeln!(out, "next: {}", format_hints(&report.next_chars));
    out
}

pub fn prefix(matcher: &RomajiMatcher, target: &str, input: &str) -> String {
    prefix_label(matcher.is_valid_prefix(target, input)).to_string()
}

fn prefix_label(valid: bool) -> &'static str {
    if valid {
        "valid"
    } else {
        "invalid"
    }
}

pub fn hints(matcher: &RomajiMatcher, target: &str, input: &str) -> String {
    let chars: Vec<char> = matcher.next_chars(target, input).into_iter().collect();
    format_hints(&chars)
}

fn format_hints(chars: &[char]) -> String {
    if chars.is_empty() {
        return "(none)".to_string();
    }
    chars
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn spellings(matcher: &RomajiMatcher, kana: &str) -> Result<String, CliError> {
    let list = matcher.table().spellings(kana);
    if list.is_empty() {
        return Err(CliError::UnknownKana(kana.to_string()));
    }
    Ok(list.join(" "))
}

/// One line per kana, spellings aligned after a display-width padded column.
pub fn format_table(table: &KanaTable) -> String {
    let width = table.iter().map(|(_, k, _)| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (_, kana, spellings) in table.iter() {
        let pad = width - kana.width();
        let _ = writeln!(out, "{kana}{}  {}", " ".repeat(pad), spellings.join(" "));
    }
    let _ = writeln!(
        out,
        "-- {} kana, {} spellings",
        table.len(),
        table.spelling_count()
    );
    out
}
