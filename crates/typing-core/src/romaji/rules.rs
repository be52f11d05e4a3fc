//! Sokuon (っ) and hatsuon (ん) rules, applied before generic trie matching.
//!
//! These are the only kana whose romaji borrows from the next kana: a doubled
//! consonant stands in for っ, and a bare "n" before a consonant is ん.

use super::config::KanaId;
use super::matcher::{MatchResult, RomajiMatcher};

pub(super) const SOKUON: char = 'っ';
pub(super) const HATSUON: char = 'ん';

/// Direct spellings of っ. Checked independently; "ltu" and "ltsu" share a
/// prefix but neither contains the other.
pub(super) const SOKUON_SPELLINGS: [&str; 3] = ["xtu", "ltu", "ltsu"];
pub(super) const HATSUON_SPELLINGS: [&str; 2] = ["nn", "xn"];

const CONSONANTS: &[u8; 21] = b"bcdfghjklmnpqrstvwxyz";

pub(super) fn is_consonant(b: u8) -> bool {
    CONSONANTS.contains(&b)
}

/// The kana unit right after the leading character of `target`.
pub(super) fn following_kana(matcher: &RomajiMatcher, target: &str) -> Option<KanaId> {
    let mut chars = target.chars();
    chars.next()?;
    matcher.trie().leading_kana(chars.as_str()).first().copied()
}

pub(super) fn match_sokuon(
    matcher: &RomajiMatcher,
    target: &str,
    input: &str,
) -> Option<MatchResult> {
    let rest = target.strip_prefix(SOKUON)?;

    if let Some(spelling) = SOKUON_SPELLINGS.iter().find(|s| input.starts_with(**s)) {
        return Some(MatchResult::new(spelling, SOKUON, rest));
    }

    let next = following_kana(matcher, target)?;
    let &first = input.as_bytes().first()?;
    if !is_consonant(first) {
        return None;
    }
    let doubles = matcher
        .table()
        .spellings_of(next)
        .iter()
        .any(|s| s.as_bytes().first() == Some(&first));

    doubles.then(|| MatchResult::new(&input[..1], SOKUON, rest))
}

pub(super) fn match_hatsuon(
    matcher: &RomajiMatcher,
    target: &str,
    input: &str,
) -> Option<MatchResult> {
    let rest = target.strip_prefix(HATSUON)?;

    if let Some(spelling) = HATSUON_SPELLINGS.iter().find(|s| input.starts_with(**s)) {
        return Some(MatchResult::new(spelling, HATSUON, rest));
    }

    let after_n = input.strip_prefix('n')?;
    let Some(&second) = after_n.as_bytes().first() else {
        // A bare trailing "n" completes the phrase; otherwise it may still
        // become "nn" or the start of な-row kana.
        return rest.is_empty().then(|| MatchResult::new("n", HATSUON, rest));
    };

    // "ny" belongs to にゃ and friends, never to ん + consonant.
    if !is_consonant(second) || second == b'y' {
        return None;
    }
    if !matcher.is_valid_prefix(rest, after_n) {
        return None;
    }

    Some(MatchResult::new("n", HATSUON, rest))
}
