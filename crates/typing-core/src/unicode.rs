//! Character-level Unicode helpers for kana targets.

/// Convert katakana to hiragana so katakana targets match the spelling table.
///
/// Only ァ..ヶ (U+30A1..U+30F6) have hiragana counterparts; ー, ・ and
/// everything else pass through unchanged.
pub fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| {
            if ('\u{30A1}'..='\u{30F6}').contains(&c) {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}
