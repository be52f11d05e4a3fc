use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::config::{KanaId, KanaTable, MAX_KANA_UNIT_CHARS};

const ROOT: usize = 0;

#[derive(Debug, Default)]
struct TrieNode {
    children: BTreeMap<u8, usize>,
    /// Kana for which some spelling ends exactly at this node.
    terminal: BTreeSet<KanaId>,
    /// Kana for which some spelling passes through (or ends at) this node.
    reachable: BTreeSet<KanaId>,
    /// Length of the longest spelling inserted through this node.
    longest: usize,
}

impl TrieNode {
    fn is_terminal(&self) -> bool {
        !self.terminal.is_empty()
    }
}

/// Byte trie over every romaji spelling of a [`KanaTable`], annotated per
/// node with the kana each path can still produce.
///
/// Built once and never mutated, so a shared reference is safe to read from
/// any number of threads.
#[derive(Debug)]
pub struct RomajiTrie {
    table: KanaTable,
    nodes: Vec<TrieNode>,
}

impl RomajiTrie {
    pub fn build(table: KanaTable) -> Self {
        let mut nodes = vec![TrieNode::default()];

        for (id, _, spellings) in table.iter() {
            for romaji in spellings {
                let mut node = ROOT;
                nodes[node].reachable.insert(id);
                nodes[node].longest = nodes[node].longest.max(romaji.len());

                for &b in romaji.as_bytes() {
                    node = match nodes[node].children.get(&b) {
                        Some(&child) => child,
                        None => {
                            let child = nodes.len();
                            nodes.push(TrieNode::default());
                            nodes[node].children.insert(b, child);
                            child
                        }
                    };
                    nodes[node].reachable.insert(id);
                    nodes[node].longest = nodes[node].longest.max(romaji.len());
                }

                nodes[node].terminal.insert(id);
            }
        }

        debug!(nodes = nodes.len(), kana = table.len(), "romaji trie built");
        Self { table, nodes }
    }

    pub fn table(&self) -> &KanaTable {
        &self.table
    }

    /// Length of the longest spelling in the table.
    pub fn longest_spelling(&self) -> usize {
        self.nodes[ROOT].longest
    }

    /// Follow `input` from the root; `None` if it leaves the trie.
    fn walk(&self, input: &str) -> Option<&TrieNode> {
        let mut node = &self.nodes[ROOT];
        for b in input.bytes() {
            node = &self.nodes[*node.children.get(&b)?];
        }
        Some(node)
    }

    /// Length of the longest prefix of `input` that is a complete spelling of
    /// `kana`, or 0.
    pub fn longest_match_len(&self, input: &str, kana: KanaId) -> usize {
        let mut node = &self.nodes[ROOT];
        let mut best = 0;

        for (i, b) in input.bytes().enumerate() {
            let Some(&next) = node.children.get(&b) else {
                break;
            };
            node = &self.nodes[next];
            if node.is_terminal() && node.terminal.contains(&kana) {
                best = i + 1;
            }
        }

        best
    }

    /// Whether some spelling of `kana` starts with the whole of `input`.
    pub fn prefix_viable(&self, input: &str, kana: KanaId) -> bool {
        self.walk(input)
            .is_some_and(|node| node.reachable.contains(&kana))
    }

    /// Bytes that extend `input` toward some spelling of `kana`.
    pub fn next_bytes(&self, input: &str, kana: KanaId) -> impl Iterator<Item = u8> + '_ {
        self.walk(input)
            .into_iter()
            .flat_map(|node| node.children.iter())
            .filter(move |&(_, &child)| self.nodes[child].reachable.contains(&kana))
            .map(|(&b, _)| b)
    }

    /// Kana units at the head of `target` that exist in the table, longest
    /// first.
    pub fn leading_kana(&self, target: &str) -> Vec<KanaId> {
        let mut candidates = Vec::with_capacity(MAX_KANA_UNIT_CHARS);
        for len in (1..=MAX_KANA_UNIT_CHARS).rev() {
            let Some(head) = char_prefix(target, len) else {
                continue;
            };
            if let Some(id) = self.table.id(head) {
                candidates.push(id);
            }
        }
        candidates
    }
}

/// The first `n` chars of `s`, or `None` if `s` is shorter.
fn char_prefix(s: &str, n: usize) -> Option<&str> {
    let mut ends = s.char_indices().map(|(i, c)| i + c.len_utf8());
    ends.nth(n.checked_sub(1)?).map(|end| &s[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::romaji::config::parse_kana_toml;
    use crate::romaji::table::DEFAULT_TOML;

    fn default_trie() -> RomajiTrie {
        RomajiTrie::build(parse_kana_toml(DEFAULT_TOML).unwrap())
    }

    fn id(trie: &RomajiTrie, kana: &str) -> KanaId {
        trie.table().id(kana).unwrap()
    }

    #[test]
    fn test_longest_match_exact() {
        let trie = default_trie();
        assert_eq!(trie.longest_match_len("ka", id(&trie, "か")), 2);
        assert_eq!(trie.longest_match_len("shi", id(&trie, "し")), 3);
        assert_eq!(trie.longest_match_len("si", id(&trie, "し")), 2);
    }

    #[test]
    fn test_longest_match_ignores_trailing_input() {
        let trie = default_trie();
        assert_eq!(trie.longest_match_len("kaku", id(&trie, "か")), 2);
    }

    #[test]
    fn test_longest_match_wrong_kana() {
        let trie = default_trie();
        assert_eq!(trie.longest_match_len("ka", id(&trie, "き")), 0);
        assert_eq!(trie.longest_match_len("sha", id(&trie, "し")), 0);
    }

    #[test]
    fn test_longest_match_incomplete() {
        let trie = default_trie();
        assert_eq!(trie.longest_match_len("s", id(&trie, "し")), 0);
        assert_eq!(trie.longest_match_len("sh", id(&trie, "し")), 0);
    }

    #[test]
    fn test_longest_match_prefers_longer_spelling() {
        let table = parse_kana_toml(
            r#"
[spellings]
"か" = ["k", "ka"]
"#,
        )
        .unwrap();
        let trie = RomajiTrie::build(table);
        let ka = id(&trie, "か");
        assert_eq!(trie.longest_match_len("k", ka), 1);
        assert_eq!(trie.longest_match_len("ka", ka), 2);
        assert_eq!(trie.longest_match_len("kx", ka), 1);
    }

    #[test]
    fn test_prefix_viable() {
        let trie = default_trie();
        let shi = id(&trie, "し");
        assert!(trie.prefix_viable("", shi));
        assert!(trie.prefix_viable("s", shi));
        assert!(trie.prefix_viable("sh", shi));
        assert!(trie.prefix_viable("c", shi));
        assert!(trie.prefix_viable("shi", shi));
        assert!(!trie.prefix_viable("sa", shi));
        assert!(!trie.prefix_viable("shix", shi));
        assert!(!trie.prefix_viable("q", shi));
    }

    #[test]
    fn test_prefix_viable_non_ascii_input() {
        let trie = default_trie();
        assert!(!trie.prefix_viable("か", id(&trie, "か")));
        assert_eq!(trie.longest_match_len("かa", id(&trie, "か")), 0);
    }

    #[test]
    fn test_reachable_covers_descendants() {
        let trie = default_trie();
        for node in &trie.nodes {
            assert!(node.terminal.is_subset(&node.reachable));
            for &child in node.children.values() {
                assert!(trie.nodes[child].reachable.is_subset(&node.reachable));
                assert!(trie.nodes[child].longest <= node.longest);
            }
        }
    }

    #[test]
    fn test_longest_spelling() {
        let trie = default_trie();
        // "ltsu"
        assert_eq!(trie.longest_spelling(), 4);
    }

    #[test]
    fn test_next_bytes() {
        let trie = default_trie();
        let shi = id(&trie, "し");
        let root: Vec<u8> = trie.next_bytes("", shi).collect();
        assert_eq!(root, b"cs");
        let after_s: Vec<u8> = trie.next_bytes("s", shi).collect();
        assert_eq!(after_s, b"hi");
        assert_eq!(trie.next_bytes("x", shi).count(), 0);
        assert_eq!(trie.next_bytes("shi", shi).count(), 0);
    }

    #[test]
    fn test_leading_kana_prefers_two_chars() {
        let trie = default_trie();
        let got = trie.leading_kana("きゃく");
        assert_eq!(got, vec![id(&trie, "きゃ"), id(&trie, "き")]);
    }

    #[test]
    fn test_leading_kana_single() {
        let trie = default_trie();
        assert_eq!(trie.leading_kana("かく"), vec![id(&trie, "か")]);
        assert_eq!(trie.leading_kana("か"), vec![id(&trie, "か")]);
    }

    #[test]
    fn test_leading_kana_unknown() {
        let trie = default_trie();
        assert!(trie.leading_kana("").is_empty());
        assert!(trie.leading_kana("漢字").is_empty());
    }

    #[test]
    fn test_char_prefix() {
        assert_eq!(char_prefix("きゃく", 2), Some("きゃ"));
        assert_eq!(char_prefix("き", 2), None);
        assert_eq!(char_prefix("き", 1), Some("き"));
        assert_eq!(char_prefix("", 1), None);
        assert_eq!(char_prefix("abc", 0), None);
    }
}
