//! Phrase rules and the longest-match-first rewrite scan.

use crate::lexicon::Entry;

use super::segment::SENTINEL;

/// Where a rule key may match relative to word boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Anywhere, including inside longer words.
    Anywhere,
    /// Must start at a word boundary; the end may run into the next word.
    WordStart,
    /// Must start and end at word boundaries.
    WholeWord,
}

#[derive(Debug, Clone)]
struct Rule {
    key: Vec<char>,
    replacement: String,
    anchor: Anchor,
}

/// One applied rewrite, in original text order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub original: String,
    pub replacement: String,
}

/// A character of working text. Locked cells are protected-span sentinels or
/// the output of an earlier rule in the same round.
#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    locked: bool,
}

/// Working text for one QA round.
#[derive(Debug, Clone)]
pub struct Cells(Vec<Cell>);

impl Cells {
    pub fn new(text: &str) -> Self {
        Self(
            text.chars()
                .map(|ch| Cell {
                    ch,
                    locked: ch == SENTINEL,
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn is_word_at(&self, idx: usize) -> bool {
        self.0.get(idx).is_some_and(|cell| is_word_char(cell.ch))
    }
}

impl std::fmt::Display for Cells {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in &self.0 {
            write!(f, "{}", cell.ch)?;
        }
        Ok(())
    }
}

/// Letters, digits, Hebrew points and the geresh/gershayim marks.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ('\u{0591}'..='\u{05C7}').contains(&ch) || ch == '\u{05F3}' || ch == '\u{05F4}'
}

/// Single-character case fold, Latin-only in practice.
fn fold(ch: char) -> char {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => c,
        _ => ch,
    }
}

/// Collapse whitespace runs in a rule key, matching the normalized text.
fn normalize_key(key: &str) -> Vec<char> {
    key.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .map(fold)
        .collect()
}

/// A priority-ordered rule table: longer keys first, ties in table order.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Every entry with the same anchor.
    pub fn with_anchor(entries: &[Entry], anchor: Anchor) -> Self {
        Self::build(entries, |_| anchor)
    }

    /// Formal-to-casual keys: open-ended when the key ends in a space or its
    /// last word is a single prefix letter, whole-word otherwise.
    pub fn formal(entries: &[Entry]) -> Self {
        Self::build(entries, |entry| {
            let ends_open = entry.from.ends_with(char::is_whitespace)
                || entry
                    .from
                    .split_whitespace()
                    .last()
                    .is_some_and(|word| word.chars().count() == 1);
            if ends_open {
                Anchor::WordStart
            } else {
                Anchor::WholeWord
            }
        })
    }

    fn build(entries: &[Entry], anchor_for: impl Fn(&Entry) -> Anchor) -> Self {
        let mut rules: Vec<Rule> = entries
            .iter()
            .filter_map(|entry| {
                let key = normalize_key(&entry.from);
                if key.is_empty() || key.contains(&SENTINEL) {
                    return None;
                }
                Some(Rule {
                    key,
                    replacement: entry.to.clone(),
                    anchor: anchor_for(entry),
                })
            })
            .collect();
        // Stable sort keeps table order among equal lengths.
        rules.sort_by(|a, b| b.key.len().cmp(&a.key.len()));
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether any rule would match `text`.
    pub fn matches(&self, text: &str) -> bool {
        let cells = Cells::new(text);
        self.rules
            .iter()
            .any(|rule| (0..cells.len()).any(|pos| rule.matches_at(&cells, pos)))
    }

    /// Rewrite every claimed occurrence. Rules are tried in priority order and
    /// each claims all of its non-overlapping matches over unlocked, unclaimed
    /// cells. Replacements come back locked.
    pub fn apply(&self, cells: &mut Cells) -> Vec<Rewrite> {
        let len = cells.len();
        let mut claimed = vec![false; len];
        let mut claims: Vec<(usize, usize, &Rule)> = Vec::new();

        for rule in &self.rules {
            let key_len = rule.key.len();
            let mut pos = 0;
            while pos + key_len <= len {
                let end = pos + key_len;
                if !claimed[pos..end].contains(&true) && rule.matches_at(cells, pos) {
                    claimed[pos..end].fill(true);
                    claims.push((pos, end, rule));
                    pos = end;
                } else {
                    pos += 1;
                }
            }
        }

        if claims.is_empty() {
            return Vec::new();
        }
        claims.sort_by_key(|(start, _, _)| *start);

        let mut rebuilt = Vec::with_capacity(len);
        let mut rewrites = Vec::with_capacity(claims.len());
        let mut pos = 0;
        for (start, end, rule) in claims {
            rebuilt.extend_from_slice(&cells.0[pos..start]);
            rebuilt.extend(rule.replacement.chars().map(|ch| Cell { ch, locked: true }));
            rewrites.push(Rewrite {
                original: cells.0[start..end].iter().map(|cell| cell.ch).collect(),
                replacement: rule.replacement.clone(),
            });
            pos = end;
        }
        rebuilt.extend_from_slice(&cells.0[pos..]);
        cells.0 = rebuilt;

        rewrites
    }

    /// Convenience for one-shot rewriting of plain text.
    pub fn rewrite(&self, text: &str) -> (String, Vec<Rewrite>) {
        let mut cells = Cells::new(text);
        let rewrites = self.apply(&mut cells);
        (cells.to_string(), rewrites)
    }
}

impl Rule {
    fn matches_at(&self, cells: &Cells, pos: usize) -> bool {
        let end = pos + self.key.len();
        if end > cells.len() {
            return false;
        }
        let body = cells.0[pos..end]
            .iter()
            .zip(&self.key)
            .all(|(cell, key)| !cell.locked && fold(cell.ch) == *key);
        if !body {
            return false;
        }
        let starts_word = pos == 0 || !cells.is_word_at(pos - 1);
        let ends_word = !cells.is_word_at(end);
        match self.anchor {
            Anchor::Anywhere => true,
            Anchor::WordStart => starts_word,
            Anchor::WholeWord => starts_word && ends_word,
        }
    }
}
