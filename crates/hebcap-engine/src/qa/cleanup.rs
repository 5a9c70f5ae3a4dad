//! Structural cleanup of rewritten text.
//!
//! Runs on masked text, so protected spans are single sentinel characters
//! and are never split, dropped or merged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::segment::SENTINEL;

const MAX_PASSES: usize = 8;

/// Single-letter prefixes that cannot stand alone as a word.
const PREFIX_LETTERS: &[&str] = &["ו", "ב", "כ", "ל", "מ", "ש", "ה"];

/// Connectors that make no sense with nothing after them.
const CONNECTORS: &[&str] = &["וגם", "אבל", "כי", "או"];

const PUNCTUATION: &[char] = &[',', '.', ';', ':', '!', '?'];
const TERMINAL: &[char] = &['.', '!', '?'];
const TRAILING_SOFT: &[char] = &[',', ';'];

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+([,.!?;:])").unwrap());
static PUNCT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.!?;:]{2,}").unwrap());
static MISSING_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([,!?;.])(\p{L})").unwrap());
static EMPTY_BRACKETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)|\[\s*\]|\{\s*\}").unwrap());
static LEADING_PUNCT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s,.;:!?]+").unwrap());

/// Apply every cleanup step until the text stops changing.
pub fn tidy(text: &str) -> String {
    let mut current = text.to_string();
    for _ in 0..MAX_PASSES {
        let next = tidy_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn tidy_once(text: &str) -> String {
    let text = WHITESPACE.replace_all(text, " ");
    let text = EMPTY_BRACKETS.replace_all(&text, "");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "$1");
    let text = PUNCT_RUN.replace_all(&text, |caps: &Captures| collapse_punctuation(&caps[0]));
    let text = MISSING_SPACE.replace_all(&text, "$1 $2");
    let text = attach_orphan_prefixes(&text);
    let text = drop_dangling_connectors(&text);
    let text = LEADING_PUNCT.replace(&text, "");
    text.trim().trim_end_matches(TRAILING_SOFT).trim_end().to_string()
}

/// Reduce a punctuation run to one mark. Three or more dots stay an ellipsis.
fn collapse_punctuation(run: &str) -> String {
    if run.chars().all(|c| c == '.') {
        return if run.len() >= 3 { "...".into() } else { ".".into() };
    }
    for mark in ['?', '!', '.', ':', ';', ','] {
        if run.contains(mark) {
            return mark.to_string();
        }
    }
    run.to_string()
}

fn is_hebrew_letter(ch: char) -> bool {
    ('\u{05D0}'..='\u{05EA}').contains(&ch)
}

/// Glue a bare prefix letter onto the following word, or drop it when there
/// is nothing to attach to.
fn attach_orphan_prefixes(text: &str) -> String {
    let tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());

    // Right to left, so stacked prefixes ("ו ה בית") fold into one word.
    for token in tokens.into_iter().rev() {
        if !PREFIX_LETTERS.contains(&token) {
            out.push(token.to_string());
            continue;
        }
        let Some(next) = out.pop() else { continue };
        match next.chars().next() {
            Some(ch) if is_hebrew_letter(ch) => out.push(format!("{token}{next}")),
            Some(ch) if ch == SENTINEL || ch.is_ascii_digit() => {
                out.push(format!("{token}-{next}"))
            }
            _ => out.push(next),
        }
    }

    out.reverse();
    out.join(" ")
}

/// Remove connectors standing before terminal punctuation or at the very end.
fn drop_dangling_connectors(text: &str) -> String {
    let tokens: Vec<&str> = text.split(' ').filter(|t| !t.is_empty()).collect();
    let last = tokens.len().saturating_sub(1);
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());

    for (idx, token) in tokens.iter().enumerate() {
        let core = token.trim_end_matches(PUNCTUATION);
        let tail = &token[core.len()..];
        let dangling = CONNECTORS.contains(&core)
            && (tail.starts_with(TERMINAL) || (tail.is_empty() && idx == last));
        if !dangling {
            out.push(token.to_string());
            continue;
        }
        if let Some(prev) = out.last_mut() {
            prev.push_str(tail);
        }
    }

    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_whitespace_and_space_before_punctuation() {
        assert_eq!(tidy("  שלום   לכם  , מה   קורה ? "), "שלום לכם, מה קורה?");
    }

    #[test]
    fn test_punctuation_runs() {
        assert_eq!(tidy("באמת?!?!"), "באמת?");
        assert_eq!(tidy("רגע....."), "רגע...");
        assert_eq!(tidy("טוב,, מאוד"), "טוב, מאוד");
        assert_eq!(tidy("טוב.."), "טוב.");
    }

    #[test]
    fn test_space_after_punctuation() {
        assert_eq!(tidy("אחד,שתיים.שלוש"), "אחד, שתיים. שלוש");
        assert_eq!(tidy("גרסה 2.5"), "גרסה 2.5");
    }

    #[test]
    fn test_empty_brackets_removed() {
        assert_eq!(tidy("זה ( ) טוב []"), "זה טוב");
    }

    #[test]
    fn test_orphan_prefixes() {
        assert_eq!(tidy("הספר ש קראתי"), "הספר שקראתי");
        assert_eq!(tidy("ו ה בית"), "והבית");
        assert_eq!(tidy(&format!("ב {SENTINEL}")), format!("ב-{SENTINEL}"));
        assert_eq!(tidy("ב 5 דקות"), "ב-5 דקות");
        assert_eq!(tidy("סוף ו"), "סוף");
    }

    #[test]
    fn test_dangling_connectors() {
        assert_eq!(tidy("זה טוב וגם."), "זה טוב.");
        assert_eq!(tidy("זה טוב אבל"), "זה טוב");
        assert_eq!(tidy("זה, או! נכון"), "זה! נכון");
        assert_eq!(tidy("אבל, זה טוב"), "אבל, זה טוב");
    }

    #[test]
    fn test_leading_and_trailing_punctuation() {
        assert_eq!(tidy(", . זה מתחיל"), "זה מתחיל");
        assert_eq!(tidy("זה נגמר, וגם"), "זה נגמר");
        assert_eq!(tidy("רשימה:"), "רשימה:");
    }

    #[test]
    fn test_sentinels_survive() {
        let text = format!("{SENTINEL} , {SENTINEL}");
        assert_eq!(tidy(&text), format!("{SENTINEL}, {SENTINEL}"));
    }

    #[test]
    fn test_tidy_is_stable() {
        let once = tidy(" ו , אבל... זה  טוב!! כי");
        assert_eq!(tidy(&once), once);
    }
}
