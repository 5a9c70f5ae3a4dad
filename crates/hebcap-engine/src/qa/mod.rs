//! Hebrew QA engine.
//!
//! Rewrites raw caption text into natural spoken Israeli Hebrew:
//!
//! 1. Whitespace normalization
//! 2. Protected-span masking (URLs, mentions, hashtags, emoji, Latin words)
//! 3. Banned-phrase removal
//! 4. Formal-to-casual substitution
//! 5. Spelling correction
//! 6. Structural cleanup
//!
//! Steps 3-6 form a round. Rounds repeat until the text is stable, so the
//! engine is idempotent even when a deletion makes two fragments meet.

mod cleanup;
mod rules;
mod segment;

use std::sync::{Arc, LazyLock};

use hebcap_models::{ContentError, ContentResult, Correction, CorrectionKind, QaResult};
use regex::Regex;
use tracing::debug;

use crate::lexicon::Lexicon;
use crate::metrics;

pub use cleanup::tidy;
pub use rules::{is_word_char, Anchor, Cells, Rewrite, RuleSet};
pub use segment::{restore_with, Masked, ProtectedSpan, SpanKind, SENTINEL};

const MAX_ROUNDS: usize = 6;
const LONG_TEXT_CHARS: usize = 300;
const MAX_LATIN_NOTED: usize = 5;

pub const NOTE_LONG_TEXT: &str = "הטקסט ארוך - שקול לקצר לפורמט סושיאל";
pub const NOTE_FORMAL: &str = "הטקסט המקורי היה פורמלי מדי - הותאם לעברית מדוברת";
pub const NOTE_BANNED: &str = "הוסרו ביטויים שיווקיים שחוקים";
pub const NOTE_HASHTAGS: &str = "הטקסט כולל האשטאגים - נשארו במקומם";

static LATIN_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[a-zA-Z]{3,}").unwrap());
static HEBREW_CHAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\x{0590}-\x{05FF}]").unwrap());

/// Collapse every whitespace run to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the text has at least one Hebrew character.
pub fn contains_hebrew(text: &str) -> bool {
    HEBREW_CHAR.is_match(text)
}

/// Number of whitespace-separated words containing Hebrew characters.
pub fn hebrew_word_count(text: &str) -> usize {
    text.split_whitespace().filter(|w| contains_hebrew(w)).count()
}

/// Rule-driven Hebrew caption rewriter. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct QaEngine {
    lexicon: Arc<Lexicon>,
    banned: RuleSet,
    formal: RuleSet,
    spelling: RuleSet,
}

impl Default for QaEngine {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl QaEngine {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let banned = RuleSet::with_anchor(&lexicon.banned_phrases, Anchor::Anywhere);
        let formal = RuleSet::formal(&lexicon.formal_to_casual);
        let spelling = RuleSet::with_anchor(&lexicon.spelling_fixes, Anchor::WholeWord);
        Self {
            lexicon,
            banned,
            formal,
            spelling,
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Clean a raw caption.
    ///
    /// Fails with [`ContentError::EmptyInput`] when the text is empty after
    /// trimming. Otherwise never fails.
    ///
    /// Text made up only of banned phrases and punctuation cleans to an empty
    /// caption. Cleaning that result again is an `EmptyInput` error rather
    /// than a no-op.
    pub fn clean(&self, raw: &str) -> ContentResult<QaResult> {
        let normalized = normalize_whitespace(raw);
        if normalized.is_empty() {
            return Err(ContentError::EmptyInput);
        }

        let masked = Masked::new(&normalized);
        let mut corrections = Vec::new();
        let text = self.run_rounds(&masked.text, true, &mut corrections);
        let cleaned_caption = masked.restore(&text);

        for correction in &corrections {
            metrics::record_correction(correction.kind);
        }
        let notes = self.notes(raw, &masked, &corrections);

        debug!(
            corrections = corrections.len(),
            protected_spans = masked.spans.len(),
            notes = notes.len(),
            "QA finished"
        );

        Ok(QaResult {
            original_text: raw.to_string(),
            cleaned_caption,
            applied_corrections: corrections,
            notes,
        })
    }

    /// Remove banned phrases and tidy the result, leaving register and
    /// spelling alone. Used for short user-supplied fields such as the topic.
    pub fn scrub(&self, text: &str) -> String {
        let normalized = normalize_whitespace(text);
        if normalized.is_empty() {
            return normalized;
        }
        let masked = Masked::new(&normalized);
        let mut discarded = Vec::new();
        let scrubbed = self.run_rounds(&masked.text, false, &mut discarded);
        masked.restore(&scrubbed)
    }

    /// Whether any banned phrase occurs outside protected spans.
    pub fn contains_banned_phrase(&self, text: &str) -> bool {
        let masked = Masked::new(&normalize_whitespace(text));
        self.banned.matches(&masked.text)
    }

    /// Whether any formal key matches outside protected spans.
    pub fn contains_formal_phrase(&self, text: &str) -> bool {
        let masked = Masked::new(&normalize_whitespace(text));
        self.formal.matches(&masked.text)
    }

    fn run_rounds(&self, masked: &str, full: bool, corrections: &mut Vec<Correction>) -> String {
        let mut current = masked.to_string();
        for round in 0..MAX_ROUNDS {
            let next = self.round(&current, full, corrections);
            if next == current {
                debug!(round, "QA text stable");
                break;
            }
            current = next;
        }
        current
    }

    fn round(&self, text: &str, full: bool, corrections: &mut Vec<Correction>) -> String {
        let mut cells = Cells::new(text);

        let mut passes = vec![(CorrectionKind::BannedPhrase, &self.banned)];
        if full {
            passes.push((CorrectionKind::FormalToCasual, &self.formal));
            passes.push((CorrectionKind::Spelling, &self.spelling));
        }

        for (kind, rules) in passes {
            let rewrites = rules.apply(&mut cells);
            if !rewrites.is_empty() {
                debug!(pass = kind.as_str(), rewrites = rewrites.len(), "QA pass applied");
            }
            corrections.extend(
                rewrites
                    .into_iter()
                    .map(|r| Correction::new(kind, r.original, r.replacement)),
            );
        }

        tidy(&cells.to_string())
    }

    fn notes(&self, raw: &str, masked: &Masked, corrections: &[Correction]) -> Vec<String> {
        let mut notes = Vec::new();

        if raw.chars().count() > LONG_TEXT_CHARS {
            notes.push(NOTE_LONG_TEXT.to_string());
        }

        let mut latin: Vec<&str> = Vec::new();
        for word in LATIN_WORD.find_iter(raw).map(|m| m.as_str()) {
            if !latin.contains(&word) {
                latin.push(word);
            }
            if latin.len() == MAX_LATIN_NOTED {
                break;
            }
        }
        if !latin.is_empty() {
            notes.push(format!("מילים באנגלית: {}", latin.join(", ")));
        }

        if corrections.iter().any(|c| c.kind == CorrectionKind::FormalToCasual) {
            notes.push(NOTE_FORMAL.to_string());
        }
        if corrections.iter().any(|c| c.kind == CorrectionKind::BannedPhrase) {
            notes.push(NOTE_BANNED.to_string());
        }
        if masked.has_kind(SpanKind::Hashtag) {
            notes.push(NOTE_HASHTAGS.to_string());
        }

        notes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Entry;

    fn engine() -> QaEngine {
        QaEngine::default()
    }

    fn cleaned(text: &str) -> String {
        engine().clean(text).unwrap().cleaned_caption
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(engine().clean(""), Err(ContentError::EmptyInput));
        assert_eq!(engine().clean("  \n\t "), Err(ContentError::EmptyInput));
    }

    #[test]
    fn test_all_banned_text_cleans_to_empty() {
        for text in ["וואו!!! ?", "לא תאמינו לא תאמינו", "וואו וואו וואו"] {
            let result = engine().clean(text).unwrap();
            assert_eq!(result.cleaned_caption, "", "{text}");
            assert!(!result.applied_corrections.is_empty());
            assert_eq!(
                engine().clean(&result.cleaned_caption),
                Err(ContentError::EmptyInput)
            );
        }
    }

    #[test]
    fn test_hedge_dropped_but_lookalike_words_kept() {
        assert_eq!(cleaned("בעצם, זה עובד"), "זה עובד");
        assert_eq!(cleaned("הוא עשה את זה בעצמו"), "הוא עשה את זה בעצמו");
        assert_eq!(cleaned("זרקתי בומרנג לבומבה"), "זרקתי בומרנג לבומבה");
        assert_eq!(cleaned("הסוד שלי לשינה"), "הסוד שלי לשינה");
        assert_eq!(cleaned("הסוד שאף אחד לא מספר: שינה"), "שינה");
    }

    #[test]
    fn test_formal_and_banned_rewrites() {
        let result = engine().clean("באפשרותך לראות את התוצאות המדהימות").unwrap();
        assert!(result.cleaned_caption.contains("אתה יכול"));
        assert!(!result.cleaned_caption.contains("מדהים"));
        assert!(result.has_corrections());
        assert_eq!(result.corrections_of(CorrectionKind::FormalToCasual).count(), 1);
        assert_eq!(result.corrections_of(CorrectionKind::BannedPhrase).count(), 1);
    }

    #[test]
    fn test_longest_match_precedence() {
        let text = cleaned("בנוסף לכך זה עובד מצוין");
        assert_eq!(text, "וגם זה עובד מצוין");
    }

    #[test]
    fn test_prefix_formal_keys() {
        assert_eq!(cleaned("ניתן לראות את זה בבירור"), "אפשר לראות את זה בבירור");
        assert_eq!(cleaned("במידה ותרצו, כתבו לנו"), "אם תרצו, כתבו לנו");
        assert_eq!(cleaned("הספר אשר קראתי"), "הספר שקראתי");
    }

    #[test]
    fn test_spelling_whole_words_only() {
        assert_eq!(cleaned("סבבא אחי, עכשו"), "סבבה אחי, עכשיו");
        assert_eq!(cleaned("פאב טוב"), "פאב טוב");
    }

    #[test]
    fn test_deleted_phrase_leaves_clean_text() {
        assert_eq!(cleaned("וואו, זה עובד"), "זה עובד");
        assert_eq!(cleaned("לא תאמינו מה גיליתי"), "מה גיליתי");
        assert_eq!(cleaned("למעשה, זה פשוט"), "זה פשוט");
    }

    #[test]
    fn test_protected_spans_untouched() {
        let text = "מדהים! @madhim #מדהים https://x.co/מדהים 🔥 Amazing";
        let result = cleaned(text);
        assert!(result.starts_with("מגניב!"));
        for span in ["@madhim", "#מדהים", "https://x.co/מדהים", "🔥", "Amazing"] {
            assert!(result.contains(span), "lost {span} in {result}");
        }
    }

    #[test]
    fn test_idempotent() {
        for text in [
            "באפשרותך לראות את התוצאות המדהימות",
            "אנו שמחים להציג, לא תאמינו, משהו ענק!!",
            "הזדמנות אחרונה להירשם אשר תשנה לכם הכל ו",
            "יש לציין כי בנוסף, זה עובד",
        ] {
            let once = cleaned(text);
            assert_eq!(cleaned(&once), once, "not idempotent for {text}");
        }
    }

    #[test]
    fn test_banned_runs_before_formal() {
        let lexicon = Lexicon {
            banned_phrases: vec![Entry::new("מדהים", "טוב")],
            formal_to_casual: vec![Entry::new("מדהים ביותר", "הכי מדהים")],
            ..Lexicon::hebrew()
        };
        let qa = QaEngine::new(Arc::new(lexicon));
        let result = qa.clean("זה מדהים ביותר").unwrap();
        assert_eq!(result.cleaned_caption, "זה טוב ביותר");
        assert_eq!(result.corrections_of(CorrectionKind::FormalToCasual).count(), 0);
    }

    #[test]
    fn test_scrub_only_removes_banned() {
        let qa = engine();
        assert_eq!(qa.scrub("טיפים מדהימים אשר עובדים"), "טיפים מגניבים אשר עובדים");
        assert_eq!(qa.scrub("   "), "");
    }

    #[test]
    fn test_notes() {
        let result = engine()
            .clean("הננו שמחים, check this out #טיפים")
            .unwrap();
        assert!(result.notes.contains(&NOTE_FORMAL.to_string()));
        assert!(result.notes.contains(&NOTE_HASHTAGS.to_string()));
        assert!(result.notes.iter().any(|n| n == "מילים באנגלית: check, this, out"));

        let long = "מילה ".repeat(80);
        let result = engine().clean(&long).unwrap();
        assert!(result.notes.contains(&NOTE_LONG_TEXT.to_string()));
    }

    #[test]
    fn test_hebrew_helpers() {
        assert!(contains_hebrew("hello שלום"));
        assert!(!contains_hebrew("hello world"));
        assert_eq!(hebrew_word_count("שלום world מה קורה"), 3);
    }

    #[test]
    fn test_contains_banned_phrase_ignores_protected() {
        let qa = engine();
        assert!(qa.contains_banned_phrase("זה מדהים"));
        assert!(!qa.contains_banned_phrase("#מדהים"));
    }
}
