//! Protected-span masking.
//!
//! URLs, mentions, hashtags, emoji sequences and Latin words are cut out of
//! the text and replaced by a single private-use sentinel character each.
//! Rule passes and cleanup only ever see the sentinel, so restoring the spans
//! in order gives them back character for character.

use std::slice;
use std::sync::LazyLock;

use regex::Regex;

/// Placeholder standing in for one protected span.
pub const SENTINEL: char = '\u{E000}';

/// Trailing characters a URL match gives back to the surrounding text.
const URL_TRAILING: &[char] = &['.', ',', '!', '?', ';', ':', ')', ']', '"', '\''];

/// Alternation order decides ties at the same start position.
static PROTECTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<url>(?:https?://|www\.)\S+)",
        r"|(?P<mention>@[\p{L}\p{N}_](?:[\p{L}\p{N}_.]*[\p{L}\p{N}_])?)",
        r"|(?P<hashtag>#[\p{L}\p{M}\p{N}_]+)",
        r"|(?P<emoji>[\p{Extended_Pictographic}\x{1F1E6}-\x{1F1FF}]",
        r"[\p{Extended_Pictographic}\x{1F1E6}-\x{1F1FF}\x{1F3FB}-\x{1F3FF}\x{200D}\x{FE0F}\x{20E3}]*)",
        r"|(?P<latin>\b[A-Za-z][A-Za-z0-9]*(?:['’\-][A-Za-z0-9]+)*\b)",
        r"|(?P<reserved>\x{E000})",
    ))
    .unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Url,
    Mention,
    Hashtag,
    Emoji,
    Latin,
    /// A literal sentinel character that was already in the input
    Reserved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub kind: SpanKind,
    pub text: String,
}

/// Text with its protected spans swapped out for sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Masked {
    pub text: String,
    pub spans: Vec<ProtectedSpan>,
}

impl Masked {
    /// Mask every protected span in `text`.
    pub fn new(text: &str) -> Self {
        let mut masked = String::with_capacity(text.len());
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(caps) = PROTECTED.captures_at(text, pos) {
            let Some(whole) = caps.get(0) else { break };
            let (kind, end) = if caps.name("url").is_some() {
                let url = whole.as_str().trim_end_matches(URL_TRAILING);
                (SpanKind::Url, whole.start() + url.len())
            } else if caps.name("mention").is_some() {
                (SpanKind::Mention, whole.end())
            } else if caps.name("hashtag").is_some() {
                (SpanKind::Hashtag, whole.end())
            } else if caps.name("emoji").is_some() {
                (SpanKind::Emoji, whole.end())
            } else if caps.name("latin").is_some() {
                (SpanKind::Latin, whole.end())
            } else {
                (SpanKind::Reserved, whole.end())
            };

            // A URL trimmed down to its scheme is not worth protecting.
            if end <= whole.start() + 4 && kind == SpanKind::Url {
                masked.push_str(&text[pos..whole.end()]);
                pos = whole.end();
                continue;
            }

            masked.push_str(&text[pos..whole.start()]);
            masked.push(SENTINEL);
            spans.push(ProtectedSpan {
                kind,
                text: text[whole.start()..end].to_string(),
            });
            pos = end;
        }
        masked.push_str(&text[pos..]);

        Self {
            text: masked,
            spans,
        }
    }

    /// Restore a text derived from this mask. Sentinels are filled in order;
    /// a derived text may drop trailing sentinels but never reorder them.
    pub fn restore(&self, text: &str) -> String {
        restore_with(text, &mut self.spans.iter())
    }

    pub fn has_kind(&self, kind: SpanKind) -> bool {
        self.spans.iter().any(|span| span.kind == kind)
    }
}

/// Fill sentinels from a shared span cursor, so consecutive pieces of one
/// masked text can be restored separately.
pub fn restore_with(text: &str, spans: &mut slice::Iter<'_, ProtectedSpan>) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch == SENTINEL {
            if let Some(span) = spans.next() {
                out.push_str(&span.text);
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(masked: &Masked) -> Vec<SpanKind> {
        masked.spans.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn test_masks_each_span_kind() {
        let text = "ראו https://example.com/a?b=1 ועקבו @dana.levi #טיפים 🔥 Google";
        let masked = Masked::new(text);
        assert_eq!(
            kinds(&masked),
            vec![
                SpanKind::Url,
                SpanKind::Mention,
                SpanKind::Hashtag,
                SpanKind::Emoji,
                SpanKind::Latin
            ]
        );
        assert_eq!(masked.text.matches(SENTINEL).count(), 5);
        assert_eq!(masked.restore(&masked.text), text);
    }

    #[test]
    fn test_url_gives_back_trailing_punctuation() {
        let masked = Masked::new("כנסו ל-www.site.co.il.");
        assert_eq!(masked.spans[0].text, "www.site.co.il");
        assert!(masked.text.ends_with('.'));
    }

    #[test]
    fn test_mention_does_not_keep_trailing_dot() {
        let masked = Masked::new("תודה @noa.");
        assert_eq!(masked.spans[0].text, "@noa");
        assert!(masked.text.ends_with(&format!("{SENTINEL}.")));
    }

    #[test]
    fn test_emoji_sequence_is_one_span() {
        let masked = Masked::new("משפחה 👨‍👩‍👧 ודגל 🇮🇱 ויד 👍🏽");
        assert_eq!(kinds(&masked), vec![SpanKind::Emoji; 3]);
        assert_eq!(masked.spans[0].text, "👨‍👩‍👧");
        assert_eq!(masked.spans[1].text, "🇮🇱");
        assert_eq!(masked.spans[2].text, "👍🏽");
    }

    #[test]
    fn test_latin_words_and_contractions() {
        let masked = Masked::new("זה don't work ב-AI");
        let texts: Vec<&str> = masked.spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["don't", "work", "AI"]);
    }

    #[test]
    fn test_literal_sentinel_round_trips() {
        let text = format!("א{SENTINEL}ב");
        let masked = Masked::new(&text);
        assert_eq!(kinds(&masked), vec![SpanKind::Reserved]);
        assert_eq!(masked.restore(&masked.text), text);
    }

    #[test]
    fn test_restore_with_shared_cursor() {
        let masked = Masked::new("#one טקסט #two");
        let mut cursor = masked.spans.iter();
        let (first, second) = masked.text.split_at(masked.text.find(' ').unwrap());
        let a = restore_with(first, &mut cursor);
        let b = restore_with(second, &mut cursor);
        assert_eq!(a, "#one");
        assert_eq!(b, " טקסט #two");
    }
}
