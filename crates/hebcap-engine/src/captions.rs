//! Caption generation: a short hook caption (A) and a longer caption with a
//! soft call-to-action (B).

use std::sync::Arc;

use hebcap_models::{ClientVibe, Pace, ToneProfile};

use crate::lexicon::Lexicon;
use crate::platform::PlatformAdapter;
use crate::qa::{restore_with, Masked, QaEngine, SENTINEL};

const ELLIPSIS: &str = "...";
const KEY_MESSAGE_MAX_CHARS: usize = 80;
const KEY_MESSAGE_WORDS: usize = 12;
const CONDENSE_OVER_CHARS: usize = 300;
const CONDENSED_SENTENCES: usize = 4;

/// Punctuation dropped before an ellipsis is appended.
const TRAILING_PUNCT: &[char] = &[',', ';', ':', '.', '!', '?'];

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split text into sentences ending at `.`, `!` or `?` followed by a space or
/// the end. Punctuation inside protected spans does not count.
pub fn split_sentences(text: &str) -> Vec<String> {
    let masked = Masked::new(text);
    let mut cursor = masked.spans.iter();
    let chars: Vec<char> = masked.text.chars().collect();

    let mut sentences = Vec::new();
    let mut current = String::new();
    for (idx, ch) in chars.iter().enumerate() {
        current.push(*ch);
        let boundary = matches!(ch, '.' | '!' | '?')
            && chars.get(idx + 1).map_or(true, |next| next.is_whitespace());
        if boundary {
            let sentence = restore_with(current.trim(), &mut cursor);
            if !sentence.is_empty() {
                sentences.push(sentence);
            }
            current.clear();
        }
    }
    let rest = restore_with(current.trim(), &mut cursor);
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Whitespace-separated words, never splitting a protected span.
fn split_words(text: &str) -> Vec<String> {
    let masked = Masked::new(text);
    let mut cursor = masked.spans.iter();
    masked
        .text
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(|w| restore_with(w, &mut cursor))
        .collect()
}

fn with_ellipsis(text: &str) -> String {
    format!("{}{ELLIPSIS}", text.trim_end().trim_end_matches(TRAILING_PUNCT).trim_end())
}

/// Cut `text` at a word boundary so that it, plus an ellipsis, fits `budget`
/// characters. Text that already fits is returned unchanged.
///
/// Words and protected spans are never split: when not even the first word
/// fits, the result is empty.
pub fn truncate_words(text: &str, budget: usize) -> String {
    if char_len(text) <= budget {
        return text.to_string();
    }
    let room = budget.saturating_sub(ELLIPSIS.len());
    let words = split_words(text);

    let mut kept = String::new();
    for word in &words {
        let sep = usize::from(!kept.is_empty());
        if char_len(&kept) + sep + char_len(word) > room {
            break;
        }
        if sep == 1 {
            kept.push(' ');
        }
        kept.push_str(word);
    }

    if kept.is_empty() {
        return String::new();
    }
    with_ellipsis(&kept)
}

/// Fit text into `budget` by whole sentences, falling back to words.
fn fit_sentences(text: &str, budget: usize) -> String {
    if char_len(text) <= budget {
        return text.to_string();
    }
    let mut kept = String::new();
    for sentence in split_sentences(text) {
        let sep = usize::from(!kept.is_empty());
        if char_len(&kept) + sep + char_len(&sentence) > budget {
            break;
        }
        if sep == 1 {
            kept.push(' ');
        }
        kept.push_str(&sentence);
    }
    if kept.is_empty() {
        truncate_words(text, budget)
    } else {
        kept
    }
}

/// Builds caption pairs from cleaned text and a tone profile.
#[derive(Debug, Clone)]
pub struct CaptionGenerator {
    lexicon: Arc<Lexicon>,
    qa: QaEngine,
    adapter: PlatformAdapter,
}

impl Default for CaptionGenerator {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl CaptionGenerator {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            qa: QaEngine::new(Arc::clone(&lexicon)),
            adapter: PlatformAdapter::new(Arc::clone(&lexicon)),
            lexicon,
        }
    }

    /// Generate `(caption_a, caption_b)` for one platform.
    pub fn generate_captions(
        &self,
        cleaned_caption: &str,
        topic: &str,
        audience: &str,
        vibe: ClientVibe,
        profile: &ToneProfile,
    ) -> (String, String) {
        let caption_a = self.caption_a(cleaned_caption, topic, vibe, profile);
        let caption_b = self.caption_b(cleaned_caption, topic, audience, vibe, profile);
        (caption_a, caption_b)
    }

    /// Hook for the vibe. Question-like topics get the first hook that ends in
    /// `?` or `:`.
    pub fn select_hook(&self, topic: &str, vibe: ClientVibe) -> &str {
        let hooks = self.lexicon.hooks.get(vibe);
        let question_like = topic.contains('?') || topic.contains("למה") || topic.contains("איך");
        let chosen = if question_like {
            hooks
                .iter()
                .find(|hook| hook.ends_with('?') || hook.ends_with(':'))
                .or_else(|| hooks.first())
        } else {
            hooks.first()
        };
        chosen.map_or("", String::as_str)
    }

    /// First sentence of the caption, shortened to twelve words when long.
    /// An empty caption falls back to the topic.
    pub fn key_message(&self, cleaned_caption: &str, topic: &str) -> String {
        let Some(first) = split_sentences(cleaned_caption).into_iter().next() else {
            return topic.trim().to_string();
        };
        if char_len(&first) <= KEY_MESSAGE_MAX_CHARS {
            return first;
        }
        let words = split_words(&first);
        with_ellipsis(&words[..words.len().min(KEY_MESSAGE_WORDS)].join(" "))
    }

    fn caption_a(
        &self,
        cleaned_caption: &str,
        topic: &str,
        vibe: ClientVibe,
        profile: &ToneProfile,
    ) -> String {
        let platform = profile.platform;
        let hook = self.adapter.adjust_tone(platform, self.select_hook(topic, vibe));
        let key = self
            .adapter
            .adjust_tone(platform, &self.key_message(cleaned_caption, topic));
        let joined = [hook, key]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        truncate_words(&self.qa.scrub(&joined), profile.short_caption_budget)
    }

    /// Vibe context line with topic and audience filled in. None for a blank
    /// topic.
    pub fn context_line(&self, topic: &str, audience: &str, vibe: ClientVibe) -> Option<String> {
        let topic = topic.trim();
        if topic.is_empty() {
            return None;
        }
        let audience = match audience.trim() {
            "" => self.lexicon.default_audience.as_str(),
            audience => audience,
        };
        let line = self
            .lexicon
            .context_templates
            .get(vibe)
            .replace("{topic}", topic)
            .replace("{audience}", audience);
        // Template and user text can meet at the slot edges.
        Some(self.qa.scrub(&line))
    }

    fn caption_b(
        &self,
        cleaned_caption: &str,
        topic: &str,
        audience: &str,
        vibe: ClientVibe,
        profile: &ToneProfile,
    ) -> String {
        let platform = profile.platform;
        let separator = match profile.pace {
            Pace::Fast => " ",
            Pace::Measured => "\n\n",
        };
        let sep_len = char_len(separator);
        let limit = profile.long_caption_limit;
        let cta = self
            .lexicon
            .ctas
            .get(vibe)
            .get(profile.cta_softness)
            .clone();

        let mut context = self
            .context_line(topic, audience, vibe)
            .map(|line| self.adapter.adjust_tone(platform, &line))
            .unwrap_or_default();

        let body = if char_len(cleaned_caption) > CONDENSE_OVER_CHARS {
            split_sentences(cleaned_caption)
                .into_iter()
                .take(CONDENSED_SENTENCES)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            cleaned_caption.trim().to_string()
        };
        let mut body = self.adapter.adjust_tone(platform, &body);

        // The CTA always stays; the context line may shrink, the body first.
        let cta_room = limit.saturating_sub(char_len(&cta) + sep_len);
        if char_len(&context) > cta_room / 2 {
            context = truncate_words(&context, cta_room / 2);
        }
        let context_room = if context.is_empty() {
            0
        } else {
            char_len(&context) + sep_len
        };
        let body_room = cta_room.saturating_sub(context_room);
        if char_len(&body) > body_room {
            body = if body_room > ELLIPSIS.len() {
                fit_sentences(&body, body_room)
            } else {
                String::new()
            };
        }

        let mut parts: Vec<String> = [context, body]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect();
        self.decorate(&mut parts, char_len(&cta), separator, profile);

        parts.push(cta);
        parts.join(separator)
    }

    /// Append up to the profile's emoji allowance from the keyword map, each
    /// to the first part containing its keyword, without crossing the limit.
    fn decorate(&self, parts: &mut [String], cta_len: usize, separator: &str, profile: &ToneProfile) {
        let max = profile.emoji_density.max_emojis();
        let limit = profile.long_caption_limit;
        let mut added = 0;

        for entry in &self.lexicon.emoji_map {
            if added == max {
                break;
            }
            if parts.iter().any(|part| part.contains(entry.to.as_str())) {
                continue;
            }
            let Some(idx) = parts.iter().position(|part| part.contains(entry.from.as_str())) else {
                continue;
            };
            let total: usize = parts.iter().map(|p| char_len(p)).sum::<usize>()
                + parts.len() * char_len(separator)
                + cta_len;
            if total + 1 + char_len(&entry.to) > limit {
                continue;
            }
            parts[idx].push(' ');
            parts[idx].push_str(&entry.to);
            added += 1;
        }
    }
}

/// True when the text contains a protected-span placeholder. Generated
/// captions never do.
pub fn has_placeholder(text: &str) -> bool {
    text.contains(SENTINEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::tone_profile_for;
    use hebcap_models::Platform;

    fn generator() -> CaptionGenerator {
        CaptionGenerator::default()
    }

    #[test]
    fn test_split_sentences_respects_protected_spans() {
        let sentences = split_sentences("כנסו ל-www.site.co.il עכשיו. זה שווה! באמת?");
        assert_eq!(
            sentences,
            vec!["כנסו ל-www.site.co.il עכשיו.", "זה שווה!", "באמת?"]
        );
    }

    #[test]
    fn test_truncate_words_stays_in_budget() {
        let text = "אחת שתיים שלוש ארבע חמש שש שבע שמונה תשע עשר";
        let cut = truncate_words(text, 20);
        assert!(cut.chars().count() <= 20);
        assert!(cut.ends_with("..."));
        assert!(text.starts_with(cut.trim_end_matches("...")));
        assert_eq!(truncate_words("קצר", 20), "קצר");
    }

    #[test]
    fn test_truncate_never_splits_protected_span() {
        let text = "בדקו את https://example.com/a/very/long/path/here עכשיו";
        let cut = truncate_words(text, 30);
        assert_eq!(cut, "בדקו את...");
    }

    #[test]
    fn test_truncate_drops_leading_span_longer_than_budget() {
        let text = "https://example.com/a/very/long/path/that/keeps/going עכשיו";
        let cut = truncate_words(text, 30);
        assert_eq!(cut, "");
        assert!(!has_placeholder(&cut));

        let word = "א".repeat(40);
        assert_eq!(truncate_words(&word, 30), "");
        assert_eq!(truncate_words(&format!("{word} קצר"), 30), "");
    }

    #[test]
    fn test_hook_selection() {
        let gen = generator();
        assert_eq!(gen.select_hook("טיפים לשינה", ClientVibe::Casual), "אוקיי אז");
        // No casual hook ends in '?' or ':', so the default stays.
        assert_eq!(gen.select_hook("איך לישון טוב", ClientVibe::Casual), "אוקיי אז");
        assert_eq!(
            gen.select_hook("למה כדאי ללמוד", ClientVibe::Educational),
            "הנה משהו שלא ידעתם:"
        );
        assert_eq!(gen.select_hook("משהו?", ClientVibe::Motivational), "מה שאתם צריכים לשמוע:");
    }

    #[test]
    fn test_key_message() {
        let gen = generator();
        assert_eq!(gen.key_message("משפט ראשון. משפט שני.", "נושא"), "משפט ראשון.");
        assert_eq!(gen.key_message("", "נושא"), "נושא");

        let long = "מילה ".repeat(30);
        let key = gen.key_message(&long, "נושא");
        assert_eq!(key.split(' ').count(), 12);
        assert!(key.ends_with("..."));
    }

    #[test]
    fn test_caption_a_within_budget() {
        let gen = generator();
        let long = "זה משפט ארוך מאוד שממשיך וממשיך בלי לעצור אפילו לרגע אחד כי יש הרבה מה להגיד היום";
        for platform in Platform::ALL {
            let profile = tone_profile_for(*platform);
            let (a, _) = gen.generate_captions(long, "שינה", "הורים", ClientVibe::Casual, profile);
            assert!(a.chars().count() <= profile.short_caption_budget, "{a}");
            assert!(!a.is_empty());
        }
    }

    #[test]
    fn test_caption_b_ends_with_cta_and_fits() {
        let gen = generator();
        let lexicon = Lexicon::hebrew();
        let body = "זה משפט ראשון על הנושא. ".repeat(40);
        for platform in Platform::ALL {
            let profile = tone_profile_for(*platform);
            let (_, b) = gen.generate_captions(&body, "שינה", "הורים", ClientVibe::Sales, profile);
            let cta = lexicon.ctas.get(ClientVibe::Sales).get(profile.cta_softness);
            assert!(b.ends_with(cta.as_str()), "{b}");
            assert!(b.chars().count() <= profile.long_caption_limit, "{b}");
        }
    }

    #[test]
    fn test_caption_b_layout_by_pace() {
        let gen = generator();
        let text = "טיפ קטן לשינה טובה.";
        let (_, tiktok) = gen.generate_captions(
            text,
            "שינה",
            "",
            ClientVibe::Casual,
            tone_profile_for(Platform::TikTok),
        );
        assert!(!tiktok.contains('\n'));
        assert!(tiktok.starts_with("מדברים על שינה, במיוחד בשביל כולם."));

        let (_, instagram) = gen.generate_captions(
            text,
            "שינה",
            "",
            ClientVibe::Casual,
            tone_profile_for(Platform::Instagram),
        );
        assert_eq!(instagram.split("\n\n").count(), 3);
    }

    #[test]
    fn test_emoji_decoration_respects_density() {
        let gen = generator();
        let text = "טיפ חשוב על כסף ועבודה.";
        let (_, tiktok) = gen.generate_captions(
            text,
            "כסף",
            "עצמאים",
            ClientVibe::Educational,
            tone_profile_for(Platform::TikTok),
        );
        assert_eq!(tiktok.matches('💡').count(), 1);
        assert!(!tiktok.contains('⚡'));

        let (_, instagram) = gen.generate_captions(
            text,
            "כסף",
            "עצמאים",
            ClientVibe::Educational,
            tone_profile_for(Platform::Instagram),
        );
        assert!(instagram.contains('💡'));
        assert!(instagram.contains('⚡'));
    }

    #[test]
    fn test_context_line_is_scrubbed() {
        let gen = generator();
        let line = gen
            .context_line("תוצאות מטורפות", "כולם", ClientVibe::Casual)
            .unwrap();
        assert!(!line.contains("מטורפות"));
        assert!(gen.context_line("  ", "כולם", ClientVibe::Casual).is_none());
    }

    #[test]
    fn test_no_placeholders_leak() {
        let gen = generator();
        let (a, b) = gen.generate_captions(
            "ראו @dana ו-#טיפים 🔥 כאן.",
            "טיפים",
            "כולם",
            ClientVibe::Casual,
            tone_profile_for(Platform::Instagram),
        );
        assert!(!has_placeholder(&a));
        assert!(!has_placeholder(&b));
        assert!(b.contains("@dana"));
    }
}
