//! Platform adapter: tone profiles, posting advice and tone adjustments.

use std::sync::{Arc, LazyLock};

use hebcap_models::{
    ClientVibe, ContentResult, CtaSoftness, EmojiDensity, Pace, Platform, Register, ToneProfile,
};

use crate::lexicon::{ByPlatform, Lexicon};
use crate::qa::{normalize_whitespace, tidy, Anchor, Masked, QaEngine, RuleSet};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

static PROFILES: LazyLock<ByPlatform<ToneProfile>> = LazyLock::new(|| ByPlatform {
    tiktok: ToneProfile {
        platform: Platform::TikTok,
        display_name: "TikTok".to_string(),
        display_name_hebrew: "טיקטוק".to_string(),
        tone: "fast + casual".to_string(),
        pace: Pace::Fast,
        register: Register::Playful,
        cta_softness: CtaSoftness::Moderate,
        emoji_density: EmojiDensity::Minimal,
        posting_windows: strings(&["19:00-22:00 ימי חול", "12:00-15:00 סופ״ש"]),
        posting_hint: "בטיקטוק חשוב להעלות בתדירות גבוהה - לפחות פעם ביום".to_string(),
        characteristics: strings(&["קצר וקליט", "אנרגיה גבוהה", "שפה צעירה", "טרנדי"]),
        short_caption_budget: 80,
        long_caption_limit: 350,
        max_hashtags: 8,
    },
    instagram: ToneProfile {
        platform: Platform::Instagram,
        display_name: "Instagram".to_string(),
        display_name_hebrew: "אינסטגרם".to_string(),
        tone: "emotional + clean".to_string(),
        pace: Pace::Measured,
        register: Register::Emotional,
        cta_softness: CtaSoftness::Subtle,
        emoji_density: EmojiDensity::Moderate,
        posting_windows: strings(&[
            "11:00-13:00 ימי חול",
            "19:00-21:00 ערב",
            "10:00-12:00 שישי",
        ]),
        posting_hint: "באינסטגרם כדאי להיות אקטיבי בסטוריז לפני ואחרי הפוסט".to_string(),
        characteristics: strings(&["רגשי ומחובר", "ויזואלי", "נקי ומסודר", "אסתטי"]),
        short_caption_budget: 125,
        long_caption_limit: 700,
        max_hashtags: 20,
    },
    youtube_shorts: ToneProfile {
        platform: Platform::YoutubeShorts,
        display_name: "YouTube Shorts".to_string(),
        display_name_hebrew: "יוטיוב שורטס".to_string(),
        tone: "authority + clarity".to_string(),
        pace: Pace::Measured,
        register: Register::Authoritative,
        cta_softness: CtaSoftness::Direct,
        emoji_density: EmojiDensity::Minimal,
        posting_windows: strings(&["15:00-18:00 ימי חול", "20:00-22:00 ערב"]),
        posting_hint: "ביוטיוב שורטס חשובים הכותרת והתיאור ל-SEO".to_string(),
        characteristics: strings(&["סמכותי", "ברור", "ערך מוסף", "מקצועי"]),
        short_caption_budget: 100,
        long_caption_limit: 300,
        max_hashtags: 10,
    },
});

/// Tone profile for a platform.
pub fn tone_profile_for(platform: Platform) -> &'static ToneProfile {
    PROFILES.get(platform)
}

/// Tone profile for a platform identifier, aliases included.
pub fn tone_profile_for_id(id: &str) -> ContentResult<&'static ToneProfile> {
    let platform = id.parse::<Platform>()?;
    Ok(tone_profile_for(platform))
}

/// Platform-facing advice and wording adjustments.
#[derive(Debug, Clone)]
pub struct PlatformAdapter {
    lexicon: Arc<Lexicon>,
    tone_rules: ByPlatform<RuleSet>,
    qa: QaEngine,
}

impl Default for PlatformAdapter {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl PlatformAdapter {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let adjustments = &lexicon.tone_adjustments;
        let tone_rules = ByPlatform {
            tiktok: RuleSet::with_anchor(&adjustments.tiktok, Anchor::WholeWord),
            instagram: RuleSet::with_anchor(&adjustments.instagram, Anchor::WholeWord),
            youtube_shorts: RuleSet::with_anchor(&adjustments.youtube_shorts, Anchor::WholeWord),
        };
        Self {
            qa: QaEngine::new(Arc::clone(&lexicon)),
            lexicon,
            tone_rules,
        }
    }

    pub fn profile(&self, platform: Platform) -> &'static ToneProfile {
        tone_profile_for(platform)
    }

    /// Apply the platform's whole-word tone adjustments to one line of text.
    /// Protected spans are left as they are.
    ///
    /// A deletion can join the words around it into a banned phrase, so
    /// adjusted text is scrubbed again before it is returned.
    pub fn adjust_tone(&self, platform: Platform, text: &str) -> String {
        let rules = self.tone_rules.get(platform);
        if rules.is_empty() || text.trim().is_empty() {
            return text.trim().to_string();
        }
        let masked = Masked::new(&normalize_whitespace(text));
        let (adjusted, rewrites) = rules.rewrite(&masked.text);
        if rewrites.is_empty() {
            return masked.restore(&masked.text);
        }
        self.qa.scrub(&masked.restore(&tidy(&adjusted)))
    }

    /// Posting windows, vibe timing advice and platform advice.
    pub fn posting_suggestion(&self, platform: Platform, vibe: ClientVibe) -> String {
        let profile = self.profile(platform);
        [
            format!("זמנים מומלצים: {}", profile.posting_windows.join(", ")),
            self.lexicon.vibe_posting_hints.get(vibe).clone(),
            profile.posting_hint.clone(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
    }

    /// Tone, leading characteristics, vibe alignment and emoji style.
    pub fn tone_notes(&self, platform: Platform, vibe: ClientVibe) -> String {
        let profile = self.profile(platform);
        let characteristics = profile
            .characteristics
            .iter()
            .take(3)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        [
            format!("טון {}: {}", profile.display_name_hebrew, profile.tone),
            format!("מאפיינים: {characteristics}"),
            self.lexicon.vibe_alignment.get(vibe).clone(),
            format!("אימוג׳י: {}", profile.emoji_density.as_str()),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
    }

    /// Multi-line overview of a platform profile.
    pub fn summary(&self, platform: Platform) -> String {
        let profile = self.profile(platform);
        [
            format!("פלטפורמה: {}", profile.display_name_hebrew),
            format!("טון: {}", profile.tone),
            format!("אורך מומלץ: עד {} תווים", profile.long_caption_limit),
            format!("מאפיינים: {}", profile.characteristics.join(", ")),
            format!("זמני פרסום: {}", profile.posting_windows.join(", ")),
        ]
        .join("\n")
    }
}
