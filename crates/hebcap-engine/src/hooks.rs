//! Short-form video hooks: spoken openings for the first seconds of a clip.
//!
//! Each hook type has three templates per vibe. The first fills the base
//! hook, the second the A/B variant. Filled text goes through the QA scrub so
//! no banned phrase reaches the output, whatever the topic.

use std::sync::Arc;

use hebcap_models::{
    ClientVibe, ContentError, ContentResult, Hook, HookInput, HookOutput, HookPackage, HookType,
    HookVariation, Platform,
};
use tracing::{debug, info, warn};

use crate::hashtags::normalize_tag;
use crate::lexicon::{ByPlatform, ByVibe, Entry, Lexicon};
use crate::metrics;
use crate::platform::tone_profile_for;
use crate::qa::{normalize_whitespace, tidy, Anchor, Masked, QaEngine, RuleSet};

const TOPIC_SLOT: &str = "{topic}";
const SCRIPT_STARTERS: usize = 3;
const WORDS_PER_SECOND: usize = 3;
const MIN_SECONDS: usize = 2;
const MAX_SECONDS: usize = 5;

/// Filler words dropped from TikTok hooks.
const FILLERS: &[&str] = &["בעצם", "כאילו", "אז", "נו"];

type Templates = ByVibe<[&'static str; 3]>;

static QUESTION: Templates = ByVibe {
    casual: [
        "מה אם אגיד לכם ש{topic}?",
        "רגע, אתם באמת חושבים ש{topic}?",
        "למה אף אחד לא מדבר על {topic}?",
    ],
    educational: [
        "ידעתם ש{topic}?",
        "איך בעצם עובד {topic}?",
        "מה ההבדל בין {topic}?",
    ],
    motivational: [
        "מה מונע ממך {topic}?",
        "למה אתם עדיין לא {topic}?",
        "מוכנים לשנות את {topic}?",
    ],
    sales: [
        "רוצים לדעת איך {topic}?",
        "מחפשים פתרון ל{topic}?",
        "נמאס לכם מ{topic}?",
    ],
};

static BOLD_STATEMENT: Templates = ByVibe {
    casual: [
        "{topic} - וזהו, נקודה.",
        "אני אומר את זה - {topic}.",
        "בואו נדבר על {topic}.",
    ],
    educational: [
        "הנה האמת על {topic}.",
        "{topic} - והמחקר מראה את זה.",
        "זה מה שלא מספרים לכם על {topic}.",
    ],
    motivational: [
        "אתם יכולים {topic}.",
        "{topic} - ואני הולך להוכיח לכם.",
        "היום זה היום ש{topic}.",
    ],
    sales: [
        "ככה עושים {topic}.",
        "{topic} - והנה איך.",
        "תעצרו הכל - {topic}.",
    ],
};

static STORY: Templates = ByVibe {
    casual: [
        "אז לפני שבוע קרה לי משהו מטורף עם {topic}...",
        "סיפור קצר על {topic}...",
        "הייתי בדיוק באמצע {topic} כש...",
    ],
    educational: [
        "כשהתחלתי לחקור {topic}, גיליתי ש...",
        "הנה מה שלמדתי על {topic}...",
        "לפני שנה גיליתי משהו על {topic}...",
    ],
    motivational: [
        "לפני שנה הייתי במקום אחר לגמרי עם {topic}...",
        "הרגע שהכל השתנה עם {topic}...",
        "כשהכל התחיל להתפרק, {topic}...",
    ],
    sales: [
        "לקוח שלי בא אליי עם בעיה של {topic}...",
        "מישהו שאל אותי על {topic} ו...",
        "קיבלתי הודעה על {topic}...",
    ],
};

static STATISTIC: Templates = ByVibe {
    casual: [
        "רוב האנשים לא יודעים את זה על {topic}.",
        "8 מתוך 10 אנשים טועים לגבי {topic}.",
        "רק מעטים מצליחים ב{topic}.",
    ],
    educational: [
        "מחקרים מראים ש{topic}.",
        "הנתונים מדברים - {topic}.",
        "לפי המספרים, {topic}.",
    ],
    motivational: [
        "רק 5% מהאנשים באמת {topic}.",
        "הסטטיסטיקה נגדכם, אבל {topic}.",
        "אתם במיעוט אם {topic}.",
    ],
    sales: [
        "הלקוחות שלנו ראו שיפור אמיתי ב{topic}.",
        "בממוצע, אנשים חוסכים זמן על {topic}.",
        "רוב מי שניסה {topic} חזר לעוד.",
    ],
};

static CONTROVERSIAL: Templates = ByVibe {
    casual: [
        "דעה לא פופולרית: {topic}.",
        "אני הולך לעצבן אנשים עכשיו - {topic}.",
        "אני יודע שזה שנוי במחלוקת, אבל {topic}.",
    ],
    educational: [
        "כולם טועים לגבי {topic}.",
        "בניגוד למה שלימדו אתכם, {topic}.",
        "הנה למה המומחים לא צודקים על {topic}.",
    ],
    motivational: [
        "תפסיקו להאמין שאתם לא יכולים {topic}.",
        "כולם אמרו לי שזה בלתי אפשרי, אבל {topic}.",
        "הגיע הזמן לשבור את המיתוס על {topic}.",
    ],
    sales: [
        "המתחרים לא רוצים שתדעו על {topic}.",
        "למה כולם משלמים יותר מדי על {topic}?",
        "מה שלא מספרים לכם על {topic}.",
    ],
};

static CURIOSITY_GAP: Templates = ByVibe {
    casual: [
        "זה הדבר שאף אחד לא מספר לכם על {topic}...",
        "חכו לסוף כדי לראות מה קורה עם {topic}.",
        "מה שאני עומד לחשוף על {topic}...",
    ],
    educational: [
        "יש סיבה נסתרת למה {topic}...",
        "הנה מה שחסר לכם על {topic}...",
        "הפרט הזה על {topic} משנה הכל...",
    ],
    motivational: [
        "גיליתי משהו שכולם צריכים לדעת על {topic}...",
        "אחרי שתראו את זה, {topic} לא יהיה אותו דבר.",
        "הדבר הקטן הזה שינה לי את {topic}...",
    ],
    sales: [
        "יש דבר אחד שמבדיל אותנו בנושא {topic}...",
        "השינוי הקטן הזה ב{topic} עשה את כל ההבדל...",
        "הנה למה הלקוחות שלנו לא חוזרים לדרך הישנה של {topic}...",
    ],
};

static DIRECT_ADDRESS: Templates = ByVibe {
    casual: [
        "אם אתם מתמודדים עם {topic}, תשמעו.",
        "זה בשבילכם אם {topic}.",
        "עצרו - אם {topic}, אתם צריכים לראות את זה.",
    ],
    educational: [
        "אם אתם רוצים להבין {topic}, הנה המדריך.",
        "למי שמחפש ללמוד על {topic}.",
        "בשבילכם שרוצים לדעת יותר על {topic}.",
    ],
    motivational: [
        "אם נמאס לכם מ{topic}, הנה הפתרון.",
        "לכל מי שחולם על {topic} - זה הזמן.",
        "אם אתם מוכנים לשנות את {topic}, תתחילו כאן.",
    ],
    sales: [
        "אם אתם עדיין סובלים מ{topic}, יש פתרון.",
        "למי ששואל איך {topic} - הנה התשובה.",
        "אם אתם מחפשים {topic}, מצאתם.",
    ],
};

static VISUALS: ByPlatform<&str> = ByPlatform {
    tiktok: "תקריב פנים עם אנרגיה גבוהה, תנועת ידיים דינמית",
    instagram: "קומפוזיציה אסתטית, תאורה טובה, מבט ישיר למצלמה",
    youtube_shorts: "מסגור ברור, רקע נקי, הבעת פנים מסקרנת",
};

static ENGAGEMENT_TIPS: ByVibe<[&str; 3]> = ByVibe {
    casual: [
        "דברו בגובה העיניים, כמו לחבר",
        "השתמשו בשפה יומיומית ואותנטית",
        "אל תפחדו מהומור קליל",
    ],
    educational: [
        "התחילו מהנקודה החשובה ביותר",
        "השתמשו במספרים ועובדות",
        "הבטיחו ערך ברור תוך שניות",
    ],
    motivational: [
        "דברו באנרגיה ובביטחון",
        "השתמשו בשפת גוף פתוחה",
        "צרו קשר עין עם המצלמה",
    ],
    sales: [
        "התמקדו בבעיה לפני הפתרון",
        "הראו למה עכשיו זה הזמן",
        "הציגו תוצאות, לא תכונות",
    ],
};

/// Hook types tried first when picking the recommended hook.
static VIBE_PRIORITY: ByVibe<[HookType; 2]> = ByVibe {
    casual: [HookType::Question, HookType::BoldStatement],
    educational: [HookType::Statistic, HookType::CuriosityGap],
    motivational: [HookType::DirectAddress, HookType::Story],
    sales: [HookType::CuriosityGap, HookType::DirectAddress],
};

fn templates(hook_type: HookType) -> &'static Templates {
    match hook_type {
        HookType::Question => &QUESTION,
        HookType::BoldStatement => &BOLD_STATEMENT,
        HookType::Story => &STORY,
        HookType::Statistic => &STATISTIC,
        HookType::Controversial => &CONTROVERSIAL,
        HookType::CuriosityGap => &CURIOSITY_GAP,
        HookType::DirectAddress => &DIRECT_ADDRESS,
    }
}

/// Platforms each hook type works best on.
pub fn platform_fit(hook_type: HookType) -> &'static [Platform] {
    use Platform::{Instagram, TikTok, YoutubeShorts};
    match hook_type {
        HookType::Question => &[TikTok, Instagram, YoutubeShorts],
        HookType::BoldStatement => &[TikTok, Instagram],
        HookType::Story => &[YoutubeShorts, Instagram],
        HookType::Statistic => &[YoutubeShorts, Instagram],
        HookType::Controversial => &[TikTok],
        HookType::CuriosityGap => &[TikTok, YoutubeShorts],
        HookType::DirectAddress => &[Instagram, YoutubeShorts],
    }
}

pub fn engagement_note(hook_type: HookType) -> &'static str {
    match hook_type {
        HookType::Question => "שאלות מעוררות סקרנות ומושכות תגובות",
        HookType::BoldStatement => "טענה נועזת תופסת תשומת לב ומייצרת שיתופים",
        HookType::Story => "סיפור יוצר חיבור רגשי ומחזיק צפייה עד הסוף",
        HookType::Statistic => "מספרים מוסיפים אמינות ומשאירים צופים",
        HookType::Controversial => "עמדה שנויה במחלוקת מייצרת דיון בתגובות",
        HookType::CuriosityGap => "פער סקרנות מעודד צפייה מלאה",
        HookType::DirectAddress => "פנייה ישירה יוצרת תחושת רלוונטיות אישית",
    }
}

/// Spoken length of a hook, at about three Hebrew words per second.
pub fn estimate_duration(text: &str) -> String {
    let words = text.split_whitespace().count();
    let seconds = (words / WORDS_PER_SECOND + 1).clamp(MIN_SECONDS, MAX_SECONDS);
    format!("{seconds}-{} שניות", seconds + 1)
}

/// Generates hook packages over one lexicon.
#[derive(Debug, Clone)]
pub struct HookAgent {
    lexicon: Arc<Lexicon>,
    qa: QaEngine,
    fillers: RuleSet,
}

impl Default for HookAgent {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl HookAgent {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        let fillers: Vec<Entry> = FILLERS.iter().map(|f| Entry::new(*f, "")).collect();
        Self {
            qa: QaEngine::new(Arc::clone(&lexicon)),
            fillers: RuleSet::with_anchor(&fillers, Anchor::WholeWord),
            lexicon,
        }
    }

    /// Build hooks for every requested type, with per-platform variations.
    ///
    /// Fails on invalid input, or when nothing of the topic survives the
    /// banned-phrase scrub.
    pub fn process(&self, input: &HookInput) -> ContentResult<HookOutput> {
        if let Err(e) = input.validate() {
            warn!(error = %e, "Rejected hook input");
            metrics::record_validation_failure();
            return Err(e);
        }

        let topic = self.qa.scrub(&input.video_topic);
        if topic.is_empty() {
            metrics::record_validation_failure();
            return Err(ContentError::EmptyTopic);
        }
        let key_message = self.qa.scrub(&input.key_message);
        let vibe = input.client_vibe;

        let packages: Vec<HookPackage> = input
            .effective_hook_types()
            .into_iter()
            .map(|hook_type| self.package(hook_type, &topic, vibe, &input.platforms))
            .collect();

        let recommended_hook = recommend(&packages, vibe);
        let script_starters = packages
            .iter()
            .take(SCRIPT_STARTERS)
            .map(|p| {
                let starter = [p.base_hook.text.as_str(), key_message.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.qa.scrub(&starter)
            })
            .collect();

        let output = HookOutput {
            input_summary: self.summary(input, &topic),
            recommended_hook,
            script_starters,
            general_tips: ENGAGEMENT_TIPS.get(vibe).iter().map(|t| t.to_string()).collect(),
            hooks: packages,
        };

        info!(
            vibe = vibe.as_str(),
            hooks = output.hooks.len(),
            recommended = output.recommended_hook.hook_type.as_str(),
            "Hook package ready"
        );
        Ok(output)
    }

    fn package(
        &self,
        hook_type: HookType,
        topic: &str,
        vibe: ClientVibe,
        platforms: &[Platform],
    ) -> HookPackage {
        let [first, second, _] = templates(hook_type).get(vibe);
        let text = self.fill(first, topic);
        let variant = self.fill(second, topic);

        let platform_variations = platforms
            .iter()
            .map(|platform| HookVariation {
                platform: *platform,
                hook_text: self.optimize(*platform, &text),
                visual_suggestion: VISUALS.get(*platform).to_string(),
                text_overlay: text_overlay(*platform, topic),
            })
            .collect();

        metrics::record_hook(hook_type);
        debug!(hook_type = hook_type.as_str(), words = text.split_whitespace().count(), "Built hook");

        HookPackage {
            hook_type,
            base_hook: Hook {
                hook_type,
                duration_estimate: estimate_duration(&text),
                platform_fit: platform_fit(hook_type).to_vec(),
                engagement_notes: engagement_note(hook_type).to_string(),
                text: text.clone(),
            },
            platform_variations,
            ab_test_variant: (variant != text).then_some(variant),
        }
    }

    fn fill(&self, template: &str, topic: &str) -> String {
        self.qa.scrub(&template.replace(TOPIC_SLOT, topic))
    }

    /// TikTok hooks lose filler words; other platforms keep the base text.
    /// Removing a filler can bring a banned phrase together, so the trimmed
    /// hook is scrubbed again.
    pub fn optimize(&self, platform: Platform, text: &str) -> String {
        if platform != Platform::TikTok {
            return text.to_string();
        }
        let masked = Masked::new(&normalize_whitespace(text));
        let (trimmed, removed) = self.fillers.rewrite(&masked.text);
        if removed.is_empty() {
            return masked.restore(&masked.text);
        }
        self.qa.scrub(&masked.restore(&tidy(&trimmed)))
    }

    fn summary(&self, input: &HookInput, topic: &str) -> String {
        let audience = match self.qa.scrub(&input.target_audience) {
            a if a.is_empty() => self.lexicon.default_audience.clone(),
            a => a,
        };
        let names: Vec<&str> = input
            .platforms
            .iter()
            .map(|p| tone_profile_for(*p).display_name.as_str())
            .collect();
        format!(
            "נושא: {topic} | קהל יעד: {audience} | טון: {} | פלטפורמות: {}",
            input.client_vibe.hebrew_label(),
            names.join(", ")
        )
    }
}

/// First hook matching the vibe's preferred types, else the first hook.
fn recommend(packages: &[HookPackage], vibe: ClientVibe) -> Hook {
    VIBE_PRIORITY
        .get(vibe)
        .iter()
        .find_map(|preferred| packages.iter().find(|p| p.hook_type == *preferred))
        .or_else(|| packages.first())
        .map(|p| p.base_hook.clone())
        .unwrap_or_else(|| Hook {
            hook_type: HookType::Question,
            text: String::new(),
            duration_estimate: estimate_duration(""),
            platform_fit: Vec::new(),
            engagement_notes: String::new(),
        })
}

/// Hashtag-style overlay for the fast platforms, a short title for YouTube.
fn text_overlay(platform: Platform, topic: &str) -> String {
    match platform {
        Platform::TikTok | Platform::Instagram => {
            normalize_tag(topic).unwrap_or_else(|| topic.to_string())
        }
        Platform::YoutubeShorts => format!("כדאי לדעת על {topic}"),
    }
}

/// Render a hook output for the terminal.
pub fn format_hook_output(output: &HookOutput) -> String {
    let recommended = &output.recommended_hook;
    let mut lines = vec![
        format!("Input: {}", output.input_summary),
        String::new(),
        format!("Recommended hook [{}]: {}", recommended.hook_type, recommended.text),
        format!("Duration: {}", recommended.duration_estimate),
        format!("Notes: {}", recommended.engagement_notes),
        String::new(),
        "Hooks:".to_string(),
    ];
    for package in &output.hooks {
        lines.push(format!("  [{}] {}", package.hook_type, package.base_hook.text));
        if let Some(variant) = &package.ab_test_variant {
            lines.push(format!("    A/B: {variant}"));
        }
        for variation in &package.platform_variations {
            lines.push(format!(
                "    {}: {} ({})",
                tone_profile_for(variation.platform).display_name,
                variation.hook_text,
                variation.text_overlay
            ));
        }
    }
    lines.push(String::new());
    lines.push("Script starters:".to_string());
    lines.extend(
        output
            .script_starters
            .iter()
            .enumerate()
            .map(|(i, s)| format!("  {}. {s}", i + 1)),
    );
    lines.push(String::new());
    lines.push("Tips:".to_string());
    lines.extend(output.general_tips.iter().map(|t| format!("  • {t}")));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(vibe: ClientVibe, types: &[HookType]) -> HookInput {
        HookInput::new(
            "שינה טובה",
            "הורים",
            "הנה שלושה טיפים",
            vibe,
            &[Platform::TikTok, Platform::YoutubeShorts],
            types,
        )
        .unwrap()
    }

    #[test]
    fn test_all_types_by_default() {
        let output = HookAgent::default()
            .process(&input(ClientVibe::Casual, &[]))
            .unwrap();
        let types: Vec<HookType> = output.hooks.iter().map(|p| p.hook_type).collect();
        assert_eq!(types, HookType::ALL.to_vec());
        assert_eq!(output.script_starters.len(), 3);
        assert_eq!(output.general_tips.len(), 3);
    }

    #[test]
    fn test_topic_is_filled() {
        let output = HookAgent::default()
            .process(&input(ClientVibe::Casual, &[HookType::Question]))
            .unwrap();
        let hook = &output.hooks[0];
        assert_eq!(hook.base_hook.text, "מה אם אגיד לכם ששינה טובה?");
        assert_eq!(
            hook.ab_test_variant.as_deref(),
            Some("רגע, אתם באמת חושבים ששינה טובה?")
        );
        assert!(!hook.base_hook.text.contains(TOPIC_SLOT));
    }

    #[test]
    fn test_recommended_follows_vibe_priority() {
        let agent = HookAgent::default();
        let output = agent.process(&input(ClientVibe::Sales, &[])).unwrap();
        assert_eq!(output.recommended_hook.hook_type, HookType::CuriosityGap);

        let output = agent
            .process(&input(ClientVibe::Sales, &[HookType::Story, HookType::DirectAddress]))
            .unwrap();
        assert_eq!(output.recommended_hook.hook_type, HookType::DirectAddress);

        let output = agent
            .process(&input(ClientVibe::Casual, &[HookType::Story]))
            .unwrap();
        assert_eq!(output.recommended_hook.hook_type, HookType::Story);
    }

    #[test]
    fn test_tiktok_drops_fillers() {
        let agent = HookAgent::default();
        assert_eq!(
            agent.optimize(Platform::TikTok, "אז איך בעצם עובד זה?"),
            "איך עובד זה?"
        );
        assert_eq!(
            agent.optimize(Platform::YoutubeShorts, "אז איך בעצם עובד זה?"),
            "אז איך בעצם עובד זה?"
        );
    }

    #[test]
    fn test_tiktok_filler_removal_does_not_join_banned_phrase() {
        let agent = HookAgent::default();
        let qa = QaEngine::default();
        let trimmed = agent.optimize(Platform::TikTok, "לא אז תאמינו כמה זה קל");
        assert!(!qa.contains_banned_phrase(&trimmed), "{trimmed}");
        assert_eq!(trimmed, "כמה זה קל");
    }

    #[test]
    fn test_text_overlays() {
        assert_eq!(text_overlay(Platform::TikTok, "שינה טובה"), "#שינהטובה");
        assert_eq!(text_overlay(Platform::YoutubeShorts, "שינה"), "כדאי לדעת על שינה");
        assert_eq!(text_overlay(Platform::Instagram, "שינה!"), "שינה!");
    }

    #[test]
    fn test_duration_estimate_is_clamped() {
        assert_eq!(estimate_duration("מילה"), "2-3 שניות");
        assert_eq!(estimate_duration("א ב ג ד ה ו ז ח ט"), "4-5 שניות");
        assert_eq!(estimate_duration(&"מילה ".repeat(40)), "5-6 שניות");
    }

    #[test]
    fn test_hooks_free_of_banned_phrases() {
        let agent = HookAgent::default();
        let qa = QaEngine::default();
        for vibe in ClientVibe::ALL {
            let input = HookInput::new(
                "תוצאות מטורפות בכושר",
                "",
                "טיפ זהב שאסור לפספס",
                *vibe,
                Platform::ALL,
                &[],
            )
            .unwrap();
            let output = agent.process(&input).unwrap();
            for package in &output.hooks {
                assert!(!qa.contains_banned_phrase(&package.base_hook.text));
                for variation in &package.platform_variations {
                    assert!(!qa.contains_banned_phrase(&variation.hook_text));
                }
                if let Some(variant) = &package.ab_test_variant {
                    assert!(!qa.contains_banned_phrase(variant));
                }
            }
            for starter in &output.script_starters {
                assert!(!qa.contains_banned_phrase(starter), "{starter}");
            }
        }
    }

    #[test]
    fn test_topic_scrubbed_to_nothing_is_rejected() {
        let input = HookInput::new("וואו", "", "", ClientVibe::Casual, &[Platform::TikTok], &[])
            .unwrap();
        assert_eq!(
            HookAgent::default().process(&input),
            Err(ContentError::EmptyTopic)
        );
    }

    #[test]
    fn test_summary_and_format() {
        let output = HookAgent::default()
            .process(&input(ClientVibe::Educational, &[HookType::Statistic]))
            .unwrap();
        assert_eq!(
            output.input_summary,
            "נושא: שינה טובה | קהל יעד: הורים | טון: לימודי | פלטפורמות: TikTok, YouTube Shorts"
        );
        let text = format_hook_output(&output);
        assert!(text.contains("Recommended hook [statistic]: מחקרים מראים ששינה טובה."));
        assert!(text.contains("    TikTok: "));
        assert!(text.contains("  1. מחקרים מראים ששינה טובה. הנה שלושה טיפים"));
    }
}
