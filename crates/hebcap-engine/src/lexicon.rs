//! Lexicon store: every rule table and template the pipeline reads.
//!
//! A [`Lexicon`] is plain data. It is built once (see [`Lexicon::shared`]) and
//! handed to each component explicitly, so tests and other dialects can swap
//! in their own tables without touching any logic.
//!
//! Phrase keys are written with single spaces. Formal-to-casual keys whose
//! last word is a single prefix letter (e.g. `"ניתן ל"`) bind to the word that
//! follows them; all other formal, spelling and tone keys match whole words
//! only. Banned phrases match anywhere, including inside inflected words.

use std::sync::{Arc, LazyLock};

use hebcap_models::{ClientVibe, CtaSoftness, Platform};
use serde::{Deserialize, Serialize};

/// One `from → to` rewrite. An empty `to` deletes the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub from: String,
    pub to: String,
}

impl Entry {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A value per client vibe, matched exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByVibe<T> {
    pub casual: T,
    pub educational: T,
    pub motivational: T,
    pub sales: T,
}

impl<T> ByVibe<T> {
    pub fn get(&self, vibe: ClientVibe) -> &T {
        match vibe {
            ClientVibe::Casual => &self.casual,
            ClientVibe::Educational => &self.educational,
            ClientVibe::Motivational => &self.motivational,
            ClientVibe::Sales => &self.sales,
        }
    }
}

/// A value per platform, matched exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByPlatform<T> {
    pub tiktok: T,
    pub instagram: T,
    pub youtube_shorts: T,
}

impl<T> ByPlatform<T> {
    pub fn get(&self, platform: Platform) -> &T {
        match platform {
            Platform::TikTok => &self.tiktok,
            Platform::Instagram => &self.instagram,
            Platform::YoutubeShorts => &self.youtube_shorts,
        }
    }
}

/// A value per CTA softness level, matched exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BySoftness<T> {
    pub subtle: T,
    pub moderate: T,
    pub direct: T,
}

impl<T> BySoftness<T> {
    pub fn get(&self, softness: CtaSoftness) -> &T {
        match softness {
            CtaSoftness::Subtle => &self.subtle,
            CtaSoftness::Moderate => &self.moderate,
            CtaSoftness::Direct => &self.direct,
        }
    }
}

/// Topic-specific hashtag pool and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NichePool {
    pub name: String,
    pub keywords: Vec<String>,
    pub tags: Vec<String>,
}

/// All static tables driving QA, caption and hashtag generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    /// Marketing clichés and hype words, with neutral substitutes
    pub banned_phrases: Vec<Entry>,

    /// Formal or bureaucratic constructions and their spoken equivalents
    pub formal_to_casual: Vec<Entry>,

    /// Common misspellings, corrected on whole words only
    pub spelling_fixes: Vec<Entry>,

    /// Per-platform wording adjustments for generated captions
    pub tone_adjustments: ByPlatform<Vec<Entry>>,

    /// Caption openers per vibe; the first entry is the default
    pub hooks: ByVibe<Vec<String>>,

    /// Context line for caption B, with `{topic}` and `{audience}` slots
    pub context_templates: ByVibe<String>,

    /// Audience used when none was given
    pub default_audience: String,

    /// Soft calls-to-action, vibe × softness
    pub ctas: ByVibe<BySoftness<String>>,

    /// Posting-time advice per vibe (Hebrew)
    pub vibe_posting_hints: ByVibe<String>,

    /// How each vibe should sit within a platform's voice (Hebrew)
    pub vibe_alignment: ByVibe<String>,

    /// Keyword → emoji decorations, in priority order
    pub emoji_map: Vec<Entry>,

    /// Generic Israeli broad-reach hashtags
    pub broad_hashtags: Vec<String>,

    /// Platform-specific broad-reach hashtags
    pub platform_hashtags: ByPlatform<Vec<String>>,

    /// Niche pools in detection priority order
    pub niche_pools: Vec<NichePool>,

    /// Niche pool names used when no keyword matches
    pub default_niches: Vec<String>,
}

static SHARED: LazyLock<Arc<Lexicon>> = LazyLock::new(|| Arc::new(Lexicon::hebrew()));

fn entries(pairs: &[(&str, &str)]) -> Vec<Entry> {
    pairs.iter().map(|(from, to)| Entry::new(*from, *to)).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn niche(name: &str, keywords: &[&str], tags: &[&str]) -> NichePool {
    NichePool {
        name: name.to_string(),
        keywords: strings(keywords),
        tags: strings(tags),
    }
}

impl Lexicon {
    /// The process-wide default Israeli Hebrew lexicon, built on first use.
    pub fn shared() -> Arc<Lexicon> {
        Arc::clone(&SHARED)
    }

    /// Look up a niche pool by name.
    pub fn niche(&self, name: &str) -> Option<&NichePool> {
        self.niche_pools.iter().find(|pool| pool.name == name)
    }

    /// Every piece of template text the generators can emit verbatim.
    pub fn template_texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = Vec::new();
        for vibe in ClientVibe::ALL {
            texts.extend(self.hooks.get(*vibe).iter().map(String::as_str));
            texts.push(self.context_templates.get(*vibe));
            texts.push(self.vibe_posting_hints.get(*vibe));
            texts.push(self.vibe_alignment.get(*vibe));
            for softness in CtaSoftness::ALL {
                texts.push(self.ctas.get(*vibe).get(*softness));
            }
        }
        for platform in Platform::ALL {
            texts.extend(self.tone_adjustments.get(*platform).iter().map(|e| e.to.as_str()));
            texts.extend(self.platform_hashtags.get(*platform).iter().map(String::as_str));
        }
        texts.push(&self.default_audience);
        texts.extend(self.emoji_map.iter().map(|e| e.to.as_str()));
        texts.extend(self.broad_hashtags.iter().map(String::as_str));
        for pool in &self.niche_pools {
            texts.extend(pool.tags.iter().map(String::as_str));
        }
        texts
    }

    /// Default tables for spoken Israeli Hebrew.
    pub fn hebrew() -> Self {
        Self {
            banned_phrases: entries(&[
                ("הזדמנות אחרונה", "עכשיו זה הזמן"),
                ("מדהים", "מגניב"),
                ("מהפכני", "חדשני"),
                ("חוויה יוצאת דופן", "חוויה טובה"),
                ("פורץ דרך", "חדשני"),
                ("פורצת דרך", "חדשנית"),
                ("ייחודי במינו", "מיוחד"),
                ("ייחודית במינה", "מיוחדת"),
                ("משנה חיים", "עוזר ברצינות"),
                ("הצלחה מסחררת", "הצלחה"),
                ("תוצאות מטורפות", "תוצאות טובות"),
                ("לא תאמינו", ""),
                ("מה שקורה אחר כך יפתיע אתכם", ""),
                ("הסוד שאף אחד לא מספר", ""),
                ("הטריק ש", "הדרך ש"),
                ("שיטה סודית", "שיטה"),
                ("טיפ זהב", "טיפ טוב"),
                ("חייבים לדעת", "כדאי לדעת"),
                ("משהו ענק", "משהו טוב"),
                ("וואו", ""),
            ]),
            formal_to_casual: entries(&[
                ("אנו", "אנחנו"),
                ("הנכם", "אתם"),
                ("הננו", "אנחנו"),
                ("באפשרותך", "אתה יכול"),
                ("באפשרותכם", "אתם יכולים"),
                ("ניתן ל", "אפשר ל"),
                ("בהתאם ל", "לפי "),
                ("במידה ו", "אם "),
                ("לאור העובדה ש", "כי "),
                ("על מנת ש", "כדי ש"),
                ("על מנת ל", "כדי ל"),
                ("בגין", "בגלל"),
                ("לצורך", "בשביל"),
                ("אודות", "על"),
                ("הללו", "האלה"),
                ("לעיל", "למעלה"),
                ("להלן", "למטה"),
                ("בהמשך", "אחר כך"),
                ("לחילופין", "או"),
                ("כאמור", "כמו שאמרתי"),
                ("יצוין כי", ""),
                ("יש לציין כי", ""),
                ("ראוי לציין כי", ""),
                ("חשוב לציין כי", "חשוב ש"),
                ("אך ורק", "רק"),
                ("אך", "אבל"),
                ("אולם", "אבל"),
                ("בלבד", "רק"),
                ("כלל וכלל", "בכלל"),
                ("מן הראוי", "כדאי"),
                ("עקב", "בגלל"),
                ("הואיל ו", "כי "),
                ("כפי ש", "כמו ש"),
                ("אשר", "ש"),
                ("מאחר ו", "כי "),
                ("לפיכך", "אז"),
                ("אי לכך", "לכן"),
                ("עם זאת", "אבל"),
                ("יחד עם זאת", "אבל"),
                ("למרות זאת", "אבל בכל זאת"),
                ("כמו כן", "וגם"),
                ("בנוסף לכך", "וגם"),
                ("בנוסף", "וגם"),
                ("לסיכום", "בקיצור"),
                ("יבוצע על ידי", "יעשה"),
                ("יתבצע על ידי", "יעשה"),
                ("בוצע על ידי", "עשה"),
                ("נעשה על ידי", "עשה"),
                ("למעשה", ""),
                ("כביכול", ""),
                ("בעצם", ""),
                ("אם כך", "אז"),
                ("כי אם", "אלא"),
            ]),
            spelling_fixes: entries(&[
                ("פא", "פה"),
                ("אחלא", "אחלה"),
                ("סבבא", "סבבה"),
                ("יאלה", "יאללה"),
                ("עכשו", "עכשיו"),
                ("משו", "משהו"),
                ("מישו", "מישהו"),
                ("בבקשא", "בבקשה"),
                ("תודא", "תודה"),
                ("לעשוט", "לעשות"),
                ("בטוך", "בטוח"),
                ("בעמת", "באמת"),
            ]),
            tone_adjustments: ByPlatform {
                tiktok: entries(&[
                    ("אני רוצה", "אני חייב"),
                    ("בואו נדבר", "נו אז"),
                    ("הנה", "זהו"),
                ]),
                instagram: entries(&[
                    ("נו", ""),
                    ("יאללה", "הנה"),
                    ("סבבה", "מושלם"),
                    ("אחלה", "נפלא"),
                ]),
                youtube_shorts: entries(&[
                    ("נו", ""),
                    ("יאללה", "בואו"),
                    ("סבבה", "טוב"),
                    ("אחלה", "מצוין"),
                    ("מגניב", "יעיל"),
                ]),
            },
            hooks: ByVibe {
                casual: strings(&[
                    "אוקיי אז",
                    "שימו לב לזה",
                    "רגע,",
                    "בואו נדבר על",
                    "אז ככה",
                    "יאללה",
                    "נו טוב",
                ]),
                educational: strings(&[
                    "הנה משהו שלא ידעתם:",
                    "טיפ מהיר:",
                    "עובדה:",
                    "דבר אחד שחשוב להבין:",
                    "שאלה:",
                    "בואו נבין משהו:",
                ]),
                motivational: strings(&[
                    "זה הזמן שלך",
                    "מה שאתם צריכים לשמוע:",
                    "האמת?",
                    "קחו את זה:",
                    "הדבר הזה שינה לי הכל:",
                    "תזכרו:",
                ]),
                sales: strings(&[
                    "חיכיתם לזה:",
                    "סוף סוף:",
                    "הנה מה שעובד:",
                    "גיליתי משהו:",
                    "עצרו הכל.",
                    "זהו.",
                ]),
            },
            context_templates: ByVibe {
                casual: "מדברים על {topic}, במיוחד בשביל {audience}.".to_string(),
                educational: "כמה דברים שכדאי לדעת על {topic}, בשביל {audience}.".to_string(),
                motivational: "{audience}, זה בשבילכם: {topic}.".to_string(),
                sales: "{topic}: בדיוק מה ש{audience} חיפשו.".to_string(),
            },
            default_audience: "כולם".to_string(),
            ctas: ByVibe {
                casual: BySoftness {
                    subtle: "שמרו לאחר כך".to_string(),
                    moderate: "ספרו לי בתגובות".to_string(),
                    direct: "תייגו מישהו שצריך לראות את זה".to_string(),
                },
                educational: BySoftness {
                    subtle: "שמרו את הפוסט הזה".to_string(),
                    moderate: "יש לכם שאלות? כתבו לי".to_string(),
                    direct: "עקבו לעוד טיפים".to_string(),
                },
                motivational: BySoftness {
                    subtle: "שמרו והחזיקו חזק".to_string(),
                    moderate: "מי איתי?".to_string(),
                    direct: "תייגו מישהו שצריך לשמוע את זה".to_string(),
                },
                sales: BySoftness {
                    subtle: "רוצים פרטים? כתבו לי".to_string(),
                    moderate: "כתבו לי בפרטי ונדבר".to_string(),
                    direct: "כל הפרטים בקישור בביו".to_string(),
                },
            },
            vibe_posting_hints: ByVibe {
                casual: "תוכן קז׳ואל עובד טוב בשעות הערב".to_string(),
                educational: "תוכן לימודי עובד טוב בבוקר כשאנשים פתוחים ללמוד".to_string(),
                motivational: "תוכן מוטיבציוני עובד טוב בתחילת שבוע או בבוקר".to_string(),
                sales: "תוכן מכירתי עובד טוב בסוף שבוע כשיש יותר זמן פנוי".to_string(),
            },
            vibe_alignment: ByVibe {
                casual: "מתאים מאוד לטון הפלטפורמה".to_string(),
                educational: "שמור על בהירות בלי להיות מורה".to_string(),
                motivational: "אמיתי ולא גנרי".to_string(),
                sales: "רך ולא אגרסיבי".to_string(),
            },
            emoji_map: entries(&[
                ("טיפ", "💡"),
                ("חשוב", "⚡"),
                ("אהבה", "❤️"),
                ("כסף", "💰"),
                ("עבודה", "💼"),
                ("בריאות", "🏃"),
                ("אוכל", "🍽️"),
                ("נסיעה", "✈️"),
                ("לימוד", "📚"),
                ("הצלחה", "🎯"),
                ("שאלה", "🤔"),
                ("רעיון", "💡"),
            ]),
            broad_hashtags: strings(&[
                "#ישראל",
                "#תלאביב",
                "#ישראלי",
                "#עברית",
                "#חיים",
                "#יזמות",
                "#השראה",
                "#טיפים",
                "#לייף",
                "#ישראלים",
                "#תוכן",
                "#קריירה",
                "#פיתוחאישי",
                "#מוטיבציה",
                "#הצלחה",
                "#יומיום",
                "#fyp",
                "#foryou",
                "#viral",
                "#trending",
            ]),
            platform_hashtags: ByPlatform {
                tiktok: strings(&[
                    "#טיקטוק",
                    "#טיקטוקישראל",
                    "#tiktokisrael",
                    "#fyp",
                    "#foryoupage",
                    "#viral",
                    "#trending",
                    "#ויראלי",
                ]),
                instagram: strings(&[
                    "#אינסטגרם",
                    "#instaisrael",
                    "#igisrael",
                    "#reels",
                    "#reelsisrael",
                    "#explorepage",
                    "#instagood",
                ]),
                youtube_shorts: strings(&[
                    "#shorts",
                    "#youtubeshorts",
                    "#יוטיוב",
                    "#youtube",
                    "#shortsisrael",
                    "#ytshorts",
                ]),
            },
            niche_pools: vec![
                niche(
                    "business",
                    &["עסק", "כסף", "מכירות", "שיווק", "לקוחות", "יזמות", "עצמאי", "פרילנס"],
                    &[
                        "#עסקים", "#יזמות", "#עסקיםקטנים", "#מיתוג", "#שיווק", "#דיגיטל",
                        "#סושיאל", "#פרילנס", "#עצמאים", "#סטארטאפ", "#ביזנס", "#כסף",
                        "#הכנסה", "#השקעות",
                    ],
                ),
                niche(
                    "lifestyle",
                    &["חיים", "בית", "משפחה", "יומיום", "שגרה", "זוגיות", "ילדים"],
                    &[
                        "#לייפסטייל", "#שגרה", "#יומיומי", "#בית", "#משפחה", "#זוגיות",
                        "#הורות", "#ילדים", "#אמא", "#אבא", "#חיידקהסדר", "#ארגון",
                    ],
                ),
                niche(
                    "fitness",
                    &["כושר", "אימון", "בריאות", "ספורט", "דיאטה", "משקל", "גוף"],
                    &[
                        "#כושר", "#אימון", "#בריאות", "#תזונה", "#ספורט", "#חדרכושר",
                        "#דיאטה", "#גוף", "#פיטנס", "#אימוןבית", "#ירידהבמשקל",
                    ],
                ),
                niche(
                    "food",
                    &["אוכל", "מתכון", "בישול", "מטבח", "אכילה", "ארוחה", "טעים"],
                    &[
                        "#אוכל", "#מתכון", "#בישול", "#מטבח", "#טעים", "#אוכלביתי",
                        "#מתכונים", "#שף", "#בריא", "#טבעוני", "#צמחוני",
                    ],
                ),
                niche(
                    "tech",
                    &["טכנולוגיה", "אפליקציה", "קוד", "תכנות", "הייטק", "מחשב", "AI"],
                    &[
                        "#טכנולוגיה", "#הייטק", "#תכנות", "#קוד", "#סטארטאפ", "#אפליקציה",
                        "#דיגיטל", "#AI", "#בינהמלאכותית", "#חדשנות",
                    ],
                ),
                niche(
                    "beauty",
                    &["יופי", "איפור", "טיפוח", "עור", "שיער", "פנים"],
                    &[
                        "#יופי", "#איפור", "#טיפוח", "#עור", "#שיער", "#ביוטי", "#סקינקר",
                        "#מייקאפ", "#טיפוחפנים", "#קוסמטיקה",
                    ],
                ),
                niche(
                    "fashion",
                    &["אופנה", "בגדים", "סטייל", "לבוש", "נעליים"],
                    &[
                        "#אופנה", "#סטייל", "#לבוש", "#אאוטפיט", "#ootd", "#fashionisrael",
                        "#בגדים", "#נעליים", "#תיקים", "#אקססוריז",
                    ],
                ),
                niche(
                    "education",
                    &["לימודים", "קורס", "למידה", "הכשרה", "ידע"],
                    &[
                        "#לימודים", "#למידה", "#השכלה", "#קורס", "#הכשרה", "#מקצוע",
                        "#תואר", "#סטודנטים", "#ידע", "#מיומנויות",
                    ],
                ),
                niche(
                    "travel",
                    &["טיול", "נסיעה", "חופש", "מלון", "טיסה", "יעד"],
                    &[
                        "#טיול", "#נסיעה", "#תיירות", "#חופש", "#מטייל", "#ישראל", "#חול",
                        "#יעדים", "#טיסה", "#מלון",
                    ],
                ),
                niche(
                    "content",
                    &["תוכן", "קריאייטור", "וידאו", "עריכה", "סושיאל"],
                    &[
                        "#יוצרתוכן", "#קריאייטור", "#קונטנט", "#סושיאלמדיה", "#אינסטגרם",
                        "#טיקטוק", "#יוטיוב", "#ריילס", "#וידאו", "#עריכה",
                    ],
                ),
                niche(
                    "motivation",
                    &["מוטיבציה", "השראה", "הצלחה", "חלומות", "מטרות", "שינוי"],
                    &[
                        "#מוטיבציה", "#השראה", "#פיתוחאישי", "#הצלחה", "#חלומות", "#מטרות",
                        "#אמונה", "#כוח", "#צמיחה", "#שינוי",
                    ],
                ),
            ],
            default_niches: strings(&["content", "motivation"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banned(lexicon: &Lexicon) -> Vec<&str> {
        lexicon.banned_phrases.iter().map(|e| e.from.as_str()).collect()
    }

    #[test]
    fn test_shared_lexicon_is_built_once() {
        let a = Lexicon::shared();
        let b = Lexicon::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_templates_contain_no_banned_phrases() {
        let lexicon = Lexicon::hebrew();
        for text in lexicon.template_texts() {
            for phrase in banned(&lexicon) {
                assert!(
                    !text.contains(phrase),
                    "template text {text:?} contains banned phrase {phrase:?}"
                );
            }
        }
    }

    #[test]
    fn test_replacements_contain_no_banned_phrases() {
        let lexicon = Lexicon::hebrew();
        let replacements = lexicon
            .banned_phrases
            .iter()
            .chain(&lexicon.formal_to_casual)
            .chain(&lexicon.spelling_fixes)
            .map(|e| e.to.as_str());
        for text in replacements {
            for phrase in banned(&lexicon) {
                assert!(!text.contains(phrase), "{text:?} contains {phrase:?}");
            }
        }
    }

    #[test]
    fn test_default_niches_exist() {
        let lexicon = Lexicon::hebrew();
        for name in &lexicon.default_niches {
            assert!(lexicon.niche(name).is_some(), "missing niche pool {name}");
        }
    }

    #[test]
    fn test_every_vibe_has_hooks() {
        let lexicon = Lexicon::hebrew();
        for vibe in ClientVibe::ALL {
            assert!(!lexicon.hooks.get(*vibe).is_empty());
        }
    }
}
