//! Platform and tone profile definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContentError;

/// Supported publishing platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[serde(rename = "tiktok")]
    TikTok,
    Instagram,
    YoutubeShorts,
}

impl Platform {
    /// All platforms, in canonical order.
    pub const ALL: &'static [Platform] = &[
        Platform::TikTok,
        Platform::Instagram,
        Platform::YoutubeShorts,
    ];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::YoutubeShorts => "youtube_shorts",
        }
    }

    /// Parse a comma-separated platform list, keeping the first occurrence of each.
    ///
    /// Empty entries are ignored. An unknown entry fails the whole list, and a
    /// list with no entries at all is an [`ContentError::InvalidPlatformSet`].
    pub fn parse_list(list: &str) -> Result<Vec<Platform>, ContentError> {
        let ids: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        Self::parse_all(&ids)
    }

    /// Parse identifiers into a deduplicated platform list, preserving input order.
    pub fn parse_all<S: AsRef<str>>(ids: &[S]) -> Result<Vec<Platform>, ContentError> {
        let mut platforms = Vec::with_capacity(ids.len());
        for id in ids {
            platforms.push(id.as_ref().parse::<Platform>()?);
        }
        let platforms = Self::dedup(&platforms);
        if platforms.is_empty() {
            return Err(ContentError::InvalidPlatformSet);
        }
        Ok(platforms)
    }

    /// Collapse duplicates, keeping first-occurrence order.
    pub fn dedup(platforms: &[Platform]) -> Vec<Platform> {
        let mut result = Vec::with_capacity(platforms.len());
        let mut seen = std::collections::HashSet::new();
        for platform in platforms {
            if seen.insert(*platform) {
                result.push(*platform);
            }
        }
        result
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiktok" => Ok(Platform::TikTok),
            "instagram" | "ig" => Ok(Platform::Instagram),
            "youtube_shorts" | "youtube" | "yt" | "shorts" => Ok(Platform::YoutubeShorts),
            _ => Err(ContentError::unknown_platform(s.trim())),
        }
    }
}

/// Content pace a platform rewards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Fast,
    Measured,
}

/// Where a platform sits on the emotional-vs-authoritative axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Register {
    Playful,
    Emotional,
    Authoritative,
}

/// How hard a call-to-action may push. Every level is still non-aggressive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CtaSoftness {
    Subtle,
    Moderate,
    Direct,
}

impl CtaSoftness {
    pub const ALL: &'static [CtaSoftness] = &[
        CtaSoftness::Subtle,
        CtaSoftness::Moderate,
        CtaSoftness::Direct,
    ];
}

/// Emoji density hint for generated captions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EmojiDensity {
    Minimal,
    Moderate,
}

impl EmojiDensity {
    /// Maximum emojis a generator may add to one caption.
    pub fn max_emojis(&self) -> usize {
        match self {
            EmojiDensity::Minimal => 1,
            EmojiDensity::Moderate => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmojiDensity::Minimal => "minimal",
            EmojiDensity::Moderate => "moderate",
        }
    }
}

/// Per-platform register and publishing guidance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToneProfile {
    pub platform: Platform,

    /// Display name, e.g. "YouTube Shorts"
    pub display_name: String,

    /// Hebrew display name
    pub display_name_hebrew: String,

    /// Short tone summary, e.g. "fast + casual"
    pub tone: String,

    pub pace: Pace,
    pub register: Register,
    pub cta_softness: CtaSoftness,
    pub emoji_density: EmojiDensity,

    /// Recommended posting windows (Hebrew)
    pub posting_windows: Vec<String>,

    /// Platform-specific posting advice (Hebrew)
    pub posting_hint: String,

    /// Characteristic traits of the platform voice (Hebrew)
    pub characteristics: Vec<String>,

    /// Character budget for caption A
    pub short_caption_budget: usize,

    /// Upper bound for caption B, to avoid platform truncation
    pub long_caption_limit: usize,

    /// Maximum number of hashtags
    pub max_hashtags: usize,
}
