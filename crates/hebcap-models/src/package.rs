//! Publishing package models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ContentInput, Platform, QaResult};

/// Hashtags split into their two tiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct HashtagSet {
    /// Generic, platform-and-locale reach tags
    pub broad_reach: Vec<String>,

    /// Topic-specific tags, never repeating a broad tag
    pub niche: Vec<String>,
}

impl HashtagSet {
    /// Broad tags followed by niche tags, capped at `limit`.
    pub fn combined(&self, limit: usize) -> Vec<String> {
        self.broad_reach
            .iter()
            .chain(self.niche.iter())
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Publishing package for a single platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformPackage {
    pub platform: Platform,

    /// Short hook caption, within the platform budget
    pub caption_a: String,

    /// Longer caption ending in a soft call-to-action
    pub caption_b: String,

    /// Unique tags, broad-reach before niche
    pub hashtags: Vec<String>,

    pub posting_suggestion: String,
    pub tone_notes: String,
}

/// Complete publishing package across all requested platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PublishingPackage {
    pub input: ContentInput,
    pub qa_result: QaResult,

    /// One package per distinct requested platform, in input order
    pub platforms: Vec<PlatformPackage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_notes: Option<String>,
}

impl PublishingPackage {
    /// Package for one platform, if it was requested.
    pub fn for_platform(&self, platform: Platform) -> Option<&PlatformPackage> {
        self.platforms.iter().find(|p| p.platform == platform)
    }
}
