//! Short-form video hook models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{ClientVibe, ContentError, ContentResult, Platform};

/// Kind of attention-grabbing opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum HookType {
    Question,
    BoldStatement,
    Story,
    Statistic,
    Controversial,
    CuriosityGap,
    DirectAddress,
}

impl HookType {
    pub const ALL: &'static [HookType] = &[
        HookType::Question,
        HookType::BoldStatement,
        HookType::Story,
        HookType::Statistic,
        HookType::Controversial,
        HookType::CuriosityGap,
        HookType::DirectAddress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HookType::Question => "question",
            HookType::BoldStatement => "bold_statement",
            HookType::Story => "story",
            HookType::Statistic => "statistic",
            HookType::Controversial => "controversial",
            HookType::CuriosityGap => "curiosity_gap",
            HookType::DirectAddress => "direct_address",
        }
    }

    /// Parse a comma-separated list, keeping the first occurrence of each.
    /// An empty list means every type.
    pub fn parse_list(list: &str) -> ContentResult<Vec<HookType>> {
        let mut types = Vec::new();
        for id in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let hook_type = id.parse::<HookType>()?;
            if !types.contains(&hook_type) {
                types.push(hook_type);
            }
        }
        Ok(types)
    }
}

impl fmt::Display for HookType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HookType {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_lowercase().replace('-', "_");
        HookType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == id)
            .ok_or_else(|| ContentError::UnknownHookType(s.trim().to_string()))
    }
}

/// Request for a hook package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HookInput {
    pub video_topic: String,
    pub target_audience: String,

    /// Line the opening leads into
    pub key_message: String,

    pub client_vibe: ClientVibe,
    pub platforms: Vec<Platform>,

    /// Hook types to generate; empty means all
    #[serde(default)]
    pub hook_types: Vec<HookType>,
}

impl HookInput {
    pub fn new(
        video_topic: impl Into<String>,
        target_audience: impl Into<String>,
        key_message: impl Into<String>,
        client_vibe: ClientVibe,
        platforms: &[Platform],
        hook_types: &[HookType],
    ) -> ContentResult<Self> {
        let mut types = Vec::with_capacity(hook_types.len());
        for hook_type in hook_types {
            if !types.contains(hook_type) {
                types.push(*hook_type);
            }
        }
        let input = Self {
            video_topic: video_topic.into(),
            target_audience: target_audience.into(),
            key_message: key_message.into(),
            client_vibe,
            platforms: Platform::dedup(platforms),
            hook_types: types,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn validate(&self) -> ContentResult<()> {
        if self.video_topic.trim().is_empty() {
            return Err(ContentError::EmptyTopic);
        }
        if self.platforms.is_empty() {
            return Err(ContentError::InvalidPlatformSet);
        }
        Ok(())
    }

    /// Requested hook types, or every type when none were named.
    pub fn effective_hook_types(&self) -> Vec<HookType> {
        if self.hook_types.is_empty() {
            HookType::ALL.to_vec()
        } else {
            self.hook_types.clone()
        }
    }
}

/// One generated hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Hook {
    pub hook_type: HookType,
    pub text: String,

    /// Spoken length, e.g. "3-4 שניות"
    pub duration_estimate: String,

    /// Platforms this kind of hook works best on
    pub platform_fit: Vec<Platform>,

    pub engagement_notes: String,
}

/// A hook adjusted for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HookVariation {
    pub platform: Platform,
    pub hook_text: String,
    pub visual_suggestion: String,
    pub text_overlay: String,
}

/// Base hook of one type with its platform variations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HookPackage {
    pub hook_type: HookType,
    pub base_hook: Hook,
    pub platform_variations: Vec<HookVariation>,

    /// Alternate wording for A/B testing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ab_test_variant: Option<String>,
}

/// Complete hook output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HookOutput {
    pub input_summary: String,

    /// One package per requested hook type, in request order
    pub hooks: Vec<HookPackage>,

    pub recommended_hook: Hook,

    /// Opening lines: a hook followed by the key message
    pub script_starters: Vec<String>,

    pub general_tips: Vec<String>,
}
