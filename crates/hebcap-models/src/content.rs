//! Content input model.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{ClientVibe, ContentError, ContentResult, Platform};

/// Raw content submitted for publishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ContentInput {
    /// Raw caption or script (Hebrew or mixed)
    pub raw_caption: String,

    /// Topic of the video
    pub video_topic: String,

    /// Target audience description
    pub target_audience: String,

    /// Desired tone
    pub client_vibe: ClientVibe,

    /// Target platforms, duplicates collapsed
    pub platforms: Vec<Platform>,
}

impl ContentInput {
    /// Create a validated input.
    ///
    /// Fails with [`ContentError::EmptyInput`] for a blank caption and with
    /// [`ContentError::InvalidPlatformSet`] when no platform is given.
    pub fn new(
        raw_caption: impl Into<String>,
        video_topic: impl Into<String>,
        target_audience: impl Into<String>,
        client_vibe: ClientVibe,
        platforms: &[Platform],
    ) -> ContentResult<Self> {
        let input = Self {
            raw_caption: raw_caption.into(),
            video_topic: video_topic.into(),
            target_audience: target_audience.into(),
            client_vibe,
            platforms: Platform::dedup(platforms),
        };
        input.validate()?;
        Ok(input)
    }

    /// Create a validated input from untyped vibe and platform identifiers.
    pub fn parse<S: AsRef<str>>(
        raw_caption: impl Into<String>,
        video_topic: impl Into<String>,
        target_audience: impl Into<String>,
        vibe: &str,
        platforms: &[S],
    ) -> ContentResult<Self> {
        let raw_caption = raw_caption.into();
        if raw_caption.trim().is_empty() {
            return Err(ContentError::EmptyInput);
        }
        let client_vibe = vibe.parse::<ClientVibe>()?;
        let platforms = Platform::parse_all(platforms)?;
        Self::new(
            raw_caption,
            video_topic,
            target_audience,
            client_vibe,
            &platforms,
        )
    }

    /// Check the invariants every processing entry point relies on.
    pub fn validate(&self) -> ContentResult<()> {
        if self.raw_caption.trim().is_empty() {
            return Err(ContentError::EmptyInput);
        }
        if self.platforms.is_empty() {
            return Err(ContentError::InvalidPlatformSet);
        }
        Ok(())
    }

    /// Requested platforms with duplicates collapsed, in input order.
    pub fn distinct_platforms(&self) -> Vec<Platform> {
        Platform::dedup(&self.platforms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collapses_duplicate_platforms() {
        let input = ContentInput::new(
            "שלום",
            "טיפים",
            "יזמים",
            ClientVibe::Casual,
            &[Platform::Instagram, Platform::Instagram, Platform::TikTok],
        )
        .unwrap();
        assert_eq!(input.platforms, vec![Platform::Instagram, Platform::TikTok]);
    }

    #[test]
    fn test_blank_caption_is_rejected() {
        for caption in ["", "   ", "\n\t"] {
            let result = ContentInput::new(caption, "t", "a", ClientVibe::Casual, &[Platform::TikTok]);
            assert_eq!(result, Err(ContentError::EmptyInput));
        }
    }

    #[test]
    fn test_parse_reports_first_invalid_field() {
        assert_eq!(
            ContentInput::parse("שלום", "t", "a", "casual", &["snapchat"]),
            Err(ContentError::UnknownPlatform("snapchat".to_string()))
        );
        assert_eq!(
            ContentInput::parse("שלום", "t", "a", "loud", &["tiktok"]),
            Err(ContentError::UnknownVibe("loud".to_string()))
        );
        let empty: [&str; 0] = [];
        assert_eq!(
            ContentInput::parse("שלום", "t", "a", "casual", &empty),
            Err(ContentError::InvalidPlatformSet)
        );
    }

    #[test]
    fn test_validate_catches_hand_built_input() {
        let input = ContentInput {
            raw_caption: "שלום".to_string(),
            video_topic: String::new(),
            target_audience: String::new(),
            client_vibe: ClientVibe::Sales,
            platforms: vec![],
        };
        assert_eq!(input.validate(), Err(ContentError::InvalidPlatformSet));
    }
}
