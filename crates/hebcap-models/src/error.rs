//! Validation error types.

use thiserror::Error;

/// Result type for content validation and processing.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors raised while validating content before any rule processing runs.
///
/// Once an input has passed validation, no later pipeline step can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Caption is empty or contains only whitespace")]
    EmptyInput,

    #[error("Unknown platform: {0} (expected tiktok, instagram or youtube_shorts)")]
    UnknownPlatform(String),

    #[error("Unknown vibe: {0} (expected casual, educational, motivational or sales)")]
    UnknownVibe(String),

    #[error("At least one target platform is required")]
    InvalidPlatformSet,

    #[error("Video topic is empty or contains only whitespace")]
    EmptyTopic,

    #[error("Unknown hook type: {0}")]
    UnknownHookType(String),
}

impl ContentError {
    /// Create an unknown platform error.
    pub fn unknown_platform(value: impl Into<String>) -> Self {
        Self::UnknownPlatform(value.into())
    }

    /// Create an unknown vibe error.
    pub fn unknown_vibe(value: impl Into<String>) -> Self {
        Self::UnknownVibe(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_offending_value() {
        assert_eq!(
            ContentError::unknown_platform("snapchat").to_string(),
            "Unknown platform: snapchat (expected tiktok, instagram or youtube_shorts)"
        );
        assert!(ContentError::unknown_vibe("angry").to_string().contains("angry"));
    }
}
