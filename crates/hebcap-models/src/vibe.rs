//! Client vibe definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ContentError;

/// The tone a client wants their content to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClientVibe {
    Casual,
    Educational,
    Motivational,
    Sales,
}

impl ClientVibe {
    pub const ALL: &'static [ClientVibe] = &[
        ClientVibe::Casual,
        ClientVibe::Educational,
        ClientVibe::Motivational,
        ClientVibe::Sales,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClientVibe::Casual => "casual",
            ClientVibe::Educational => "educational",
            ClientVibe::Motivational => "motivational",
            ClientVibe::Sales => "sales",
        }
    }

    /// Hebrew label used in human-facing notes.
    pub fn hebrew_label(&self) -> &'static str {
        match self {
            ClientVibe::Casual => "קז׳ואל",
            ClientVibe::Educational => "לימודי",
            ClientVibe::Motivational => "מוטיבציוני",
            ClientVibe::Sales => "מכירתי",
        }
    }
}

impl fmt::Display for ClientVibe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ClientVibe {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "casual" | "קזואל" | "קז׳ואל" => Ok(ClientVibe::Casual),
            "educational" | "לימודי" => Ok(ClientVibe::Educational),
            "motivational" | "מוטיבציוני" => Ok(ClientVibe::Motivational),
            "sales" | "מכירות" | "מכירתי" => Ok(ClientVibe::Sales),
            _ => Err(ContentError::unknown_vibe(s.trim())),
        }
    }
}
