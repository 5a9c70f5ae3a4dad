//! QA result models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which rule family produced a correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    BannedPhrase,
    FormalToCasual,
    Spelling,
}

impl CorrectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionKind::BannedPhrase => "banned_phrase",
            CorrectionKind::FormalToCasual => "formal_to_casual",
            CorrectionKind::Spelling => "spelling",
        }
    }
}

/// A single rewrite applied to the caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Correction {
    pub kind: CorrectionKind,

    /// Text as it appeared in the input
    pub original: String,

    /// Replacement text (empty when the span was deleted)
    pub replacement: String,
}

impl Correction {
    pub fn new(kind: CorrectionKind, original: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            kind,
            original: original.into(),
            replacement: replacement.into(),
        }
    }
}

impl std::fmt::Display for Correction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.replacement.is_empty() {
            write!(f, "[{}] '{}' removed", self.kind.as_str(), self.original)
        } else {
            write!(
                f,
                "[{}] '{}' → '{}'",
                self.kind.as_str(),
                self.original,
                self.replacement
            )
        }
    }
}

/// Result of Hebrew QA processing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QaResult {
    /// Input text as given
    pub original_text: String,

    /// Corrected, natural Hebrew text
    pub cleaned_caption: String,

    /// Every rewrite applied, in application order
    #[serde(default)]
    pub applied_corrections: Vec<Correction>,

    /// Advisory notes about the text (Hebrew)
    #[serde(default)]
    pub notes: Vec<String>,
}

impl QaResult {
    /// Whether any rule changed the text.
    pub fn has_corrections(&self) -> bool {
        !self.applied_corrections.is_empty()
    }

    /// Corrections of one kind.
    pub fn corrections_of(&self, kind: CorrectionKind) -> impl Iterator<Item = &Correction> {
        self.applied_corrections.iter().filter(move |c| c.kind == kind)
    }
}
