//! Shared data models for the Hebrew caption publishing pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Content input and validation errors
//! - Platforms, vibes and per-platform tone profiles
//! - QA results and the corrections behind them
//! - Per-platform and aggregate publishing packages
//! - Short-form video hooks

pub mod content;
pub mod error;
pub mod hook;
pub mod package;
pub mod platform;
pub mod qa;
pub mod vibe;

// Re-export common types
pub use content::ContentInput;
pub use error::{ContentError, ContentResult};
pub use hook::{Hook, HookInput, HookOutput, HookPackage, HookType, HookVariation};
pub use package::{HashtagSet, PlatformPackage, PublishingPackage};
pub use platform::{CtaSoftness, EmojiDensity, Pace, Platform, Register, ToneProfile};
pub use qa::{Correction, CorrectionKind, QaResult};
pub use vibe::ClientVibe;
