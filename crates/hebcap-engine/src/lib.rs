//! Hebrew caption publishing engine.
//!
//! Turns a raw Hebrew (or mixed Hebrew/English) caption into per-platform
//! publishing packages:
//! - [`qa`]: rule-driven rewrite into natural spoken Hebrew
//! - [`captions`]: short hook caption and long caption with a soft CTA
//! - [`hashtags`]: broad-reach and niche hashtag tiers
//! - [`platform`]: tone profiles, posting advice, tone adjustments
//! - [`agent`]: orchestration and text output
//! - [`hooks`]: spoken openings for short-form video
//!
//! Every component reads one immutable [`Lexicon`]. Processing is
//! deterministic and does no I/O.

pub mod agent;
pub mod captions;
pub mod hashtags;
pub mod hooks;
pub mod lexicon;
pub mod metrics;
pub mod platform;
pub mod qa;

pub use agent::{format_output, format_qa_details, ContentAgent};
pub use captions::CaptionGenerator;
pub use hashtags::{normalize_tag, HashtagGenerator};
pub use hooks::{format_hook_output, HookAgent};
pub use lexicon::Lexicon;
pub use platform::{tone_profile_for, tone_profile_for_id, PlatformAdapter};
pub use qa::{contains_hebrew, hebrew_word_count, QaEngine};
