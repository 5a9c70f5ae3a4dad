//! Content agent: runs QA once, then builds one package per platform.

use std::sync::Arc;

use hebcap_models::{
    ContentInput, ContentResult, PlatformPackage, PublishingPackage, QaResult,
};
use tracing::{debug, info, warn};

use crate::captions::CaptionGenerator;
use crate::hashtags::HashtagGenerator;
use crate::lexicon::Lexicon;
use crate::metrics;
use crate::platform::{tone_profile_for, PlatformAdapter};
use crate::qa::QaEngine;

/// Orchestrates the pipeline over one shared lexicon.
#[derive(Debug, Clone)]
pub struct ContentAgent {
    qa: QaEngine,
    captions: CaptionGenerator,
    hashtags: HashtagGenerator,
    adapter: PlatformAdapter,
}

impl Default for ContentAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentAgent {
    /// Agent over the default Hebrew lexicon.
    pub fn new() -> Self {
        Self::with_lexicon(Lexicon::shared())
    }

    /// Agent over an alternate lexicon.
    pub fn with_lexicon(lexicon: Arc<Lexicon>) -> Self {
        Self {
            qa: QaEngine::new(Arc::clone(&lexicon)),
            captions: CaptionGenerator::new(Arc::clone(&lexicon)),
            hashtags: HashtagGenerator::new(Arc::clone(&lexicon)),
            adapter: PlatformAdapter::new(lexicon),
        }
    }

    pub fn qa(&self) -> &QaEngine {
        &self.qa
    }

    pub fn hashtags(&self) -> &HashtagGenerator {
        &self.hashtags
    }

    pub fn adapter(&self) -> &PlatformAdapter {
        &self.adapter
    }

    /// Build the publishing package for validated content.
    ///
    /// Fails only on invalid input; every later step is infallible.
    pub fn process(&self, content: &ContentInput) -> ContentResult<PublishingPackage> {
        if let Err(e) = content.validate() {
            warn!(error = %e, "Rejected content input");
            metrics::record_validation_failure();
            return Err(e);
        }

        let qa_result = self.qa.clean(&content.raw_caption)?;
        let topic = self.qa.scrub(&content.video_topic);
        let audience = self.qa.scrub(&content.target_audience);
        let platforms = content.distinct_platforms();

        debug!(
            corrections = qa_result.applied_corrections.len(),
            platforms = platforms.len(),
            "QA complete, building platform packages"
        );

        let packages: Vec<PlatformPackage> = platforms
            .iter()
            .map(|platform| {
                let profile = tone_profile_for(*platform);
                let (caption_a, caption_b) = self.captions.generate_captions(
                    &qa_result.cleaned_caption,
                    &topic,
                    &audience,
                    content.client_vibe,
                    profile,
                );
                let hashtags = self.hashtags.generate_hashtags(&topic, *platform);
                metrics::record_package(*platform);
                debug!(
                    platform = platform.as_str(),
                    caption_a_chars = caption_a.chars().count(),
                    caption_b_chars = caption_b.chars().count(),
                    hashtags = hashtags.len(),
                    "Built platform package"
                );
                PlatformPackage {
                    platform: *platform,
                    caption_a,
                    caption_b,
                    hashtags,
                    posting_suggestion: self.adapter.posting_suggestion(*platform, content.client_vibe),
                    tone_notes: self.adapter.tone_notes(*platform, content.client_vibe),
                }
            })
            .collect();

        let input = ContentInput {
            platforms,
            ..content.clone()
        };
        let general_notes = general_notes(&input, &audience, &qa_result);

        info!(
            vibe = input.client_vibe.as_str(),
            platforms = packages.len(),
            corrections = qa_result.applied_corrections.len(),
            "Publishing package ready"
        );

        Ok(PublishingPackage {
            input,
            qa_result,
            platforms: packages,
            general_notes: Some(general_notes),
        })
    }
}

fn general_notes(input: &ContentInput, audience: &str, qa_result: &QaResult) -> String {
    let mut notes = Vec::new();
    if qa_result.has_corrections() {
        notes.push(format!(
            "בוצעו {} תיקונים בטקסט המקורי",
            qa_result.applied_corrections.len()
        ));
    }
    if !audience.is_empty() {
        notes.push(format!("קהל יעד: {audience}"));
    }
    notes.push(format!("טון: {}", input.client_vibe.hebrew_label()));
    let names: Vec<&str> = input
        .platforms
        .iter()
        .map(|p| tone_profile_for(*p).display_name.as_str())
        .collect();
    notes.push(format!("פלטפורמות: {}", names.join(", ")));
    notes.join(" | ")
}

/// Render one block per platform, in package order, separated by a blank line.
pub fn format_output(package: &PublishingPackage) -> String {
    package
        .platforms
        .iter()
        .map(format_platform)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_platform(pkg: &PlatformPackage) -> String {
    let profile = tone_profile_for(pkg.platform);
    [
        format!("PLATFORM: {}", profile.display_name),
        format!("Caption A: {}", pkg.caption_a),
        format!("Caption B: {}", pkg.caption_b),
        format!("Hashtags: {}", pkg.hashtags.join(" ")),
        format!("Posting suggestion: {}", pkg.posting_suggestion),
        format!("Tone notes: {}", pkg.tone_notes),
    ]
    .join("\n")
}

/// QA details: cleaned text, corrections and advisory notes.
pub fn format_qa_details(qa: &QaResult) -> String {
    let mut lines = vec![format!("Cleaned caption: {}", qa.cleaned_caption)];
    if qa.has_corrections() {
        lines.push(format!("Corrections ({}):", qa.applied_corrections.len()));
        lines.extend(qa.applied_corrections.iter().map(|c| format!("  • {c}")));
    }
    if !qa.notes.is_empty() {
        lines.push("Notes:".to_string());
        lines.extend(qa.notes.iter().map(|n| format!("  • {n}")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hebcap_models::{ClientVibe, ContentError, Platform};

    fn input(platforms: &[Platform]) -> ContentInput {
        ContentInput::new(
            "אנו שמחים להציג טיפ זהב לשינה טובה. כדאי לנסות הלילה!",
            "שינה טובה",
            "הורים צעירים",
            ClientVibe::Educational,
            platforms,
        )
        .unwrap()
    }

    #[test]
    fn test_one_package_per_distinct_platform() {
        let agent = ContentAgent::new();
        let package = agent
            .process(&input(&[Platform::Instagram, Platform::TikTok, Platform::Instagram]))
            .unwrap();
        let order: Vec<Platform> = package.platforms.iter().map(|p| p.platform).collect();
        assert_eq!(order, vec![Platform::Instagram, Platform::TikTok]);
        assert_eq!(package.input.platforms, order);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let agent = ContentAgent::new();
        let mut content = input(&[Platform::TikTok]);
        content.raw_caption = "   ".to_string();
        assert_eq!(agent.process(&content), Err(ContentError::EmptyInput));

        let mut content = input(&[Platform::TikTok]);
        content.platforms.clear();
        assert_eq!(agent.process(&content), Err(ContentError::InvalidPlatformSet));
    }

    #[test]
    fn test_general_notes() {
        let package = ContentAgent::new().process(&input(&[Platform::TikTok])).unwrap();
        let notes = package.general_notes.unwrap();
        assert!(notes.starts_with("בוצעו 2 תיקונים בטקסט המקורי"));
        assert!(notes.contains("קהל יעד: הורים צעירים"));
        assert!(notes.contains("טון: לימודי"));
        assert!(notes.ends_with("פלטפורמות: TikTok"));
    }

    #[test]
    fn test_format_output_blocks() {
        let package = ContentAgent::new()
            .process(&input(&[Platform::TikTok, Platform::YoutubeShorts]))
            .unwrap();
        let output = format_output(&package);
        let blocks: Vec<&str> = output.split("\n\nPLATFORM: ").collect();
        assert_eq!(blocks.len(), 2);
        assert!(output.starts_with("PLATFORM: TikTok\nCaption A: "));
        assert!(blocks[1].starts_with("YouTube Shorts\nCaption A: "));
        for label in ["Caption B: ", "Hashtags: #", "Posting suggestion: ", "Tone notes: "] {
            assert_eq!(output.matches(label).count(), 2, "{label}");
        }
    }

    #[test]
    fn test_qa_details() {
        let package = ContentAgent::new().process(&input(&[Platform::TikTok])).unwrap();
        let details = format_qa_details(&package.qa_result);
        assert!(details.contains("Corrections (2):"));
        assert!(details.contains("[formal_to_casual] 'אנו' → 'אנחנו'"));
    }
}
