//! Two-tier hashtag generation.

use std::collections::HashSet;
use std::sync::Arc;

use hebcap_models::{HashtagSet, Platform};
use tracing::debug;

use crate::lexicon::{Lexicon, NichePool};
use crate::platform::tone_profile_for;

const MAX_NICHES: usize = 3;
const PLATFORM_TAGS_FIRST: usize = 3;
const MIN_TAGS_PER_NICHE: usize = 3;

/// Normalize a raw tag to `#body`, or reject it.
///
/// Leading `#` and inner whitespace are removed. Any other character that is
/// not alphanumeric or `_` makes the tag malformed, and the body needs at
/// least one letter.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let body: String = raw
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if body.is_empty()
        || !body.chars().all(|c| c.is_alphanumeric() || c == '_')
        || !body.chars().any(char::is_alphabetic)
    {
        return None;
    }
    Some(format!("#{body}"))
}

fn contains_hebrew(text: &str) -> bool {
    text.chars().any(|c| ('\u{0590}'..='\u{05FF}').contains(&c))
}

/// Case-insensitive set of tags already emitted.
#[derive(Default)]
struct Seen(HashSet<String>);

impl Seen {
    fn insert(&mut self, tag: &str) -> bool {
        self.0.insert(tag.to_lowercase())
    }
}

#[derive(Debug, Clone)]
pub struct HashtagGenerator {
    lexicon: Arc<Lexicon>,
}

impl Default for HashtagGenerator {
    fn default() -> Self {
        Self::new(Lexicon::shared())
    }
}

impl HashtagGenerator {
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self { lexicon }
    }

    /// Final hashtag sequence: broad tier, then niche tier, bounded by the
    /// platform maximum.
    pub fn generate_hashtags(&self, topic: &str, platform: Platform) -> Vec<String> {
        let max = tone_profile_for(platform).max_hashtags;
        self.generate(topic, platform).combined(max)
    }

    /// Both tiers for a topic on one platform.
    pub fn generate(&self, topic: &str, platform: Platform) -> HashtagSet {
        let max = tone_profile_for(platform).max_hashtags;
        let mut seen = Seen::default();

        let platform_tags = self.lexicon.platform_hashtags.get(platform);
        let broad_reach: Vec<String> = platform_tags
            .iter()
            .take(PLATFORM_TAGS_FIRST)
            .chain(self.lexicon.broad_hashtags.iter())
            .filter_map(|tag| normalize_tag(tag))
            .filter(|tag| seen.insert(tag))
            .take(max / 2)
            .collect();

        let niches = self.detect_niches(topic);
        let budget = max.saturating_sub(broad_reach.len());
        let per_niche = MIN_TAGS_PER_NICHE.max(budget / niches.len().max(1));

        let mut niche = Vec::with_capacity(budget);
        for pool in &niches {
            let tags = pool
                .tags
                .iter()
                .filter_map(|tag| normalize_tag(tag))
                .filter(|tag| seen.insert(tag))
                .take(per_niche);
            niche.extend(tags);
        }
        niche.truncate(budget);

        debug!(
            platform = platform.as_str(),
            niches = ?niches.iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
            broad = broad_reach.len(),
            niche = niche.len(),
            "Generated hashtags"
        );

        HashtagSet { broad_reach, niche }
    }

    /// Niche pools whose keywords occur in the topic, in table order, at most
    /// three. Falls back to the default niches.
    pub fn detect_niches(&self, topic: &str) -> Vec<&NichePool> {
        let topic_lower = topic.to_lowercase();
        let latin_words: HashSet<&str> = topic_lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let matched: Vec<&NichePool> = self
            .lexicon
            .niche_pools
            .iter()
            .filter(|pool| {
                pool.keywords.iter().any(|keyword| {
                    let keyword = keyword.to_lowercase();
                    if contains_hebrew(&keyword) {
                        topic_lower.contains(&keyword)
                    } else {
                        latin_words.contains(keyword.as_str())
                    }
                })
            })
            .take(MAX_NICHES)
            .collect();

        if !matched.is_empty() {
            return matched;
        }
        self.lexicon
            .default_niches
            .iter()
            .filter_map(|name| self.lexicon.niche(name))
            .collect()
    }
}
