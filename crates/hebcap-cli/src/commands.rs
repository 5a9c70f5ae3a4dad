//! Command handlers.
//!
//! Handlers write to any `Write` and read prompts from any `BufRead` so the
//! binary and the tests drive them the same way.

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use hebcap_engine::{
    format_hook_output, format_output, format_qa_details, tone_profile_for, ContentAgent,
    HookAgent, Lexicon,
};
use hebcap_models::{ClientVibe, ContentInput, HookInput, HookType, Platform, PublishingPackage};

use crate::args::{Cli, Commands};
use crate::config::CliConfig;

/// Load a lexicon from a JSON file, or the built-in Hebrew one.
pub fn load_lexicon(path: Option<&Path>) -> Result<Arc<Lexicon>> {
    let Some(path) = path else {
        return Ok(Lexicon::shared());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
    let lexicon: Lexicon = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid lexicon JSON in {}", path.display()))?;
    info!(path = %path.display(), "Loaded custom lexicon");
    Ok(Arc::new(lexicon))
}

/// Pipeline plus front-end defaults.
pub struct App {
    agent: ContentAgent,
    hooks: HookAgent,
    lexicon: Arc<Lexicon>,
    config: CliConfig,
}

impl App {
    pub fn new(lexicon: Arc<Lexicon>, config: CliConfig) -> Self {
        Self {
            agent: ContentAgent::with_lexicon(Arc::clone(&lexicon)),
            hooks: HookAgent::new(Arc::clone(&lexicon)),
            lexicon,
            config,
        }
    }

    /// Dispatch a parsed command line.
    pub fn run(&self, cli: Cli, out: &mut impl Write, input: &mut impl BufRead) -> Result<()> {
        match cli.command {
            Commands::Process {
                raw_caption,
                topic,
                audience,
                vibe,
                platforms,
                json,
                output,
                show_corrections,
            } => {
                let request = ProcessRequest {
                    raw_caption: &raw_caption,
                    topic: &topic,
                    audience: &audience,
                    vibe: vibe.as_deref(),
                    platforms: platforms.as_deref(),
                };
                let package = self.process(&request)?;
                let text = render_package(&package, json, show_corrections)?;
                writeln!(out, "{text}")?;
                if let Some(path) = output {
                    std::fs::write(&path, format!("{text}\n"))
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!(path = %path.display(), "Wrote publishing package");
                }
                Ok(())
            }
            Commands::Qa {
                text,
                show_corrections,
                json,
            } => self.qa(&text, show_corrections, json, out),
            Commands::Hashtags {
                topic,
                platform,
                tiers,
                json,
            } => self.hashtags(&topic, &platform, tiers, json, out),
            Commands::Hooks {
                topic,
                audience,
                key_message,
                vibe,
                platforms,
                types,
                json,
            } => {
                let vibe: ClientVibe = vibe
                    .as_deref()
                    .unwrap_or(self.config.default_vibe.as_str())
                    .parse()?;
                let platforms = Platform::parse_all(&split_platforms(
                    platforms
                        .as_deref()
                        .unwrap_or(self.config.default_platforms.as_str()),
                ))?;
                let types = HookType::parse_list(types.as_deref().unwrap_or(""))?;
                let request =
                    HookInput::new(topic, audience, key_message, vibe, &platforms, &types)?;
                let output = self.hooks.process(&request)?;
                if json {
                    writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
                } else {
                    writeln!(out, "{}", format_hook_output(&output))?;
                }
                Ok(())
            }
            Commands::Interactive => self.interactive(input, out),
            Commands::Schema => {
                let schema = schemars::schema_for!(PublishingPackage);
                writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
                Ok(())
            }
            Commands::Lexicon => {
                writeln!(out, "{}", serde_json::to_string_pretty(self.lexicon.as_ref())?)?;
                Ok(())
            }
        }
    }

    /// Validate and process one request. Omitted vibe and platforms fall
    /// back to the configured defaults.
    pub fn process(&self, request: &ProcessRequest<'_>) -> Result<PublishingPackage> {
        let vibe = request.vibe.unwrap_or(self.config.default_vibe.as_str());
        let platforms = split_platforms(
            request
                .platforms
                .unwrap_or(self.config.default_platforms.as_str()),
        );
        let content = ContentInput::parse(
            request.raw_caption,
            request.topic,
            request.audience,
            vibe,
            &platforms,
        )?;
        Ok(self.agent.process(&content)?)
    }

    fn qa(&self, text: &str, show_corrections: bool, json: bool, out: &mut impl Write) -> Result<()> {
        let result = self.agent.qa().clean(text)?;
        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
        } else if show_corrections {
            writeln!(out, "{}", format_qa_details(&result))?;
        } else {
            writeln!(out, "{}", result.cleaned_caption)?;
        }
        Ok(())
    }

    fn hashtags(
        &self,
        topic: &str,
        platform: &str,
        tiers: bool,
        json: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        let platform: Platform = platform.parse()?;
        let set = self.agent.hashtags().generate(topic, platform);
        let tags = set.combined(tone_profile_for(platform).max_hashtags);

        match (tiers, json) {
            (true, true) => writeln!(out, "{}", serde_json::to_string_pretty(&set)?)?,
            (false, true) => writeln!(out, "{}", serde_json::to_string_pretty(&tags)?)?,
            (true, false) => {
                writeln!(out, "Broad reach: {}", set.broad_reach.join(" "))?;
                writeln!(out, "Niche: {}", set.niche.join(" "))?;
            }
            (false, false) => writeln!(out, "{}", tags.join(" "))?,
        }
        Ok(())
    }

    /// Prompt loop. `exit` or end of input quits; a rejected caption is
    /// reported and the loop continues.
    pub fn interactive(&self, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
        writeln!(out, "hebcap interactive mode. Type 'exit' to quit.")?;
        loop {
            let Some(raw_caption) = prompt(input, out, "Caption")? else {
                break;
            };
            if raw_caption.eq_ignore_ascii_case("exit") {
                break;
            }
            let Some(topic) = prompt(input, out, "Topic")? else {
                break;
            };
            let Some(audience) = prompt(input, out, "Audience")? else {
                break;
            };
            let vibe_label = format!("Vibe [{}]", self.config.default_vibe);
            let Some(vibe) = prompt(input, out, &vibe_label)? else {
                break;
            };
            let platforms_label = format!("Platforms [{}]", self.config.default_platforms);
            let Some(platforms) = prompt(input, out, &platforms_label)? else {
                break;
            };

            let request = ProcessRequest {
                raw_caption: &raw_caption,
                topic: &topic,
                audience: &audience,
                vibe: non_empty(&vibe),
                platforms: non_empty(&platforms),
            };
            match self.process(&request) {
                Ok(package) => writeln!(out, "\n{}\n", format_output(&package))?,
                Err(e) => {
                    warn!(error = %e, "Rejected interactive input");
                    writeln!(out, "Error: {e}\n")?;
                }
            }
        }
        debug!("Leaving interactive mode");
        Ok(())
    }
}

/// One `process` invocation, borrowed from the command line or a prompt.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRequest<'a> {
    pub raw_caption: &'a str,
    pub topic: &'a str,
    pub audience: &'a str,
    pub vibe: Option<&'a str>,
    pub platforms: Option<&'a str>,
}

/// Text or JSON rendering of a package, optionally followed by QA details.
pub fn render_package(package: &PublishingPackage, json: bool, show_corrections: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(package)?);
    }
    let mut text = format_output(package);
    if show_corrections {
        text.push_str("\n\n");
        text.push_str(&format_qa_details(&package.qa_result));
    }
    Ok(text)
}

fn split_platforms(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

/// Print a prompt and read one trimmed line. `None` at end of input.
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}: ")?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
