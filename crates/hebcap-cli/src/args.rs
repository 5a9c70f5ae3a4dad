//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for hebcap
#[derive(Parser, Debug)]
#[command(
    name = "hebcap",
    version,
    about = "Hebrew caption QA, captions and hashtags for short-form video"
)]
pub struct Cli {
    /// Load the lexicon from a JSON file instead of the built-in Hebrew one
    #[arg(long, global = true)]
    pub lexicon: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build publishing packages for one caption
    Process {
        /// Raw caption or script
        raw_caption: String,

        /// Topic of the video
        #[arg(long, default_value = "")]
        topic: String,

        /// Target audience
        #[arg(long, default_value = "")]
        audience: String,

        /// Tone (casual, educational, motivational, sales); defaults to HEBCAP_DEFAULT_VIBE
        #[arg(long)]
        vibe: Option<String>,

        /// Comma-separated platforms; defaults to HEBCAP_DEFAULT_PLATFORMS
        #[arg(long)]
        platforms: Option<String>,

        /// Print the package as JSON
        #[arg(long)]
        json: bool,

        /// Also write the output to this file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Append the cleaned caption, corrections and notes
        #[arg(long)]
        show_corrections: bool,
    },

    /// Clean a caption and print the result
    Qa {
        /// Raw caption or script
        text: String,

        /// List corrections and notes
        #[arg(long)]
        show_corrections: bool,

        /// Print the full QA result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate hashtags for a topic
    Hashtags {
        /// Topic of the video
        topic: String,

        /// Target platform
        #[arg(long, default_value = "tiktok")]
        platform: String,

        /// Print broad-reach and niche tiers separately
        #[arg(long)]
        tiers: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate spoken openings for a video topic
    Hooks {
        /// Topic of the video
        topic: String,

        /// Target audience
        #[arg(long, default_value = "")]
        audience: String,

        /// Line the hook leads into
        #[arg(long, default_value = "")]
        key_message: String,

        /// Tone; defaults to HEBCAP_DEFAULT_VIBE
        #[arg(long)]
        vibe: Option<String>,

        /// Comma-separated platforms; defaults to HEBCAP_DEFAULT_PLATFORMS
        #[arg(long)]
        platforms: Option<String>,

        /// Comma-separated hook types (question, bold_statement, story, ...); all when omitted
        #[arg(long)]
        types: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Prompt for captions repeatedly until `exit`
    Interactive,

    /// Print the JSON Schema of a publishing package
    Schema,

    /// Print the active lexicon as JSON
    Lexicon,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "hebcap",
            "process",
            "אנו שמחים להציג",
            "--topic",
            "כושר",
            "--platforms",
            "tiktok,instagram",
            "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Process {
                raw_caption,
                topic,
                audience,
                vibe,
                platforms,
                json,
                show_corrections,
                ..
            } => {
                assert_eq!(raw_caption, "אנו שמחים להציג");
                assert_eq!(topic, "כושר");
                assert_eq!(audience, "");
                assert_eq!(vibe, None);
                assert_eq!(platforms.as_deref(), Some("tiktok,instagram"));
                assert!(json);
                assert!(!show_corrections);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_lexicon_after_subcommand() {
        let cli = Cli::try_parse_from(["hebcap", "schema", "--lexicon", "lex.json"]).unwrap();
        assert_eq!(cli.lexicon, Some(PathBuf::from("lex.json")));
        assert!(matches!(cli.command, Commands::Schema));
    }

    #[test]
    fn test_parse_hooks() {
        let cli = Cli::try_parse_from([
            "hebcap",
            "hooks",
            "שינה",
            "--key-message",
            "שלושה טיפים",
            "--types",
            "story,question",
        ])
        .unwrap();
        match cli.command {
            Commands::Hooks {
                topic,
                key_message,
                types,
                vibe,
                ..
            } => {
                assert_eq!(topic, "שינה");
                assert_eq!(key_message, "שלושה טיפים");
                assert_eq!(types.as_deref(), Some("story,question"));
                assert_eq!(vibe, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["hebcap"]).is_err());
    }
}
