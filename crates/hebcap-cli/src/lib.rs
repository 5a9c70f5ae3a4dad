//! Command-line front end for the Hebrew caption pipeline.
//!
//! Parses arguments, loads configuration and an optional custom lexicon, and
//! renders packages as text or JSON.

pub mod args;
pub mod commands;
pub mod config;
pub mod logging;

pub use args::{Cli, Commands};
pub use commands::{load_lexicon, render_package, App, ProcessRequest};
pub use config::{CliConfig, LogFormat};
pub use logging::init_tracing;
