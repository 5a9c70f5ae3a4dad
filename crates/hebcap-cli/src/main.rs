//! hebcap binary.

use std::io::{self, Write};

use clap::Parser;
use tracing::debug;

use hebcap_cli::{init_tracing, load_lexicon, App, Cli, CliConfig};
use hebcap_models::ContentError;

/// Exit code for rejected input; other failures exit with 1.
const EXIT_INVALID_INPUT: i32 = 2;

fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = CliConfig::from_env();
    init_tracing(&config);
    debug!("CLI config: {:?}", config);

    let cli = Cli::parse();

    if let Err(e) = run(cli, config) {
        eprintln!("Error: {e:#}");
        let code = if e.downcast_ref::<ContentError>().is_some() {
            EXIT_INVALID_INPUT
        } else {
            1
        };
        std::process::exit(code);
    }
}

fn run(cli: Cli, config: CliConfig) -> anyhow::Result<()> {
    let lexicon = load_lexicon(cli.lexicon.as_deref())?;
    let app = App::new(lexicon, config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    app.run(cli, &mut out, &mut io::stdin().lock())?;
    out.flush()?;
    Ok(())
}
