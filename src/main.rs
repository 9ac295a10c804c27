//! handpilot: hand-landmark gestures to mouse and keyboard input
//!
//! Usage:
//!   detector | handpilot run                      # live frames on stdin
//!   handpilot run -i session.jsonl --replay-clock  # replay a recording
//!   handpilot config --defaults                    # print a starter config
//!
//! Operator keys while running: q quit, m mouse, c click, t typing,
//! x clear preview, n next typing mode, space recalibrate, p selection method.

mod app;
mod cli;
mod logging;

use anyhow::Result;
use clap::Parser;
use handpilot_config::AppConfig;

use cli::{Cli, Commands};
use logging::init_logging;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    let raw_terminal = matches!(&cli.command, Commands::Run(args) if !args.no_controls);
    init_logging(&config, cli.verbose, raw_terminal);

    match cli.command {
        Commands::Run(args) => app::run(config, args).await,
        Commands::Config(args) => {
            let shown = if args.defaults { AppConfig::default() } else { config };
            print!("{}", shown.to_toml_string()?);
            Ok(())
        }
    }
}
