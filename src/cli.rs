use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use handpilot_core::{Controller, SelectionMethod};

#[derive(Debug, Parser)]
#[command(name = "handpilot")]
#[command(version, about = "Drive the mouse and keyboard with hand-landmark gestures")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Read landmark frames and turn gestures into input
    Run(RunArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// JSON-lines landmark stream; "-" reads stdin
    #[arg(long, short, default_value = "-")]
    pub input: String,

    /// Override the configured controller
    #[arg(long, value_enum)]
    pub controller: Option<ControllerArg>,

    /// Override the configured virtual-keyboard selection method
    #[arg(long, value_enum)]
    pub selection: Option<SelectionArg>,

    /// Use the timestamps recorded in the frames instead of arrival time
    #[arg(long)]
    pub replay_clock: bool,

    /// With --replay-clock, wait so frames play back in real time
    #[arg(long, requires = "replay_clock")]
    pub pace: bool,

    /// Log input actions instead of sending them to the OS
    #[arg(long)]
    pub dry_run: bool,

    /// Do not read operator keys from the terminal
    #[arg(long)]
    pub no_controls: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Print built-in defaults instead of the loaded file
    #[arg(long)]
    pub defaults: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ControllerArg {
    Pointer,
    Typing,
    Keyboard,
}

impl From<ControllerArg> for Controller {
    fn from(arg: ControllerArg) -> Self {
        match arg {
            ControllerArg::Pointer => Controller::Pointer,
            ControllerArg::Typing => Controller::Typing,
            ControllerArg::Keyboard => Controller::Keyboard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SelectionArg {
    Dwell,
    Pinch,
}

impl From<SelectionArg> for SelectionMethod {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Dwell => SelectionMethod::Dwell,
            SelectionArg::Pinch => SelectionMethod::Pinch,
        }
    }
}
