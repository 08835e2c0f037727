use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "blockscript")]
#[command(about = "Runs and checks block scripts")]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Mode,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Mode {
    /// Fires one event at every loaded script and ticks until tasks settle.
    Run(RunArgs),
    /// Compiles scripts and reports lines whose arguments would not resolve.
    Check(CheckArgs),
    /// Lists the built-in action catalog.
    Actions,
}

#[derive(Debug, Args)]
pub(crate) struct RunArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
    #[arg(long = "event", default_value = "start")]
    pub(crate) event: String,
    /// Event data as `key=value`; values are parsed as JSON, falling back to text.
    #[arg(long = "data")]
    pub(crate) data: Vec<String>,
    #[arg(long = "cancellable")]
    pub(crate) cancellable: bool,
    /// Upper bound on ticks to advance while tasks are still suspended.
    #[arg(long = "ticks", default_value_t = 20)]
    pub(crate) ticks: u64,
    #[arg(long = "files-dir")]
    pub(crate) files_dir: Option<String>,
    #[arg(long = "seed")]
    pub(crate) seed: Option<u32>,
    #[arg(long = "step-limit")]
    pub(crate) step_limit: Option<usize>,
    #[arg(long = "creative")]
    pub(crate) creative: bool,
    #[arg(long = "screen-open")]
    pub(crate) screen_open: bool,
    /// Sound ids the console host reports as playable.
    #[arg(long = "sound")]
    pub(crate) sounds: Vec<String>,
}

#[derive(Debug, Args)]
pub(crate) struct CheckArgs {
    #[arg(long = "scripts-dir")]
    pub(crate) scripts_dir: String,
}
