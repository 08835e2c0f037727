use std::ffi::OsString;

use bs_core::ScriptError;
use clap::Parser;

mod cli_args;
mod console_host;
mod error_map;
mod script_runner;
mod source_loader;

pub(crate) use cli_args::{CheckArgs, Cli, Mode, RunArgs};
pub(crate) use error_map::{
    emit_error, json_text, map_cli_event_data, map_cli_source_path, map_cli_source_read,
    map_cli_source_scan,
};
pub(crate) use source_loader::load_scripts_from_dir;
#[cfg(test)]
pub(crate) use source_loader::{read_script_sources_from_dir, resolve_scripts_dir};

pub fn run_cli_from_args<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    init_tracing();
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(error) => {
            let _ = error.print();
            return error.exit_code();
        }
    };
    match run(cli) {
        Ok(code) => code,
        Err(error) => emit_error(error),
    }
}

/// Logs go to stderr so stdout stays line-oriented.
fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<i32, ScriptError> {
    match cli.command {
        Mode::Run(args) => script_runner::run_scripts(args),
        Mode::Check(args) => script_runner::check_scripts(args),
        Mode::Actions => script_runner::list_actions(),
    }
}
