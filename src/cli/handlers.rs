use std::ffi::OsString;
use std::io::{self, IsTerminal};

use tracing::debug;

use crate::cli::commands::Cli;
use crate::cli::output::{render_snapshot, write_report};
use crate::io::{config_io, snapshot_io};
use crate::model::config::Config;
use crate::model::snapshot::Snapshot;
use crate::ops::build::build_snapshot;
use crate::remote::AsanaClient;

/// Load (or fetch) the snapshot and print the report to stdout.
///
/// Nothing is printed until the snapshot is complete, so a failed fetch or a
/// missing cache leaves stdout empty.
pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli.config.clone().unwrap_or_else(config_io::config_path);
    let config = config_io::read_config(&config_path)?;
    debug!(?config, "loaded config");

    let snapshot = if cli.load {
        refresh(&config)?
    } else {
        snapshot_io::load_snapshot(&config.dump_path)?
    };

    let lines = render_snapshot(&snapshot);
    let stdout = io::stdout();
    let color = use_color(cli.no_color, stdout.is_terminal());
    write_report(&mut stdout.lock(), &lines, color)?;
    Ok(())
}

/// Fetch a new snapshot from Asana and store it at the dump path
fn refresh(config: &Config) -> Result<Snapshot, Box<dyn std::error::Error>> {
    snapshot_io::ensure_dump_file(&config.dump_path)?;

    let client = AsanaClient::from_config(config)?;
    let snapshot = build_snapshot(&client, &config.workspace_id, &config.has_subtask_tag)?;
    snapshot_io::store_snapshot(&snapshot, &config.dump_path)?;
    println!("Data saved to {}...", config.dump_path.display());
    Ok(snapshot)
}

fn use_color(no_color_flag: bool, is_terminal: bool) -> bool {
    color_allowed(no_color_flag, is_terminal, std::env::var_os("NO_COLOR"))
}

/// `NO_COLOR` only counts when set to a non-empty value
fn color_allowed(no_color_flag: bool, is_terminal: bool, no_color_env: Option<OsString>) -> bool {
    !no_color_flag && is_terminal && !no_color_env.is_some_and(|v| !v.is_empty())
}
