use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "asana-tree",
    about = "Print the open tasks of an Asana workspace as an indented tree",
    version
)]
pub struct Cli {
    /// Fetch fresh data from Asana and save it before printing
    #[arg(short, long)]
    pub load: bool,

    /// Show diagnostics from the HTTP client
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: $XDG_CONFIG_HOME/asana-tree/config.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Never color the output
    #[arg(long)]
    pub no_color: bool,
}
