use asana_tree::cli::commands::Cli;
use asana_tree::cli::handlers;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Diagnostics are written to stderr. The HTTP client stack is noisy, so it
/// stays silent unless `--verbose` is given; `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,reqwest=off,hyper=off,hyper_util=off"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = handlers::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
