use clap::Parser;
use gli::cli::commands::{Cli, usage_message};
use gli::cli::handlers::{self, CommandError};
use gli::io::config_io;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help / --version print to stdout and exit 0
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("gli: {}", usage_message(&e));
            std::process::exit(1);
        }
    };
    init_tracing();

    let result = config_io::load_or_init(&config_io::config_dir())
        .map_err(CommandError::from)
        .and_then(|config| handlers::dispatch(cli, &config));

    if let Err(e) = result {
        eprintln!("gli: {}", e);
        std::process::exit(1);
    }
}

/// Quiet by default; `RUST_LOG=gli=debug` shows store and selector activity.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
