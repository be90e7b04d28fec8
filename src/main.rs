use std::process;

use jsonnet_deps::cli::{self, Args};
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse_args();

    init_logging(args.verbose);

    process::exit(cli::run(&args));
}

/// Log to stderr, honoring `RUST_LOG` when set
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("jsonnet_deps=debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
