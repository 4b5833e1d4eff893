pub mod animated_logger;

use env_logger::{Builder, Env};

/// Installs the stderr logger. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let default_filter = format!("reverse_engineer={level},warn");

    let _ = Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_target(false)
        .format_timestamp(None)
        .try_init();
}
