use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// `verbose` lowers the default filter to debug. `RUST_LOG` still wins when
/// set.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    // Logs go to stderr; stdout carries snapshots.
    builder.target(env_logger::Target::Stderr);

    // Already initialised by an earlier call.
    let _ = builder.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
