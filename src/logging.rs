//! Logging setup for hosts embedding the view-model layer.

use env_logger::Env;

/// Install `env_logger` with an `info` default, overridable via `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs a logger.
pub fn init_logging() {
    let installed = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init()
        .is_ok();
    if installed {
        log::debug!("Logging initialised");
    }
}
