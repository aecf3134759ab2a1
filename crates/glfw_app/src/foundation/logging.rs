//! Logging setup on top of `env_logger`

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// `RUST_LOG` wins when it is set; otherwise `default_filter` (for example
/// `"info"` or `"glfw_app=debug"`) is used. Calling this more than once is
/// harmless, later calls are ignored.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::trace!("Logger already initialized");
    }
}
