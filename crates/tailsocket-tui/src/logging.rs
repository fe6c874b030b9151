//! Diagnostic logging setup.
//!
//! The terminal belongs to the UI, so log output goes to a file. `RUST_LOG`
//! takes precedence over the configured level.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::TerminalError;

/// Level names that turn logging off entirely.
const DISABLED_LEVELS: [&str; 2] = ["off", "none"];

/// Whether `level` disables logging.
pub fn is_disabled(level: &str) -> bool {
    DISABLED_LEVELS.iter().any(|off| level.trim().eq_ignore_ascii_case(off))
}

/// Install the global subscriber, appending to `path`.
///
/// Does nothing when `level` disables logging and `RUST_LOG` is unset.
pub fn init(level: &str, path: &Path) -> Result<(), TerminalError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if is_disabled(level) => return Ok(()),
        Err(_) => EnvFilter::try_new(level.trim())
            .map_err(|e| TerminalError::Logging(format!("invalid log level {level:?}: {e}")))?,
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);

    tracing_subscriber::registry()
        .with(layer)
        .with(filter)
        .try_init()
        .map_err(|e| TerminalError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn off_and_none_disable() {
        assert!(is_disabled("off"));
        assert!(is_disabled("NONE"));
        assert!(is_disabled(" off "));
        assert!(!is_disabled("info"));
        assert!(!is_disabled("tailsocket_app=debug"));
    }
}
