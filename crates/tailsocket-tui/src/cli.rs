//! Command-line arguments.
//!
//! Every option can also come from the environment, so the same binary can be
//! pointed at a server by a wrapper script without editing its invocation.

use std::path::PathBuf;

use clap::Parser;
use tailsocket_app::{ConfigError, DEFAULT_ORIGIN, LogBuffer, SessionConfig};

/// Watch a log file on a remote server
#[derive(Parser, Debug, Clone)]
#[command(name = "tailsocket")]
#[command(about = "Watch a log file on a remote server over a WebSocket")]
#[command(version)]
pub struct Args {
    /// Origin of the tailing server
    ///
    /// `https` and `wss` origins select an encrypted stream.
    #[arg(long, env = "TAILSOCKET_ORIGIN", default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Server authority (`host:port`), overriding the one from the origin
    #[arg(long, env = "TAILSOCKET_HOST_PORT")]
    pub host_port: Option<String>,

    /// File path to pre-fill in the request field
    #[arg(short, long, env = "TAILSOCKET_PATH")]
    pub path: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "TAILSOCKET_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// File receiving diagnostic logs
    #[arg(long, env = "TAILSOCKET_LOG_FILE", default_value = "tailsocket.log")]
    pub log_file: PathBuf,

    /// Keep at most this many log entries, dropping the oldest
    #[arg(long, env = "TAILSOCKET_MAX_ENTRIES")]
    pub max_entries: Option<usize>,
}

impl Args {
    /// Session configuration described by these arguments.
    pub fn session_config(&self) -> Result<SessionConfig, ConfigError> {
        let config = SessionConfig::from_origin(&self.origin)?
            .with_host_port(self.host_port.clone())
            .with_initial_path(self.path.clone().filter(|p| !p.is_empty()));
        Ok(config)
    }

    /// Empty log buffer honoring `--max-entries`.
    pub fn log_buffer(&self) -> LogBuffer {
        self.max_entries.map_or_else(LogBuffer::new, LogBuffer::with_entry_limit)
    }
}
