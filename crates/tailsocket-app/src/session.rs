//! Session identity and bootstrap configuration.
//!
//! A [`Session`] names one watch request: a client-minted identifier plus the
//! network authority and scheme used to reach the tailing server. It is built
//! once from a [`SessionConfig`] and never changes afterwards.

use std::fmt;

use thiserror::Error;
use url::Url;
use uuid::Uuid;

/// Path prefix of the streaming endpoint on the server.
pub const ENDPOINT_PATH: &str = "/websocket";

/// Origin assumed when the shell is not told where the server lives.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8888";

/// Errors raised while reading bootstrap configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Origin is not a parseable URL.
    #[error("invalid origin {origin:?}: {reason}")]
    InvalidOrigin {
        /// The rejected origin.
        origin: String,
        /// Parser error description.
        reason: String,
    },

    /// Origin uses a scheme with no stream counterpart.
    #[error("unsupported origin scheme {0:?} (expected http, https, ws or wss)")]
    UnsupportedScheme(String),

    /// Origin has no host component.
    #[error("origin {0:?} has no host")]
    MissingHost(String),
}

/// Opaque session token, minted client-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Mint a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID. Useful for deterministic tests.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Bootstrap inputs read once before a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Network authority (`host` or `host:port`).
    pub host_port: String,
    /// Use the encrypted stream scheme.
    pub secure: bool,
    /// File path to pre-fill in the request field.
    pub initial_path: Option<String>,
}

impl SessionConfig {
    /// Plain-text configuration toward `host_port`.
    pub fn new(host_port: impl Into<String>) -> Self {
        Self { host_port: host_port.into(), secure: false, initial_path: None }
    }

    /// Derive the configuration from the origin the shell was launched for.
    ///
    /// `https`/`wss` origins select the encrypted scheme. The authority keeps
    /// an explicit port and omits the scheme's default one.
    pub fn from_origin(origin: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(origin).map_err(|e| ConfigError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

        let secure = match url.scheme() {
            "http" | "ws" => false,
            "https" | "wss" => true,
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        };

        let host = url.host_str().ok_or_else(|| ConfigError::MissingHost(origin.to_string()))?;
        let host_port = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self { host_port, secure, initial_path: None })
    }

    /// Replace the authority. Empty or missing overrides keep the current one.
    #[must_use]
    pub fn with_host_port(mut self, host_port: Option<String>) -> Self {
        if let Some(host_port) = host_port.filter(|h| !h.is_empty()) {
            self.host_port = host_port;
        }
        self
    }

    /// Select the encrypted scheme.
    #[must_use]
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Pre-fill the request field.
    #[must_use]
    pub fn with_initial_path(mut self, initial_path: Option<String>) -> Self {
        self.initial_path = initial_path;
        self
    }

    /// Mint a session with a fresh random identifier.
    pub fn into_session(self) -> Session {
        Session::with_id(self, SessionId::random())
    }
}

/// One watch request's identity and configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    config: SessionConfig,
}

impl Session {
    /// Build a session with a caller-chosen identifier.
    pub fn with_id(config: SessionConfig, id: SessionId) -> Self {
        Self { id, config }
    }

    /// Session identifier.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Network authority of the server.
    pub fn host_port(&self) -> &str {
        &self.config.host_port
    }

    /// Encrypted scheme selected.
    pub fn is_secure(&self) -> bool {
        self.config.secure
    }

    /// File path pre-filled in the request field. `None` if not configured.
    pub fn initial_path(&self) -> Option<&str> {
        self.config.initial_path.as_deref()
    }

    /// Stream scheme, `wss` or `ws`.
    pub fn scheme(&self) -> &'static str {
        if self.config.secure { "wss" } else { "ws" }
    }

    /// Full endpoint URL: `{scheme}://{host_port}/websocket/{session_id}`.
    pub fn endpoint(&self) -> String {
        format!("{}://{}{}/{}", self.scheme(), self.config.host_port, ENDPOINT_PATH, self.id)
    }
}
