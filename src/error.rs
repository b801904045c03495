use std::io;

/// A failure reported by the browser for a host API call.
///
/// `api` and `message` are passed through exactly as the browser sent them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{api}: {message}")]
pub struct HostApiError {
    pub api: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed host message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("host api call failed: {0}")]
    HostApi(#[from] HostApiError),

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[cfg(feature = "config")]
    #[error("invalid manifest config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("connection point already registered: {0}")]
    DuplicateConnection(String),

    #[error("no connection point named {0}")]
    UnknownConnection(String),

    #[error("view already delivered to connection point {0}")]
    AlreadyLoaded(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
