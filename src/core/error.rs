use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Central error type for the whole action.
/// Every module returns `Result<T, ActionError>`.
#[derive(Debug, Error)]
pub enum ActionError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("EULA file already exists at {0:?}")]
    EulaAlreadyExists(PathBuf),

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed: HTTP {status}")]
    RequestFailed { url: String, status: u16 },

    // ── Response shape ──────────────────────────────────
    #[error("Unexpected response from {url}: {detail}")]
    DataShape { url: String, detail: String },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::DeError),

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Processes ───────────────────────────────────────
    #[error("Failed to start `{program}`: {source}")]
    ProcessSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{step}` exited with status {code:?}")]
    ProcessFailed { step: String, code: Option<i32> },

    #[error("`{step}` did not finish within {limit:?}")]
    ProcessTimeout { step: String, limit: Duration },

    #[error("Server exited before printing {marker:?}")]
    ServerNotReady { marker: String },

    #[error("Failed to terminate process {pid}: {reason}")]
    ProcessKill { pid: u32, reason: String },

    // ── Configuration ───────────────────────────────────
    #[error("Invalid input {name}: {reason}")]
    InvalidInput { name: String, reason: String },

    // ── Generic ─────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Coarse failure families reported to the CI host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    DataShape,
    Io,
    Process,
    Config,
}

impl ActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ActionError::Http(_) | ActionError::RequestFailed { .. } => ErrorKind::Network,
            ActionError::DataShape { .. } | ActionError::Xml(_) | ActionError::Json(_) => {
                ErrorKind::DataShape
            }
            ActionError::Io { .. } | ActionError::EulaAlreadyExists(_) => ErrorKind::Io,
            ActionError::ProcessSpawn { .. }
            | ActionError::ProcessFailed { .. }
            | ActionError::ProcessTimeout { .. }
            | ActionError::ServerNotReady { .. }
            | ActionError::ProcessKill { .. } => ErrorKind::Process,
            ActionError::InvalidInput { .. } | ActionError::Other(_) => ErrorKind::Config,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ActionError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type ActionResult<T> = Result<T, ActionError>;

impl From<std::io::Error> for ActionError {
    fn from(source: std::io::Error) -> Self {
        ActionError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}
