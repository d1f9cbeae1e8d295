use thiserror::Error;

/// Failures of docker access and panel rendering.
///
/// Per-item removal problems never appear here: a vanished item becomes
/// `ItemOutcome::Skipped` and a refused removal a `ConnectorError`.
#[derive(Error, Debug)]
pub enum DockError {
    #[error("Render failed: {0}")]
    Render(String),

    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Could not parse docker output: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DockError>;
