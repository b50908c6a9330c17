use std::path::PathBuf;

/// Fatal error: stops the run and becomes the process exit code.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Per-term failure. Never fatal: the pipeline logs it and skips the term.
///
/// Fetch failures (`Status`, `Transport`, `Io`) are kept apart from parse
/// failures (`Workbook`, `NoSheet`) so the log says which side broke.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable workbook: {message}")]
    Workbook { message: String },

    #[error("workbook has no sheets")]
    NoSheet,
}

impl SourceError {
    /// True when the failure happened before any bytes were parsed.
    pub fn is_fetch(&self) -> bool {
        matches!(
            self,
            SourceError::Status { .. } | SourceError::Transport { .. } | SourceError::Io { .. }
        )
    }
}
