use std::io;

/// Failure classes for a run, mapped one-to-one onto process exit codes.
///
/// None of these are retried: a failed call is surfaced and the run ends.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Network(String),

    #[error("service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Process exit code for this failure class.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Io(_) => 1,
            Error::Config(_) => 2,
            Error::Api { .. } => 3,
            Error::Network(_) => 4,
        }
    }
}
