// Error types for the reporting layer

/// Errors raised while building or driving a reporting session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Writing to the output sink failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// Session construction received keys it does not understand.
    #[error("unknown arguments to session ({})", keys.join(" "))]
    UnknownArguments { keys: Vec<String> },

    /// Session arguments were not a valid object.
    #[error("invalid session arguments: {0}")]
    InvalidArguments(#[from] serde_json::Error),

    /// A replayed event could not be decoded.
    #[error("invalid event at line {line}: {message}")]
    InvalidEvent { line: usize, message: String },
}

pub type Result<T> = std::result::Result<T, SessionError>;
