use thiserror::Error;

/// Decode failures raised by the marshaller.
///
/// Each variant carries a human-readable detail string; [`MarshalError::label`]
/// gives the short category used by error reporters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshalError {
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl MarshalError {
    /// Short category label, stable across releases.
    pub fn label(&self) -> &'static str {
        match self {
            MarshalError::MalformedRequest(_) => "malformed-request",
            MarshalError::MalformedResponse(_) => "malformed-response",
        }
    }

    /// The detail message without the category prefix.
    pub fn detail(&self) -> &str {
        match self {
            MarshalError::MalformedRequest(detail) | MarshalError::MalformedResponse(detail) => {
                detail
            }
        }
    }
}

/// Result type for marshaller operations
pub type Result<T> = std::result::Result<T, MarshalError>;
