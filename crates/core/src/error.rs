use std::time::Duration;
use thiserror::Error;

/// Result type alias for radar-core
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for the Radar workspace
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error for file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Provider wiring errors (unknown provider, missing key)
    #[error("provider error: {0}")]
    Provider(String),

    /// Parse/serialization errors
    #[error("parse error: {0}")]
    Parse(String),

    /// Report generation failed
    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Chat call failed
    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    /// Controller rejected an operation
    #[error("controller error: {0}")]
    Controller(#[from] ControllerError),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Failure of the external report generation call.
///
/// The transcript controller never shows these to the user; they are logged
/// and replaced by a plain-language failure message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Transport-level failure (DNS, connection reset, TLS)
    #[error("network failure: {0}")]
    Network(String),

    /// Non-success HTTP status from the analysis service
    #[error("service returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Service answered without any text
    #[error("service returned an empty response")]
    EmptyResponse,

    /// Response body did not match the report schema
    #[error("malformed report: {0}")]
    Parse(String),

    /// No answer within the configured bound
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl AnalysisError {
    /// Whether a bounded retry may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            AnalysisError::Network(_) | AnalysisError::Timeout(_) => true,
            AnalysisError::Api { status, .. } => *status == 429 || *status >= 500,
            AnalysisError::EmptyResponse | AnalysisError::Parse(_) => false,
        }
    }
}

/// Failure of the external chat call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChatError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed chat response: {0}")]
    Parse(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

impl ChatError {
    /// Whether a bounded retry may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ChatError::Network(_) | ChatError::Timeout(_) => true,
            ChatError::Api { status, .. } => *status == 429 || *status >= 500,
            ChatError::Parse(_) => false,
        }
    }
}

/// Reasons the transcript controller refuses to start an operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    /// A scripted execution or follow-up is already in flight
    #[error("another request is still running")]
    Busy,

    /// Follow-up text was empty after trimming
    #[error("message is empty")]
    EmptyMessage,
}
