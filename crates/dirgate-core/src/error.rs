//! Gateway error taxonomy.
//!
//! Every error raised by a component or collaborator propagates unchanged up
//! to the dispatcher, where it is classified to a response status code. No
//! component swallows an error and substitutes a default result.

use thiserror::Error;

/// Errors that can abort a directory request.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The requested action is not one of the supported set.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A required request parameter was not supplied.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// A request parameter was supplied with a malformed value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Ticket validation did not succeed.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The caller authenticated but is not authorized for the request.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// A get-style lookup found no match in any configured source.
    #[error("unknown id: {0}")]
    UnknownId(String),

    /// The gateway or a collaborator is misconfigured or unreachable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A directory source operation failed outright.
    #[error("source operation failed: {0}")]
    SourceOperation(#[source] anyhow::Error),

    /// Anything not covered by the taxonomy above.
    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl DirectoryError {
    /// Short machine-readable name for the error kind, used in log lines and
    /// error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownAction(_) => "unknown_action",
            Self::MissingArgument(_) => "missing_argument",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::PermissionDenied(_) => "permission_denied",
            Self::UnknownId(_) => "unknown_id",
            Self::Configuration(_) => "configuration_error",
            Self::SourceOperation(_) => "source_operation_failed",
            Self::Unclassified(_) => "unclassified",
        }
    }
}
