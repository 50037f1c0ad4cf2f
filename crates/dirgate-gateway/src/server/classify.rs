//! Error classification: taxonomy -> HTTP status and response body.

use axum::http::StatusCode;
use dirgate_core::DirectoryError;

/// Map an error to its response status.
pub fn status_for(error: &DirectoryError) -> StatusCode {
    match error {
        DirectoryError::UnknownAction(_) | DirectoryError::UnknownId(_) => StatusCode::NOT_FOUND,
        DirectoryError::MissingArgument(_) | DirectoryError::InvalidArgument(_) => {
            StatusCode::BAD_REQUEST
        }
        DirectoryError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        DirectoryError::AuthenticationFailed(_) => StatusCode::PROXY_AUTHENTICATION_REQUIRED,
        DirectoryError::Configuration(_)
        | DirectoryError::SourceOperation(_)
        | DirectoryError::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Build the plain-text body for an error response.
///
/// Client errors (4xx) echo the error message; server errors (5xx) expose
/// only the error kind unless debug mode is on, in which case the full cause
/// chain is included.
pub fn error_body(error: &DirectoryError, debug: bool) -> String {
    if debug {
        let mut body = error.to_string();
        let mut cause = std::error::Error::source(error);
        while let Some(err) = cause {
            body.push_str("\ncaused by: ");
            body.push_str(&err.to_string());
            cause = err.source();
        }
        return body;
    }

    if status_for(error).is_server_error() {
        format!("internal error ({})", error.kind())
    } else {
        error.to_string()
    }
}
