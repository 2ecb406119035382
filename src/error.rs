//! Failures while writing a problem response.

use thiserror::Error;

/// An error that occurs while answering a request with a problem.
///
/// These never reach the client. They point at an application error type
/// that cannot be encoded, or at a broken response writer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("error encoding problem as json: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("error writing problem body: {0}")]
    Write(#[from] std::io::Error),
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        // the problem itself could not be sent, so fall back to a bare 500
        (http::StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
    }
}
