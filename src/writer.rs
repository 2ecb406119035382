//! Response writers.

use std::io;

use http::{HeaderMap, Response, StatusCode};

/// The part of an HTTP response that a problem is written to.
///
/// A status line can only be sent once. Implementations must ignore any
/// status written after the first one, and treat writing the body as
/// committing `200 OK` when no status was written yet.
pub trait ResponseWriter {
    /// The status that has already been written, if any.
    fn committed_status(&self) -> Option<StatusCode>;

    /// Headers that will be sent with the response.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Write the status line. Has no effect if a status was already written.
    fn write_status(&mut self, status: StatusCode);

    /// Append bytes to the response body.
    fn write_body(&mut self, body: &[u8]) -> io::Result<()>;
}

/// An in-memory [`ResponseWriter`].
///
/// Records everything written to it so that it can be inspected or turned
/// into an [`http::Response`] afterwards.
///
/// # Examples
///
/// ```
/// # use problem::{Recorder, ResponseWriter};
/// # use http::StatusCode;
/// let mut recorder = Recorder::new();
/// recorder.write_status(StatusCode::IM_A_TEAPOT);
/// recorder.write_status(StatusCode::OK);
///
/// assert_eq!(recorder.status(), StatusCode::IM_A_TEAPOT);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Recorder {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that already committed to a status.
    pub fn with_status(status: StatusCode) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// The written status, or `200 OK` if nothing was written.
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Split the recorder into the status, headers and body it recorded.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Vec<u8>) {
        (self.status(), self.headers, self.body)
    }
}

impl ResponseWriter for Recorder {
    fn committed_status(&self) -> Option<StatusCode> {
        self.status
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        self.status.get_or_insert(status);
    }

    fn write_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.status.get_or_insert(StatusCode::OK);
        self.body.extend_from_slice(body);

        Ok(())
    }
}

impl From<Recorder> for Response<Vec<u8>> {
    fn from(recorder: Recorder) -> Self {
        let (status, headers, body) = recorder.into_parts();

        let mut response = Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}
