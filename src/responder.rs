//! Answering requests with problem details.

use std::fmt;
use std::sync::Arc;

use http::{
    header::{HeaderValue, CONTENT_TYPE},
    Method, StatusCode,
};
use tracing::{debug, warn};

use crate::config::{Config, ReportMode};
use crate::error::Error;
use crate::problem::{ProblemError, EMPTY_BODY};
use crate::sink::{Sink, TracingSink};
use crate::writer::ResponseWriter;

/// The media type of problem details encoded as JSON.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Where a responder sends failures it could not write to the client.
#[derive(Clone)]
pub enum Report {
    /// Return them from [`Responder::respond`].
    Return,
    /// Report them to a sink and return `Ok`.
    Sink(Arc<dyn Sink>),
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Return => f.write_str("Return"),
            Report::Sink(_) => f.write_str("Sink(..)"),
        }
    }
}

/// Writes errors as problem details responses.
///
/// A responder holds no per-request state. Build one when the server starts
/// and share it between handlers.
///
/// # Examples
///
/// ```
/// # use problem::{Problem, Recorder, Responder};
/// # use http::{Method, StatusCode};
/// let responder = Responder::returning();
/// let mut recorder = Recorder::new();
///
/// responder
///     .respond(&mut recorder, &Method::GET, Some(&Problem::status(StatusCode::NOT_FOUND)))
///     .expect("write problem");
///
/// assert_eq!(recorder.status(), StatusCode::NOT_FOUND);
/// assert_eq!(recorder.body(), br#"{"title":"Not Found","status":404}"#);
/// ```
#[derive(Clone, Debug)]
pub struct Responder {
    report: Report,
}

impl Responder {
    /// Create a responder that reports failures to `sink`, or returns them
    /// when no sink is given.
    pub fn new(sink: Option<Arc<dyn Sink>>) -> Self {
        let report = match sink {
            Some(sink) => Report::Sink(sink),
            None => Report::Return,
        };

        Self { report }
    }

    /// Create a responder that returns failures to the caller.
    pub fn returning() -> Self {
        Self {
            report: Report::Return,
        }
    }

    /// Create a responder that reports failures to a sink.
    pub fn with_sink<S: Sink + 'static>(sink: S) -> Self {
        Self {
            report: Report::Sink(Arc::new(sink)),
        }
    }

    /// Create a responder that logs failures with `tracing`.
    pub fn logging() -> Self {
        Self::with_sink(TracingSink)
    }

    pub fn from_config(config: &Config) -> Self {
        match config.report {
            ReportMode::Log => Self::logging(),
            ReportMode::Return => Self::returning(),
        }
    }

    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Write `err` to a response as problem details.
    ///
    /// `None` means there was no error. It is answered with `200 OK` and an
    /// empty problem. Responses to `HEAD` requests get a status but no
    /// content type and no body.
    ///
    /// # Errors
    ///
    /// If the error cannot be encoded, or the body cannot be written, nothing
    /// is written to the body. The failure is returned when the responder has
    /// no sink and reported to the sink otherwise.
    pub fn respond<W>(
        &self,
        w: &mut W,
        method: &Method,
        err: Option<&dyn ProblemError>,
    ) -> Result<(), Error>
    where
        W: ResponseWriter + ?Sized,
    {
        let status = resolve_status(w.committed_status(), err);
        let head = *method == Method::HEAD;

        if !head {
            w.headers_mut().insert(
                CONTENT_TYPE,
                HeaderValue::from_static(APPLICATION_PROBLEM_JSON),
            );
        }
        w.write_status(status);
        debug!(%status, %method, "responding with problem");

        if head {
            return Ok(());
        }

        let written = match encode(err) {
            Ok(body) => w.write_body(&body).map_err(Error::from),
            Err(e) => Err(Error::from(e)),
        };

        written.or_else(|e| self.fail(e))
    }

    fn fail(&self, err: Error) -> Result<(), Error> {
        match &self.report {
            Report::Return => Err(err),
            Report::Sink(sink) => {
                sink.report(&err.to_string());
                Ok(())
            }
        }
    }
}

impl Default for Responder {
    fn default() -> Self {
        Self::logging()
    }
}

/// Pick the status for a response.
///
/// A sendable status on the problem wins, then a status the writer already
/// committed to, then `500` for errors and `200` when there is no error.
pub fn resolve_status(
    committed: Option<StatusCode>,
    err: Option<&dyn ProblemError>,
) -> StatusCode {
    if let Some(problem) = err.and_then(|e| e.problem()) {
        if problem.status != 0 {
            match problem.status_code() {
                Some(code) => return code,
                None => warn!(status = problem.status, "problem status can't be sent"),
            }
        }
    }

    committed.unwrap_or(match err {
        Some(_) => StatusCode::INTERNAL_SERVER_ERROR,
        None => StatusCode::OK,
    })
}

fn encode(err: Option<&dyn ProblemError>) -> Result<Vec<u8>, serde_json::Error> {
    match err {
        Some(err) => err.to_json(),
        None => Ok(EMPTY_BODY.to_vec()),
    }
}
