//! # problem
//!
//! problem writes application errors to HTTP responses as [problem details]
//!
//! ## About
//!
//! An error that carries a [`Problem`] is sent with the problem's status and
//! its members encoded as `application/problem+json`. Extension members are
//! attached with [`Problem::with_extension`] and sent at the top level next
//! to the problem's own members. Errors without problem details are sent as
//! `500 Internal Server Error` with an empty object.
//!
//! A [`Responder`] writes the response. When an error can't be encoded, the
//! failure is either returned or reported to a [`Sink`], depending on how the
//! responder was built. Nothing broken is ever sent to the client.
//!
//! [problem details]: https://www.rfc-editor.org/rfc/rfc7807

pub mod config;
pub mod error;
pub mod problem;
pub mod responder;
#[cfg(feature = "axum")]
mod response;
#[cfg(feature = "server")]
mod routes;
pub mod sink;
pub mod writer;

pub use error::Error;
pub use problem::{Extended, Opaque, Problem, ProblemError};
pub use responder::{Report, Responder, APPLICATION_PROBLEM_JSON};
#[cfg(feature = "axum")]
pub use response::strip_head_content_type;
#[cfg(feature = "server")]
pub use routes::routes;
pub use sink::{LineSink, Sink, TracingSink};
pub use writer::{Recorder, ResponseWriter};

#[cfg(feature = "server")]
#[derive(Debug, Clone)]
pub struct ServerState {
    pub config: crate::config::Config,
    pub responder: Responder,
}
