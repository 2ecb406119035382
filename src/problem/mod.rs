//! Problem details values.

pub mod extended;

pub use extended::Extended;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body written for errors that carry no problem details.
pub const EMPTY_BODY: &[u8] = b"{}";

/// A problem details object as described in RFC 7807.
///
/// Every member is optional on the wire: zero or empty members are left out
/// when the problem is encoded. Formatting a problem with [`Display`] yields
/// its title.
///
/// # Examples
///
/// ```
/// # use problem::Problem;
/// let problem = Problem::new().with_status(409).with_title("Conflict");
///
/// assert_eq!(problem.to_string(), "Conflict");
/// assert_eq!(
///     serde_json::to_string(&problem).unwrap(),
///     r#"{"title":"Conflict","status":409}"#
/// );
/// ```
///
/// [`Display`]: std::fmt::Display
#[derive(Deserialize, Serialize, Error, Clone, Debug, Default, PartialEq, Eq)]
#[error("{title}")]
#[serde(default)]
pub struct Problem {
    /// A URI reference identifying the problem type.
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub type_url: String,
    /// A short, human-readable summary of the problem type.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub title: String,
    /// The HTTP status code. Zero means unset.
    #[serde(skip_serializing_if = "is_zero")]
    pub status: i32,
    /// An explanation specific to this occurrence of the problem.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
    /// A URI reference identifying this occurrence of the problem.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub instance: String,
}

fn is_zero(status: &i32) -> bool {
    *status == 0
}

impl Problem {
    /// Create an empty problem. It encodes as `{}`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a problem for an HTTP status code, using the canonical reason
    /// phrase of the code as its title.
    ///
    /// # Examples
    ///
    /// ```
    /// # use problem::Problem;
    /// # use http::StatusCode;
    /// let problem = Problem::status(StatusCode::NOT_FOUND);
    ///
    /// assert_eq!(problem.title, "Not Found");
    /// assert_eq!(problem.status, 404);
    /// ```
    pub fn status(code: StatusCode) -> Self {
        Self {
            title: code.canonical_reason().unwrap_or_default().to_string(),
            status: i32::from(code.as_u16()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: i32) -> Self {
        self.status = status;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_type(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = type_url.into();
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    /// Attach extension members. They are encoded next to the problem's own
    /// members, not nested under a key.
    pub fn with_extension<X>(self, extension: X) -> Extended<X> {
        Extended::new(self, extension)
    }

    /// The status as an HTTP status code.
    ///
    /// Returns [`None`] if the status is unset or cannot be sent on a status
    /// line (anything outside 100 through 999).
    pub fn status_code(&self) -> Option<StatusCode> {
        u16::try_from(self.status)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
    }
}

impl From<StatusCode> for Problem {
    fn from(code: StatusCode) -> Self {
        Self::status(code)
    }
}

/// An error that can be answered with a problem details response.
///
/// Errors that carry a [`Problem`] return it from [`ProblemError::problem`]
/// and are encoded with [`ProblemError::to_json`]. Everything else keeps the
/// defaults and is answered with an empty object.
pub trait ProblemError: std::fmt::Debug + std::fmt::Display + Send + Sync {
    /// The problem carried by this error, if any.
    fn problem(&self) -> Option<&Problem> {
        None
    }

    /// Encode the response body for this error.
    ///
    /// # Errors
    ///
    /// Returns an error if any member of the problem cannot be represented
    /// as JSON.
    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self.problem() {
            Some(problem) => serde_json::to_vec(problem),
            None => Ok(EMPTY_BODY.to_vec()),
        }
    }
}

impl ProblemError for Problem {
    fn problem(&self) -> Option<&Problem> {
        Some(self)
    }
}

impl ProblemError for anyhow::Error {}

impl ProblemError for Box<dyn std::error::Error + Send + Sync> {}

/// Any error answered without problem details.
///
/// ```
/// # use problem::{Opaque, ProblemError};
/// let err = Opaque(std::io::Error::other("disk on fire"));
///
/// assert!(err.problem().is_none());
/// assert_eq!(err.to_json().unwrap(), b"{}");
/// ```
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Opaque<E>(#[from] pub E)
where
    E: std::error::Error + 'static;

impl<E> ProblemError for Opaque<E> where E: std::error::Error + Send + Sync + 'static {}
