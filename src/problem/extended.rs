//! Problems with extension members.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Problem, ProblemError};

/// A [`Problem`] with additional, application defined members.
///
/// The extension is flattened into the problem when encoded, so it must
/// serialize as a struct or a map.
///
/// # Examples
///
/// ```
/// # use problem::Problem;
/// # use serde::Serialize;
/// #[derive(Serialize, Debug)]
/// struct OutOfCredit {
///     balance: u32,
/// }
///
/// let problem = Problem::new()
///     .with_status(403)
///     .with_extension(OutOfCredit { balance: 30 });
///
/// assert_eq!(
///     serde_json::to_string(&problem).unwrap(),
///     r#"{"status":403,"balance":30}"#
/// );
/// ```
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Extended<X> {
    #[serde(flatten)]
    pub problem: Problem,
    #[serde(flatten)]
    pub extension: X,
}

impl<X> Extended<X> {
    pub fn new(problem: Problem, extension: X) -> Self {
        Self { problem, extension }
    }
}

impl<X> fmt::Display for Extended<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.problem, f)
    }
}

impl<X: fmt::Debug> std::error::Error for Extended<X> {}

impl<X> ProblemError for Extended<X>
where
    X: Serialize + fmt::Debug + Send + Sync,
{
    fn problem(&self) -> Option<&Problem> {
        Some(&self.problem)
    }

    fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeMap;

    #[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
    struct Extra {
        #[serde(rename = "ext")]
        extra: String,
    }

    #[test]
    fn flattened_members() {
        let problem = Problem::new().with_status(456).with_extension(Extra {
            extra: "foo".to_string(),
        });

        assert_eq!(
            problem.to_json().expect("encode problem"),
            br#"{"status":456,"ext":"foo"}"#
        );
        assert_eq!(problem.problem(), Some(&problem.problem));
    }

    #[test]
    fn message_is_title() {
        let problem = Problem::new().with_title("foo").with_extension(Extra {
            extra: "bar".to_string(),
        });

        assert_eq!(problem.to_string(), "foo");
    }

    #[test]
    fn map_extension() {
        let mut members = BTreeMap::new();
        members.insert("balance", 30);
        members.insert("cost", 50);

        let problem = Problem::new().with_title("Out of credit").with_extension(members);

        assert_eq!(
            problem.to_json().expect("encode problem"),
            br#"{"title":"Out of credit","balance":30,"cost":50}"#
        );
    }

    #[test]
    fn unencodable_extension() {
        // flattened extensions must be maps or structs
        let problem = Problem::new().with_status(400).with_extension(12u32);
        assert!(problem.to_json().is_err());

        let mut members = BTreeMap::new();
        members.insert((1, 2), "tuple keys");
        let problem = Problem::new().with_extension(members);
        assert!(problem.to_json().is_err());
    }

    #[test]
    fn parse_body() {
        let problem: Extended<Extra> =
            serde_json::from_str(r#"{"status":456,"ext":"foo"}"#).expect("parse problem");

        assert_eq!(problem.problem, Problem::new().with_status(456));
        assert_eq!(problem.extension.extra, "foo");
    }
}
