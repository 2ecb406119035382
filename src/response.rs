//! Problem responses for axum handlers.

use std::fmt;

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::{header::CONTENT_TYPE, Method};
use serde::Serialize;

use crate::error::Error;
use crate::problem::{Extended, Opaque, Problem, ProblemError};
use crate::responder::{Responder, APPLICATION_PROBLEM_JSON};
use crate::writer::Recorder;

impl Responder {
    /// Build a response for `err` to a request with the given method.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`Responder::respond`].
    pub fn response(
        &self,
        method: &Method,
        err: Option<&dyn ProblemError>,
    ) -> Result<Response, Error> {
        let mut recorder = Recorder::new();
        self.respond(&mut recorder, method, err)?;

        let (status, headers, body) = recorder.into_parts();
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;

        Ok(response)
    }
}

/// Middleware removing the problem content type from responses to `HEAD`.
///
/// The [`IntoResponse`] impls for problems can't see the request method, so
/// they always answer as if for `GET`. axum drops the body of a `HEAD`
/// response but keeps its headers. Routers returning problems from handlers
/// should add this with [`axum::middleware::from_fn`].
///
/// ```
/// # use axum::{middleware::from_fn, routing::get, Router};
/// # use problem::{strip_head_content_type, Problem};
/// # use http::StatusCode;
/// let app: Router = Router::new()
///     .route("/", get(|| async { Problem::status(StatusCode::GONE) }))
///     .layer(from_fn(strip_head_content_type));
/// ```
pub async fn strip_head_content_type(request: Request, next: Next) -> Response {
    let head = *request.method() == Method::HEAD;
    let mut response = next.run(request).await;

    if head
        && response
            .headers()
            .get(CONTENT_TYPE)
            .is_some_and(|v| *v == APPLICATION_PROBLEM_JSON)
    {
        response.headers_mut().remove(CONTENT_TYPE);
    }

    response
}

fn into_problem_response(err: &dyn ProblemError) -> Response {
    // HEAD is handled by strip_head_content_type and axum dropping the body
    Responder::logging()
        .response(&Method::GET, Some(err))
        .unwrap_or_else(IntoResponse::into_response)
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        into_problem_response(&self)
    }
}

impl<X> IntoResponse for Extended<X>
where
    X: Serialize + fmt::Debug + Send + Sync,
{
    fn into_response(self) -> Response {
        into_problem_response(&self)
    }
}

impl<E> IntoResponse for Opaque<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_response(self) -> Response {
        into_problem_response(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::to_bytes;
    use http::StatusCode;

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");

        String::from_utf8(bytes.to_vec()).expect("utf-8 body")
    }

    #[tokio::test]
    async fn problem_response() {
        let response = Problem::status(StatusCode::NOT_FOUND).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[CONTENT_TYPE], APPLICATION_PROBLEM_JSON);
        assert_eq!(
            body_string(response).await,
            r#"{"title":"Not Found","status":404}"#
        );
    }

    #[tokio::test]
    async fn opaque_response() {
        let response = Opaque(std::io::Error::other("secret")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "{}");
    }

    #[tokio::test]
    async fn head_response() {
        let response = Responder::returning()
            .response(&Method::HEAD, Some(&Problem::status(StatusCode::GONE)))
            .expect("build response");

        assert_eq!(response.status(), StatusCode::GONE);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(body_string(response).await, "");
    }

    #[tokio::test]
    async fn unencodable_response() {
        let problem = Problem::new().with_extension(7u8);

        let err = Responder::returning()
            .response(&Method::GET, Some(&problem))
            .expect_err("integers cannot be flattened");
        assert!(matches!(err, Error::Encode(_)));

        let response = problem.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(response).await, "");
    }
}
