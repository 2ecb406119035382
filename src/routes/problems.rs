//! Routes that answer with problems, to see what clients receive.

use crate::error::Error;
use crate::problem::{Extended, Opaque, Problem};
use crate::ServerState;

use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::Response,
};
use serde::Serialize;
use tracing::info;

#[derive(Serialize, Debug)]
pub struct OutOfCredit {
    balance: u32,
    accounts: Vec<&'static str>,
}

/// Answer with a problem for any status, including ones that can't be sent.
#[axum::debug_handler(state = ServerState)]
pub async fn status_handler(
    State(state): State<ServerState>,
    method: Method,
    Path(code): Path<i32>,
) -> Result<Response, Error> {
    let title = u16::try_from(code)
        .ok()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .and_then(|code| code.canonical_reason())
        .unwrap_or_default();

    let problem = Problem::new().with_status(code).with_title(title);
    state.responder.response(&method, Some(&problem))
}

/// Answer with a problem carrying extension members.
#[axum::debug_handler(state = ServerState)]
pub async fn credit_handler() -> Extended<OutOfCredit> {
    Problem::status(StatusCode::FORBIDDEN)
        .with_type("https://example.com/probs/out-of-credit")
        .with_detail("Your current balance is 30, but that costs 50.")
        .with_instance("/account/12345/msgs/abc")
        .with_extension(OutOfCredit {
            balance: 30,
            accounts: vec!["/account/12345", "/account/67890"],
        })
}

/// Fail with an error that has no problem details.
#[axum::debug_handler(state = ServerState)]
pub async fn opaque_handler() -> Result<StatusCode, Opaque<std::io::Error>> {
    let err = std::io::Error::other("storage unavailable");
    info!("failing with an opaque error: {}", err);

    Err(Opaque(err))
}
