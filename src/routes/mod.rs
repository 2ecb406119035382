mod problems;

use crate::{response::strip_head_content_type, ServerState};
use problems::{credit_handler, opaque_handler, status_handler};

use axum::{
    http::StatusCode,
    middleware::from_fn,
    routing::{get, Router},
};

pub fn routes() -> Router<ServerState> {
    Router::new()
        .route("/status/:code", get(status_handler))
        .route("/credit", get(credit_handler))
        .route("/opaque", get(opaque_handler))
        .route("/ping", get(ping_handler))
        .layer(from_fn(strip_head_content_type))
}

#[axum::debug_handler(state = ServerState)]
async fn ping_handler() -> StatusCode {
    StatusCode::OK
}
