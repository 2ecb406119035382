//! problem-server answers requests with problem details, to see what clients
//! of the problem crate receive.
//!
//! Every route under `/status/:code` answers with a problem for that status,
//! `/credit` answers with a problem carrying extension members and `/opaque`
//! fails with an error that has no problem details.

use std::env::var;

use problem::{config::Config, routes, Responder, ServerState};

use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{info, Level};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::try_env().expect("invalid configuration");

    let state = ServerState {
        responder: Responder::from_config(&config),
        config: config.clone(),
    };

    let app = routes().with_state(state).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Micros),
                ),
        ),
    );

    let listener = TcpListener::bind(config.addr())
        .await
        .expect("unable to bind address");

    info!("serving on {}", config.addr());
    axum::serve(listener, app)
        .await
        .expect("server unexpectedly stopped");
}
