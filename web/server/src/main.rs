//! HTTP front end for the blackjack core.
//!
//! Each visitor gets a session cookie; their round lives in memory on the
//! server and every request applies exactly one transition to it.

mod session;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use session::{Action, SessionStore, session_cookie, session_id};

type SharedState = Arc<SessionStore>;

/// How often idle sessions are swept.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Parser)]
#[command(name = "twentyone-web", about = "Serve blackjack rounds over HTTP")]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Drop sessions idle for this many seconds
    #[arg(long, default_value_t = 1800)]
    session_idle_secs: u64,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let store = SharedState::new(SessionStore::new(Duration::from_secs(
        args.session_idle_secs,
    )));
    tokio::spawn(evict_idle_sessions(store.clone()));

    let app = Router::new()
        .route("/api/state", get(state))
        .route("/api/hit", post(hit))
        .route("/api/stand", post(stand))
        .route("/api/reset", post(reset))
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(args.addr).await?;
    info!("listening on {}", args.addr);
    axum::serve(listener, app).await
}

async fn evict_idle_sessions(store: SharedState) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);
    loop {
        interval.tick().await;
        let evicted = store.evict_idle(Instant::now());
        if evicted > 0 {
            info!(evicted, "evicted idle sessions");
        }
    }
}

async fn state(State(store): State<SharedState>, headers: HeaderMap) -> Response {
    respond(&store, &headers, None)
}

async fn hit(State(store): State<SharedState>, headers: HeaderMap) -> Response {
    respond(&store, &headers, Some(Action::Hit))
}

async fn stand(State(store): State<SharedState>, headers: HeaderMap) -> Response {
    respond(&store, &headers, Some(Action::Stand))
}

async fn reset(State(store): State<SharedState>, headers: HeaderMap) -> Response {
    respond(&store, &headers, Some(Action::Reset))
}

fn respond(store: &SessionStore, headers: &HeaderMap, action: Option<Action>) -> Response {
    let reply = match store.handle(session_id(headers), action) {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!(%err, "failed to deal");
            return (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()).into_response();
        }
    };

    let mut response = Json(reply.table).into_response();
    if reply.created {
        match HeaderValue::from_str(&session_cookie(reply.session)) {
            Ok(cookie) => {
                response.headers_mut().insert(header::SET_COOKIE, cookie);
            }
            Err(err) => tracing::warn!(%err, "invalid session cookie"),
        }
    }
    response
}
