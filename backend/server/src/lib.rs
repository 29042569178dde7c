//! French dictionary backend.
//!
//! Serves Larousse definitions, keeps every looked-up word in a shared
//! history document and suggests words while the user types.
//!
//!
//!
//! # Routes
//!
//! All under `/api`, open to any origin.
//!
//! - `GET /definitions?word=W`: definition markup and example sentences, from the history when possible
//! - `GET /history`: the whole history, word -> markup
//! - `DELETE /history/{word}`: forget one word, 404 if it was never looked up
//! - `DELETE /history`: forget everything
//! - `GET /search?term=T`: up to ten words starting with `T`, nothing under two characters
//! - `POST /translate`: only with the `translate` feature
//!
//!
//!
//! # Notes
//!
//! ## One document, no locks
//! The history is a single JSON object rewritten in full on every change.
//! Two instances adding different words at the same moment can lose one of
//! them. That is acceptable for a personal vocabulary list, and it keeps the
//! store a plain Firebase URL. A conditional write on a document version
//! would be the way to tighten it.
//!
//! ## Failed fetches
//! When Larousse is unreachable the request still answers 200 with the error
//! message as the definition, so the front end can show it. That message is
//! never written to the history.
//!
//!
//!
//! # Setup
//!
//! Run against a local Firebase emulator.
//! ```sh
//! HISTORY_URL=http://127.0.0.1:9000/history.json RUST_LOG=debug cargo run -p dico
//! ```
//!
//! Use Redis instead.
//! ```sh
//! HISTORY_BACKEND=redis HISTORY_URL=redis://127.0.0.1:6379 cargo run -p dico
//! ```
//!
//! With translation.
//! ```sh
//! TRANSLATE_API_KEY=... cargo run -p dico --features translate
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Error};
use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{delete, get},
};
use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod history;
pub mod lookup;
pub mod routes;
pub mod search;
pub mod state;
#[cfg(feature = "translate")]
pub mod translate;

use routes::{
    clear_history_handler, definitions_handler, delete_history_item_handler, history_handler,
    root_handler, search_handler,
};
use state::AppState;

pub async fn start_server() -> Result<(), Error> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Initializing state...");
    let state = AppState::new().await?;

    info!("Starting server...");
    let app = app(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let api = Router::new()
        .route("/definitions", get(definitions_handler))
        .route(
            "/history",
            get(history_handler).delete(clear_history_handler),
        )
        .route("/history/{word}", delete(delete_history_item_handler))
        .route("/search", get(search_handler));

    #[cfg(feature = "translate")]
    let api = api.route("/translate", axum::routing::post(routes::translate_handler));

    Router::new()
        .route("/", get(root_handler))
        .nest("/api", api.layer(cors))
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
