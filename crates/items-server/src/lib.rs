//! items-server - REST facade over an item store.
//!
//! Serves the legacy unversioned routes alongside the `/v1` routes. The
//! two differ only in listing: `GET /items` returns every item, while
//! `GET /v1/items` returns one page and a cursor.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use items_core::ItemStore;

pub use error::ServerError;

/// The store shared by all handlers.
pub type SharedStore = Arc<dyn ItemStore>;

/// Build the application router over `store`.
pub fn router(store: SharedStore) -> Router {
    let mut app = Router::new()
        .route("/", get(routes::root))
        .route("/health", get(routes::health))
        .route("/items", get(routes::list_items).post(routes::create_item))
        .route(
            "/v1/items",
            get(routes::list_items_page).post(routes::create_item),
        );

    for prefix in ["", "/v1"] {
        app = app
            .route(
                &format!("{}/items/:item_id", prefix),
                get(routes::get_item)
                    .put(routes::update_item)
                    .delete(routes::delete_item),
            )
            .route(
                &format!("{}/items/:item_id/:property_name", prefix),
                get(routes::get_item_property),
            );
    }

    app.layer(TraceLayer::new_for_http()).with_state(store)
}

/// Serve the API on `listener` until interrupted.
pub async fn serve(listener: TcpListener, store: SharedStore) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!(%addr, "Serving items API");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    // If the handler cannot be installed, run until killed.
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
