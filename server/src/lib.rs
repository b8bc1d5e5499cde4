use axum::{
    Router,
    routing::get,
};
use tower_http::trace::TraceLayer;

pub mod config;
mod handlers;
mod responses;
pub mod services;

use handlers::Resource;
use services::{examples::Examples, words::Words};

/// Build the HTTP API over the given stores.
pub fn app<E, W>(examples: E, words: W, page_size: u64) -> Router
where
    E: Examples,
    W: Words,
{
    Router::new()
        .route(
            "/api/examples",
            get(handlers::examples::list::<E>).post(handlers::examples::create::<E>),
        )
        .route(
            "/api/examples/{id}",
            get(handlers::examples::get::<E>).put(handlers::examples::update::<E>),
        )
        .with_state(Resource::new(examples, page_size))
        .route(
            "/api/words",
            get(handlers::words::list::<W>).post(handlers::words::create::<W>),
        )
        .route(
            "/api/words/{id}",
            get(handlers::words::get::<W>).put(handlers::words::update::<W>),
        )
        .with_state(Resource::new(words, page_size))
        .route("/api/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
}
