mod admin;
mod catalog;
mod client_ip;
mod config;
mod db;
mod entities;
mod error;
mod filter;
mod forms;
mod models;
mod review;
mod routes;
mod search;
mod slug;
mod templates;
#[cfg(test)]
mod test_utils;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{catalog::Catalog, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,kinoteka=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = db::connect_and_migrate(&config.database_url).await?;
    let catalog = Catalog::new(db);

    let state = Arc::new(AppState { config: config.clone(), catalog });

    let app = Router::new()
        .route("/", get(routes::index))
        .route("/filter", get(routes::filter_listing))
        .route("/search", get(routes::search_listing))
        .route("/movies/{key}", get(routes::movie_or_genre))
        .route("/actors", get(routes::actor_list))
        .route("/actors/{slug}", get(routes::actor_detail))
        .route("/directors", get(routes::director_list))
        .route("/directors/{slug}", get(routes::director_detail))
        .route("/review/{movie_id}", post(routes::submit_rating))
        .route("/feedback/{movie_id}", post(routes::submit_feedback))
        .nest("/admin", admin::router())
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
