use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::get,
};
use dotenv::dotenv;
use mimalloc::MiMalloc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod blog;
mod config;
mod error;
mod extract;
mod identity;
mod json;
mod listing;
mod policy;
mod response;
mod schema;
mod store;

#[cfg(test)]
mod test_support;

use config::{Env, ServerConfig};
use store::{Store, postgres::PgStore};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Clone)]
pub struct App {
    pub store: Arc<dyn Store>,
    pub config: Arc<ServerConfig>,
}

pub fn router(app: App) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(app.config.cors_origins.clone()))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/v1/blogs", blog::routes::route())
        .nest("/api/v1/comments", blog::routes::comment_route())
        .nest("/api/v1/identity", identity::routes::route())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app)
}

fn init_tracing(env: Env) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{}=debug,tower_http=debug", env!("CARGO_CRATE_NAME")).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match env {
        Env::Production => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        Env::Dev | Env::Staging => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(?err, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenv().ok();
    init_tracing(Env::from_env());

    let config = ServerConfig::new_from_env();

    let store = PgStore::connect(&config.database_url, config.database_max_connections)?;
    let listen_addr = config.listen_addr;

    let app = App {
        store: Arc::new(store),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(env = ?app.config.env, "listening on {}", listen_addr);

    axum::serve(listener, router(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
