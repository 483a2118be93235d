use std::{
    io,
    net::{Ipv6Addr, SocketAddr},
    sync::Arc,
};

use axum::routing::get;
use context::ServerContext;
use log::info;
use spotiskill_catalog::Catalog;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod catalog;
mod context;
mod docs;
mod errors;
mod schemas;
mod serialized;
mod signup;
mod stats;

/// The default port the server will listen on.
pub const DEFAULT_PORT: u16 = 8080;

pub type Router = axum::Router<ServerContext>;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Builds the spotiskill router, with every endpoint nested under `/api`
pub fn router(catalog: Arc<Catalog>) -> axum::Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_router = Router::new()
        .merge(catalog::router())
        .merge(stats::router())
        .merge(signup::router())
        .route("/openapi.json", get(docs::docs));

    Router::new()
        .nest("/api", api_router)
        .layer(cors)
        .with_state(ServerContext { catalog })
}

/// Starts the spotiskill server
pub async fn run_server(config: ServerConfig, catalog: Arc<Catalog>) -> io::Result<()> {
    let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, config.port).into();
    let listener = TcpListener::bind(&addr).await?;

    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router(catalog).into_make_service()).await
}
