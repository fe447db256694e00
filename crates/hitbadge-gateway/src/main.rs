//! hitbadge gateway
//!
//! - Counting endpoint on every path except `/`
//! - Config file from the first argument, default `hitbadge.yaml`
//! - Log filter from `RUST_LOG`

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use hitbadge_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "hitbadge.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).await.expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "hitbadge-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
