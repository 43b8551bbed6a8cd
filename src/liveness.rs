use axum::{routing::get, Router};

pub fn router() -> Router {
    Router::new().route("/", get(livez))
}

pub async fn livez() -> &'static str {
    tracing::debug!("service is live");
    "alive"
}

/// Serves the liveness route until the process exits.
pub async fn serve(addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr, "liveness endpoint listening");
    axum::serve(listener, router()).await
}
