use axum::{routing::{get, post}, Router};
use po_invoice_recon_rust::{api, AppConfig};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Local-time log format
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // Load configuration
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    let state = Arc::new(config.clone());

    // Build routes
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/api/compare", post(api::compare))
        .route("/api/compare/batch", post(api::batch_compare))
        .route("/api/compare/csv", post(api::compare_csv))
        .layer(ServiceBuilder::new())
        .with_state(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  POST /api/compare        - compare one PO/invoice pair");
    info!("  POST /api/compare/batch  - compare paired document lists");
    info!("  POST /api/compare/csv    - compare one pair, CSV response");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
