//! Beam analysis HTTP server

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use beamcalc::api::{create_router, AppState};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beamcalc=debug,tower_http=debug,axum=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Beam Calc Engine");

    // Remote section catalog; the embedded table serves when it is down
    let catalog_url =
        std::env::var("CATALOG_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    tracing::info!("Using section catalog at {}", catalog_url);

    // Build application router
    let app = create_router(AppState::new(catalog_url));

    // Bind to address
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Listening on {}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /sections");
    tracing::info!("  GET  /sections/:designation");
    tracing::info!("  POST /analyze");

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
