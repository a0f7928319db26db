// src/bin/api_server.rs

use pet_shelter::infra::{config, telemetry};
use pet_shelter::transport;
use pet_shelter::PetProvider;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    // --- Provider Initialization ---
    let database_url = config::database_url();
    info!(database_url = %database_url, "initializing pet provider");
    let provider = PetProvider::connect(&database_url).await?;
    let pet_count = provider.list().await?.len();
    info!(pet_count, "pet provider ready");

    let app_state = transport::http::AppState::new(provider);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening (Swagger UI at /swagger-ui)");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}
