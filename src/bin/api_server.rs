use std::sync::Arc;
use titanic_service::{infra, transport, PassengerStore};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let store = Arc::new(PassengerStore::new());

    // Optional dataset seed; the store starts empty without it.
    if let Some(path) = infra::config::dataset_path() {
        let load = infra::dataset::load_passengers(&path)?;
        let mut seeded = 0usize;
        let mut rejected = load.skipped;
        for passenger in load.passengers {
            match store.create(passenger).await {
                Ok(_) => seeded += 1,
                Err(e) => {
                    rejected += 1;
                    tracing::warn!("dataset record rejected: {}", e);
                }
            }
        }
        tracing::info!(
            "seeded {} passengers from {} ({} rejected)",
            seeded,
            path.display(),
            rejected
        );
    }

    let app_state = transport::http::AppState { store };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);

    let addr = infra::config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutdown signal received");
        }
    }

    Ok(())
}
