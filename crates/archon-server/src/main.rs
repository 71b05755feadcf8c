//! Archon API Server
//!
//! HTTP surface for the two-stage architecture-advisor model chain.
//! All session state is in memory; nothing is persisted.

use std::sync::Arc;

use axum::{middleware, routing::get, Json, Router};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod auth;
mod config;
mod models;
mod routes;
mod services;

use config::ServerConfig;
use services::{AdvisorService, OpenRouterChainFactory, SessionStore};

/// Type alias for the advisor service with the production chain factory
pub type AppAdvisorService = AdvisorService<OpenRouterChainFactory>;

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<AppAdvisorService>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Archon API is running - the chain awaits your query".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "archon_server=info,tower_http=info".into()),
        )
        .init();

    tracing::info!("🏛️  Archon API initializing...");

    let config = Arc::new(ServerConfig::from_env()?);

    if config.api_key.is_some() {
        tracing::info!("🔐 API key authentication enabled");
    } else {
        tracing::warn!("⚠️  No ARCHON_API_KEY set - authentication disabled");
    }

    tracing::info!(
        "🧠 Chain configured: {} → {} via {}",
        config.reasoning_model,
        config.explainer_model,
        config.base_url
    );

    // Initialize application services
    let store = Arc::new(SessionStore::new());
    let factory = OpenRouterChainFactory::new(&config);
    let advisor = Arc::new(AdvisorService::new(store, factory));

    let state = AppState { advisor };

    // Protected routes (require authentication)
    let protected_routes = Router::new()
        .merge(routes::session::router())
        .merge(routes::chat::router())
        .merge(routes::export::router())
        .layer(middleware::from_fn_with_state(
            Arc::clone(&config),
            auth::auth_middleware,
        ));

    // OpenAPI documentation
    let openapi = routes::swagger::ApiDoc::openapi();

    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("📚 Swagger UI: /swagger-ui");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("✅ Archon API ready on {}", config.bind_addr);

    axum::serve(listener, router).await?;
    Ok(())
}
