//! HTTP server facade for shelf with Axum, the response envelope, and
//! OpenAPI support.

use std::future::Future;

use anyhow::Context;
use axum::{routing::get, Router};

use shelf_db::Database;
use shelf_kernel::{settings::Settings, ModuleRegistry};

pub mod envelope;
pub mod error;
pub mod extract;
pub mod router;

pub use envelope::{Envelope, Reply};
pub use error::AppError;
pub use extract::{IdPath, JsonBody};

use router::RouterBuilder;

/// Serve the assembled router until `shutdown` resolves
pub async fn start_server<F>(
    registry: &ModuleRegistry,
    settings: &Settings,
    db: &Database,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let address = settings.server.bind_address();
    tracing::info!("starting HTTP server on {}", address);

    let app = build_router(registry, settings, db);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind to {address}"))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;

    tracing::info!("HTTP server stopped");
    Ok(())
}

/// Build the main HTTP router with all module routes mounted
pub fn build_router(registry: &ModuleRegistry, settings: &Settings, db: &Database) -> Router {
    let health_db = db.clone();
    let mut router_builder =
        RouterBuilder::new().route("/healthz", get(move || health_check(health_db.clone())));

    for module in registry.modules() {
        let mount_path = module.mount_path();
        tracing::info!(
            module = module.name(),
            "mounting module routes under {}",
            mount_path
        );
        router_builder = router_builder.mount_module(&mount_path, module.routes());
    }

    router_builder
        .with_openapi(registry)
        .with_fallbacks()
        .with_timeout(settings.server.request_timeout_ms)
        .with_request_id()
        .with_cors()
        .with_tracing()
        .build()
}

/// Health check endpoint; fails when the store does not answer
async fn health_check(db: Database) -> Result<&'static str, AppError> {
    db.ping().await?;
    Ok("ok")
}
