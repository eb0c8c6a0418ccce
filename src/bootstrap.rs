use anyhow::Context;
use axum::Router;
use shelf_db::Database;
use shelf_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Registry holding every application module bound to `db`.
pub fn registry(db: &Database) -> anyhow::Result<ModuleRegistry> {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, db)?;
    Ok(registry)
}

async fn apply_migrations(registry: &ModuleRegistry, db: &Database) -> anyhow::Result<usize> {
    let migrations = registry.collect_migrations();
    let applied = db
        .run_migrations(&migrations)
        .await
        .context("failed to apply migrations")?;

    tracing::info!(
        applied,
        known = migrations.len(),
        "database schema up to date"
    );
    Ok(applied)
}

/// Connect and bring the schema up to date; returns how many migrations ran.
pub async fn migrate(settings: &Settings) -> anyhow::Result<usize> {
    let db = Database::connect(&settings.database)
        .await
        .context("failed to connect to database")?;
    let registry = registry(&db)?;
    let applied = apply_migrations(&registry, &db).await?;
    db.close().await;
    Ok(applied)
}

/// Migrated, initialized router over `db`, without binding a socket.
pub async fn app(settings: &Settings, db: &Database) -> anyhow::Result<Router> {
    let registry = registry(db)?;
    apply_migrations(&registry, db).await?;

    let ctx = InitCtx { settings, db };
    registry.init_modules(&ctx).await?;

    Ok(shelf_http::build_router(&registry, settings, db))
}

/// Run the service until Ctrl-C.
pub async fn serve(settings: &Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "shelf bootstrap starting"
    );

    let db = Database::connect(&settings.database)
        .await
        .context("failed to connect to database")?;
    let registry = registry(&db)?;
    apply_migrations(&registry, &db).await?;

    let ctx = InitCtx {
        settings,
        db: &db,
    };
    registry.init_modules(&ctx).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("shelf bootstrap complete");
    let served = shelf_http::start_server(&registry, settings, &db, shutdown_signal()).await;

    registry.stop_modules().await?;
    db.close().await;
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
