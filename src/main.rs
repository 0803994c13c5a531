//!
//! REST server for restaurant table reservations.
//! Reads configuration from TOML file (~/.config/tablebook/config.toml).

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use tablebook::application::booking::BookingManager;
use tablebook::application::flash::FlashStore;
use tablebook::application::reservations::Reservations;
use tablebook::auth::jwt::JwtConfig;
use tablebook::config::AppConfig;
use tablebook::infrastructure::database::migrator::Migrator;
use tablebook::shared::{listen_for_shutdown_signals, ShutdownSignal};
use tablebook::{
    create_api_router, default_config_path, init_database, DatabaseConfig,
    SeaOrmRepositoryProvider,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("TABLEBOOK_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging.level, &cfg.logging.format);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_tracing("info", "text");
            error!("Failed to load config from {}: {}", config_path.display(), e);
            return Err(e.into());
        }
    };

    info!("Starting Tablebook reservation service...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");
    info!("Prometheus metrics recorder installed");

    // ── Build sub-configs from AppConfig ───────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let jwt_config = JwtConfig {
        secret: app_cfg.security.jwt_secret.clone(),
        expiration_hours: app_cfg.security.jwt_expiration_hours,
        issuer: "tablebook".to_string(),
    };
    info!(
        "JWT configured with {}h token expiration",
        jwt_config.expiration_hours
    );

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // Seed a default location on first run
    create_default_location(&db).await;

    // ── Repositories and application services ──────────────────
    let repos: Arc<dyn tablebook::domain::RepositoryProvider> =
        Arc::new(SeaOrmRepositoryProvider::new(db.clone()));

    let booking = Arc::new(BookingManager::new(repos.clone()));
    let component = Arc::new(Reservations::new(
        repos.clone(),
        booking.clone(),
        app_cfg.reservations.clone(),
    ));
    let flash = FlashStore::new();

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── REST API server ─────────────────────────────────────────
    let api_router = create_api_router(
        repos,
        db.clone(),
        jwt_config,
        booking,
        component,
        flash,
        prometheus_handle,
    );

    let api_addr = format!("{}:{}", app_cfg.server.host, app_cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Tablebook shutdown complete");
    Ok(())
}

fn init_tracing(level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Create a default location if none exist, so bookings work out of the box
async fn create_default_location(db: &sea_orm::DatabaseConnection) {
    use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};
    use tablebook::infrastructure::database::entities::location;

    let count = location::Entity::find().count(db).await.unwrap_or(0);
    if count > 0 {
        return;
    }

    info!("Creating default location...");
    let default = location::ActiveModel {
        id: sea_orm::NotSet,
        name: Set("Main Restaurant".to_string()),
        telephone: Set(None),
        is_active: Set(true),
        cancellation_timeout_mins: Set(0),
        created_at: Set(chrono::Utc::now()),
    };

    match default.insert(db).await {
        Ok(created) => info!("Default location created: {}", created.name),
        Err(e) => error!("Failed to create default location: {}", e),
    }
}
