//! Petclinic server binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `petclinic-config.yaml` (or `PETCLINIC_CONFIG`)
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured document store, running migrations if asked
//! 4. Seed the default vets into an empty vet collection
//! 5. Load templates and serve HTTP until `Ctrl-C`

mod error;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use petclinic_core::{Clinic, PetclinicConfig, StoreBackend};
use petclinic_db::{MemoryStore, PgDocumentStore, PostgresConfig, PostgresPool};
use petclinic_web::{AppState, ServerConfig, Views, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::StartupError;

const DEFAULT_CONFIG_PATH: &str = "petclinic-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if any startup step or the server itself fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = config_path();
    let config = PetclinicConfig::load(&config_path).map_err(StartupError::from)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        config = %config_path.display(),
        found = config_path.exists(),
        host = %config.server.host,
        port = config.server.port,
        backend = ?config.database.backend,
        "petclinic-server starting"
    );

    let (clinic, pool) = open_clinic(&config).await?;

    if config.bootstrap.seed_vets {
        let inserted = clinic.vets.seed_vets().await.map_err(StartupError::from)?;
        info!(inserted, "Vet bootstrap finished");
    }

    let views = match config.views.templates_dir.as_deref() {
        Some(dir) => Views::with_overrides(Path::new(dir)),
        None => Views::builtin(),
    }
    .map_err(StartupError::from)?;

    let state = Arc::new(AppState::new(clinic, views));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let served = start_server(&server_config, state).await;

    if let Some(pool) = pool {
        pool.close().await;
    }

    served.map_err(StartupError::from)?;
    info!("petclinic-server stopped");
    Ok(())
}

fn config_path() -> PathBuf {
    std::env::var_os("PETCLINIC_CONFIG").map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), PathBuf::from)
}

/// Build the stores over the configured backend. The pool is returned so
/// it can be closed on shutdown.
async fn open_clinic(
    config: &PetclinicConfig,
) -> Result<(Clinic, Option<PostgresPool>), StartupError> {
    match config.database.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Ok((Clinic::from_store(Arc::new(MemoryStore::new())), None))
        }
        StoreBackend::Postgres => {
            let pg_config = PostgresConfig::new(&config.database.url)
                .with_max_connections(config.database.max_connections)
                .with_acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs));
            let pool = PostgresPool::connect(&pg_config).await?;
            pool.ping().await?;

            if config.database.run_migrations {
                pool.run_migrations().await?;
            }

            let store = Arc::new(PgDocumentStore::new(&pool));
            Ok((Clinic::from_store(store), Some(pool)))
        }
    }
}
