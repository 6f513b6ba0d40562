//! Service process bootstrap.
//!
//! # Responsibility
//! - Load config, start logging, open the database and serve the router.
//! - Run blocking SQLite work off the async executor.
//!
//! # Invariants
//! - One SQLite connection per process, guarded by a mutex.
//! - Database work never runs on an async worker thread.

use crate::api::{log_requests, ApiError};
use crate::config::{ServiceConfig, ServiceDefaults};
use crate::db::{open_db, open_db_in_memory, DbError, Migration};
use crate::error::ServiceError;
use crate::logging::{init_logging, LoggingError};
use axum::Router;
use log::{info, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Shared handle to the service database.
#[derive(Clone)]
pub struct DbHandle {
    conn: Arc<Mutex<Connection>>,
}

impl DbHandle {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Runs `f` with exclusive access to the connection on the blocking pool.
    pub async fn run<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| ApiError::Internal("database connection lock poisoned".to_string()))?;
            f(&mut guard).map_err(ApiError::from)
        })
        .await
        .map_err(|err| ApiError::Internal(format!("database task failed: {err}")))?
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] LoggingError),
    #[error("failed to open database: {0}")]
    Db(#[from] DbError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Boots a service: config → logging → database → HTTP server.
///
/// `routes` builds the service router from the database handle; request
/// logging is layered on top here.
pub async fn run_service(
    defaults: &ServiceDefaults,
    migrations: &[Migration],
    routes: fn(DbHandle) -> Router,
) -> Result<(), StartupError> {
    let config = ServiceConfig::load(defaults)?;
    init_logging(&config.logger.level, defaults.name, config.logger.dir.as_deref())?;

    let conn = if config.is_in_memory_db() {
        warn!("event=db_config module=server status=ok mode=memory note=data_not_persisted");
        open_db_in_memory(migrations)?
    } else {
        open_db(&config.database.path, migrations)?
    };

    let app = routes(DbHandle::new(conn)).layer(axum::middleware::from_fn(log_requests));
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "event=server_start module=server status=ok service={} addr={}",
        defaults.name, addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(
        "event=server_stop module=server status=ok service={}",
        defaults.name
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=shutdown_signal module=server status=error error={err}");
    }
}
