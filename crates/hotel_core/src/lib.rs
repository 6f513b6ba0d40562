//! Shared plumbing for the hotel booking services.
//!
//! Storage bootstrap, error and pagination types, HTTP error mapping,
//! configuration and logging live here so the Room and Reservation services
//! only carry their own model, SQL and routes.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod page;
pub mod server;
pub mod validation;

pub use config::{ServiceConfig, ServiceDefaults};
pub use error::{RepoError, RepoResult, ServiceError, ServiceResult};
pub use logging::{default_log_level, init_logging, LogLevel, LoggingError};
pub use page::{Page, PageRequest};
pub use server::{run_service, DbHandle, StartupError};

