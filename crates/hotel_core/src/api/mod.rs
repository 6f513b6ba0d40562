//! HTTP boundary shared by both services.
//!
//! # Responsibility
//! - Map service/validation/extraction failures to JSON error responses.
//! - Provide extractors whose rejections use the same error envelope.
//! - Log every request with method, path, status and duration.

mod error;
mod extract;
mod middleware;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extract::{ApiPath, ApiQuery, PageParams, ValidatedJson};
pub use middleware::log_requests;
