use crate::error::ServiceError;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body returned for every non-validation failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub status: u16,
    pub timestamp: NaiveDateTime,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status: status.as_u16(),
            timestamp: chrono::Local::now().naive_local(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("request validation failed")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Internal(String),
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Service(ServiceError::NotFound(message)) => {
                warn!("event=api_error module=api status=not_found message={message}");
                error_response(message, StatusCode::NOT_FOUND)
            }
            Self::Service(err @ ServiceError::Unexpected { .. }) => {
                let cause = err
                    .source()
                    .map(|source| source.to_string())
                    .unwrap_or_default();
                error!(
                    "event=api_error module=api status=error message={} cause={}",
                    err, cause
                );
                error_response(err.to_string(), StatusCode::INTERNAL_SERVER_ERROR)
            }
            Self::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(validation_messages(&errors))).into_response()
            }
            Self::BadRequest(message) => error_response(message, StatusCode::BAD_REQUEST),
            Self::Internal(message) => {
                error!("event=api_error module=api status=error message={message}");
                error_response(message, StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

fn error_response(message: String, status: StatusCode) -> Response {
    (status, Json(ErrorResponse::new(message, status))).into_response()
}

/// Flattens nested validation errors into `field.path -> message`.
pub(crate) fn validation_messages(errors: &ValidationErrors) -> BTreeMap<String, String> {
    let mut messages = BTreeMap::new();
    collect_messages(errors, "", &mut messages);
    messages
}

fn collect_messages(errors: &ValidationErrors, prefix: &str, out: &mut BTreeMap<String, String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            to_camel_case(&field.to_string())
        } else {
            format!("{prefix}.{}", to_camel_case(&field.to_string()))
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                if let Some(first) = field_errors.first() {
                    let message = first
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| first.code.to_string());
                    out.insert(path, message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect_messages(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, &format!("{path}[{index}]"), out);
                }
            }
        }
    }
}

fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{to_camel_case, validation_messages, ApiError};
    use crate::error::{RepoError, ServiceError};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("price_by_night"), "priceByNight");
        assert_eq!(to_camel_case("path"), "path");
        assert_eq!(to_camel_case("roomNumber"), "roomNumber");
    }

    #[test]
    fn validation_messages_use_message_or_code() {
        let mut errors = ValidationErrors::new();
        let mut blank = ValidationError::new("blank");
        blank.message = Some("must not be blank".into());
        errors.add("service_name", blank);
        errors.add("service_price", ValidationError::new("range"));

        let messages = validation_messages(&errors);
        assert_eq!(messages["serviceName"], "must not be blank");
        assert_eq!(messages["servicePrice"], "range");
    }

    #[test]
    fn status_codes_follow_error_kind() {
        let not_found = ApiError::from(ServiceError::not_found("Room with id: 1 not found."));
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let unexpected = ApiError::from(ServiceError::unexpected("boom")(
            RepoError::InvalidData("x".to_string()),
        ));
        assert_eq!(
            unexpected.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let bad = ApiError::BadRequest("bad".to_string());
        assert_eq!(bad.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
