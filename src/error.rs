// src/error.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::sales::SaleError;

#[derive(Debug)]
pub enum AppError {
    DatabaseError(sqlx::Error),
    Unauthorized(String),
    NotFound(String),
    ValidationError(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        AppError::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn db(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DatabaseError(err) => {
                tracing::error!(?err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!(%msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::DatabaseError(err)
    }
}

// Core settlement errors map onto HTTP-shaped responses here, at the
// handler boundary: malformed input is 400, a missing product 404, a stock
// shortfall 409 (stale client state or a race with another sale).
impl From<SaleError> for AppError {
    fn from(err: SaleError) -> Self {
        match err {
            SaleError::EmptyBatch | SaleError::InvalidSaleLine { .. } => {
                AppError::ValidationError(err.to_string())
            }
            SaleError::ProductNotFound(_) => AppError::NotFound(err.to_string()),
            SaleError::InsufficientStock { .. } => AppError::Conflict(err.to_string()),
            SaleError::Storage(err) => AppError::DatabaseError(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sale_errors_map_to_the_right_classes() {
        assert!(matches!(
            AppError::from(SaleError::EmptyBatch),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            AppError::from(SaleError::ProductNotFound(9)),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(SaleError::InsufficientStock {
                product_name: "Rice".to_string(),
                available: 0.1,
                required: 0.5,
                unit: "kg",
            }),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(SaleError::Storage(sqlx::Error::RowNotFound)),
            AppError::DatabaseError(_)
        ));
    }
}
