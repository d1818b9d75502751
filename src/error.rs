use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{
    response::{ApiResponse, Meta},
    workflow::{OrderStatus, OrderType, UnknownVariant},
};

/// Rejections produced by the order workflow rules. The caller must not
/// persist anything when one of these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("{order_type} order cannot move from {from} to {to}")]
    IllegalTransition {
        from: OrderStatus,
        to: OrderStatus,
        order_type: OrderType,
    },

    #[error("{0}")]
    PaymentRejected(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Unauthorized {0}")]
    Unauthorized(String),

    #[error("Forbidden")]
    Forbidden,

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Corrupt stored value: {0}")]
    CorruptData(#[from] UnknownVariant),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Workflow(WorkflowError::IllegalTransition { .. }) => StatusCode::CONFLICT,
            AppError::Workflow(WorkflowError::PaymentRejected(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::DbError(_)
            | AppError::OrmError(_)
            | AppError::CorruptData(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        }

        let body = ApiResponse {
            message: self.to_string(),
            data: Some(ErrorData {
                error: self.to_string(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
