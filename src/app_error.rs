use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

use crate::domain::RegistryError;
use crate::services::errors::MulticallError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Multicall(#[from] MulticallError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    code: u16,
    message: String,
}

fn registry_status(err: &RegistryError) -> StatusCode {
    match err {
        RegistryError::NotFound { .. }
        | RegistryError::NetworkUnavailable(_)
        | RegistryError::ContractUnavailable(_) => StatusCode::NOT_FOUND,
        RegistryError::BindingsMismatch(_) | RegistryError::DuplicateContract(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Registry(err) => registry_status(err),
            AppError::Multicall(MulticallError::Registry(err)) => registry_status(err),
            AppError::Multicall(MulticallError::EmptyBatch) => StatusCode::BAD_REQUEST,
            AppError::Multicall(MulticallError::AggregateCallFailed { .. }) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (
            status,
            Json(ErrorBody {
                code: status.as_u16(),
                message: self.to_string(),
            }),
        )
            .into_response()
    }
}
