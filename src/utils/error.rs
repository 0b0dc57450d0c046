use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{error, warn};

use crate::config::ConfigError;
use crate::models::validation::ValidationError;
use crate::repository::StoreError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request payload")]
    InvalidPayload(#[from] JsonRejection),

    #[error("Invalid UUID format")]
    InvalidId(#[from] uuid::Error),

    #[error("Event not found")]
    NotFound,

    /// A store failure. `message` is the only text the client sees.
    #[error("{message}: {source}")]
    Store {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wraps a store error, keeping `NotFound` distinguishable from internal failures.
    pub fn store(message: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| match source {
            StoreError::NotFound => AppError::NotFound,
            source => AppError::Store { message, source },
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn log(&self) {
        match self {
            AppError::Store { message, source } => {
                error!(error = ?source, "{}", message);
            }
            AppError::InvalidPayload(rejection) => {
                warn!(reason = %rejection.body_text(), "Rejected request payload");
            }
            _ => {}
        }
    }

    fn public_message(&self) -> String {
        match self {
            AppError::Store { message, .. } => message.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal details
        self.log();

        error_response(self.public_message(), status)
    }
}

/// Failures that stop the server before it starts accepting requests.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("database initialization failed: {0}")]
    Database(#[from] StoreError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}
