use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lexicon::StoreError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("Item not found in history")]
    NotFound,

    #[error("History store unavailable")]
    Store(#[from] StoreError),

    #[cfg(feature = "translate")]
    #[error("Translation failed")]
    Translation(#[from] crate::translate::TranslateError),

    #[cfg(feature = "translate")]
    #[error("Translation is not configured")]
    TranslationUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            #[cfg(feature = "translate")]
            AppError::Translation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            #[cfg(feature = "translate")]
            AppError::TranslationUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Body carries the generic message only, the cause stays in the logs.
        if status.is_server_error() {
            error!(error = ?self, "Request failed");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::MissingParameter("word").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Store(StoreError::Unavailable).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_details_not_exposed() {
        let message = AppError::Store(StoreError::Status(StatusCode::UNAUTHORIZED)).to_string();

        assert_eq!(message, "History store unavailable");
    }
}
